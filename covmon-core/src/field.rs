//! Generic row representation returned by query gateways.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::CovmonError;

/// A single cell as produced by the warehouse.
///
/// Gateways normalize integer widths to `Int` and text-like types to `Text`;
/// decoders never see driver-specific types.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// SQL `NULL`.
    Null,
    /// Boolean.
    Bool(bool),
    /// Any SQL integer type.
    Int(i64),
    /// Floating point.
    Float(f64),
    /// Exact numeric.
    Decimal(Decimal),
    /// Any character type.
    Text(String),
    /// Timestamp without time zone.
    Timestamp(NaiveDateTime),
    /// Timestamp with time zone.
    TimestampTz(DateTime<Utc>),
    /// Calendar date.
    Date(NaiveDate),
}

impl FieldValue {
    /// Short type label for mapping errors.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Decimal(_) => "decimal",
            Self::Text(_) => "text",
            Self::Timestamp(_) => "timestamp",
            Self::TimestampTz(_) => "timestamptz",
            Self::Date(_) => "date",
        }
    }

    /// True for SQL `NULL`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    fn to_json(&self, dates: &DateFormat) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(i) => Value::from(*i),
            Self::Float(f) => serde_json::Number::from_f64(*f).map_or(Value::Null, Value::Number),
            Self::Decimal(d) => Value::String(d.to_string()),
            Self::Text(s) => Value::String(s.clone()),
            Self::Timestamp(ts) => Value::String(dates.format_naive(*ts)),
            Self::TimestampTz(ts) => Value::String(dates.format_utc(*ts)),
            Self::Date(d) => Value::String(d.format("%Y-%m-%d").to_string()),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Decimal> for FieldValue {
    fn from(v: Decimal) -> Self {
        Self::Decimal(v)
    }
}

impl<T: Into<Self>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// One result row: column names to values, in select-list order.
///
/// Lookups ignore ASCII case. Unquoted identifiers come back lower-cased from
/// most warehouses while some decoders use the historical upper-case names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    fields: Vec<(String, FieldValue)>,
}

impl FieldMap {
    /// Empty row.
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Append a column, replacing an existing one with the same name.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<FieldValue>) {
        let column = column.into();
        let value = value.into();
        if let Some(slot) = self
            .fields
            .iter_mut()
            .find(|(c, _)| c.eq_ignore_ascii_case(&column))
        {
            slot.1 = value;
        } else {
            self.fields.push((column, value));
        }
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(column, value);
        self
    }

    /// Value of a column, `None` when the column is absent.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(c, _)| c.eq_ignore_ascii_case(column))
            .map(|(_, v)| v)
    }

    /// Columns in select-list order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(c, v)| (c.as_str(), v))
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the row has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// JSON rendering for trace logs, timestamps formatted with `dates`.
    #[must_use]
    pub fn to_json(&self, dates: &DateFormat) -> Value {
        let map: Map<String, Value> = self
            .fields
            .iter()
            .map(|(c, v)| (c.clone(), v.to_json(dates)))
            .collect();
        Value::Object(map)
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut out = Self::new();
        for (k, v) in iter {
            out.insert(k, v);
        }
        out
    }
}

/// Timestamp formatting used when rows are serialized for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pattern: String,
    tz: Tz,
}

impl DateFormat {
    /// Build from a `strftime` pattern and an IANA zone name.
    ///
    /// # Errors
    /// Returns `Config` when the zone is unknown or the pattern is malformed.
    pub fn new(pattern: &str, timezone: &str) -> Result<Self, CovmonError> {
        let tz: Tz = timezone
            .parse()
            .map_err(|_| CovmonError::config(format!("unknown time zone: {timezone}")))?;
        let malformed = chrono::format::StrftimeItems::new(pattern)
            .any(|item| matches!(item, chrono::format::Item::Error));
        if malformed {
            return Err(CovmonError::config(format!(
                "invalid date format pattern: {pattern}"
            )));
        }
        Ok(Self {
            pattern: pattern.to_string(),
            tz,
        })
    }

    /// Zone used for `TimestampTz` values.
    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.tz
    }

    fn format_naive(&self, ts: NaiveDateTime) -> String {
        ts.format(&self.pattern).to_string()
    }

    fn format_utc(&self, ts: DateTime<Utc>) -> String {
        ts.with_timezone(&self.tz).format(&self.pattern).to_string()
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self {
            pattern: "%Y-%m-%d %H:%M:%S%.3f".to_string(),
            tz: chrono_tz::Europe::Moscow,
        }
    }
}
