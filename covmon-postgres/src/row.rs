use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use covmon_core::{FieldMap, FieldValue};
use rust_decimal::Decimal;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{Column, Postgres, Row, TypeInfo};

/// A column that could not be turned into a [`FieldValue`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDecodeError {
    /// Column name.
    pub column: String,
    /// What went wrong.
    pub msg: String,
}

/// Convert a result row, keeping column order.
///
/// Integer widths collapse to `Int`; character types collapse to `Text`.
pub fn to_field_map(row: &PgRow) -> Result<FieldMap, ColumnDecodeError> {
    let mut out = FieldMap::new();
    for column in row.columns() {
        let name = column.name();
        let idx = column.ordinal();
        let type_name = column.type_info().name();
        let fail = |msg: String| ColumnDecodeError {
            column: name.to_string(),
            msg,
        };
        let decoded = match type_name {
            "INT2" => row
                .try_get::<Option<i16>, _>(idx)
                .map(|v| v.map(|n| FieldValue::Int(i64::from(n)))),
            "INT4" => row
                .try_get::<Option<i32>, _>(idx)
                .map(|v| v.map(|n| FieldValue::Int(i64::from(n)))),
            "INT8" => row
                .try_get::<Option<i64>, _>(idx)
                .map(|v| v.map(FieldValue::Int)),
            "NUMERIC" => row
                .try_get::<Option<Decimal>, _>(idx)
                .map(|v| v.map(FieldValue::Decimal)),
            "FLOAT4" => row
                .try_get::<Option<f32>, _>(idx)
                .map(|v| v.map(|n| FieldValue::Float(f64::from(n)))),
            "FLOAT8" => row
                .try_get::<Option<f64>, _>(idx)
                .map(|v| v.map(FieldValue::Float)),
            "BOOL" => row
                .try_get::<Option<bool>, _>(idx)
                .map(|v| v.map(FieldValue::Bool)),
            "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => row
                .try_get::<Option<String>, _>(idx)
                .map(|v| v.map(FieldValue::Text)),
            "TIMESTAMP" => row
                .try_get::<Option<NaiveDateTime>, _>(idx)
                .map(|v| v.map(FieldValue::Timestamp)),
            "TIMESTAMPTZ" => row
                .try_get::<Option<DateTime<Utc>>, _>(idx)
                .map(|v| v.map(FieldValue::TimestampTz)),
            "DATE" => row
                .try_get::<Option<NaiveDate>, _>(idx)
                .map(|v| v.map(FieldValue::Date)),
            other => return Err(fail(format!("unsupported column type {other}"))),
        };
        let value = decoded.map_err(|e| fail(e.to_string()))?;
        out.insert(name, value.unwrap_or(FieldValue::Null));
    }
    Ok(out)
}

/// Bind one parameter.
pub fn bind_value<'q>(
    query: Query<'q, Postgres, PgArguments>,
    value: FieldValue,
) -> Query<'q, Postgres, PgArguments> {
    match value {
        FieldValue::Null => query.bind(Option::<String>::None),
        FieldValue::Bool(b) => query.bind(b),
        FieldValue::Int(n) => query.bind(n),
        FieldValue::Float(f) => query.bind(f),
        FieldValue::Decimal(d) => query.bind(d),
        FieldValue::Text(s) => query.bind(s),
        FieldValue::Timestamp(t) => query.bind(t),
        FieldValue::TimestampTz(t) => query.bind(t),
        FieldValue::Date(d) => query.bind(d),
    }
}
