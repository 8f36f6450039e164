//! Typed records decoded from generic field maps.
//!
//! Each report variant owns its own record types; columns are looked up by
//! name and decoded strictly. Absent columns and SQL `NULL` become `None`,
//! anything of the wrong type is a mapping error for the whole section.

pub mod comm_coverage;
pub mod coverage;

use covmon_types::{CovmonError, QueryKey};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::field::{FieldMap, FieldValue};

/// A column held a value of the wrong type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("column {column}: expected {expected}, found {found}")]
pub struct ColumnError {
    /// Column name as declared by the decoder.
    pub column: &'static str,
    /// Type the decoder asked for.
    pub expected: &'static str,
    /// Type actually present.
    pub found: &'static str,
}

/// Decode a typed record from one row.
pub trait FromFieldMap: Sized {
    /// Build the record, failing on the first mistyped column.
    ///
    /// # Errors
    /// Returns a [`ColumnError`] naming the offending column.
    fn from_field_map(row: &FieldMap) -> Result<Self, ColumnError>;
}

/// Decode every row of a result set.
///
/// # Errors
/// Returns `Mapping` for the first row that fails, tagged with the query and
/// the zero-based row index.
pub fn decode_rows<T: FromFieldMap>(query: QueryKey, rows: &[FieldMap]) -> Result<Vec<T>, CovmonError> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            T::from_field_map(row).map_err(|e| {
                CovmonError::mapping(
                    query.as_str(),
                    i,
                    e.column,
                    format!("expected {}, found {}", e.expected, e.found),
                )
            })
        })
        .collect()
}

fn mismatch(column: &'static str, expected: &'static str, found: &FieldValue) -> ColumnError {
    ColumnError {
        column,
        expected,
        found: found.type_name(),
    }
}

fn present<'a>(row: &'a FieldMap, column: &str) -> Option<&'a FieldValue> {
    row.get(column).filter(|v| !v.is_null())
}

/// Integer counter. Only `Int` is accepted.
pub fn count(row: &FieldMap, column: &'static str) -> Result<Option<i64>, ColumnError> {
    match present(row, column) {
        None => Ok(None),
        Some(FieldValue::Int(v)) => Ok(Some(*v)),
        Some(other) => Err(mismatch(column, "integer", other)),
    }
}

/// Free text or pre-formatted string. Only `Text` is accepted.
pub fn text(row: &FieldMap, column: &'static str) -> Result<Option<String>, ColumnError> {
    match present(row, column) {
        None => Ok(None),
        Some(FieldValue::Text(v)) => Ok(Some(v.clone())),
        Some(other) => Err(mismatch(column, "text", other)),
    }
}

/// Exact numeric. Integers widen losslessly.
pub fn decimal(row: &FieldMap, column: &'static str) -> Result<Option<Decimal>, ColumnError> {
    match present(row, column) {
        None => Ok(None),
        Some(FieldValue::Decimal(v)) => Ok(Some(*v)),
        Some(FieldValue::Int(v)) => Ok(Some(Decimal::from(*v))),
        Some(other) => Err(mismatch(column, "decimal", other)),
    }
}
