//! Named placeholder rewriting.
//!
//! Templates use `:name` placeholders; Postgres wants `$n`. The scanner leaves
//! `::` casts, quoted literals, quoted identifiers and comments untouched.
//! A name used twice maps to the same position.

use covmon_core::{FieldValue, QueryParams};

/// SQL with positional placeholders and the values to bind, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Bound {
    /// Rewritten SQL.
    pub sql: String,
    /// Values for `$1..$n`.
    pub values: Vec<FieldValue>,
}

/// A placeholder had no value in the parameter map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingParam(pub String);

/// Rewrite `:name` placeholders to `$n`.
///
/// # Errors
/// Returns the first placeholder name with no value in `params`.
pub fn rewrite(sql: &str, params: &QueryParams) -> Result<Bound, MissingParam> {
    let mut out = String::with_capacity(sql.len());
    let mut names: Vec<&str> = Vec::new();
    let mut values = Vec::new();
    let bytes = sql.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            quote @ (b'\'' | b'"') => {
                let end = find_byte(bytes, i + 1, quote).map_or(bytes.len(), |e| e + 1);
                out.push_str(&sql[i..end]);
                i = end;
            }
            b'-' if bytes.get(i + 1) == Some(&b'-') => {
                let end = find_byte(bytes, i, b'\n').unwrap_or(bytes.len());
                out.push_str(&sql[i..end]);
                i = end;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let end = sql[i + 2..].find("*/").map_or(bytes.len(), |e| i + 2 + e + 2);
                out.push_str(&sql[i..end]);
                i = end;
            }
            b':' if bytes.get(i + 1) == Some(&b':') => {
                out.push_str("::");
                i += 2;
            }
            b':' if bytes.get(i + 1).is_some_and(|b| is_ident_start(*b)) => {
                let start = i + 1;
                let mut end = start;
                while end < bytes.len() && is_ident_char(bytes[end]) {
                    end += 1;
                }
                let name = &sql[start..end];
                let position = match names.iter().position(|n| *n == name) {
                    Some(p) => p + 1,
                    None => {
                        let value = params
                            .get(name)
                            .ok_or_else(|| MissingParam(name.to_string()))?;
                        names.push(name);
                        values.push(value.clone());
                        names.len()
                    }
                };
                out.push('$');
                out.push_str(&position.to_string());
                i = end;
            }
            _ => {
                // copy one UTF-8 scalar
                let ch_len = sql[i..].chars().next().map_or(1, char::len_utf8);
                out.push_str(&sql[i..i + ch_len]);
                i += ch_len;
            }
        }
    }

    Ok(Bound { sql: out, values })
}

fn find_byte(bytes: &[u8], from: usize, needle: u8) -> Option<usize> {
    bytes
        .get(from..)?
        .iter()
        .position(|b| *b == needle)
        .map(|p| p + from)
}

const fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

const fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
