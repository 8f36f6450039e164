use covmon_types::CovmonError;
use num_format::{Locale, WriteFormatted};

/// Rendered for absent counters.
pub const NOT_AVAILABLE: &str = "N/A";
/// Rendered when a counter could not be formatted.
pub const FORMAT_ERROR: &str = "Ошибка";

/// Russian digit grouping, no fractional part.
///
/// Groups are separated by the locale's non-breaking space, so
/// `1234567` becomes `"1\u{a0}234\u{a0}567"`.
#[must_use]
pub fn format_amount(amount: Option<i64>) -> String {
    let Some(n) = amount else {
        return NOT_AVAILABLE.to_string();
    };
    let mut out = String::new();
    match out.write_formatted(&n, &Locale::ru) {
        Ok(_) => out,
        Err(e) => {
            let err = CovmonError::Render(format!("cannot format {n}: {e}"));
            tracing::error!(error = %err, "error formatting amount");
            FORMAT_ERROR.to_string()
        }
    }
}

/// Escape the five HTML-significant characters.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
