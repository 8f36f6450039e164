use rust_decimal::Decimal;

use super::format::{NOT_AVAILABLE, escape_html, format_amount};

/// Document head with the inline stylesheet, up to and including `<body>`.
pub const DOCUMENT_HEAD: &str = concat!(
    "<html><head><style>",
    "  table { border-collapse: collapse; margin: 20px 0; }",
    "  th, td { border: 1px solid #ddd; padding: 8px 12px; text-align: left; }",
    "  th { background-color: #f2f2f2; }",
    "  th.main { background-color: #c0c0c0; text-align: center;}",
    "  td.amount { text-align: right; }",
    "</style></head><body>",
);

/// Heading opening every report.
pub const GREETING: &str = "<h4>Добрый день!</h4>";

/// Document tail.
pub const DOCUMENT_TAIL: &str = "</body></html>";

/// Single cell text of an empty section.
pub const NO_DATA_PLACEHOLDER: &str = "Нет данных для отображения";

/// One table cell and how its value is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Free text, HTML-escaped; `None` renders empty.
    Text(Option<String>),
    /// Pre-formatted data-layer output inserted verbatim; `None` renders empty.
    Trusted(Option<String>),
    /// Integer counter, right-aligned with Russian grouping; `None` renders `N/A`.
    Amount(Option<i64>),
    /// Exact numeric in plain notation, right-aligned; `None` renders `N/A`.
    Decimal(Option<Decimal>),
}

impl Cell {
    fn write_to(&self, out: &mut String) {
        match self {
            Self::Text(v) => {
                out.push_str("<td>");
                out.push_str(&escape_html(v.as_deref().unwrap_or_default()));
            }
            Self::Trusted(v) => {
                out.push_str("<td>");
                out.push_str(v.as_deref().unwrap_or_default());
            }
            Self::Amount(v) => {
                out.push_str("<td class=\"amount\">");
                out.push_str(&format_amount(*v));
            }
            Self::Decimal(v) => {
                out.push_str("<td class=\"amount\">");
                match v {
                    Some(d) => out.push_str(&d.to_string()),
                    None => out.push_str(NOT_AVAILABLE),
                }
            }
        }
        out.push_str("</td>");
    }
}

/// A titled table with a fixed column list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Merged title row text.
    pub title: String,
    /// Declared column headers; their count drives every `colspan`.
    pub columns: &'static [&'static str],
    /// Data rows; each has exactly `columns.len()` cells.
    pub rows: Vec<Vec<Cell>>,
}

impl Section {
    /// Section with no rows, rendered with the placeholder.
    pub fn empty(title: impl Into<String>, columns: &'static [&'static str]) -> Self {
        Self {
            title: title.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Render this section as one `<table>`.
    pub fn write_to(&self, out: &mut String) {
        let span = self.columns.len();
        out.push_str(&format!(
            "<table border='1'><tr><th colspan='{span}' class=\"main\">{}</th></tr>",
            escape_html(&self.title)
        ));
        if self.rows.is_empty() {
            out.push_str(&format!(
                "<tr><td colspan='{span}'>{NO_DATA_PLACEHOLDER}</td></tr>"
            ));
        } else {
            out.push_str("<tr>");
            for header in self.columns {
                out.push_str("<th>");
                out.push_str(header);
                out.push_str("</th>");
            }
            out.push_str("</tr>");
            for row in &self.rows {
                debug_assert_eq!(row.len(), span, "row width differs from declared columns");
                out.push_str("<tr>");
                for cell in row {
                    cell.write_to(out);
                }
                out.push_str("</tr>");
            }
        }
        out.push_str("</table>");
    }
}

/// Render a complete report.
///
/// `intro` paragraphs follow the greeting; sections are emitted in order.
/// Output depends only on the arguments.
#[must_use]
pub fn render_document(intro: &[&str], sections: &[Section]) -> String {
    let mut out = String::with_capacity(DOCUMENT_HEAD.len() + 1024 * (sections.len() + 1));
    out.push_str(DOCUMENT_HEAD);
    out.push_str(GREETING);
    for paragraph in intro {
        out.push_str("<p>");
        out.push_str(paragraph);
        out.push_str("</p>");
    }
    for section in sections {
        section.write_to(&mut out);
    }
    out.push_str(DOCUMENT_TAIL);
    out
}
