//! HTML rendering of report sections.
//!
//! - `format`: counter formatting and HTML escaping.
//! - `html`: cells, sections and the document frame.
//! - `coverage`, `comm_coverage`: per-variant titles, headers and row layouts.

pub mod comm_coverage;
pub mod coverage;
mod format;
mod html;

pub use format::{FORMAT_ERROR, NOT_AVAILABLE, escape_html, format_amount};
pub use html::{
    Cell, DOCUMENT_HEAD, DOCUMENT_TAIL, GREETING, NO_DATA_PLACEHOLDER, Section, render_document,
};
