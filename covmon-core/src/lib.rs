//! covmon-core
//!
//! Traits and pure building blocks shared across the covmon workspace.
//!
//! - `gateway`: the `QueryGateway` trait, query templates and macro substitution.
//! - `transport`: the `MailTransport` trait and the outgoing message shape.
//! - `field`: generic rows (`FieldMap`) as returned by gateways.
//! - `rows`: strict decoding of generic rows into per-variant records.
//! - `render`: locale-aware cell formatting and the HTML document.
//! - `layout`: which queries feed which tables, per report variant.
//! - `calendar`: the Russian month-name table used in subjects.
//!
//! Async runtime
//! -------------
//! The traits are `async_trait` based and runtime agnostic; the orchestrator
//! and the production backends run them on Tokio.
#![warn(missing_docs)]

/// Month names for report subjects.
pub mod calendar;
/// Generic rows and timestamp formatting for trace output.
pub mod field;
/// Query gateway contract and SQL templates.
pub mod gateway;
/// Per-variant report layouts.
pub mod layout;
/// HTML rendering.
pub mod render;
/// Typed records decoded from rows.
pub mod rows;
/// Mail transport contract.
pub mod transport;

pub use covmon_types::*;
pub use field::{DateFormat, FieldMap, FieldValue};
pub use gateway::{
    Query, QueryGateway, QueryParams, QueryTemplates, RECIPIENTS_TABLE_MACRO, substitute_macros,
};
pub use layout::{ReportLayout, SectionSpec, fill_month};
pub use render::{Cell, Section, render_document};
pub use transport::{MailTransport, OutgoingMail};
