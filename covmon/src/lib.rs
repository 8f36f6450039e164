//! Covmon runs one coverage monitoring report end to end.
//!
//! Overview
//! - Executes the section queries of the configured report variant through a
//!   [`QueryGateway`], decodes the rows and renders one HTML document.
//! - Resolves the distribution list from the recipients table.
//! - Mails the document to each recipient in turn; a failed send is followed
//!   by exactly one "delivery failed" notice to the same address.
//!
//! Key behaviors
//! - Section isolation: a failing or mistyped query is logged and its table is
//!   rendered with the "no data" placeholder; the other sections are unaffected.
//! - The recipient-list fetch is not isolated: its failure aborts the run
//!   before any mail is sent.
//! - Recipient isolation: one recipient's failure never stops the batch.
//! - Every gateway and transport call is bounded by its configured timeout.
//! - Gateway and transport are closed on every exit path.
//!
//! Building and running a report:
//! ```rust,ignore
//! use std::sync::Arc;
//! use covmon::{Covmon, RunOutcome};
//!
//! let covmon = Covmon::builder()
//!     .with_gateway(Arc::new(PgGateway::connect_lazy(&cfg.datasource, timeout)?))
//!     .with_transport(Arc::new(SmtpTransport::new(&cfg.smtp)?))
//!     .config(cfg)
//!     .build()?;
//! let report = covmon.run().await;
//! if let RunOutcome::Completed(summary) = report.outcome {
//!     println!("{} of {} delivered", summary.delivered, summary.attempted);
//! }
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
/// Per-recipient delivery with fallback notices.
pub mod dispatch;
/// Distribution list lookup.
pub mod recipients;
mod sections;

pub use core::{Covmon, CovmonBuilder};
pub use dispatch::{Dispatcher, MailContent};
pub use recipients::parse_recipients;

pub use covmon_core::{
    CovmonConfig, CovmonError, DeliveryRecord, DispatchSummary, FallbackOutcome, FieldMap,
    FieldValue, MailTransport, OutgoingMail, QueryGateway, QueryKey, RecipientAddress,
    ReportVariant, RunOutcome, RunReport, SectionReport, SendOutcome,
};
