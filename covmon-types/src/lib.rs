//! Covmon-specific data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod config;
mod error;
mod query;
mod recipient;
mod reports;

pub use config::{
    CovmonConfig, DatasourceConfig, DbConfig, DbTables, MailConfig, ReportConfig, ReportVariant,
    SmtpConfig, SqlConfig,
};
pub use error::CovmonError;
pub use query::QueryKey;
pub use recipient::RecipientAddress;
pub use reports::{
    DeliveryRecord, DispatchSummary, FallbackOutcome, RunOutcome, RunReport, SectionReport,
    SendOutcome,
};
