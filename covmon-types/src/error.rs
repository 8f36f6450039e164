use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the covmon workspace.
///
/// Query, mapping and delivery failures carry enough context (logical query,
/// row index, recipient) to be logged without the surrounding call stack.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CovmonError {
    /// A warehouse query failed to execute or timed out.
    #[error("query {query} failed: {msg}")]
    DataAccess {
        /// Logical query label (e.g. "offer-coverage").
        query: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A returned row did not match the expected shape.
    #[error("query {query}, row {row}, column {column}: {msg}")]
    Mapping {
        /// Logical query label the row came from.
        query: String,
        /// Zero-based row index within the result.
        row: usize,
        /// Column that failed to decode.
        column: String,
        /// Description of the mismatch.
        msg: String,
    },

    /// A cell could not be rendered; degrades to a placeholder.
    #[error("render failed: {0}")]
    Render(String),

    /// The report could not be delivered to a recipient.
    #[error("send to {recipient} failed: {msg}")]
    Send {
        /// Recipient address.
        recipient: String,
        /// Transport error message.
        msg: String,
    },

    /// The delivery-failed notice could not be delivered either.
    #[error("fallback notice to {recipient} failed: {msg}")]
    FallbackSend {
        /// Recipient address.
        recipient: String,
        /// Transport error message.
        msg: String,
    },

    /// A recipient row held something that is not a usable address.
    #[error("invalid recipient address: {address:?}")]
    InvalidRecipient {
        /// Raw value as read from the recipients table.
        address: String,
    },

    /// Invalid or missing configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl CovmonError {
    /// Helper: build a `DataAccess` error for a logical query.
    pub fn data_access(query: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::DataAccess {
            query: query.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `Mapping` error.
    pub fn mapping(
        query: impl Into<String>,
        row: usize,
        column: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        Self::Mapping {
            query: query.into(),
            row,
            column: column.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `Send` error for a recipient.
    pub fn send(recipient: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Send {
            recipient: recipient.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `FallbackSend` error for a recipient.
    pub fn fallback_send(recipient: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::FallbackSend {
            recipient: recipient.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `Config` error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Re-tag a delivery error as a fallback failure.
    ///
    /// Transports only know how to report `Send`; the dispatcher uses this when
    /// the failing call was the delivery-failed notice.
    #[must_use]
    pub fn into_fallback(self) -> Self {
        match self {
            Self::Send { recipient, msg } => Self::FallbackSend { recipient, msg },
            other @ Self::FallbackSend { .. } => other,
            other => Self::FallbackSend {
                recipient: String::new(),
                msg: other.to_string(),
            },
        }
    }

    /// Returns true for errors raised by the warehouse side of the pipeline.
    #[must_use]
    pub const fn is_data_error(&self) -> bool {
        matches!(self, Self::DataAccess { .. } | Self::Mapping { .. })
    }
}
