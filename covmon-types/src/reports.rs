//! Report envelopes produced by a run.

use serde::{Deserialize, Serialize};

use crate::error::CovmonError;
use crate::query::QueryKey;
use crate::recipient::RecipientAddress;

/// Result of the delivery-failed notice sent after a failed report send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallbackOutcome {
    /// The notice reached the relay.
    Delivered,
    /// The notice failed as well; terminal for this recipient.
    Failed(CovmonError),
}

/// Per-recipient delivery result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SendOutcome {
    /// The report reached the relay.
    Delivered,
    /// The report send failed and a notice was attempted.
    Failed {
        /// Why the report send failed.
        error: CovmonError,
        /// What happened to the notice.
        fallback: FallbackOutcome,
    },
}

impl SendOutcome {
    /// True when the report itself was delivered.
    #[must_use]
    pub const fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

/// Outcome for one entry of the distribution list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    /// Address the report was sent to.
    pub recipient: RecipientAddress,
    /// What happened.
    pub outcome: SendOutcome,
}

/// Aggregate counts over a dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchSummary {
    /// Report send attempts.
    pub attempted: usize,
    /// Reports delivered.
    pub delivered: usize,
    /// Reports that failed.
    pub failed: usize,
    /// Notices delivered after a failure.
    pub fallback_delivered: usize,
    /// Notices that failed after a failure.
    pub fallback_failed: usize,
}

impl DispatchSummary {
    /// Tally a list of delivery records.
    #[must_use]
    pub fn from_records(records: &[DeliveryRecord]) -> Self {
        records.iter().fold(Self::default(), |mut acc, r| {
            acc.attempted += 1;
            match &r.outcome {
                SendOutcome::Delivered => acc.delivered += 1,
                SendOutcome::Failed { fallback, .. } => {
                    acc.failed += 1;
                    match fallback {
                        FallbackOutcome::Delivered => acc.fallback_delivered += 1,
                        FallbackOutcome::Failed(_) => acc.fallback_failed += 1,
                    }
                }
            }
            acc
        })
    }
}

/// Summary of one report section.
///
/// A section with warnings was rendered with the "no data" placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionReport {
    /// Query the section was built from.
    pub query: QueryKey,
    /// Table title.
    pub title: String,
    /// Rows rendered.
    pub rows: usize,
    /// Non-fatal issues encountered while collecting the section.
    pub warnings: Vec<CovmonError>,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// The report was dispatched to every recipient.
    Completed(DispatchSummary),
    /// The distribution list was empty; nothing was sent.
    NoRecipients,
    /// The run stopped before dispatch.
    Aborted(CovmonError),
}

/// Everything a run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Subject the report was (or would have been) sent with.
    pub subject: String,
    /// Per-section summaries, in rendering order.
    pub sections: Vec<SectionReport>,
    /// Per-recipient outcomes, in dispatch order.
    pub deliveries: Vec<DeliveryRecord>,
    /// Final state.
    pub outcome: RunOutcome,
}
