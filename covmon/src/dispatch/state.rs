//! Per-recipient delivery state machine.
//!
//! The machine is pure: the dispatcher performs the I/O an action asks for and
//! feeds the result back as an event.

use covmon_core::{CovmonError, FallbackOutcome, SendOutcome};

/// Where one recipient's delivery stands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeliveryState {
    /// Nothing attempted yet.
    Pending,
    /// The report send is in flight.
    Sending,
    /// The report reached the relay.
    Delivered,
    /// The report send failed; the notice is in flight.
    SendingFallback {
        /// Why the report failed.
        error: CovmonError,
    },
    /// The report failed, the notice went out.
    FallbackDelivered {
        /// Why the report failed.
        error: CovmonError,
    },
    /// Both the report and the notice failed.
    FallbackFailed {
        /// Why the report failed.
        error: CovmonError,
        /// Why the notice failed.
        fallback_error: CovmonError,
    },
}

/// Input to the machine: a start signal or the result of the last action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeliveryEvent {
    /// Begin delivery.
    Start,
    /// The relay accepted the report.
    SendSucceeded,
    /// The report send failed.
    SendFailed(CovmonError),
    /// The relay accepted the notice.
    FallbackSucceeded,
    /// The notice send failed.
    FallbackFailed(CovmonError),
}

/// Work the dispatcher must perform next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeliveryAction {
    /// Send the report.
    SendReport,
    /// Send the delivery-failed notice.
    SendNotice,
    /// Record the final outcome.
    Finish(SendOutcome),
}

impl DeliveryState {
    /// Apply an event. Events that make no sense in the current state leave it
    /// unchanged and produce no action.
    #[must_use]
    pub fn handle(self, event: DeliveryEvent) -> (Self, Vec<DeliveryAction>) {
        match (self, event) {
            (Self::Pending, DeliveryEvent::Start) => (Self::Sending, vec![DeliveryAction::SendReport]),
            (Self::Sending, DeliveryEvent::SendSucceeded) => (
                Self::Delivered,
                vec![DeliveryAction::Finish(SendOutcome::Delivered)],
            ),
            (Self::Sending, DeliveryEvent::SendFailed(error)) => (
                Self::SendingFallback { error },
                vec![DeliveryAction::SendNotice],
            ),
            (Self::SendingFallback { error }, DeliveryEvent::FallbackSucceeded) => {
                let outcome = SendOutcome::Failed {
                    error: error.clone(),
                    fallback: FallbackOutcome::Delivered,
                };
                (
                    Self::FallbackDelivered { error },
                    vec![DeliveryAction::Finish(outcome)],
                )
            }
            (Self::SendingFallback { error }, DeliveryEvent::FallbackFailed(fallback_error)) => {
                let outcome = SendOutcome::Failed {
                    error: error.clone(),
                    fallback: FallbackOutcome::Failed(fallback_error.clone()),
                };
                (
                    Self::FallbackFailed {
                        error,
                        fallback_error,
                    },
                    vec![DeliveryAction::Finish(outcome)],
                )
            }
            (state, _) => (state, Vec::new()),
        }
    }

    /// True once no further action will be requested.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Delivered | Self::FallbackDelivered { .. } | Self::FallbackFailed { .. }
        )
    }

    /// Final outcome, for terminal states.
    #[must_use]
    pub fn outcome(&self) -> Option<SendOutcome> {
        match self {
            Self::Delivered => Some(SendOutcome::Delivered),
            Self::FallbackDelivered { error } => Some(SendOutcome::Failed {
                error: error.clone(),
                fallback: FallbackOutcome::Delivered,
            }),
            Self::FallbackFailed {
                error,
                fallback_error,
            } => Some(SendOutcome::Failed {
                error: error.clone(),
                fallback: FallbackOutcome::Failed(fallback_error.clone()),
            }),
            Self::Pending | Self::Sending | Self::SendingFallback { .. } => None,
        }
    }
}
