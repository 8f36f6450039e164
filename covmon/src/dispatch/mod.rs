use std::sync::Arc;
use std::time::Duration;

use covmon_core::{
    CovmonError, DeliveryRecord, DispatchSummary, FallbackOutcome, MailTransport, OutgoingMail,
    RecipientAddress, SendOutcome,
};

use crate::core::call_with_timeout;

/// The delivery state machine.
pub mod state;

pub use state::{DeliveryAction, DeliveryEvent, DeliveryState};

/// Subject and HTML body shared by every recipient of one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailContent {
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
}

impl MailContent {
    /// Bundle a subject and a body.
    pub fn new(subject: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            html: html.into(),
        }
    }

    /// Address a copy of this content to `to`.
    #[must_use]
    pub fn addressed_to(&self, to: &RecipientAddress) -> OutgoingMail {
        OutgoingMail {
            to: to.clone(),
            subject: self.subject.clone(),
            html: self.html.clone(),
        }
    }
}

/// Sends a report to a list of recipients, one at a time.
pub struct Dispatcher {
    transport: Arc<dyn MailTransport>,
    send_timeout: Duration,
}

impl Dispatcher {
    /// Dispatch through `transport`, bounding each send by `send_timeout`.
    #[must_use]
    pub fn new(transport: Arc<dyn MailTransport>, send_timeout: Duration) -> Self {
        Self {
            transport,
            send_timeout,
        }
    }

    /// Deliver `report` to every recipient in order.
    ///
    /// A failed send is followed by one attempt to deliver `notice` to the same
    /// recipient. Never fails; outcomes are returned per recipient and the
    /// totals are logged.
    #[tracing::instrument(
        name = "covmon::dispatch::dispatch",
        skip(self, report, notice, recipients),
        fields(transport = self.transport.name(), recipients = recipients.len()),
    )]
    pub async fn dispatch(
        &self,
        report: &MailContent,
        notice: &MailContent,
        recipients: &[RecipientAddress],
    ) -> Vec<DeliveryRecord> {
        let mut records = Vec::with_capacity(recipients.len());
        for to in recipients {
            let outcome = self.deliver(to, report, notice).await;
            records.push(DeliveryRecord {
                recipient: to.clone(),
                outcome,
            });
        }
        let summary = DispatchSummary::from_records(&records);
        tracing::info!(
            attempted = summary.attempted,
            delivered = summary.delivered,
            failed = summary.failed,
            fallback_delivered = summary.fallback_delivered,
            fallback_failed = summary.fallback_failed,
            "dispatch finished"
        );
        records
    }

    async fn deliver(
        &self,
        to: &RecipientAddress,
        report: &MailContent,
        notice: &MailContent,
    ) -> SendOutcome {
        let (mut state, mut actions) = DeliveryState::Pending.handle(DeliveryEvent::Start);
        while let Some(action) = actions.pop() {
            let event = match action {
                DeliveryAction::SendReport => match self.send(report.addressed_to(to)).await {
                    Ok(()) => {
                        tracing::debug!(recipient = %to, "report delivered");
                        DeliveryEvent::SendSucceeded
                    }
                    Err(e) => {
                        tracing::warn!(recipient = %to, error = %e, "report delivery failed; sending notice");
                        DeliveryEvent::SendFailed(e)
                    }
                },
                DeliveryAction::SendNotice => match self.send(notice.addressed_to(to)).await {
                    Ok(()) => {
                        tracing::debug!(recipient = %to, "failure notice delivered");
                        DeliveryEvent::FallbackSucceeded
                    }
                    Err(e) => {
                        let e = e.into_fallback();
                        tracing::error!(recipient = %to, error = %e, "failure notice could not be delivered");
                        DeliveryEvent::FallbackFailed(e)
                    }
                },
                DeliveryAction::Finish(outcome) => return outcome,
            };
            (state, actions) = state.handle(event);
        }
        state.outcome().unwrap_or_else(|| SendOutcome::Failed {
            error: CovmonError::send(to.as_str(), "delivery stopped before completion"),
            fallback: FallbackOutcome::Failed(CovmonError::fallback_send(
                to.as_str(),
                "not attempted",
            )),
        })
    }

    async fn send(&self, mail: OutgoingMail) -> Result<(), CovmonError> {
        let to = mail.to.as_str();
        call_with_timeout(
            self.send_timeout,
            || CovmonError::send(to, format!("timed out after {}s", self.send_timeout.as_secs())),
            self.transport.send(&mail),
        )
        .await
    }
}
