use async_trait::async_trait;
use covmon_types::{CovmonError, RecipientAddress};

/// A single HTML message addressed to one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    /// Recipient.
    pub to: RecipientAddress,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
}

/// Delivers mail to the relay.
///
/// `send` resolves once the relay accepted the message. Any transport,
/// protocol or addressing failure is returned as `Send` for the recipient.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Human-readable backend name used in logs.
    fn name(&self) -> &'static str;

    /// Send one message.
    async fn send(&self, mail: &OutgoingMail) -> Result<(), CovmonError>;

    /// Drop relay connections. Called once at the end of every run.
    async fn close(&self) {}
}
