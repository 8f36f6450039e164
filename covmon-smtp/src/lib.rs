//! covmon-smtp
//!
//! Production [`MailTransport`] on an async `lettre` SMTP transport:
//! STARTTLS with AUTH, `From` set to the login, HTML bodies in UTF-8.
#![warn(missing_docs)]

use std::time::Duration;

use async_trait::async_trait;
use covmon_core::{CovmonError, MailTransport, OutgoingMail, SmtpConfig};
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// Mail relay connection.
pub struct SmtpTransport {
    inner: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpTransport {
    /// Configure a STARTTLS relay. No connection is made until the first send.
    ///
    /// `timeout` bounds each SMTP command; `None` keeps lettre's default.
    ///
    /// # Errors
    /// Returns `Config` when the username is not a valid sender address or the
    /// relay host cannot be used for TLS.
    pub fn new(cfg: &SmtpConfig, timeout: Option<Duration>) -> Result<Self, CovmonError> {
        let from: Mailbox = cfg.username.parse().map_err(|e| {
            CovmonError::config(format!("smtp.username is not an address: {e}"))
        })?;
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&cfg.host)
            .map_err(|e| CovmonError::config(format!("smtp.host: {e}")))?
            .port(cfg.port)
            .credentials(Credentials::new(cfg.username.clone(), cfg.password.clone()));
        if timeout.is_some() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            inner: builder.build(),
            from,
        })
    }

    /// Sender address used for every message.
    #[must_use]
    pub const fn sender(&self) -> &Mailbox {
        &self.from
    }
}

/// Build the wire message for one outgoing mail.
///
/// # Errors
/// Returns `Send` for the recipient when the address or headers are rejected
/// by the message builder.
pub fn build_message(from: &Mailbox, mail: &OutgoingMail) -> Result<Message, CovmonError> {
    let to: Mailbox = mail
        .to
        .as_str()
        .parse()
        .map_err(|e| CovmonError::send(mail.to.as_str(), format!("invalid address: {e}")))?;
    Message::builder()
        .from(from.clone())
        .to(to)
        .subject(mail.subject.as_str())
        .header(ContentType::TEXT_HTML)
        .body(mail.html.clone())
        .map_err(|e| CovmonError::send(mail.to.as_str(), format!("invalid message: {e}")))
}

fn map_smtp_err(e: &lettre::transport::smtp::Error, to: &str) -> CovmonError {
    let kind = if e.is_permanent() {
        "rejected"
    } else if e.is_transient() {
        "temporarily rejected"
    } else if e.is_timeout() {
        "timed out"
    } else if e.is_tls() {
        "tls failure"
    } else {
        "transport failure"
    };
    CovmonError::send(to, format!("{kind}: {e}"))
}

#[async_trait]
impl MailTransport for SmtpTransport {
    fn name(&self) -> &'static str {
        "covmon-smtp"
    }

    #[tracing::instrument(
        name = "covmon::smtp::send",
        skip(self, mail),
        fields(to = %mail.to),
    )]
    async fn send(&self, mail: &OutgoingMail) -> Result<(), CovmonError> {
        let message = build_message(&self.from, mail)?;
        let response = self
            .inner
            .send(message)
            .await
            .map_err(|e| map_smtp_err(&e, mail.to.as_str()))?;
        tracing::debug!(code = %response.code(), "relay accepted message");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use covmon_core::RecipientAddress;

    fn mail(subject: &str) -> OutgoingMail {
        OutgoingMail {
            to: RecipientAddress::parse("ops@apteka366.example").unwrap(),
            subject: subject.into(),
            html: "<html><body><h4>Добрый день!</h4></body></html>".into(),
        }
    }

    #[test]
    fn message_is_html_from_the_login() {
        let from: Mailbox = "reports@rubbles.example".parse().unwrap();
        let msg = build_message(&from, &mail("Coverage")).unwrap();
        let raw = String::from_utf8(msg.formatted()).unwrap();
        assert!(raw.contains("From: reports@rubbles.example"));
        assert!(raw.contains("To: ops@apteka366.example"));
        assert!(raw.contains("Subject: Coverage"));
        assert!(raw.contains("Content-Type: text/html; charset=utf-8"));
    }

    #[test]
    fn login_must_be_an_address() {
        let cfg = SmtpConfig {
            host: "smtp.rubbles.example".into(),
            port: 587,
            username: "reports".into(),
            password: "secret".into(),
        };
        let err = SmtpTransport::new(&cfg, None).err().unwrap();
        assert!(matches!(err, CovmonError::Config(ref m) if m.starts_with("smtp.username")));
    }

    #[test]
    fn non_ascii_subject_is_encoded() {
        let from: Mailbox = "reports@rubbles.example".parse().unwrap();
        let msg = build_message(&from, &mail("Отчет по покрытию за Март")).unwrap();
        let raw = String::from_utf8(msg.formatted()).unwrap();
        assert!(raw.contains("Subject: =?"));
        assert!(!raw.contains("Отчет"));
    }

    #[tokio::test]
    async fn sender_is_the_login() {
        let cfg = SmtpConfig {
            host: "smtp.rubbles.example".into(),
            port: 587,
            username: "reports@rubbles.example".into(),
            password: "secret".into(),
        };
        let transport = SmtpTransport::new(&cfg, Some(Duration::from_secs(5))).unwrap();
        assert_eq!(transport.sender().email.to_string(), "reports@rubbles.example");
        assert_eq!(transport.name(), "covmon-smtp");
    }
}
