use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use covmon_core::calendar::month_name_at;
use covmon_core::{
    CovmonConfig, CovmonError, DateFormat, DeliveryRecord, DispatchSummary, MailConfig,
    MailTransport, QueryGateway, QueryTemplates, ReportLayout, RunOutcome, RunReport,
    fill_month, render_document,
};

use crate::dispatch::{Dispatcher, MailContent};

/// Runs one report: collect, render, resolve, dispatch, close.
pub struct Covmon {
    pub(crate) gateway: Arc<dyn QueryGateway>,
    pub(crate) transport: Arc<dyn MailTransport>,
    pub(crate) templates: QueryTemplates,
    pub(crate) layout: &'static ReportLayout,
    pub(crate) mail: MailConfig,
    pub(crate) timezone: Tz,
    pub(crate) dates: DateFormat,
    pub(crate) query_timeout: Duration,
    pub(crate) send_timeout: Duration,
    pub(crate) report_date: Option<DateTime<Utc>>,
}

/// Builder for [`Covmon`].
pub struct CovmonBuilder {
    gateway: Option<Arc<dyn QueryGateway>>,
    transport: Option<Arc<dyn MailTransport>>,
    config: Option<CovmonConfig>,
    query_timeout: Option<Duration>,
    send_timeout: Option<Duration>,
    report_date: Option<DateTime<Utc>>,
}

impl Default for CovmonBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CovmonBuilder {
    /// Create an empty builder.
    ///
    /// A gateway, a transport and a configuration are required before
    /// [`build`](Self::build) succeeds.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            gateway: None,
            transport: None,
            config: None,
            query_timeout: None,
            send_timeout: None,
            report_date: None,
        }
    }

    /// Register the warehouse gateway. A later call replaces an earlier one.
    #[must_use]
    pub fn with_gateway(mut self, gateway: Arc<dyn QueryGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    /// Register the mail transport. A later call replaces an earlier one.
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn MailTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Use this configuration.
    #[must_use]
    pub fn config(mut self, config: CovmonConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Override `report.query-timeout-secs`.
    #[must_use]
    pub const fn query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = Some(timeout);
        self
    }

    /// Override `report.send-timeout-secs`.
    #[must_use]
    pub const fn send_timeout(mut self, timeout: Duration) -> Self {
        self.send_timeout = Some(timeout);
        self
    }

    /// Pin the instant the subject month is derived from. Defaults to the
    /// wall clock at the start of [`Covmon::run`].
    #[must_use]
    pub const fn report_date(mut self, at: DateTime<Utc>) -> Self {
        self.report_date = Some(at);
        self
    }

    /// Build the orchestrator.
    ///
    /// # Errors
    /// Returns `Config` when the gateway, transport or configuration is
    /// missing, when the configuration fails validation, or when a time zone
    /// or date pattern cannot be parsed.
    pub fn build(self) -> Result<Covmon, CovmonError> {
        let gateway = self.gateway.ok_or_else(|| {
            CovmonError::config("no query gateway registered; add one via with_gateway(...)")
        })?;
        let transport = self.transport.ok_or_else(|| {
            CovmonError::config("no mail transport registered; add one via with_transport(...)")
        })?;
        let config = self
            .config
            .ok_or_else(|| CovmonError::config("no configuration supplied"))?;
        config.validate()?;

        let timezone: Tz = config.report.timezone.parse().map_err(|_| {
            CovmonError::config(format!("unknown time zone: {}", config.report.timezone))
        })?;
        let dates = DateFormat::new(&config.db.date_format, &config.db.date_timezone)?;
        let query_timeout = self
            .query_timeout
            .unwrap_or_else(|| config.report.query_timeout());
        let send_timeout = self
            .send_timeout
            .unwrap_or_else(|| config.report.send_timeout());

        Ok(Covmon {
            gateway,
            transport,
            layout: ReportLayout::for_variant(config.report.variant),
            templates: QueryTemplates::new(config.sql, config.db.tables.monitoring_recipients),
            mail: config.mail,
            timezone,
            dates,
            query_timeout,
            send_timeout,
            report_date: self.report_date,
        })
    }
}

/// Bound `fut` by `timeout`, replacing an elapsed deadline with `on_timeout()`.
pub(crate) async fn call_with_timeout<T, Fut, E>(
    timeout: Duration,
    on_timeout: E,
    fut: Fut,
) -> Result<T, CovmonError>
where
    Fut: core::future::Future<Output = Result<T, CovmonError>>,
    E: FnOnce() -> CovmonError,
{
    (tokio::time::timeout(timeout, fut).await).unwrap_or_else(|_| Err(on_timeout()))
}

impl Covmon {
    /// Start building a new `Covmon` instance.
    #[must_use]
    pub const fn builder() -> CovmonBuilder {
        CovmonBuilder::new()
    }

    /// Subject of the report for the month `at` falls in.
    #[must_use]
    pub fn subject_at(&self, at: DateTime<Utc>) -> String {
        let template = self.mail.subject.as_deref().unwrap_or(self.layout.subject);
        fill_month(template, month_name_at(at, self.timezone))
    }

    /// The delivery-failed notice for the month `at` falls in.
    #[must_use]
    pub fn notice_at(&self, at: DateTime<Utc>) -> MailContent {
        let month = month_name_at(at, self.timezone);
        let subject = self
            .mail
            .fallback_subject
            .as_deref()
            .unwrap_or(self.layout.fallback_subject);
        let body = self
            .mail
            .fallback_body
            .as_deref()
            .unwrap_or(self.layout.fallback_body);
        MailContent::new(fill_month(subject, month), fill_month(body, month))
    }

    /// Produce and deliver one report.
    ///
    /// Never fails: query problems degrade individual sections, delivery
    /// problems are recorded per recipient, and a failed recipient lookup ends
    /// the run as [`RunOutcome::Aborted`]. Gateway and transport are closed
    /// before returning.
    #[tracing::instrument(
        name = "covmon::core::run",
        skip(self),
        fields(
            variant = ?self.layout.variant,
            gateway = self.gateway.name(),
            transport = self.transport.name(),
        ),
    )]
    pub async fn run(&self) -> RunReport {
        let at = self.report_date.unwrap_or_else(Utc::now);
        let subject = self.subject_at(at);
        tracing::info!(%subject, "starting report run");

        let (sections, section_reports) = self.collect_sections().await;
        let html = render_document(self.layout.intro, &sections);
        tracing::debug!(bytes = html.len(), tables = sections.len(), "rendered report");
        tracing::trace!(%html, "report body");

        let mut deliveries: Vec<DeliveryRecord> = Vec::new();
        let outcome = match self.resolve_recipients().await {
            Err(e) => {
                tracing::error!(error = %e, "could not load recipients; no mail sent");
                RunOutcome::Aborted(e)
            }
            Ok(recipients) if recipients.is_empty() => {
                tracing::warn!("recipient list is empty; no mail sent");
                RunOutcome::NoRecipients
            }
            Ok(recipients) => {
                let report = MailContent::new(subject.clone(), html);
                let notice = self.notice_at(at);
                let dispatcher = Dispatcher::new(Arc::clone(&self.transport), self.send_timeout);
                deliveries = dispatcher.dispatch(&report, &notice, &recipients).await;
                RunOutcome::Completed(DispatchSummary::from_records(&deliveries))
            }
        };

        self.gateway.close().await;
        self.transport.close().await;
        tracing::info!(?outcome, "report run finished");

        RunReport {
            subject,
            sections: section_reports,
            deliveries,
            outcome,
        }
    }
}
