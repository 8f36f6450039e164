//! Configuration surface of the reporting job.
//!
//! Field names follow the historical `application.yml` layout (kebab-case
//! keys, `smtp`/`datasource`/`db`/`sql` sections). Everything except the SMTP
//! and datasource connection settings has a default so that partial files
//! deserialize; [`CovmonConfig::validate`] reports what is still missing.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::CovmonError;
use crate::query::QueryKey;

const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_MAX_CONNECTIONS: u32 = 2;
const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";
const DEFAULT_TIMEZONE: &str = "Europe/Moscow";
const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 60;
const DEFAULT_SEND_TIMEOUT_SECS: u64 = 30;

/// Which report the job produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportVariant {
    /// Monthly coverage report: client base, communication coverage, offer
    /// coverage and cascade counts.
    #[default]
    Coverage,
    /// Offer and informational communication counters.
    CommCoverage,
}

impl ReportVariant {
    /// Section queries this variant runs, in rendering order.
    #[must_use]
    pub const fn section_queries(self) -> &'static [QueryKey] {
        match self {
            Self::Coverage => &[
                QueryKey::AvailableClientBase,
                QueryKey::CommunicationCoverage,
                QueryKey::OfferCoverage,
                QueryKey::CascadeCount,
            ],
            Self::CommCoverage => &[QueryKey::OfferInfo],
        }
    }
}

/// SMTP relay settings. The username doubles as the `From` address.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SmtpConfig {
    /// Relay host name.
    pub host: String,
    /// Relay port (STARTTLS submission port by default).
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    /// Login, also used as the sender address.
    pub username: String,
    /// Password.
    pub password: String,
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Warehouse connection settings.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DatasourceConfig {
    /// Connection URL, e.g. `postgres://dwh.local:5432/monitoring`.
    pub url: String,
    /// Login; overrides any user embedded in the URL.
    #[serde(default)]
    pub username: Option<String>,
    /// Password; overrides any password embedded in the URL.
    #[serde(default)]
    pub password: Option<String>,
    /// Upper bound on pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl fmt::Debug for DatasourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatasourceConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

/// Table names substituted into query templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DbTables {
    /// Replaces every `&monitoring_recipients` token.
    #[serde(default)]
    pub monitoring_recipients: String,
}

/// Database-side settings that are not connection parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DbConfig {
    /// Table names used by macro substitution.
    #[serde(default)]
    pub tables: DbTables,
    /// `strftime` pattern for timestamps in row trace output.
    #[serde(default = "default_date_format")]
    pub date_format: String,
    /// IANA zone timestamps are converted to in row trace output.
    #[serde(default = "default_timezone")]
    pub date_timezone: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            tables: DbTables::default(),
            date_format: default_date_format(),
            date_timezone: default_timezone(),
        }
    }
}

/// SQL templates, one per logical query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SqlConfig {
    /// Template for [`QueryKey::AvailableClientBase`].
    #[serde(default)]
    pub select_available_client_base_query: Option<String>,
    /// Template for [`QueryKey::CommunicationCoverage`].
    #[serde(default)]
    pub select_communication_coverage_query: Option<String>,
    /// Template for [`QueryKey::OfferCoverage`].
    #[serde(default)]
    pub select_offer_coverage_query: Option<String>,
    /// Template for [`QueryKey::CascadeCount`].
    #[serde(default)]
    pub select_cascade_count_query: Option<String>,
    /// Template for [`QueryKey::OfferInfo`].
    #[serde(default)]
    pub select_offer_info_query: Option<String>,
    /// Template for [`QueryKey::Recipients`].
    #[serde(default)]
    pub select_recipients_query: Option<String>,
}

impl SqlConfig {
    /// Raw template for a key, if configured and not blank.
    #[must_use]
    pub fn template(&self, key: QueryKey) -> Option<&str> {
        let slot = match key {
            QueryKey::AvailableClientBase => &self.select_available_client_base_query,
            QueryKey::CommunicationCoverage => &self.select_communication_coverage_query,
            QueryKey::OfferCoverage => &self.select_offer_coverage_query,
            QueryKey::CascadeCount => &self.select_cascade_count_query,
            QueryKey::OfferInfo => &self.select_offer_info_query,
            QueryKey::Recipients => &self.select_recipients_query,
        };
        slot.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Store a template for a key.
    pub fn set_template(&mut self, key: QueryKey, sql: impl Into<String>) {
        let slot = match key {
            QueryKey::AvailableClientBase => &mut self.select_available_client_base_query,
            QueryKey::CommunicationCoverage => &mut self.select_communication_coverage_query,
            QueryKey::OfferCoverage => &mut self.select_offer_coverage_query,
            QueryKey::CascadeCount => &mut self.select_cascade_count_query,
            QueryKey::OfferInfo => &mut self.select_offer_info_query,
            QueryKey::Recipients => &mut self.select_recipients_query,
        };
        *slot = Some(sql.into());
    }
}

/// Run-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReportConfig {
    /// Report flavor.
    #[serde(default)]
    pub variant: ReportVariant,
    /// IANA zone used to pick the month named in the subject.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Bound on each warehouse call.
    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: u64,
    /// Bound on each SMTP send.
    #[serde(default = "default_send_timeout_secs")]
    pub send_timeout_secs: u64,
}

impl ReportConfig {
    /// Query timeout as a `Duration`.
    #[must_use]
    pub const fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }

    /// Send timeout as a `Duration`.
    #[must_use]
    pub const fn send_timeout(&self) -> Duration {
        Duration::from_secs(self.send_timeout_secs)
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            variant: ReportVariant::default(),
            timezone: default_timezone(),
            query_timeout_secs: DEFAULT_QUERY_TIMEOUT_SECS,
            send_timeout_secs: DEFAULT_SEND_TIMEOUT_SECS,
        }
    }
}

/// Optional overrides for mail subjects and the failure notice body.
///
/// `{month}` is replaced with the capitalized Russian month name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MailConfig {
    /// Report subject.
    #[serde(default)]
    pub subject: Option<String>,
    /// Subject of the delivery-failed notice.
    #[serde(default)]
    pub fallback_subject: Option<String>,
    /// HTML body of the delivery-failed notice.
    #[serde(default)]
    pub fallback_body: Option<String>,
}

/// Complete configuration of one covmon deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CovmonConfig {
    /// Mail relay.
    pub smtp: SmtpConfig,
    /// Warehouse connection.
    pub datasource: DatasourceConfig,
    /// Table names and trace formatting.
    #[serde(default)]
    pub db: DbConfig,
    /// Query templates.
    #[serde(default)]
    pub sql: SqlConfig,
    /// Run-level settings.
    #[serde(default)]
    pub report: ReportConfig,
    /// Subject and notice overrides.
    #[serde(default)]
    pub mail: MailConfig,
}

impl CovmonConfig {
    /// Check that every setting the selected variant needs is present.
    ///
    /// # Errors
    /// Returns `Config` naming the first missing or empty key.
    pub fn validate(&self) -> Result<(), CovmonError> {
        let required = [
            ("smtp.host", self.smtp.host.as_str()),
            ("smtp.username", self.smtp.username.as_str()),
            ("datasource.url", self.datasource.url.as_str()),
            (
                "db.tables.monitoring-recipients",
                self.db.tables.monitoring_recipients.as_str(),
            ),
        ];
        if let Some((key, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(CovmonError::config(format!("{key} is not set")));
        }
        if self.smtp.port == 0 {
            return Err(CovmonError::config("smtp.port must be non-zero"));
        }
        if self.datasource.max_connections == 0 {
            return Err(CovmonError::config(
                "datasource.max-connections must be at least 1",
            ));
        }
        if self.report.query_timeout_secs == 0 || self.report.send_timeout_secs == 0 {
            return Err(CovmonError::config("report timeouts must be non-zero"));
        }
        let needed = self
            .report
            .variant
            .section_queries()
            .iter()
            .copied()
            .chain(std::iter::once(QueryKey::Recipients));
        for key in needed {
            if self.sql.template(key).is_none() {
                return Err(CovmonError::config(format!(
                    "{} is not set",
                    key.config_key()
                )));
            }
        }
        Ok(())
    }
}

const fn default_smtp_port() -> u16 {
    DEFAULT_SMTP_PORT
}

const fn default_max_connections() -> u32 {
    DEFAULT_MAX_CONNECTIONS
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

const fn default_query_timeout_secs() -> u64 {
    DEFAULT_QUERY_TIMEOUT_SECS
}

const fn default_send_timeout_secs() -> u64 {
    DEFAULT_SEND_TIMEOUT_SECS
}
