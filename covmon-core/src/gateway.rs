use std::collections::BTreeMap;

use async_trait::async_trait;
use covmon_types::{CovmonError, QueryKey, SqlConfig};

use crate::field::{FieldMap, FieldValue};

/// Token replaced with the configured recipients table in every template.
pub const RECIPIENTS_TABLE_MACRO: &str = "&monitoring_recipients";

/// Named bind parameters for a query.
pub type QueryParams = BTreeMap<String, FieldValue>;

/// A template after macro substitution, ready to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Logical query this SQL belongs to.
    pub key: QueryKey,
    /// SQL text, possibly containing `:name` placeholders.
    pub sql: String,
}

/// Replace every occurrence of [`RECIPIENTS_TABLE_MACRO`] with `table`.
///
/// Purely textual; templates rely on the token appearing inside identifiers
/// and string literals alike.
#[must_use]
pub fn substitute_macros(template: &str, table: &str) -> String {
    template.replace(RECIPIENTS_TABLE_MACRO, table)
}

/// Configured SQL templates keyed by logical query.
#[derive(Debug, Clone)]
pub struct QueryTemplates {
    sql: SqlConfig,
    recipients_table: String,
}

impl QueryTemplates {
    /// Wrap the `sql` configuration section.
    pub fn new(sql: SqlConfig, recipients_table: impl Into<String>) -> Self {
        Self {
            sql,
            recipients_table: recipients_table.into(),
        }
    }

    /// Substituted SQL for a logical query.
    ///
    /// # Errors
    /// Returns `Config` when no template is configured for `key`.
    pub fn prepare(&self, key: QueryKey) -> Result<Query, CovmonError> {
        let template = self
            .sql
            .template(key)
            .ok_or_else(|| CovmonError::config(format!("{} is not set", key.config_key())))?;
        Ok(Query {
            key,
            sql: substitute_macros(template, &self.recipients_table),
        })
    }
}

/// Executes queries against the warehouse.
///
/// Implementations must report failures as `DataAccess` tagged with
/// `query.key` and return an empty vector for empty results.
#[async_trait]
pub trait QueryGateway: Send + Sync {
    /// Human-readable backend name used in logs.
    fn name(&self) -> &'static str;

    /// Run a select and return every row.
    async fn select(
        &self,
        query: &Query,
        params: &QueryParams,
    ) -> Result<Vec<FieldMap>, CovmonError>;

    /// Release pooled connections. Called once at the end of every run.
    async fn close(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_every_occurrence() {
        let sql = "select email from &monitoring_recipients r \
                   where not exists (select 1 from &monitoring_recipients_bl b) \
                   and r.src = '&monitoring_recipients'";
        let out = substitute_macros(sql, "mon.rcpt");
        assert_eq!(
            out,
            "select email from mon.rcpt r \
             where not exists (select 1 from mon.rcpt_bl b) \
             and r.src = 'mon.rcpt'"
        );
    }

    #[test]
    fn templates_without_macro_pass_through() {
        assert_eq!(substitute_macros("select 1", "t"), "select 1");
    }

    #[test]
    fn prepare_reports_missing_key() {
        let templates = QueryTemplates::new(SqlConfig::default(), "t");
        let err = templates.prepare(QueryKey::CascadeCount).unwrap_err();
        assert_eq!(
            err,
            CovmonError::config("sql.select-cascade-count-query is not set")
        );
    }

    #[test]
    fn prepare_substitutes() {
        let mut sql = SqlConfig::default();
        sql.set_template(QueryKey::Recipients, "select EMAIL from &monitoring_recipients");
        let q = QueryTemplates::new(sql, "dm.monitoring_recipients")
            .prepare(QueryKey::Recipients)
            .unwrap();
        assert_eq!(q.key, QueryKey::Recipients);
        assert_eq!(q.sql, "select EMAIL from dm.monitoring_recipients");
    }
}
