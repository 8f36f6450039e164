//! covmon-postgres
//!
//! Production [`QueryGateway`] on a `sqlx` Postgres pool. Templates may use
//! `:name` placeholders, rewritten to positional binds before execution; rows
//! come back as [`FieldMap`]s with integer widths and character types
//! normalized.
#![warn(missing_docs)]

/// Named placeholder rewriting.
pub mod bind;
/// Row and parameter conversion.
pub mod row;

use std::time::Duration;

use async_trait::async_trait;
use covmon_core::{CovmonError, DatasourceConfig, FieldMap, Query, QueryGateway, QueryKey, QueryParams};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};

/// Warehouse gateway backed by a connection pool.
pub struct PgGateway {
    pool: PgPool,
}

impl PgGateway {
    /// Build a pool that connects on first use.
    ///
    /// `username`/`password` from the configuration override whatever the URL
    /// carries. Connection problems surface as `DataAccess` on the first query.
    ///
    /// # Errors
    /// Returns `Config` when the URL cannot be parsed.
    pub fn connect_lazy(
        cfg: &DatasourceConfig,
        acquire_timeout: Duration,
    ) -> Result<Self, CovmonError> {
        let mut options: PgConnectOptions = cfg
            .url
            .parse()
            .map_err(|e| CovmonError::config(format!("datasource.url: {e}")))?;
        if let Some(user) = cfg.username.as_deref() {
            options = options.username(user);
        }
        if let Some(password) = cfg.password.as_deref() {
            options = options.password(password);
        }
        let pool = PgPoolOptions::new()
            .max_connections(cfg.max_connections)
            .acquire_timeout(acquire_timeout)
            .connect_lazy_with(options);
        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Normalize a driver error into the `DataAccess` taxonomy.
#[must_use]
pub fn map_sqlx_err(e: &sqlx::Error, key: QueryKey) -> CovmonError {
    match e {
        sqlx::Error::Database(db) => {
            let code = db.code().map(|c| c.into_owned()).unwrap_or_default();
            CovmonError::data_access(key.as_str(), format!("database error {code}: {}", db.message()))
        }
        sqlx::Error::PoolTimedOut => {
            CovmonError::data_access(key.as_str(), "timed out waiting for a connection")
        }
        sqlx::Error::PoolClosed => CovmonError::data_access(key.as_str(), "connection pool closed"),
        sqlx::Error::Io(io) => CovmonError::data_access(key.as_str(), format!("io error: {io}")),
        other => CovmonError::data_access(key.as_str(), other.to_string()),
    }
}

#[async_trait]
impl QueryGateway for PgGateway {
    fn name(&self) -> &'static str {
        "covmon-postgres"
    }

    #[tracing::instrument(
        name = "covmon::postgres::select",
        skip(self, query, params),
        fields(query = %query.key),
    )]
    async fn select(
        &self,
        query: &Query,
        params: &QueryParams,
    ) -> Result<Vec<FieldMap>, CovmonError> {
        let bound = bind::rewrite(&query.sql, params).map_err(|bind::MissingParam(name)| {
            CovmonError::data_access(query.key.as_str(), format!("no value for parameter :{name}"))
        })?;
        let mut q = sqlx::query(&bound.sql);
        for value in bound.values {
            q = row::bind_value(q, value);
        }
        let rows = q
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_err(&e, query.key))?;
        tracing::debug!(rows = rows.len(), "query returned");
        rows.iter()
            .enumerate()
            .map(|(i, r)| {
                row::to_field_map(r).map_err(|e| {
                    CovmonError::mapping(query.key.as_str(), i, e.column, e.msg)
                })
            })
            .collect()
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
