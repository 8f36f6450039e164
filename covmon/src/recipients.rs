use covmon_core::rows::text;
use covmon_core::{CovmonError, FieldMap, QueryKey, QueryParams, RecipientAddress};

use crate::core::{Covmon, call_with_timeout};

/// Column holding the address in the recipients table.
pub const EMAIL_COLUMN: &str = "EMAIL";

/// Turn recipient rows into addresses, preserving order and duplicates.
///
/// Rows with a null, missing or implausible `EMAIL` are skipped with a
/// warning.
///
/// # Errors
/// Returns `Mapping` when `EMAIL` holds something other than text.
pub fn parse_recipients(rows: &[FieldMap]) -> Result<Vec<RecipientAddress>, CovmonError> {
    let mut out = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let raw = text(row, EMAIL_COLUMN).map_err(|e| {
            CovmonError::mapping(
                QueryKey::Recipients.as_str(),
                i,
                e.column,
                format!("expected {}, found {}", e.expected, e.found),
            )
        })?;
        let Some(raw) = raw else {
            tracing::warn!(row = i, "recipient row without an address; skipped");
            continue;
        };
        match RecipientAddress::parse(&raw) {
            Ok(addr) => out.push(addr),
            Err(e) => tracing::warn!(row = i, error = %e, "skipping recipient"),
        }
    }
    Ok(out)
}

impl Covmon {
    /// Fetch the distribution list.
    #[tracing::instrument(name = "covmon::recipients::resolve_recipients", skip(self))]
    pub(crate) async fn resolve_recipients(&self) -> Result<Vec<RecipientAddress>, CovmonError> {
        let query = self.templates.prepare(QueryKey::Recipients)?;
        let rows = call_with_timeout(
            self.query_timeout,
            || {
                CovmonError::data_access(
                    QueryKey::Recipients.as_str(),
                    format!("timed out after {}s", self.query_timeout.as_secs()),
                )
            },
            self.gateway.select(&query, &QueryParams::new()),
        )
        .await?;
        let recipients = parse_recipients(&rows)?;
        tracing::info!(
            rows = rows.len(),
            recipients = recipients.len(),
            "distribution list loaded"
        );
        for r in &recipients {
            tracing::debug!(recipient = %r, "recipient");
        }
        Ok(recipients)
    }
}
