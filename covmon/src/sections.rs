use covmon_core::layout::SectionSpec;
use covmon_core::{CovmonError, FieldMap, QueryParams, Section, SectionReport};

use crate::core::{Covmon, call_with_timeout};

impl Covmon {
    /// Build every table of the layout, in order.
    ///
    /// Each query is isolated: execution failures, timeouts and decoding
    /// errors are logged and the table is rendered empty.
    #[tracing::instrument(
        name = "covmon::sections::collect_sections",
        skip(self),
        fields(sections = self.layout.sections.len()),
    )]
    pub(crate) async fn collect_sections(&self) -> (Vec<Section>, Vec<SectionReport>) {
        let mut sections = Vec::with_capacity(self.layout.sections.len());
        let mut reports = Vec::with_capacity(self.layout.sections.len());
        for spec in self.layout.sections {
            let (section, warnings) = match self.fetch(spec).await {
                Ok(rows) => Self::lay_out(spec, &rows),
                Err(e) => {
                    tracing::error!(query = %spec.query, error = %e, "section query failed");
                    (spec.empty(), vec![e])
                }
            };
            reports.push(SectionReport {
                query: spec.query,
                title: section.title.clone(),
                rows: section.rows.len(),
                warnings,
            });
            sections.push(section);
        }
        (sections, reports)
    }

    async fn fetch(&self, spec: &SectionSpec) -> Result<Vec<FieldMap>, CovmonError> {
        let query = self.templates.prepare(spec.query)?;
        tracing::debug!(query = %spec.query, sql = %query.sql, "executing section query");
        let rows = call_with_timeout(
            self.query_timeout,
            || {
                CovmonError::data_access(
                    spec.query.as_str(),
                    format!("timed out after {}s", self.query_timeout.as_secs()),
                )
            },
            self.gateway.select(&query, &QueryParams::new()),
        )
        .await?;
        for row in &rows {
            tracing::trace!(query = %spec.query, row = %row.to_json(&self.dates), "retrieved row");
        }
        Ok(rows)
    }

    fn lay_out(spec: &SectionSpec, rows: &[FieldMap]) -> (Section, Vec<CovmonError>) {
        if rows.is_empty() {
            if spec.required {
                tracing::error!(query = %spec.query, "no data returned for required section");
            } else {
                tracing::warn!(query = %spec.query, "no data returned for section");
            }
            return (spec.empty(), Vec::new());
        }
        match spec.build(rows) {
            Ok(section) => {
                tracing::info!(query = %spec.query, rows = section.rows.len(), "section ready");
                (section, Vec::new())
            }
            Err(e) => {
                tracing::error!(query = %spec.query, error = %e, "section rows did not decode");
                (spec.empty(), vec![e])
            }
        }
    }
}
