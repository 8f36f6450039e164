//! Mock gateway and transport for covmon tests.
//!
//! - [`MockGateway`] answers every query from static fixtures.
//! - [`DynamicMockGateway`] defers to a [`DynamicMockController`] so tests can
//!   script failures, hangs and arbitrary result sets per query.
//! - [`MockTransport`] records every message and can be scripted per address
//!   through a [`TransportController`].
use async_trait::async_trait;
use covmon_core::{CovmonError, FieldMap, Query, QueryGateway, QueryKey, QueryParams};

mod dynamic;
mod fixtures;
mod transport;

pub use dynamic::{DynamicMockController, DynamicMockGateway, ExecutedQuery, MockBehavior};
/// Addresses returned by [`MockGateway`] for the recipients query, in order.
pub use fixtures::recipients::ADDRESSES as FIXTURE_RECIPIENTS;
pub use transport::{MockTransport, SentMail, TransportController};

/// Gateway returning deterministic fixture rows for every query.
///
/// SQL text is ignored except for the `FAIL` marker, which makes the call fail
/// with `DataAccess`.
pub struct MockGateway;

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGateway {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Fixture rows for a query, without going through the trait.
    #[must_use]
    pub fn fixture(key: QueryKey) -> Vec<FieldMap> {
        fixtures::by_query(key)
    }
}

#[async_trait]
impl QueryGateway for MockGateway {
    fn name(&self) -> &'static str {
        "covmon-mock"
    }

    async fn select(
        &self,
        query: &Query,
        _params: &QueryParams,
    ) -> Result<Vec<FieldMap>, CovmonError> {
        if query.sql.contains("FAIL") {
            return Err(CovmonError::data_access(
                query.key.as_str(),
                "forced failure",
            ));
        }
        Ok(fixtures::by_query(query.key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use covmon_core::rows::comm_coverage::OfferInfoRow;
    use covmon_core::rows::coverage::{
        AvailableClientBaseRow, CascadeCountRow, CommunicationCoverageRow, OfferCoverageRow,
    };
    use covmon_core::FieldValue;
    use covmon_core::rows::decode_rows;

    #[test]
    fn fixtures_decode_cleanly() {
        decode_rows::<AvailableClientBaseRow>(
            QueryKey::AvailableClientBase,
            &MockGateway::fixture(QueryKey::AvailableClientBase),
        )
        .unwrap();
        decode_rows::<CommunicationCoverageRow>(
            QueryKey::CommunicationCoverage,
            &MockGateway::fixture(QueryKey::CommunicationCoverage),
        )
        .unwrap();
        decode_rows::<OfferCoverageRow>(
            QueryKey::OfferCoverage,
            &MockGateway::fixture(QueryKey::OfferCoverage),
        )
        .unwrap();
        decode_rows::<CascadeCountRow>(
            QueryKey::CascadeCount,
            &MockGateway::fixture(QueryKey::CascadeCount),
        )
        .unwrap();
        decode_rows::<OfferInfoRow>(QueryKey::OfferInfo, &MockGateway::fixture(QueryKey::OfferInfo))
            .unwrap();
    }

    #[tokio::test]
    async fn fail_marker_fails() {
        let q = Query {
            key: QueryKey::OfferInfo,
            sql: "select FAIL".into(),
        };
        let err = MockGateway::new()
            .select(&q, &QueryParams::new())
            .await
            .unwrap_err();
        assert_eq!(err, CovmonError::data_access("offer-info", "forced failure"));
    }

    #[tokio::test]
    async fn recipients_fixture_lists_every_address() {
        let q = Query {
            key: QueryKey::Recipients,
            sql: "select EMAIL from dm.monitoring_recipients".into(),
        };
        let rows = MockGateway::new()
            .select(&q, &QueryParams::new())
            .await
            .unwrap();
        let emails: Vec<&str> = rows
            .iter()
            .filter_map(|r| match r.get("email") {
                Some(FieldValue::Text(s)) => Some(s.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(emails, FIXTURE_RECIPIENTS);
    }
}
