use std::time::Duration;

use crate::helpers::{A, B, addr, config, recipient_rows, report_date};
use covmon::{Covmon, CovmonError, FallbackOutcome, QueryKey, ReportVariant, SendOutcome};
use covmon_mock::{DynamicMockGateway, MockBehavior, MockGateway, MockTransport};

#[tokio::test(start_paused = true)]
async fn hanging_section_query_times_out_and_renders_empty() {
    let (gateway, db) = DynamicMockGateway::new_with_controller("dwh");
    let (transport, mail) = MockTransport::new_with_controller();
    let covmon = Covmon::builder()
        .with_gateway(gateway)
        .with_transport(transport)
        .config(config(ReportVariant::CommCoverage))
        .query_timeout(Duration::from_secs(5))
        .report_date(report_date())
        .build()
        .unwrap();
    db.set_behavior(QueryKey::OfferInfo, MockBehavior::Hang).await;
    db.set_rows(QueryKey::Recipients, recipient_rows(&[A])).await;

    let report = covmon.run().await;

    assert_eq!(
        report.sections[0].warnings,
        vec![CovmonError::data_access("offer-info", "timed out after 5s")]
    );
    assert_eq!(mail.sent().await.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn hanging_send_counts_as_failure_and_triggers_notice() {
    let (gateway, db) = DynamicMockGateway::new_with_controller("dwh");
    let (transport, mail) = MockTransport::new_with_controller();
    let covmon = Covmon::builder()
        .with_gateway(gateway)
        .with_transport(transport)
        .config(config(ReportVariant::CommCoverage))
        .send_timeout(Duration::from_secs(2))
        .report_date(report_date())
        .build()
        .unwrap();
    db.set_rows(QueryKey::OfferInfo, MockGateway::fixture(QueryKey::OfferInfo))
        .await;
    db.set_rows(QueryKey::Recipients, recipient_rows(&[A, B])).await;
    mail.script(&addr(A), vec![MockBehavior::Hang]).await;

    let report = covmon.run().await;

    assert_eq!(
        report.deliveries[0].outcome,
        SendOutcome::Failed {
            error: CovmonError::send(A, "timed out after 2s"),
            fallback: FallbackOutcome::Delivered,
        }
    );
    assert_eq!(report.deliveries[1].outcome, SendOutcome::Delivered);
    assert_eq!(mail.sent().await.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn hanging_recipient_query_aborts() {
    let (gateway, db) = DynamicMockGateway::new_with_controller("dwh");
    let (transport, mail) = MockTransport::new_with_controller();
    let covmon = Covmon::builder()
        .with_gateway(gateway)
        .with_transport(transport)
        .config(config(ReportVariant::CommCoverage))
        .query_timeout(Duration::from_secs(1))
        .build()
        .unwrap();
    db.set_behavior(QueryKey::Recipients, MockBehavior::Hang).await;

    let report = covmon.run().await;

    assert_eq!(
        report.outcome,
        covmon::RunOutcome::Aborted(CovmonError::data_access("recipients", "timed out after 1s"))
    );
    assert!(mail.sent().await.is_empty());
    assert_eq!(db.close_calls().await, 1);
}
