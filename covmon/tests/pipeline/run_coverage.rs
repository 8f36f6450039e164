use crate::helpers::{A, B, C, RECIPIENTS_TABLE, harness, recipient_rows, tables};
use covmon::{CovmonError, QueryKey, ReportVariant, RunOutcome};
use covmon_core::render::NO_DATA_PLACEHOLDER;
use covmon_core::{FieldMap, FieldValue};
use covmon_mock::{MockBehavior, MockGateway};

#[tokio::test]
async fn three_recipients_with_one_filled_and_one_empty_section() {
    let h = harness(ReportVariant::Coverage);
    let mut base = MockGateway::fixture(QueryKey::AvailableClientBase);
    base.truncate(2);
    h.db.set_rows(QueryKey::AvailableClientBase, base).await;
    h.db.set_rows(QueryKey::CommunicationCoverage, Vec::new()).await;
    h.db.set_rows(QueryKey::Recipients, recipient_rows(&[A, B, C])).await;

    let report = h.covmon.run().await;

    let RunOutcome::Completed(summary) = report.outcome else {
        panic!("unexpected outcome: {:?}", report.outcome);
    };
    assert_eq!(summary.attempted, 3);
    assert_eq!(summary.delivered, 3);
    assert_eq!(summary.failed, 0);

    let sent = h.mail.sent().await;
    let order: Vec<&str> = sent.iter().map(|s| s.mail.to.as_str()).collect();
    assert_eq!(order, [A, B, C]);
    assert!(sent.iter().all(|s| s.mail.subject == "Отчет по покрытию за Март"));

    // one document shared by every recipient
    let html = &sent[0].mail.html;
    assert!(sent.iter().all(|s| &s.mail.html == html));
    let t = tables(html);
    assert_eq!(t.len(), 4);
    // title, header and two data rows
    assert_eq!(t[0].matches("<tr>").count(), 4);
    assert!(!t[0].contains(NO_DATA_PLACEHOLDER));
    assert!(t[1].contains(&format!("<td colspan='7'>{NO_DATA_PLACEHOLDER}</td>")));
    assert!(!t[1].contains("<th>"));

    let rows: Vec<usize> = report.sections.iter().map(|s| s.rows).collect();
    assert_eq!(rows, [2, 0, 0, 0]);
    assert!(report.sections.iter().all(|s| s.warnings.is_empty()));
    assert_eq!(report.subject, "Отчет по покрытию за Март");
}

#[tokio::test]
async fn queries_run_in_order_with_substituted_table() {
    let h = harness(ReportVariant::Coverage);
    h.db.set_rows(QueryKey::Recipients, recipient_rows(&[A])).await;

    let _ = h.covmon.run().await;

    let executed = h.db.executed().await;
    let keys: Vec<QueryKey> = executed.iter().map(|q| q.key).collect();
    assert_eq!(
        keys,
        [
            QueryKey::AvailableClientBase,
            QueryKey::CommunicationCoverage,
            QueryKey::OfferCoverage,
            QueryKey::CascadeCount,
            QueryKey::Recipients,
        ]
    );
    let recipients_sql = &executed[4].sql;
    assert!(recipients_sql.contains(RECIPIENTS_TABLE));
    assert!(!recipients_sql.contains("&monitoring_recipients"));
    assert!(executed.iter().all(|q| q.params.is_empty()));
}

#[tokio::test]
async fn failing_and_mistyped_sections_render_empty() {
    let h = harness(ReportVariant::Coverage);
    h.db.set_rows(
        QueryKey::AvailableClientBase,
        MockGateway::fixture(QueryKey::AvailableClientBase),
    )
    .await;
    h.db.set_rows(
        QueryKey::CommunicationCoverage,
        MockGateway::fixture(QueryKey::CommunicationCoverage),
    )
    .await;
    h.db.set_behavior(
        QueryKey::OfferCoverage,
        MockBehavior::Fail(CovmonError::data_access("offer-coverage", "relation does not exist")),
    )
    .await;
    h.db.set_rows(
        QueryKey::CascadeCount,
        vec![
            FieldMap::new().with("MESSAGE_DESC", "СМС").with("GZ", 1),
            FieldMap::new()
                .with("MESSAGE_DESC", "ПУШ")
                .with("GZ", FieldValue::Text("много".into())),
        ],
    )
    .await;
    h.db.set_rows(QueryKey::Recipients, recipient_rows(&[A, B])).await;

    let report = h.covmon.run().await;

    assert!(matches!(report.outcome, RunOutcome::Completed(s) if s.delivered == 2));
    let s = &report.sections;
    assert_eq!(s[0].rows, 3);
    assert_eq!(s[1].rows, 3);
    assert_eq!(s[2].rows, 0);
    assert_eq!(
        s[2].warnings,
        vec![CovmonError::data_access("offer-coverage", "relation does not exist")]
    );
    assert_eq!(s[3].rows, 0);
    match &s[3].warnings[..] {
        [CovmonError::Mapping { query, row, column, .. }] => {
            assert_eq!(query, "cascade-count");
            assert_eq!(*row, 1);
            assert_eq!(column, "GZ");
        }
        other => panic!("unexpected warnings: {other:?}"),
    }

    let html = &h.mail.sent().await[0].mail.html;
    let t = tables(html);
    assert_eq!(t.len(), 4);
    assert!(t[2].contains(NO_DATA_PLACEHOLDER));
    assert!(t[3].contains(NO_DATA_PLACEHOLDER));
    // the row that did decode is not rendered on its own
    assert!(!t[3].contains("<td>СМС</td>"));
}

#[tokio::test]
async fn closes_backends_once() {
    let h = harness(ReportVariant::Coverage);
    h.db.set_rows(QueryKey::Recipients, recipient_rows(&[A])).await;

    let _ = h.covmon.run().await;

    assert_eq!(h.db.close_calls().await, 1);
    assert_eq!(h.mail.close_calls().await, 1);
}
