use crate::helpers::{A, B, harness, recipient_rows};
use covmon::{CovmonError, QueryKey, ReportVariant, RunOutcome};
use covmon_core::FieldMap;
use covmon_mock::MockBehavior;

#[tokio::test]
async fn empty_distribution_list_sends_nothing() {
    let h = harness(ReportVariant::Coverage);
    h.db.set_rows(QueryKey::Recipients, Vec::new()).await;

    let report = h.covmon.run().await;

    assert_eq!(report.outcome, RunOutcome::NoRecipients);
    assert!(report.deliveries.is_empty());
    assert!(h.mail.sent().await.is_empty());
    assert_eq!(report.sections.len(), 4);
    assert_eq!(h.db.close_calls().await, 1);
    assert_eq!(h.mail.close_calls().await, 1);
}

#[tokio::test]
async fn recipient_fetch_failure_aborts_and_still_closes() {
    let h = harness(ReportVariant::Coverage);
    let err = CovmonError::data_access("recipients", "connection refused");
    h.db.set_behavior(QueryKey::Recipients, MockBehavior::Fail(err.clone()))
        .await;

    let report = h.covmon.run().await;

    assert_eq!(report.outcome, RunOutcome::Aborted(err));
    assert!(h.mail.sent().await.is_empty());
    assert_eq!(h.db.close_calls().await, 1);
    assert_eq!(h.mail.close_calls().await, 1);
}

#[tokio::test]
async fn non_text_address_aborts() {
    let h = harness(ReportVariant::Coverage);
    h.db.set_rows(
        QueryKey::Recipients,
        vec![FieldMap::new().with("EMAIL", A), FieldMap::new().with("EMAIL", 7)],
    )
    .await;

    let report = h.covmon.run().await;

    assert!(matches!(
        report.outcome,
        RunOutcome::Aborted(CovmonError::Mapping { row: 1, .. })
    ));
    assert!(h.mail.sent().await.is_empty());
}

#[tokio::test]
async fn duplicates_are_mailed_twice_and_bad_rows_skipped() {
    let h = harness(ReportVariant::Coverage);
    let mut rows = recipient_rows(&[A, "broken address", B, A]);
    rows.push(FieldMap::new());
    h.db.set_rows(QueryKey::Recipients, rows).await;

    let report = h.covmon.run().await;

    let to: Vec<String> = h
        .mail
        .sent()
        .await
        .iter()
        .map(|s| s.mail.to.to_string())
        .collect();
    assert_eq!(to, [A, B, A]);
    assert!(matches!(report.outcome, RunOutcome::Completed(s) if s.attempted == 3));
}
