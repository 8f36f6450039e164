use crate::helpers::{A, B, C, addr, harness, recipient_rows};
use covmon::{CovmonError, FallbackOutcome, QueryKey, ReportVariant, RunOutcome, SendOutcome};
use covmon_mock::MockBehavior;

const REPORT_SUBJECT: &str = "Отчет по покрытию за Март";
const NOTICE_SUBJECT: &str = "ОШИБКА Отчет по покрытию за Март";

#[tokio::test]
async fn failed_recipient_gets_one_notice_and_batch_continues() {
    let h = harness(ReportVariant::Coverage);
    h.db.set_rows(QueryKey::Recipients, recipient_rows(&[A, B, C])).await;
    h.mail.fail_next(&addr(B), "550 mailbox unavailable").await;

    let report = h.covmon.run().await;

    let sent = h.mail.sent().await;
    let log: Vec<(&str, &str, bool)> = sent
        .iter()
        .map(|s| (s.mail.to.as_str(), s.mail.subject.as_str(), s.accepted))
        .collect();
    assert_eq!(
        log,
        [
            (A, REPORT_SUBJECT, true),
            (B, REPORT_SUBJECT, false),
            (B, NOTICE_SUBJECT, true),
            (C, REPORT_SUBJECT, true),
        ]
    );
    assert_eq!(
        sent[2].mail.html,
        "При отправке отчета по покрытию произошла ошибка<br><br>"
    );

    assert_eq!(report.deliveries.len(), 3);
    assert_eq!(report.deliveries[0].outcome, SendOutcome::Delivered);
    assert_eq!(
        report.deliveries[1].outcome,
        SendOutcome::Failed {
            error: CovmonError::send(B, "550 mailbox unavailable"),
            fallback: FallbackOutcome::Delivered,
        }
    );
    assert_eq!(report.deliveries[2].outcome, SendOutcome::Delivered);

    let RunOutcome::Completed(summary) = report.outcome else {
        panic!("unexpected outcome: {:?}", report.outcome);
    };
    assert_eq!(summary.attempted, 3);
    assert_eq!(summary.delivered, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.fallback_delivered, 1);
    assert_eq!(summary.fallback_failed, 0);
}

#[tokio::test]
async fn failed_notice_is_terminal_for_that_recipient_only() {
    let h = harness(ReportVariant::Coverage);
    h.db.set_rows(QueryKey::Recipients, recipient_rows(&[A, B])).await;
    h.mail
        .script(
            &addr(A),
            vec![
                MockBehavior::Fail(CovmonError::send(A, "connection reset")),
                MockBehavior::Fail(CovmonError::send(A, "connection reset")),
            ],
        )
        .await;

    let report = h.covmon.run().await;

    assert_eq!(h.mail.sent().await.len(), 3);
    assert_eq!(
        report.deliveries[0].outcome,
        SendOutcome::Failed {
            error: CovmonError::send(A, "connection reset"),
            fallback: FallbackOutcome::Failed(CovmonError::fallback_send(A, "connection reset")),
        }
    );
    assert_eq!(report.deliveries[1].outcome, SendOutcome::Delivered);
    let RunOutcome::Completed(summary) = report.outcome else {
        panic!("unexpected outcome: {:?}", report.outcome);
    };
    assert_eq!(summary.fallback_failed, 1);
    assert_eq!(summary.delivered, 1);
}

#[tokio::test]
async fn every_recipient_failing_still_attempts_each() {
    let h = harness(ReportVariant::Coverage);
    h.db.set_rows(QueryKey::Recipients, recipient_rows(&[A, B, C])).await;
    for a in [A, B, C] {
        h.mail.fail_next(&addr(a), "relay down").await;
    }

    let report = h.covmon.run().await;

    // report + notice per recipient
    assert_eq!(h.mail.sent().await.len(), 6);
    let RunOutcome::Completed(summary) = report.outcome else {
        panic!("unexpected outcome: {:?}", report.outcome);
    };
    assert_eq!(summary.failed, 3);
    assert_eq!(summary.fallback_delivered, 3);
}
