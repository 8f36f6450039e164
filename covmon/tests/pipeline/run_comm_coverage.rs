use crate::helpers::{A, B, C, config, harness, harness_with, recipient_rows, tables};
use covmon::{QueryKey, ReportVariant, RunOutcome};
use covmon_core::render::comm_coverage::OFFER_INFO_TITLE;
use covmon_core::render::{NO_DATA_PLACEHOLDER, format_amount};
use covmon_mock::MockGateway;

#[tokio::test]
async fn renders_offer_info_and_uses_its_subject() {
    let h = harness(ReportVariant::CommCoverage);
    h.db.set_rows(QueryKey::OfferInfo, MockGateway::fixture(QueryKey::OfferInfo))
        .await;
    h.db.set_rows(QueryKey::Recipients, recipient_rows(&[A, B, C])).await;

    let report = h.covmon.run().await;

    assert_eq!(report.subject, "Отчет по покрытию коммуникациями");
    assert_eq!(report.sections.len(), 1);
    assert_eq!(report.sections[0].query, QueryKey::OfferInfo);
    assert_eq!(report.sections[0].rows, 3);

    let sent = h.mail.sent().await;
    assert_eq!(sent.len(), 3);
    let html = &sent[0].mail.html;
    let t = tables(html);
    assert_eq!(t.len(), 1);
    assert!(t[0].contains(OFFER_INFO_TITLE));
    assert!(t[0].contains(&format_amount(Some(1_120_004))));
    // KF_EMAIL is null in the first and last fixture rows
    assert_eq!(t[0].matches(">N/A<").count(), 2);

    // only the variant's own query and the recipients query run
    let keys: Vec<QueryKey> = h.db.executed().await.iter().map(|q| q.key).collect();
    assert_eq!(keys, [QueryKey::OfferInfo, QueryKey::Recipients]);
}

#[tokio::test]
async fn empty_required_section_is_still_sent() {
    let h = harness(ReportVariant::CommCoverage);
    h.db.set_rows(QueryKey::Recipients, recipient_rows(&[A])).await;

    let report = h.covmon.run().await;

    assert!(matches!(report.outcome, RunOutcome::Completed(s) if s.delivered == 1));
    assert_eq!(report.sections[0].rows, 0);
    let html = &h.mail.sent().await[0].mail.html;
    assert!(html.contains(&format!("<td colspan='7'>{NO_DATA_PLACEHOLDER}</td>")));
}

#[tokio::test]
async fn subject_overrides_get_the_month() {
    let mut cfg = config(ReportVariant::Coverage);
    cfg.mail.subject = Some("Покрытие: {month}".into());
    cfg.mail.fallback_subject = Some("Не доставлено: {month}".into());
    let h = harness_with(cfg);

    let at = crate::helpers::report_date();
    assert_eq!(h.covmon.subject_at(at), "Покрытие: Март");
    let notice = h.covmon.notice_at(at);
    assert_eq!(notice.subject, "Не доставлено: Март");
    assert_eq!(
        notice.html,
        "При отправке отчета по покрытию произошла ошибка<br><br>"
    );
}
