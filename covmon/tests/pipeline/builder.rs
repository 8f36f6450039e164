use std::sync::Arc;

use crate::helpers::{arc_transport, config};
use covmon::{Covmon, CovmonError, QueryKey, ReportVariant};
use covmon_mock::MockGateway;

#[test]
fn requires_gateway_and_transport() {
    let (transport, _) = arc_transport();
    let err = Covmon::builder()
        .with_transport(transport)
        .config(config(ReportVariant::Coverage))
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, CovmonError::Config(ref m) if m.contains("with_gateway")));

    let err = Covmon::builder()
        .with_gateway(Arc::new(MockGateway::new()))
        .config(config(ReportVariant::Coverage))
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, CovmonError::Config(ref m) if m.contains("with_transport")));
}

#[test]
fn validates_templates_for_the_variant() {
    let (transport, _) = arc_transport();
    let mut cfg = config(ReportVariant::Coverage);
    cfg.sql.select_cascade_count_query = None;
    let err = Covmon::builder()
        .with_gateway(Arc::new(MockGateway::new()))
        .with_transport(transport)
        .config(cfg)
        .build()
        .err()
        .unwrap();
    assert_eq!(
        err,
        CovmonError::config(format!("{} is not set", QueryKey::CascadeCount.config_key()))
    );
}

#[test]
fn comm_coverage_does_not_need_coverage_templates() {
    let (transport, _) = arc_transport();
    let mut cfg = config(ReportVariant::CommCoverage);
    cfg.sql.select_cascade_count_query = None;
    cfg.sql.select_offer_coverage_query = None;
    assert!(
        Covmon::builder()
            .with_gateway(Arc::new(MockGateway::new()))
            .with_transport(transport)
            .config(cfg)
            .build()
            .is_ok()
    );
}

#[test]
fn rejects_unknown_time_zone() {
    let (transport, _) = arc_transport();
    let mut cfg = config(ReportVariant::Coverage);
    cfg.report.timezone = "Mars/Olympus".into();
    let err = Covmon::builder()
        .with_gateway(Arc::new(MockGateway::new()))
        .with_transport(transport)
        .config(cfg)
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, CovmonError::Config(ref m) if m.contains("Mars/Olympus")));
}
