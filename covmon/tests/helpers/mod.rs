#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use covmon::Covmon;
use covmon_core::{
    CovmonConfig, DatasourceConfig, DbConfig, DbTables, FieldMap, MailConfig, QueryKey,
    RecipientAddress, ReportConfig, ReportVariant, SmtpConfig, SqlConfig,
};
use covmon_mock::{DynamicMockController, DynamicMockGateway, MockTransport, TransportController};

pub const RECIPIENTS_TABLE: &str = "dm.monitoring_recipients";
pub const A: &str = "a@gorzdrav.example";
pub const B: &str = "b@apteka366.example";
pub const C: &str = "c@kalinafarm.example";

/// 2026-03-15 09:00 UTC, mid-March in Moscow.
pub fn report_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 15, 9, 0, 0).unwrap()
}

pub fn sql_config() -> SqlConfig {
    let mut sql = SqlConfig::default();
    for key in QueryKey::ALL {
        sql.set_template(
            key,
            format!("select * from dm.{} /* {} */", key.as_str().replace('-', "_"), key),
        );
    }
    sql.set_template(
        QueryKey::Recipients,
        "select EMAIL from &monitoring_recipients where active order by id",
    );
    sql
}

pub fn config(variant: ReportVariant) -> CovmonConfig {
    CovmonConfig {
        smtp: SmtpConfig {
            host: "smtp.example".into(),
            port: 587,
            username: "reports@example".into(),
            password: "secret".into(),
        },
        datasource: DatasourceConfig {
            url: "postgres://dwh.example/monitoring".into(),
            username: None,
            password: None,
            max_connections: 2,
        },
        db: DbConfig {
            tables: DbTables {
                monitoring_recipients: RECIPIENTS_TABLE.into(),
            },
            ..DbConfig::default()
        },
        sql: sql_config(),
        report: ReportConfig {
            variant,
            ..ReportConfig::default()
        },
        mail: MailConfig::default(),
    }
}

pub struct Harness {
    pub covmon: Covmon,
    pub db: DynamicMockController,
    pub mail: TransportController,
}

pub fn harness_with(config: CovmonConfig) -> Harness {
    let (gateway, db) = DynamicMockGateway::new_with_controller("dwh");
    let (transport, mail) = MockTransport::new_with_controller();
    let covmon = Covmon::builder()
        .with_gateway(gateway)
        .with_transport(transport)
        .config(config)
        .report_date(report_date())
        .build()
        .unwrap();
    Harness { covmon, db, mail }
}

pub fn harness(variant: ReportVariant) -> Harness {
    harness_with(config(variant))
}

pub fn addr(s: &str) -> RecipientAddress {
    RecipientAddress::parse(s).unwrap()
}

pub fn recipient_rows(addresses: &[&str]) -> Vec<FieldMap> {
    addresses
        .iter()
        .map(|a| FieldMap::new().with("EMAIL", *a))
        .collect()
}

/// Table bodies of a rendered document, in order.
pub fn tables(html: &str) -> Vec<&str> {
    html.split("<table").skip(1).collect()
}

pub fn arc_transport() -> (Arc<dyn covmon_core::MailTransport>, TransportController) {
    MockTransport::new_with_controller()
}
