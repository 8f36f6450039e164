use std::time::Duration;

use covmon_core::{CovmonError, DatasourceConfig, FieldValue, Query, QueryGateway, QueryKey, QueryParams};
use covmon_postgres::bind::rewrite;
use covmon_postgres::{PgGateway, map_sqlx_err};
use proptest::prelude::*;

fn datasource(url: &str) -> DatasourceConfig {
    DatasourceConfig {
        url: url.into(),
        username: Some("monitoring".into()),
        password: Some("secret".into()),
        max_connections: 1,
    }
}

#[test]
fn bad_url_is_a_config_error() {
    let err = PgGateway::connect_lazy(&datasource("not a url"), Duration::from_secs(1))
        .err()
        .unwrap();
    assert!(matches!(err, CovmonError::Config(ref m) if m.starts_with("datasource.url")));
}

#[tokio::test]
async fn unreachable_server_is_data_access_for_the_query() {
    // port 1 on loopback refuses connections
    let gw = PgGateway::connect_lazy(
        &datasource("postgres://127.0.0.1:1/monitoring"),
        Duration::from_millis(500),
    )
    .unwrap();
    let q = Query {
        key: QueryKey::Recipients,
        sql: "select EMAIL from dm.monitoring_recipients".into(),
    };
    let err = gw.select(&q, &QueryParams::new()).await.unwrap_err();
    assert!(matches!(err, CovmonError::DataAccess { ref query, .. } if query == "recipients"));
    gw.close().await;
}

#[tokio::test]
async fn missing_parameter_fails_before_connecting() {
    let gw = PgGateway::connect_lazy(
        &datasource("postgres://127.0.0.1:1/monitoring"),
        Duration::from_millis(500),
    )
    .unwrap();
    let q = Query {
        key: QueryKey::OfferInfo,
        sql: "select * from dm.offer_info where month = :month".into(),
    };
    let err = gw.select(&q, &QueryParams::new()).await.unwrap_err();
    assert_eq!(
        err,
        CovmonError::data_access("offer-info", "no value for parameter :month")
    );
}

#[test]
fn pool_timeout_maps_to_data_access() {
    let err = map_sqlx_err(&sqlx_pool_timed_out(), QueryKey::CascadeCount);
    assert_eq!(
        err,
        CovmonError::data_access("cascade-count", "timed out waiting for a connection")
    );
}

fn sqlx_pool_timed_out() -> sqlx::Error {
    sqlx::Error::PoolTimedOut
}

proptest! {
    #[test]
    fn every_placeholder_becomes_a_bind(names in proptest::collection::vec("[a-z][a-z0-9_]{0,8}", 1..6)) {
        let params: QueryParams = names
            .iter()
            .map(|n| (n.clone(), FieldValue::Text(n.clone())))
            .collect();
        let sql = names
            .iter()
            .map(|n| format!("c = :{n}"))
            .collect::<Vec<_>>()
            .join(" and ");
        let bound = rewrite(&sql, &params).unwrap();
        prop_assert!(!bound.sql.contains(':'));
        let mut distinct = names.clone();
        distinct.sort();
        distinct.dedup();
        prop_assert_eq!(bound.values.len(), distinct.len());
    }
}
