//! Collector Integration Tests
//!
//! Tests the scrape-pass orchestration against mocked ports.
//! Uses mockall for trait mocking and tokio::test for async tests.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use mockall::mock;
use mockall::predicate::*;

use poweradmin_exporter::config::{FilterConfig, GroupFilter, InterfaceConfig};
use poweradmin_exporter::domain::{ComputerInfo, MonitoredValue, ServerMetric, StatusMapping};
use poweradmin_exporter::error::CollectError;
use poweradmin_exporter::usecases::{PowerAdminCollector, ERROR_METRIC_NAME};

// ---- Mock Definitions ----

mock! {
    pub Source {}

    #[async_trait::async_trait]
    impl poweradmin_exporter::ports::ExternalMetricsSource for Source {
        async fn resources(
            &self,
            filters: &[GroupFilter],
        ) -> Result<Vec<MonitoredValue>, CollectError>;
    }
}

mock! {
    pub Database {}

    #[async_trait::async_trait]
    impl poweradmin_exporter::ports::MetricsDatabase for Database {
        async fn connect(&self) -> Result<(), CollectError>;
        async fn computer_info(&self, alias: &str) -> Result<ComputerInfo, CollectError>;
        async fn servers_in_group(
            &self,
            group_path: &str,
        ) -> Result<Vec<String>, CollectError>;
        async fn latest_metrics(
            &self,
            comp_id: i64,
        ) -> Result<Vec<ServerMetric>, CollectError>;
    }
}

// ---- Fixtures ----

const GROUP_PATH: &str = "Servers/Devices^Live";

fn interface() -> InterfaceConfig {
    serde_yml::from_str("server: https://pa.example.com\napi_key: '1234'\n").unwrap()
}

fn filter(servers: &[&str]) -> FilterConfig {
    FilterConfig {
        groups: vec![GroupFilter {
            group_path: GROUP_PATH.to_string(),
            servers: servers.iter().map(ToString::to_string).collect(),
        }],
    }
}

fn status_mapping() -> StatusMapping {
    StatusMapping {
        values: HashMap::from([("ok".to_string(), 1.0)]),
        default: 0.0,
    }
}

fn monitored_value(title: &str, status: &str, server: &str) -> MonitoredValue {
    MonitoredValue {
        monitor_id: "42".to_string(),
        monitor_title: title.to_string(),
        monitor_value: status.to_string(),
        monitor_status: status.to_string(),
        last_run: NaiveDate::from_ymd_opt(2019, 4, 24)
            .unwrap()
            .and_hms_opt(20, 41, 35)
            .unwrap(),
        server_id: "158".to_string(),
        server_name: server.to_string(),
        group_id: "154".to_string(),
        group_name: "Live".to_string(),
        group_path: GROUP_PATH.to_string(),
    }
}

fn server_metric(item_alias: &str, unit_str: &str, value: f64) -> ServerMetric {
    ServerMetric {
        comp_id: 2,
        stat_id: 7,
        item_alias: item_alias.to_string(),
        unit_str: unit_str.to_string(),
        value,
        date: NaiveDate::from_ymd_opt(2019, 4, 24)
            .unwrap()
            .and_hms_opt(20, 41, 35)
            .unwrap(),
    }
}

fn computer_info() -> ComputerInfo {
    ComputerInfo {
        comp_id: 2,
        name: "FXSERVER".to_string(),
        alias: "FXSERVER".to_string(),
        group_id: 1,
    }
}

fn collector(
    source: MockSource,
    database: MockDatabase,
    filter_config: FilterConfig,
) -> PowerAdminCollector {
    PowerAdminCollector::new(
        Arc::new(source),
        Arc::new(database),
        &interface(),
        filter_config,
        status_mapping(),
    )
}

// ---- Tests ----

#[tokio::test]
async fn failing_api_fetch_yields_only_the_error_sample() {
    let mut source = MockSource::new();
    source
        .expect_resources()
        .returning(|_| Err(CollectError::Network("connection refused".to_string())));
    let mut database = MockDatabase::new();
    database.expect_connect().never();

    let samples = collector(source, database, filter(&["FXSERVER"]))
        .collect()
        .await;

    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].name, ERROR_METRIC_NAME);
    assert_eq!(samples[0].value, 1.0);
    assert!(samples[0].labels.is_empty());
}

#[tokio::test]
async fn db_connect_failure_keeps_api_samples_plus_one_error() {
    let mut source = MockSource::new();
    source.expect_resources().returning(|_| {
        Ok(vec![
            monitored_value("Toto", "OK", "FXSERVER"),
            monitored_value("Albert", "Not OK", "FXSERVER"),
        ])
    });
    let mut database = MockDatabase::new();
    database
        .expect_connect()
        .returning(|| Err(CollectError::Connection("unreachable".to_string())));
    database.expect_computer_info().never();

    let samples = collector(source, database, filter(&["FXSERVER"]))
        .collect()
        .await;

    assert_eq!(samples.len(), 3);
    assert_eq!(samples[0].name, "toto_status");
    assert_eq!(samples[0].value, 1.0);
    assert_eq!(samples[1].name, "albert_status");
    // "Not OK" is unmapped, falls back to the default
    assert_eq!(samples[1].value, 0.0);
    assert_eq!(samples[2].name, ERROR_METRIC_NAME);
}

#[tokio::test]
async fn successful_pass_merges_both_sources() {
    let mut source = MockSource::new();
    source
        .expect_resources()
        .returning(|_| Ok(vec![monitored_value("Ping", "OK", "FXSERVER")]));

    let mut database = MockDatabase::new();
    database.expect_connect().returning(|| Ok(()));
    database
        .expect_computer_info()
        .with(eq("FXSERVER"))
        .returning(|_| Ok(computer_info()));
    database.expect_latest_metrics().with(eq(2i64)).returning(|_| {
        Ok(vec![
            server_metric("Free Bytes", "C:", 118_180.0),
            server_metric("CPU Usage", "", 12.5),
        ])
    });

    let samples = collector(source, database, filter(&["FXSERVER"]))
        .collect()
        .await;

    assert_eq!(samples.len(), 3);
    assert_eq!(samples[0].name, "ping_status");
    assert_eq!(
        samples[0].labels,
        vec![
            ("group_path".to_string(), GROUP_PATH.to_string()),
            ("server_name".to_string(), "FXSERVER".to_string()),
        ]
    );
    assert_eq!(samples[1].name, "free_bytes__c:");
    assert_eq!(samples[1].value, 118_180.0);
    // no unit recorded, no suffix
    assert_eq!(samples[2].name, "cpu_usage");
}

#[tokio::test]
async fn empty_server_filter_expands_via_database_hierarchy() {
    let mut source = MockSource::new();
    source.expect_resources().returning(|_| Ok(Vec::new()));

    let mut database = MockDatabase::new();
    database.expect_connect().returning(|| Ok(()));
    database
        .expect_servers_in_group()
        .with(eq(GROUP_PATH))
        .times(1)
        .returning(|_| Ok(vec!["FXSERVER".to_string()]));
    database
        .expect_computer_info()
        .with(eq("FXSERVER"))
        .returning(|_| Ok(computer_info()));
    database
        .expect_latest_metrics()
        .returning(|_| Ok(vec![server_metric("Free Bytes", "C:", 1.0)]));

    let samples = collector(source, database, filter(&[])).collect().await;

    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].name, "free_bytes__c:");
    assert_eq!(samples[0].labels[1].1, "FXSERVER");
}

#[tokio::test]
async fn failing_server_resolve_aborts_the_db_phase() {
    let mut source = MockSource::new();
    source.expect_resources().returning(|_| Ok(Vec::new()));

    let mut database = MockDatabase::new();
    database.expect_connect().returning(|| Ok(()));
    database
        .expect_computer_info()
        .returning(|_| Err(CollectError::Query("no server with alias A".to_string())));
    database.expect_latest_metrics().never();

    let samples = collector(source, database, filter(&["A", "B"])).collect().await;

    // one error for the pass, nothing per-server
    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].name, ERROR_METRIC_NAME);
}

#[tokio::test]
async fn status_suffix_can_be_disabled() {
    let mut source = MockSource::new();
    source
        .expect_resources()
        .returning(|_| Ok(vec![monitored_value("Ping", "OK", "FXSERVER")]));
    let mut database = MockDatabase::new();
    database.expect_connect().returning(|| Ok(()));
    database
        .expect_computer_info()
        .returning(|_| Ok(computer_info()));
    database.expect_latest_metrics().returning(|_| Ok(Vec::new()));

    let mut iface = interface();
    iface.append_status_suffix = false;
    let collector = PowerAdminCollector::new(
        Arc::new(source),
        Arc::new(database),
        &iface,
        filter(&["FXSERVER"]),
        status_mapping(),
    );

    let samples = collector.collect().await;
    assert_eq!(samples[0].name, "ping");
}

#[test]
fn describe_advertises_a_placeholder() {
    let source = MockSource::new();
    let database = MockDatabase::new();
    let collector = collector(source, database, filter(&[]));
    let descs = collector.describe();
    assert_eq!(descs.len(), 1);
    assert_eq!(descs[0].name, "dummy");
}
