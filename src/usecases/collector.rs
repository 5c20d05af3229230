//! Collection Orchestrator - the two-source scrape pass.
//!
//! Each scrape: walk the External API per configured filter, emit one
//! normalized observation per monitor, then resolve each configured
//! server against the PowerAdmin database and emit its latest recorded
//! statistics. Stateless across scrapes; all dependencies are injected
//! at construction.
//!
//! One pass is strictly sequential. Prometheus serializes scrapes per
//! target, so passes never overlap in practice; the collector itself is
//! `Send + Sync` but does not re-derive that guarantee.

use std::sync::Arc;

use tracing::{error, info};

use crate::config::{FilterConfig, GroupFilter, InterfaceConfig};
use crate::domain::{map_status, normalize, Sample, StatusMapping};
use crate::error::CollectError;
use crate::ports::{ExternalMetricsSource, MetricsDatabase};

pub use crate::domain::ERROR_METRIC_NAME;

/// A static metric descriptor advertised by `describe`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricDesc {
    pub name: String,
    pub help: String,
}

/// The collection orchestrator.
pub struct PowerAdminCollector {
    source: Arc<dyn ExternalMetricsSource>,
    database: Arc<dyn MetricsDatabase>,
    filters: Vec<GroupFilter>,
    status_mapping: StatusMapping,
    /// Append `_status` to API-sourced metric names.
    append_status_suffix: bool,
}

impl PowerAdminCollector {
    pub fn new(
        source: Arc<dyn ExternalMetricsSource>,
        database: Arc<dyn MetricsDatabase>,
        interface: &InterfaceConfig,
        filter: FilterConfig,
        status_mapping: StatusMapping,
    ) -> Self {
        Self {
            source,
            database,
            filters: filter.groups,
            status_mapping,
            append_status_suffix: interface.append_status_suffix,
        }
    }

    /// Advertised descriptors. Real names only exist per scrape, so
    /// this is a single placeholder.
    pub fn describe(&self) -> Vec<MetricDesc> {
        vec![MetricDesc {
            name: "dummy".to_string(),
            help: "dummy".to_string(),
        }]
    }

    /// Run one scrape pass. Never fails: a pass-fatal error is reported
    /// as a single `poweradmin_error` observation appended to whatever
    /// was already collected (API-phase samples survive a database-phase
    /// failure; nothing of a failed phase itself is kept).
    pub async fn collect(&self) -> Vec<Sample> {
        let mut samples = Vec::new();
        if let Err(e) = self.collect_pass(&mut samples).await {
            error!(error = %e, "Scrape pass failed");
            samples.push(Sample::error());
        }
        samples
    }

    async fn collect_pass(&self, out: &mut Vec<Sample>) -> Result<(), CollectError> {
        // phase 1: External API
        let values = self.source.resources(&self.filters).await?;
        info!(count = values.len(), "Received monitored values");
        for value in &values {
            out.push(Sample::observation(
                self.api_metric_name(&value.monitor_title),
                map_status(&value.monitor_value, &self.status_mapping),
                &value.group_path,
                &value.server_name,
            ));
        }

        // phase 2: PowerAdmin database, CompID lookup then latest stats
        self.database.connect().await?;
        for filter in &self.filters {
            let servers = if filter.servers.is_empty() {
                self.database.servers_in_group(&filter.group_path).await?
            } else {
                filter.servers.clone()
            };
            for server in &servers {
                let info = self.database.computer_info(server).await?;
                for metric in self.database.latest_metrics(info.comp_id).await? {
                    out.push(Sample::observation(
                        db_metric_name(&metric.item_alias, &metric.unit_str),
                        metric.value,
                        &filter.group_path,
                        server,
                    ));
                }
            }
        }
        Ok(())
    }

    fn api_metric_name(&self, title: &str) -> String {
        if self.append_status_suffix {
            normalize(&format!("{title}_status"))
        } else {
            normalize(title)
        }
    }
}

/// DB-sourced names: alias, plus `__{unit}` when a unit is recorded.
fn db_metric_name(item_alias: &str, unit_str: &str) -> String {
    if unit_str.is_empty() {
        normalize(item_alias)
    } else {
        normalize(&format!("{item_alias}__{unit_str}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_metric_name_with_unit() {
        assert_eq!(db_metric_name("Free Bytes", "C:"), "free_bytes__c:");
    }

    #[test]
    fn test_db_metric_name_without_unit() {
        assert_eq!(db_metric_name("CPU Usage", ""), "cpu_usage");
    }
}
