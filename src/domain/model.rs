//! Value types flowing through one scrape pass.
//!
//! Everything here is request-scoped: built fresh per scrape, emitted,
//! then dropped. No identity beyond a single pass.

use chrono::NaiveDateTime;

/// One monitored item flattened from the External API walk, ready for
/// name normalization and emission.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitoredValue {
    /// Monitor identifier from the API.
    pub monitor_id: String,
    /// Human-readable monitor title; becomes the metric name.
    pub monitor_title: String,
    /// Raw status string fed to the status mapping.
    pub monitor_value: String,
    /// Same status string, kept alongside for logging.
    pub monitor_status: String,
    /// Timestamp of the monitor's last run.
    pub last_run: NaiveDateTime,
    /// Server the monitor belongs to.
    pub server_id: String,
    pub server_name: String,
    /// Group the server belongs to.
    pub group_id: String,
    pub group_name: String,
    pub group_path: String,
}

/// A server's identity in the PowerAdmin configuration database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputerInfo {
    /// Internal numeric id (`ConfigComputerInfo.CompID`).
    pub comp_id: i64,
    pub name: String,
    pub alias: String,
    pub group_id: i64,
}

/// Latest recorded value for one statistic of one server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerMetric {
    pub comp_id: i64,
    pub stat_id: i64,
    /// Statistic alias; becomes the metric name stem. Never empty (the
    /// query excludes empty aliases).
    pub item_alias: String,
    /// Unit suffix appended to the name as `__{unit}` when non-empty.
    pub unit_str: String,
    pub value: f64,
    pub date: NaiveDateTime,
}

/// Fixed name of the out-of-band error observation.
pub const ERROR_METRIC_NAME: &str = "poweradmin_error";

/// One exposition-ready observation: a normalized name, an untyped value,
/// and its label set.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub name: String,
    pub value: f64,
    /// Label pairs; `{group_path, server_name}` for regular samples,
    /// empty for the error sample.
    pub labels: Vec<(String, String)>,
}

impl Sample {
    /// Build a regular observation with the standard label pair.
    pub fn observation(name: String, value: f64, group_path: &str, server_name: &str) -> Self {
        Self {
            name,
            value,
            labels: vec![
                ("group_path".to_string(), group_path.to_string()),
                ("server_name".to_string(), server_name.to_string()),
            ],
        }
    }

    /// The single observation emitted when a pass fails: fixed name,
    /// value 1, no labels.
    pub fn error() -> Self {
        Self {
            name: ERROR_METRIC_NAME.to_string(),
            value: 1.0,
            labels: Vec::new(),
        }
    }
}
