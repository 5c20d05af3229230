//! Configuration Module - YAML-based Exporter Configuration
//!
//! Loads and validates the three configuration files PowerAdmin
//! deployments ship: `config.yml` (interface), `filter.yml` (group
//! selection), `status_mapping.yml` (status values). Everything is
//! externalized here - nothing is hardcoded in the domain layer.

pub mod loader;

use serde::Deserialize;

use crate::domain::StatusMapping;

/// Assembled exporter configuration.
#[derive(Debug, Clone)]
pub struct ExporterConfig {
    /// External API endpoint and database connection.
    pub interface: InterfaceConfig,
    /// Group/server selection filters.
    pub filter: FilterConfig,
    /// Status-string-to-value mapping.
    pub status_mapping: StatusMapping,
}

/// Interface configuration (`config.yml`).
#[derive(Debug, Clone, Deserialize)]
pub struct InterfaceConfig {
    /// PowerAdmin External API base URL.
    #[serde(rename = "server")]
    pub server_url: String,
    /// External API key; must be non-empty.
    pub api_key: String,
    /// Accept invalid TLS certificates (expired internal certs).
    #[serde(default)]
    pub skip_tls_verify: bool,
    /// PowerAdmin database connection string.
    #[serde(default)]
    pub database: String,
    /// Append `_status` to API-sourced metric names. Historical
    /// deployments disagree on this, so it is a switch; defaults to on.
    #[serde(default = "default_true")]
    pub append_status_suffix: bool,
}

/// Filter configuration (`filter.yml`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterConfig {
    /// Groups to report on.
    #[serde(rename = "group", default)]
    pub groups: Vec<GroupFilter>,
}

/// Selection of one group and optionally specific servers within it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GroupFilter {
    /// `^`-delimited group path, e.g. `Servers/Devices^Live`.
    #[serde(rename = "path")]
    pub group_path: String,
    /// Server names to keep; empty means every server in the group.
    #[serde(default)]
    pub servers: Vec<String>,
}

fn default_true() -> bool {
    true
}
