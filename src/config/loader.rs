//! Configuration Loader - File Loading and Validation
//!
//! Reads the three YAML files from the configuration directory,
//! validates them, and assembles an [`ExporterConfig`] with clear
//! error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::info;

use super::{ExporterConfig, FilterConfig, InterfaceConfig};
use crate::domain::StatusMapping;

const INTERFACE_FILE: &str = "config.yml";
const FILTER_FILE: &str = "filter.yml";
const STATUS_MAPPING_FILE: &str = "status_mapping.yml";

/// Load and validate the exporter configuration from a directory.
///
/// # Errors
/// Returns a detailed error if any file is missing or unreadable, YAML
/// parsing fails, or validation rules are violated.
pub fn load_config(config_dir: &str) -> Result<ExporterConfig> {
    let dir = Path::new(config_dir);

    let interface: InterfaceConfig = load_yaml(dir, INTERFACE_FILE)?;
    let filter: FilterConfig = load_yaml(dir, FILTER_FILE)?;
    let status_mapping: StatusMapping = load_yaml(dir, STATUS_MAPPING_FILE)?;

    let config = ExporterConfig {
        interface,
        filter,
        status_mapping,
    };
    validate_config(&config)?;

    info!(
        server = %config.interface.server_url,
        groups = config.filter.groups.len(),
        statuses = config.status_mapping.values.len(),
        "Configuration loaded successfully"
    );

    Ok(config)
}

fn load_yaml<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<T> {
    let path = dir.join(name);
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    serde_yml::from_str(&content).with_context(|| format!("Failed to parse {name}"))
}

/// Validate all configuration parameters.
fn validate_config(config: &ExporterConfig) -> Result<()> {
    anyhow::ensure!(
        !config.interface.server_url.is_empty(),
        "server URL must not be empty"
    );
    anyhow::ensure!(
        !config.interface.api_key.is_empty(),
        "api_key must not be empty"
    );
    anyhow::ensure!(
        !config.filter.groups.is_empty(),
        "At least one group filter must be configured"
    );
    for (i, group) in config.filter.groups.iter().enumerate() {
        anyhow::ensure!(
            !group.group_path.is_empty(),
            "Group filter {i} has an empty path"
        );
    }
    Ok(())
}
