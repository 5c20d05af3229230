//! Status-to-value mapping.
//!
//! PowerAdmin reports monitor state as free text ("OK", "Maintenance",
//! "Alert Suppressed", ...). The exporter maps each status to a numeric
//! value through a user-supplied table, falling back to a default for
//! anything unmapped.

use std::collections::HashMap;

use serde::Deserialize;

/// User-configured status lookup table, loaded from `status_mapping.yml`.
///
/// Keys are matched case-insensitively; they must be stored lowercase.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusMapping {
    /// Lowercase status string to metric value.
    #[serde(default)]
    pub values: HashMap<String, f64>,
    /// Value used for any status not present in `values`.
    #[serde(default)]
    pub default: f64,
}

/// Map a free-text status to its configured numeric value.
///
/// Total function: unmapped statuses resolve to `mapping.default`.
pub fn map_status(value: &str, mapping: &StatusMapping) -> f64 {
    mapping
        .values
        .get(&value.to_lowercase())
        .copied()
        .unwrap_or(mapping.default)
}
