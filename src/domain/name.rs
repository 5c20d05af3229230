//! Metric name normalization.
//!
//! PowerAdmin monitor titles are free-form human text ("Free Disk Space on
//! C:", "Pages/sec"). Prometheus metric names must match
//! `[a-zA-Z_:][a-zA-Z0-9_:]*`, so every title is funneled through
//! [`normalize`] before exposition. The metric NAME carries the title; the
//! labels only carry group path and server name, so cardinality here is
//! name-based by design.

/// Turn an arbitrary title into a valid Prometheus metric name.
///
/// Rules, applied in order:
/// 1. spaces become `_`
/// 2. lowercase everything
/// 3. `/` becomes `_per_` (so "Pages/sec" reads as "pages_per_sec")
/// 4. any remaining character outside `[a-zA-Z0-9_:]` becomes `_`
/// 5. a leading digit gets a `_` prepended
/// 6. a trailing run of `_` is stripped
///
/// Idempotent on its own output. Callers must not pass titles that
/// normalize to the empty string.
pub fn normalize(raw: &str) -> String {
    let mut name: String = raw
        .to_lowercase()
        .chars()
        .map(|c| match c {
            ' ' => "_".to_string(),
            '/' => "_per_".to_string(),
            c if c.is_ascii_alphanumeric() || c == '_' || c == ':' => c.to_string(),
            _ => "_".to_string(),
        })
        .collect();

    while name.ends_with('_') {
        name.pop();
    }
    // metric name cannot start with a digit
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}
