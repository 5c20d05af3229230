//! Domain layer - Core data-shaping logic and models.
//!
//! Pure logic only: metric-name normalization, status-to-value mapping,
//! and the request-scoped value types flowing through one scrape pass.
//! No external I/O dependencies here (hexagonal architecture inner ring).

pub mod model;
pub mod name;
pub mod status;

// Re-export core types for convenience
pub use model::{ComputerInfo, MonitoredValue, Sample, ServerMetric, ERROR_METRIC_NAME};
pub use name::normalize;
pub use status::{map_status, StatusMapping};
