//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates domain logic with port interfaces. One use case:
//! - `PowerAdminCollector`: the two-source scrape pass (External API
//!   walk merged with database-derived per-server statistics)

pub mod collector;

pub use collector::{MetricDesc, PowerAdminCollector, ERROR_METRIC_NAME};
