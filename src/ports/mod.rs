//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the collection orchestrator
//! requires from the outside world. Adapters implement these traits;
//! tests substitute mocks.
//!
//! Port categories:
//! - `ExternalMetricsSource`: PowerAdmin External API walk
//! - `MetricsDatabase`: PowerAdmin statistics database reads

pub mod metrics_database;
pub mod metrics_source;

pub use metrics_database::MetricsDatabase;
pub use metrics_source::ExternalMetricsSource;
