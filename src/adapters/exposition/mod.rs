//! Exposition Adapter - Prometheus scrape endpoint
//!
//! Serves the collected samples in Prometheus text format via axum 0.7.
//!
//! Sub-modules:
//! - `encode`: samples to `proto::MetricFamily` conversion
//! - `server`: HTTP routes (`/metrics` + index page)

pub mod encode;
pub mod server;

pub use server::{build_registry, router, serve, AppState};
