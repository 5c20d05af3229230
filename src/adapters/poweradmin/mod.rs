//! PowerAdmin External API Adapter
//!
//! Implements the `ExternalMetricsSource` port against PowerAdmin's
//! HTTP/XML External API.
//!
//! Sub-modules:
//! - `client`: HTTP client and the filtered group/server/monitor walk
//! - `types`: XML response type definitions

pub mod client;
pub mod types;

pub use client::PowerAdminClient;
