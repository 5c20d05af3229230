//! Error taxonomy for one scrape pass.
//!
//! Every variant is pass-fatal: the orchestrator stops the remainder of
//! the pass and surfaces exactly one `poweradmin_error` observation.
//! Non-fatal conditions (unmatched group filter, duplicate monitor title)
//! are warnings, not errors, and never appear here.

use thiserror::Error;

/// Failure modes of a collection pass.
///
/// Variants carry rendered messages rather than source errors so that
/// port implementations (HTTP, SQL, mocks) stay interchangeable.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CollectError {
    /// Bad or missing exporter configuration (e.g. empty API key).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// HTTP transport failure talking to the External API.
    #[error("network error: {0}")]
    Network(String),

    /// Malformed XML or timestamp in an API response.
    #[error("decode error: {0}")]
    Decode(String),

    /// PowerAdmin database unreachable.
    #[error("database connection error: {0}")]
    Connection(String),

    /// A database query failed or returned nothing usable.
    #[error("database query error: {0}")]
    Query(String),
}
