//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies (HTTP/XML client, SQL reader) and carries the
//! exposition server.
//!
//! Adapter categories:
//! - `poweradmin`: External API HTTP/XML client
//! - `db`: PowerAdmin statistics database reader
//! - `exposition`: Prometheus text exposition over axum

pub mod db;
pub mod exposition;
pub mod poweradmin;
