//! Metrics database port.

use async_trait::async_trait;

use crate::domain::{ComputerInfo, ServerMetric};
use crate::error::CollectError;

/// Capability: read per-server statistics out of the PowerAdmin
/// relational store.
///
/// Implementations hold at most one lazily-established connection,
/// reused for the duration of a scrape. A scrape pass calls `connect`
/// once before any query; queries on a dropped connection fail with
/// `CollectError::Connection`.
#[async_trait]
pub trait MetricsDatabase: Send + Sync {
    /// Establish the connection if none is currently held.
    async fn connect(&self) -> Result<(), CollectError>;

    /// Look up a server's internal numeric id and group by its alias.
    ///
    /// Returns the first match only; aliases are assumed unique.
    async fn computer_info(&self, alias: &str) -> Result<ComputerInfo, CollectError>;

    /// List the names of all servers under a group path, per the
    /// database's own hierarchy table. Used to expand filters that name
    /// no explicit servers.
    async fn servers_in_group(&self, group_path: &str) -> Result<Vec<String>, CollectError>;

    /// Most-recently-dated row per statistic tracked for a server.
    /// Rows with an empty item alias are excluded by the query itself.
    async fn latest_metrics(&self, comp_id: i64) -> Result<Vec<ServerMetric>, CollectError>;
}
