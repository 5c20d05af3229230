//! External metrics source port.

use async_trait::async_trait;

use crate::config::GroupFilter;
use crate::domain::MonitoredValue;
use crate::error::CollectError;

/// Capability: resolve a set of group filters into flattened monitor
/// values via the monitored-resource hierarchy of an external system.
///
/// One call performs the whole walk (groups, servers, monitors) so the
/// orchestrator never learns about the underlying three-endpoint API.
#[async_trait]
pub trait ExternalMetricsSource: Send + Sync {
    /// Fetch the monitored values for every matched filter.
    ///
    /// Unmatched group paths are skipped with a warning; any transport
    /// or decode failure aborts the whole walk with no partial result.
    async fn resources(
        &self,
        filters: &[GroupFilter],
    ) -> Result<Vec<MonitoredValue>, CollectError>;
}
