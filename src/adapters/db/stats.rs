//! PowerAdmin statistics database reader.
//!
//! Holds a single lazily-established connection, reused across scrapes.
//! No pooling and no retry: a connection failure surfaces as one
//! pass-fatal error and the next scrape attempts a fresh connection.
//!
//! The original PowerAdmin store is SQL Server; this reader goes through
//! sqlx's MySQL driver against the mirrored schema (see DESIGN.md).

use async_trait::async_trait;
use sqlx::{Connection, MySqlConnection, Row};
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::{ComputerInfo, ServerMetric};
use crate::error::CollectError;
use crate::ports::MetricsDatabase;

const COMPUTER_INFO_SQL: &str =
    "SELECT CompID, Name, Alias, GroupID FROM ConfigComputerInfo WHERE Alias = ?";

const SERVERS_IN_GROUP_SQL: &str = "SELECT CI.Name FROM ConfigComputerInfo CI \
     INNER JOIN ConfigGroupInfo GI ON CI.GroupID = GI.GroupID \
     WHERE GI.ParentGroupPath = ?";

// latest-dated row per statistic; empty aliases are noise rows PowerAdmin
// keeps for internal bookkeeping and are excluded here, not downstream
const LATEST_METRICS_SQL: &str = "SELECT S.CompID, S.StatID, S.ItemAlias, S.UnitStr, D.Value, D.Date \
     FROM Statistic S \
     INNER JOIN StatData D ON D.StatID = S.StatID \
     WHERE S.CompID = ? AND S.ItemAlias <> '' \
       AND D.Date = (SELECT MAX(D2.Date) FROM StatData D2 WHERE D2.StatID = S.StatID)";

/// `MetricsDatabase` implementation over one reusable connection.
pub struct StatsDatabase {
    connection_string: String,
    conn: Mutex<Option<MySqlConnection>>,
}

impl StatsDatabase {
    /// Create a reader; no connection is attempted until `connect`.
    pub fn new(connection_string: String) -> Self {
        Self {
            connection_string,
            conn: Mutex::new(None),
        }
    }
}

#[async_trait]
impl MetricsDatabase for StatsDatabase {
    async fn connect(&self) -> Result<(), CollectError> {
        let mut guard = self.conn.lock().await;
        if guard.is_none() {
            let conn = MySqlConnection::connect(&self.connection_string)
                .await
                .map_err(|e| CollectError::Connection(e.to_string()))?;
            debug!("Connected to PowerAdmin database");
            *guard = Some(conn);
        }
        Ok(())
    }

    async fn computer_info(&self, alias: &str) -> Result<ComputerInfo, CollectError> {
        let mut guard = self.conn.lock().await;
        let conn = guard
            .as_mut()
            .ok_or_else(|| CollectError::Connection("not connected".to_string()))?;

        let row = sqlx::query(COMPUTER_INFO_SQL)
            .bind(alias)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| CollectError::Query(e.to_string()))?
            .ok_or_else(|| CollectError::Query(format!("no server with alias {alias}")))?;

        Ok(ComputerInfo {
            comp_id: row
                .try_get("CompID")
                .map_err(|e| CollectError::Query(e.to_string()))?,
            name: row
                .try_get("Name")
                .map_err(|e| CollectError::Query(e.to_string()))?,
            alias: row
                .try_get("Alias")
                .map_err(|e| CollectError::Query(e.to_string()))?,
            group_id: row
                .try_get("GroupID")
                .map_err(|e| CollectError::Query(e.to_string()))?,
        })
    }

    async fn servers_in_group(&self, group_path: &str) -> Result<Vec<String>, CollectError> {
        let mut guard = self.conn.lock().await;
        let conn = guard
            .as_mut()
            .ok_or_else(|| CollectError::Connection("not connected".to_string()))?;

        let rows = sqlx::query(SERVERS_IN_GROUP_SQL)
            .bind(group_path)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| CollectError::Query(e.to_string()))?;

        rows.iter()
            .map(|row| {
                row.try_get("Name")
                    .map_err(|e| CollectError::Query(e.to_string()))
            })
            .collect()
    }

    async fn latest_metrics(&self, comp_id: i64) -> Result<Vec<ServerMetric>, CollectError> {
        let mut guard = self.conn.lock().await;
        let conn = guard
            .as_mut()
            .ok_or_else(|| CollectError::Connection("not connected".to_string()))?;

        let rows = sqlx::query(LATEST_METRICS_SQL)
            .bind(comp_id)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| CollectError::Query(e.to_string()))?;

        debug!(comp_id, rows = rows.len(), "Fetched latest server metrics");

        rows.iter()
            .map(|row| {
                Ok(ServerMetric {
                    comp_id: row
                        .try_get("CompID")
                        .map_err(|e| CollectError::Query(e.to_string()))?,
                    stat_id: row
                        .try_get("StatID")
                        .map_err(|e| CollectError::Query(e.to_string()))?,
                    item_alias: row
                        .try_get("ItemAlias")
                        .map_err(|e| CollectError::Query(e.to_string()))?,
                    unit_str: row
                        .try_get("UnitStr")
                        .map_err(|e| CollectError::Query(e.to_string()))?,
                    value: row
                        .try_get("Value")
                        .map_err(|e| CollectError::Query(e.to_string()))?,
                    date: row
                        .try_get("Date")
                        .map_err(|e| CollectError::Query(e.to_string()))?,
                })
            })
            .collect()
    }
}
