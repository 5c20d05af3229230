//! PowerAdmin External API HTTP Client
//!
//! Wraps reqwest for the three XML endpoints (group list, server list,
//! monitor info) and composes them into the filtered resource walk the
//! `ExternalMetricsSource` port requires.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use super::types::{Group, GroupList, MonitorInfo, MonitorInfos, Server, ServerList};
use crate::config::GroupFilter;
use crate::domain::MonitoredValue;
use crate::error::CollectError;
use crate::ports::ExternalMetricsSource;

const GROUP_LIST_SUFFIX: &str = "&API=GET_GROUP_LIST&XML=1";
const SERVER_LIST_SUFFIX: &str = "&API=GET_SERVER_LIST&XML=1&GID=";
const MONITOR_INFO_SUFFIX: &str = "&API=GET_MONITOR_INFO&XML=1&CID=";

/// HTTP client for the PowerAdmin External API.
#[derive(Debug)]
pub struct PowerAdminClient {
    http: reqwest::Client,
    /// Base URL with the API key baked in: `{server}?KEY={key}`.
    keyed_url: String,
}

impl PowerAdminClient {
    /// Create a client for the given server URL and API key.
    ///
    /// Fails fast with `CollectError::Configuration` on an empty API
    /// key, before any network call. `skip_tls_verify` accepts invalid
    /// certificates (expired internal PowerAdmin installs).
    pub fn new(
        server_url: &str,
        api_key: &str,
        skip_tls_verify: bool,
    ) -> Result<Self, CollectError> {
        if api_key.is_empty() {
            return Err(CollectError::Configuration(
                "API key cannot be empty".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(skip_tls_verify)
            .build()
            .map_err(|e| CollectError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            keyed_url: format!("{server_url}?KEY={api_key}"),
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, suffix: &str) -> Result<T, CollectError> {
        let url = format!("{}{}", self.keyed_url, suffix);
        let response = self.http.get(&url).send().await.map_err(|e| {
            error!(error = %e, "Error sending request");
            CollectError::Network(e.to_string())
        })?;
        let body = response
            .error_for_status()
            .map_err(|e| CollectError::Network(e.to_string()))?
            .text()
            .await
            .map_err(|e| CollectError::Network(e.to_string()))?;
        quick_xml::de::from_str(&body).map_err(|e| {
            error!(error = %e, "Error decoding response");
            CollectError::Decode(e.to_string())
        })
    }

    /// `GET_GROUP_LIST`: the full group hierarchy.
    pub async fn group_list(&self) -> Result<GroupList, CollectError> {
        self.fetch(GROUP_LIST_SUFFIX).await
    }

    /// `GET_SERVER_LIST`: all servers in one group.
    pub async fn server_list(&self, gid: &str) -> Result<ServerList, CollectError> {
        self.fetch(&format!("{SERVER_LIST_SUFFIX}{gid}")).await
    }

    /// `GET_MONITOR_INFO`: all monitors of one server.
    pub async fn monitor_infos(&self, cid: &str) -> Result<MonitorInfos, CollectError> {
        self.fetch(&format!("{MONITOR_INFO_SUFFIX}{cid}")).await
    }
}

#[async_trait]
impl ExternalMetricsSource for PowerAdminClient {
    async fn resources(
        &self,
        filters: &[GroupFilter],
    ) -> Result<Vec<MonitoredValue>, CollectError> {
        let group_list = self.group_list().await?;
        // index the hierarchy once; filters look up by path
        let groups_by_path: HashMap<&str, &Group> = group_list
            .groups
            .iter()
            .map(|g| (g.path.as_str(), g))
            .collect();

        let mut values = Vec::new();
        for filter in filters {
            let Some(group) = groups_by_path.get(filter.group_path.as_str()) else {
                warn!(path = %filter.group_path, "Group not found, skipping filter");
                continue;
            };
            let servers = self.server_list(&group.id).await?;
            for server in filter_servers(servers.servers, &filter.servers) {
                let infos = self.monitor_infos(&server.id).await?;
                debug!(
                    server = %server.name,
                    monitors = infos.infos.len(),
                    "Fetched monitor infos"
                );
                for info in dedup_by_title(infos.infos, &server.name) {
                    values.push(MonitoredValue {
                        monitor_id: info.id,
                        monitor_title: info.title,
                        monitor_value: info.status.clone(),
                        monitor_status: info.status,
                        last_run: info.last_run,
                        server_id: server.id.clone(),
                        server_name: server.name.clone(),
                        group_id: group.id.clone(),
                        group_name: group.name.clone(),
                        group_path: group.path.clone(),
                    });
                }
            }
        }
        Ok(values)
    }
}

/// Keep only servers named in the filter; an empty filter keeps all,
/// order preserved either way.
fn filter_servers(servers: Vec<Server>, names: &[String]) -> Vec<Server> {
    if names.is_empty() {
        return servers;
    }
    let name_set: HashSet<&str> = names.iter().map(String::as_str).collect();
    servers
        .into_iter()
        .filter(|s| name_set.contains(s.name.as_str()))
        .collect()
}

/// Drop repeated monitor titles within one server's list, first wins.
/// Duplicate titles are a known PowerAdmin data quality issue, not an
/// error.
fn dedup_by_title(infos: Vec<MonitorInfo>, server_name: &str) -> Vec<MonitorInfo> {
    let mut seen = HashSet::new();
    infos
        .into_iter()
        .filter(|info| {
            if seen.insert(info.title.clone()) {
                true
            } else {
                warn!(title = %info.title, server = %server_name, "Duplicate monitor title");
                false
            }
        })
        .collect()
}
