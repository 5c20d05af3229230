//! PowerAdmin External API response types.
//!
//! All three endpoints return attribute-only XML documents
//! (`<groups>`, `<servers>`, `<monitors>`), deserialized with
//! quick-xml's serde support.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};

/// `lastRun` wire format: day-month-year, not ISO.
pub const PA_TIME_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// `GET_GROUP_LIST` response.
#[derive(Debug, Default, Deserialize)]
pub struct GroupList {
    #[serde(rename = "group", default)]
    pub groups: Vec<Group>,
}

/// One node of the monitored-resource hierarchy.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Group {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@name")]
    pub name: String,
    /// `^`-delimited hierarchy path, the filter key.
    #[serde(rename = "@path")]
    pub path: String,
    #[serde(rename = "@parentID", default)]
    pub parent_id: String,
}

/// `GET_SERVER_LIST` response.
#[derive(Debug, Default, Deserialize)]
pub struct ServerList {
    #[serde(rename = "server", default)]
    pub servers: Vec<Server>,
}

/// One server within a group.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Server {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@alias", default)]
    pub alias: String,
    #[serde(rename = "@status", default)]
    pub status: String,
    #[serde(rename = "@groupID", default)]
    pub group_id: String,
    #[serde(rename = "@group", default)]
    pub group_path: String,
}

/// `GET_MONITOR_INFO` response.
#[derive(Debug, Default, Deserialize)]
pub struct MonitorInfos {
    #[serde(rename = "monitor", default)]
    pub infos: Vec<MonitorInfo>,
}

/// One monitored item of a server.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MonitorInfo {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@status")]
    pub status: String,
    #[serde(rename = "@title")]
    pub title: String,
    /// A malformed `lastRun` fails the document decode; we surface the
    /// error instead of silently substituting the current time.
    #[serde(rename = "@lastRun", deserialize_with = "pa_time")]
    pub last_run: NaiveDateTime,
}

fn pa_time<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&raw, PA_TIME_FORMAT).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_group_list_deserialization() {
        let xml = r#"<groups>
            <group id="154" name="Live" path="Servers/Devices^Live" parentID="1"/>
            <group id="155" name="Dev" path="Servers/Devices^Dev" parentID="1"/>
        </groups>"#;
        let list: GroupList = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(list.groups.len(), 2);
        assert_eq!(list.groups[0].path, "Servers/Devices^Live");
        assert_eq!(list.groups[1].id, "155");
    }

    #[test]
    fn test_server_list_deserialization() {
        let xml = r#"<servers>
            <server id="158" name="FXSERVER" alias="FXSERVER" status="ok" groupID="154" group="Servers/Devices^Live"/>
        </servers>"#;
        let list: ServerList = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(list.servers[0].name, "FXSERVER");
        assert_eq!(list.servers[0].group_id, "154");
    }

    #[test]
    fn test_monitor_info_deserialization() {
        let xml = r#"<monitors>
            <monitor id="42" status="OK" title="Ping" lastRun="24-04-2019 20:41:35"/>
        </monitors>"#;
        let infos: MonitorInfos = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(infos.infos[0].title, "Ping");
        assert_eq!(
            infos.infos[0].last_run,
            NaiveDate::from_ymd_opt(2019, 4, 24)
                .unwrap()
                .and_hms_opt(20, 41, 35)
                .unwrap()
        );
    }

    #[test]
    fn test_malformed_last_run_fails_decode() {
        let xml = r#"<monitors>
            <monitor id="42" status="OK" title="Ping" lastRun="2019-04-24T20:41:35Z"/>
        </monitors>"#;
        assert!(quick_xml::de::from_str::<MonitorInfos>(xml).is_err());
    }

    #[test]
    fn test_empty_document_yields_no_entries() {
        let list: GroupList = quick_xml::de::from_str("<groups></groups>").unwrap();
        assert!(list.groups.is_empty());
    }
}
