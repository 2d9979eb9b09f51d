//! Package metadata types returned by the packagecloud API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata about one uploaded package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDetail {
    pub name: String,
    #[serde(rename = "architecture", default)]
    pub arch: Option<String>,
    #[serde(default)]
    pub release: Option<String>,
    #[serde(default)]
    pub distro_version: String,
    #[serde(rename = "created_at", default)]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub version: String,
    #[serde(rename = "type", default)]
    pub package_type: String,
    pub filename: String,
    #[serde(default)]
    pub uploader_name: Option<String>,
    #[serde(default)]
    pub indexed: bool,
    #[serde(default)]
    pub package_url: String,
    #[serde(default)]
    pub download_url: String,
    #[serde(default)]
    pub downloads_count_url: String,
    #[serde(default)]
    pub downloads_detail_url: String,
}

impl PackageDetail {
    /// Check whether this package matches an optional version filter
    pub fn matches_version(&self, version: Option<&str>) -> bool {
        match version {
            None | Some("") => true,
            Some(v) => self.version == v,
        }
    }
}

/// Aggregate download count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountValue {
    pub value: u64,
}

/// A single download record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDownloads {
    pub downloaded_at: DateTime<Utc>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub read_token: Option<String>,
}
