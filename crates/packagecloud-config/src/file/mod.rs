//! `~/.packagecloud` file parsing

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use packagecloud_core::error::PackagecloudError;
use crate::ConfigResult;

/// Contents of the per-user configuration file
///
/// ```json
/// {"url": "https://packagecloud.io", "token": "..."}
/// ```
///
/// Both keys are optional; unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Service base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// API token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl ConfigFile {
    /// Token, treating an empty string as absent
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    /// URL, treating an empty string as absent
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }
}

/// Parse configuration file content; `path` is only used in errors
pub fn parse_config_file(content: &str, path: &Utf8Path) -> ConfigResult<ConfigFile> {
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }

    serde_json::from_str(content).map_err(|e| PackagecloudError::ConfigParse {
        path: path.to_string(),
        message: e.to_string(),
    })
}

/// Read and parse a configuration file
pub async fn load_from_file(path: &Utf8Path) -> ConfigResult<ConfigFile> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| PackagecloudError::ConfigParse {
            path: path.to_string(),
            message: e.to_string(),
        })?;

    parse_config_file(&content, path)
}
