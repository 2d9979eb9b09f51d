//! Configuration layering, fallback logic, and environment overrides

use std::collections::HashMap;

use camino::Utf8PathBuf;
use tracing::debug;

use packagecloud_core::error::PackagecloudError;
use crate::file::{self, ConfigFile};
use crate::{ConfigResult, CONFIG_FILE_NAME, TOKEN_ENV, URL_ENV};

/// Service URL used when no layer provides one
pub const DEFAULT_URL: &str = "https://packagecloud.io";

/// Locates and loads the configuration file
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    /// Explicit `--config` path; must exist when given
    explicit_path: Option<Utf8PathBuf>,
}

/// Values a single layer may provide
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub token: Option<String>,
    pub url: Option<String>,
}

/// Configuration layering and merging
///
/// Precedence, highest first: command line, environment, file, default.
#[derive(Debug, Clone, Default)]
pub struct ConfigLayering {
    file: Option<(ConfigFile, Utf8PathBuf)>,
    env_overrides: HashMap<String, String>,
    cli_overrides: ConfigOverrides,
}

/// Where a configuration value came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Configuration file
    File(Utf8PathBuf),
    /// Environment variable
    Environment(String),
    /// CLI flag
    CommandLine,
    /// Built-in default
    Default,
}

/// Fully resolved configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub token: String,
    pub url: String,
    pub token_source: ConfigSource,
    pub url_source: ConfigSource,
}

impl ConfigLoader {
    /// Loader for the default `~/.packagecloud` file
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader for an explicit file path
    pub fn with_path(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            explicit_path: Some(path.into()),
        }
    }

    /// Path of the per-user configuration file
    pub fn default_config_path() -> ConfigResult<Utf8PathBuf> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| PackagecloudError::invalid_argument("could not determine home directory"))?;

        let home = Utf8PathBuf::try_from(home_dir).map_err(|e| {
            PackagecloudError::invalid_argument(format!("invalid home directory path: {}", e))
        })?;
        Ok(home.join(CONFIG_FILE_NAME))
    }

    /// Load the configuration file, if any
    ///
    /// A missing default file is not an error; a missing explicit file is.
    pub async fn load(&self) -> ConfigResult<Option<(ConfigFile, Utf8PathBuf)>> {
        if let Some(path) = &self.explicit_path {
            let config = file::load_from_file(path).await?;
            return Ok(Some((config, path.clone())));
        }

        let path = match Self::default_config_path() {
            Ok(path) => path,
            Err(e) => {
                debug!("skipping config file: {}", e);
                return Ok(None);
            }
        };

        if !path.exists() {
            debug!("no config file at {}", path);
            return Ok(None);
        }

        let config = file::load_from_file(&path).await?;
        debug!("loaded config file {}", path);
        Ok(Some((config, path)))
    }
}

impl ConfigLayering {
    /// Create a new configuration layering system
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the file layer
    pub fn with_file(mut self, file: Option<(ConfigFile, Utf8PathBuf)>) -> Self {
        self.file = file;
        self
    }

    /// Set the environment layer
    pub fn with_env(mut self, env_overrides: HashMap<String, String>) -> Self {
        self.env_overrides = env_overrides;
        self
    }

    /// Set the command-line layer
    pub fn with_cli(mut self, cli_overrides: ConfigOverrides) -> Self {
        self.cli_overrides = cli_overrides;
        self
    }

    /// Merge all layers; fails with `MissingToken` when no layer has a token
    pub fn merge(&self) -> ConfigResult<Config> {
        let (token, token_source) =
            self.pick(self.cli_overrides.token.as_deref(), TOKEN_ENV, ConfigFile::token)
                .ok_or(PackagecloudError::MissingToken)?;

        let (url, url_source) = self
            .pick(self.cli_overrides.url.as_deref(), URL_ENV, ConfigFile::url)
            .unwrap_or_else(|| (DEFAULT_URL.to_string(), ConfigSource::Default));

        debug!("token from {:?}, url {} from {:?}", token_source, url, url_source);
        Ok(Config {
            token,
            url,
            token_source,
            url_source,
        })
    }

    /// First non-empty value from the CLI, environment, then file layer
    fn pick(
        &self,
        cli: Option<&str>,
        env_key: &str,
        from_file: fn(&ConfigFile) -> Option<&str>,
    ) -> Option<(String, ConfigSource)> {
        if let Some(value) = cli.filter(|v| !v.is_empty()) {
            return Some((value.to_string(), ConfigSource::CommandLine));
        }

        if let Some(value) = self.env_overrides.get(env_key).filter(|v| !v.is_empty()) {
            return Some((value.clone(), ConfigSource::Environment(env_key.to_string())));
        }

        let (config, path) = self.file.as_ref()?;
        from_file(config).map(|value| (value.to_string(), ConfigSource::File(path.clone())))
    }

    /// Collect the packagecloud environment variables
    pub fn collect_env_overrides() -> HashMap<String, String> {
        [TOKEN_ENV, URL_ENV]
            .into_iter()
            .filter_map(|key| std::env::var(key).ok().map(|value| (key.to_string(), value)))
            .collect()
    }
}
