//! Configuration for the packagecloud CLI
//!
//! This crate reads the `~/.packagecloud` JSON file and layers environment
//! variables and command-line flags over it, producing the token and service
//! URL a client is built from.

pub mod file;
pub mod merge;

// Re-export main types
pub use file::ConfigFile;
pub use merge::{Config, ConfigLayering, ConfigLoader, ConfigOverrides, ConfigSource};

use packagecloud_core::error::PackagecloudError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, PackagecloudError>;

/// Environment variable holding the API token
pub const TOKEN_ENV: &str = "PACKAGECLOUD_TOKEN";

/// Environment variable overriding the service URL
pub const URL_ENV: &str = "PACKAGECLOUD_URL";

/// Name of the per-user configuration file in the home directory
pub const CONFIG_FILE_NAME: &str = ".packagecloud";
