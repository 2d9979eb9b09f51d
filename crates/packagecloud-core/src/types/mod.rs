//! Core data types for packagecloud.
//!
//! This module provides the types shared by the API client and the CLI:
//! - The distribution catalog used to resolve distro version ids
//! - Package metadata and download statistics records
//! - Package targets parsed from the command line

pub mod distribution;
pub mod package;
pub mod target;

// Re-export all public types
pub use distribution::{find_distro_version_id, Distribution, Distributions, DistroVersion, Ecosystem};
pub use package::{CountValue, PackageDetail, PackageDownloads};
pub use target::PackageTarget;
