//! # packagecloud-core
//!
//! Core types and utilities shared across all packagecloud crates.
//!
//! This crate provides:
//! - The distribution catalog types and the distro version lookup
//! - PackageDetail and download statistics records
//! - PackagecloudError, the error taxonomy every operation reports through
//! - Helpers for package paths and URLs
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Core data types (Distributions, PackageDetail, PackageTarget, etc.)
//! - `error`: Error types and result aliases
//! - `utils`: Utility functions and helpers

pub mod error;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use error::{ErrorCode, PackagecloudError, PackagecloudResult};
pub use types::{
    CountValue, Distribution, Distributions, DistroVersion, Ecosystem, PackageDetail,
    PackageDownloads, PackageTarget,
};
