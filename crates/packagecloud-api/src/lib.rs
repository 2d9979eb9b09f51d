//! packagecloud.io API client
//!
//! This crate provides the HTTP operations of the packagecloud API: the
//! distribution catalog, package push/promote/delete/download, paginated
//! search and download statistics. Every failure is reported through the
//! shared error taxonomy of `packagecloud-core`.

pub mod client;
pub mod distributions;
pub mod package;
pub mod pagination;
pub mod response;
pub mod search;
pub mod stats;

// Re-export main types
pub use client::{ClientConfig, PackagecloudClient, DEFAULT_BASE_URL};
pub use package::upload_ecosystem;
pub use pagination::{parse_link_header, PageCursor};
pub use response::classify;
pub use search::SearchQuery;

use packagecloud_core::error::PackagecloudError;

/// Result type for API operations
pub type ApiResult<T> = Result<T, PackagecloudError>;
