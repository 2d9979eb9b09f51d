//! Paginated package search

use tracing::info;

use packagecloud_core::types::PackageDetail;
use crate::client::{append_query, PackagecloudClient};
use crate::ApiResult;

/// Search parameters; empty fields are left out of the request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Distribution to restrict results to (`dist`)
    pub dist: Option<String>,
    /// Free-text query (`q`)
    pub query: Option<String>,
    /// Package type filter (`filter`), e.g. `debs` or `rpms`
    pub filter: Option<String>,
    /// Page size hint (`per_page`)
    pub per_page: Option<u32>,
}

impl SearchQuery {
    /// Search for a query string
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Default::default()
        }
    }

    /// Restrict the search to a distribution
    pub fn with_dist(mut self, dist: Option<String>) -> Self {
        self.dist = dist;
        self
    }

    /// Restrict the search to a package type
    pub fn with_filter(mut self, filter: Option<String>) -> Self {
        self.filter = filter;
        self
    }

    /// Ask for a specific page size
    pub fn with_per_page(mut self, per_page: Option<u32>) -> Self {
        self.per_page = per_page;
        self
    }
}

impl PackagecloudClient {
    /// Search a repository's package index, following every page
    pub async fn search_packages(&self, repo: &str, search: &SearchQuery) -> ApiResult<Vec<PackageDetail>> {
        let mut url = self.endpoint(&format!("repos/{}/search", repo))?;
        let per_page = search.per_page.map(|n| n.to_string());
        append_query(
            &mut url,
            &[
                ("dist", search.dist.as_deref()),
                ("q", search.query.as_deref()),
                ("per_page", per_page.as_deref()),
                ("filter", search.filter.as_deref()),
            ],
        );

        let details: Vec<PackageDetail> = self.get_all_pages(url).await?;
        info!("search in {} matched {} packages", repo, details.len());
        Ok(details)
    }
}

#[cfg(test)]
mod tests;
