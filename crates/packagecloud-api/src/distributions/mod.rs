//! Distribution catalog lookup
//!
//! The catalog is fetched on first use and kept for the lifetime of the
//! client. Concurrent first callers share a single fetch. A failed fetch
//! leaves the cell empty, so the next call tries again.

use reqwest::Method;
use tracing::{debug, info, warn};

use packagecloud_core::types::{Distributions, Ecosystem};
use crate::client::PackagecloudClient;
use crate::response::{check_response, decode_json};
use crate::ApiResult;

impl PackagecloudClient {
    /// Distribution catalog, fetched once per client
    pub async fn distributions(&self) -> ApiResult<&Distributions> {
        self.distributions
            .get_or_try_init(|| async {
                let result = self.fetch_distributions().await;
                if let Err(e) = &result {
                    warn!("fetching distributions failed, will retry on next use: {}", e);
                }
                result
            })
            .await
    }

    /// Look up the distro version id for a distribution in one ecosystem
    pub async fn distro_version_id(
        &self,
        ecosystem: Ecosystem,
        distro: &str,
        version: &str,
    ) -> ApiResult<Option<u64>> {
        let catalog = self.distributions().await?;
        Ok(catalog.distro_version_id(ecosystem, distro, version))
    }

    async fn fetch_distributions(&self) -> ApiResult<Distributions> {
        let url = self.endpoint("distributions.json")?;
        debug!("fetching distribution catalog from {}", url);

        let response = self.send(self.request(Method::GET, url), "get").await?;
        let response = check_response(response).await?;
        let catalog: Distributions = decode_json(response).await?;

        info!(
            "loaded distribution catalog ({} deb, {} rpm, {} py)",
            catalog.deb.len(),
            catalog.rpm.len(),
            catalog.py.len()
        );
        Ok(catalog)
    }
}

#[cfg(test)]
pub(crate) mod tests;
