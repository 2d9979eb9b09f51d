//! Download statistics for a single package

use reqwest::Method;
use tracing::info;

use packagecloud_core::types::{CountValue, PackageDetail, PackageDownloads};
use crate::client::{append_query, PackagecloudClient};
use crate::response::{check_response, decode_json};
use crate::ApiResult;

impl PackagecloudClient {
    /// Total downloads of a package, optionally bounded by dates
    ///
    /// Dates use the service's `YYYYMMDDZ` format and are passed through as-is.
    pub async fn download_count(
        &self,
        package: &PackageDetail,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> ApiResult<CountValue> {
        let mut url = self.resolve(&package.downloads_count_url)?;
        append_query(&mut url, &[("start_date", start_date), ("end_date", end_date)]);

        let response = self.send(self.request(Method::GET, url), "get").await?;
        let response = check_response(response).await?;
        let count: CountValue = decode_json(response).await?;

        info!("{} was downloaded {} times", package.filename, count.value);
        Ok(count)
    }

    /// Every download record of a package, following all pages
    pub async fn download_details(
        &self,
        package: &PackageDetail,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> ApiResult<Vec<PackageDownloads>> {
        let mut url = self.resolve(&package.downloads_detail_url)?;
        append_query(&mut url, &[("start_date", start_date), ("end_date", end_date)]);

        self.get_all_pages(url).await
    }
}
