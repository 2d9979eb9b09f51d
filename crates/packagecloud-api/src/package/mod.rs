//! Package transfer operations: push, promote, delete, download

use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::{Body, Method};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};
use url::Url;

use packagecloud_core::error::PackagecloudError;
use packagecloud_core::types::{Ecosystem, PackageDetail};
use packagecloud_core::utils::{file_extension, file_name, is_remote_source};
use crate::client::PackagecloudClient;
use crate::response::check_response;
use crate::ApiResult;

/// Package bytes ready to be streamed into a multipart part
struct PackageSource {
    body: Body,
    length: Option<u64>,
    filename: String,
}

/// Ecosystem and effective distro/version for an upload
///
/// Python wheels are not tied to an OS distribution, so the distro is forced
/// to `python` and the version cleared.
pub fn upload_ecosystem<'a>(
    source: &str,
    distro: &'a str,
    version: &'a str,
) -> ApiResult<(Ecosystem, &'a str, &'a str)> {
    let ecosystem = file_extension(source)
        .and_then(Ecosystem::from_extension)
        .ok_or_else(|| {
            PackagecloudError::invalid_argument(format!("unsupported package type: {}", file_name(source)))
        })?;

    match ecosystem {
        Ecosystem::Py => Ok((ecosystem, "python", "")),
        _ => Ok((ecosystem, distro, version)),
    }
}

impl PackagecloudClient {
    /// Upload a package from a local path or an http(s) URL
    pub async fn push_package(&self, repo: &str, distro: &str, version: &str, source: &str) -> ApiResult<()> {
        let (ecosystem, distro, version) = upload_ecosystem(source, distro, version)?;

        let distro_version_id = self
            .distro_version_id(ecosystem, distro, version)
            .await?
            .ok_or_else(|| {
                PackagecloudError::invalid_argument(format!("unknown distribution: {}/{}", distro, version))
            })?;

        let package = self.open_source(source).await?;
        debug!(
            "uploading {} ({} bytes) as distro_version_id {}",
            package.filename,
            package.length.map_or_else(|| "unknown".to_string(), |l| l.to_string()),
            distro_version_id
        );

        let part = match package.length {
            Some(length) => Part::stream_with_length(package.body, length),
            None => Part::stream(package.body),
        }
        .file_name(package.filename.clone())
        .mime_str("application/octet-stream")
        .map_err(|e| PackagecloudError::invalid_argument(format!("multipart: {}", e)))?;

        let form = Form::new()
            .text("package[distro_version_id]", distro_version_id.to_string())
            .part("package[package_file]", part);

        let url = self.endpoint(&format!("repos/{}/packages.json", repo))?;
        let response = self
            .send(self.mutating(Method::POST, url).multipart(form), "post")
            .await?;
        check_response(response).await?;

        info!("pushed {} to {}/{}/{}", package.filename, repo, distro, version);
        Ok(())
    }

    /// Copy a package from `src_repo` to `dst_repo` on the server
    pub async fn promote_package(
        &self,
        dst_repo: &str,
        src_repo: &str,
        distro: &str,
        version: &str,
        path: &str,
    ) -> ApiResult<()> {
        let filename = file_name(path);
        let form = Form::new().text("destination", dst_repo.to_string());

        let url = self.endpoint(&format!(
            "repos/{}/{}/{}/{}/promote.json",
            src_repo, distro, version, filename
        ))?;
        let response = self
            .send(self.mutating(Method::POST, url).multipart(form), "post")
            .await?;
        check_response(response).await?;

        info!("promoted {} from {} to {}", filename, src_repo, dst_repo);
        Ok(())
    }

    /// Remove a package from a repository
    pub async fn delete_package(&self, repo: &str, distro: &str, version: &str, path: &str) -> ApiResult<()> {
        let filename = file_name(path);
        let url = self.endpoint(&format!("repos/{}/{}/{}/{}", repo, distro, version, filename))?;

        let response = self.send(self.mutating(Method::DELETE, url), "delete").await?;
        check_response(response).await?;

        info!("deleted {} from {}/{}/{}", filename, repo, distro, version);
        Ok(())
    }

    /// Download a package into `destination`, returning the bytes written
    ///
    /// Credentials are only sent when the download URL is on the service host.
    pub async fn download_package(&self, detail: &PackageDetail, destination: &Path) -> ApiResult<u64> {
        let url = self.resolve(&detail.download_url)?;
        let mut request = self.anonymous(url.clone());
        if self.is_service_url(&url) {
            request = self.authorize(request);
        }

        let response = self.send(request, "get").await?;
        let mut response = check_response(response).await?;

        let mut file = tokio::fs::File::create(destination).await.map_err(|e| {
            PackagecloudError::io(format!("failed to create {}", destination.display()), e)
        })?;

        let mut written = 0u64;
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| PackagecloudError::network(format!("http get: {}", e), e))?
        {
            file.write_all(&chunk).await.map_err(|e| {
                PackagecloudError::io(format!("failed to write {}", destination.display()), e)
            })?;
            written += chunk.len() as u64;
        }
        file.flush().await.map_err(|e| {
            PackagecloudError::io(format!("failed to write {}", destination.display()), e)
        })?;

        info!("downloaded {} ({} bytes)", detail.filename, written);
        Ok(written)
    }

    /// Open the package bytes of a local file or a remote URL
    async fn open_source(&self, source: &str) -> ApiResult<PackageSource> {
        let filename = file_name(source).to_string();

        if is_remote_source(source) {
            let url = Url::parse(source)
                .map_err(|e| PackagecloudError::invalid_argument(format!("invalid url {}: {}", source, e)))?;
            let response = self
                .anonymous(url)
                .send()
                .await
                .map_err(|e| PackagecloudError::invalid_argument(format!("http GET: {}", e)))?;

            let status = response.status();
            if status.is_client_error() || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                return Err(PackagecloudError::invalid_argument(format!(
                    "http GET: {}\n>> {:?}",
                    status, body
                )));
            }

            // Length is left unknown: the client may transparently decompress
            return Ok(PackageSource {
                body: Body::wrap_stream(response.bytes_stream()),
                length: None,
                filename,
            });
        }

        let file = tokio::fs::File::open(source)
            .await
            .map_err(|e| PackagecloudError::invalid_argument(format!("file open: {}", e)))?;
        let length = file
            .metadata()
            .await
            .map_err(|e| PackagecloudError::invalid_argument(format!("file read: {}", e)))?
            .len();

        Ok(PackageSource {
            body: Body::from(file),
            length: Some(length),
            filename,
        })
    }
}
