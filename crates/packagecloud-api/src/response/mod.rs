//! Classification of service responses into the shared error taxonomy

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use packagecloud_core::error::PackagecloudError;
use crate::ApiResult;

/// Map a status code and response body to an outcome
///
/// Any 2xx status is success. The body is carried verbatim in every error.
pub fn classify(status: StatusCode, body: String) -> ApiResult<()> {
    if status.is_success() {
        Ok(())
    } else {
        Err(failure(status, body))
    }
}

fn failure(status: StatusCode, body: String) -> PackagecloudError {
    match status {
        StatusCode::UNAUTHORIZED => PackagecloudError::Unauthenticated { body },
        StatusCode::NOT_FOUND => PackagecloudError::NotFound { body },
        StatusCode::UNPROCESSABLE_ENTITY => PackagecloudError::AlreadyExists { body },
        s => PackagecloudError::Internal {
            status: s.to_string(),
            body,
        },
    }
}

/// Pass a successful response through, or consume its body into an error
pub(crate) async fn check_response(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(failure(status, body))
}

/// Decode a JSON response body
pub(crate) async fn decode_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let url = response.url().clone();
    response
        .json::<T>()
        .await
        .map_err(|e| PackagecloudError::decode(format!("{}: {}", url, e), e))
}
