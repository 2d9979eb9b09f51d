//! Pagination over `Link`/`Total`/`Per-Page` response headers
//!
//! Collection endpoints return one JSON array per page. A page is followed by
//! another only when the service reports more items than fit on one page and
//! names the next page in a `Link` header entry with `rel="next"`.

use std::collections::HashMap;

use reqwest::header::{HeaderMap, LINK};
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::client::PackagecloudClient;
use crate::response::{check_response, decode_json};
use crate::ApiResult;

/// Where a paginated fetch goes next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCursor {
    /// Another page is available at this URL
    HasMore(Url),
    /// The collection is complete
    Done,
}

impl PageCursor {
    /// Decide the cursor after a page from its response headers
    ///
    /// Relative `next` links are resolved against the URL of the page that
    /// carried them.
    pub fn after(current: &Url, headers: &HeaderMap) -> Self {
        let total = header_number(headers, "Total");
        let per_page = header_number(headers, "Per-Page");
        match (total, per_page) {
            (Some(total), Some(per_page)) if total > per_page => {}
            _ => return PageCursor::Done,
        }

        let next = headers
            .get_all(LINK)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(|value| parse_link_header(value).remove("next"));

        match next.and_then(|uri| current.join(&uri).ok()) {
            Some(url) => PageCursor::HasMore(url),
            None => PageCursor::Done,
        }
    }
}

fn header_number(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}

/// Parse an RFC 8288 `Link` header value into a map of relation -> URI
///
/// When a relation appears more than once the first entry wins.
pub fn parse_link_header(value: &str) -> HashMap<String, String> {
    let mut links = HashMap::new();
    let mut rest = value;

    while let Some(start) = rest.find('<') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('>') else { break };
        let uri = &after[..end];
        let tail = &after[end + 1..];
        let params_end = tail.find('<').unwrap_or(tail.len());

        for param in tail[..params_end].split(';') {
            let param = param.trim().trim_end_matches(',').trim();
            let Some((key, val)) = param.split_once('=') else { continue };
            if !key.trim().eq_ignore_ascii_case("rel") {
                continue;
            }
            for rel in val.trim().trim_matches('"').split_whitespace() {
                links
                    .entry(rel.to_ascii_lowercase())
                    .or_insert_with(|| uri.to_string());
            }
        }

        rest = &tail[params_end..];
    }

    links
}

impl PackagecloudClient {
    /// Fetch every page of a collection starting at `first`
    ///
    /// Items keep page order, then in-page order. Any failing page aborts the
    /// whole fetch and the items gathered so far are dropped.
    pub(crate) async fn get_all_pages<T: DeserializeOwned>(&self, first: Url) -> ApiResult<Vec<T>> {
        let mut items = Vec::new();
        let mut cursor = PageCursor::HasMore(first);
        let mut pages = 0usize;

        while let PageCursor::HasMore(url) = cursor {
            let response = self.send(self.request(Method::GET, url.clone()), "get").await?;
            let response = check_response(response).await?;
            cursor = PageCursor::after(&url, response.headers());

            let page: Vec<T> = decode_json(response).await?;
            pages += 1;
            debug!("page {} of {} carried {} items", pages, url.path(), page.len());
            items.extend(page);
        }

        Ok(items)
    }
}

#[cfg(test)]
mod tests;
