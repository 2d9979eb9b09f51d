//! Unit tests for pagination

use super::*;

use packagecloud_core::error::PackagecloudError;
use reqwest::header::{HeaderName, HeaderValue};
use wiremock::{MockServer, Mock, ResponseTemplate};
use wiremock::matchers::{method, path, query_param};

use crate::client::ClientConfig;

fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in pairs {
        map.append(
            HeaderName::from_bytes(name.as_bytes()).unwrap(),
            HeaderValue::from_str(value).unwrap(),
        );
    }
    map
}

fn page_url() -> Url {
    Url::parse("https://packagecloud.io/api/v1/repos/u/r/search?q=x").unwrap()
}

#[test]
fn test_parse_link_header() {
    let links = parse_link_header(
        "<https://packagecloud.io/api/v1/repos/u/r/search?page=2>; rel=\"next\", \
         <https://packagecloud.io/api/v1/repos/u/r/search?page=3>; rel=\"last\"",
    );
    assert_eq!(links.len(), 2);
    assert_eq!(links["next"], "https://packagecloud.io/api/v1/repos/u/r/search?page=2");
    assert_eq!(links["last"], "https://packagecloud.io/api/v1/repos/u/r/search?page=3");
}

#[test]
fn test_parse_link_header_variants() {
    // Unquoted relation, extra params, multiple relations in one entry
    let links = parse_link_header("</p2>; title=\"x\"; rel=next,</p1>; rel=\"first prev\"");
    assert_eq!(links["next"], "/p2");
    assert_eq!(links["first"], "/p1");
    assert_eq!(links["prev"], "/p1");

    assert!(parse_link_header("").is_empty());
    assert!(parse_link_header("garbage").is_empty());
    assert!(parse_link_header("<unterminated; rel=\"next\"").is_empty());
}

#[test]
fn test_cursor_has_more() {
    let h = headers(&[
        ("Total", "250"),
        ("Per-Page", "100"),
        ("Link", "<https://packagecloud.io/next?page=2>; rel=\"next\""),
    ]);
    assert_eq!(
        PageCursor::after(&page_url(), &h),
        PageCursor::HasMore(Url::parse("https://packagecloud.io/next?page=2").unwrap())
    );
}

#[test]
fn test_cursor_resolves_relative_links() {
    let h = headers(&[
        ("Total", "250"),
        ("Per-Page", "100"),
        ("Link", "</api/v1/repos/u/r/search?page=2>; rel=\"next\""),
    ]);
    assert_eq!(
        PageCursor::after(&page_url(), &h),
        PageCursor::HasMore(Url::parse("https://packagecloud.io/api/v1/repos/u/r/search?page=2").unwrap())
    );
}

#[test]
fn test_cursor_done() {
    let link = "<https://packagecloud.io/next?page=2>; rel=\"next\"";

    // Everything fits on one page
    let h = headers(&[("Total", "100"), ("Per-Page", "100"), ("Link", link)]);
    assert_eq!(PageCursor::after(&page_url(), &h), PageCursor::Done);

    // No next relation
    let h = headers(&[("Total", "250"), ("Per-Page", "100"), ("Link", "</p1>; rel=\"first\"")]);
    assert_eq!(PageCursor::after(&page_url(), &h), PageCursor::Done);

    // Missing or malformed counts
    let h = headers(&[("Per-Page", "100"), ("Link", link)]);
    assert_eq!(PageCursor::after(&page_url(), &h), PageCursor::Done);
    let h = headers(&[("Total", "many"), ("Per-Page", "100"), ("Link", link)]);
    assert_eq!(PageCursor::after(&page_url(), &h), PageCursor::Done);
}

#[tokio::test]
async fn test_get_all_pages_concatenates_in_order() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();
    let next = |page: u32| format!("<{}/api/v1/items?page={}>; rel=\"next\"", base, page);

    Mock::given(method("GET"))
        .and(path("/api/v1/items"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Total", "250")
                .insert_header("Per-Page", "100")
                .insert_header("Link", next(3).as_str())
                .set_body_json(serde_json::json!([3, 4])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/items"))
        .and(query_param("page", "3"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Total", "250")
                .insert_header("Per-Page", "100")
                .set_body_json(serde_json::json!([5])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/items"))
        .and(query_param("start", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Total", "250")
                .insert_header("Per-Page", "100")
                .insert_header("Link", next(2).as_str())
                .set_body_json(serde_json::json!([1, 2])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PackagecloudClient::new(ClientConfig::new("token").with_base_url(base.clone())).unwrap();
    let first = Url::parse(&format!("{}/api/v1/items?start=1", base)).unwrap();
    let items: Vec<u32> = client.get_all_pages(first).await.unwrap();
    assert_eq!(items, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_get_all_pages_failure_discards_partial_results() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/api/v1/items"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500).set_body_string("page exploded"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/items"))
        .and(query_param("start", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Total", "3")
                .insert_header("Per-Page", "2")
                .insert_header("Link", format!("<{}/api/v1/items?page=2>; rel=\"next\"", base).as_str())
                .set_body_json(serde_json::json!([1, 2])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PackagecloudClient::new(ClientConfig::new("token").with_base_url(base.clone())).unwrap();
    let first = Url::parse(&format!("{}/api/v1/items?start=1", base)).unwrap();
    let result: ApiResult<Vec<u32>> = client.get_all_pages(first).await;
    match result.unwrap_err() {
        PackagecloudError::Internal { body, .. } => assert_eq!(body, "page exploded"),
        other => panic!("Expected Internal error, got {:?}", other),
    }
}

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn link_header_round_trip(
            entries in prop::collection::vec(("[a-z]{1,8}", "/[a-z0-9/]{0,16}\\?page=[0-9]{1,3}"), 1..5)
        ) {
            let value = entries
                .iter()
                .map(|(rel, uri)| format!("<{}>; rel=\"{}\"", uri, rel))
                .collect::<Vec<_>>()
                .join(", ");
            let links = parse_link_header(&value);
            for (rel, _) in &entries {
                let first = entries.iter().find(|(r, _)| r == rel).map(|(_, u)| u.clone());
                prop_assert_eq!(links.get(rel).cloned(), first);
            }
        }
    }
}
