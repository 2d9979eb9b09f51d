//! Unit tests for package search

use super::*;

use packagecloud_core::error::PackagecloudError;
use wiremock::{MockServer, Mock, ResponseTemplate};
use wiremock::matchers::{method, path, query_param};

use crate::client::ClientConfig;

fn detail(name: &str, version: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "version": version,
        "distro_version": "ubuntu/xenial",
        "type": "deb",
        "filename": format!("{}_{}_amd64.deb", name, version),
        "architecture": "amd64",
        "indexed": true,
        "download_url": format!("https://packagecloud.io/u/r/packages/ubuntu/xenial/{}_{}_amd64.deb/download", name, version),
        "downloads_count_url": "/api/v1/repos/u/r/stats/count.json",
        "downloads_detail_url": "/api/v1/repos/u/r/stats/detail.json"
    })
}

fn page(names: &[&str]) -> serde_json::Value {
    serde_json::Value::Array(names.iter().map(|n| detail(n, "1.0.0")).collect())
}

#[test]
fn test_search_query_builder() {
    let q = SearchQuery::new("example")
        .with_dist(Some("ubuntu".to_string()))
        .with_filter(Some("debs".to_string()))
        .with_per_page(Some(50));
    assert_eq!(q.query.as_deref(), Some("example"));
    assert_eq!(q.dist.as_deref(), Some("ubuntu"));
    assert_eq!(q.filter.as_deref(), Some("debs"));
    assert_eq!(q.per_page, Some(50));
}

#[tokio::test]
async fn test_search_single_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/repos/u/r/search"))
        .and(query_param("q", "example"))
        .and(query_param("dist", "ubuntu"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Total", "1")
                .insert_header("Per-Page", "30")
                .set_body_json(page(&["example"])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PackagecloudClient::new(ClientConfig::new("token").with_base_url(mock_server.uri())).unwrap();
    let query = SearchQuery::new("example").with_dist(Some("ubuntu".to_string()));
    let details = client.search_packages("u/r", &query).await.unwrap();

    assert_eq!(details.len(), 1);
    assert_eq!(details[0].name, "example");
    assert_eq!(details[0].filename, "example_1.0.0_amd64.deb");
}

#[tokio::test]
async fn test_search_follows_three_pages() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();
    let next = |n: u32| format!("<{}/api/v1/repos/u/r/search?page={}>; rel=\"next\"", base, n);

    Mock::given(method("GET"))
        .and(path("/api/v1/repos/u/r/search"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Total", "250")
                .insert_header("Per-Page", "100")
                .insert_header("Link", next(3).as_str())
                .set_body_json(page(&["c", "d"])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/repos/u/r/search"))
        .and(query_param("page", "3"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Total", "250")
                .insert_header("Per-Page", "100")
                .set_body_json(page(&["e"])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/repos/u/r/search"))
        .and(query_param("q", "pkg"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Total", "250")
                .insert_header("Per-Page", "100")
                .insert_header("Link", next(2).as_str())
                .set_body_json(page(&["a", "b"])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PackagecloudClient::new(ClientConfig::new("token").with_base_url(base.clone())).unwrap();
    let details = client.search_packages("u/r", &SearchQuery::new("pkg")).await.unwrap();

    let names: Vec<&str> = details.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c", "d", "e"]);
}

#[tokio::test]
async fn test_search_missing_repo() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/repos/u/missing/search"))
        .respond_with(ResponseTemplate::new(404).set_body_string("{\"error\":\"not found\"}"))
        .mount(&mock_server)
        .await;

    let client = PackagecloudClient::new(ClientConfig::new("token").with_base_url(mock_server.uri())).unwrap();
    match client.search_packages("u/missing", &SearchQuery::new("x")).await.unwrap_err() {
        PackagecloudError::NotFound { body } => assert!(body.contains("not found")),
        other => panic!("Expected NotFound error, got {:?}", other),
    }
}
