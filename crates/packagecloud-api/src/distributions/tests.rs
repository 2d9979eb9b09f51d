//! Unit tests for the distribution catalog

use super::*;

use packagecloud_core::error::PackagecloudError;
use wiremock::{MockServer, Mock, ResponseTemplate};
use wiremock::matchers::{method, path, header};

use crate::client::ClientConfig;

pub(crate) fn catalog_json() -> serde_json::Value {
    serde_json::json!({
        "deb": [
            {
                "display_name": "Debian",
                "index_name": "debian",
                "versions": [
                    {"id": 149, "display_name": "9.0 stretch", "index_name": "stretch", "version_number": "9.0"},
                    {"id": 207, "display_name": "10 buster", "index_name": "buster", "version_number": "10"}
                ]
            },
            {
                "display_name": "Ubuntu",
                "index_name": "ubuntu",
                "versions": [
                    {"id": 165, "display_name": "16.04 Xenial Xerus", "index_name": "xenial", "version_number": "16.04"}
                ]
            }
        ],
        "rpm": [
            {
                "display_name": "Enterprise Linux",
                "index_name": "el",
                "versions": [
                    {"id": 140, "display_name": "7.0", "index_name": "7", "version_number": "7.0"}
                ]
            }
        ],
        "py": [
            {
                "display_name": "Python",
                "index_name": "python",
                "versions": [
                    {"id": 166, "display_name": "Python", "index_name": "", "version_number": null}
                ]
            }
        ]
    })
}

async fn client_for(mock_server: &MockServer) -> PackagecloudClient {
    PackagecloudClient::new(ClientConfig::new("token").with_base_url(mock_server.uri())).unwrap()
}

#[tokio::test]
async fn test_distributions_fetched_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/distributions.json"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;

    let first = client.distro_version_id(Ecosystem::Deb, "debian", "stretch").await.unwrap();
    let second = client.distro_version_id(Ecosystem::Deb, "debian", "stretch").await.unwrap();
    assert_eq!(first, Some(149));
    assert_eq!(second, Some(149));

    // Clones share the cached catalog
    let clone = client.clone();
    assert_eq!(clone.distributions().await.unwrap().deb.len(), 2);
}

#[tokio::test]
async fn test_unknown_distro_version_is_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/distributions.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_json()))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    assert_eq!(client.distro_version_id(Ecosystem::Deb, "debian", "sid").await.unwrap(), None);
    assert_eq!(client.distro_version_id(Ecosystem::Rpm, "debian", "stretch").await.unwrap(), None);
    assert_eq!(client.distro_version_id(Ecosystem::Rpm, "el", "7").await.unwrap(), Some(140));
}

#[tokio::test]
async fn test_failed_fetch_is_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/distributions.json"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/distributions.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;

    match client.distributions().await.unwrap_err() {
        PackagecloudError::Internal { body, .. } => assert_eq!(body, "maintenance"),
        other => panic!("Expected Internal error, got {:?}", other),
    }

    let id = client.distro_version_id(Ecosystem::Deb, "ubuntu", "xenial").await.unwrap();
    assert_eq!(id, Some(165));
}

#[tokio::test]
async fn test_unauthenticated_catalog_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/distributions.json"))
        .respond_with(ResponseTemplate::new(401).set_body_string("{\"error\":\"bad token\"}"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    match client.distributions().await.unwrap_err() {
        PackagecloudError::Unauthenticated { body } => assert!(body.contains("bad token")),
        other => panic!("Expected Unauthenticated error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_concurrent_callers_share_one_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/distributions.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(catalog_json())
                .set_delay(std::time::Duration::from_millis(50)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let (a, b) = tokio::join!(
        client.distro_version_id(Ecosystem::Deb, "debian", "buster"),
        client.distro_version_id(Ecosystem::Py, "python", "")
    );
    assert_eq!(a.unwrap(), Some(207));
    assert_eq!(b.unwrap(), Some(166));
}
