//! Tests for the HTTP client module

use super::*;
use crate::config::ClientConfig;
use crate::error::Error;
use std::time::Duration;
use wiremock::matchers::{body_json, body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpClient {
    let config = ClientConfig::builder()
        .endpoint(server.uri())
        .api_key("test-key")
        .build();
    HttpClient::new(config).unwrap()
}

#[test]
fn test_request_config_builder() {
    let config = RequestConfig::new()
        .query("page[number]", "1")
        .query("page[size]", "10")
        .header("X-Request-Id", "abc123")
        .accept_jsonapi()
        .jsonapi(serde_json::json!({"data": {}}))
        .timeout(Duration::from_secs(10));

    assert_eq!(config.query.get("page[number]"), Some(&"1".to_string()));
    assert_eq!(config.query.get("page[size]"), Some(&"10".to_string()));
    assert_eq!(
        config.headers.get("X-Request-Id"),
        Some(&"abc123".to_string())
    );
    assert_eq!(
        config.headers.get("accept"),
        Some(&"application/vnd.api+json".to_string())
    );
    assert!(matches!(config.body, Some(RequestBody::JsonApi(_))));
    assert_eq!(config.timeout, Some(Duration::from_secs(10)));
}

#[tokio::test]
async fn test_get_sends_api_key_and_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/service-authorizations"))
        .and(header("Fastly-Key", "test-key"))
        .and(query_param("page[size]", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client
        .get(
            "/service-authorizations",
            RequestConfig::new().query("page[size]", "25"),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_default_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .and(header("X-Custom", "value"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let config = ClientConfig::builder()
        .endpoint(mock_server.uri())
        .header("X-Custom", "value")
        .build();
    let client = HttpClient::new(config).unwrap();

    let response = client.get("ping", RequestConfig::new()).await.unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_request_header_replaces_default() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ClientConfig::builder()
        .endpoint(mock_server.uri())
        .header("Accept", "text/plain")
        .header("X-Custom", "value")
        .build();
    let client = HttpClient::new(config).unwrap();

    client
        .get("ping", RequestConfig::new().accept_jsonapi())
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let accept: Vec<_> = requests[0].headers.get_all("accept").iter().collect();
    assert_eq!(accept.len(), 1);
    assert_eq!(accept[0], "application/vnd.api+json");
    assert_eq!(requests[0].headers.get("x-custom").unwrap(), "value");
}

#[tokio::test]
async fn test_post_jsonapi_sets_media_type() {
    let mock_server = MockServer::start().await;
    let doc = serde_json::json!({"data": {"type": "waf", "attributes": {"response": "x"}}});

    Mock::given(method("POST"))
        .and(path("/service/s/version/1/wafs"))
        .and(header("Content-Type", "application/vnd.api+json"))
        .and(header("Accept", "application/vnd.api+json"))
        .and(body_json(&doc))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client
        .post_jsonapi("/service/s/version/1/wafs", doc.clone())
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
}

#[tokio::test]
async fn test_put_form() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/service/s/version/1/gzip/old"))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(body_string("name=new"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client
        .put_form(
            "/service/s/version/1/gzip/old",
            vec![("name".to_string(), "new".to_string())],
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_non_success_maps_to_http_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/service-authorizations/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .delete("/service-authorizations/missing")
        .await
        .unwrap_err();

    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.get("/flaky", RequestConfig::new()).await.unwrap_err();
    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn test_transport_get_returns_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wafs/rules"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"data\":[]}"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let body = Transport::get(&client, "/wafs/rules", RequestConfig::new())
        .await
        .unwrap();
    assert_eq!(&body[..], b"{\"data\":[]}");
}

#[tokio::test]
async fn test_absolute_url_bypasses_endpoint() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/absolute"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let config = ClientConfig::builder()
        .endpoint("http://127.0.0.1:1")
        .build();
    let client = HttpClient::new(config).unwrap();

    let url = format!("{}/absolute", mock_server.uri());
    let response = client.get(&url, RequestConfig::new()).await.unwrap();
    assert_eq!(response.status(), 200);
}
