//! TheNewsAPI client tests against a mock HTTP server.

use newsdesk_core::{NewsdeskError, SortBy, UNKNOWN};
use newsdesk_service::{
    HeadlinesRequest, NewsProvider, SearchRequest, TheNewsApiClient, UpstreamStatus,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test-token";

fn client(server: &MockServer) -> TheNewsApiClient {
    TheNewsApiClient::new(
        &format!("{}/v1/", server.uri()),
        API_KEY,
        Duration::from_millis(500),
        "NewsReaderApp/1.0",
    )
    .unwrap()
}

fn sample_body() -> serde_json::Value {
    json!({
        "meta": {"found": 345, "returned": 2, "limit": 2, "page": 1},
        "data": [
            {
                "uuid": "a1",
                "title": "First",
                "description": "First summary",
                "url": "https://example.com/first",
                "image_url": "https://example.com/first.jpg",
                "language": "en",
                "published_at": "2024-05-01T10:00:00.000000Z",
                "source": "example.com",
                "categories": ["business"],
                "locale": "us"
            },
            {
                "uuid": "a2",
                "title": "Second",
                "url": "https://example.com/second",
                "published_at": "2024-05-01T09:00:00.000000Z",
                "source": null
            }
        ]
    })
}

#[tokio::test]
async fn test_top_headlines_query_and_normalization() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/news/top"))
        .and(query_param("api_token", API_KEY))
        .and(query_param("limit", "2"))
        .and(query_param("offset", "4"))
        .and(query_param("country", "us"))
        .and(query_param("category", "business"))
        .and(header("user-agent", "NewsReaderApp/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
        .expect(1)
        .mount(&server)
        .await;

    let request = HeadlinesRequest {
        country: "us".to_string(),
        category: Some("business".to_string()),
        page: 3,
        page_size: 2,
    };
    let response = client(&server).top_headlines(&request).await.unwrap();

    assert_eq!(response.status, UpstreamStatus::Ok);
    assert_eq!(response.total_results, 345);
    assert_eq!(response.articles.len(), 2);
    assert_eq!(response.articles[0].content, "First summary");
    assert_eq!(response.articles[1].source, UNKNOWN);
    assert!(response.articles[1].description.is_empty());
}

#[tokio::test]
async fn test_top_headlines_without_category() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/news/top"))
        .and(query_param("offset", "0"))
        .and(query_param_is_missing("category"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let response = client(&server)
        .top_headlines(&HeadlinesRequest::default())
        .await
        .unwrap();

    assert!(response.articles.is_empty());
    assert_eq!(response.total_results, 0);
}

#[tokio::test]
async fn test_search_query_mapping() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/news"))
        .and(query_param("q", "climate change"))
        .and(query_param("limit", "20"))
        .and(query_param("page", "2"))
        .and(query_param("language", "en"))
        .and(query_param("sort", "latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
        .expect(1)
        .mount(&server)
        .await;

    let request = SearchRequest {
        q: "climate change".to_string(),
        language: Some("en".to_string()),
        page: 2,
        page_size: 20,
        sort_by: SortBy::Popularity,
    };
    let response = client(&server).search(&request).await.unwrap();
    assert_eq!(response.articles.len(), 2);
}

#[tokio::test]
async fn test_error_body_is_reported_as_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/news"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": {"code": "usage_limit_reached", "message": "Usage limit reached."}
        })))
        .mount(&server)
        .await;

    let request = SearchRequest {
        q: "rust".to_string(),
        ..SearchRequest::default()
    };
    let response = client(&server).search(&request).await.unwrap();
    assert_eq!(
        response.status,
        UpstreamStatus::Error {
            code: Some("usage_limit_reached".to_string()),
            message: Some("Usage limit reached.".to_string()),
        }
    );
}

#[tokio::test]
async fn test_http_error_is_propagated() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/news/top"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"code": "invalid_api_token", "message": "Invalid API token."}
        })))
        .mount(&server)
        .await;

    let result = client(&server)
        .top_headlines(&HeadlinesRequest::default())
        .await;

    match result {
        Err(NewsdeskError::ExternalService { message, .. }) => {
            assert!(message.contains("401"));
            assert!(message.contains("Invalid API token."));
        }
        other => panic!("Expected ExternalService, got {:?}", other),
    }
}

#[tokio::test]
async fn test_slow_provider_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/news/top"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(sample_body())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let result = client(&server)
        .top_headlines(&HeadlinesRequest::default())
        .await;
    assert!(matches!(result, Err(NewsdeskError::ExternalService { .. })));
}
