#![allow(clippy::unwrap_used)]
// Integration tests for `SearchClient` using wiremock.

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pricepulse_api::{Error, SearchClient, TransportConfig};

async fn setup(key: &str) -> (MockServer, SearchClient) {
    let server = MockServer::start().await;
    let client = SearchClient::from_api_key(
        &server.uri(),
        &SecretString::from(key.to_owned()),
        &TransportConfig::default(),
    )
    .unwrap();
    (server, client)
}

#[tokio::test]
async fn test_search_sends_key_and_params() {
    let (server, client) = setup("k-123").await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(header("X-API-KEY", "k-123"))
        .and(query_param("q", "headphones"))
        .and(query_param("category", "Electronics"))
        .and(query_param("stores", "amazon,flipkart,myntra"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{
                "id": "sony-xm5",
                "title": "Sony WH-1000XM5",
                "image_url": "https://example.com/images/sony-xm5.png",
                "offers": [
                    {
                        "store": "Amazon",
                        "price": "₹24,990",
                        "shipping": "₹0",
                        "offer": "-₹2,000",
                        "deep_link": "https://www.amazon.in/"
                    }
                ],
                "price_history": {"current": "₹23,990", "lowest_30d": "₹22,500"}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client
        .search("headphones", "Electronics", &["amazon", "flipkart", "myntra"])
        .await
        .unwrap();

    assert_eq!(response.results.len(), 1);
    let product = &response.results[0];
    assert_eq!(product.id, "sony-xm5");
    assert_eq!(product.offers[0].store, "Amazon");
    assert_eq!(product.offers[0].price, "₹24,990");
    assert_eq!(product.price_history.lowest_30d, "₹22,500");
}

#[tokio::test]
async fn test_search_empty_results() {
    let (server, client) = setup("k-123").await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .mount(&server)
        .await;

    let response = client.search("nothing", "All", &["amazon"]).await.unwrap();

    assert!(response.results.is_empty());
}

#[tokio::test]
async fn test_search_rejected_key() {
    let (server, client) = setup("wrong").await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid API key"})))
        .mount(&server)
        .await;

    let err = client.search("shoes", "All", &["myntra"]).await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    match err {
        Error::Http { ref message, .. } => assert_eq!(message, "Invalid API key"),
        other => panic!("expected Http error, got: {other:?}"),
    }
}

#[test]
fn test_key_with_newline_is_rejected() {
    let result = SearchClient::from_api_key(
        "http://127.0.0.1:8000/",
        &SecretString::from("bad\nkey".to_owned()),
        &TransportConfig::default(),
    );

    assert!(matches!(result, Err(Error::InvalidApiKey { .. })));
}
