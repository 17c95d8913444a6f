#![allow(clippy::unwrap_used)]
// Integration tests for `CatalogClient` using wiremock.

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pricepulse_api::{CatalogClient, Error, ProductCreateRequest};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, CatalogClient) {
    let server = MockServer::start().await;
    let client = CatalogClient::with_client(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn price_json(id: i64, store: &str, price: f64) -> serde_json::Value {
    json!({
        "id": id,
        "product_id": "p1",
        "store": store,
        "price": price,
        "product_url": format!("https://{store}.example/p1"),
        "fetched_at": "2024-06-15T10:30:00"
    })
}

// ── Listing ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_products() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "p1",
                "name": "Sony WH-1000XM5",
                "image_url": null,
                "created_at": "2024-06-15T10:30:00",
                "store_urls": {"amazon": "https://amazon.example/p1"},
                "disclaimer": "Prices are scraped from public listings and may change. Use responsibly."
            },
            {
                "id": "p2",
                "name": "Nike Pegasus 40",
                "created_at": "2024-06-16T08:00:00"
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let products = client.list_products().await.unwrap();

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].id, "p1");
    assert_eq!(
        products[0]
            .store_urls
            .as_ref()
            .and_then(|m| m.get("amazon"))
            .map(String::as_str),
        Some("https://amazon.example/p1")
    );
    assert!(products[0].disclaimer.as_deref().unwrap().starts_with("Prices"));
    assert!(products[1].image_url.is_none());
    assert!(products[1].store_urls.is_none());
    assert!(products[1].disclaimer.is_none());
}

// ── Detail + history ────────────────────────────────────────────────

#[tokio::test]
async fn test_get_product_with_latest_prices() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/products/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "p1",
            "name": "Sony WH-1000XM5",
            "image_url": "https://img.example/p1.png",
            "created_at": "2024-06-15T10:30:00",
            "store_urls": {"amazon": "https://amazon.example/p1"},
            "disclaimer": "Use responsibly.",
            "latest_prices": [price_json(7, "amazon", 24990.0), price_json(8, "flipkart", 25499.0)]
        })))
        .mount(&server)
        .await;

    let detail = client.get_product("p1").await.unwrap();

    assert_eq!(detail.product.id, "p1");
    assert_eq!(detail.product.disclaimer.as_deref(), Some("Use responsibly."));
    assert_eq!(detail.latest_prices.len(), 2);
    assert_eq!(detail.latest_prices[1].store, "flipkart");
    assert!((detail.latest_prices[0].price - 24990.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_get_price_history() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/products/p1/prices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "product_id": "p1",
            "history": [price_json(9, "amazon", 23990.0), price_json(7, "amazon", 24990.0)],
            "disclaimer": "Use responsibly."
        })))
        .mount(&server)
        .await;

    let history = client.get_price_history("p1").await.unwrap();

    assert_eq!(history.product_id, "p1");
    assert_eq!(history.history.len(), 2);
    assert_eq!(history.history[0].id, 9);
}

// ── Creation ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_product_posts_request_body() {
    let (server, client) = setup().await;

    let request = ProductCreateRequest {
        name: "Shoe".into(),
        image_url: None,
        store_urls: [
            ("amazon".to_owned(), "https://amazon/x".to_owned()),
            ("flipkart".to_owned(), "https://flipkart/y".to_owned()),
        ]
        .into_iter()
        .collect(),
    };

    Mock::given(method("POST"))
        .and(path("/products"))
        .and(body_json(json!({
            "name": "Shoe",
            "image_url": null,
            "store_urls": {"amazon": "https://amazon/x", "flipkart": "https://flipkart/y"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "new-1",
            "name": "Shoe",
            "image_url": null,
            "created_at": "2024-06-17T12:00:00",
            "store_urls": {"amazon": "https://amazon/x", "flipkart": "https://flipkart/y"},
            "disclaimer": "Use responsibly.",
            "latest_prices": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client.create_product(&request).await.unwrap();

    assert_eq!(created.product.id, "new-1");
    assert!(created.latest_prices.is_empty());
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_not_found_uses_detail_message() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/products/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"detail": "Product not found"})),
        )
        .mount(&server)
        .await;

    let result = client.get_product("missing").await;

    let err = result.unwrap_err();
    assert!(err.is_not_found());
    match err {
        Error::Http { status, ref message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Product not found");
        }
        other => panic!("expected Http error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_validation_error_on_create() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [{
                "loc": ["body", "name"],
                "msg": "String should have at least 2 characters",
                "type": "string_too_short"
            }]
        })))
        .mount(&server)
        .await;

    let request = ProductCreateRequest {
        name: "X".into(),
        image_url: None,
        store_urls: std::collections::HashMap::new(),
    };
    let result = client.create_product(&request).await;

    match result {
        Err(Error::Http { status: 422, ref message }) => {
            assert!(message.contains("at least 2 characters"), "got: {message}");
        }
        other => panic!("expected 422 Http error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .mount(&server)
        .await;

    let result = client.list_products().await;

    match result {
        Err(Error::Deserialization { ref message, ref body }) => {
            assert!(message.contains("body preview"), "got: {message}");
            assert!(body.contains("unexpected"));
        }
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    // Bind a listener to learn a free port, then close it.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let uri = format!("http://127.0.0.1:{port}");
    let client = CatalogClient::with_client(&uri, reqwest::Client::new()).unwrap();

    let err = client.list_products().await.unwrap_err();

    assert!(matches!(err, Error::Transport(_)), "got: {err:?}");
    assert!(err.is_connect());
}
