use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::sync::mpsc;

use shopfront_client::{
    load_catalog, CatalogController, ClientConfig, HeadlessRenderer, HttpCatalogSource, LoadError,
    UiEvent, ViewState,
};
use shopfront_products::{CategoryFilter, Price};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        let app = Router::new()
            .route("/products.json", get(|| async { Json(products()) }))
            .route("/broken.json", get(|| async { "{\"products\": oops" }))
            .route("/object.json", get(|| async { Json(json!({"products": []})) }))
            .route(
                "/down.json",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "database offline") }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn source(&self, path: &str) -> HttpCatalogSource {
        HttpCatalogSource::new(format!("{}{}", self.base_url, path))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn products() -> Value {
    json!([
        {"name": "Air Max", "brand": "Nike", "category": "shoes", "price": 8000, "rating": 4.5, "image": "a.jpg"},
        {"name": "Ultraboost", "brand": "Adidas", "category": "shoes", "price": 12000, "rating": 4.7, "image": "b.jpg"},
        {"name": "Seamaster", "brand": "Omega", "category": "watches", "price": 450000, "rating": 4.9, "image": "c.jpg"},
        {"name": "Broken", "brand": "Nobody", "category": "shoes", "rating": 1.0, "image": "d.jpg"}
    ])
}

#[tokio::test]
async fn loads_catalog_over_http_skipping_bad_records() {
    let server = TestServer::spawn().await;

    let catalog = load_catalog(&server.source("/products.json")).await.unwrap();
    let names: Vec<&str> = catalog.iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["Air Max", "Ultraboost", "Seamaster"]);
}

#[tokio::test]
async fn non_success_status_is_a_load_error() {
    let server = TestServer::spawn().await;

    let err = load_catalog(&server.source("/down.json")).await.unwrap_err();
    assert_eq!(err, LoadError::Status(500));

    let err = load_catalog(&server.source("/missing.json")).await.unwrap_err();
    assert_eq!(err, LoadError::Status(404));
}

#[tokio::test]
async fn undecodable_payloads_are_load_errors() {
    let server = TestServer::spawn().await;

    let err = load_catalog(&server.source("/broken.json")).await.unwrap_err();
    assert!(matches!(err, LoadError::Parse(_)));

    let err = load_catalog(&server.source("/object.json")).await.unwrap_err();
    assert!(matches!(err, LoadError::Malformed(_)));
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = HttpCatalogSource::new(format!("http://{}/products.json", addr));
    let err = load_catalog(&source).await.unwrap_err();
    assert!(matches!(err, LoadError::Network(_)));
}

#[tokio::test]
async fn controller_browses_http_catalog() {
    let server = TestServer::spawn().await;
    let source = server.source("/products.json");

    let config = ClientConfig::default()
        .with_loading_delay(Duration::ZERO)
        .with_debounce(Duration::from_millis(20));
    let controller = CatalogController::new(config, HeadlessRenderer::new());

    let (tx, rx) = mpsc::channel(16);
    let events = tokio::spawn(async move {
        // Give the load a head start; input before it lands is not filtered.
        tokio::time::sleep(Duration::from_millis(200)).await;
        tx.send(UiEvent::CategoryChanged(CategoryFilter::parse("shoes"))).await.unwrap();
        tx.send(UiEvent::MaxPriceChanged(Price::new(10000))).await.unwrap();
        tx.send(UiEvent::QueryInput("air".to_string())).await.unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;
    });

    let controller = controller.run(&source, rx).await;
    events.await.unwrap();

    let state = controller.state();
    assert!(state.is_loaded());
    assert_eq!(state.view_state(), &ViewState::Populated);
    assert_eq!(state.filter_runs(), 3);

    let last = controller.renderer().last().unwrap();
    assert_eq!(last.cards.len(), 1);
    assert_eq!(last.cards[0].name, "Air Max");
    assert_eq!(last.cards[0].price_label, "₹8,000");
    assert_eq!(last.price_label, "10,000");
}

#[tokio::test]
async fn controller_shows_error_when_server_fails() {
    let server = TestServer::spawn().await;
    let source = server.source("/down.json");

    let controller = CatalogController::new(ClientConfig::default(), HeadlessRenderer::new());
    let (tx, rx) = mpsc::channel::<UiEvent>(1);
    drop(tx);

    let controller = controller.run(&source, rx).await;
    let frames = controller.renderer().frames();
    assert_eq!(frames[0].state, ViewState::Loading);
    assert!(frames.last().unwrap().state.is_error());
    assert!(frames.iter().all(|f| f.cards.is_empty()));
}
