//! API integration tests

use book_catalog_server::{api, AppConfig, AppState};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

/// Start a server on an ephemeral port and return its base URL
async fn spawn_server(config: AppConfig) -> String {
    let app = api::create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    format!("http://{}", addr)
}

async fn create_book(client: &Client, base_url: &str, body: Value) -> Value {
    let response = client
        .post(format!("{}/book", base_url))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.expect("Failed to parse response")
}

#[tokio::test]
async fn test_create_book() {
    let base_url = spawn_server(AppConfig::default()).await;
    let client = Client::new();

    let body = create_book(&client, &base_url, json!({"title": "Dune", "author": "Herbert"})).await;

    assert!(!body["id"].as_str().expect("No book ID").is_empty());
    assert_eq!(body["title"], "Dune");
    assert_eq!(body["author"], "Herbert");
    assert_eq!(body["description"], "");
    assert_eq!(body["coverImageUrl"], "");
}

#[tokio::test]
async fn test_create_then_get() {
    let base_url = spawn_server(AppConfig::default()).await;
    let client = Client::new();

    let created = create_book(
        &client,
        &base_url,
        json!({
            "title": "The Hobbit",
            "author": "J.R.R. Tolkien",
            "description": "There and back again",
            "coverImageUrl": "https://covers.openlibrary.org/b/id/6979861-L.jpg"
        }),
    )
    .await;

    let response = client
        .get(format!("{}/book/{}", base_url, created["id"].as_str().unwrap()))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let fetched: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_get_unknown_book() {
    let base_url = spawn_server(AppConfig::default()).await;
    let client = Client::new();

    let response = client
        .get(format!("{}/book/doesnotexist", base_url))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({"error": "Book with ID doesnotexist not found"}));
}

#[tokio::test]
async fn test_update_title_keeps_author() {
    let base_url = spawn_server(AppConfig::default()).await;
    let client = Client::new();

    let created = create_book(&client, &base_url, json!({"title": "Dune", "author": "Herbert"})).await;

    let response = client
        .put(format!("{}/book/{}", base_url, created["id"].as_str().unwrap()))
        .json(&json!({"title": "Dune 2"}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["title"], "Dune 2");
    assert_eq!(body["author"], "Herbert");
}

#[tokio::test]
async fn test_delete_twice() {
    let base_url = spawn_server(AppConfig::default()).await;
    let client = Client::new();

    let created = create_book(&client, &base_url, json!({"title": "Dune", "author": "Herbert"})).await;
    let url = format!("{}/book/{}", base_url, created["id"].as_str().unwrap());

    let response = client.delete(&url).send().await.expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = client.delete(&url).send().await.expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_preflight() {
    let base_url = spawn_server(AppConfig::default()).await;
    let client = Client::new();

    let response = client
        .request(reqwest::Method::OPTIONS, format!("{}/book", base_url))
        .header("Origin", "http://localhost:3000")
        .header("Access-Control-Request-Method", "POST")
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-methods"], "GET, POST, PUT, DELETE");
    assert_eq!(headers["access-control-allow-headers"], "Content-Type");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates() {
    let base_url = spawn_server(AppConfig::default()).await;
    let client = Client::new();

    let handles: Vec<_> = (0..32)
        .map(|i| {
            let client = client.clone();
            let base_url = base_url.clone();
            tokio::spawn(async move {
                create_book(&client, &base_url, json!({"title": format!("Book {}", i), "author": "Anon"})).await
            })
        })
        .collect();

    let mut ids = std::collections::HashSet::new();
    for handle in handles {
        let book = handle.await.expect("Task failed");
        ids.insert(book["id"].as_str().unwrap().to_string());
    }
    assert_eq!(ids.len(), 32);

    let response = client
        .get(format!("{}/book", base_url))
        .send()
        .await
        .expect("Failed to send request");
    let books: Vec<Value> = response.json().await.expect("Failed to parse response");
    assert_eq!(books.len(), 32);
}
