use std::sync::Arc;

use tinylink::{
    client::{ApiClient, ClientError},
    config::AppConfig,
    id::RandomIdGenerator,
    service::LinkService,
    store::MemoryStore,
    view::LinkBook,
    AppState,
};

/// Serve a memory-backed app on an ephemeral port and return its base URL.
async fn spawn_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let lookup_base = base_url.clone();
    let config = AppConfig::from_lookup(move |key| match key {
        "BASE_URL" => Some(lookup_base.clone()),
        "STORE_BACKEND" => Some("memory".to_owned()),
        _ => None,
    })
    .unwrap();
    let service = LinkService::new(
        Arc::new(MemoryStore::new()),
        Arc::new(RandomIdGenerator::default()),
    );
    let app = tinylink::app(Arc::new(AppState::new(service, config)));

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    base_url
}

#[tokio::test]
async fn client_round_trip() {
    let base_url = spawn_server().await;
    let client = ApiClient::new(&base_url);

    let created = client.shorten("http://example.com").await.unwrap();
    assert_eq!(created.id.len(), 8);
    assert_eq!(created.short_url, format!("{base_url}/{}", created.id));

    let fetched = client.get(&created.id).await.unwrap();
    assert_eq!(fetched, created);

    let updated = client
        .update(&created.id, "http://example.org")
        .await
        .unwrap();
    assert_eq!(updated.original_url, "http://example.org");
    assert_eq!(updated.created_at, created.created_at);

    assert_eq!(client.list().await.unwrap(), vec![updated]);

    client.delete(&created.id).await.unwrap();
    assert!(matches!(
        client.get(&created.id).await,
        Err(ClientError::NotFound)
    ));
}

#[tokio::test]
async fn client_surfaces_validation_errors() {
    let base_url = spawn_server().await;
    let client = ApiClient::new(base_url);

    match client.shorten("not a url").await {
        Err(ClientError::Status { status, message }) => {
            assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
            assert!(message.contains("http://"));
        }
        other => panic!("expected a 400, got {other:?}"),
    }
}

#[tokio::test]
async fn link_book_reconciles_from_server() {
    let base_url = spawn_server().await;
    let client = ApiClient::new(&base_url);
    let mut book = LinkBook::new();

    let id = book
        .shorten(&client, "  http://example.com  ")
        .await
        .unwrap()
        .id
        .clone();
    // the server trimmed the input; the book shows what was stored
    assert_eq!(book.get(&id).unwrap().original_url, "http://example.com");

    book.update(&client, &id, "http://example.org").await.unwrap();
    assert_eq!(book.len(), 1);
    assert_eq!(book.get(&id).unwrap().original_url, "http://example.org");

    // another client deletes behind our back
    client.delete(&id).await.unwrap();
    assert!(matches!(
        book.update(&client, &id, "http://example.net").await,
        Err(ClientError::NotFound)
    ));
    assert!(book.is_empty());

    let other = client.shorten("http://rust-lang.org").await.unwrap();
    book.refresh(&client).await.unwrap();
    assert_eq!(book.links(), &[other.clone()][..]);

    book.delete(&client, &other.id).await.unwrap();
    assert!(book.is_empty());
    assert!(client.list().await.unwrap().is_empty());
}
