use std::net::SocketAddr;

use vocab_deck_backend::client::{ApiClient, ClientError};
use vocab_deck_core::{DeckKind, DeckView, Difficulty, Rating, ReviewOutcome};

mod common;

async fn spawn_server() -> (SocketAddr, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = common::test_config(&dir);
    let app = vocab_deck_backend::create_app(config)
        .await
        .expect("create app");

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (addr, dir)
}

#[tokio::test]
async fn test_client_login_and_fetch() {
    let (addr, _dir) = spawn_server().await;
    let mut client = ApiClient::new(format!("http://{addr}")).unwrap();

    client
        .register("client@example.com", common::TEST_PASSWORD)
        .await
        .expect("register");
    let user = client
        .login("client@example.com", common::TEST_PASSWORD)
        .await
        .expect("login");
    assert_eq!(user.email, "client@example.com");
    assert!(client.token().is_some());

    let deck = client.fetch_deck(DeckKind::Full).await.expect("deck");
    assert_eq!(deck.len(), 4);
}

#[tokio::test]
async fn test_client_surfaces_api_errors() {
    let (addr, _dir) = spawn_server().await;
    let mut client = ApiClient::new(format!("http://{addr}")).unwrap();

    let err = client
        .login("ghost@example.com", "whatever")
        .await
        .unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Invalid credentials");
        }
        other => panic!("unexpected error: {other}"),
    }

    let stale = ApiClient::new(format!("http://{addr}"))
        .unwrap()
        .with_token("expired.or.forged");
    let err = stale.fetch_deck(DeckKind::Full).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 401, .. }));
}

#[tokio::test]
async fn test_difficult_session_converges() {
    let (addr, _dir) = spawn_server().await;
    let mut client = ApiClient::new(format!("http://{addr}")).unwrap();
    client
        .register("session@example.com", common::TEST_PASSWORD)
        .await
        .unwrap();
    client
        .login("session@example.com", common::TEST_PASSWORD)
        .await
        .unwrap();

    // Mark three words as hard from the full deck.
    let mut full = DeckView::new(DeckKind::Full, client.fetch_deck(DeckKind::Full).await.unwrap());
    for _ in 0..3 {
        let id = full.current().unwrap().id.clone();
        let updated = client.review(&id, Rating::Again).await.unwrap();
        assert_eq!(updated.difficulty, Difficulty::Hard);
        assert_eq!(full.apply_review_result(&updated), ReviewOutcome::Advanced);
    }
    assert_eq!(full.position(), 3);

    let mut difficult = DeckView::new(
        DeckKind::Difficult,
        client.fetch_deck(DeckKind::Difficult).await.unwrap(),
    );
    assert_eq!(difficult.len(), 3);

    // A word that stays hard keeps its place; the cursor moves on.
    let first = difficult.current().unwrap().id.clone();
    let updated = client.review(&first, Rating::Hard).await.unwrap();
    assert_eq!(difficult.apply_review_result(&updated), ReviewOutcome::Advanced);
    assert_eq!(difficult.len(), 3);

    let mut rounds = 0;
    while let Some(word) = difficult.current().cloned() {
        let updated = client.review(&word.id, Rating::Easy).await.unwrap();
        assert_eq!(difficult.apply_review_result(&updated), ReviewOutcome::Removed);
        rounds += 1;
        assert!(rounds <= 3, "session did not converge");
    }

    assert!(difficult.is_empty());
    assert!(client
        .fetch_deck(DeckKind::Difficult)
        .await
        .unwrap()
        .is_empty());
}
