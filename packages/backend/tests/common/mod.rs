#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use vocab_deck_backend::config::Config;
use vocab_deck_backend::db::DatabaseProxy;
use vocab_deck_backend::state::AppState;
use vocab_deck_core::{StarterEntry, STARTER_DECK};

pub const TEST_JWT_SECRET: &str = "test-secret-for-integration";
pub const TEST_PASSWORD: &str = "correct horse battery";

pub struct TestApp {
    pub router: Router,
    pub config: Config,
    pub db: Arc<DatabaseProxy>,
    _dir: TempDir,
}

pub fn test_config(dir: &TempDir) -> Config {
    let db_path = dir.path().join("vocab.db");
    Config::for_database(
        format!("sqlite:{}?mode=rwc", db_path.display()),
        TEST_JWT_SECRET,
    )
}

pub async fn create_test_app() -> TestApp {
    create_test_app_with_template(STARTER_DECK).await
}

/// Same as `create_test_app`, but new accounts are provisioned from `template`.
pub async fn create_test_app_with_template(template: &'static [StarterEntry]) -> TestApp {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config = test_config(&dir);
    let db = Arc::new(
        DatabaseProxy::connect(&config.database_url)
            .await
            .expect("connect database"),
    );
    let state = AppState::new(config.clone(), Arc::clone(&db)).with_starter_deck(template);
    TestApp {
        router: vocab_deck_backend::build_router(state),
        config,
        db,
        _dir: dir,
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("x-auth-token", token);
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    pub async fn register(&self, email: &str) -> StatusCode {
        let (status, _) = self
            .request(
                "POST",
                "/api/auth/register",
                None,
                Some(json!({ "email": email, "password": TEST_PASSWORD })),
            )
            .await;
        status
    }

    /// Registers a fresh account and returns its token.
    pub async fn signed_up(&self, email: &str) -> String {
        assert_eq!(self.register(email).await, StatusCode::CREATED);
        let (status, body) = self
            .request(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({ "email": email, "password": TEST_PASSWORD })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["token"].as_str().expect("token").to_string()
    }

    pub async fn deck(&self, token: &str, uri: &str) -> Vec<Value> {
        let (status, body) = self.request("GET", uri, Some(token), None).await;
        assert_eq!(status, StatusCode::OK, "deck fetch failed: {body}");
        body.as_array().cloned().expect("deck array")
    }

    pub async fn review(&self, token: &str, id: &str, rating: &str) -> (StatusCode, Value) {
        self.request(
            "POST",
            "/api/review",
            Some(token),
            Some(json!({ "id": id, "rating": rating })),
        )
        .await
    }
}
