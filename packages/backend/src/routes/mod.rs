mod auth;
mod decks;
mod health;
mod review;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::de::DeserializeOwned;

use crate::middleware::auth::require_auth;
use crate::response::{json_error, AppError};
use crate::state::AppState;

const MAX_BODY_BYTES: usize = 1024 * 1024;

pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/auth/verify", get(auth::verify).fallback(fallback_handler))
        .route("/api/decks", get(decks::full).fallback(fallback_handler))
        .route(
            "/api/decks/difficult",
            get(decks::difficult).fallback(fallback_handler),
        )
        .route("/api/decks/:kind", get(decks::by_kind).fallback(fallback_handler))
        .route("/api/review", post(review::submit).fallback(fallback_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route(
            "/api/auth/register",
            post(auth::register).fallback(fallback_handler),
        )
        .route("/api/auth/login", post(auth::login).fallback(fallback_handler))
        .merge(protected)
        .nest("/health", health::router())
        .fallback(fallback_handler)
        .with_state(state)
}

/// Buffers the request body and decodes it as JSON.
async fn read_json<T: DeserializeOwned>(req: Request<Body>) -> Result<T, AppError> {
    let body = axum::body::to_bytes(req.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|_| AppError::bad_request("Invalid request body"))?;

    serde_json::from_slice(&body).map_err(|err| {
        tracing::debug!(error = %err, "rejected request payload");
        AppError::validation("Request body must be valid JSON")
    })
}

async fn fallback_handler() -> Response {
    json_error(StatusCode::NOT_FOUND, "NOT_FOUND", "Route not found").into_response()
}
