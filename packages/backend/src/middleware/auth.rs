use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::auth::AuthError;
use crate::response::AppError;
use crate::state::AppState;

/// Resolves the caller from the request token and stores it as an `AuthUser`
/// extension; handlers read it from there and pass the id on explicitly.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let Some(token) = crate::auth::extract_token(req.headers()) else {
        return AppError::unauthorized("No token, authorization denied").into_response();
    };

    match crate::auth::verify_token(&state.config().jwt, &token) {
        Ok(user) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Err(AuthError::MissingSecret) => {
            AppError::internal("JWT_SECRET is not configured").into_response()
        }
        Err(err) => {
            tracing::debug!(error = %err, path = %req.uri().path(), "token rejected");
            AppError::unauthorized("Token is not valid").into_response()
        }
    }
}
