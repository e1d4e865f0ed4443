use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use super::read_json;
use crate::auth::AuthUser;
use crate::response::AppError;
use crate::services::accounts::{self, Credentials};
use crate::services::ServiceError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct CredentialsRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Serialize)]
struct MessageResponse {
    success: bool,
    message: &'static str,
}

#[derive(Serialize)]
struct LoginResponse {
    token: String,
    user: AuthUser,
}

#[derive(Serialize)]
struct VerifyResponse {
    success: bool,
    data: VerifyData,
}

#[derive(Serialize)]
struct VerifyData {
    user: AuthUser,
}

pub async fn register(
    State(state): State<AppState>,
    req: Request<Body>,
) -> Result<Response, AppError> {
    let payload: CredentialsRequest = read_json(req).await?;
    let credentials = Credentials::normalized(&payload.email, &payload.password)?;

    let proxy = state.db_proxy();
    accounts::register(
        proxy.as_ref(),
        state.config(),
        state.starter_deck(),
        &credentials,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            success: true,
            message: "User created successfully!",
        }),
    )
        .into_response())
}

pub async fn login(
    State(state): State<AppState>,
    req: Request<Body>,
) -> Result<Response, AppError> {
    let payload: CredentialsRequest = read_json(req).await?;
    // Malformed emails cannot belong to an account; answer like any other bad login.
    let credentials = Credentials::normalized(&payload.email, &payload.password)
        .map_err(|_| ServiceError::InvalidCredentials)?;

    let proxy = state.db_proxy();
    let session = accounts::login(proxy.as_ref(), state.config(), &credentials).await?;

    Ok(Json(LoginResponse {
        token: session.token,
        user: session.user,
    })
    .into_response())
}

pub async fn verify(Extension(user): Extension<AuthUser>) -> Response {
    Json(VerifyResponse {
        success: true,
        data: VerifyData { user },
    })
    .into_response()
}
