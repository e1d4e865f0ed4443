use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use vocab_deck_core::Word;

use super::read_json;
use crate::auth::AuthUser;
use crate::response::AppError;
use crate::services::review;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct ReviewRequest {
    #[serde(default)]
    id: String,
    #[serde(default)]
    rating: String,
}

#[derive(Serialize)]
struct ReviewResponse {
    status: &'static str,
    message: String,
    data: Word,
}

pub async fn submit(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    req: Request<Body>,
) -> Result<Response, AppError> {
    let payload: ReviewRequest = read_json(req).await?;
    let (word_id, rating) = review::parse_review_input(&payload.id, &payload.rating)?;

    let proxy = state.db_proxy();
    let updated = review::review_word(proxy.as_ref(), &user.id, &word_id, rating).await?;

    Ok(Json(ReviewResponse {
        status: "success",
        message: format!("Updated {}", updated.word),
        data: updated,
    })
    .into_response())
}
