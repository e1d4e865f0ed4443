use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use vocab_deck_core::DeckKind;

use crate::auth::AuthUser;
use crate::response::AppError;
use crate::services::decks;
use crate::state::AppState;

pub async fn full(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Response, AppError> {
    deck_response(&state, &user, DeckKind::Full).await
}

pub async fn difficult(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Response, AppError> {
    deck_response(&state, &user, DeckKind::Difficult).await
}

pub async fn by_kind(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(kind): Path<String>,
) -> Result<Response, AppError> {
    let kind = kind
        .parse::<DeckKind>()
        .map_err(|err| AppError::bad_request(err.to_string()))?;
    deck_response(&state, &user, kind).await
}

async fn deck_response(
    state: &AppState,
    user: &AuthUser,
    kind: DeckKind,
) -> Result<Response, AppError> {
    let proxy = state.db_proxy();
    let words = decks::select_deck(proxy.as_ref(), &user.id, kind).await?;
    Ok(Json(words).into_response())
}
