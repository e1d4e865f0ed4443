use chrono::Utc;
use uuid::Uuid;
use vocab_deck_core::{Rating, ReviewPatch, Word};

use super::ServiceError;
use crate::db::operations::words;
use crate::db::DatabaseProxy;

/// Validates the raw `{ id, rating }` pair from the wire.
pub fn parse_review_input(word_id: &str, rating: &str) -> Result<(String, Rating), ServiceError> {
    let word_id = word_id.trim();
    if word_id.is_empty() {
        return Err(ServiceError::InvalidInput("id is required".to_string()));
    }
    let word_id = Uuid::parse_str(word_id)
        .map_err(|_| ServiceError::InvalidInput("id is not a valid word id".to_string()))?;

    let rating = rating
        .parse::<Rating>()
        .map_err(|err| ServiceError::InvalidInput(err.to_string()))?;

    Ok((word_id.hyphenated().to_string(), rating))
}

/// Records one review of `word_id` by `caller_id` and returns the updated word.
pub async fn review_word(
    proxy: &DatabaseProxy,
    caller_id: &str,
    word_id: &str,
    rating: Rating,
) -> Result<Word, ServiceError> {
    let patch = ReviewPatch::for_rating(rating, Utc::now());

    let Some(updated) = words::update_if_owner(proxy, word_id, caller_id, &patch).await? else {
        tracing::info!(user_id = %caller_id, word_id = %word_id, "review target not found");
        return Err(ServiceError::NotFound);
    };

    tracing::info!(
        user_id = %caller_id,
        word_id = %word_id,
        rating = %rating,
        difficulty = %updated.difficulty,
        review_count = updated.review_count,
        "word reviewed"
    );

    Ok(updated)
}
