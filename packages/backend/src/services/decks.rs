use vocab_deck_core::{DeckKind, Word};

use super::ServiceError;
use crate::db::operations::words;
use crate::db::DatabaseProxy;

/// The caller's `kind` deck in creation order. An empty deck is a normal result.
pub async fn select_deck(
    proxy: &DatabaseProxy,
    owner: &str,
    kind: DeckKind,
) -> Result<Vec<Word>, ServiceError> {
    let stored = words::find_by_owner(proxy, owner, kind.difficulty_filter()).await?;
    let deck = vocab_deck_core::select_deck(&stored, owner, kind);

    tracing::info!(user_id = %owner, kind = %kind, count = deck.len(), "deck selected");
    Ok(deck)
}
