//! Deck Selector
//!
//! A deck is a named, owner-scoped view over a user's words. Selection keeps
//! the order it is given, which callers supply in creation order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Difficulty, Word};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeckKind {
    #[default]
    Full,
    Difficult,
}

impl DeckKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Difficult => "difficult",
        }
    }

    /// Difficulty a store should filter on, if any.
    pub fn difficulty_filter(&self) -> Option<Difficulty> {
        match self {
            Self::Full => None,
            Self::Difficult => Some(Difficulty::Hard),
        }
    }

    pub fn includes(&self, word: &Word) -> bool {
        self.difficulty_filter()
            .map_or(true, |difficulty| word.difficulty == difficulty)
    }
}

impl fmt::Display for DeckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("deck must be one of full, difficult (got {0:?})")]
pub struct InvalidDeckKind(pub String);

impl FromStr for DeckKind {
    type Err = InvalidDeckKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(Self::Full),
            "difficult" => Ok(Self::Difficult),
            other => Err(InvalidDeckKind(other.to_string())),
        }
    }
}

/// Words owned by `owner` that belong in a `kind` deck, in input order.
///
/// Words belonging to anyone else are dropped even if the caller passed them
/// in, so a deck can never leak another user's cards.
pub fn select_deck<'a, I>(words: I, owner: &str, kind: DeckKind) -> Vec<Word>
where
    I: IntoIterator<Item = &'a Word>,
{
    words
        .into_iter()
        .filter(|word| word.is_owned_by(owner) && kind.includes(word))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use proptest::prelude::*;

    fn word(id: &str, owner: &str, difficulty: Difficulty) -> Word {
        Word {
            id: id.to_string(),
            owner: owner.to_string(),
            word: format!("word-{id}"),
            meaning: String::new(),
            sentence: String::new(),
            review_count: 0,
            last_reviewed: None,
            next_review_date: Utc::now(),
            difficulty,
        }
    }

    #[test]
    fn full_deck_keeps_order_and_owner() {
        let words = vec![
            word("1", "a", Difficulty::New),
            word("2", "b", Difficulty::Hard),
            word("3", "a", Difficulty::Hard),
            word("4", "a", Difficulty::Good),
        ];

        let deck = select_deck(&words, "a", DeckKind::Full);
        let ids: Vec<_> = deck.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, ["1", "3", "4"]);
    }

    #[test]
    fn difficult_deck_only_has_hard_words() {
        let words = vec![
            word("1", "a", Difficulty::New),
            word("2", "a", Difficulty::Hard),
            word("3", "a", Difficulty::Good),
            word("4", "a", Difficulty::Hard),
        ];

        let deck = select_deck(&words, "a", DeckKind::Difficult);
        let ids: Vec<_> = deck.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, ["2", "4"]);
    }

    #[test]
    fn empty_selection_is_not_an_error() {
        let words = vec![word("1", "a", Difficulty::Good)];
        assert!(select_deck(&words, "a", DeckKind::Difficult).is_empty());
        assert!(select_deck(&words, "nobody", DeckKind::Full).is_empty());
    }

    #[test]
    fn deck_kind_parses() {
        assert_eq!("full".parse::<DeckKind>(), Ok(DeckKind::Full));
        assert_eq!("difficult".parse::<DeckKind>(), Ok(DeckKind::Difficult));
        assert!("hard".parse::<DeckKind>().is_err());
    }

    fn arb_words() -> impl Strategy<Value = Vec<Word>> {
        prop::collection::vec(
            (
                prop::sample::select(vec!["a", "b", "c"]),
                prop::sample::select(vec![Difficulty::New, Difficulty::Hard, Difficulty::Good]),
            ),
            0..40,
        )
        .prop_map(|specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (owner, difficulty))| word(&i.to_string(), owner, difficulty))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn selection_is_owner_isolated_and_idempotent(words in arb_words()) {
            for kind in [DeckKind::Full, DeckKind::Difficult] {
                let first = select_deck(&words, "a", kind);
                let second = select_deck(&words, "a", kind);

                prop_assert!(first.iter().all(|w| w.owner == "a"));
                prop_assert!(first.iter().all(|w| kind.includes(w)));
                prop_assert_eq!(&first, &second);
            }

            let full = select_deck(&words, "a", DeckKind::Full);
            let difficult = select_deck(&words, "a", DeckKind::Difficult);
            let expected: Vec<Word> = full
                .iter()
                .filter(|w| w.difficulty == Difficulty::Hard)
                .cloned()
                .collect();
            prop_assert_eq!(difficult, expected);
        }
    }
}
