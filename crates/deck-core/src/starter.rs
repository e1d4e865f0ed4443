//! Starter-deck provisioning.
//!
//! Every new account gets its own copy of a fixed template. The template is a
//! constant table; callers pass it in so tests and alternative decks can use
//! their own.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::types::{Difficulty, Word};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarterEntry {
    pub word: &'static str,
    pub meaning: &'static str,
    pub sentence: &'static str,
}

pub const STARTER_DECK: &[StarterEntry] = &[
    StarterEntry {
        word: "Persecute",
        meaning: "To harass or treat cruelly...",
        sentence: "The regime...",
    },
    StarterEntry {
        word: "Benevolent",
        meaning: "Well meaning and kindly...",
        sentence: "A benevolent smile...",
    },
    StarterEntry {
        word: "Ostracize",
        meaning: "To exclude someone...",
        sentence: "He was ostracized...",
    },
    StarterEntry {
        word: "Ephemeral",
        meaning: "Lasting for a very short time...",
        sentence: "The beauty...",
    },
];

/// Clones `template` for `owner`, in template order, with fresh ids and
/// default review state.
pub fn provision_starter_deck(
    template: &[StarterEntry],
    owner: &str,
    now: DateTime<Utc>,
) -> Vec<Word> {
    template
        .iter()
        .map(|entry| Word {
            id: Uuid::new_v4().to_string(),
            owner: owner.to_string(),
            word: entry.word.to_string(),
            meaning: entry.meaning.to_string(),
            sentence: entry.sentence.to_string(),
            review_count: 0,
            last_reviewed: None,
            next_review_date: now,
            difficulty: Difficulty::New,
        })
        .collect()
}
