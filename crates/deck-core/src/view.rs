//! Deck View
//!
//! Client-side cursor over a fetched deck. After each review the view is
//! patched locally instead of re-fetching: in a `difficult` deck a word that
//! is no longer `hard` drops out at once, otherwise the cursor moves on.

use crate::deck::DeckKind;
use crate::types::{Difficulty, Word};

/// What a review result did to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewOutcome {
    /// The reviewed word left the deck; the next card slid into its place.
    Removed,
    /// The word stayed and the cursor moved forward (or stayed on the last card).
    Advanced,
}

#[derive(Debug, Clone)]
pub struct DeckView {
    kind: DeckKind,
    words: Vec<Word>,
    index: usize,
}

impl DeckView {
    pub fn new(kind: DeckKind, words: Vec<Word>) -> Self {
        Self {
            kind,
            words,
            index: 0,
        }
    }

    pub fn kind(&self) -> DeckKind {
        self.kind
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn position(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&Word> {
        self.words.get(self.index)
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.words.len()
    }

    /// Moves forward one card; no wrap-around.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Moves back one card; no wrap-around.
    pub fn previous(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Folds a review result returned by the server into the view.
    pub fn apply_review_result(&mut self, updated: &Word) -> ReviewOutcome {
        if self.kind == DeckKind::Difficult && updated.difficulty != Difficulty::Hard {
            self.words.retain(|word| word.id != updated.id);
            if self.index >= self.words.len() {
                self.index = 0;
            }
            return ReviewOutcome::Removed;
        }

        if let Some(slot) = self.words.iter_mut().find(|word| word.id == updated.id) {
            *slot = updated.clone();
        }
        self.next();
        ReviewOutcome::Advanced
    }

    /// A failed review still moves the learner on to the next card.
    pub fn skip_failed_review(&mut self) {
        self.next();
    }
}
