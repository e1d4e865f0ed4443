//! Review Engine
//!
//! Maps a rating onto a word's difficulty label and review bookkeeping.
//!
//! The transition depends only on the rating and the review time, never on
//! the word's current difficulty, so it is expressed as a [`ReviewPatch`] that
//! a store can apply in a single conditional update.

use chrono::{DateTime, Utc};

use crate::types::{Difficulty, Rating, Word};

/// Difficulty a word lands on after a review with `rating`.
///
/// `New` is never produced here.
pub fn difficulty_for(rating: Rating) -> Difficulty {
    match rating {
        Rating::Again | Rating::Hard => Difficulty::Hard,
        Rating::Good | Rating::Easy => Difficulty::Good,
    }
}

/// Field changes produced by one successful review.
///
/// Applying a patch always increments `review_count` by one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewPatch {
    pub difficulty: Difficulty,
    pub reviewed_at: DateTime<Utc>,
}

impl ReviewPatch {
    pub fn for_rating(rating: Rating, now: DateTime<Utc>) -> Self {
        Self {
            difficulty: difficulty_for(rating),
            reviewed_at: now,
        }
    }

    /// `last_reviewed` never moves backwards if the clock does.
    pub fn apply(&self, word: &Word) -> Word {
        let last_reviewed = match word.last_reviewed {
            Some(previous) if previous > self.reviewed_at => previous,
            _ => self.reviewed_at,
        };

        Word {
            difficulty: self.difficulty,
            review_count: word.review_count.saturating_add(1),
            last_reviewed: Some(last_reviewed),
            ..word.clone()
        }
    }
}

/// Returns the state of `word` after being reviewed with `rating` at `now`.
pub fn apply_review(word: &Word, rating: Rating, now: DateTime<Utc>) -> Word {
    ReviewPatch::for_rating(rating, now).apply(word)
}
