//! Common Types
//!
//! Shared data structures used by the review engine, deck selection and the
//! client-side deck view.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ==================== Difficulty ====================

/// Difficulty label carried by every word.
///
/// Words start as `New`; reviews only ever move them to `Hard` or `Good`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    New,
    Hard,
    Good,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Hard => "hard",
            Self::Good => "good",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty: {0}")]
pub struct InvalidDifficulty(pub String);

impl FromStr for Difficulty {
    type Err = InvalidDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "hard" => Ok(Self::Hard),
            "good" => Ok(Self::Good),
            other => Err(InvalidDifficulty(other.to_string())),
        }
    }
}

// ==================== Rating ====================

/// Recall-quality signal submitted by the learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Again,
    Hard,
    Good,
    Easy,
}

impl Rating {
    pub const ALL: [Rating; 4] = [Rating::Again, Rating::Hard, Rating::Good, Rating::Easy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Again => "again",
            Self::Hard => "hard",
            Self::Good => "good",
            Self::Easy => "easy",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("rating must be one of again, hard, good, easy (got {0:?})")]
pub struct InvalidRating(pub String);

/// Ratings are matched exactly; anything outside the closed set is rejected.
impl FromStr for Rating {
    type Err = InvalidRating;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "again" => Ok(Self::Again),
            "hard" => Ok(Self::Hard),
            "good" => Ok(Self::Good),
            "easy" => Ok(Self::Easy),
            other => Err(InvalidRating(other.to_string())),
        }
    }
}

// ==================== Word ====================

/// A vocabulary card owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub id: String,
    pub owner: String,
    pub word: String,
    pub meaning: String,
    pub sentence: String,
    pub review_count: u32,
    /// Absent until the first review.
    pub last_reviewed: Option<DateTime<Utc>>,
    /// Stamped at creation and left alone afterwards.
    pub next_review_date: DateTime<Utc>,
    pub difficulty: Difficulty,
}

impl Word {
    pub fn is_owned_by(&self, owner: &str) -> bool {
        self.owner == owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_parses_closed_set_only() {
        for rating in Rating::ALL {
            assert_eq!(rating.as_str().parse::<Rating>(), Ok(rating));
        }
        assert_eq!(
            "Good".parse::<Rating>(),
            Err(InvalidRating("Good".to_string()))
        );
        assert!("".parse::<Rating>().is_err());
        assert!("medium".parse::<Rating>().is_err());
    }

    #[test]
    fn difficulty_round_trips_through_str() {
        for difficulty in [Difficulty::New, Difficulty::Hard, Difficulty::Good] {
            assert_eq!(difficulty.as_str().parse::<Difficulty>(), Ok(difficulty));
        }
        assert!("easy".parse::<Difficulty>().is_err());
    }

    #[test]
    fn word_serializes_camel_case_with_null_last_reviewed() {
        let word = Word {
            id: "w1".to_string(),
            owner: "u1".to_string(),
            word: "Ephemeral".to_string(),
            meaning: "Lasting for a very short time...".to_string(),
            sentence: "The beauty...".to_string(),
            review_count: 0,
            last_reviewed: None,
            next_review_date: Utc::now(),
            difficulty: Difficulty::New,
        };

        let json = serde_json::to_value(&word).unwrap();
        assert_eq!(json["reviewCount"], 0);
        assert_eq!(json["difficulty"], "new");
        assert!(json["lastReviewed"].is_null());
        assert!(json["nextReviewDate"].is_string());
    }
}
