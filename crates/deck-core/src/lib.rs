//! # vocab-deck-core
//!
//! Pure domain logic for the vocab-deck flashcard service. No I/O lives here;
//! storage and transport are the backend's business.
//!
//! ## Modules
//!
//! - [`types`] - `Word`, `Difficulty`, `Rating` and their parse errors
//! - [`review`] - rating → difficulty transition and review bookkeeping
//! - [`deck`] - owner-scoped deck selection (`full` / `difficult`)
//! - [`view`] - client-side cursor over a fetched deck
//! - [`starter`] - the starter template cloned for every new user
//!
//! ## Example
//!
//! ```rust
//! use chrono::Utc;
//! use vocab_deck_core::{apply_review, provision_starter_deck, select_deck, DeckKind, Difficulty, Rating, STARTER_DECK};
//!
//! let now = Utc::now();
//! let words = provision_starter_deck(STARTER_DECK, "user-1", now);
//! let reviewed = apply_review(&words[0], Rating::Again, now);
//! assert_eq!(reviewed.difficulty, Difficulty::Hard);
//!
//! let deck = select_deck([&reviewed, &words[1]], "user-1", DeckKind::Difficult);
//! assert_eq!(deck.len(), 1);
//! ```

pub mod deck;
pub mod review;
pub mod starter;
pub mod types;
pub mod view;

pub use deck::{select_deck, DeckKind, InvalidDeckKind};
pub use review::{apply_review, difficulty_for, ReviewPatch};
pub use starter::{provision_starter_deck, StarterEntry, STARTER_DECK};
pub use types::{Difficulty, InvalidDifficulty, InvalidRating, Rating, Word};
pub use view::{DeckView, ReviewOutcome};
