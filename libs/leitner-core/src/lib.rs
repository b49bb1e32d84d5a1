//! Leitner-style spaced repetition core.
//!
//! Provides:
//! - Sparse ([`BucketMap`]) and dense ([`DenseBuckets`]) bucket collections
//! - Practice selection and bucket re-filing ([`Leitner`])
//! - Progress statistics ([`Progress`])
//! - Shared types (Flashcard, Outcome, HistoryEntry)
//!
//! Every operation is pure: collections passed in are never mutated, and
//! updates return a fresh collection. Sharing one collection between
//! threads needs external serialization of writers.

pub mod buckets;
pub mod error;
pub mod progress;
pub mod scheduler;
pub mod types;

pub use buckets::{occupied_range, to_dense, BucketMap, DenseBuckets, OccupiedRange};
pub use error::{BucketError, Result};
pub use progress::Progress;
pub use scheduler::Leitner;
pub use types::{CardId, CardSet, Flashcard, HistoryEntry, Outcome};

/// Cards due on `day` using the default scheduler.
pub fn select_for_day(dense: &DenseBuckets<'_>, day: usize) -> CardSet {
    Leitner::default().select_for_day(dense, day)
}

/// Re-file `card` using the default scheduler.
pub fn update(sparse: &BucketMap, card: &Flashcard, outcome: Outcome) -> BucketMap {
    Leitner::default().update(sparse, card, outcome)
}

/// Progress statistics using the default mastery threshold.
pub fn compute_progress(sparse: &BucketMap, history: &[HistoryEntry]) -> Progress {
    Leitner::default().compute_progress(sparse, history)
}
