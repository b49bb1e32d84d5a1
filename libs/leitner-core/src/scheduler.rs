//! Leitner bucket scheduler.
//!
//! Only the bucket whose index equals the day number is due; this is not
//! the divisor rule of the textbook Leitner system.

use serde::{Deserialize, Serialize};

use crate::buckets::{BucketMap, DenseBuckets};
use crate::error::Result;
use crate::progress::{self, Progress};
use crate::types::{CardSet, Flashcard, HistoryEntry, Outcome};

/// Leitner scheduler with configurable parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Leitner {
    /// Cards in this bucket or higher count as mastered.
    pub mastery_threshold: u32,
}

impl Default for Leitner {
    fn default() -> Self {
        Self {
            mastery_threshold: 2,
        }
    }
}

impl Leitner {
    /// Cards due on `day`, as a fresh set the caller may mutate freely.
    pub fn select_for_day(&self, dense: &DenseBuckets<'_>, day: usize) -> CardSet {
        let due = dense.get(day).cloned().unwrap_or_default();
        tracing::trace!(day, due = due.len(), "selected cards for practice");
        due
    }

    /// Re-file `card` according to `outcome`, returning a new collection.
    ///
    /// `sparse` and its sets are left untouched.
    pub fn update(&self, sparse: &BucketMap, card: &Flashcard, outcome: Outcome) -> BucketMap {
        let mut next = sparse.clone();
        let current = next.take(card);
        let destination = Self::destination(current, outcome);

        tracing::debug!(
            card = %card.id(),
            %outcome,
            from = ?current,
            to = destination,
            "re-filed card"
        );

        next.insert(destination, card.clone());
        next
    }

    /// Like [`Leitner::update`], but parses the outcome first.
    ///
    /// Unknown outcomes fail with `InvalidOutcome` before any copy is made.
    pub fn update_raw(&self, sparse: &BucketMap, card: &Flashcard, outcome: &str) -> Result<BucketMap> {
        let outcome: Outcome = outcome.parse()?;
        Ok(self.update(sparse, card, outcome))
    }

    /// Summary statistics for `sparse`. `history` is currently unused.
    pub fn compute_progress(&self, sparse: &BucketMap, _history: &[HistoryEntry]) -> Progress {
        progress::aggregate(sparse, self.mastery_threshold)
    }

    fn destination(current: Option<u32>, outcome: Outcome) -> u32 {
        match (outcome, current) {
            (Outcome::Wrong, _) => 0,
            (Outcome::Hard, Some(bucket)) => bucket,
            (Outcome::Easy, Some(bucket)) => bucket.saturating_add(1),
            // Unseen cards start at bucket 0 whatever the answer.
            (Outcome::Hard | Outcome::Easy, None) => 0,
        }
    }
}
