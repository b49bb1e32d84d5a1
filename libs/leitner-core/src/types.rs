//! Core types for the bucket scheduler.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::BucketError;

/// Set of cards filed in one bucket.
pub type CardSet = HashSet<Flashcard>;

/// Identity of a flashcard, assigned once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(Uuid);

impl CardId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// An immutable flashcard.
///
/// Equality and hashing only look at the card's [`CardId`]: two cards built
/// separately from the same text are different cards, while clones of one
/// card are the same card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flashcard {
    id: CardId,
    front: String,
    back: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<String>,
    #[serde(default)]
    tags: BTreeSet<String>,
}

impl Flashcard {
    /// Create a card with no hint and no tags.
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            id: CardId::new(),
            front: front.into(),
            back: back.into(),
            hint: None,
            tags: BTreeSet::new(),
        }
    }

    /// Builder-style hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Builder-style tags.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn front(&self) -> &str {
        &self.front
    }

    pub fn back(&self) -> &str {
        &self.back
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }
}

impl PartialEq for Flashcard {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Flashcard {}

impl Hash for Flashcard {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Learner's self-reported difficulty for one review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Wrong,
    Hard,
    Easy,
}

impl Outcome {
    /// Convert to 3-point numeric value (1-3).
    pub fn to_value(self) -> u8 {
        match self {
            Self::Wrong => 1,
            Self::Hard => 2,
            Self::Easy => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wrong => "wrong",
            Self::Hard => "hard",
            Self::Easy => "easy",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for Outcome {
    type Error = BucketError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Wrong),
            2 => Ok(Self::Hard),
            3 => Ok(Self::Easy),
            other => Err(BucketError::InvalidOutcome(other.to_string())),
        }
    }
}

impl FromStr for Outcome {
    type Err = BucketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wrong" => Ok(Self::Wrong),
            "hard" => Ok(Self::Hard),
            "easy" => Ok(Self::Easy),
            _ => Err(BucketError::InvalidOutcome(s.to_string())),
        }
    }
}

/// One past practice event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub card: Flashcard,
    pub outcome: Outcome,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// Record a practice event happening now.
    pub fn new(card: Flashcard, outcome: Outcome) -> Self {
        Self::at(card, outcome, Utc::now())
    }

    pub fn at(card: Flashcard, outcome: Outcome, timestamp: DateTime<Utc>) -> Self {
        Self {
            card,
            outcome,
            timestamp,
        }
    }
}
