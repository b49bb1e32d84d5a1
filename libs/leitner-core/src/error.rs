//! Error types for leitner-core.

use thiserror::Error;

use crate::types::CardId;

/// Result type alias using BucketError.
pub type Result<T> = std::result::Result<T, BucketError>;

/// Errors reported by the bucket scheduler.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BucketError {
    #[error("invalid outcome: {0}")]
    InvalidOutcome(String),

    #[error("card {card} is filed in both bucket {first} and bucket {second}")]
    MalformedBucketCollection {
        card: CardId,
        first: u32,
        second: u32,
    },
}
