//! Progress aggregation over a bucket collection.

use serde::{Deserialize, Serialize};

use crate::buckets::BucketMap;

/// Summary statistics for one bucket collection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub total_cards: usize,
    /// Cards at or above the mastery threshold.
    pub mastered_cards: usize,
    /// Cards in bucket 0.
    pub struggling_cards: usize,
    /// Mean bucket number, 0.0 for an empty collection.
    pub average_bucket: f64,
}

pub(crate) fn aggregate(sparse: &BucketMap, mastery_threshold: u32) -> Progress {
    let mut total_cards = 0;
    let mut total_bucket_sum: u64 = 0;

    for (_, set) in sparse.iter() {
        total_cards += set.len();
        for card in set {
            if let Some(bucket) = sparse.bucket_of(card) {
                total_bucket_sum += u64::from(bucket);
            }
        }
    }

    let mastered_cards = sparse
        .iter()
        .filter(|(bucket, _)| *bucket >= mastery_threshold)
        .map(|(_, set)| set.len())
        .sum();
    let struggling_cards = sparse.get(0).map_or(0, |set| set.len());

    let average_bucket = if total_cards > 0 {
        total_bucket_sum as f64 / total_cards as f64
    } else {
        0.0
    };

    Progress {
        total_cards,
        mastered_cards,
        struggling_cards,
        average_bucket,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Flashcard;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_collection_has_zero_average() {
        let progress = aggregate(&BucketMap::new(), 2);
        assert_eq!(
            progress,
            Progress {
                total_cards: 0,
                mastered_cards: 0,
                struggling_cards: 0,
                average_bucket: 0.0,
            }
        );
    }

    #[test]
    fn empty_buckets_count_nothing() {
        let mut map = BucketMap::new();
        map.insert_empty(0);
        map.insert_empty(5);
        let progress = aggregate(&map, 2);
        assert_eq!(progress.total_cards, 0);
        assert_eq!(progress.average_bucket, 0.0);
    }

    #[test]
    fn one_card_per_bucket() {
        let mut map = BucketMap::new();
        map.insert(0, Flashcard::new("c1", "1"));
        map.insert(1, Flashcard::new("c2", "2"));
        map.insert(2, Flashcard::new("c3", "3"));

        assert_eq!(
            aggregate(&map, 2),
            Progress {
                total_cards: 3,
                mastered_cards: 1,
                struggling_cards: 1,
                average_bucket: 1.0,
            }
        );
    }

    #[test]
    fn average_is_fractional() {
        let mut map = BucketMap::new();
        map.insert(1, Flashcard::new("a", "1"));
        map.insert(4, Flashcard::new("b", "2"));
        map.insert(4, Flashcard::new("c", "3"));
        map.insert(4, Flashcard::new("d", "4"));

        let progress = aggregate(&map, 2);
        assert_eq!(progress.average_bucket, 13.0 / 4.0);
        assert_eq!(progress.mastered_cards, 3);
        assert_eq!(progress.struggling_cards, 0);
    }

    #[test]
    fn threshold_is_configurable() {
        let mut map = BucketMap::new();
        map.insert(2, Flashcard::new("a", "1"));
        map.insert(3, Flashcard::new("b", "2"));
        assert_eq!(aggregate(&map, 3).mastered_cards, 1);
        assert_eq!(aggregate(&map, 2).mastered_cards, 2);
    }
}
