//! Sparse and dense bucket collections.
//!
//! The sparse [`BucketMap`] is the canonical, caller-owned state. The dense
//! [`DenseBuckets`] view is derived from it and borrows its sets, so the
//! dense entry at an occupied index is the very same set as the sparse one.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{BucketError, Result};
use crate::types::{CardId, CardSet, Flashcard};

/// Mapping from bucket number to the cards filed there.
///
/// A missing key is an implicitly empty bucket. Each card is expected to
/// appear in at most one bucket; see [`BucketMap::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BucketMap(BTreeMap<u32, CardSet>);

impl BucketMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection and check that no card is filed twice.
    pub fn from_buckets<I>(buckets: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u32, CardSet)>,
    {
        let map: Self = buckets.into_iter().collect();
        map.validate()?;
        Ok(map)
    }

    /// File `card` into `bucket`, creating the bucket if absent.
    pub fn insert(&mut self, bucket: u32, card: Flashcard) {
        self.0.entry(bucket).or_default().insert(card);
    }

    /// Make sure `bucket` has an entry, even an empty one.
    pub fn insert_empty(&mut self, bucket: u32) {
        self.0.entry(bucket).or_default();
    }

    /// Remove `card` from whichever bucket holds it, returning that bucket.
    pub(crate) fn take(&mut self, card: &Flashcard) -> Option<u32> {
        let bucket = self.bucket_of(card)?;
        if let Some(set) = self.0.get_mut(&bucket) {
            set.remove(card);
        }
        Some(bucket)
    }

    pub fn get(&self, bucket: u32) -> Option<&CardSet> {
        self.0.get(&bucket)
    }

    /// Bucket number currently holding `card`, looked up by identity.
    pub fn bucket_of(&self, card: &Flashcard) -> Option<u32> {
        self.0
            .iter()
            .find(|(_, set)| set.contains(card))
            .map(|(bucket, _)| *bucket)
    }

    /// Largest bucket number present, occupied or not.
    pub fn max_bucket(&self) -> Option<u32> {
        self.0.keys().next_back().copied()
    }

    /// Total number of cards across all buckets.
    pub fn card_count(&self) -> usize {
        self.0.values().map(|set| set.len()).sum()
    }

    /// Number of bucket entries, including empty ones.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Buckets in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &CardSet)> {
        self.0.iter().map(|(bucket, set)| (*bucket, set))
    }

    /// Check that no card is filed in more than one bucket.
    pub fn validate(&self) -> Result<()> {
        let mut seen: HashMap<CardId, u32> = HashMap::new();
        for (bucket, set) in self.iter() {
            for card in set {
                if let Some(first) = seen.insert(card.id(), bucket) {
                    tracing::warn!(card = %card.id(), first, second = bucket, "card filed twice");
                    return Err(BucketError::MalformedBucketCollection {
                        card: card.id(),
                        first,
                        second: bucket,
                    });
                }
            }
        }
        Ok(())
    }
}

impl FromIterator<(u32, CardSet)> for BucketMap {
    fn from_iter<I: IntoIterator<Item = (u32, CardSet)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Index-addressable bucket sequence covering 0..=max bucket.
#[derive(Debug, Clone, Default)]
pub struct DenseBuckets<'a> {
    buckets: Vec<Cow<'a, CardSet>>,
}

impl<'a> DenseBuckets<'a> {
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CardSet> {
        self.buckets.get(index).map(|set| set.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardSet> + use<'_, 'a> {
        self.buckets.iter().map(|set| set.as_ref())
    }
}

impl FromIterator<CardSet> for DenseBuckets<'_> {
    fn from_iter<I: IntoIterator<Item = CardSet>>(iter: I) -> Self {
        Self {
            buckets: iter.into_iter().map(Cow::Owned).collect(),
        }
    }
}

/// First and last occupied bucket indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupiedRange {
    pub min: usize,
    pub max: usize,
}

/// Expand a sparse collection into its dense form.
///
/// Gaps get a fresh empty set; present keys borrow the caller's set.
pub fn to_dense(sparse: &BucketMap) -> DenseBuckets<'_> {
    let Some(max_bucket) = sparse.max_bucket() else {
        return DenseBuckets::default();
    };

    let mut buckets: Vec<Cow<'_, CardSet>> = (0..=max_bucket)
        .map(|_| Cow::Owned(CardSet::new()))
        .collect();
    for (bucket, set) in sparse.iter() {
        buckets[bucket as usize] = Cow::Borrowed(set);
    }

    DenseBuckets { buckets }
}

/// Range of occupied buckets, or `None` if every bucket is empty.
pub fn occupied_range(dense: &DenseBuckets<'_>) -> Option<OccupiedRange> {
    let mut occupied = dense
        .iter()
        .enumerate()
        .filter(|(_, set)| !set.is_empty())
        .map(|(index, _)| index);

    let min = occupied.next()?;
    let max = occupied.last().unwrap_or(min);
    Some(OccupiedRange { min, max })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn set_of(cards: &[&Flashcard]) -> CardSet {
        cards.iter().map(|card| (*card).clone()).collect()
    }

    #[test]
    fn empty_map_gives_empty_dense() {
        let sparse = BucketMap::new();
        let dense = to_dense(&sparse);
        assert!(dense.is_empty());
        assert_eq!(occupied_range(&dense), None);
    }

    #[test]
    fn dense_fills_gaps_with_empty_sets() {
        let a = Flashcard::new("a", "1");
        let b = Flashcard::new("b", "2");
        let sparse: BucketMap = [(1, set_of(&[&a])), (4, set_of(&[&b]))]
            .into_iter()
            .collect();

        let dense = to_dense(&sparse);
        assert_eq!(dense.len(), 5);
        assert!(dense.get(0).unwrap().is_empty());
        assert!(dense.get(2).unwrap().is_empty());
        assert!(dense.get(3).unwrap().is_empty());
        assert!(dense.get(1).unwrap().contains(&a));
        assert!(dense.get(4).unwrap().contains(&b));
        assert!(dense.get(5).is_none());
    }

    #[test]
    fn dense_entries_alias_sparse_sets() {
        let a = Flashcard::new("a", "1");
        let sparse: BucketMap = [(2, set_of(&[&a]))].into_iter().collect();
        let dense = to_dense(&sparse);
        assert!(std::ptr::eq(dense.get(2).unwrap(), sparse.get(2).unwrap()));
    }

    #[test]
    fn trailing_empty_bucket_still_sets_length() {
        let a = Flashcard::new("a", "1");
        let sparse: BucketMap = [(0, set_of(&[&a])), (3, CardSet::new())]
            .into_iter()
            .collect();
        let dense = to_dense(&sparse);
        assert_eq!(dense.len(), 4);
        assert_eq!(occupied_range(&dense), Some(OccupiedRange { min: 0, max: 0 }));
    }

    #[test]
    fn occupied_range_skips_empty_edges() {
        let a = Flashcard::new("a", "1");
        let b = Flashcard::new("b", "2");
        let dense: DenseBuckets = [
            CardSet::new(),
            set_of(&[&a]),
            CardSet::new(),
            set_of(&[&b]),
            CardSet::new(),
        ]
        .into_iter()
        .collect();
        assert_eq!(occupied_range(&dense), Some(OccupiedRange { min: 1, max: 3 }));
    }

    #[test]
    fn all_empty_has_no_range() {
        let dense: DenseBuckets = vec![CardSet::new(); 3].into_iter().collect();
        assert_eq!(occupied_range(&dense), None);
    }

    #[test]
    fn bucket_of_uses_identity() {
        let a = Flashcard::new("same", "text");
        let twin = Flashcard::new("same", "text");
        let mut sparse = BucketMap::new();
        sparse.insert(3, a.clone());
        assert_eq!(sparse.bucket_of(&a), Some(3));
        assert_eq!(sparse.bucket_of(&twin), None);
    }

    #[test]
    fn validate_rejects_duplicates() {
        let a = Flashcard::new("a", "1");
        let result = BucketMap::from_buckets([(0, set_of(&[&a])), (2, set_of(&[&a]))]);
        assert_eq!(
            result,
            Err(BucketError::MalformedBucketCollection {
                card: a.id(),
                first: 0,
                second: 2,
            })
        );
    }

    #[test]
    fn validate_accepts_well_formed() {
        let a = Flashcard::new("a", "1");
        let b = Flashcard::new("b", "2");
        let map = BucketMap::from_buckets([(0, set_of(&[&a])), (1, set_of(&[&b]))]).unwrap();
        assert_eq!(map.card_count(), 2);
        assert_eq!(map.max_bucket(), Some(1));
    }

    #[test]
    fn serde_round_trip_keeps_membership() {
        let a = Flashcard::new("a", "1");
        let mut map = BucketMap::new();
        map.insert(1, a.clone());
        let json = serde_json::to_string(&map).unwrap();
        let back: BucketMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back.bucket_of(&a), Some(1));
    }
}
