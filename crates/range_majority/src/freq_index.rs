use std::collections::HashMap;

use crate::treap::{TreapMap, TreapMultiset, XorShift64};

const BUCKET_SEED: u64 = 0x5EED_B0CC_E75;

/// Occurrence-count index over the values currently inside the window.
///
/// Buckets are keyed by occurrence count; each bucket owns the ordered
/// multiset of distinct values occurring exactly that many times. A value
/// moves between adjacent buckets on `increment`/`decrement`, and a bucket is
/// dropped the moment it empties, so every bucket in the tree is non-empty.
pub struct FrequencyIndex {
    buckets: TreapMap<usize, TreapMultiset<u64>>,
    counts: HashMap<u64, usize>,
    rng: XorShift64,
}

impl FrequencyIndex {
    pub fn new() -> Self {
        Self {
            buckets: TreapMap::new(),
            counts: HashMap::new(),
            rng: XorShift64::new(BUCKET_SEED),
        }
    }

    /// Current occurrence count of `value`; 0 when untracked.
    pub fn count(&self, value: u64) -> usize {
        self.counts.get(&value).copied().unwrap_or(0)
    }

    /// Number of distinct values currently tracked.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    pub fn increment(&mut self, value: u64) {
        let current = self.count(value);
        if current > 0 {
            self.take_from_bucket(current, value);
        }
        self.put_in_bucket(current + 1, value);
        self.counts.insert(value, current + 1);
    }

    /// Caller contract: `value` is currently tracked (count >= 1). A count of
    /// 1 drops the value entirely; there is no zero bucket.
    pub fn decrement(&mut self, value: u64) {
        let Some(&current) = self.counts.get(&value) else {
            debug_assert!(false, "decrement of untracked value {value}");
            return;
        };
        self.take_from_bucket(current, value);
        if current == 1 {
            self.counts.remove(&value);
        } else {
            self.put_in_bucket(current - 1, value);
            self.counts.insert(value, current - 1);
        }
    }

    /// Smallest value whose occurrence count is at least `threshold`.
    ///
    /// Every bucket at or above the threshold qualifies, and a smaller value
    /// may sit at a higher count than the lowest qualifying bucket, so this
    /// takes the least minimum across all of them. Qualifying counts are
    /// distinct and sum to at most the window size, so few buckets survive
    /// the pruned traversal. Read-only: repeated calls return the same
    /// answer.
    pub fn smallest_at_least(&self, threshold: usize) -> Option<u64> {
        let mut best: Option<u64> = None;
        self.buckets.for_each_ge(&threshold, |_, bucket| {
            let candidate = bucket.min().copied();
            best = match (best, candidate) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (a, b) => a.or(b),
            };
        });
        best
    }

    fn put_in_bucket(&mut self, count: usize, value: u64) {
        if let Some(bucket) = self.buckets.get_mut(&count) {
            bucket.insert(value);
        } else {
            // Fork the seed so sibling buckets draw distinct priority streams.
            let mut bucket = TreapMultiset::with_seed(self.rng.next_u64());
            bucket.insert(value);
            self.buckets.insert(count, bucket);
        }
    }

    fn take_from_bucket(&mut self, count: usize, value: u64) {
        let Some(bucket) = self.buckets.get_mut(&count) else {
            debug_assert!(false, "no bucket for count {count}");
            return;
        };
        bucket.remove(&value);
        if bucket.is_empty() {
            self.buckets.remove(&count);
        }
    }
}

impl Default for FrequencyIndex {
    fn default() -> Self {
        Self::new()
    }
}
