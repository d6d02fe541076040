use std::cmp::Ordering;

use crate::r#type::IndexableNum;

/// The best `k` candidates found so far, kept sorted by ascending distance.
#[derive(Debug, Clone)]
pub(crate) struct BestSet<N: IndexableNum> {
    capacity: usize,
    entries: Vec<(N, usize)>,
}

impl<N: IndexableNum> BestSet<N> {
    /// Create an empty set keeping at most `capacity` entries. `expected` bounds the up-front
    /// allocation when `capacity` is larger than the number of candidates.
    pub(crate) fn new(capacity: usize, expected: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            capacity,
            entries: Vec::with_capacity(capacity.min(expected) + 1),
        }
    }

    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// The distance of the worst kept entry once the set is full.
    ///
    /// While the set still has room any candidate is accepted, so there is no bound.
    #[inline]
    pub(crate) fn bound(&self) -> Option<N> {
        if self.is_full() {
            self.entries.last().map(|(distance, _)| *distance)
        } else {
            None
        }
    }

    /// Offer a candidate. Returns `true` if it was kept.
    ///
    /// A full set only accepts candidates strictly closer than its worst entry, and ties with
    /// existing entries are placed after them, so the first-found point wins.
    pub(crate) fn insert(&mut self, distance: N, item: usize) -> bool {
        if let Some(worst) = self.bound() {
            if distance.partial_cmp(&worst) != Some(Ordering::Less) {
                return false;
            }
        }

        let pos = self.entries.partition_point(|(d, _)| *d <= distance);
        self.entries.insert(pos, (distance, item));
        if self.entries.len() > self.capacity {
            self.entries.pop();
        }
        true
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Consume the set, returning `(distance, item)` pairs nearest first.
    pub(crate) fn into_sorted(self) -> Vec<(N, usize)> {
        self.entries
    }
}
