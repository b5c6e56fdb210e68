//! Order-stable deduplication of branded entries.

use std::collections::HashSet;

use crate::pipeline::types::BrandedEntry;

/// Unique entries in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct AggregateSet {
    entries: Vec<BrandedEntry>,
    seen: HashSet<BrandedEntry>,
}

impl AggregateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `entry` unless an identical one is already present.
    /// Returns whether it was added.
    pub fn insert(&mut self, entry: BrandedEntry) -> bool {
        if self.seen.contains(&entry) {
            return false;
        }
        self.seen.insert(entry.clone());
        self.entries.push(entry);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BrandedEntry> {
        self.entries.iter()
    }

    /// Keep only the first `len` entries.
    pub fn truncate(&mut self, len: usize) {
        for dropped in self.entries.drain(len.min(self.entries.len())..) {
            self.seen.remove(&dropped);
        }
    }

    pub fn into_vec(self) -> Vec<BrandedEntry> {
        self.entries
    }
}

impl Extend<BrandedEntry> for AggregateSet {
    fn extend<I: IntoIterator<Item = BrandedEntry>>(&mut self, iter: I) {
        for entry in iter {
            self.insert(entry);
        }
    }
}

impl FromIterator<BrandedEntry> for AggregateSet {
    fn from_iter<I: IntoIterator<Item = BrandedEntry>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

/// Merge per-source results, in source order, into one unique list.
pub fn aggregate<I>(per_source: I) -> AggregateSet
where
    I: IntoIterator<Item = Vec<BrandedEntry>>,
{
    per_source.into_iter().flatten().collect()
}
