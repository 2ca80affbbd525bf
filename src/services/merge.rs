// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Keyed merge helpers shared by the aggregator and enrichment step.

use indexmap::map::Entry;
use indexmap::IndexMap;
use std::hash::Hash;

/// Insertion-ordered map used to fold several result sets into one.
///
/// Iteration follows first-insertion order, so a stable sort over the
/// values breaks ties by first encounter.
#[derive(Debug, Clone)]
pub struct OrderedTally<K, V> {
    entries: IndexMap<K, V>,
}

impl<K, V> Default for OrderedTally<K, V> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<K: Hash + Eq, V> OrderedTally<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Combine `value` into the entry for `key`, inserting it if new.
    pub fn merge(&mut self, key: K, value: V, combine: impl FnOnce(&mut V, V)) {
        match self.entries.entry(key) {
            Entry::Occupied(mut slot) => combine(slot.get_mut(), value),
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter()
    }

    /// Entries sorted descending by `score`, ties in insertion order.
    pub fn into_sorted_desc<S: Ord>(self, score: impl Fn(&V) -> S) -> Vec<(K, V)> {
        let mut entries = self.entries;
        entries.sort_by(|_, a, _, b| score(b).cmp(&score(a)));
        entries.into_iter().collect()
    }
}

impl<K: Hash + Eq> OrderedTally<K, u64> {
    /// Add `amount` to the counter for `key`.
    pub fn add(&mut self, key: K, amount: u64) {
        *self.entries.entry(key).or_insert(0) += amount;
    }

    /// First key holding the maximum value, or `None` when empty.
    pub fn max_key(&self) -> Option<&K> {
        let mut best: Option<(&K, u64)> = None;
        for (key, &value) in &self.entries {
            match best {
                Some((_, b)) if value <= b => {}
                _ => best = Some((key, value)),
            }
        }
        best.map(|(key, _)| key)
    }

    pub fn total(&self) -> u64 {
        self.entries.values().sum()
    }
}

/// `part / total * 100`, with a zero total treated as 1.
pub fn percentage(part: u64, total: u64) -> f64 {
    part as f64 / total.max(1) as f64 * 100.0
}
