//! frequency.rs
//! Shared symbol -> count table exchanged with the engine through `getfreq`/`putfreq`.
//!
//! - One instance per run, owned by the bridge and lent to whichever phase is active.
//! - A symbol that was never stored reads as 0.
//! - Not reset between phases; `clear()` exists for callers that want a fresh table.

use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<u32, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored count for `symbol`, or 0 if it was never set.
    #[inline]
    pub fn get(&self, symbol: u32) -> u64 {
        self.counts.get(&symbol).copied().unwrap_or(0)
    }

    /// Store or overwrite the count for `symbol`.
    #[inline]
    pub fn put(&mut self, symbol: u32, count: u64) {
        self.counts.insert(symbol, count);
    }

    pub fn contains(&self, symbol: u32) -> bool {
        self.counts.contains_key(&symbol)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }

    /// Sum of all stored counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, u64)> + '_ {
        self.counts.iter().map(|(s, c)| (*s, *c))
    }
}
