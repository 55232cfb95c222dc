//! engine/model.rs
//! Static order-0 byte model shared by the range encoder and decoder.

use crate::constants::range_coder::{MAX_TOTAL, SYMBOLS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyModel {
    counts: [u32; SYMBOLS],
    cumulative: [u32; SYMBOLS + 1],
}

impl FrequencyModel {
    /// Scale raw byte counts until their total fits in `MAX_TOTAL`.
    /// Symbols that occurred keep a count of at least 1.
    pub fn from_histogram(histogram: &[u64; SYMBOLS]) -> Self {
        let mut scaled = *histogram;

        while scaled.iter().sum::<u64>() > MAX_TOTAL {
            for c in scaled.iter_mut().filter(|c| **c > 0) {
                *c = (*c >> 1).max(1);
            }
        }

        let mut counts = [0u32; SYMBOLS];
        for (dst, src) in counts.iter_mut().zip(scaled.iter()) {
            *dst = *src as u32;
        }
        Self::build(counts)
    }

    /// Rebuild a model from counts read back from the frequency table.
    /// Returns `None` if the counts could not have come from `from_histogram`.
    pub fn from_counts(counts: &[u64; SYMBOLS]) -> Option<Self> {
        let total: u64 = counts.iter().sum();
        if total > MAX_TOTAL {
            return None;
        }

        let mut narrowed = [0u32; SYMBOLS];
        for (dst, src) in narrowed.iter_mut().zip(counts.iter()) {
            *dst = u32::try_from(*src).ok()?;
        }
        Some(Self::build(narrowed))
    }

    fn build(counts: [u32; SYMBOLS]) -> Self {
        let mut cumulative = [0u32; SYMBOLS + 1];
        for (i, c) in counts.iter().enumerate() {
            cumulative[i + 1] = cumulative[i] + c;
        }
        Self { counts, cumulative }
    }

    pub fn count(&self, symbol: u8) -> u32 {
        self.counts[symbol as usize]
    }

    pub fn start(&self, symbol: u8) -> u32 {
        self.cumulative[symbol as usize]
    }

    pub fn total(&self) -> u32 {
        self.cumulative[SYMBOLS]
    }

    /// Symbol whose interval `[start, start + count)` holds `value`.
    /// `value` must be below `total()`.
    pub fn find(&self, value: u32) -> u8 {
        self.cumulative[1..].partition_point(|&c| c <= value) as u8
    }

    pub fn counts(&self) -> &[u32; SYMBOLS] {
        &self.counts
    }
}
