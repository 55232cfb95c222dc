// ### `src/telemetry/counters.rs`

//! telemetry/counters.rs
//! Counters collected while an engine drives the bridge.
//!
//! Summary: block-level byte counts, refill/flush/rewind counts, and frequency
//! table traffic. Converted into an immutable TelemetrySnapshot at run end.
use bincode::{Decode, Encode};
use std::ops::AddAssign;

use crate::channel::input::InputStats;
use crate::channel::output::OutputStats;
use crate::types::BridgeError;

#[derive(Default, Clone, Debug, Encode, Decode, PartialEq, Eq)]
pub struct TelemetryCounters {
    pub bytes_read: u64,
    pub bytes_written: u64,
    pub refills: u64,
    pub flushes: u64,
    pub rewinds: u64,
    pub end_of_stream: u64,
    pub freq_reads: u64,
    pub freq_writes: u64,
    pub phases_compress: u64,
    pub phases_decompress: u64,
}

impl TelemetryCounters {
    /// Record one input channel's block statistics.
    pub fn add_input(&mut self, stats: &InputStats) {
        self.bytes_read += stats.bytes_loaded;
        self.refills += stats.refills;
        self.rewinds += stats.rewinds;
        self.end_of_stream += stats.end_of_stream;
    }

    /// Record one output channel's block statistics.
    pub fn add_output(&mut self, stats: &OutputStats) {
        self.bytes_written += stats.bytes_written;
        self.flushes += stats.flushes;
    }

    pub fn merge(&mut self, other: &TelemetryCounters) {
        self.bytes_read += other.bytes_read;
        self.bytes_written += other.bytes_written;
        self.refills += other.refills;
        self.flushes += other.flushes;
        self.rewinds += other.rewinds;
        self.end_of_stream += other.end_of_stream;
        self.freq_reads += other.freq_reads;
        self.freq_writes += other.freq_writes;
        self.phases_compress += other.phases_compress;
        self.phases_decompress += other.phases_decompress;
    }

    /// Compact binary form, for persisting counters next to run artifacts.
    pub fn to_bytes(&self) -> Result<Vec<u8>, BridgeError> {
        bincode::encode_to_vec(self, bincode::config::standard())
            .map_err(|e| BridgeError::Telemetry(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BridgeError> {
        let (counters, _) = bincode::decode_from_slice(bytes, bincode::config::standard())
            .map_err(|e| BridgeError::Telemetry(e.to_string()))?;
        Ok(counters)
    }
}

impl AddAssign for TelemetryCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
