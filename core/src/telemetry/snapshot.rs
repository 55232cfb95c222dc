// ## src/telemetry/snapshot.rs

//! telemetry/snapshot.rs
//!
//! Immutable summary of one bridge run.
//! - `compression_ratio` is compressed bytes over source bytes across all compress phases
//!   (0.0 when no compress phase ran or the sources were empty).

use std::time::Duration;
use serde::{Serialize, Deserialize};

use crate::telemetry::counters::TelemetryCounters;
use crate::telemetry::timers::{TelemetryTimer, StageTimes, Stage};
use crate::types::BridgeError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
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
    pub bytes_source: u64,
    pub bytes_compressed: u64,
    pub compression_ratio: f64,
    pub throughput_bytes_per_sec: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
}

impl TelemetrySnapshot {
    /// Build a snapshot; `bytes_source` / `bytes_compressed` cover compress phases only.
    pub fn from(
        counters: &TelemetryCounters,
        timer: &TelemetryTimer,
        bytes_source: u64,
        bytes_compressed: u64,
    ) -> Self {
        let elapsed = timer.elapsed();

        let compression_ratio = if bytes_source > 0 {
            bytes_compressed as f64 / bytes_source as f64
        } else {
            0.0
        };

        let throughput = if elapsed.as_secs_f64() > 0.0 {
            counters.bytes_read as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        Self {
            bytes_read: counters.bytes_read,
            bytes_written: counters.bytes_written,
            refills: counters.refills,
            flushes: counters.flushes,
            rewinds: counters.rewinds,
            end_of_stream: counters.end_of_stream,
            freq_reads: counters.freq_reads,
            freq_writes: counters.freq_writes,
            phases_compress: counters.phases_compress,
            phases_decompress: counters.phases_decompress,
            bytes_source,
            bytes_compressed,
            compression_ratio,
            throughput_bytes_per_sec: throughput,
            elapsed,
            stage_times: timer.stage_times().clone(),
        }
    }

    pub fn total_stage_time(&self) -> Duration {
        self.stage_times.total()
    }

    pub fn has_all_stages(&self, expected: &[Stage]) -> bool {
        self.stage_times.has_all(expected)
    }

    pub fn to_json(&self) -> Result<String, BridgeError> {
        serde_json::to_string_pretty(self).map_err(|e| BridgeError::Telemetry(e.to_string()))
    }
}
