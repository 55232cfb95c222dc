// ## src/telemetry/timers.rs

//! telemetry/timers.rs
//! Wall-clock accounting for a bridge run.
//!
//! - `Read` / `Write` hold time spent inside block refills and flushes, summed over channels.
//! - `Compress` / `Decompress` hold whole engine phases (they include the block I/O above).
//! - `Verify` holds the post-run checksum comparison.

use std::fmt;
use std::time::{Duration, Instant};
use std::collections::{HashMap, hash_map};
use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Read,
    Write,
    Compress,
    Decompress,
    Verify,
}

impl Stage {
    pub const ALL: [Stage; 5] = [Stage::Read, Stage::Write, Stage::Compress, Stage::Decompress, Stage::Verify];

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Read => "read",
            Stage::Write => "write",
            Stage::Compress => "compress",
            Stage::Decompress => "decompress",
            Stage::Verify => "verify",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accumulated duration per stage. Stages never recorded read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageTimes {
    times: HashMap<Stage, Duration>,
}

impl StageTimes {
    pub fn add(&mut self, stage: Stage, dur: Duration) {
        *self.times.entry(stage).or_default() += dur;
    }

    pub fn get(&self, stage: Stage) -> Duration {
        self.times.get(&stage).copied().unwrap_or_default()
    }

    /// Sum over every recorded stage. Phase stages overlap the I/O stages,
    /// so this can exceed the run's elapsed time when both were recorded.
    pub fn total(&self) -> Duration {
        self.times.values().sum()
    }

    pub fn has_all(&self, expected: &[Stage]) -> bool {
        expected.iter().all(|s| self.times.contains_key(s))
    }
}

impl<'a> IntoIterator for &'a StageTimes {
    type Item = (&'a Stage, &'a Duration);
    type IntoIter = hash_map::Iter<'a, Stage, Duration>;

    fn into_iter(self) -> Self::IntoIter {
        self.times.iter()
    }
}

/// Run clock plus per-stage totals; `finish()` freezes `elapsed()`.
#[derive(Clone, Debug)]
pub struct TelemetryTimer {
    started: Instant,
    frozen: Option<Duration>,
    stages: StageTimes,
}

impl Default for TelemetryTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetryTimer {
    pub fn new() -> Self {
        Self { started: Instant::now(), frozen: None, stages: StageTimes::default() }
    }

    pub fn finish(&mut self) {
        self.frozen = Some(self.started.elapsed());
    }

    pub fn add_stage_time(&mut self, stage: Stage, dur: Duration) {
        self.stages.add(stage, dur);
    }

    /// Run `f`, charging its wall time to `stage` whether it succeeds or not.
    pub fn time<T>(&mut self, stage: Stage, f: impl FnOnce() -> T) -> T {
        let started = Instant::now();
        let out = f();
        self.stages.add(stage, started.elapsed());
        out
    }

    pub fn stage_times(&self) -> &StageTimes {
        &self.stages
    }

    pub fn elapsed(&self) -> Duration {
        self.frozen.unwrap_or_else(|| self.started.elapsed())
    }
}
