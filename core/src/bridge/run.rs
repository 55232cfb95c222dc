//! bridge/run.rs
//! Top-level run: build the channel tables, hand control to the engine phase by
//! phase, close each phase's channel pair, and stop at the first failure.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use serde::{Deserialize, Serialize};

use crate::bridge::engine::Engine;
use crate::bridge::host::Bridge;
use crate::channel::ChannelKind;
use crate::config::BridgeConfig;
use crate::frequency::FrequencyTable;
use crate::telemetry::{Stage, TelemetryCounters, TelemetrySnapshot, TelemetryTimer};
use crate::types::BridgeError;
use crate::utils::file_checksum;

/// One engine entry-point call against a channel id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Compress(u32),
    Decompress(u32),
}

impl Phase {
    pub fn channel(&self) -> u32 {
        match self {
            Phase::Compress(id) | Phase::Decompress(id) => *id,
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            Phase::Compress(_) => Stage::Compress,
            Phase::Decompress(_) => Stage::Decompress,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Compress(id) => write!(f, "compress({})", id),
            Phase::Decompress(id) => write!(f, "decompress({})", id),
        }
    }
}

/// Channel wiring and phase order for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunPlan {
    pub inputs: Vec<PathBuf>,
    pub outputs: Vec<PathBuf>,
    pub phases: Vec<Phase>,
    /// `(source, restored)` compared after the run when verification is enabled.
    #[serde(default)]
    pub verify: Option<(PathBuf, PathBuf)>,
}

impl RunPlan {
    /// Compress `source` into `compressed`, then decompress it into `restored`.
    ///
    /// Inputs `[source, compressed]`, outputs `[compressed, restored]`,
    /// phases `[Compress(0), Decompress(1)]`.
    pub fn round_trip(
        source: impl Into<PathBuf>,
        compressed: impl Into<PathBuf>,
        restored: impl Into<PathBuf>,
    ) -> Self {
        let source = source.into();
        let compressed = compressed.into();
        let restored = restored.into();

        Self {
            inputs: vec![source.clone(), compressed.clone()],
            outputs: vec![compressed, restored.clone()],
            phases: vec![Phase::Compress(0), Phase::Decompress(1)],
            verify: Some((source, restored)),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, BridgeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Every phase id must address both an input and an output channel.
    pub fn validate(&self, config: &BridgeConfig) -> Result<(), BridgeError> {
        config.validate()?;

        for phase in &self.phases {
            let id = phase.channel();
            if id as usize >= self.inputs.len() {
                return Err(BridgeError::unknown_channel(ChannelKind::Input, id, self.inputs.len()));
            }
            if id as usize >= self.outputs.len() {
                return Err(BridgeError::unknown_channel(ChannelKind::Output, id, self.outputs.len()));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseOutcome {
    pub phase: Phase,
    pub elapsed: Duration,
    /// Length of the phase's input source.
    pub bytes_in: u64,
    /// Bytes the phase flushed to its output.
    pub bytes_out: u64,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub engine: String,
    pub phases: Vec<PhaseOutcome>,
    pub frequencies: FrequencyTable,
    pub counters: TelemetryCounters,
    pub snapshot: TelemetrySnapshot,
}

/// Run every phase of `plan` with `engine`.
///
/// # Errors
/// - The first channel, contract, or decode error aborts the run; later phases never start.
/// - With verification enabled, a checksum mismatch between source and restored output.
pub fn run_plan<E: Engine>(
    engine: &mut E,
    plan: &RunPlan,
    config: &BridgeConfig,
) -> Result<RunReport, BridgeError> {
    plan.validate(config)?;

    let mut bridge = Bridge::from_paths(&plan.inputs, &plan.outputs, config)?;
    let mut timer = TelemetryTimer::new();

    let result = execute(engine, &mut bridge, &plan.phases, &mut timer);
    bridge.close_all();

    let phases = match result {
        Ok(phases) => phases,
        Err(e) => {
            log::error!("{} run aborted: {}", engine.name(), e);
            return Err(e);
        }
    };

    if config.verify_enabled() {
        if let Some((source, restored)) = &plan.verify {
            if let Err(e) = timer.time(Stage::Verify, || verify_round_trip(source, restored)) {
                log::error!("{} run failed verification: {}", engine.name(), e);
                return Err(e);
            }
        }
    }

    let (read_time, write_time) = bridge.io_times();
    timer.add_stage_time(Stage::Read, read_time);
    timer.add_stage_time(Stage::Write, write_time);
    timer.finish();

    let mut counters = bridge.counters();
    let mut bytes_source = 0;
    let mut bytes_compressed = 0;
    for outcome in &phases {
        match outcome.phase {
            Phase::Compress(_) => {
                counters.phases_compress += 1;
                bytes_source += outcome.bytes_in;
                bytes_compressed += outcome.bytes_out;
            }
            Phase::Decompress(_) => counters.phases_decompress += 1,
        }
    }

    let snapshot = TelemetrySnapshot::from(&counters, &timer, bytes_source, bytes_compressed);
    log::info!(
        "{} run finished: {} phases, {} bytes read, {} bytes written",
        engine.name(),
        phases.len(),
        snapshot.bytes_read,
        snapshot.bytes_written
    );

    Ok(RunReport {
        engine: engine.name().to_string(),
        phases,
        frequencies: bridge.frequencies().clone(),
        counters,
        snapshot,
    })
}

/// Compress `source` into `compressed` and restore it into `restored`.
pub fn run_round_trip<E: Engine>(
    engine: &mut E,
    source: impl AsRef<Path>,
    compressed: impl AsRef<Path>,
    restored: impl AsRef<Path>,
    config: &BridgeConfig,
) -> Result<RunReport, BridgeError> {
    let plan = RunPlan::round_trip(source.as_ref(), compressed.as_ref(), restored.as_ref());
    run_plan(engine, &plan, config)
}

/// Run `phases` in order against an already built bridge.
pub fn execute<E: Engine>(
    engine: &mut E,
    bridge: &mut Bridge,
    phases: &[Phase],
    timer: &mut TelemetryTimer,
) -> Result<Vec<PhaseOutcome>, BridgeError> {
    let mut outcomes = Vec::with_capacity(phases.len());

    for &phase in phases {
        let outcome = run_phase(engine, bridge, phase)?;
        timer.add_stage_time(phase.stage(), outcome.elapsed);
        outcomes.push(outcome);
    }

    Ok(outcomes)
}

fn run_phase<E: Engine>(engine: &mut E, bridge: &mut Bridge, phase: Phase) -> Result<PhaseOutcome, BridgeError> {
    let id = phase.channel();
    let bytes_in = bridge.input_at(id)?.size()?;
    let written_before = bridge.output_at(id)?.stats().bytes_written;

    log::info!("{}: starting {} ({} input bytes)", engine.name(), phase, bytes_in);
    let started = Instant::now();

    match phase {
        Phase::Compress(id) => engine.compress(bridge, id)?,
        Phase::Decompress(id) => {
            if !engine.decompress(bridge, id)? {
                return Err(BridgeError::DecodeFailed { channel: id });
            }
        }
    }

    let elapsed = started.elapsed();
    let bytes_out = bridge.output_at(id)?.stats().bytes_written - written_before;

    bridge.close_input(id)?;
    bridge.close_output(id)?;
    log::info!("{}: finished {} ({} output bytes in {:?})", engine.name(), phase, bytes_out, elapsed);

    Ok(PhaseOutcome { phase, elapsed, bytes_in, bytes_out })
}

/// Compare CRC32 of the original source and the restored output.
pub fn verify_round_trip(source: &Path, restored: &Path) -> Result<(), BridgeError> {
    let expected = file_checksum(source)?;
    let actual = file_checksum(restored)?;

    if expected != actual {
        return Err(BridgeError::Verification {
            source: source.to_path_buf(),
            restored: restored.to_path_buf(),
            expected,
            actual,
        });
    }
    log::debug!("verified {} against {} (crc32 {:08x})", restored.display(), source.display(), actual);
    Ok(())
}
