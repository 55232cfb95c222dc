//! bridge: the call boundary between the host channels and an engine.
//!
//! Layers:
//! - `host`: the `EngineHost` primitives and the `Bridge` that implements them.
//! - `engine`: the `Engine` entry points (`compress`, `decompress`).
//! - `run`: phase orchestration, reporting, and round-trip verification.

pub mod host;
pub mod engine;
pub mod run;

pub use host::{Bridge, EngineHost};
pub use engine::Engine;
pub use run::{
    Phase,
    PhaseOutcome,
    RunPlan,
    RunReport,
    run_plan,
    run_round_trip,
};
