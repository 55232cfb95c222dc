//! bytebridge-core
//!
//! Host-side buffered channels for byte-at-a-time compression engines.
//! The engine pulls and pushes single bytes through a small set of primitives;
//! this crate batches the disk I/O behind them.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;
pub mod config;

// Channels and shared state
pub mod channel;
pub mod frequency;
pub mod telemetry;

// Call boundary and engines
pub mod bridge;
pub mod engine;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::bridge::{Bridge, Engine, EngineHost, Phase, RunPlan, RunReport, run_plan, run_round_trip};
    pub use crate::channel::{ChannelTable, InputChannel, OutputChannel};
    pub use crate::config::BridgeConfig;
    pub use crate::constants::END_OF_STREAM;
    pub use crate::engine::RangeCoder;
    pub use crate::frequency::FrequencyTable;
    pub use crate::types::BridgeError;
}
