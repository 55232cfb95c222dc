// # `src/telemetry/` Module

// This module provides **immutable telemetry snapshots** for bridge runs. It centralizes counters, ratios, and stage timings gathered from the channels and the frequency table.

// ## 📂 File Layout

// ```
// src/telemetry/
//  ├── mod.rs
//  ├── counters.rs
//  ├── timers.rs
//  └── snapshot.rs
// ```

//! telemetry/mod.rs
//! Unified telemetry module: counters, timers, and immutable snapshots.
//!
//! Notes:
//! - Counters are block-level (per refill / flush), never per byte.
//! - Snapshots are taken once a run finishes and are safe to export.

pub mod counters;
pub mod timers;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;
