//! bridge/engine.rs
//! Entry points an engine exposes to the host.

use crate::bridge::host::EngineHost;
use crate::types::BridgeError;

/// A byte-at-a-time compression engine.
///
/// The engine owns the control flow: once `compress`/`decompress` is called it
/// pulls and pushes every byte through `host` and returns when done.
/// - Generic over the host so the byte primitives dispatch statically.
/// - Any primitive failure must be propagated, not swallowed.
pub trait Engine {
    /// Short name for logs and reports.
    fn name(&self) -> &str;

    /// Encode input channel `id` into output channel `id` until input is exhausted.
    fn compress<H: EngineHost>(&mut self, host: &mut H, id: u32) -> Result<(), BridgeError>;

    /// Decode input channel `id` into output channel `id`.
    /// Returns `false` when the engine rejects the stream.
    fn decompress<H: EngineHost>(&mut self, host: &mut H, id: u32) -> Result<bool, BridgeError>;
}
