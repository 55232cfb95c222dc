use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::channel::{ChannelError, ChannelKind};

/// Unified bridge error covering channel I/O, primitive contract violations,
/// configuration, and run-level outcomes.
/// - Ergonomic `From<T>` impls enable `?` from the engine up to the run.
/// - Every variant is fatal to the run that raised it.
#[derive(Debug)]
pub enum BridgeError {
    /// Channel-level error (unknown id, closed channel, file I/O).
    Channel(ChannelError),

    /// `putbyte` called with a value outside 0..=255.
    ByteOutOfRange { channel: u32, value: i32 },

    /// `putfreq` called with a negative count.
    NegativeFrequency { symbol: u32, count: i64 },

    /// `decompress` reported failure for the given channel.
    DecodeFailed { channel: u32 },

    /// Restored output does not match the original source.
    Verification { source: PathBuf, restored: PathBuf, expected: u32, actual: u32 },

    /// Failure reported by the engine itself.
    Engine(String),

    /// Invalid configuration or run plan.
    Config(String),

    /// I/O outside any channel (config files, verification reads).
    Io(io::Error),

    /// Telemetry export failure.
    Telemetry(String),
}

impl BridgeError {
    /// Shorthand for an unknown channel id on the given side.
    pub fn unknown_channel(kind: ChannelKind, id: u32, len: usize) -> Self {
        BridgeError::Channel(ChannelError::UnknownChannel { kind, id, len })
    }
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::Channel(e) => write!(f, "channel error: {}", e),
            BridgeError::ByteOutOfRange { channel, value } =>
                write!(f, "putbyte on channel {}: value {} is not a byte", channel, value),
            BridgeError::NegativeFrequency { symbol, count } =>
                write!(f, "putfreq: negative count {} for symbol {}", count, symbol),
            BridgeError::DecodeFailed { channel } =>
                write!(f, "decompress on channel {} reported failure", channel),
            BridgeError::Verification { source, restored, expected, actual } =>
                write!(
                    f,
                    "verification failed: {} (crc32 {:08x}) != {} (crc32 {:08x})",
                    restored.display(), actual, source.display(), expected
                ),
            BridgeError::Engine(msg) => write!(f, "engine error: {}", msg),
            BridgeError::Config(msg) => write!(f, "config error: {}", msg),
            BridgeError::Io(e) => write!(f, "I/O error: {}", e),
            BridgeError::Telemetry(msg) => write!(f, "telemetry error: {}", msg),
        }
    }
}

impl std::error::Error for BridgeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BridgeError::Channel(e) => Some(e),
            BridgeError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ChannelError> for BridgeError {
    fn from(e: ChannelError) -> Self {
        BridgeError::Channel(e)
    }
}

impl From<io::Error> for BridgeError {
    fn from(e: io::Error) -> Self {
        BridgeError::Io(e)
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(e: serde_json::Error) -> Self {
        BridgeError::Config(e.to_string())
    }
}
