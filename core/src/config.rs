//! config.rs
//! Bridge configuration.
//!
//! - Every field is optional; `None` falls back to the constants in `constants.rs`.
//! - Loadable from JSON so a host can keep tuning next to its run artifacts.

use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::channel::buffer::validate_capacity;
use crate::constants::{DEFAULT_BUFFER_CAPACITY, DEFAULT_SIZE_SOURCE};
use crate::types::BridgeError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeConfig {
    /// Buffer capacity for every channel.
    /// - `None` → `DEFAULT_BUFFER_CAPACITY` (64 KiB).
    pub buffer_capacity: Option<usize>,

    /// Input channel whose length `getdecompressedsize` reports.
    /// - `None` → channel 0.
    pub size_source: Option<usize>,

    /// Compare CRC32 of source and restored output after a round trip.
    /// - `None` or `Some(false)` → skipped.
    pub verify: Option<bool>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: Some(DEFAULT_BUFFER_CAPACITY),
            size_source: Some(DEFAULT_SIZE_SOURCE),
            verify: Some(false),
        }
    }
}

impl BridgeConfig {
    pub fn new(buffer_capacity: Option<usize>, size_source: Option<usize>, verify: Option<bool>) -> Self {
        Self {
            buffer_capacity: buffer_capacity.or(Some(DEFAULT_BUFFER_CAPACITY)),
            size_source: size_source.or(Some(DEFAULT_SIZE_SOURCE)),
            verify: verify.or(Some(false)),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { buffer_capacity: Some(capacity), ..Self::default() }
    }

    pub fn with_verify(mut self) -> Self {
        self.verify = Some(true);
        self
    }

    pub fn capacity(&self) -> usize {
        self.buffer_capacity.unwrap_or(DEFAULT_BUFFER_CAPACITY)
    }

    pub fn size_source(&self) -> usize {
        self.size_source.unwrap_or(DEFAULT_SIZE_SOURCE)
    }

    pub fn verify_enabled(&self) -> bool {
        self.verify.unwrap_or(false)
    }

    pub fn validate(&self) -> Result<(), BridgeError> {
        validate_capacity(self.capacity()).map_err(|e| BridgeError::Config(e.to_string()))?;
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, BridgeError> {
        let config: BridgeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, BridgeError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
