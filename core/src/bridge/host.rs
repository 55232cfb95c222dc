//! bridge/host.rs
//! The capability table handed to an engine, and the bridge that implements it.
//!
//! Notes:
//! - Each primitive is call-forwarding plus id/value validation; no buffering here.
//! - Primitive names match the engine's import names (`getbyte`, `putfreq`, ...).
//! - Every failure is returned to the engine, which must propagate it with `?`.

use std::path::Path;
use std::time::Duration;

use crate::channel::{ChannelTable, InputChannel, OutputChannel};
use crate::config::BridgeConfig;
use crate::constants::{END_OF_STREAM, MAX_BYTE_VALUE};
use crate::frequency::FrequencyTable;
use crate::telemetry::TelemetryCounters;
use crate::types::BridgeError;

/// Host primitives callable from an engine while it runs.
pub trait EngineHost {
    /// Flush output channel `id` to its destination.
    fn flush(&mut self, id: u32) -> Result<(), BridgeError>;

    /// Next byte from input channel `id`, or `END_OF_STREAM`.
    fn getbyte(&mut self, id: u32) -> Result<i32, BridgeError>;

    /// Append one byte (0..=255) to output channel `id`.
    fn putbyte(&mut self, id: u32, value: i32) -> Result<(), BridgeError>;

    /// Reset input channel `id` to its start.
    fn rewind(&mut self, id: u32) -> Result<(), BridgeError>;

    /// Byte length of the size-source input.
    fn getdecompressedsize(&mut self, id: u32) -> Result<u64, BridgeError>;

    /// Stored count for `symbol`; 0 if never set.
    fn getfreq(&mut self, id: u32, symbol: u32) -> Result<u64, BridgeError>;

    /// Store a non-negative `count` for `symbol`.
    fn putfreq(&mut self, id: u32, symbol: u32, count: i64) -> Result<(), BridgeError>;
}

/// Channel tables and the shared frequency table for one run.
#[derive(Debug)]
pub struct Bridge {
    inputs: ChannelTable<InputChannel>,
    outputs: ChannelTable<OutputChannel>,
    frequencies: FrequencyTable,
    size_source: u32,
    freq_reads: u64,
    freq_writes: u64,
}

impl Bridge {
    /// # Errors
    /// - `BridgeError::Config` if `size_source` is not a valid input id.
    pub fn new(
        inputs: ChannelTable<InputChannel>,
        outputs: ChannelTable<OutputChannel>,
        size_source: usize,
    ) -> Result<Self, BridgeError> {
        if size_source >= inputs.len() {
            return Err(BridgeError::Config(format!(
                "size source {} out of range ({} input channels)",
                size_source,
                inputs.len()
            )));
        }

        Ok(Self {
            inputs,
            outputs,
            frequencies: FrequencyTable::new(),
            size_source: size_source as u32,
            freq_reads: 0,
            freq_writes: 0,
        })
    }

    /// Bind one input channel per path in `inputs` and one output per path in `outputs`.
    /// No file is opened here.
    pub fn from_paths<P: AsRef<Path>>(
        inputs: &[P],
        outputs: &[P],
        config: &BridgeConfig,
    ) -> Result<Self, BridgeError> {
        config.validate()?;
        let capacity = config.capacity();

        let inputs = inputs
            .iter()
            .map(|p| InputChannel::new(p.as_ref(), capacity))
            .collect::<Result<Vec<_>, _>>()?;
        let outputs = outputs
            .iter()
            .map(|p| OutputChannel::new(p.as_ref(), capacity))
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(ChannelTable::inputs(inputs), ChannelTable::outputs(outputs), config.size_source())
    }

    pub fn inputs(&self) -> &ChannelTable<InputChannel> {
        &self.inputs
    }

    pub fn outputs(&self) -> &ChannelTable<OutputChannel> {
        &self.outputs
    }

    pub fn input_at(&mut self, id: u32) -> Result<&mut InputChannel, BridgeError> {
        Ok(self.inputs.input_at(id)?)
    }

    pub fn output_at(&mut self, id: u32) -> Result<&mut OutputChannel, BridgeError> {
        Ok(self.outputs.output_at(id)?)
    }

    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    pub fn frequencies_mut(&mut self) -> &mut FrequencyTable {
        &mut self.frequencies
    }

    pub fn close_input(&mut self, id: u32) -> Result<(), BridgeError> {
        self.inputs.input_at(id)?.close();
        Ok(())
    }

    pub fn close_output(&mut self, id: u32) -> Result<(), BridgeError> {
        self.outputs.output_at(id)?.close();
        Ok(())
    }

    pub fn close_all(&mut self) {
        self.inputs.close_all();
        self.outputs.close_all();
    }

    /// Aggregate block-level counters over every channel.
    pub fn counters(&self) -> TelemetryCounters {
        let mut counters = TelemetryCounters {
            freq_reads: self.freq_reads,
            freq_writes: self.freq_writes,
            ..TelemetryCounters::default()
        };
        self.inputs.iter().for_each(|c| counters.add_input(&c.stats()));
        self.outputs.iter().for_each(|c| counters.add_output(&c.stats()));
        counters
    }

    /// Total time spent in block reads and block writes.
    pub fn io_times(&self) -> (Duration, Duration) {
        let read: Duration = self.inputs.iter().map(|c| c.stats().read_time).sum();
        let write: Duration = self.outputs.iter().map(|c| c.stats().write_time).sum();
        (read, write)
    }

    #[inline]
    fn check_input(&self, id: u32) -> Result<(), BridgeError> {
        self.inputs.check(id)?;
        Ok(())
    }
}

impl EngineHost for Bridge {
    fn flush(&mut self, id: u32) -> Result<(), BridgeError> {
        self.outputs.output_at(id)?.flush()?;
        Ok(())
    }

    #[inline]
    fn getbyte(&mut self, id: u32) -> Result<i32, BridgeError> {
        let byte = self.inputs.input_at(id)?.next_byte()?;
        Ok(byte.map_or(END_OF_STREAM, i32::from))
    }

    #[inline]
    fn putbyte(&mut self, id: u32, value: i32) -> Result<(), BridgeError> {
        if !(0..=MAX_BYTE_VALUE).contains(&value) {
            return Err(BridgeError::ByteOutOfRange { channel: id, value });
        }
        self.outputs.output_at(id)?.put_byte(value as u8)?;
        Ok(())
    }

    fn rewind(&mut self, id: u32) -> Result<(), BridgeError> {
        self.inputs.input_at(id)?.rewind()?;
        Ok(())
    }

    fn getdecompressedsize(&mut self, id: u32) -> Result<u64, BridgeError> {
        self.check_input(id)?;
        // The size source is usually closed by an earlier compress phase.
        Ok(self.inputs.get(self.size_source)?.source_len()?)
    }

    fn getfreq(&mut self, id: u32, symbol: u32) -> Result<u64, BridgeError> {
        self.check_input(id)?;
        self.freq_reads += 1;
        Ok(self.frequencies.get(symbol))
    }

    fn putfreq(&mut self, id: u32, symbol: u32, count: i64) -> Result<(), BridgeError> {
        self.check_input(id)?;
        if count < 0 {
            return Err(BridgeError::NegativeFrequency { symbol, count });
        }
        self.freq_writes += 1;
        self.frequencies.put(symbol, count as u64);
        Ok(())
    }
}
