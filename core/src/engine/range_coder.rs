//! engine/range_coder.rs
//!
//! Two-pass order-0 range coder driving the bridge primitives.
//!
//! Call pattern:
//! - compress: count every byte, `rewind`, publish the scaled model with `putfreq`
//!   for all 256 symbols, encode every byte, emit the tail, `flush`.
//! - decompress: read the model with `getfreq`, prime from the first 5 bytes,
//!   decode `getdecompressedsize` symbols, `flush`.
//!
//! The compressed stream carries no header; the model travels through the shared
//! frequency table and the length through the size source.

use crate::bridge::{Engine, EngineHost};
use crate::constants::range_coder::SYMBOLS;
use crate::engine::decoder::RangeDecoder;
use crate::engine::encoder::RangeEncoder;
use crate::engine::model::FrequencyModel;
use crate::types::BridgeError;

#[derive(Debug, Default, Clone)]
pub struct RangeCoder {
    last_model: Option<FrequencyModel>,
}

impl RangeCoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Model used by the most recent compress or decompress call.
    pub fn last_model(&self) -> Option<&FrequencyModel> {
        self.last_model.as_ref()
    }

    fn build_model<H: EngineHost>(host: &mut H, id: u32) -> Result<FrequencyModel, BridgeError> {
        let mut histogram = [0u64; SYMBOLS];
        loop {
            let c = host.getbyte(id)?;
            if c < 0 {
                break;
            }
            histogram[c as usize] += 1;
        }
        host.rewind(id)?;
        Ok(FrequencyModel::from_histogram(&histogram))
    }

    fn publish_model<H: EngineHost>(host: &mut H, id: u32, model: &FrequencyModel) -> Result<(), BridgeError> {
        for (symbol, count) in model.counts().iter().enumerate() {
            host.putfreq(id, symbol as u32, i64::from(*count))?;
        }
        Ok(())
    }

    fn read_model<H: EngineHost>(host: &mut H, id: u32) -> Result<Option<FrequencyModel>, BridgeError> {
        let mut counts = [0u64; SYMBOLS];
        for (symbol, count) in counts.iter_mut().enumerate() {
            *count = host.getfreq(id, symbol as u32)?;
        }
        Ok(FrequencyModel::from_counts(&counts))
    }
}

impl Engine for RangeCoder {
    fn name(&self) -> &str {
        "range-coder"
    }

    fn compress<H: EngineHost>(&mut self, host: &mut H, id: u32) -> Result<(), BridgeError> {
        let model = Self::build_model(host, id)?;
        Self::publish_model(host, id, &model)?;

        let mut encoder = RangeEncoder::new();
        loop {
            let c = host.getbyte(id)?;
            if c < 0 {
                break;
            }
            encoder.encode(host, id, &model, c as u8)?;
        }
        encoder.finish(host, id)?;
        host.flush(id)?;

        self.last_model = Some(model);
        Ok(())
    }

    fn decompress<H: EngineHost>(&mut self, host: &mut H, id: u32) -> Result<bool, BridgeError> {
        let model = Self::read_model(host, id)?;
        let mut decoder = RangeDecoder::start(host, id)?;
        let size = host.getdecompressedsize(id)?;

        let mut success = true;
        match &model {
            Some(model) if model.total() > 0 => {
                for _ in 0..size {
                    match decoder.decode(host, id, model)? {
                        Some(symbol) => host.putbyte(id, i32::from(symbol))?,
                        None => {
                            success = false;
                            break;
                        }
                    }
                }
            }
            _ => success = size == 0,
        }

        host.flush(id)?;
        self.last_model = model;
        Ok(success)
    }
}
