//! engine/decoder.rs
//! Range decoder reading through the `getbyte` primitive.
//! Bytes past end of stream read as 0.

use crate::bridge::EngineHost;
use crate::constants::range_coder::{FLUSH_BYTES, TOP};
use crate::engine::model::FrequencyModel;
use crate::types::BridgeError;

pub(crate) struct RangeDecoder {
    code: u32,
    range: u32,
}

impl RangeDecoder {
    /// Prime the decoder with the bytes the encoder emitted first.
    pub(crate) fn start<H: EngineHost>(host: &mut H, id: u32) -> Result<Self, BridgeError> {
        let mut code = 0u32;
        for _ in 0..FLUSH_BYTES {
            code = (code << 8) | next_byte(host, id)?;
        }
        Ok(Self { code, range: u32::MAX })
    }

    /// Decode one symbol, or `None` if the stream points outside the model.
    pub(crate) fn decode<H: EngineHost>(
        &mut self,
        host: &mut H,
        id: u32,
        model: &FrequencyModel,
    ) -> Result<Option<u8>, BridgeError> {
        let r = self.range / model.total();
        let value = self.code / r;
        if value >= model.total() {
            return Ok(None);
        }

        let symbol = model.find(value);
        self.code -= r * model.start(symbol);
        self.range = r * model.count(symbol);

        while self.range < TOP {
            self.code = (self.code << 8) | next_byte(host, id)?;
            self.range <<= 8;
        }
        Ok(Some(symbol))
    }
}

#[inline]
fn next_byte<H: EngineHost>(host: &mut H, id: u32) -> Result<u32, BridgeError> {
    let c = host.getbyte(id)?;
    Ok(if c < 0 { 0 } else { c as u32 })
}
