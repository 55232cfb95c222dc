//! engine/encoder.rs
//! Carry-propagating range encoder writing through the `putbyte` primitive.

use crate::bridge::EngineHost;
use crate::constants::range_coder::{FLUSH_BYTES, TOP};
use crate::engine::model::FrequencyModel;
use crate::types::BridgeError;

pub(crate) struct RangeEncoder {
    low: u64,
    range: u32,
    cache: u8,
    cache_size: u64,
}

impl RangeEncoder {
    pub(crate) fn new() -> Self {
        Self { low: 0, range: u32::MAX, cache: 0, cache_size: 1 }
    }

    pub(crate) fn encode<H: EngineHost>(
        &mut self,
        host: &mut H,
        id: u32,
        model: &FrequencyModel,
        symbol: u8,
    ) -> Result<(), BridgeError> {
        let count = model.count(symbol);
        if count == 0 {
            return Err(BridgeError::Engine(format!(
                "symbol {} is not in the model; source changed between passes",
                symbol
            )));
        }

        let r = self.range / model.total();
        self.low += u64::from(r) * u64::from(model.start(symbol));
        self.range = r * count;

        while self.range < TOP {
            self.range <<= 8;
            self.shift_low(host, id)?;
        }
        Ok(())
    }

    /// Emit the pending bytes and the final low value.
    pub(crate) fn finish<H: EngineHost>(&mut self, host: &mut H, id: u32) -> Result<(), BridgeError> {
        for _ in 0..FLUSH_BYTES {
            self.shift_low(host, id)?;
        }
        Ok(())
    }

    fn shift_low<H: EngineHost>(&mut self, host: &mut H, id: u32) -> Result<(), BridgeError> {
        // Top byte is settled unless it is 0xFF and a carry may still arrive.
        if (self.low as u32) < 0xFF00_0000 || (self.low >> 32) != 0 {
            let carry = (self.low >> 32) as u8;
            let mut pending = self.cache;
            loop {
                host.putbyte(id, i32::from(pending.wrapping_add(carry)))?;
                pending = 0xFF;
                self.cache_size -= 1;
                if self.cache_size == 0 {
                    break;
                }
            }
            self.cache = (self.low >> 24) as u8;
        }
        self.cache_size += 1;
        self.low = u64::from((self.low as u32) << 8);
        Ok(())
    }
}
