//! engine/mod.rs
//! Native engines that speak the bridge primitives.
//!
//! - `range_coder`: two-pass order-0 range coder with a static model
//!   published through the shared frequency table.

pub mod model;
pub mod range_coder;

mod encoder;
mod decoder;

pub use model::FrequencyModel;
pub use range_coder::RangeCoder;
