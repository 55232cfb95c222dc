// ## 📂 File: `src/constants.rs`

/// End-of-stream sentinel returned by the `getbyte` primitive.
/// Never a valid byte value.
pub const END_OF_STREAM: i32 = -1;

/// Defaults when Option<T> is None
pub const DEFAULT_BUFFER_CAPACITY: usize = 64 * 1024; // 64 KiB

/// Max buffer capacity sanity bound (32 MiB).
pub const MAX_BUFFER_CAPACITY: usize = 32 * 1024 * 1024;

/// Input channel whose length `getdecompressedsize` reports by default.
pub const DEFAULT_SIZE_SOURCE: usize = 0;

/// Largest value accepted by the `putbyte` primitive.
pub const MAX_BYTE_VALUE: i32 = u8::MAX as i32;

/// Range coder parameters (reference engine).
pub mod range_coder {
    /// Number of distinct symbols in an order-0 byte model.
    pub const SYMBOLS: usize = 256;
    /// Renormalisation threshold: range must stay above 2^24.
    pub const TOP: u32 = 1 << 24;
    /// Upper bound on the scaled frequency total.
    pub const MAX_TOTAL: u64 = 1 << 16;
    /// Bytes emitted on flush / consumed on decoder start.
    pub const FLUSH_BYTES: usize = 5;
}
