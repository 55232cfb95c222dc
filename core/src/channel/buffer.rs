//! channel/buffer.rs
//! Fixed-capacity byte block, the unit of disk I/O for a channel.

use std::io::{self, Read};

use crate::channel::ChannelError;
use crate::constants::MAX_BUFFER_CAPACITY;

#[derive(Debug)]
pub struct ByteBuffer {
    data: Box<[u8]>,
}

impl ByteBuffer {
    /// Allocate a zeroed block of `capacity` bytes.
    ///
    /// # Errors
    /// - `ChannelError::InvalidCapacity` if `capacity` is 0 or above `MAX_BUFFER_CAPACITY`.
    pub fn new(capacity: usize) -> Result<Self, ChannelError> {
        validate_capacity(capacity)?;
        Ok(Self { data: vec![0u8; capacity].into_boxed_slice() })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn get(&self, index: usize) -> u8 {
        self.data[index]
    }

    #[inline]
    pub fn set(&mut self, index: usize, value: u8) {
        self.data[index] = value;
    }

    /// First `len` bytes of the block.
    pub fn filled(&self, len: usize) -> &[u8] {
        &self.data[..len]
    }

    /// Read from `r` until the block is full or `r` reports end of file.
    /// Returns the number of bytes stored at the front of the block.
    pub fn fill_from<R: Read>(&mut self, r: &mut R) -> io::Result<usize> {
        let mut off = 0;

        while off < self.data.len() {
            match r.read(&mut self.data[off..]) {
                Ok(0) => break,
                Ok(n) => off += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        Ok(off)
    }
}

pub fn validate_capacity(capacity: usize) -> Result<(), ChannelError> {
    if capacity == 0 || capacity > MAX_BUFFER_CAPACITY {
        return Err(ChannelError::InvalidCapacity { capacity, max: MAX_BUFFER_CAPACITY });
    }
    Ok(())
}
