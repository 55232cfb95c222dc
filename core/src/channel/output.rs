//! channel/output.rs
//! Write side of the bridge.
//!
//! Summary: collects bytes into a block buffer and writes the block when it fills
//! or when `flush()` is called.
//! - The destination is created (and truncated) on the first flush.
//! - `close()` never flushes; unflushed bytes are dropped.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::channel::{ByteBuffer, ChannelError, ChannelKind, ChannelState};

#[derive(Debug)]
pub struct OutputChannel {
    path: PathBuf,
    buffer: ByteBuffer,
    cursor: usize,
    state: ChannelState<File>,
    stats: OutputStats,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputStats {
    pub flushes: u64,
    pub bytes_written: u64,
    pub write_time: Duration,
}

impl OutputChannel {
    pub fn new(path: impl Into<PathBuf>, capacity: usize) -> Result<Self, ChannelError> {
        Ok(Self {
            path: path.into(),
            buffer: ByteBuffer::new(capacity)?,
            cursor: 0,
            state: ChannelState::Unopened,
            stats: OutputStats::default(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    pub fn state(&self) -> &ChannelState<File> {
        &self.state
    }

    pub fn stats(&self) -> OutputStats {
        self.stats
    }

    /// Buffered bytes not yet written to the destination.
    pub fn pending(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn put_byte(&mut self, value: u8) -> Result<(), ChannelError> {
        if self.cursor == self.buffer.capacity() {
            self.flush()?;
        }
        self.state.ensure_usable(ChannelKind::Output, &self.path)?;
        self.buffer.set(self.cursor, value);
        self.cursor += 1;
        Ok(())
    }

    /// Write exactly `pending()` bytes and reset the buffer.
    /// An empty flush still opens (creates) the destination and writes nothing.
    pub fn flush(&mut self) -> Result<(), ChannelError> {
        let started = Instant::now();
        let file = self.state.get_or_open(ChannelKind::Output, &self.path, |p| File::create(p))?;

        file.write_all(self.buffer.filled(self.cursor))
            .map_err(|e| ChannelError::io(&self.path, e))?;

        self.stats.flushes += 1;
        self.stats.bytes_written += self.cursor as u64;
        self.stats.write_time += started.elapsed();
        log::trace!("flushed {} bytes to {}", self.cursor, self.path.display());
        self.cursor = 0;
        Ok(())
    }

    /// Release the handle if one was opened. Idempotent; does not flush.
    pub fn close(&mut self) {
        if self.cursor > 0 {
            log::warn!(
                "closing output channel {} with {} unflushed bytes",
                self.path.display(),
                self.cursor
            );
            self.cursor = 0;
        }
        if self.state.close() {
            log::debug!("closed output channel {}", self.path.display());
        }
    }
}
