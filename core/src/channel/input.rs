//! channel/input.rs
//! Read side of the bridge.
//!
//! Summary: serves one byte at a time from a block buffer, refilling from the
//! source file when the buffer is drained.
//! - Hot path (`next_byte`) is a single `cursor == length` branch.
//! - `file_offset` persists across refills so the buffer may be much smaller than the file.
//! - `rewind()` keeps the handle open; the next read starts again at offset 0.

use std::fs::File;
use std::io::{Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::channel::{ByteBuffer, ChannelError, ChannelKind, ChannelState};

#[derive(Debug)]
pub struct InputChannel {
    path: PathBuf,
    buffer: ByteBuffer,
    length: usize,
    cursor: usize,
    file_offset: u64,
    state: ChannelState<File>,
    stats: InputStats,
}

/// Block-level counters, updated per refill/rewind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputStats {
    pub refills: u64,
    pub bytes_loaded: u64,
    pub rewinds: u64,
    pub end_of_stream: u64,
    pub read_time: Duration,
}

impl InputChannel {
    /// Bind a channel to `path`. Nothing touches the filesystem until the first read.
    pub fn new(path: impl Into<PathBuf>, capacity: usize) -> Result<Self, ChannelError> {
        Ok(Self {
            path: path.into(),
            buffer: ByteBuffer::new(capacity)?,
            length: 0,
            cursor: 0,
            file_offset: 0,
            state: ChannelState::Unopened,
            stats: InputStats::default(),
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

    pub fn stats(&self) -> InputStats {
        self.stats
    }

    /// Bytes consumed from the source so far (sum of all refills since the last rewind).
    pub fn file_offset(&self) -> u64 {
        self.file_offset
    }

    /// Next byte, or `None` at end of stream.
    #[inline]
    pub fn next_byte(&mut self) -> Result<Option<u8>, ChannelError> {
        if self.cursor == self.length && !self.refill()? {
            self.stats.end_of_stream += 1;
            return Ok(None);
        }
        let byte = self.buffer.get(self.cursor);
        self.cursor += 1;
        Ok(Some(byte))
    }

    /// Load the next block starting at `file_offset`.
    ///
    /// Returns `false` at true end of file and leaves `length`/`cursor` untouched,
    /// so repeated calls at end of stream stay cheap and idempotent.
    pub fn refill(&mut self) -> Result<bool, ChannelError> {
        let started = Instant::now();
        let offset = self.file_offset;
        let file = self.state.get_or_open(ChannelKind::Input, &self.path, |p| File::open(p))?;

        file.seek(SeekFrom::Start(offset)).map_err(|e| ChannelError::io(&self.path, e))?;
        let n = self.buffer.fill_from(file).map_err(|e| ChannelError::io(&self.path, e))?;
        self.stats.read_time += started.elapsed();

        if n == 0 {
            return Ok(false);
        }

        self.cursor = 0;
        self.length = n;
        self.file_offset += n as u64;
        self.stats.refills += 1;
        self.stats.bytes_loaded += n as u64;
        log::trace!("refilled {} bytes from {} (offset {})", n, self.path.display(), self.file_offset);
        Ok(true)
    }

    /// Reset to the start of the source without closing the handle.
    pub fn rewind(&mut self) -> Result<(), ChannelError> {
        self.state.ensure_usable(ChannelKind::Input, &self.path)?;
        self.cursor = 0;
        self.length = 0;
        self.file_offset = 0;
        self.stats.rewinds += 1;
        Ok(())
    }

    /// Total byte length of the source, independent of the read position.
    pub fn size(&self) -> Result<u64, ChannelError> {
        self.state.ensure_usable(ChannelKind::Input, &self.path)?;
        self.source_len()
    }

    /// Length of the bound source file in any lifecycle state, including `Closed`.
    pub fn source_len(&self) -> Result<u64, ChannelError> {
        let meta = std::fs::metadata(&self.path).map_err(|e| ChannelError::io(&self.path, e))?;
        Ok(meta.len())
    }

    /// Release the handle if one was opened. Idempotent.
    pub fn close(&mut self) {
        // Drop buffered bytes so the next read hits `refill` and reports the closed state.
        self.cursor = 0;
        self.length = 0;
        if self.state.close() {
            log::debug!("closed input channel {}", self.path.display());
        }
    }
}
