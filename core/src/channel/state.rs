//! channel/state.rs
//! Per-channel handle lifecycle: `Unopened -> Open -> Closed`.
//!
//! - `Open` is entered on first access, never at construction.
//! - `Closed` is terminal; every operation except `close()` fails on it.

use std::io;
use std::path::Path;

use crate::channel::{ChannelError, ChannelKind};

#[derive(Debug)]
pub enum ChannelState<H> {
    Unopened,
    Open(H),
    Closed,
}

impl<H> Default for ChannelState<H> {
    fn default() -> Self {
        ChannelState::Unopened
    }
}

impl<H> ChannelState<H> {
    pub fn is_open(&self) -> bool {
        matches!(self, ChannelState::Open(_))
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, ChannelState::Closed)
    }

    /// Fail with `ChannelError::Closed` once the channel reached its terminal state.
    pub fn ensure_usable(&self, kind: ChannelKind, path: &Path) -> Result<(), ChannelError> {
        if self.is_closed() {
            return Err(ChannelError::Closed { kind, path: path.to_path_buf() });
        }
        Ok(())
    }

    /// Return the open handle, calling `open` only while `Unopened`.
    /// A failed open leaves the state `Unopened`; `Closed` never reopens.
    pub fn get_or_open<F>(&mut self, kind: ChannelKind, path: &Path, open: F) -> Result<&mut H, ChannelError>
    where
        F: FnOnce(&Path) -> io::Result<H>,
    {
        if let ChannelState::Unopened = self {
            let handle = open(path).map_err(|e| ChannelError::io(path, e))?;
            log::debug!("opened {} channel {}", kind, path.display());
            *self = ChannelState::Open(handle);
        }

        match self {
            ChannelState::Open(handle) => Ok(handle),
            ChannelState::Unopened | ChannelState::Closed => {
                Err(ChannelError::Closed { kind, path: path.to_path_buf() })
            }
        }
    }

    /// Move to `Closed`, dropping the handle if one was opened.
    /// Returns `true` when a handle was released.
    pub fn close(&mut self) -> bool {
        matches!(std::mem::replace(self, ChannelState::Closed), ChannelState::Open(_))
    }
}
