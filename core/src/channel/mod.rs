//! channel/mod.rs
//! Buffered, id-addressed byte channels.
//!
//! Notes:
//! - A channel owns one `ByteBuffer` and at most one file handle.
//! - Handles are opened on first use and released on `close()`.
//! - The per-byte path touches only the buffer; disk I/O happens in whole blocks.

pub mod buffer;
pub mod state;
pub mod input;
pub mod output;
pub mod table;

use std::fmt;
use std::io;
use std::path::PathBuf;

pub use buffer::ByteBuffer;
pub use state::ChannelState;
pub use input::InputChannel;
pub use output::OutputChannel;
pub use table::ChannelTable;

/// Which side of the bridge a channel lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    Input,
    Output,
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChannelKind::Input  => "input",
            ChannelKind::Output => "output",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("unknown {kind} channel {id} (table holds {len})")]
    UnknownChannel { kind: ChannelKind, id: u32, len: usize },

    #[error("{kind} channel {} is closed", path.display())]
    Closed { kind: ChannelKind, path: PathBuf },

    #[error("invalid buffer capacity {capacity} (allowed 1..={max})")]
    InvalidCapacity { capacity: usize, max: usize },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ChannelError {
    pub(crate) fn io(path: &std::path::Path, source: io::Error) -> Self {
        ChannelError::Io { path: path.to_path_buf(), source }
    }
}
