use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::constants::DEFAULT_BUFFER_CAPACITY;

/// CRC32 of a whole file, read in `DEFAULT_BUFFER_CAPACITY` blocks.
pub fn file_checksum(path: &Path) -> io::Result<u32> {
    let mut file = File::open(path)?;
    let mut hasher = crc32fast::Hasher::new();
    let mut buf = vec![0u8; DEFAULT_BUFFER_CAPACITY];

    loop {
        match file.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => hasher.update(&buf[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(hasher.finalize())
}
