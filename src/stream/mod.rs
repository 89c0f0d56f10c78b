//! Binary file streams that never raise.
//!
//! A stream that failed to open, hit an I/O error, or was closed is *invalid*: every positioning
//! and transfer call on it becomes a no-op returning `0`/`false`, and callers check
//! [`FileInStream::is_valid`] / [`FileOutStream::is_valid`] when they need to know. The
//! [`std::io::Read`] / [`std::io::Write`] impls are the exception; they surface invalidity as an
//! `io::Error` so the streams compose with `std::io::copy` and friends.
use std::io::SeekFrom;
use std::path::Path;

use serde::{Deserialize, Serialize};

mod input;
mod lock;
mod output;

pub use input::FileInStream;
pub use lock::FileLock;
pub use output::FileOutStream;

/// Byte order a stream's data is declared to use.
///
/// The stream records it for its consumers; reads and writes are raw bytes either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ByteOrder {
    #[default]
    Big,
    Little,
}

impl ByteOrder {
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            Self::Big
        } else {
            Self::Little
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Big => "big",
            Self::Little => "little",
        }
    }
}

/// Reference point for a seek, mirroring `SEEK_SET` / `SEEK_CUR` / `SEEK_END`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeekOrigin {
    Start,
    Current,
    End,
}

impl SeekOrigin {
    /// Maps a POSIX `whence` value (`0`, `1`, `2`).
    pub const fn from_whence(whence: u32) -> Option<Self> {
        match whence {
            0 => Some(Self::Start),
            1 => Some(Self::Current),
            2 => Some(Self::End),
            _ => None,
        }
    }

    // A negative absolute offset has no `SeekFrom` and is rejected like any failed seek.
    pub(crate) fn to_seek_from(self, offset: i64) -> Option<SeekFrom> {
        match self {
            Self::Start => u64::try_from(offset).ok().map(SeekFrom::Start),
            Self::Current => Some(SeekFrom::Current(offset)),
            Self::End => Some(SeekFrom::End(offset)),
        }
    }
}

pub(crate) fn invalid_stream_error() -> std::io::Error {
    std::io::Error::other("stream is not open or is in an error state")
}

/// Reads a whole file through a [`FileInStream`]; `None` if it cannot be opened.
pub fn load_file_to_bytes(path: impl AsRef<Path>) -> Option<Vec<u8>> {
    let mut stream = FileInStream::from_path(path);
    if !stream.is_valid() {
        return None;
    }
    let len = usize::try_from(stream.size()).ok()?;
    let mut bytes = vec![0u8; len];
    let read = stream.read_bytes(&mut bytes);
    bytes.truncate(read);
    Some(bytes)
}

/// Like [`load_file_to_bytes`], decoding lossily as UTF-8.
pub fn load_file_to_string(path: impl AsRef<Path>) -> Option<String> {
    load_file_to_bytes(path).map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
}
