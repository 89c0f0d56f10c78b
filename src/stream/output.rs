use std::fs::{File, OpenOptions};
use std::io::{self, Seek, Write};
use std::path::{Path, PathBuf};

use super::{ByteOrder, SeekOrigin, invalid_stream_error};

/// Write-only binary file stream.
///
/// `size` is the high-water mark of every write: seeking backwards and overwriting never
/// shrinks it, and seeking past the end does not grow it until something is written there.
#[derive(Debug, Default)]
pub struct FileOutStream {
    file: Option<File>,
    name: PathBuf,
    byte_order: ByteOrder,
    size: u64,
    bad: bool,
}

impl FileOutStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates (or truncates) `path` for big-endian data.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self::with_byte_order(path, ByteOrder::default())
    }

    pub fn with_byte_order(path: impl AsRef<Path>, byte_order: ByteOrder) -> Self {
        let mut stream = Self::new();
        stream.open(path, byte_order);
        stream
    }

    /// Creates or truncates `path`. Any open handle is closed first.
    pub fn open(&mut self, path: impl AsRef<Path>, byte_order: ByteOrder) {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        self.open_with(path.as_ref(), byte_order, &options);
        self.size = 0;
    }

    /// Opens `path` for writing without truncating it, creating it if needed.
    ///
    /// `size` starts at the current file length and the stream is positioned at offset 0.
    pub fn update(&mut self, path: impl AsRef<Path>, byte_order: ByteOrder) {
        let mut options = OpenOptions::new();
        options.write(true).create(true);
        self.open_with(path.as_ref(), byte_order, &options);

        if self.seek64(0, SeekOrigin::End) {
            self.size = self.tell64();
        }
        self.seek64(0, SeekOrigin::Start);
    }

    fn open_with(&mut self, path: &Path, byte_order: ByteOrder, options: &OpenOptions) {
        self.close();
        self.name = path.to_path_buf();
        self.byte_order = byte_order;

        match options.open(path) {
            Ok(file) => self.file = Some(file),
            Err(err) => log::debug!("failed to open {} for writing: {err}", path.display()),
        }
    }

    pub fn close(&mut self) {
        self.file = None;
        self.size = 0;
        self.bad = false;
    }

    /// Writes all of `buf` and returns the number of bytes written (`0` on an invalid stream).
    pub fn write_bytes(&mut self, buf: &[u8]) -> usize {
        if !self.is_valid() {
            return 0;
        }
        let Some(file) = self.file.as_mut() else {
            return 0;
        };

        if let Err(err) = file.write_all(buf) {
            log::debug!("write to {} failed: {err}", self.name.display());
            self.bad = true;
            return 0;
        }
        self.size = self.size.max(self.tell64());
        buf.len()
    }

    pub fn seek(&mut self, offset: i32, origin: SeekOrigin) -> bool {
        self.seek64(i64::from(offset), origin)
    }

    pub fn seek64(&mut self, offset: i64, origin: SeekOrigin) -> bool {
        if !self.is_valid() {
            return false;
        }
        let (Some(file), Some(target)) = (self.file.as_mut(), origin.to_seek_from(offset)) else {
            return false;
        };
        file.seek(target).is_ok()
    }

    pub fn tell(&self) -> u32 {
        self.tell64() as u32
    }

    pub fn tell64(&self) -> u64 {
        if !self.is_valid() {
            return 0;
        }
        let Some(mut file) = self.file.as_ref() else {
            return 0;
        };
        file.stream_position().unwrap_or(0)
    }

    /// `true` when the offset sits exactly on the high-water mark.
    pub fn eof(&self) -> bool {
        self.tell64() == self.size()
    }

    pub fn is_valid(&self) -> bool {
        self.file.is_some() && !self.bad
    }

    /// Highest offset reached by any write; `0` on an invalid stream.
    pub fn size(&self) -> u64 {
        if !self.is_valid() {
            return 0;
        }
        self.size
    }

    pub fn file_name(&self) -> &Path {
        &self.name
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    pub fn set_byte_order(&mut self, byte_order: ByteOrder) {
        self.byte_order = byte_order;
    }
}

/// Opens an independent handle on the same file, positioned where `self` is.
///
/// The copy opens in update mode so the file is not truncated under the source.
impl Clone for FileOutStream {
    fn clone(&self) -> Self {
        let mut copy = Self::new();
        copy.update(&self.name, self.byte_order);
        if self.is_valid()
            && let Ok(offset) = i64::try_from(self.tell64())
        {
            copy.seek64(offset, SeekOrigin::Start);
        }
        copy
    }
}

impl Write for FileOutStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.is_valid() {
            return Err(invalid_stream_error());
        }
        match self.write_bytes(buf) {
            0 if !buf.is_empty() => Err(invalid_stream_error()),
            written => Ok(written),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) if !self.bad => file.flush(),
            _ => Err(invalid_stream_error()),
        }
    }
}
