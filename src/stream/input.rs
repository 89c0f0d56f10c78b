use std::fs::File;
use std::io::{self, Read, Seek};
use std::path::{Path, PathBuf};

use super::{ByteOrder, SeekOrigin, invalid_stream_error};

/// Read-only binary file stream.
///
/// The total size is captured once when the file is opened.
#[derive(Debug, Default)]
pub struct FileInStream {
    file: Option<File>,
    name: PathBuf,
    byte_order: ByteOrder,
    size: u64,
    bad: bool,
}

impl FileInStream {
    /// A closed stream; call [`FileInStream::open`] before use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens `path` as big-endian data.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self::with_byte_order(path, ByteOrder::default())
    }

    pub fn with_byte_order(path: impl AsRef<Path>, byte_order: ByteOrder) -> Self {
        let mut stream = Self::new();
        stream.open(path, byte_order);
        stream
    }

    /// (Re)opens the stream. Any open handle is closed first; failure leaves the stream invalid.
    pub fn open(&mut self, path: impl AsRef<Path>, byte_order: ByteOrder) {
        self.close();

        let path = path.as_ref();
        self.name = path.to_path_buf();
        self.byte_order = byte_order;
        self.bad = false;
        self.size = 0;

        match File::open(path) {
            Ok(file) => self.file = Some(file),
            Err(err) => {
                log::debug!("failed to open {} for reading: {err}", path.display());
                return;
            }
        }

        if self.seek64(0, SeekOrigin::End) {
            self.size = self.tell64();
        }
        self.seek64(0, SeekOrigin::Start);
    }

    pub fn close(&mut self) {
        self.file = None;
    }

    /// Fills as much of `buf` as the file allows and returns the number of bytes read.
    ///
    /// Reaching end of file is not an error. Returns `0` on an invalid stream.
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> usize {
        if !self.is_valid() {
            return 0;
        }
        let Some(file) = self.file.as_mut() else {
            return 0;
        };

        let mut filled = 0;
        while filled < buf.len() {
            match file.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => {
                    log::debug!("read from {} failed: {err}", self.name.display());
                    self.bad = true;
                    break;
                }
            }
        }
        filled
    }

    pub fn seek(&mut self, offset: i32, origin: SeekOrigin) -> bool {
        self.seek64(i64::from(offset), origin)
    }

    /// Repositions the stream; `false` if the stream is invalid or the seek was rejected.
    pub fn seek64(&mut self, offset: i64, origin: SeekOrigin) -> bool {
        if !self.is_valid() {
            return false;
        }
        let (Some(file), Some(target)) = (self.file.as_mut(), origin.to_seek_from(offset)) else {
            return false;
        };
        file.seek(target).is_ok()
    }

    /// Current offset truncated to 32 bits; `0` on an invalid stream.
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

    pub fn eof(&self) -> bool {
        self.tell64() >= self.size
    }

    /// Bytes left between the current offset and the size captured at open time.
    pub fn remaining(&self) -> u64 {
        self.size.saturating_sub(self.tell64())
    }

    pub fn is_valid(&self) -> bool {
        self.file.is_some() && !self.bad
    }

    /// File size captured at open time.
    pub fn size(&self) -> u64 {
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
impl Clone for FileInStream {
    fn clone(&self) -> Self {
        let mut copy = Self::with_byte_order(&self.name, self.byte_order);
        if self.is_valid()
            && let Ok(offset) = i64::try_from(self.tell64())
        {
            copy.seek64(offset, SeekOrigin::Start);
        }
        copy
    }
}

impl Read for FileInStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if !self.is_valid() {
            return Err(invalid_stream_error());
        }
        let file = self.file.as_mut().ok_or_else(invalid_stream_error)?;
        file.read(buf).inspect_err(|err| {
            if err.kind() != io::ErrorKind::Interrupted {
                self.bad = true;
            }
        })
    }
}
