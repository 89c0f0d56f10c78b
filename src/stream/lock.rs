use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// Advisory lock: keeps a file open in append mode for as long as the lock is held.
///
/// This only stops cooperating callers from deleting or renaming the file on platforms that
/// refuse to do so while a handle is open. It does not serialize reads or writes.
#[derive(Debug, Default)]
pub struct FileLock {
    held: Option<(File, PathBuf)>,
}

impl FileLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Releases any previous lock, then opens `path` (creating it if needed).
    pub fn lock(&mut self, path: impl AsRef<Path>) -> bool {
        self.release();

        let path = path.as_ref();
        match OpenOptions::new().append(true).create(true).open(path) {
            Ok(file) => {
                self.held = Some((file, path.to_path_buf()));
                true
            }
            Err(err) => {
                log::debug!("failed to lock {}: {err}", path.display());
                false
            }
        }
    }

    pub fn release(&mut self) {
        self.held = None;
    }

    pub fn is_locked(&self) -> bool {
        self.held.is_some()
    }

    pub fn path(&self) -> Option<&Path> {
        self.held.as_ref().map(|(_, path)| path.as_path())
    }
}
