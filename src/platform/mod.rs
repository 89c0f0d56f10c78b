//! Filesystem capability used by the directory layer.
//!
//! Everything that touches the disk in [`crate::dir_ops`] goes through [`Filesystem`], so the
//! path algebra in [`crate::path`] stays string-only. [`NativeFilesystem`] is the
//! implementation selected for the build target.
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

mod std_fs;

pub use std_fs::StdFilesystem;

/// Implementation for the current target.
pub type NativeFilesystem = StdFilesystem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub path: PathBuf,
    pub kind: EntryKind,
}

pub trait Filesystem {
    fn exists(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    fn is_directory(&self, path: &Path) -> bool;

    /// `true` when `path` itself is a symbolic link, whatever it points at.
    fn is_symlink(&self, path: &Path) -> bool;

    /// Absolute form of `path` with every symlink resolved.
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;

    fn is_absolute(&self, path: &str) -> bool {
        crate::path::is_absolute(path)
    }

    /// Creates `path` and any missing parents.
    fn make_directory(&self, path: &Path) -> io::Result<()>;

    /// Immediate children of `dir`, sorted by file name. Symlinks are not followed.
    fn list_entries(&self, dir: &Path) -> io::Result<Vec<Entry>>;

    /// Every descendant of `dir` in pre-order, sorted by file name within each directory.
    fn walk_entries(&self, dir: &Path) -> io::Result<Vec<Entry>> {
        let mut out = Vec::new();
        for entry in self.list_entries(dir)? {
            let descend = entry.kind == EntryKind::Dir;
            let path = entry.path.clone();
            out.push(entry);
            if descend {
                out.extend(self.walk_entries(&path)?);
            }
        }
        Ok(out)
    }

    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<u64>;

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;

    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;

    fn file_size(&self, path: &Path) -> io::Result<u64>;

    fn modified_time(&self, path: &Path) -> io::Result<SystemTime>;
}
