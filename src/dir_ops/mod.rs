//! Directory-level operations guarded by the path sanitizer.
//!
//! Operations report failure as `false` (or an empty/`None` result) and describe the cause through
//! the injected [`Logger`]. Destinations are validated with [`is_valid_path`] before anything is
//! touched. Deleting or clearing the filesystem root is a programming error and goes through
//! [`Logger::fatal`].
//!
//! [`is_valid_path`]: crate::path::is_valid_path
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::logger::Logger;
use crate::path::{SEPARATOR, is_separator, make_absolute, split_path};
use crate::platform::{Filesystem, NativeFilesystem};

mod copy_move;
mod delete;
mod list;

#[cfg(test)]
mod tests;

/// Which entries a directory listing returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListOptions {
    #[serde(default)]
    pub recursive: bool,
    #[serde(default = "default_true")]
    pub include_files: bool,
    #[serde(default = "default_true")]
    pub include_dirs: bool,
}

const fn default_true() -> bool {
    true
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            recursive: false,
            include_files: true,
            include_dirs: true,
        }
    }
}

pub struct DirOps<'a, F: Filesystem = NativeFilesystem> {
    fs: F,
    logger: &'a Logger,
}

impl<F: Filesystem> std::fmt::Debug for DirOps<'_, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirOps")
            .field("logger_state", &self.logger.state())
            .finish_non_exhaustive()
    }
}

impl<'a> DirOps<'a, NativeFilesystem> {
    pub fn native(logger: &'a Logger) -> Self {
        Self::new(NativeFilesystem::default(), logger)
    }
}

impl<'a, F: Filesystem> DirOps<'a, F> {
    pub fn new(fs: F, logger: &'a Logger) -> Self {
        Self { fs, logger }
    }

    pub fn logger(&self) -> &'a Logger {
        self.logger
    }

    pub fn filesystem(&self) -> &F {
        &self.fs
    }

    pub fn exists(&self, path: &str) -> bool {
        self.fs.exists(Path::new(path))
    }

    pub fn is_file(&self, path: &str) -> bool {
        self.fs.is_file(Path::new(path))
    }

    pub fn is_directory(&self, path: &str) -> bool {
        self.fs.is_directory(Path::new(path))
    }

    pub fn is_absolute(&self, path: &str) -> bool {
        self.fs.is_absolute(path)
    }

    pub fn is_relative(&self, path: &str) -> bool {
        !self.is_absolute(path)
    }

    /// `true` when a path is a symlink, even one whose target is missing.
    pub fn is_symlink(&self, path: &str) -> bool {
        self.fs.is_symlink(Path::new(path))
    }

    /// `true` when `path` resolves to a filesystem root (`/`, or a bare drive such as `C:`).
    ///
    /// `.` and `..` are resolved lexically first, so `/tmp/..` counts as the root. Paths that
    /// exist are also checked after resolving symlinks, so a link to `/` is a root too.
    pub fn is_root(&self, path: &str) -> bool {
        if is_root_components(&resolve_components(path)) {
            return true;
        }
        match self.fs.canonicalize(Path::new(path)) {
            Ok(canonical) => {
                let canonical = canonical.to_string_lossy();
                is_root_components(&resolve_components(strip_verbatim_prefix(&canonical)))
            }
            Err(_) => false,
        }
    }

    /// `false` (and an error log) for anything that is not a directory.
    pub fn is_empty(&self, path: &str) -> bool {
        if !self.is_directory(path) {
            self.logger.error(format_args!(
                "Non-directory path passed to is_empty(): {path}"
            ));
            return false;
        }
        match self.fs.list_entries(Path::new(path)) {
            Ok(entries) => entries.is_empty(),
            Err(err) => {
                self.logger
                    .error(format_args!("Unable to read directory {path}: {err}"));
                false
            }
        }
    }

    /// Creates `path` and any missing parents.
    pub fn make_directory(&self, path: &str) -> bool {
        if !crate::path::is_valid_path(path, true) {
            self.logger.error(format_args!(
                "Unable to create directory because name contains illegal characters: {path}"
            ));
            return false;
        }
        match self.fs.make_directory(Path::new(path)) {
            Ok(()) => true,
            Err(err) => {
                self.logger
                    .error(format_args!("Unable to create directory {path}: {err}"));
                false
            }
        }
    }

    /// Size in bytes, `None` when the path cannot be stat'ed.
    pub fn file_size(&self, path: &str) -> Option<u64> {
        self.fs.file_size(Path::new(path)).ok()
    }

    /// Modification time as seconds since the Unix epoch, `0` when unavailable.
    pub fn last_modified_time(&self, path: &str) -> u64 {
        self.fs
            .modified_time(Path::new(path))
            .ok()
            .and_then(|time| time.duration_since(std::time::UNIX_EPOCH).ok())
            .map_or(0, |elapsed| elapsed.as_secs())
    }
}

/// Components of the absolutized `path` with `.` and `..` applied.
fn resolve_components(path: &str) -> Vec<String> {
    let absolute = make_absolute(path);
    let mut resolved: Vec<String> = Vec::new();
    for component in split_path(&absolute) {
        match component {
            "." => {}
            ".." => {
                resolved.pop();
            }
            other => resolved.push(other.to_string()),
        }
    }
    resolved
}

fn is_root_components(components: &[String]) -> bool {
    match components {
        [] => true,
        [drive] => drive.ends_with(':'),
        _ => false,
    }
}

// Windows canonical paths carry a `\\?\` prefix that would read as a component.
fn strip_verbatim_prefix(path: &str) -> &str {
    path.strip_prefix(r"\\?\").unwrap_or(path)
}

/// Appends `name` to `dir` with exactly one separator between them.
fn join(dir: &str, name: &str) -> String {
    if dir.is_empty() || dir.ends_with(is_separator) {
        format!("{dir}{name}")
    } else {
        format!("{dir}{SEPARATOR}{name}")
    }
}

fn parent_of(path: &str) -> Option<&str> {
    let trimmed = path.trim_end_matches(is_separator);
    let idx = trimmed.rfind(is_separator)?;
    let parent = &trimmed[..idx];
    if parent.is_empty() { None } else { Some(parent) }
}
