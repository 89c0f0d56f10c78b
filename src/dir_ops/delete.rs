use std::path::Path;

use crate::platform::Filesystem;

use super::{DirOps, ListOptions};

impl<F: Filesystem> DirOps<'_, F> {
    /// Removes a regular file. Anything else is left alone and reported as `false`.
    pub fn delete_file(&self, path: &str) -> bool {
        if !self.is_file(path) {
            return false;
        }
        match self.fs.remove_file(Path::new(path)) {
            Ok(()) => true,
            Err(err) => {
                self.logger
                    .error(format_args!("Failed to delete file {path}: {err}"));
                false
            }
        }
    }

    /// Removes a directory tree.
    ///
    /// # Panics
    ///
    /// When `path` resolves to the filesystem root.
    pub fn delete_directory(&self, path: &str, fail_if_not_empty: bool) -> bool {
        if !self.is_directory(path) {
            return false;
        }
        if self.is_root(path) {
            self.logger
                .fatal(format_args!("Attempted to delete root directory: {path}"));
        }
        if fail_if_not_empty && !self.is_empty(path) {
            return false;
        }

        match self.fs.remove_dir_all(Path::new(path)) {
            Ok(()) => true,
            Err(err) => {
                self.logger
                    .error(format_args!("Failed to delete directory {path}: {err}"));
                false
            }
        }
    }

    /// Deletes every immediate child of `path`, keeping `path` itself.
    ///
    /// A symlinked `path` is refused rather than cleared through. Child symlinks are unlinked,
    /// never followed. Children that cannot be deleted are logged individually; the result only
    /// reports whether `path` was a directory that could be cleared at all.
    ///
    /// # Panics
    ///
    /// When `path` resolves to the filesystem root.
    pub fn clear_directory(&self, path: &str) -> bool {
        if !self.is_directory(path) {
            return false;
        }
        if self.is_root(path) {
            self.logger
                .fatal(format_args!("Attempted to clear root directory: {path}"));
        }
        if self.is_symlink(path) {
            self.logger.error(format_args!(
                "Refusing to clear directory through a symbolic link: {path}"
            ));
            return false;
        }

        for child in self.directory_contents(path, ListOptions::default()) {
            let deleted = if self.is_symlink(&child) {
                self.unlink(&child)
            } else if self.is_file(&child) {
                self.delete_file(&child)
            } else if self.is_directory(&child) {
                self.delete_directory(&child, false)
            } else {
                self.fs.remove_file(Path::new(&child)).is_ok()
            };

            if !deleted {
                self.logger.error(format_args!(
                    "Failed to delete filesystem object: {child}"
                ));
            }
        }
        true
    }

    fn unlink(&self, link: &str) -> bool {
        let link = Path::new(link);
        // Directory links on Windows are removed like directories.
        self.fs.remove_file(link).is_ok()
            || (cfg!(windows) && self.fs.remove_dir_all(link).is_ok())
    }
}
