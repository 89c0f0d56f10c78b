use std::path::Path;

use crate::path::is_valid_path;
use crate::platform::{EntryKind, Filesystem};

use super::{DirOps, join, parent_of, resolve_components, strip_verbatim_prefix};

impl<F: Filesystem> DirOps<'_, F> {
    /// Copies one file, creating the destination's parent directory when missing.
    pub fn copy_file(&self, from: &str, to: &str) -> bool {
        if !is_valid_path(to, false) {
            self.logger.error(format_args!(
                "Unable to copy file because destination name contains illegal characters: {to}"
            ));
            return false;
        }

        if let Some(parent) = parent_of(to)
            && !self.is_directory(parent)
        {
            self.make_directory(parent);
        }

        match self.fs.copy_file(Path::new(from), Path::new(to)) {
            Ok(_) => true,
            Err(err) => {
                self.logger
                    .error(format_args!("Failed to copy file {from} to {to}: {err}"));
                false
            }
        }
    }

    /// Recursively copies `from` into `to`.
    ///
    /// `to` may not lie inside `from`. Stops at the first entry that fails; entries copied
    /// before it are left in place.
    pub fn copy_directory(&self, from: &str, to: &str) -> bool {
        if !is_valid_path(to, true) {
            self.logger.error(format_args!(
                "Unable to copy directory because destination name contains illegal characters: {to}"
            ));
            return false;
        }
        if !self.is_directory(from) {
            self.logger.error(format_args!(
                "Unable to copy directory because the source is not a directory: {from}"
            ));
            return false;
        }
        let nested = self.resolved(to).starts_with(&self.resolved(from))
            || resolve_components(to).starts_with(&resolve_components(from));
        if nested {
            self.logger.error(format_args!(
                "Unable to copy directory {from} into itself: {to}"
            ));
            return false;
        }

        let entries = match self.fs.list_entries(Path::new(from)) {
            Ok(entries) => entries,
            Err(err) => {
                self.logger
                    .error(format_args!("Unable to read directory {from}: {err}"));
                return false;
            }
        };
        if !self.make_directory(to) {
            return false;
        }

        for entry in entries {
            let Some(name) = entry.path.file_name() else {
                continue;
            };
            let source = entry.path.to_string_lossy();
            let destination = join(to, &name.to_string_lossy());
            let copied = if entry.kind == EntryKind::Dir {
                self.copy_directory(&source, &destination)
            } else {
                self.copy_file(&source, &destination)
            };
            if !copied {
                self.logger.error(format_args!(
                    "Stopping directory copy at {source}; {from} was only partially copied"
                ));
                return false;
            }
        }
        true
    }

    /// Renames a file. Refuses to overwrite an existing destination.
    pub fn move_file(&self, from: &str, to: &str) -> bool {
        if !is_valid_path(to, false) {
            self.logger.error(format_args!(
                "Unable to move file because destination name contains illegal characters: {to}"
            ));
            return false;
        }
        if self.exists(to) {
            self.logger.error(format_args!(
                "Unable to move file because there is an existing file at the destination path: {to}"
            ));
            return false;
        }
        self.rename(from, to)
    }

    /// Renames a directory. Refuses to overwrite an existing destination.
    pub fn move_directory(&self, from: &str, to: &str) -> bool {
        if !is_valid_path(to, true) {
            self.logger.error(format_args!(
                "Unable to move directory because destination name contains illegal characters: {to}"
            ));
            return false;
        }
        if self.exists(to) {
            self.logger.error(format_args!(
                "Unable to move directory because there is an existing directory at the destination path: {to}"
            ));
            return false;
        }
        self.rename(from, to)
    }

    /// Components of `path` with symlinks resolved as far as the path exists.
    fn resolved(&self, path: &str) -> Vec<String> {
        let canonical = |path: &str| {
            self.fs
                .canonicalize(Path::new(path))
                .ok()
                .map(|found| resolve_components(strip_verbatim_prefix(&found.to_string_lossy())))
        };
        if let Some(components) = canonical(path) {
            return components;
        }

        let mut components = resolve_components(path);
        if let Some(parent) = parent_of(path)
            && let Some(mut resolved_parent) = canonical(parent)
            && let Some(leaf) = components.pop()
        {
            resolved_parent.push(leaf);
            components = resolved_parent;
        }
        components
    }

    fn rename(&self, from: &str, to: &str) -> bool {
        match self.fs.rename(Path::new(from), Path::new(to)) {
            Ok(()) => true,
            Err(err) => {
                self.logger
                    .error(format_args!("Failed to move {from} to {to}: {err}"));
                false
            }
        }
    }
}
