use std::path::Path;

use crate::path::make_absolute;
use crate::platform::{EntryKind, Filesystem};

use super::{DirOps, ListOptions};

impl<F: Filesystem> DirOps<'_, F> {
    /// Absolute paths of the entries under `path`, filtered by `options`.
    ///
    /// Entries are sorted by name within each directory; recursive listings are pre-order.
    /// Symlinks are listed with the files and never descended into. A path that is not a
    /// directory yields an empty list.
    pub fn directory_contents(&self, path: &str, options: ListOptions) -> Vec<String> {
        if !self.is_directory(path) {
            return Vec::new();
        }

        let dir = make_absolute(path);
        let listed = if options.recursive {
            self.fs.walk_entries(Path::new(&dir))
        } else {
            self.fs.list_entries(Path::new(&dir))
        };
        let entries = match listed {
            Ok(entries) => entries,
            Err(err) => {
                self.logger
                    .error(format_args!("Unable to list directory {dir}: {err}"));
                return Vec::new();
            }
        };

        entries
            .into_iter()
            .filter(|entry| match entry.kind {
                EntryKind::Dir => options.include_dirs,
                _ => options.include_files,
            })
            .map(|entry| entry.path.to_string_lossy().into_owned())
            .collect()
    }

    /// Extension (without the dot) of the first file in `dir` whose stem is `stem`.
    ///
    /// Returns an empty string when there is no such file.
    pub fn find_file_extension(&self, dir: &str, stem: &str) -> String {
        let Ok(entries) = self.fs.list_entries(Path::new(dir)) else {
            return String::new();
        };

        entries
            .iter()
            .filter(|entry| entry.kind == EntryKind::File)
            .find(|entry| entry.path.file_stem().is_some_and(|found| found == stem))
            .and_then(|entry| entry.path.extension())
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
