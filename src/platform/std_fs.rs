use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use walkdir::WalkDir;

use super::{Entry, EntryKind, Filesystem};

/// [`Filesystem`] backed by `std::fs`, with `walkdir` for recursive listings.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFilesystem;

fn entry_kind(file_type: fs::FileType) -> EntryKind {
    if file_type.is_file() {
        EntryKind::File
    } else if file_type.is_dir() {
        EntryKind::Dir
    } else if file_type.is_symlink() {
        EntryKind::Symlink
    } else {
        EntryKind::Other
    }
}

#[cfg(unix)]
fn sync_parent_directory(path: &Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    let parent_dir = fs::File::open(parent)?;
    parent_dir.sync_all()
}

#[cfg(not(unix))]
fn sync_parent_directory(_path: &Path) -> io::Result<()> {
    Ok(())
}

fn sync_rename_parents(src_path: &Path, dest_path: &Path) -> io::Result<()> {
    sync_parent_directory(dest_path)?;
    if src_path.parent() != dest_path.parent() {
        sync_parent_directory(src_path)?;
    }
    Ok(())
}

impl Filesystem for StdFilesystem {
    fn exists(&self, path: &Path) -> bool {
        fs::metadata(path).is_ok()
    }

    fn is_file(&self, path: &Path) -> bool {
        fs::metadata(path).is_ok_and(|meta| meta.is_file())
    }

    fn is_directory(&self, path: &Path) -> bool {
        fs::metadata(path).is_ok_and(|meta| meta.is_dir())
    }

    fn is_symlink(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok_and(|meta| meta.file_type().is_symlink())
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(path)
    }

    fn make_directory(&self, path: &Path) -> io::Result<()> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o775);
        }
        builder.create(path)
    }

    fn list_entries(&self, dir: &Path) -> io::Result<Vec<Entry>> {
        let mut rows = fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
        rows.sort_by_key(|entry| entry.file_name());
        rows.into_iter()
            .map(|entry| {
                Ok(Entry {
                    kind: entry_kind(entry.file_type()?),
                    path: entry.path(),
                })
            })
            .collect()
    }

    fn walk_entries(&self, dir: &Path) -> io::Result<Vec<Entry>> {
        WalkDir::new(dir)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .map(|entry| {
                let entry = entry.map_err(io::Error::from)?;
                Ok(Entry {
                    kind: entry_kind(entry.file_type()),
                    path: entry.into_path(),
                })
            })
            .collect()
    }

    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<u64> {
        fs::copy(from, to)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)?;
        sync_rename_parents(from, to).map_err(|err| {
            io::Error::new(
                err.kind(),
                format!("rename already applied, but failed to sync parent directories: {err}"),
            )
        })
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir_all(path)
    }

    fn file_size(&self, path: &Path) -> io::Result<u64> {
        Ok(fs::metadata(path)?.len())
    }

    fn modified_time(&self, path: &Path) -> io::Result<SystemTime> {
        fs::metadata(path)?.modified()
    }
}
