//! Reading a [`Config`] file from disk.
//!
//! `.json` files are JSON; `.toml` files and files without an extension are TOML. The file goes
//! through a [`FileInStream`], so its size is known up front and an oversized file is rejected
//! before any of it is read. Symlinked config files are followed; the regular-file check applies
//! to the link target.
use std::io::{self, Read};
use std::path::Path;

use crate::stream::FileInStream;
use crate::{Config, Error, Result};

/// Largest config file [`load_config`] accepts.
pub const MAX_CONFIG_BYTES: u64 = 256 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// Picks the format from the extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension() {
            None => Ok(Self::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) => Err(Error::InvalidConfig(format!(
                "{}: config files must be .toml or .json, not .{}",
                path.display(),
                ext.to_string_lossy()
            ))),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Toml => "toml",
            Self::Json => "json",
        }
    }

    /// Deserializes and validates `text`.
    pub fn parse(self, text: &str) -> Result<Config> {
        let parsed: std::result::Result<Config, String> = match self {
            Self::Toml => toml::from_str(text).map_err(|err| err.to_string()),
            Self::Json => serde_json::from_str(text).map_err(|err| err.to_string()),
        };
        let config = parsed
            .map_err(|message| Error::InvalidConfig(format!("{} config: {message}", self.name())))?;
        config.validate()?;
        Ok(config)
    }
}

pub fn load_config(path: impl AsRef<Path>) -> Result<Config> {
    load_config_limited(path, MAX_CONFIG_BYTES)
}

/// [`load_config`] with a caller-chosen size cap in bytes.
pub fn load_config_limited(path: impl AsRef<Path>, max_bytes: u64) -> Result<Config> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)?;

    let metadata = std::fs::metadata(path).map_err(|err| Error::io_path("stat", path, err))?;
    if !metadata.is_file() {
        return Err(Error::InvalidPath(format!(
            "config {} is not a regular file",
            path.display()
        )));
    }

    let stream = FileInStream::from_path(path);
    if !stream.is_valid() {
        return Err(Error::operation_failed("open config", path));
    }
    if stream.size() > max_bytes {
        return Err(Error::InputTooLarge {
            size_bytes: stream.size(),
            max_bytes,
        });
    }

    // The cap also holds if the file grows after its size was captured.
    let mut text = String::new();
    stream
        .take(max_bytes)
        .read_to_string(&mut text)
        .map_err(|err| match err.kind() {
            io::ErrorKind::InvalidData => Error::InvalidUtf8(path.to_path_buf()),
            _ => Error::io_path("read", path, err),
        })?;
    format.parse(&text)
}
