use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dir_ops::ListOptions;
use crate::error::{Error, Result};
use crate::stream::{ByteOrder, FileInStream, FileOutStream};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Log file to open at startup. Messages stay buffered in memory when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Echo every log line to stdout.
    #[serde(default)]
    pub echo: bool,
    /// Filter for the `log` backend installed by the binary (`RUST_LOG` wins when set).
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: None,
            echo: false,
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct StreamConfig {
    #[serde(default)]
    pub byte_order: ByteOrder,
}

impl StreamConfig {
    /// Opens `path` for reading with the configured byte order.
    pub fn open_input(&self, path: impl AsRef<Path>) -> FileInStream {
        FileInStream::with_byte_order(path, self.byte_order)
    }

    /// Creates or truncates `path` for writing with the configured byte order.
    pub fn create_output(&self, path: impl AsRef<Path>) -> FileOutStream {
        FileOutStream::with_byte_order(path, self.byte_order)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub streams: StreamConfig,
    #[serde(default)]
    pub listing: ListOptions,
}

impl Config {
    /// Reads and validates a TOML or JSON config file.
    #[cfg(feature = "config-io")]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        crate::config_io::load_config(path)
    }

    pub fn validate(&self) -> Result<()> {
        if log::LevelFilter::from_str(&self.log.level).is_err() {
            return Err(Error::InvalidConfig(format!(
                "log.level {:?} is not one of off, error, warn, info, debug, trace",
                self.log.level
            )));
        }

        if let Some(path) = &self.log.path
            && path.as_os_str().is_empty()
        {
            return Err(Error::InvalidConfig(
                "log.path must not be empty".to_string(),
            ));
        }

        if !self.listing.include_files && !self.listing.include_dirs {
            return Err(Error::InvalidConfig(
                "listing must include files, directories, or both".to_string(),
            ));
        }

        Ok(())
    }

    pub fn log_level(&self) -> log::LevelFilter {
        log::LevelFilter::from_str(&self.log.level).unwrap_or(log::LevelFilter::Warn)
    }
}
