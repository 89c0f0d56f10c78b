//! Explicit logging context for diagnostics raised on failure paths.
//!
//! A [`Logger`] is created in the [`LogState::Buffering`] state and keeps lines in memory until
//! [`Logger::init`] opens a log file. At that point the buffered lines are written after the
//! banner and the logger switches to [`LogState::Flushing`]. At most [`MAX_PENDING_LINES`] lines
//! are buffered; the overflow is counted and noted in the file. A failed write to the file is
//! reported through the `log` facade. [`Logger::shutdown`] (or drop) closes the file.
//!
//! Every record is also forwarded to the [`log`] facade under the `filekit` target, so binaries
//! that install a `log` backend see the same diagnostics.
use std::cell::RefCell;
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::config::LogConfig;

const LOG_TARGET: &str = "filekit";
const MAX_FALLBACK_LOG_FILES: u32 = 1000;
/// Lines kept while buffering; later lines are counted and dropped.
pub const MAX_PENDING_LINES: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogState {
    Buffering,
    Flushing,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Standard,
    Warning,
    Error,
    Fatal,
}

impl MessageKind {
    const fn level(self) -> log::Level {
        match self {
            Self::Standard => log::Level::Info,
            Self::Warning => log::Level::Warn,
            Self::Error | Self::Fatal => log::Level::Error,
        }
    }

    const fn is_error(self) -> bool {
        matches!(self, Self::Error | Self::Fatal)
    }
}

#[derive(Debug)]
struct LoggerInner {
    state: LogState,
    file: Option<File>,
    path: Option<PathBuf>,
    pending: Vec<String>,
    dropped: usize,
    errors: Vec<String>,
}

/// Single-threaded logging context; share it by reference.
#[derive(Debug)]
pub struct Logger {
    started: Instant,
    echo: bool,
    inner: RefCell<LoggerInner>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            echo: false,
            inner: RefCell::new(LoggerInner {
                state: LogState::Buffering,
                file: None,
                path: None,
                pending: Vec::new(),
                dropped: 0,
                errors: Vec::new(),
            }),
        }
    }

    /// Also print every line to stdout.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Builds a logger and, when the config names a log file, initializes it.
    pub fn from_config(config: &LogConfig) -> Self {
        let logger = Self::new().with_echo(config.echo);
        if let Some(path) = &config.path
            && !logger.init(path)
        {
            logger.warn(format_args!(
                "unable to open log file {}; keeping messages in memory",
                path.display()
            ));
        }
        logger
    }

    /// Opens the log file and flushes buffered lines into it.
    ///
    /// If `path` cannot be opened, `<stem>_<N>.<ext>` is tried in the same directory for
    /// `N` in `0..1000`. Returns `false` when no file could be opened or the logger is no
    /// longer buffering.
    pub fn init(&self, path: impl AsRef<Path>) -> bool {
        let mut inner = self.inner.borrow_mut();
        if inner.state != LogState::Buffering {
            return false;
        }

        let Some((mut file, opened)) = open_log_file(path.as_ref()) else {
            return false;
        };

        let banner = chrono::Local::now().format("%m/%d/%y %H:%M:%S");
        let mut result = writeln!(file, "Opened log file at {banner}");
        for line in inner.pending.drain(..) {
            result = result.and_then(|()| writeln!(file, "{line}"));
        }
        let dropped = std::mem::take(&mut inner.dropped);
        if dropped > 0 {
            result =
                result.and_then(|()| writeln!(file, "({dropped} lines dropped while buffering)"));
        }
        if let Err(err) = result.and_then(|()| file.flush()) {
            log::warn!(target: LOG_TARGET, "failed to write log file {}: {err}", opened.display());
        }

        inner.file = Some(file);
        inner.path = Some(opened);
        inner.state = LogState::Flushing;
        true
    }

    pub fn write(&self, args: fmt::Arguments<'_>) {
        self.record(MessageKind::Standard, args);
    }

    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.record(MessageKind::Warning, args);
    }

    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.record(MessageKind::Error, args);
    }

    /// Records the message, then panics: used for programming errors that must not continue.
    pub fn fatal(&self, args: fmt::Arguments<'_>) -> ! {
        let line = self.record(MessageKind::Fatal, args);
        panic!("{line}");
    }

    fn record(&self, kind: MessageKind, args: fmt::Arguments<'_>) -> String {
        let line = format!("[{:08.3}] {args}", self.started.elapsed().as_secs_f64());
        log::log!(target: LOG_TARGET, kind.level(), "{args}");

        let write_failure = {
            let mut inner = self.inner.borrow_mut();
            if kind.is_error() {
                inner.errors.push(line.clone());
            }
            let state = inner.state;
            match state {
                LogState::Buffering if inner.pending.len() < MAX_PENDING_LINES => {
                    inner.pending.push(line.clone());
                    None
                }
                LogState::Buffering => {
                    inner.dropped += 1;
                    None
                }
                LogState::Flushing => {
                    let LoggerInner { file, path, .. } = &mut *inner;
                    file.as_mut().and_then(|file| {
                        writeln!(file, "{line}")
                            .and_then(|()| file.flush())
                            .err()
                            .map(|err| (path.clone().unwrap_or_default(), err))
                    })
                }
                LogState::Closed => None,
            }
        };
        if let Some((path, err)) = write_failure {
            log::warn!(target: LOG_TARGET, "failed to write log file {}: {err}", path.display());
        }

        if self.echo {
            println!("{line}");
        }
        line
    }

    pub fn state(&self) -> LogState {
        self.inner.borrow().state
    }

    /// Path of the opened log file, which may be a fallback name.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.inner.borrow().path.clone()
    }

    /// Lines waiting for [`Logger::init`].
    pub fn buffered_len(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    /// Lines discarded because the buffer was full.
    pub fn dropped_len(&self) -> usize {
        self.inner.borrow().dropped
    }

    /// Error and fatal lines recorded since creation or the last clear.
    pub fn error_log(&self) -> Vec<String> {
        self.inner.borrow().errors.clone()
    }

    pub fn clear_error_log(&self) {
        self.inner.borrow_mut().errors.clear();
    }

    /// Flushes and closes the log file. Later messages only reach the `log` facade.
    pub fn shutdown(&self) {
        let mut inner = self.inner.borrow_mut();
        if let Some(mut file) = inner.file.take() {
            let _ = file.flush();
        }
        inner.pending.clear();
        inner.dropped = 0;
        inner.state = LogState::Closed;
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn open_log_file(path: &Path) -> Option<(File, PathBuf)> {
    if let Ok(file) = File::create(path) {
        return Some((file, path.to_path_buf()));
    }

    let stem = path.file_stem()?.to_string_lossy().into_owned();
    let extension = path.extension().map(|ext| ext.to_string_lossy().into_owned());
    let parent = path.parent().unwrap_or_else(|| Path::new(""));

    (0..MAX_FALLBACK_LOG_FILES).find_map(|num| {
        let name = match &extension {
            Some(ext) => format!("{stem}_{num}.{ext}"),
            None => format!("{stem}_{num}"),
        };
        let candidate = parent.join(name);
        File::create(&candidate).ok().map(|file| (file, candidate))
    })
}
