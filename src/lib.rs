//! `filekit` is a small file-system utility layer for tools that shuffle binary assets around.
//!
//! It provides byte-order-tagged file streams with high-water-mark size tracking, a lexical path
//! algebra (split, sanitize, validate, absolutize, relativize, simplify), directory operations
//! guarded by the sanitizer, and a buffering [`Logger`] that those operations report through.

pub mod config;
#[cfg(feature = "config-io")]
pub mod config_io;
pub mod dir_ops;
mod error;
pub mod logger;
pub mod path;
pub mod platform;
pub mod stream;

pub use config::Config;
pub use dir_ops::{DirOps, ListOptions};
pub use error::{Error, Result};
pub use logger::Logger;
pub use stream::{ByteOrder, FileInStream, FileLock, FileOutStream, SeekOrigin};
