//! String-level path algebra: splitting, sanitizing, validating, absolutizing and relativizing.
//!
//! This module is intentionally **lexical**. Apart from reading the working directory in
//! [`make_absolute`], nothing here touches the filesystem or resolves symlinks, and every
//! routine behaves the same on every platform:
//! - Both `/` and `\` are separators.
//! - The illegal name character set is the Windows one, applied everywhere, so names that pass
//!   validation on one host stay portable to the others.
//! - Outputs use `/` as the canonical separator. Directory paths carry a trailing `/` after every
//!   component.
mod relative;
mod sanitize;
mod segments;

pub use relative::{
    is_absolute, is_relative, make_absolute, make_relative, make_relative_to_cwd,
    simplify_relative_path, working_directory,
};
pub use sanitize::{
    MAX_FILE_NAME_LENGTH, is_valid_file_name_char, is_valid_name, is_valid_path, sanitize_name,
    sanitize_path,
};
pub use segments::{SEPARATOR, is_separator, split_path};
