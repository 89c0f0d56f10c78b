use super::segments::{SEPARATOR, is_separator, split_path};

/// Maximum length of a single name, in characters.
pub const MAX_FILE_NAME_LENGTH: usize = 255;

const ILLEGAL_NAME_CHARS: [char; 9] = ['<', '>', '"', '/', '\\', '|', '?', '*', ':'];

const DIRECTORY_TRAILING_CHARS: [char; 2] = [' ', '.'];

#[inline]
fn is_control_char(ch: char) -> bool {
    u32::from(ch) <= 31
}

#[inline]
fn is_dot_entry(name: &str) -> bool {
    name == "." || name == ".."
}

// A drive component such as `C:` may keep its colon, but only as its final character.
#[inline]
fn is_legal_root_colon(ch: char, is_root: bool, is_last: bool) -> bool {
    ch == ':' && is_root && is_last
}

fn trim_directory_end(name: &mut String) {
    let kept = name.trim_end_matches(DIRECTORY_TRAILING_CHARS).len();
    name.truncate(kept);
}

fn truncate_chars(name: &mut String, max_chars: usize) {
    if let Some((byte_idx, _)) = name.char_indices().nth(max_chars) {
        name.truncate(byte_idx);
    }
}

/// Returns `false` for control characters and for `< > " / \ | ? * :`.
#[inline]
pub fn is_valid_file_name_char(ch: char) -> bool {
    !is_control_char(ch) && !ILLEGAL_NAME_CHARS.contains(&ch)
}

/// Produces a name that is legal on every supported filesystem.
///
/// Control characters and illegal characters are removed (a root component keeps a final `:`),
/// directory names lose trailing spaces and dots, leading spaces are dropped and the result is
/// clamped to [`MAX_FILE_NAME_LENGTH`] characters. `.` and `..` are returned unchanged when
/// `is_directory` is set.
///
/// ```
/// assert_eq!(filekit::path::sanitize_name("con:fig?.txt", false, false), "config.txt");
/// assert_eq!(filekit::path::sanitize_name("C:", true, true), "C:");
/// assert_eq!(filekit::path::sanitize_name("saves. . ", true, false), "saves");
/// ```
pub fn sanitize_name(name: &str, is_directory: bool, is_root: bool) -> String {
    if is_directory && is_dot_entry(name) {
        return name.to_string();
    }

    let mut out: String = name
        .char_indices()
        .filter(|&(idx, ch)| {
            let is_last = idx + ch.len_utf8() == name.len();
            is_valid_file_name_char(ch) || is_legal_root_colon(ch, is_root, is_last)
        })
        .map(|(_, ch)| ch)
        .collect();

    if is_directory {
        trim_directory_end(&mut out);
    }

    let leading_spaces = out.len() - out.trim_start_matches(' ').len();
    out.drain(..leading_spaces);

    truncate_chars(&mut out, MAX_FILE_NAME_LENGTH);
    // Truncation can expose a trailing space or dot again.
    if is_directory {
        trim_directory_end(&mut out);
    }

    out
}

/// Sanitizes every component of `path`.
///
/// The first component is treated as the root. Every component but the last is a directory,
/// and the last one is a directory only when `is_directory` is set. Directory components are
/// followed by `/`. A leading separator is preserved and components that sanitize to nothing
/// are dropped. A file path never ends in `/`, even when its leaf was dropped.
pub fn sanitize_path(path: &str, is_directory: bool) -> String {
    let components = split_path(path);
    let mut out = String::with_capacity(path.len());
    if path.starts_with(is_separator) {
        out.push(SEPARATOR);
    }

    let last = components.len().saturating_sub(1);
    let kept: Vec<String> = components
        .iter()
        .enumerate()
        .map(|(idx, component)| sanitize_name(component, is_directory || idx < last, idx == 0))
        .filter(|sanitized| !sanitized.is_empty())
        .collect();

    let kept_last = kept.len().saturating_sub(1);
    for (idx, sanitized) in kept.iter().enumerate() {
        out.push_str(sanitized);
        if is_directory || idx < kept_last {
            out.push(SEPARATOR);
        }
    }
    out
}

/// Checks `name` against the rules [`sanitize_name`] enforces, without modifying it.
///
/// Leading spaces are tolerated here even though the sanitizer strips them.
pub fn is_valid_name(name: &str, is_directory: bool, is_root: bool) -> bool {
    if name.is_empty() || name.chars().count() > MAX_FILE_NAME_LENGTH {
        return false;
    }

    if is_directory && is_dot_entry(name) {
        return true;
    }

    let all_chars_legal = name.char_indices().all(|(idx, ch)| {
        let is_last = idx + ch.len_utf8() == name.len();
        is_valid_file_name_char(ch) || is_legal_root_colon(ch, is_root, is_last)
    });
    if !all_chars_legal {
        return false;
    }

    !(is_directory && name.ends_with(DIRECTORY_TRAILING_CHARS))
}

/// A path is valid when every component is a valid name under the flags [`sanitize_path`] uses.
pub fn is_valid_path(path: &str, is_directory: bool) -> bool {
    let components = split_path(path);
    let last = components.len().saturating_sub(1);
    components.iter().enumerate().all(|(idx, component)| {
        let is_dir = is_directory || idx < last;
        is_valid_name(component, is_dir, idx == 0)
    })
}
