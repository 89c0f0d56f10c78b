/// Canonical separator used when reassembling paths.
pub const SEPARATOR: char = '/';

#[inline]
pub fn is_separator(ch: char) -> bool {
    ch == '/' || ch == '\\'
}

/// Splits `path` on `/` and `\`, dropping empty components.
///
/// `"/a//b\\c/"` yields `["a", "b", "c"]`. No normalization is applied to `.` or `..`.
pub fn split_path(path: &str) -> Vec<&str> {
    path.split(is_separator)
        .filter(|component| !component.is_empty())
        .collect()
}
