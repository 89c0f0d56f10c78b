use super::segments::{SEPARATOR, is_separator, split_path};

const PARENT_DIR: &str = "..";

/// Returns `true` when `path` starts at a filesystem root.
///
/// A leading `/` is a root everywhere. Windows additionally accepts a leading `\` and drive
/// prefixes such as `C:\`.
pub fn is_absolute(path: &str) -> bool {
    if path.starts_with('/') {
        return true;
    }

    #[cfg(windows)]
    {
        if path.starts_with('\\') {
            return true;
        }
        let bytes = path.as_bytes();
        if bytes.len() >= 3
            && bytes[0].is_ascii_alphabetic()
            && bytes[1] == b':'
            && (bytes[2] == b'/' || bytes[2] == b'\\')
        {
            return true;
        }
    }

    false
}

#[inline]
pub fn is_relative(path: &str) -> bool {
    !is_absolute(path)
}

/// The current working directory, or an empty string if it cannot be determined.
pub fn working_directory() -> String {
    std::env::current_dir()
        .map(|dir| dir.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Prefixes a relative `path` with the working directory. Absolute paths are returned as-is.
pub fn make_absolute(path: &str) -> String {
    if is_absolute(path) {
        return path.to_string();
    }
    format!("{}{SEPARATOR}{path}", working_directory())
}

/// Expresses `path` relative to `relative_to`.
///
/// Both inputs are absolutized and compared component by component (case-sensitive) up to the
/// furthest common ancestor. Every remaining component of `relative_to` becomes `../`, followed
/// by the remaining components of `path`, each with a trailing `/`. If the two paths share no
/// component the absolute form of `path` is returned.
///
/// When the leaf of `path` contains a `.` and `path` does not end in a separator, the leaf is
/// taken to be a file and the final `/` is dropped. This is a heuristic: a directory named
/// `v1.2` passed without a trailing separator is treated as a file.
///
/// ```
/// use filekit::path::make_relative;
///
/// assert_eq!(make_relative("/a/b/c", "/a/b/x"), "../c/");
/// assert_eq!(make_relative("/a/b/c.txt", "/a/b/x"), "../c.txt");
/// assert_eq!(make_relative("/a/b/c.txt/", "/a/b/x"), "../c.txt/");
/// ```
pub fn make_relative(path: &str, relative_to: &str) -> String {
    let abs_path = make_absolute(path);
    let abs_base = make_absolute(relative_to);
    let path_components = split_path(&abs_path);
    let base_components = split_path(&abs_base);

    let common = path_components
        .iter()
        .zip(&base_components)
        .take_while(|(lhs, rhs)| lhs == rhs)
        .count();

    if common == 0 {
        return abs_path;
    }

    let mut out = String::new();
    for _ in common..base_components.len() {
        out.push_str(PARENT_DIR);
        out.push(SEPARATOR);
    }
    for component in &path_components[common..] {
        out.push_str(component);
        out.push(SEPARATOR);
    }

    let leaf_looks_like_file = path_components
        .last()
        .is_some_and(|leaf| leaf.contains('.'));
    if leaf_looks_like_file && !path.ends_with(is_separator) && out.ends_with(SEPARATOR) {
        out.pop();
    }

    out
}

/// [`make_relative`] against the current working directory.
pub fn make_relative_to_cwd(path: &str) -> String {
    make_relative(path, &working_directory())
}

/// Collapses `name/..` pairs, scanning left to right.
///
/// A `..` cancels the component retained just before it unless that component is itself `..`,
/// so leading parent references survive (`../../a/` stays as is). Every retained component is
/// emitted with a trailing `/`.
///
/// ```
/// use filekit::path::simplify_relative_path;
///
/// assert_eq!(simplify_relative_path("a/b/../c/"), "a/c/");
/// assert_eq!(simplify_relative_path("../../a/"), "../../a/");
/// ```
pub fn simplify_relative_path(path: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    for component in split_path(path) {
        let cancels_previous =
            component == PARENT_DIR && kept.last().is_some_and(|prev| *prev != PARENT_DIR);
        if cancels_previous {
            kept.pop();
        } else {
            kept.push(component);
        }
    }

    let mut out = String::with_capacity(path.len() + 1);
    for component in kept {
        out.push_str(component);
        out.push(SEPARATOR);
    }
    out
}
