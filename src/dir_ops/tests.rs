use std::fs;
use std::path::Path;

use super::*;

fn s(path: &Path) -> String {
    path.to_str().expect("utf-8 temp path").to_string()
}

fn seed_tree(root: &Path) {
    fs::create_dir_all(root.join("sub").join("deep")).expect("mkdir");
    fs::write(root.join("a.txt"), "a").expect("write");
    fs::write(root.join("sub").join("b.bin"), [1u8, 2, 3]).expect("write");
    fs::write(root.join("sub").join("deep").join("c.dat"), "c").expect("write");
}

#[test]
fn make_directory_rejects_illegal_names_and_logs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let logger = Logger::new();
    let ops = DirOps::native(&logger);

    let bad = format!("{}/what?", s(dir.path()));
    assert!(!ops.make_directory(&bad));
    assert!(!dir.path().join("what?").exists());
    let errors = logger.error_log();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("illegal characters"), "{errors:?}");

    let good = format!("{}/x/y", s(dir.path()));
    assert!(ops.make_directory(&good));
    assert!(ops.is_directory(&good));
}

#[test]
fn is_root_resolves_dot_segments() {
    let logger = Logger::new();
    let ops = DirOps::native(&logger);
    assert!(ops.is_root("/"));
    assert!(ops.is_root("/tmp/.."));
    assert!(ops.is_root("/.."));
    assert!(!ops.is_root("/tmp"));
    assert!(!ops.is_root("/tmp/a/../b"));
}

#[test]
#[cfg(unix)]
fn is_root_sees_through_symlinks() {
    let dir = tempfile::tempdir().expect("tempdir");
    let logger = Logger::new();
    let ops = DirOps::native(&logger);
    let sysroot = dir.path().join("sysroot");
    std::os::unix::fs::symlink("/", &sysroot).expect("symlink");

    assert!(ops.is_directory(&s(&sysroot)));
    assert!(ops.is_symlink(&s(&sysroot)));
    assert!(ops.is_root(&s(&sysroot)));
    assert!(!ops.is_root(&s(dir.path())));
}

#[test]
#[cfg(unix)]
#[should_panic(expected = "Attempted to clear root directory")]
fn clear_directory_through_link_to_root_is_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let logger = Logger::new();
    let ops = DirOps::native(&logger);
    let sysroot = dir.path().join("sysroot");
    std::os::unix::fs::symlink("/", &sysroot).expect("symlink");
    ops.clear_directory(&s(&sysroot));
}

#[test]
#[cfg(unix)]
fn clear_directory_refuses_symlinked_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let logger = Logger::new();
    let ops = DirOps::native(&logger);
    let precious = dir.path().join("precious");
    fs::create_dir(&precious).expect("mkdir");
    fs::write(precious.join("keep.txt"), "keep").expect("write");
    let alias = dir.path().join("alias");
    std::os::unix::fs::symlink(&precious, &alias).expect("symlink");

    assert!(!ops.clear_directory(&s(&alias)));
    assert!(precious.join("keep.txt").exists());
    assert!(logger.error_log()[0].contains("symbolic link"));
}

#[test]
#[cfg(unix)]
fn clear_directory_unlinks_child_links_without_following() {
    let dir = tempfile::tempdir().expect("tempdir");
    let logger = Logger::new();
    let ops = DirOps::native(&logger);
    let precious = dir.path().join("precious");
    fs::create_dir(&precious).expect("mkdir");
    fs::write(precious.join("keep.txt"), "keep").expect("write");
    let scratch = dir.path().join("scratch");
    fs::create_dir(&scratch).expect("mkdir");
    std::os::unix::fs::symlink(&precious, scratch.join("link")).expect("symlink");
    std::os::unix::fs::symlink("/", scratch.join("sysroot")).expect("symlink");

    assert!(ops.clear_directory(&s(&scratch)));
    assert!(ops.is_empty(&s(&scratch)));
    assert!(precious.join("keep.txt").exists());
    assert!(logger.error_log().is_empty(), "{:?}", logger.error_log());
}

#[test]
fn is_empty_reports_non_directories_as_errors() {
    let dir = tempfile::tempdir().expect("tempdir");
    let logger = Logger::new();
    let ops = DirOps::native(&logger);

    assert!(ops.is_empty(&s(dir.path())));
    fs::write(dir.path().join("f.txt"), "x").expect("write");
    assert!(!ops.is_empty(&s(dir.path())));
    assert!(logger.error_log().is_empty());

    assert!(!ops.is_empty(&s(&dir.path().join("f.txt"))));
    assert_eq!(logger.error_log().len(), 1);
}

#[test]
fn copy_file_creates_missing_parent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let logger = Logger::new();
    let ops = DirOps::native(&logger);
    fs::write(dir.path().join("src.bin"), [9u8; 5]).expect("write");

    let to = dir.path().join("out").join("nested").join("dst.bin");
    assert!(ops.copy_file(&s(&dir.path().join("src.bin")), &s(&to)));
    assert_eq!(fs::read(&to).expect("read"), [9u8; 5]);
}

#[test]
fn copy_file_rejects_invalid_destination() {
    let dir = tempfile::tempdir().expect("tempdir");
    let logger = Logger::new();
    let ops = DirOps::native(&logger);
    fs::write(dir.path().join("src.bin"), "x").expect("write");

    let to = format!("{}/bad|name.bin", s(dir.path()));
    assert!(!ops.copy_file(&s(&dir.path().join("src.bin")), &to));
    assert!(!Path::new(&to).exists());
}

#[test]
fn copy_directory_reproduces_tree() {
    let dir = tempfile::tempdir().expect("tempdir");
    let logger = Logger::new();
    let ops = DirOps::native(&logger);
    let src = dir.path().join("src");
    seed_tree(&src);

    let dst = dir.path().join("dst");
    assert!(ops.copy_directory(&s(&src), &s(&dst)));
    assert_eq!(fs::read(dst.join("a.txt")).expect("a"), b"a");
    assert_eq!(fs::read(dst.join("sub").join("b.bin")).expect("b"), [1, 2, 3]);
    assert_eq!(
        fs::read(dst.join("sub").join("deep").join("c.dat")).expect("c"),
        b"c"
    );
    assert!(logger.error_log().is_empty());
}

#[test]
#[cfg(unix)]
fn copy_directory_stops_at_first_failure_without_rollback() {
    let dir = tempfile::tempdir().expect("tempdir");
    let logger = Logger::new();
    let ops = DirOps::native(&logger);
    let src = dir.path().join("src");
    fs::create_dir(&src).expect("mkdir");
    fs::write(src.join("a.txt"), "a").expect("write");
    fs::write(src.join("b:c.txt"), "b").expect("write");
    fs::write(src.join("d.txt"), "d").expect("write");

    let dst = dir.path().join("dst");
    assert!(!ops.copy_directory(&s(&src), &s(&dst)));
    assert!(dst.join("a.txt").exists(), "earlier copies are kept");
    assert!(!dst.join("d.txt").exists(), "copy stops at the failing entry");
    assert!(logger.error_log().len() >= 2);
}

#[test]
fn copy_directory_refuses_destination_inside_source() {
    let dir = tempfile::tempdir().expect("tempdir");
    let logger = Logger::new();
    let ops = DirOps::native(&logger);
    let src = dir.path().join("src");
    seed_tree(&src);

    assert!(!ops.copy_directory(&s(&src), &s(&src.join("backup"))));
    assert!(!src.join("backup").exists());
    assert!(!ops.copy_directory(&s(&src), &format!("{}/sub/../", s(&src))));
    assert!(!ops.copy_directory(&s(&src), &s(&src)));
    assert_eq!(logger.error_log().len(), 3);
    assert!(logger.error_log()[0].contains("into itself"));

    let sibling = dir.path().join("src_copy");
    assert!(ops.copy_directory(&s(&src), &s(&sibling)));
    assert!(sibling.join("sub").join("deep").join("c.dat").exists());
}

#[test]
#[cfg(unix)]
fn copy_directory_refuses_destination_reached_through_link() {
    let dir = tempfile::tempdir().expect("tempdir");
    let logger = Logger::new();
    let ops = DirOps::native(&logger);
    let src = dir.path().join("src");
    seed_tree(&src);
    let alias = dir.path().join("alias");
    std::os::unix::fs::symlink(&src, &alias).expect("symlink");

    assert!(!ops.copy_directory(&s(&src), &s(&alias.join("nested"))));
    assert!(!src.join("nested").exists());
}

#[test]
fn move_file_refuses_existing_destination() {
    let dir = tempfile::tempdir().expect("tempdir");
    let logger = Logger::new();
    let ops = DirOps::native(&logger);
    let from = dir.path().join("from.txt");
    let to = dir.path().join("to.txt");
    fs::write(&from, "from").expect("write");
    fs::write(&to, "to").expect("write");

    assert!(!ops.move_file(&s(&from), &s(&to)));
    assert_eq!(fs::read_to_string(&to).expect("read"), "to");
    assert!(logger.error_log()[0].contains("existing file"));

    fs::remove_file(&to).expect("remove");
    assert!(ops.move_file(&s(&from), &s(&to)));
    assert!(!from.exists());
    assert_eq!(fs::read_to_string(&to).expect("read"), "from");
}

#[test]
fn move_directory_renames_tree() {
    let dir = tempfile::tempdir().expect("tempdir");
    let logger = Logger::new();
    let ops = DirOps::native(&logger);
    let src = dir.path().join("src");
    seed_tree(&src);
    let dst = dir.path().join("renamed");

    assert!(ops.move_directory(&s(&src), &s(&dst)));
    assert!(!src.exists());
    assert!(dst.join("sub").join("deep").join("c.dat").exists());
    assert!(!ops.move_directory(&s(&dst), &s(&dst)));
}

#[test]
fn delete_file_only_removes_regular_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let logger = Logger::new();
    let ops = DirOps::native(&logger);
    fs::write(dir.path().join("f.txt"), "x").expect("write");

    assert!(!ops.delete_file(&s(dir.path())));
    assert!(ops.delete_file(&s(&dir.path().join("f.txt"))));
    assert!(!ops.delete_file(&s(&dir.path().join("f.txt"))));
}

#[test]
fn delete_directory_honors_fail_if_not_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let logger = Logger::new();
    let ops = DirOps::native(&logger);
    let target = dir.path().join("tree");
    seed_tree(&target);

    assert!(!ops.delete_directory(&s(&target), true));
    assert!(target.exists());
    assert!(ops.delete_directory(&s(&target), false));
    assert!(!target.exists());
    assert!(!ops.delete_directory(&s(&target), false));
}

#[test]
fn clear_directory_keeps_the_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let logger = Logger::new();
    let ops = DirOps::native(&logger);
    let target = dir.path().join("tree");
    seed_tree(&target);

    assert!(ops.clear_directory(&s(&target)));
    assert!(target.is_dir());
    assert!(ops.is_empty(&s(&target)));
    assert!(!ops.clear_directory(&s(&target.join("missing"))));
}

#[test]
#[should_panic(expected = "Attempted to delete root directory")]
fn delete_directory_on_root_is_fatal() {
    let logger = Logger::new();
    let ops = DirOps::native(&logger);
    ops.delete_directory("/", false);
}

#[test]
#[should_panic(expected = "Attempted to clear root directory")]
fn clear_directory_on_resolved_root_is_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let logger = Logger::new();
    let ops = DirOps::native(&logger);
    let depth = dir.path().components().count();
    let mut path = s(dir.path());
    for _ in 0..depth {
        path.push_str("/..");
    }
    ops.clear_directory(&path);
}

#[test]
fn directory_contents_filters_and_recurses() {
    let dir = tempfile::tempdir().expect("tempdir");
    let logger = Logger::new();
    let ops = DirOps::native(&logger);
    let root = dir.path().join("tree");
    seed_tree(&root);
    let root_s = s(&root);

    let top = ops.directory_contents(&root_s, ListOptions::default());
    assert_eq!(top, vec![s(&root.join("a.txt")), s(&root.join("sub"))]);

    let all = ops.directory_contents(
        &root_s,
        ListOptions {
            recursive: true,
            ..ListOptions::default()
        },
    );
    assert_eq!(
        all,
        vec![
            s(&root.join("a.txt")),
            s(&root.join("sub")),
            s(&root.join("sub").join("b.bin")),
            s(&root.join("sub").join("deep")),
            s(&root.join("sub").join("deep").join("c.dat")),
        ]
    );

    let dirs_only = ops.directory_contents(
        &root_s,
        ListOptions {
            recursive: true,
            include_files: false,
            include_dirs: true,
        },
    );
    assert_eq!(
        dirs_only,
        vec![s(&root.join("sub")), s(&root.join("sub").join("deep"))]
    );

    assert!(
        ops.directory_contents(&s(&root.join("a.txt")), ListOptions::default())
            .is_empty()
    );
}

#[test]
fn find_file_extension_matches_stem() {
    let dir = tempfile::tempdir().expect("tempdir");
    let logger = Logger::new();
    let ops = DirOps::native(&logger);
    fs::write(dir.path().join("level.pak"), "x").expect("write");
    fs::create_dir(dir.path().join("other.d")).expect("mkdir");

    assert_eq!(ops.find_file_extension(&s(dir.path()), "level"), "pak");
    assert_eq!(ops.find_file_extension(&s(dir.path()), "other"), "");
    assert_eq!(ops.find_file_extension(&s(dir.path()), "missing"), "");
}

#[test]
fn file_size_and_mtime() {
    let dir = tempfile::tempdir().expect("tempdir");
    let logger = Logger::new();
    let ops = DirOps::native(&logger);
    let path = dir.path().join("f.bin");
    fs::write(&path, [0u8; 12]).expect("write");

    assert_eq!(ops.file_size(&s(&path)), Some(12));
    assert!(ops.last_modified_time(&s(&path)) > 0);
    assert_eq!(ops.file_size(&s(&dir.path().join("missing"))), None);
    assert_eq!(ops.last_modified_time(&s(&dir.path().join("missing"))), 0);
}

#[test]
fn join_and_parent_helpers() {
    assert_eq!(join("a", "b"), "a/b");
    assert_eq!(join("a/", "b"), "a/b");
    assert_eq!(join("", "b"), "b");
    assert_eq!(parent_of("/x/y/z.txt"), Some("/x/y"));
    assert_eq!(parent_of("x/y/"), Some("x"));
    assert_eq!(parent_of("z.txt"), None);
}
