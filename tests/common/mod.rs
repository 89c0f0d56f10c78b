#![allow(dead_code)]

use std::fs;
use std::path::Path;

pub fn path_str(path: &Path) -> String {
    path.to_str().expect("utf-8 temp path").to_string()
}

/// `root/readme.txt`, `root/assets/tex.dds` and `root/assets/maps/level.bin`.
pub fn seed_asset_tree(root: &Path) {
    fs::create_dir_all(root.join("assets").join("maps")).expect("mkdir");
    fs::write(root.join("readme.txt"), "readme").expect("write");
    fs::write(root.join("assets").join("tex.dds"), [0xDDu8; 16]).expect("write");
    fs::write(
        root.join("assets").join("maps").join("level.bin"),
        [1u8, 2, 3, 4],
    )
    .expect("write");
}

pub fn write_config(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).expect("write config");
    path
}
