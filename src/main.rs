use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::json;

use filekit::path::{
    is_valid_path, make_absolute, make_relative, make_relative_to_cwd, sanitize_name,
    sanitize_path, simplify_relative_path,
};
use filekit::{Config, DirOps, Error, ListOptions, Logger, Result};

#[derive(Debug, Parser)]
#[command(name = "filekit")]
#[command(about = "Path sanitizing, relativizing and guarded directory operations.")]
struct Cli {
    /// TOML or JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    SanitizeName {
        name: String,
        #[arg(long, default_value_t = false)]
        dir: bool,
        #[arg(long, default_value_t = false)]
        root: bool,
    },
    SanitizePath {
        path: String,
        #[arg(long, default_value_t = false)]
        dir: bool,
    },
    Validate {
        path: String,
        #[arg(long, default_value_t = false)]
        dir: bool,
    },
    Absolute {
        path: String,
    },
    Relative {
        path: String,
        /// Base directory; the working directory when omitted.
        #[arg(long)]
        to: Option<String>,
    },
    Simplify {
        path: String,
    },
    List {
        dir: String,
        #[arg(long, default_value_t = false)]
        recursive: bool,
        #[arg(long, default_value_t = false, conflicts_with = "dirs_only")]
        files_only: bool,
        #[arg(long, default_value_t = false)]
        dirs_only: bool,
    },
    Mkdir {
        path: String,
    },
    Copy {
        from: String,
        to: String,
    },
    Move {
        from: String,
        to: String,
    },
    Delete {
        path: String,
        /// Refuse to delete a non-empty directory.
        #[arg(long, default_value_t = false)]
        if_empty: bool,
    },
    Clear {
        dir: String,
    },
    Size {
        path: String,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    env_logger::Builder::new()
        .filter_level(config.log_level())
        .parse_default_env()
        .init();

    let logger = Logger::from_config(&config.log);
    let ops = DirOps::native(&logger);

    let value = match cli.command {
        Command::SanitizeName { name, dir, root } => json!({
            "input": name,
            "sanitized": sanitize_name(&name, dir, root),
        }),
        Command::SanitizePath { path, dir } => json!({
            "input": path,
            "sanitized": sanitize_path(&path, dir),
        }),
        Command::Validate { path, dir } => json!({
            "path": path,
            "valid": is_valid_path(&path, dir),
        }),
        Command::Absolute { path } => json!({ "path": make_absolute(&path) }),
        Command::Relative { path, to } => {
            let relative = match to {
                Some(base) => make_relative(&path, &base),
                None => make_relative_to_cwd(&path),
            };
            json!({ "path": relative })
        }
        Command::Simplify { path } => json!({ "path": simplify_relative_path(&path) }),
        Command::List {
            dir,
            recursive,
            files_only,
            dirs_only,
        } => {
            if !ops.is_directory(&dir) {
                return Err(Error::InvalidPath(format!("not a directory: {dir}")));
            }
            let options = ListOptions {
                recursive: recursive || config.listing.recursive,
                include_files: !dirs_only && config.listing.include_files,
                include_dirs: !files_only && config.listing.include_dirs,
            };
            json!({
                "dir": dir,
                "entries": ops.directory_contents(&dir, options),
            })
        }
        Command::Mkdir { path } => {
            require(ops.make_directory(&path), "mkdir", &path)?;
            json!({ "created": path })
        }
        Command::Copy { from, to } => {
            let copied = if ops.is_directory(&from) {
                ops.copy_directory(&from, &to)
            } else {
                ops.copy_file(&from, &to)
            };
            require(copied, "copy", &from)?;
            json!({ "from": from, "to": to })
        }
        Command::Move { from, to } => {
            let moved = if ops.is_directory(&from) {
                ops.move_directory(&from, &to)
            } else {
                ops.move_file(&from, &to)
            };
            require(moved, "move", &from)?;
            json!({ "from": from, "to": to })
        }
        Command::Delete { path, if_empty } => {
            let deleted = if ops.is_directory(&path) {
                ops.delete_directory(&path, if_empty)
            } else {
                ops.delete_file(&path)
            };
            require(deleted, "delete", &path)?;
            json!({ "deleted": path })
        }
        Command::Clear { dir } => {
            require(ops.clear_directory(&dir), "clear", &dir)?;
            json!({ "cleared": dir })
        }
        Command::Size { path } => {
            let stream = config.streams.open_input(&path);
            require(stream.is_valid(), "open", &path)?;
            json!({
                "path": path,
                "size": stream.size(),
                "byte_order": stream.byte_order().as_str(),
                "modified": ops.last_modified_time(&path),
            })
        }
    };

    println!("{}", serde_json::to_string_pretty(&value)?);
    logger.shutdown();
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    }
}

/// Maps a `false` result to an error. The cause has already gone through the logger.
fn require(ok: bool, op: &'static str, path: &str) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(Error::operation_failed(op, path))
    }
}
