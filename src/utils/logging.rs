//! File logging. The terminal belongs to the game, so log records go to
//! ~/.lander-ext/lander-ext.log instead of stderr. `RUST_LOG` overrides the
//! default `info` filter.

use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};

pub const LOG_FILE: &str = "lander-ext.log";

/// Install the global logger, appending to `dir/lander-ext.log`.
pub fn init(dir: &Path) -> io::Result<PathBuf> {
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))?;

    log::info!(
        "{} started at {}",
        super::build_info::version_line(),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    Ok(path)
}
