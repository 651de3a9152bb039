//! Log setup. The terminal belongs to the TUI, so records go to a file.

use std::{
    fs::{self, File},
    io,
    path::PathBuf,
};

use env_logger::{Builder, Env, Target};

const LOG_FILE_NAME: &str = "motes.log";

fn log_path() -> Option<PathBuf> {
    motes_config::project_dirs().map(|dirs| dirs.data_local_dir().join(LOG_FILE_NAME))
}

fn open_log() -> io::Result<File> {
    let path = log_path().ok_or_else(|| io::Error::other("no home directory"))?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    File::create(path)
}

/// Initialise `env_logger`, honouring `RUST_LOG`. Logging is silently
/// disabled when the log file cannot be opened.
pub fn init() {
    let target: Box<dyn io::Write + Send> = match open_log() {
        Ok(file) => Box::new(file),
        Err(_) => Box::new(io::sink()),
    };

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(target))
        .init();
}
