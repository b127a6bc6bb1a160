// src/logging/mod.rs
use std::fs::{self, OpenOptions};
use std::io;

use crate::core::config::Config;

/// Route the `log` facade to the configured log file.
///
/// Falls back to stderr when the file cannot be opened so a bad `LOG_FILE`
/// never stops the tool from starting.
pub fn init(config: &Config) -> io::Result<()> {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(config.log_level)
        .format_timestamp_secs()
        .format_module_path(true)
        .format_target(false);

    match open_log_file(config) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(e) => {
            eprintln!("Cannot open log file {}: {}", config.log_file.display(), e);
            builder.target(env_logger::Target::Stderr);
        }
    }

    builder
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
}

fn open_log_file(config: &Config) -> io::Result<fs::File> {
    if let Some(parent) = config.log_file.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
}
