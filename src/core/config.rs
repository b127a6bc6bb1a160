// src/core/config.rs
use std::env;
use std::path::PathBuf;
use log::LevelFilter;

pub const LENGTH_MIN: usize = 8;
pub const LENGTH_MAX: usize = 30;
pub const LENGTH_DEFAULT: usize = 16;
pub const HISTORY_CAPACITY: usize = 3;

// Configuration for the generator, its history and logging
#[derive(Debug, Clone)]
pub struct Config {
    // Password Generation
    pub default_length: usize,
    pub avoid_ambiguous: bool,

    // History
    pub history_capacity: usize,
    pub store_dir: PathBuf,

    // Logging
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let base_dir = crate::utils::app_data_dir().unwrap_or_else(|| PathBuf::from("."));

        Self {
            // Password Generation
            default_length: LENGTH_DEFAULT,
            avoid_ambiguous: false,

            // History
            history_capacity: HISTORY_CAPACITY,
            store_dir: base_dir.join("keystore"),

            // Logging
            log_level: LevelFilter::Info,
            log_file: base_dir.join("pwdgen.log"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This runs before logging is set up, so problems with the values come
    /// back as warnings for the caller to report once a logger exists.
    pub fn load() -> (Self, Vec<String>) {
        let mut config = Config::default();
        let mut warnings = Vec::new();

        // Password Generation
        if let Some(length) = parse_var::<usize>("PWDGEN_DEFAULT_LENGTH", &mut warnings) {
            config.default_length = clamp_length(length);
        }

        if let Some(avoid) = parse_var("PWDGEN_AVOID_AMBIGUOUS", &mut warnings) {
            config.avoid_ambiguous = avoid;
        }

        // History
        if let Some(capacity) = parse_var::<usize>("PWDGEN_HISTORY_CAPACITY", &mut warnings) {
            config.history_capacity = capacity.max(1);
        }

        if let Ok(dir) = env::var("PWDGEN_STORE_DIR") {
            config.store_dir = PathBuf::from(dir);
        }

        // Logging
        if let Ok(level) = env::var("LOG_LEVEL") {
            match level.to_lowercase().as_str() {
                "off" => config.log_level = LevelFilter::Off,
                "error" => config.log_level = LevelFilter::Error,
                "warn" => config.log_level = LevelFilter::Warn,
                "info" => config.log_level = LevelFilter::Info,
                "debug" => config.log_level = LevelFilter::Debug,
                "trace" => config.log_level = LevelFilter::Trace,
                _ => warnings.push(format!(
                    "Unknown log level '{}', keeping {}",
                    level, config.log_level
                )),
            }
        }

        if let Ok(file) = env::var("LOG_FILE") {
            config.log_file = PathBuf::from(file);
        }

        (config, warnings)
    }
}

/// Clamp a requested length into the supported slider range.
pub fn clamp_length(length: usize) -> usize {
    length.clamp(LENGTH_MIN, LENGTH_MAX)
}

fn parse_var<T: std::str::FromStr>(name: &str, warnings: &mut Vec<String>) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warnings.push(format!("Ignoring unparsable value for {}: {:?}", name, raw));
            None
        }
    }
}
