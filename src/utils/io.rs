// src/utils/io.rs
use std::path::PathBuf;

use directories::ProjectDirs;

/// Per-user directory holding the keystore and the log file.
///
/// Nothing is created here. The keystore and the logger create their own
/// directories when they first write.
pub fn app_data_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "pwdgen", "pwdgen").map(|dirs| dirs.data_local_dir().to_path_buf())
}
