// src/lib.rs
//! Random password generation with per-class statistics and a short,
//! encrypted history of recently generated passwords.

pub mod cli;
pub mod clipboard;
pub mod core;
pub mod crypto;
pub mod generators;
pub mod logging;
pub mod storage;
pub mod utils;

pub use crate::clipboard::{Clipboard, RecordingClipboard, TerminalClipboard};
pub use crate::core::config::Config;
pub use crate::core::history::{PasswordHistory, SharedHistory};
pub use crate::core::session::Session;
pub use crate::core::state::{AppState, PasswordState};
pub use crate::generators::{ClassCounts, GeneratedPassword, PasswordGenerator};
pub use crate::storage::{FileKeystore, KeySource, MemoryStore, SecretStore, StorageError};
