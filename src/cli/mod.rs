// src/cli/mod.rs
use std::path::PathBuf;

use clap::Parser;

pub mod commands;
pub mod handlers;
pub mod menu;

pub use commands::CliCommand;

/// Placeholder shown until the first password is generated.
pub const INSTRUCTIONS: &str = "Choose \"Copy current password\" to generate one";

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate random passwords and keep a short encrypted history", long_about = None)]
pub struct Args {
    /// Use JSON for output
    #[arg(long)]
    pub json: bool,

    /// Directory of the encrypted history keystore
    #[arg(long, env = "PWDGEN_STORE_DIR")]
    pub store_dir: Option<PathBuf>,

    /// Name of an environment variable holding the keystore passphrase
    #[arg(long)]
    pub passphrase_env: Option<String>,

    /// Command to execute (defaults to the interactive menu)
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}
