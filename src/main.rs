// src/main.rs
use std::env;

use anyhow::{Context, Result};
use clap::Parser;

use rust_pwdgen::cli::{handlers, menu, Args, CliCommand, INSTRUCTIONS};
use rust_pwdgen::{logging, Config, FileKeystore, KeySource, PasswordHistory, Session, TerminalClipboard};

fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let (mut config, warnings) = Config::load();
    if let Some(dir) = &args.store_dir {
        config.store_dir = dir.clone();
    }

    match logging::init(&config) {
        Ok(()) => {
            for warning in &warnings {
                log::warn!("{}", warning);
            }
        }
        Err(e) => {
            eprintln!("Logging disabled: {}", e);
            for warning in &warnings {
                eprintln!("{}", warning);
            }
        }
    }
    log::info!("🔒 Starting pwdgen");
    log::debug!("Loaded config: {:?}", config);

    let key_source = match &args.passphrase_env {
        Some(var) => KeySource::Passphrase(
            env::var(var).with_context(|| format!("Passphrase variable {} is not set", var))?,
        ),
        None => KeySource::KeyFile,
    };

    let store = FileKeystore::open(&config.store_dir, key_source).with_context(|| {
        format!("Failed to open keystore at {}", config.store_dir.display())
    })?;
    let history = PasswordHistory::open(store, config.history_capacity);

    let mut session = Session::new(history, TerminalClipboard, &config);
    session.initialize(INSTRUCTIONS);

    let result = match args.command.unwrap_or(CliCommand::Menu) {
        CliCommand::Generate { length, avoid_ambiguous, allow_ambiguous, no_save } => {
            handlers::handle_generate(
                &mut session,
                length.unwrap_or(config.default_length),
                handlers::resolve_avoid_ambiguous(
                    avoid_ambiguous,
                    allow_ambiguous,
                    config.avoid_ambiguous,
                ),
                !no_save,
                args.json,
            )
        }
        CliCommand::History => handlers::handle_history(&session, args.json),
        CliCommand::Copy { index } => handlers::handle_copy(&mut session, index),
        CliCommand::Remove { password } => {
            handlers::handle_remove(&mut session, &password, args.json)
        }
        CliCommand::Clear => handlers::handle_clear(&mut session, args.json),
        CliCommand::Menu => menu::run_cli_menu(&mut session),
    };

    if let Err(e) = &result {
        log::error!("Command failed: {:#}", e);
    }
    log::info!("✅ pwdgen shutdown complete");
    result
}
