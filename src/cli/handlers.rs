// src/cli/handlers.rs
use anyhow::{bail, Result};
use console::style;
use serde_json::json;

use crate::clipboard::Clipboard;
use crate::core::session::Session;
use crate::core::state::PasswordState;
use crate::storage::SecretStore;

// Handlers for CLI commands
pub fn handle_generate<S: SecretStore, C: Clipboard>(
    session: &mut Session<S, C>,
    length: usize,
    avoid_ambiguous: bool,
    save: bool,
    as_json: bool,
) -> Result<()> {
    session.generate(length, avoid_ambiguous);
    let saved = save && session.save_current();

    let state = &session.state().password;
    if as_json {
        println!(
            "{}",
            json!({
                "password": state,
                "saved": saved,
                "error": last_error(session),
            })
        );
    } else {
        println!("{}", style(state.content()).bold());
        println!("{}", render_statistics(state));
        if save && !saved {
            warn_storage(session);
        }
    }
    Ok(())
}

pub fn handle_history<S: SecretStore, C: Clipboard>(
    session: &Session<S, C>,
    as_json: bool,
) -> Result<()> {
    let recent = &session.state().recent;
    if as_json {
        println!("{}", json!({ "recent": recent }));
    } else {
        println!("{}", render_recent(recent));
    }
    Ok(())
}

pub fn handle_copy<S: SecretStore, C: Clipboard>(
    session: &mut Session<S, C>,
    index: usize,
) -> Result<()> {
    if !session.copy_recent(index) {
        bail!(
            "No recent password at position {} ({} stored)",
            index,
            session.state().recent.len()
        );
    }
    Ok(())
}

pub fn handle_remove<S: SecretStore, C: Clipboard>(
    session: &mut Session<S, C>,
    password: &str,
    as_json: bool,
) -> Result<()> {
    let removed = session.delete_recent(password);
    if as_json {
        println!("{}", json!({ "removed": removed, "error": last_error(session) }));
    } else if removed {
        println!("✅ Removed from history");
    } else if session.last_error().is_some() {
        warn_storage(session);
    } else {
        println!("Password is not in the history");
    }
    Ok(())
}

pub fn handle_clear<S: SecretStore, C: Clipboard>(
    session: &mut Session<S, C>,
    as_json: bool,
) -> Result<()> {
    let cleared = session.clear_history();
    if as_json {
        println!("{}", json!({ "cleared": cleared, "error": last_error(session) }));
    } else if cleared {
        println!("🧹 History cleared");
    } else {
        warn_storage(session);
    }
    Ok(())
}

/// Pick the ambiguous-character setting for `generate`: an explicit flag wins
/// over the configured default.
pub fn resolve_avoid_ambiguous(avoid: bool, allow: bool, configured: bool) -> bool {
    match (avoid, allow) {
        (true, _) => true,
        (_, true) => false,
        _ => configured,
    }
}

/// Character statistics laid out as label/value rows.
pub fn render_statistics(state: &PasswordState) -> String {
    let counts = state.counts();
    [
        ("Total", counts.total()),
        ("Lowercase", counts.lower),
        ("Uppercase", counts.upper),
        ("Numbers", counts.digit),
        ("Symbols", counts.symbol),
    ]
    .iter()
    .map(|(label, value)| format!("{:>10}: {}", label, value))
    .collect::<Vec<_>>()
    .join("\n")
}

/// Numbered list of recent passwords, newest first.
pub fn render_recent(recent: &[String]) -> String {
    if recent.is_empty() {
        return "No recent passwords".to_string();
    }
    recent
        .iter()
        .enumerate()
        .map(|(i, password)| format!("{}. {}", i, password))
        .collect::<Vec<_>>()
        .join("\n")
}

fn last_error<S: SecretStore, C: Clipboard>(session: &Session<S, C>) -> Option<String> {
    session.last_error().map(|e| e.to_string())
}

fn warn_storage<S: SecretStore, C: Clipboard>(session: &Session<S, C>) {
    if let Some(e) = session.last_error() {
        eprintln!("{} history not saved: {}", style("⚠").yellow(), e);
    }
}
