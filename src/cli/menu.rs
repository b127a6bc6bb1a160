// src/cli/menu.rs
use anyhow::Result;
use console::style;
use inquire::{Confirm, CustomType, Select};

use crate::cli::handlers::{render_recent, render_statistics};
use crate::clipboard::Clipboard;
use crate::core::config::{LENGTH_MAX, LENGTH_MIN};
use crate::core::session::Session;
use crate::storage::SecretStore;

const NEW_PASSWORD: &str = "🔄  New password";
const COPY_CURRENT: &str = "📋  Copy current password";
const CHANGE_LENGTH: &str = "📏  Change length";
const TOGGLE_AMBIGUOUS: &str = "👁   Toggle avoid ambiguous characters";
const COPY_RECENT: &str = "🕘  Copy a recent password";
const DELETE_RECENT: &str = "🗑   Delete a recent password";
const CLEAR_HISTORY: &str = "🧹  Clear history";
const EXIT: &str = "🚪  Exit";

pub fn run_cli_menu<S: SecretStore, C: Clipboard>(session: &mut Session<S, C>) -> Result<()> {
    println!("╔══════════════════════════════════════╗");
    println!("║         🦀 PASSWORD GENERATOR        ║");
    println!("╚══════════════════════════════════════╝");

    loop {
        print_screen(session);

        let mut options = vec![NEW_PASSWORD, COPY_CURRENT, CHANGE_LENGTH, TOGGLE_AMBIGUOUS];
        if !session.state().recent.is_empty() {
            options.extend([COPY_RECENT, DELETE_RECENT, CLEAR_HISTORY]);
        }
        options.push(EXIT);

        let choice = match Select::new("What would you like to do?", options).prompt() {
            Ok(choice) => choice,
            // Esc / Ctrl+C leave the menu
            Err(inquire::InquireError::OperationCanceled)
            | Err(inquire::InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };

        match choice {
            NEW_PASSWORD => {
                session.regenerate();
            }
            COPY_CURRENT => {
                if !session.copy_current() {
                    report_storage(session);
                }
            }
            CHANGE_LENGTH => {
                let length = CustomType::<usize>::new("Password length:")
                    .with_default(session.state().password.length())
                    .with_help_message(&format!("{}-{}", LENGTH_MIN, LENGTH_MAX))
                    .with_error_message("Please type a whole number")
                    .prompt()?;
                session.set_length(length);
            }
            TOGGLE_AMBIGUOUS => {
                let avoid = !session.state().password.avoid_ambiguous();
                session.set_avoid_ambiguous(avoid);
            }
            COPY_RECENT => {
                if let Some(index) = pick_recent(session, "Copy which password?")? {
                    session.copy_recent(index);
                }
            }
            DELETE_RECENT => {
                if let Some(index) = pick_recent(session, "Delete which password?")? {
                    let password = session.state().recent[index].clone();
                    if !session.delete_recent(&password) {
                        report_storage(session);
                    }
                }
            }
            CLEAR_HISTORY => {
                let confirmed = Confirm::new("Remove every recent password?")
                    .with_default(false)
                    .prompt()?;
                if confirmed && !session.clear_history() {
                    report_storage(session);
                }
            }
            _ => break,
        }
    }

    println!("👋 Goodbye!");
    Ok(())
}

fn print_screen<S: SecretStore, C: Clipboard>(session: &Session<S, C>) {
    let state = &session.state().password;

    println!();
    if state.is_generated() {
        println!("{}", style(state.content()).bold().cyan());
    } else {
        println!("{}", style(state.content()).italic());
    }
    println!(
        "Length: {}   Avoid ambiguous: {}",
        state.length(),
        if state.avoid_ambiguous() { "on" } else { "off" }
    );
    println!("{}", render_statistics(state));
    println!("\n{}", style("Recent passwords").underlined());
    println!("{}\n", render_recent(&session.state().recent));
}

fn pick_recent<S: SecretStore, C: Clipboard>(
    session: &Session<S, C>,
    prompt: &str,
) -> Result<Option<usize>> {
    let labels: Vec<String> = session
        .state()
        .recent
        .iter()
        .enumerate()
        .map(|(i, password)| format!("{}. {}", i, password))
        .collect();

    match Select::new(prompt, labels).raw_prompt() {
        Ok(choice) => Ok(Some(choice.index)),
        Err(inquire::InquireError::OperationCanceled) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn report_storage<S: SecretStore, C: Clipboard>(session: &Session<S, C>) {
    if let Some(e) = session.last_error() {
        log::warn!("History update failed: {}", e);
        println!("{} Could not update history: {}", style("⚠").yellow(), e);
    }
}
