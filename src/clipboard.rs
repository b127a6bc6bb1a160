// src/clipboard.rs
use console::style;

pub const COPIED_CURRENT: &str = "Copied current password";
pub const COPIED_RECENT: &str = "Copied recent password";

/// Receives a password to hand to the user plus a short confirmation.
/// Fire-and-forget: nothing is returned to the caller.
pub trait Clipboard {
    fn copy(&mut self, value: &str, message: &str);
}

/// Terminal stand-in for a system clipboard: prints the value so it can be
/// selected, followed by the confirmation.
#[derive(Debug, Default)]
pub struct TerminalClipboard;

impl Clipboard for TerminalClipboard {
    fn copy(&mut self, value: &str, message: &str) {
        println!("{}", style(value).bold());
        println!("{} {}", style("✔").green(), style(message).dim());
    }
}

/// Keeps every copy in memory; handy for embedding and tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingClipboard {
    pub copies: Vec<(String, String)>,
}

impl RecordingClipboard {
    pub fn last_value(&self) -> Option<&str> {
        self.copies.last().map(|(value, _)| value.as_str())
    }
}

impl Clipboard for RecordingClipboard {
    fn copy(&mut self, value: &str, message: &str) {
        self.copies.push((value.to_string(), message.to_string()));
    }
}
