// src/core/state.rs
use serde::{Deserialize, Serialize};

use crate::core::config::LENGTH_DEFAULT;
use crate::generators::{ClassCounts, GeneratedPassword, PasswordGenerator};

/// The current password and its statistics.
///
/// Immutable: every change goes through a `with_*` method that returns a new
/// state, and counts are only ever set together with the content they
/// describe. A placeholder (instructions, or empty) always has zero counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordState {
    length: usize,
    content: String,
    counts: ClassCounts,
    avoid_ambiguous: bool,
    generated: bool,
}

impl PasswordState {
    /// An empty placeholder state.
    pub fn new(length: usize, avoid_ambiguous: bool) -> Self {
        Self {
            length,
            content: String::new(),
            counts: ClassCounts::default(),
            avoid_ambiguous,
            generated: false,
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn counts(&self) -> ClassCounts {
        self.counts
    }

    pub fn avoid_ambiguous(&self) -> bool {
        self.avoid_ambiguous
    }

    /// Whether `content` is a real password rather than placeholder text.
    pub fn is_generated(&self) -> bool {
        self.generated
    }

    /// Fresh password with the current length and flag.
    pub fn with_new_password(&self, generator: &PasswordGenerator) -> Self {
        self.with_options(generator, self.length, self.avoid_ambiguous)
    }

    pub fn with_length(&self, generator: &PasswordGenerator, length: usize) -> Self {
        self.with_options(generator, length, self.avoid_ambiguous)
    }

    pub fn with_avoid_ambiguous(&self, generator: &PasswordGenerator, avoid: bool) -> Self {
        self.with_options(generator, self.length, avoid)
    }

    /// Show `text` instead of a password. Length and flag are kept.
    pub fn with_placeholder(&self, text: &str) -> Self {
        Self {
            content: text.to_string(),
            counts: ClassCounts::default(),
            generated: false,
            ..self.clone()
        }
    }

    pub fn with_options(&self, generator: &PasswordGenerator, length: usize, avoid: bool) -> Self {
        let GeneratedPassword { content, counts } = generator.generate(length, avoid);
        Self {
            length,
            content,
            counts,
            avoid_ambiguous: avoid,
            generated: true,
        }
    }
}

impl Default for PasswordState {
    fn default() -> Self {
        Self::new(LENGTH_DEFAULT, false)
    }
}

/// Everything the presentation layer shows: the current password and the
/// recent history, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    pub password: PasswordState,
    pub recent: Vec<String>,
}
