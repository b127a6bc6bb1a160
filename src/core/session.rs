// src/core/session.rs
use crate::clipboard::{Clipboard, COPIED_CURRENT, COPIED_RECENT};
use crate::core::config::{clamp_length, Config};
use crate::core::history::PasswordHistory;
use crate::core::state::{AppState, PasswordState};
use crate::generators::PasswordGenerator;
use crate::storage::{SecretStore, StorageError};

/// Owns the application state and carries out user actions against it.
pub struct Session<S: SecretStore, C: Clipboard> {
    state: AppState,
    generator: PasswordGenerator,
    history: PasswordHistory<S>,
    clipboard: C,
}

impl<S: SecretStore, C: Clipboard> Session<S, C> {
    pub fn new(history: PasswordHistory<S>, clipboard: C, config: &Config) -> Self {
        let password =
            PasswordState::new(clamp_length(config.default_length), config.avoid_ambiguous);
        let recent = history.list();

        Self {
            state: AppState { password, recent },
            generator: PasswordGenerator::new(),
            history,
            clipboard,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn history(&self) -> &PasswordHistory<S> {
        &self.history
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn last_error(&self) -> Option<&StorageError> {
        self.history.last_error()
    }

    /// Show `instructions` until the first password is generated.
    ///
    /// Only replaces the content while nothing has been generated yet, so
    /// calling it again after a password exists leaves that password alone.
    pub fn initialize(&mut self, instructions: &str) {
        if !self.state.password.is_generated() {
            self.state.password = self.state.password.with_placeholder(instructions);
            self.refresh_recent();
        }
    }

    pub fn regenerate(&mut self) -> &PasswordState {
        self.state.password = self.state.password.with_new_password(&self.generator);
        &self.state.password
    }

    /// Generate with explicit options, replacing both length and flag.
    pub fn generate(&mut self, length: usize, avoid: bool) -> &PasswordState {
        let length = clamp_length(length);
        self.state.password = self.state.password.with_options(&self.generator, length, avoid);
        &self.state.password
    }

    /// Change the length, regenerating only when it actually changed.
    pub fn set_length(&mut self, length: usize) -> &PasswordState {
        let length = clamp_length(length);
        if length != self.state.password.length() {
            self.state.password = self.state.password.with_length(&self.generator, length);
        }
        &self.state.password
    }

    pub fn set_avoid_ambiguous(&mut self, avoid: bool) -> &PasswordState {
        self.state.password = self
            .state
            .password
            .with_avoid_ambiguous(&self.generator, avoid);
        &self.state.password
    }

    /// Copy the current password and remember it.
    ///
    /// While the placeholder is still showing, a password is generated first
    /// so there is something to copy. Returns whether the history was updated.
    pub fn copy_current(&mut self) -> bool {
        if !self.state.password.is_generated() {
            self.regenerate();
        }

        self.clipboard.copy(self.state.password.content(), COPIED_CURRENT);
        self.save_current()
    }

    /// Add the current password to the history without copying it.
    /// Placeholder text is never saved.
    pub fn save_current(&mut self) -> bool {
        if !self.state.password.is_generated() {
            return false;
        }
        let saved = self.history.add(self.state.password.content());
        self.refresh_recent();
        saved
    }

    /// Copy the recent password at `index` (0 is the newest).
    pub fn copy_recent(&mut self, index: usize) -> bool {
        match self.state.recent.get(index) {
            Some(password) => {
                self.clipboard.copy(password, COPIED_RECENT);
                true
            }
            None => false,
        }
    }

    pub fn delete_recent(&mut self, password: &str) -> bool {
        let removed = self.history.remove(password);
        self.refresh_recent();
        removed
    }

    pub fn clear_history(&mut self) -> bool {
        let cleared = self.history.clear();
        self.refresh_recent();
        cleared
    }

    fn refresh_recent(&mut self) {
        self.state.recent = self.history.list();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::RecordingClipboard;
    use crate::core::config::{LENGTH_MAX, LENGTH_MIN};
    use crate::storage::MemoryStore;

    const INSTRUCTIONS: &str = "Tap the password to copy it";

    fn session() -> Session<MemoryStore, RecordingClipboard> {
        let history = PasswordHistory::new(MemoryStore::new());
        let mut session = Session::new(history, RecordingClipboard::default(), &Config::default());
        session.initialize(INSTRUCTIONS);
        session
    }

    #[test]
    fn starts_with_instructions() {
        let session = session();
        assert_eq!(session.state().password.content(), INSTRUCTIONS);
        assert!(!session.state().password.is_generated());
        assert!(session.state().recent.is_empty());
    }

    #[test]
    fn copy_on_placeholder_generates_first() {
        let mut session = session();
        assert!(session.copy_current());

        let content = session.state().password.content().to_string();
        assert_ne!(content, INSTRUCTIONS);
        assert_eq!(content.len(), 16);
        assert_eq!(session.clipboard().last_value(), Some(content.as_str()));
        assert_eq!(session.clipboard().copies[0].1, COPIED_CURRENT);
        assert_eq!(session.state().recent, vec![content]);
    }

    #[test]
    fn copying_same_password_twice_keeps_one_entry() {
        let mut session = session();
        assert!(session.copy_current());
        assert!(!session.copy_current());
        assert_eq!(session.state().recent.len(), 1);
        assert_eq!(session.clipboard().copies.len(), 2);
    }

    #[test]
    fn initialize_does_not_clobber_a_password() {
        let mut session = session();
        let content = session.regenerate().content().to_string();
        session.initialize(INSTRUCTIONS);
        assert_eq!(session.state().password.content(), content);
    }

    #[test]
    fn set_length_clamps_and_skips_unchanged() {
        let mut session = session();
        assert_eq!(session.set_length(100).length(), LENGTH_MAX);
        let content = session.state().password.content().to_string();

        // Same (clamped) length: no regeneration
        session.set_length(LENGTH_MAX + 5);
        assert_eq!(session.state().password.content(), content);

        assert_eq!(session.set_length(1).content().len(), LENGTH_MIN);
    }

    #[test]
    fn generate_applies_both_options() {
        let mut session = session();
        let state = session.generate(24, true);
        assert_eq!(state.length(), 24);
        assert_eq!(state.content().len(), 24);
        assert!(state.avoid_ambiguous());
    }

    #[test]
    fn placeholder_is_never_saved() {
        let mut session = session();
        assert!(!session.save_current());
        assert!(session.history().is_empty());
    }

    #[test]
    fn toggling_ambiguous_regenerates() {
        let mut session = session();
        let state = session.set_avoid_ambiguous(true);
        assert!(state.is_generated());
        assert!(state.avoid_ambiguous());
    }

    #[test]
    fn recent_actions_follow_history() {
        let mut session = session();
        for _ in 0..4 {
            session.regenerate();
            session.copy_current();
        }
        assert_eq!(session.state().recent.len(), 3);

        let newest = session.state().recent[0].clone();
        assert!(session.copy_recent(0));
        assert_eq!(session.clipboard().last_value(), Some(newest.as_str()));
        assert_eq!(session.clipboard().copies.last().unwrap().1, COPIED_RECENT);
        assert!(!session.copy_recent(3));

        assert!(session.delete_recent(&newest));
        assert_eq!(session.state().recent.len(), 2);
        assert!(!session.state().recent.contains(&newest));

        assert!(session.clear_history());
        assert!(session.state().recent.is_empty());
    }

    #[test]
    fn recent_is_loaded_from_existing_history() {
        let mut history = PasswordHistory::new(MemoryStore::new());
        history.add("old-one");
        history.add("old-two");

        let session = Session::new(history, RecordingClipboard::default(), &Config::default());
        assert_eq!(session.state().recent, vec!["old-two", "old-one"]);
    }

    #[test]
    fn storage_failure_surfaces_as_last_error() {
        let mut store = MemoryStore::new();
        store.fail_writes = true;
        let history = PasswordHistory::new(store);
        let mut session = Session::new(history, RecordingClipboard::default(), &Config::default());

        assert!(!session.copy_current());
        assert!(session.last_error().is_some());
        // The copy itself still happened
        assert_eq!(session.clipboard().copies.len(), 1);
    }
}
