// src/core/history.rs
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::core::config::HISTORY_CAPACITY;
use crate::storage::{SecretStore, StorageError};

/// Every history secret is stored under `<prefix><index:04>-<suffix>`.
pub const HISTORY_ALIAS_PREFIX: &str = "pwdgen-history-";

/// History shared between threads. Lock it around every mutation.
pub type SharedHistory<S> = Arc<Mutex<PasswordHistory<S>>>;

/// Bounded, newest-first record of recently generated passwords.
///
/// Entries are kept oldest-first in memory. Every mutation rewrites the whole
/// persisted set: all history aliases are deleted, then each survivor is
/// written under its position. Storage failures never propagate; they are
/// kept in [`PasswordHistory::last_error`] and turn the result into `false`.
pub struct PasswordHistory<S: SecretStore> {
    store: S,
    entries: VecDeque<String>,
    capacity: usize,
    last_error: Option<StorageError>,
}

impl<S: SecretStore> PasswordHistory<S> {
    /// Open with the default capacity.
    pub fn new(store: S) -> Self {
        Self::open(store, HISTORY_CAPACITY)
    }

    /// Rebuild the history from whatever `store` already holds.
    pub fn open(store: S, capacity: usize) -> Self {
        let mut history = Self {
            store,
            entries: VecDeque::new(),
            capacity: capacity.max(1),
            last_error: None,
        };

        let (persisted, stray, read_failed) = history.load_persisted();
        for password in &persisted {
            history.push(password);
        }

        // Normalize the backing store when replay dropped something, but never
        // when a read failed: rewriting then would destroy the unreadable entry.
        if !read_failed && (stray || history.entries.len() != persisted.len()) {
            history.persist();
        }

        log::debug!(
            "Loaded password history: {} of {} entries",
            history.entries.len(),
            history.capacity
        );
        history
    }

    /// Record `password` as the newest entry.
    ///
    /// Returns `false` without touching anything when `password` is already
    /// the newest entry, and `false` when persisting the new set failed (the
    /// in-memory entry is kept in that case).
    pub fn add(&mut self, password: &str) -> bool {
        if !self.push(password) {
            return false;
        }
        self.persist()
    }

    /// Remove the first (oldest) occurrence of `password`.
    pub fn remove(&mut self, password: &str) -> bool {
        let Some(position) = self.entries.iter().position(|p| p == password) else {
            return false;
        };
        self.entries.remove(position);
        self.persist()
    }

    /// Retained passwords, newest first.
    pub fn list(&self) -> Vec<String> {
        self.entries.iter().rev().cloned().collect()
    }

    /// Drop every entry and delete all history secrets from the store.
    pub fn clear(&mut self) -> bool {
        self.entries.clear();
        self.persist()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn last_error(&self) -> Option<&StorageError> {
        self.last_error.as_ref()
    }

    pub fn take_last_error(&mut self) -> Option<StorageError> {
        self.last_error.take()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn into_shared(self) -> SharedHistory<S> {
        Arc::new(Mutex::new(self))
    }

    // In-memory insertion shared by `add` and cold-start replay.
    fn push(&mut self, password: &str) -> bool {
        if self.entries.back().map_or(false, |newest| newest == password) {
            return false;
        }

        self.entries.push_back(password.to_string());
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        true
    }

    /// Read history secrets in position order.
    ///
    /// Returns the passwords, whether stray (unparsable) history aliases were
    /// seen, and whether any read failed.
    fn load_persisted(&mut self) -> (Vec<String>, bool, bool) {
        let aliases = match self.store.aliases() {
            Ok(aliases) => aliases,
            Err(e) => {
                self.record(e);
                return (Vec::new(), false, true);
            }
        };

        let mut stray = false;
        let mut indexed = Vec::new();
        for alias in aliases.into_iter().filter(|a| is_history_alias(a)) {
            match alias_index(&alias) {
                Some(index) => indexed.push((index, alias)),
                None => stray = true,
            }
        }
        indexed.sort();

        let mut read_failed = false;
        let mut passwords = Vec::with_capacity(indexed.len());
        for (_, alias) in indexed {
            match self.store.read(&alias) {
                Ok(password) => passwords.push(password),
                Err(e) => {
                    read_failed = true;
                    self.record(e);
                }
            }
        }

        (passwords, stray, read_failed)
    }

    /// Delete every history alias, then write each entry under its position.
    ///
    /// Writing is skipped when a delete failed, since leftover aliases would
    /// otherwise be replayed next to the new ones.
    fn persist(&mut self) -> bool {
        let mut first_error = None;

        match self.store.aliases() {
            Ok(aliases) => {
                for alias in aliases.iter().filter(|a| is_history_alias(a)) {
                    if let Err(e) = self.store.delete(alias) {
                        first_error.get_or_insert(e);
                    }
                }
            }
            Err(e) => {
                first_error = Some(e);
            }
        }

        if first_error.is_none() {
            for (index, password) in self.entries.iter().enumerate() {
                if let Err(e) = self.store.write(&make_alias(index), password) {
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => {
                self.record(e);
                false
            }
            None => {
                log::debug!("Persisted {} history entries", self.entries.len());
                true
            }
        }
    }

    fn record(&mut self, error: StorageError) {
        log::warn!("Password history storage error: {}", error);
        self.last_error = Some(error);
    }
}

fn is_history_alias(alias: &str) -> bool {
    alias.starts_with(HISTORY_ALIAS_PREFIX)
}

fn alias_index(alias: &str) -> Option<usize> {
    alias
        .strip_prefix(HISTORY_ALIAS_PREFIX)?
        .split('-')
        .next()?
        .parse()
        .ok()
}

fn make_alias(index: usize) -> String {
    format!("{}{:04}-{}", HISTORY_ALIAS_PREFIX, index, Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn history_with(passwords: &[&str]) -> PasswordHistory<MemoryStore> {
        let mut history = PasswordHistory::new(MemoryStore::new());
        for p in passwords {
            assert!(history.add(p));
        }
        history
    }

    fn history_aliases(store: &MemoryStore) -> Vec<String> {
        store
            .snapshot()
            .keys()
            .filter(|a| is_history_alias(a))
            .cloned()
            .collect()
    }

    #[test]
    fn evicts_oldest_and_lists_newest_first() {
        let history = history_with(&["a", "b", "c", "d"]);
        assert_eq!(history.list(), vec!["d", "c", "b"]);
        assert_eq!(history_aliases(history.store()).len(), 3);
    }

    #[test]
    fn consecutive_duplicate_is_ignored() {
        let mut history = history_with(&["x"]);
        assert!(!history.add("x"));
        assert_eq!(history.list(), vec!["x"]);
        assert!(history.last_error().is_none());
    }

    #[test]
    fn older_duplicates_may_coexist() {
        let mut history = history_with(&["x", "y"]);
        assert!(history.add("x"));
        assert_eq!(history.list(), vec!["x", "y", "x"]);
    }

    #[test]
    fn remove_keeps_order_of_the_rest() {
        let mut history = history_with(&["a", "b", "c"]);
        assert!(history.remove("b"));
        assert_eq!(history.list(), vec!["c", "a"]);
        assert!(!history.remove("b"));
        assert!(history.last_error().is_none());
    }

    #[test]
    fn remove_takes_first_occurrence() {
        let mut history = history_with(&["x", "y", "x"]);
        assert!(history.remove("x"));
        assert_eq!(history.list(), vec!["x", "y"]);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut history = history_with(&["a", "b"]);
        assert!(history.clear());
        assert!(history.list().is_empty());
        assert!(history_aliases(history.store()).is_empty());
        assert!(history.clear());
        assert!(history.last_error().is_none());
    }

    #[test]
    fn reopening_restores_order() {
        let history = history_with(&["a", "b", "c", "d"]);
        let before = history.list();

        let reopened = PasswordHistory::new(history.into_store());
        assert_eq!(reopened.list(), before);
    }

    #[test]
    fn aliases_are_positional() {
        let history = history_with(&["a", "b"]);
        let store = history.store();
        let aliases = history_aliases(store);
        assert!(aliases[0].starts_with("pwdgen-history-0000-"));
        assert!(aliases[1].starts_with("pwdgen-history-0001-"));
        assert_eq!(store.snapshot()[&aliases[0]], "a");
        assert_eq!(store.snapshot()[&aliases[1]], "b");
    }

    #[test]
    fn ordering_uses_numeric_index() {
        let mut store = MemoryStore::new();
        for i in 0..12 {
            store
                .write(&format!("{HISTORY_ALIAS_PREFIX}{i}-x"), &format!("p{i}"))
                .unwrap();
        }
        let history = PasswordHistory::open(store, 12);
        assert_eq!(history.list().first().map(String::as_str), Some("p11"));
        assert_eq!(history.list().last().map(String::as_str), Some("p0"));
    }

    #[test]
    fn unrelated_aliases_are_left_alone() {
        let mut store = MemoryStore::new();
        store.write("other-app-key", "keep me").unwrap();

        let mut history = PasswordHistory::new(store);
        history.add("a");
        history.clear();
        assert_eq!(history.store().snapshot()["other-app-key"], "keep me");
        assert!(history.list().is_empty());
    }

    #[test]
    fn smaller_capacity_on_reopen_trims_store() {
        let history = history_with(&["a", "b", "c"]);
        let reopened = PasswordHistory::open(history.into_store(), 2);
        assert_eq!(reopened.list(), vec!["c", "b"]);
        assert_eq!(history_aliases(reopened.store()).len(), 2);
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut history = PasswordHistory::open(MemoryStore::new(), 0);
        assert_eq!(history.capacity(), 1);
        history.add("a");
        history.add("b");
        assert_eq!(history.list(), vec!["b"]);
    }

    #[test]
    fn write_failure_is_recorded_not_raised() {
        let mut history = history_with(&["a"]);
        history.store_mut().fail_writes = true;

        assert!(!history.add("b"));
        assert!(matches!(
            history.last_error(),
            Some(StorageError::Unavailable(_))
        ));
        // In-memory view moves on even though the store did not
        assert_eq!(history.list(), vec!["b", "a"]);

        assert!(history.take_last_error().is_some());
        assert!(history.last_error().is_none());
    }

    #[test]
    fn delete_failure_fails_remove() {
        let mut history = history_with(&["a", "b"]);
        history.store_mut().fail_deletes = true;

        assert!(!history.remove("a"));
        assert!(history.last_error().is_some());
        // Persisted set is untouched, so a reopen still sees both entries
        history.store_mut().fail_deletes = false;
        let reopened = PasswordHistory::new(history.into_store());
        assert_eq!(reopened.list(), vec!["b", "a"]);
    }

    #[test]
    fn read_failure_on_open_keeps_persisted_data() {
        let mut store = history_with(&["a", "b"]).into_store();
        store.fail_reads = true;

        let history = PasswordHistory::new(store);
        assert!(history.is_empty());
        assert!(history.last_error().is_some());

        let mut store = history.into_store();
        store.fail_reads = false;
        assert_eq!(PasswordHistory::new(store).list(), vec!["b", "a"]);
    }

    #[test]
    fn stray_history_alias_is_cleaned_up() {
        let mut store = MemoryStore::new();
        store.write(&format!("{HISTORY_ALIAS_PREFIX}garbage"), "?").unwrap();
        store.write(&format!("{HISTORY_ALIAS_PREFIX}0000-a"), "a").unwrap();

        let history = PasswordHistory::new(store);
        assert_eq!(history.list(), vec!["a"]);
        assert_eq!(history_aliases(history.store()).len(), 1);
    }

    #[test]
    fn shared_history_serializes_mutations() {
        let shared = PasswordHistory::new(MemoryStore::new()).into_shared();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let shared = Arc::clone(&shared);
                std::thread::spawn(move || {
                    shared.lock().unwrap().add(&format!("p{i}"));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let history = shared.lock().unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history_aliases(history.store()).len(), 3);
    }
}
