// src/storage/memory.rs
use std::collections::BTreeMap;

use super::{validate_alias, Result, SecretStore, StorageError};

/// In-process secret store. Failures can be switched on per operation to
/// exercise error paths of callers.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    secrets: BTreeMap<String, String>,
    pub fail_reads: bool,
    pub fail_writes: bool,
    pub fail_deletes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw alias -> secret view of the store.
    pub fn snapshot(&self) -> &BTreeMap<String, String> {
        &self.secrets
    }

    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }
}

impl SecretStore for MemoryStore {
    fn aliases(&self) -> Result<Vec<String>> {
        if self.fail_reads {
            return Err(StorageError::Unavailable("alias enumeration failed".into()));
        }
        Ok(self.secrets.keys().cloned().collect())
    }

    fn write(&mut self, alias: &str, secret: &str) -> Result<()> {
        validate_alias(alias)?;
        if self.fail_writes {
            return Err(StorageError::Unavailable(format!("write of {alias} failed")));
        }
        self.secrets.insert(alias.to_string(), secret.to_string());
        Ok(())
    }

    fn read(&self, alias: &str) -> Result<String> {
        if self.fail_reads {
            return Err(StorageError::Unavailable(format!("read of {alias} failed")));
        }
        self.secrets
            .get(alias)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(alias.to_string()))
    }

    fn delete(&mut self, alias: &str) -> Result<()> {
        if self.fail_deletes {
            return Err(StorageError::Unavailable(format!("delete of {alias} failed")));
        }
        self.secrets
            .remove(alias)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(alias.to_string()))
    }
}
