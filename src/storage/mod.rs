// src/storage/mod.rs
use std::io;
use thiserror::Error;

mod file;
mod memory;

pub use file::{FileKeystore, KeySource};
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Encryption error: {0}")]
    CryptoError(#[from] crate::crypto::CryptoError),

    #[error("Secret not found: {0}")]
    NotFound(String),

    #[error("Invalid alias: {0:?}")]
    InvalidAlias(String),

    #[error("Stored secret is not valid UTF-8: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    #[error("Key store unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// A key/credential store that holds one secret per alias.
///
/// Aliases are opaque to the store. Callers are responsible for any ordering
/// they need to recover from alias names.
pub trait SecretStore {
    /// Every alias currently held, in no particular order.
    fn aliases(&self) -> Result<Vec<String>>;

    /// Create or overwrite the secret stored under `alias`.
    fn write(&mut self, alias: &str, secret: &str) -> Result<()>;

    fn read(&self, alias: &str) -> Result<String>;

    fn delete(&mut self, alias: &str) -> Result<()>;
}

impl<S: SecretStore + ?Sized> SecretStore for Box<S> {
    fn aliases(&self) -> Result<Vec<String>> {
        (**self).aliases()
    }

    fn write(&mut self, alias: &str, secret: &str) -> Result<()> {
        (**self).write(alias, secret)
    }

    fn read(&self, alias: &str) -> Result<String> {
        (**self).read(alias)
    }

    fn delete(&mut self, alias: &str) -> Result<()> {
        (**self).delete(alias)
    }
}

/// Aliases double as file names, so keep them to a safe character set.
pub(crate) fn validate_alias(alias: &str) -> Result<()> {
    let valid = !alias.is_empty()
        && !alias.starts_with('.')
        && alias
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidAlias(alias.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_validation() {
        assert!(validate_alias("pwdgen-history-0001-abc").is_ok());
        assert!(validate_alias("a.b_c").is_ok());
        for bad in ["", "../etc/passwd", "has space", ".hidden", "slash/inside"] {
            assert!(
                matches!(validate_alias(bad), Err(StorageError::InvalidAlias(_))),
                "{bad:?} should be rejected"
            );
        }
    }
}
