// src/storage/file.rs
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use base64::Engine;

use super::{validate_alias, Result, SecretStore, StorageError};
use crate::crypto::{self, CryptoError, SecretKey};

const SECRET_EXTENSION: &str = "secret";
const KEY_FILE: &str = "keystore.key";
const SALT_FILE: &str = "keystore.salt";
const CHECK_FILE: &str = "keystore.check";
const CHECK_VALUE: &[u8] = b"pwdgen-keystore-v1";

/// Where the keystore gets the key that seals its secrets.
#[derive(Debug, Clone)]
pub enum KeySource {
    /// A random key kept next to the secrets, generated on first open.
    KeyFile,
    /// A key derived from a passphrase with a per-keystore random salt.
    Passphrase(String),
}

/// Encrypted on-disk keystore: one sealed file per alias.
#[derive(Debug)]
pub struct FileKeystore {
    dir: PathBuf,
    key: SecretKey,
}

impl FileKeystore {
    pub fn open(dir: impl Into<PathBuf>, source: KeySource) -> Result<Self> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let key = match source {
            KeySource::KeyFile => load_or_create_key(&dir.join(KEY_FILE))?,
            KeySource::Passphrase(passphrase) => {
                let salt = load_or_create_salt(&dir.join(SALT_FILE))?;
                crypto::derive_key_from_passphrase(&passphrase, &salt)?
            }
        };

        let store = Self { dir, key };
        store.verify_key()?;

        log::debug!("Opened keystore at {}", store.dir.display());
        Ok(store)
    }

    /// Refuse a key that cannot open this keystore.
    ///
    /// The check value is sealed on first open. Keystores written before it
    /// existed are checked against one of their secrets instead.
    fn verify_key(&self) -> Result<()> {
        let check_path = self.dir.join(CHECK_FILE);

        if check_path.exists() {
            let sealed = fs::read(&check_path)?;
            return match crypto::decrypt_data(&self.key, &sealed) {
                Ok(value) if value == CHECK_VALUE => Ok(()),
                _ => Err(CryptoError::KeyMismatch.into()),
            };
        }

        if let Some(alias) = self.aliases()?.first() {
            let sealed = fs::read(self.secret_path(alias)?)?;
            if crypto::decrypt_data(&self.key, &sealed).is_err() {
                return Err(CryptoError::KeyMismatch.into());
            }
        }

        fs::write(&check_path, crypto::encrypt_data(&self.key, CHECK_VALUE)?)?;
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn secret_path(&self, alias: &str) -> Result<PathBuf> {
        validate_alias(alias)?;
        Ok(self.dir.join(format!("{alias}.{SECRET_EXTENSION}")))
    }
}

impl SecretStore for FileKeystore {
    fn aliases(&self) -> Result<Vec<String>> {
        let mut aliases = Vec::new();

        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().map_or(true, |ext| ext != SECRET_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if validate_alias(stem).is_ok() {
                    aliases.push(stem.to_string());
                }
            }
        }

        Ok(aliases)
    }

    fn write(&mut self, alias: &str, secret: &str) -> Result<()> {
        let path = self.secret_path(alias)?;
        let sealed = crypto::encrypt_data(&self.key, secret.as_bytes())?;

        // Write beside the target then rename so a crash never leaves half a secret
        let tmp = self.dir.join(format!(".{alias}.tmp"));
        fs::write(&tmp, sealed)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn read(&self, alias: &str) -> Result<String> {
        let path = self.secret_path(alias)?;
        let sealed = fs::read(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StorageError::NotFound(alias.to_string()),
            _ => StorageError::IoError(e),
        })?;
        let plain = crypto::decrypt_data(&self.key, &sealed)?;
        Ok(String::from_utf8(plain)?)
    }

    fn delete(&mut self, alias: &str) -> Result<()> {
        let path = self.secret_path(alias)?;
        fs::remove_file(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StorageError::NotFound(alias.to_string()),
            _ => StorageError::IoError(e),
        })
    }
}

fn load_or_create_key(path: &Path) -> Result<SecretKey> {
    if path.exists() {
        let bytes = read_base64(path)?;
        return Ok(SecretKey::from_bytes(&bytes)?);
    }

    let key = SecretKey::generate();
    write_private(path, &base64::engine::general_purpose::STANDARD.encode(key.as_bytes()))?;
    log::info!("Generated new keystore key at {}", path.display());
    Ok(key)
}

fn load_or_create_salt(path: &Path) -> Result<Vec<u8>> {
    if path.exists() {
        return read_base64(path);
    }

    let salt = crypto::generate_salt();
    write_private(path, &base64::engine::general_purpose::STANDARD.encode(salt))?;
    Ok(salt.to_vec())
}

fn read_base64(path: &Path) -> Result<Vec<u8>> {
    let encoded = fs::read_to_string(path)?;
    base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|e| CryptoError::InvalidFormat(format!("{}: {}", path.display(), e)).into())
}

fn write_private(path: &Path, contents: &str) -> io::Result<()> {
    fs::write(path, contents)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }

    Ok(())
}
