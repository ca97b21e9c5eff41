use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use log::{debug, warn};

use crate::{
    Error,
    error::Result,
};

/// Supplies the bearer credential attached to every backend request.
/// Implementations are consulted on each call, so a credential changed
/// between two requests is picked up by the second one.
pub trait CredentialSource {
    fn token(&self) -> Option<String>;
}

impl<F> CredentialSource for F where F: Fn() -> Option<String> {
    fn token(&self) -> Option<String> {
        self()
    }
}

/// Persistent key/value storage backed by a single JSON object file.
/// Nothing is cached in memory: every read goes back to disk.
#[derive(Clone, Debug)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        let data = match fs::read_to_string(&self.path) {
            Ok(v) => v,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(Error::Io(format!("Reading token store {} error: {e}", self.path.display()))),
        };

        if data.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str::<BTreeMap<String, String>>(&data).map_err(|e| {
            Error::State(format!("Token store {} is broken: {e}", self.path.display()))
        })
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e|
                    Error::Io(format!("Creating directory path {} error: {e}", parent.display()))
                )?;
            }
        }

        let data = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, data).map_err(|e|
            Error::Io(format!("Writing token store {} error: {e}", self.path.display()))
        )
    }

    /// Missing file, missing key and unreadable content all read as `None`.
    pub fn get(&self, key: &str) -> Option<String> {
        match self.read_all() {
            Ok(mut entries) => entries.remove(key),
            Err(e) => {
                warn!("{e}");
                None
            }
        }
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)?;
        debug!("Stored item {} into {}", key, self.path.display());
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<bool> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_none() {
            return Ok(false);
        }
        self.write_all(&entries)?;
        Ok(true)
    }

    /// A credential source reading `key` from this store on every call.
    pub fn credentials(&self, key: &str) -> StoredCredential {
        StoredCredential {
            store: self.clone(),
            key: key.to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct StoredCredential {
    store: TokenStore,
    key: String,
}

impl StoredCredential {
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl CredentialSource for StoredCredential {
    fn token(&self) -> Option<String> {
        self.store.get(&self.key).filter(|v| !v.is_empty())
    }
}
