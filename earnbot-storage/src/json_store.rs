//! LedgerStore: the whole ledger in one JSON file.
//!
//! Every read-modify-write holds an async mutex, so concurrent updates inside one process are
//! serialized. Writes go to a temp file in the same directory and are renamed over the ledger,
//! so readers never observe a half-written file. The lock is in-process only.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::error::StorageError;
use crate::models::Ledger;

/// JSON file store for the [`Ledger`].
#[derive(Debug)]
pub struct LedgerStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl LedgerStore {
    /// Opens the store at `path`, creating parent directories and an empty `{}` file if missing.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        if !path.exists() {
            write_atomic(&path, b"{}")?;
            info!(path = %path.display(), "Created empty ledger file");
        }
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole ledger.
    pub async fn load(&self) -> Result<Ledger, StorageError> {
        let _guard = self.lock.lock().await;
        self.read_ledger()
    }

    /// Replaces the file with `ledger`.
    pub async fn save(&self, ledger: &Ledger) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        self.write_ledger(ledger)
    }

    /// Loads the ledger, applies `f`, and saves the result, all under the store lock.
    /// Nothing is written when `f` fails.
    #[instrument(skip(self, f), fields(path = %self.path.display()))]
    pub async fn update<T, F>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&mut Ledger) -> Result<T, StorageError>,
    {
        let _guard = self.lock.lock().await;
        let mut ledger = self.read_ledger()?;
        let value = f(&mut ledger)?;
        self.write_ledger(&ledger)?;
        debug!(users = ledger.len(), "Ledger saved");
        Ok(value)
    }

    fn read_ledger(&self) -> Result<Ledger, StorageError> {
        read_ledger_file(&self.path)
    }

    fn write_ledger(&self, ledger: &Ledger) -> Result<(), StorageError> {
        let json = serde_json::to_vec_pretty(ledger)?;
        write_atomic(&self.path, &json)
    }
}

/// Reads a ledger file without creating or locking it. Missing or blank files are empty ledgers.
pub fn read_ledger_file(path: &Path) -> Result<Ledger, StorageError> {
    match fs::read_to_string(path) {
        Ok(content) if content.trim().is_empty() => Ok(Ledger::new()),
        Ok(content) => Ok(serde_json::from_str(&content)?),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Ledger::new()),
        Err(e) => Err(e.into()),
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .map_err(|e| StorageError::Persist(e.to_string()))?;
    Ok(())
}
