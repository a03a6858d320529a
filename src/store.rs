//! Key-value persistence for the account working set.
//!
//! Storage is an opaque get/set key-value collaborator holding the serialized
//! account array as one JSON blob under a fixed key. The load path validates
//! the blob's shape before trusting it; anything absent, unparsable, or
//! structurally invalid is discarded in favor of the fixed seed set. The read
//! happens once per session, so there is no retry.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::accounts::{seed_accounts, Account};
use crate::error::StoreError;

/// Fixed storage key for the serialized account array.
pub const ACCOUNTS_KEY: &str = "oab_accounts";

/// Opaque key-value storage collaborator.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

// =============================================================================
// Implementations
// =============================================================================

/// File-backed store: one JSON file per key under a state directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open the default store under `~/.outcome-board/`.
    pub fn open() -> Result<Self, StoreError> {
        let home = dirs::home_dir()
            .ok_or_else(|| StoreError::Io("Could not find home directory".to_string()))?;
        Self::open_at(home.join(".outcome-board"))
    }

    /// Open a store rooted at an explicit directory (used by tests).
    pub fn open_at(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }
        Ok(Self { dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::write(self.key_path(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// In-memory store. Cloning shares the underlying map, so a clone observes
/// writes made through the original (handy for session round-trip tests).
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let guard = self.entries.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut guard = self.entries.lock().map_err(|_| StoreError::LockPoisoned)?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut guard = self.entries.lock().map_err(|_| StoreError::LockPoisoned)?;
        guard.remove(key);
        Ok(())
    }
}

// =============================================================================
// Shape validation
// =============================================================================

/// Shape check for one stored element: string `id`, string `companyName`,
/// non-null object `expansion`. Nested expansion fields and enum value sets
/// are not checked, so structurally-close-but-wrong data can pass.
fn is_valid_account(value: &Value) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };
    obj.get("id").is_some_and(Value::is_string)
        && obj.get("companyName").is_some_and(Value::is_string)
        && obj.get("expansion").is_some_and(Value::is_object)
}

/// Validate a parsed storage blob before trusting it.
pub fn validate_accounts(value: &Value) -> Result<(), StoreError> {
    let Some(items) = value.as_array() else {
        return Err(StoreError::InvalidShape("expected a JSON array".to_string()));
    };
    for (i, item) in items.iter().enumerate() {
        if !is_valid_account(item) {
            return Err(StoreError::InvalidShape(format!(
                "element {} is not an account",
                i
            )));
        }
    }
    Ok(())
}

// =============================================================================
// Load / save
// =============================================================================

/// Load the working set from the store, falling back to the seed portfolio.
///
/// A stored value that fails to parse or validate is removed so the next
/// session starts clean. No error reaches the caller.
pub fn load_accounts(store: &dyn KvStore) -> Vec<Account> {
    let raw = match store.get(ACCOUNTS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return seed_accounts(),
        Err(e) => {
            log::warn!("Failed to read stored accounts: {}. Using seed data.", e);
            return seed_accounts();
        }
    };

    match parse_accounts(&raw) {
        Ok(accounts) => accounts,
        Err(e) => {
            log::warn!("Discarding stored accounts: {}. Using seed data.", e);
            if let Err(e) = store.remove(ACCOUNTS_KEY) {
                log::warn!("Failed to clear stale accounts key: {}", e);
            }
            seed_accounts()
        }
    }
}

fn parse_accounts(raw: &str) -> Result<Vec<Account>, StoreError> {
    let value: Value = serde_json::from_str(raw).map_err(|e| StoreError::Parse(e.to_string()))?;
    validate_accounts(&value)?;
    serde_json::from_value(value).map_err(|e| StoreError::Parse(e.to_string()))
}

/// Serialize the full account array and overwrite the stored value.
pub fn save_accounts(store: &dyn KvStore, accounts: &[Account]) -> Result<(), StoreError> {
    let content = serde_json::to_string_pretty(accounts)
        .map_err(|e| StoreError::Serialize(e.to_string()))?;
    store.set(ACCOUNTS_KEY, &content)
}

// =============================================================================
// Tests
// =============================================================================
