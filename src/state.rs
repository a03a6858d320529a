//! Session state container for the account working set.
//!
//! Replaces the UI framework's state cell with an explicit container: loaded
//! once from the store at construction, held in memory for the session, and
//! mutated only through [`Board::update_account`], which performs a
//! copy-on-write replace-by-id and persists the full array. Single-writer;
//! no teardown.

use std::sync::Mutex;

use serde::Serialize;

use crate::accounts::{alignment_status, Account, AlignmentStatus};
use crate::error::StoreError;
use crate::store::{load_accounts, save_accounts, KvStore};

/// The in-memory account board backed by a key-value store.
pub struct Board<S: KvStore> {
    store: S,
    accounts: Mutex<Vec<Account>>,
}

/// Per-status counts across the working set. Derived on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignmentSummary {
    pub green: usize,
    pub yellow: usize,
    pub red: usize,
}

impl<S: KvStore> Board<S> {
    /// Load the working set once and hold it for the session.
    ///
    /// Invalid or missing stored data falls back to the seed portfolio; see
    /// [`load_accounts`].
    pub fn new(store: S) -> Self {
        let accounts = load_accounts(&store);
        Self {
            store,
            accounts: Mutex::new(accounts),
        }
    }

    /// Snapshot of the current working set.
    pub fn accounts(&self) -> Vec<Account> {
        self.accounts
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Look up one account by id.
    pub fn get_account(&self, id: &str) -> Option<Account> {
        self.accounts
            .lock()
            .ok()
            .and_then(|guard| guard.iter().find(|a| a.id == id).cloned())
    }

    /// Apply an edit: build a new collection with the matching entry replaced
    /// and the rest unchanged, persist the full array, then swap it in.
    ///
    /// An id with no match leaves the collection unchanged but still persists
    /// (the edit surface never creates accounts). In-memory state is only
    /// updated after the write succeeds.
    pub fn update_account(&self, updated: Account) -> Result<(), StoreError> {
        let mut guard = self.accounts.lock().map_err(|_| StoreError::LockPoisoned)?;

        if !guard.iter().any(|a| a.id == updated.id) {
            log::warn!("No account with id '{}'; collection unchanged", updated.id);
        }

        let next: Vec<Account> = guard
            .iter()
            .map(|a| {
                if a.id == updated.id {
                    updated.clone()
                } else {
                    a.clone()
                }
            })
            .collect();

        save_accounts(&self.store, &next)?;
        *guard = next;
        Ok(())
    }

    /// Portfolio roll-up of derived statuses.
    pub fn alignment_summary(&self) -> AlignmentSummary {
        let mut summary = AlignmentSummary::default();
        for account in self.accounts() {
            match alignment_status(&account) {
                AlignmentStatus::Green => summary.green += 1,
                AlignmentStatus::Yellow => summary.yellow += 1,
                AlignmentStatus::Red => summary.red += 1,
            }
        }
        summary
    }
}
