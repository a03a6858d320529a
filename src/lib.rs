//! Outcome Alignment Board — core library.
//!
//! Tracks a portfolio of customer accounts and derives an alignment status
//! (green/yellow/red) plus an expansion-readiness flag from each account's
//! documented outcome, metric, sponsor, cadence, and confidence. Edits go
//! through a session state container that replaces the collection
//! copy-on-write and persists the full array to a key-value store; invalid
//! stored data falls back to a fixed seed portfolio.

pub mod accounts;
pub mod error;
pub mod state;
pub mod store;

pub use accounts::{
    alignment_status, is_expansion_ready, seed_accounts, Account, AlignmentStatus,
    ExpansionOpportunity, ExpansionStage, ExpansionType, ReviewCadence,
};
pub use error::StoreError;
pub use state::{AlignmentSummary, Board};
pub use store::{load_accounts, save_accounts, FileStore, KvStore, MemoryStore, ACCOUNTS_KEY};
