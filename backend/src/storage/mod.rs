//! Lead storage backends.
//!
//! The pipeline never talks to a global connection pool. It receives a
//! [`LeadStore`] handle per call, so the HTTP server passes its SQLite pool
//! and tests pass an in-memory store with failure injection.
//!
//! - [`sqlite::SqliteLeadStore`] - durable storage on `sqlx`/SQLite
//! - [`memory::MemoryLeadStore`] - in-memory store for tests
//!
//! # Contract
//!
//! `insert_batch` is all-or-nothing: it returns the storage-assigned ids in
//! input order, or fails with nothing persisted. There is no dedup across
//! batches - re-importing identical rows creates duplicate records.

use crate::error::StorageResult;
use crate::models::{Lead, StoredLead};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryLeadStore;
pub use sqlite::SqliteLeadStore;

/// A transactional store of lead records.
#[allow(async_fn_in_trait)]
pub trait LeadStore {
    /// Insert every record in one transaction, returning assigned ids in
    /// input order. Any failure rolls the whole batch back.
    async fn insert_batch(&self, leads: &[Lead]) -> StorageResult<Vec<i64>>;

    /// All records owned by `user_id`, newest first.
    async fn list_by_owner(&self, user_id: &str) -> StorageResult<Vec<StoredLead>>;
}
