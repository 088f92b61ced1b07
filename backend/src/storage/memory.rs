//! In-memory lead store.
//!
//! Backs the pipeline in tests without a database. Mirrors the SQLite
//! store's transactional contract: a batch either lands completely or not
//! at all. A constraint failure can be injected by address to exercise the
//! rollback path.

use std::sync::Mutex;

use chrono::Utc;

use super::LeadStore;
use crate::error::{StorageError, StorageResult};
use crate::models::{Lead, StoredLead};

#[derive(Default)]
struct Inner {
    next_id: i64,
    rows: Vec<StoredLead>,
}

/// Mutex-guarded in-memory store.
#[derive(Default)]
pub struct MemoryLeadStore {
    inner: Mutex<Inner>,
    fail_on_address: Option<String>,
}

impl MemoryLeadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose insert fails on any lead with this address, standing
    /// in for a storage-side constraint violation.
    pub fn failing_on(address: impl Into<String>) -> Self {
        Self {
            inner: Mutex::default(),
            fail_on_address: Some(address.into()),
        }
    }

    /// Number of persisted rows across all owners.
    pub fn row_count(&self) -> usize {
        self.inner
            .lock()
            .map(|inner| inner.rows.len())
            .unwrap_or(0)
    }
}

impl LeadStore for MemoryLeadStore {
    async fn insert_batch(&self, leads: &[Lead]) -> StorageResult<Vec<i64>> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| StorageError::Connection("lead store mutex poisoned".into()))?;

        // check the whole batch before touching state, so a failure
        // leaves nothing behind
        if let Some(trigger) = &self.fail_on_address {
            if leads.iter().any(|l| &l.address == trigger) {
                return Err(StorageError::Query(format!(
                    "UNIQUE constraint failed: leads.address ({trigger})"
                )));
            }
        }

        let now = Utc::now();
        let mut ids = Vec::with_capacity(leads.len());
        for lead in leads {
            inner.next_id += 1;
            let id = inner.next_id;
            inner.rows.push(StoredLead {
                id,
                lead: lead.clone(),
                created_at: now,
                updated_at: now,
            });
            ids.push(id);
        }
        Ok(ids)
    }

    async fn list_by_owner(&self, user_id: &str) -> StorageResult<Vec<StoredLead>> {
        let inner = self
            .inner
            .lock()
            .map_err(|_| StorageError::Connection("lead store mutex poisoned".into()))?;

        let mut rows: Vec<StoredLead> = inner
            .rows
            .iter()
            .filter(|r| r.lead.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(rows)
    }
}
