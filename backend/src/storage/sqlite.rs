//! SQLite-backed lead store.
//!
//! Bulk inserts run inside a single transaction: begin, N inserts with
//! `RETURNING id`, commit. If any insert fails the transaction guard is
//! dropped un-committed, which rolls the whole batch back - no partial
//! persistence is reachable, including through caller-side cancellation.

use chrono::Utc;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use super::LeadStore;
use crate::error::{StorageError, StorageResult};
use crate::models::{Lead, StoredLead};

const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS leads (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL,
    address TEXT NOT NULL,
    city TEXT NOT NULL,
    state TEXT NOT NULL,
    zip_code TEXT NOT NULL,
    county TEXT,
    owner_name TEXT,
    owner_phone TEXT,
    owner_email TEXT,
    property_type TEXT NOT NULL DEFAULT 'Unknown',
    bedrooms INTEGER,
    bathrooms REAL,
    square_feet INTEGER,
    year_built INTEGER,
    estimated_value REAL,
    estimated_equity REAL,
    mortgage_balance REAL,
    last_sale_date TEXT,
    last_sale_price REAL,
    status TEXT NOT NULL DEFAULT 'New',
    notes TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)";

const OWNER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_leads_user_created ON leads (user_id, created_at)";

const INSERT_LEAD: &str = "\
INSERT INTO leads (
    user_id, address, city, state, zip_code, county,
    owner_name, owner_phone, owner_email, property_type,
    bedrooms, bathrooms, square_feet, year_built,
    estimated_value, estimated_equity, mortgage_balance,
    last_sale_date, last_sale_price, status, notes,
    created_at, updated_at
) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
RETURNING id";

const SELECT_BY_OWNER: &str = "\
SELECT id, user_id, address, city, state, zip_code, county,
       owner_name, owner_phone, owner_email, property_type,
       bedrooms, bathrooms, square_feet, year_built,
       estimated_value, estimated_equity, mortgage_balance,
       last_sale_date, last_sale_price, status, notes,
       created_at, updated_at
FROM leads
WHERE user_id = ?
ORDER BY created_at DESC, id DESC";

/// Lead store on a `sqlx` SQLite pool.
pub struct SqliteLeadStore {
    pool: SqlitePool,
}

impl SqliteLeadStore {
    /// Wrap an existing pool. The schema must already exist.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to `url` and ensure the schema exists.
    pub async fn connect(url: &str) -> StorageResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Create the leads table and indexes if missing.
    pub async fn init_schema(&self) -> StorageResult<()> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        sqlx::query(OWNER_INDEX).execute(&self.pool).await?;
        Ok(())
    }
}

impl LeadStore for SqliteLeadStore {
    async fn insert_batch(&self, leads: &[Lead]) -> StorageResult<Vec<i64>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StorageError::Transaction(e.to_string()))?;

        let now = Utc::now();
        let mut ids = Vec::with_capacity(leads.len());
        for lead in leads {
            // an error drops `tx` un-committed, rolling back every
            // insert of this batch
            let (id,): (i64,) = sqlx::query_as(INSERT_LEAD)
                .bind(&lead.user_id)
                .bind(&lead.address)
                .bind(&lead.city)
                .bind(&lead.state)
                .bind(&lead.zip_code)
                .bind(&lead.county)
                .bind(&lead.owner_name)
                .bind(&lead.owner_phone)
                .bind(&lead.owner_email)
                .bind(&lead.property_type)
                .bind(lead.bedrooms)
                .bind(lead.bathrooms)
                .bind(lead.square_feet)
                .bind(lead.year_built)
                .bind(lead.estimated_value)
                .bind(lead.estimated_equity)
                .bind(lead.mortgage_balance)
                .bind(&lead.last_sale_date)
                .bind(lead.last_sale_price)
                .bind(&lead.status)
                .bind(&lead.notes)
                .bind(now)
                .bind(now)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| StorageError::Query(e.to_string()))?;
            ids.push(id);
        }

        tx.commit()
            .await
            .map_err(|e| StorageError::Transaction(e.to_string()))?;

        Ok(ids)
    }

    async fn list_by_owner(&self, user_id: &str) -> StorageResult<Vec<StoredLead>> {
        let leads = sqlx::query_as::<_, StoredLead>(SELECT_BY_OWNER)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StorageError::Query(e.to_string()))?;
        Ok(leads)
    }
}
