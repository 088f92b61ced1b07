//! Batch import/export orchestration.
//!
//! Ties the layers together: format adapters decode payloads into raw rows,
//! validation and normalization partition them, and the lead store persists
//! the valid subset in one transaction. Export is the mirror path.
//!
//! Both entry points are generic over [`crate::storage::LeadStore`], so the
//! HTTP server passes its SQLite store and tests pass the in-memory one.

pub mod export;
pub mod import;

pub use export::export_batch;
pub use import::import_batch;
