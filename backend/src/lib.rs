//! # Leadport - bulk lead import/export for real-estate CRM
//!
//! Leadport ingests lead files (CSV or Excel) uploaded by agents, validates
//! and normalizes every row, and bulk-inserts the valid subset in a single
//! transaction. Export is the mirror path back to a downloadable file.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Lead File  │────▶│   Format    │────▶│  Validate + │────▶│ Transactional│
//! │ (CSV/Excel) │     │   Adapter   │     │  Normalize  │     │ Bulk Insert  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use leadport::{import_batch, Format, MemoryLeadStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = MemoryLeadStore::new();
//!     let csv = b"address,city,state,zip_code\n1 Elm,Aurora,CO,80010\n";
//!     let report = import_batch(&store, csv, Format::Csv, "user-1").await.unwrap();
//!     println!("Imported {} leads", report.imported);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Domain models (RawRow, Lead, ImportReport)
//! - [`validation`] - Per-row schema validation
//! - [`transform`] - Coercion and normalization
//! - [`format`] - CSV and Excel adapters
//! - [`storage`] - Lead store trait and backends
//! - [`pipeline`] - Import/export orchestration
//! - [`api`] - HTTP API server

// Core modules
pub mod error;
pub mod models;

// Validation and normalization
pub mod transform;
pub mod validation;

// Format adapters
pub mod format;

// Storage
pub mod storage;

// Orchestration
pub mod pipeline;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    DecodeError,
    EncodeError,
    ExportError,
    ImportError,
    ServerError,
    StorageError,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    ExportPayload,
    ImportReport,
    Lead,
    RawRow,
    RowError,
    StoredLead,
    Verdict,
};

// =============================================================================
// Re-exports - Validation & Transform
// =============================================================================

pub use transform::{coerce_decimal, coerce_int, normalize};
pub use validation::validate;

// =============================================================================
// Re-exports - Formats
// =============================================================================

pub use format::{CsvAdapter, ExcelAdapter, Format, FormatAdapter, UnknownFormat};

// =============================================================================
// Re-exports - Storage
// =============================================================================

pub use storage::{LeadStore, MemoryLeadStore, SqliteLeadStore};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use pipeline::{export_batch, import_batch};

// =============================================================================
// Re-exports - API
// =============================================================================

pub use api::types::{error_response, ImportResponse};

// Server
pub mod server {
    pub use crate::api::server::start_server;
}
