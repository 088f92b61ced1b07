//! Error types for the lead import/export pipeline.
//!
//! This module defines a hierarchy of error types, one per pipeline layer:
//!
//! - [`DecodeError`] - payload decoding errors (CSV text, Excel workbooks)
//! - [`StorageError`] - storage/transaction errors
//! - [`ImportError`] - top-level import orchestration errors
//! - [`ExportError`] - top-level export orchestration errors
//! - [`ServerError`] - HTTP server errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.
//!
//! The taxonomy matters to callers: a [`DecodeError`] or [`StorageError`]
//! aborts a whole batch, while per-row validation failures are not errors at
//! all - they are carried inside the import report.

use thiserror::Error;

// =============================================================================
// Decode Errors
// =============================================================================

/// Errors while decoding an input payload into raw rows.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Failed to read input.
    #[error("Failed to read input: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to decode text encoding.
    #[error("Failed to decode text: {0}")]
    EncodingError(String),

    /// Invalid delimited-text structure.
    #[error("Invalid CSV format: {0}")]
    ParseError(String),

    /// Empty payload.
    #[error("Input file is empty")]
    EmptyInput,

    /// No header row found.
    #[error("No headers found in input")]
    NoHeaders,

    /// The payload is not a well-formed workbook.
    #[error("Invalid Excel workbook: {0}")]
    InvalidWorkbook(String),

    /// The workbook contains no worksheets.
    #[error("Workbook has no worksheets")]
    NoWorksheet,
}

// =============================================================================
// Encode Errors
// =============================================================================

/// Errors while encoding records into an output payload.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Delimited-text writer error.
    #[error("CSV write error: {0}")]
    CsvError(String),

    /// Workbook serialization error.
    #[error("Workbook write error: {0}")]
    WorkbookError(String),
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors from the lead store.
///
/// Any of these, raised mid-batch, rolls back the whole transaction.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Could not open or reach the database.
    #[error("Database connection error: {0}")]
    Connection(String),

    /// A statement failed (constraint violation, malformed query, ...).
    #[error("Database query error: {0}")]
    Query(String),

    /// Transaction begin/commit failed.
    #[error("Transaction error: {0}")]
    Transaction(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(e: sqlx::Error) -> Self {
        StorageError::Query(e.to_string())
    }
}

// =============================================================================
// Import Errors (top-level)
// =============================================================================

/// Top-level import orchestration errors.
///
/// This is the main error type returned by
/// [`crate::pipeline::import::import_batch`]. Per-row validation failures
/// never appear here - they are carried in the report.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Owner identity was missing or empty.
    #[error("User ID is required")]
    MissingUserId,

    /// Payload was missing or empty.
    #[error("File data is required")]
    MissingPayload,

    /// Decoding the payload failed; no rows were processed.
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The bulk insert failed; the transaction rolled back.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

// =============================================================================
// Export Errors (top-level)
// =============================================================================

/// Top-level export orchestration errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Owner identity was missing or empty.
    #[error("User ID is required")]
    MissingUserId,

    /// Fetching records failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Serializing records failed.
    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Import pipeline error.
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Export pipeline error.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Invalid request.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Server internal error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Result type for encode operations.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type for import operations.
pub type ImportResult<T> = Result<T, ImportError>;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
