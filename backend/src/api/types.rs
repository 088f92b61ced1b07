//! REST API types for frontend integration.
//!
//! Response shapes mirror what the CRM frontend expects: camelCase keys,
//! an `errors` array only when some rows were rejected, and flat
//! `{ "error": ... }` bodies for failures.

use serde::Serialize;
use serde_json::{json, Value};

use crate::models::{ImportReport, RowError};

/// Body of a successful import response.
///
/// A fully-invalid batch (0 imported, everything in `errors`) is still a
/// success at this level - only decode and storage failures are HTTP
/// errors.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    pub success: bool,
    pub imported: usize,
    pub failed: usize,
    pub inserted_ids: Vec<i64>,
    /// Present only if `failed > 0`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<RowError>>,
}

impl From<ImportReport> for ImportResponse {
    fn from(report: ImportReport) -> Self {
        ImportResponse {
            success: true,
            imported: report.imported,
            failed: report.failed,
            inserted_ids: report.inserted_ids,
            errors: if report.row_errors.is_empty() {
                None
            } else {
                Some(report.row_errors)
            },
        }
    }
}

/// Flat error body.
pub fn error_response(error: &str) -> Value {
    json!({ "error": error })
}

/// Error body with a diagnostic detail string.
pub fn error_response_with_details(error: &str, details: &str) -> Value {
    json!({ "error": error, "details": details })
}
