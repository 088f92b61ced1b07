//! Batch import: payload to import report.
//!
//! The contract, in order:
//!
//! 1. Fail fast on a missing owner identity or empty payload - nothing is
//!    decoded, nothing is written.
//! 2. Decode the payload via the selected format adapter. A decode failure
//!    aborts the call; no partial report exists.
//! 3. Validate every row independently (an earlier row's failure never
//!    affects a later row), normalizing the valid ones.
//! 4. Insert all valid records in one transaction. Any insert failure rolls
//!    the whole batch back and surfaces as a storage error, distinct from
//!    validation errors.
//!
//! Validation failures are not errors: they come back inside the report,
//! one entry per rejected row with every reason listed.

use crate::api::logs::{log_info, log_success, log_warning};
use crate::error::{ImportError, ImportResult};
use crate::format::Format;
use crate::models::{ImportReport, RowError};
use crate::storage::LeadStore;
use crate::transform::normalize;
use crate::validation::validate;

/// Import one payload for `user_id`. See the module docs for the contract.
pub async fn import_batch<S: LeadStore>(
    store: &S,
    payload: &[u8],
    format: Format,
    user_id: &str,
) -> ImportResult<ImportReport> {
    if user_id.trim().is_empty() {
        return Err(ImportError::MissingUserId);
    }
    if payload.is_empty() {
        return Err(ImportError::MissingPayload);
    }

    log_info(format!("Decoding {format} payload ({} bytes)...", payload.len()));
    let rows = format.adapter().decode(payload)?;
    log_success(format!("Decoded {} rows", rows.len()));

    let mut valid_records = Vec::new();
    let mut row_errors = Vec::new();

    // row numbers are 1-based and exclude the header
    for (idx, row) in rows.iter().enumerate() {
        let verdict = validate(row);
        if verdict.valid {
            valid_records.push(normalize(row, user_id));
        } else {
            row_errors.push(RowError {
                row: idx + 1,
                data: row.to_json(),
                errors: verdict.errors,
            });
        }
    }

    if row_errors.is_empty() {
        log_success(format!("All {} rows valid", valid_records.len()));
    } else {
        log_warning(format!(
            "{} valid, {} rejected by validation",
            valid_records.len(),
            row_errors.len()
        ));
    }

    let inserted_ids = store.insert_batch(&valid_records).await?;
    log_success(format!("Inserted {} leads", inserted_ids.len()));

    Ok(ImportReport {
        imported: valid_records.len(),
        failed: row_errors.len(),
        inserted_ids,
        row_errors,
    })
}
