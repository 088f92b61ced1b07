//! Domain models for the lead import/export pipeline.
//!
//! This module contains the core data structures used throughout the pipeline:
//!
//! - [`RawRow`] - one decoded, untyped input row prior to validation
//! - [`Aliased`] - a column captured under snake_case and camelCase spellings
//! - [`Verdict`] - per-row validation outcome
//! - [`Lead`] - fully normalized lead record, owned by an account
//! - [`StoredLead`] - a persisted lead with its storage-assigned id
//! - [`ImportReport`] / [`RowError`] - structured import outcome
//! - [`ExportPayload`] - serialized export with content metadata

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Default property type when the input does not carry one.
pub const DEFAULT_PROPERTY_TYPE: &str = "Unknown";

/// Default pipeline status for newly imported leads.
pub const DEFAULT_STATUS: &str = "New";

// =============================================================================
// Aliased column
// =============================================================================

/// One logical column captured under either naming convention.
///
/// Input files address the same field as `owner_phone` or `ownerPhone`; both
/// spellings are kept so the precedence rule (snake_case wins, empty counts
/// as absent) lives in [`Aliased::value`] instead of being scattered over
/// the normalizer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aliased {
    snake: Option<String>,
    camel: Option<String>,
}

impl Aliased {
    /// Store the snake_case spelling of the column.
    pub fn set_snake(&mut self, value: impl Into<String>) {
        self.snake = Some(value.into());
    }

    /// Store the camelCase spelling of the column.
    pub fn set_camel(&mut self, value: impl Into<String>) {
        self.camel = Some(value.into());
    }

    /// Resolve the column value: snake_case preferred, camelCase as
    /// fallback. An empty string is treated as absent.
    pub fn value(&self) -> Option<&str> {
        non_empty(&self.snake).or_else(|| non_empty(&self.camel))
    }

    /// Whether either spelling carries a non-empty value.
    pub fn is_present(&self) -> bool {
        self.value().is_some()
    }

    fn render_into(&self, out: &mut Map<String, Value>, snake_key: &str, camel_key: &str) {
        if let Some(v) = &self.snake {
            out.insert(snake_key.to_string(), json!(v));
        }
        if let Some(v) = &self.camel {
            out.insert(camel_key.to_string(), json!(v));
        }
    }
}

/// Treat empty strings as absent values.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

// =============================================================================
// Raw Row
// =============================================================================

/// One decoded input row, untouched by validation or normalization.
///
/// The shape is fixed: every recognized column has a slot, and columns the
/// schema does not know are dropped at decode time. Single-word columns
/// (`address`, `city`, ...) spell the same in both conventions and need only
/// one slot; multi-word columns keep both spellings via [`Aliased`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Aliased,
    pub county: Option<String>,
    pub owner_name: Aliased,
    pub owner_phone: Aliased,
    pub owner_email: Aliased,
    pub property_type: Aliased,
    pub bedrooms: Option<String>,
    pub bathrooms: Option<String>,
    pub square_feet: Aliased,
    pub year_built: Aliased,
    pub estimated_value: Aliased,
    pub estimated_equity: Aliased,
    pub mortgage_balance: Aliased,
    pub last_sale_date: Aliased,
    pub last_sale_price: Aliased,
    pub status: Option<String>,
    pub notes: Option<String>,
}

impl RawRow {
    /// Assign one decoded cell to its slot.
    ///
    /// Unrecognized column names are ignored - extra columns in an input
    /// file never fail a row.
    pub fn set(&mut self, column: &str, value: &str) {
        match column {
            "address" => self.address = Some(value.to_string()),
            "city" => self.city = Some(value.to_string()),
            "state" => self.state = Some(value.to_string()),
            "zip_code" => self.zip_code.set_snake(value),
            "zipCode" => self.zip_code.set_camel(value),
            "county" => self.county = Some(value.to_string()),
            "owner_name" => self.owner_name.set_snake(value),
            "ownerName" => self.owner_name.set_camel(value),
            "owner_phone" => self.owner_phone.set_snake(value),
            "ownerPhone" => self.owner_phone.set_camel(value),
            "owner_email" => self.owner_email.set_snake(value),
            "ownerEmail" => self.owner_email.set_camel(value),
            "property_type" => self.property_type.set_snake(value),
            "propertyType" => self.property_type.set_camel(value),
            "bedrooms" => self.bedrooms = Some(value.to_string()),
            "bathrooms" => self.bathrooms = Some(value.to_string()),
            "square_feet" => self.square_feet.set_snake(value),
            "squareFeet" => self.square_feet.set_camel(value),
            "year_built" => self.year_built.set_snake(value),
            "yearBuilt" => self.year_built.set_camel(value),
            "estimated_value" => self.estimated_value.set_snake(value),
            "estimatedValue" => self.estimated_value.set_camel(value),
            "estimated_equity" => self.estimated_equity.set_snake(value),
            "estimatedEquity" => self.estimated_equity.set_camel(value),
            "mortgage_balance" => self.mortgage_balance.set_snake(value),
            "mortgageBalance" => self.mortgage_balance.set_camel(value),
            "last_sale_date" => self.last_sale_date.set_snake(value),
            "lastSaleDate" => self.last_sale_date.set_camel(value),
            "last_sale_price" => self.last_sale_price.set_snake(value),
            "lastSalePrice" => self.last_sale_price.set_camel(value),
            "status" => self.status = Some(value.to_string()),
            "notes" => self.notes = Some(value.to_string()),
            _ => {}
        }
    }

    /// Re-render the row as JSON for diagnostics, preserving the spellings
    /// the input actually used. Empty cells are kept - a blank required
    /// field should show up blank in the error report, not vanish.
    pub fn to_json(&self) -> Value {
        let mut out = Map::new();
        let plain = [
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("county", &self.county),
            ("bedrooms", &self.bedrooms),
            ("bathrooms", &self.bathrooms),
            ("status", &self.status),
            ("notes", &self.notes),
        ];
        for (key, value) in plain {
            if let Some(v) = value {
                out.insert(key.to_string(), json!(v));
            }
        }
        self.zip_code.render_into(&mut out, "zip_code", "zipCode");
        self.owner_name.render_into(&mut out, "owner_name", "ownerName");
        self.owner_phone.render_into(&mut out, "owner_phone", "ownerPhone");
        self.owner_email.render_into(&mut out, "owner_email", "ownerEmail");
        self.property_type.render_into(&mut out, "property_type", "propertyType");
        self.square_feet.render_into(&mut out, "square_feet", "squareFeet");
        self.year_built.render_into(&mut out, "year_built", "yearBuilt");
        self.estimated_value.render_into(&mut out, "estimated_value", "estimatedValue");
        self.estimated_equity.render_into(&mut out, "estimated_equity", "estimatedEquity");
        self.mortgage_balance.render_into(&mut out, "mortgage_balance", "mortgageBalance");
        self.last_sale_date.render_into(&mut out, "last_sale_date", "lastSaleDate");
        self.last_sale_price.render_into(&mut out, "last_sale_price", "lastSalePrice");
        Value::Object(out)
    }
}

// =============================================================================
// Validation Verdict
// =============================================================================

/// Outcome of validating one raw row.
///
/// `valid` is true iff `errors` is empty. Produced fresh per row, never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Verdict {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl Verdict {
    /// Build a verdict from the collected error messages.
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

// =============================================================================
// Canonical Lead Record
// =============================================================================

/// A fully normalized lead, ready for persistence.
///
/// Every field is present: either a concrete value or an explicit `None`.
/// The owner identity is attached verbatim to every record of a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    /// Owning account reference.
    pub user_id: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub county: Option<String>,
    pub owner_name: Option<String>,
    pub owner_phone: Option<String>,
    pub owner_email: Option<String>,
    pub property_type: String,
    pub bedrooms: Option<i64>,
    /// Fractional values allowed (2.5 bathrooms).
    pub bathrooms: Option<f64>,
    pub square_feet: Option<i64>,
    pub year_built: Option<i64>,
    pub estimated_value: Option<f64>,
    pub estimated_equity: Option<f64>,
    pub mortgage_balance: Option<f64>,
    pub last_sale_date: Option<String>,
    pub last_sale_price: Option<f64>,
    pub status: String,
    pub notes: Option<String>,
}

/// A lead as persisted: the canonical record plus storage-assigned
/// identifier and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StoredLead {
    pub id: i64,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub lead: Lead,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Import Report
// =============================================================================

/// Diagnostics for one rejected row.
#[derive(Debug, Clone, Serialize)]
pub struct RowError {
    /// 1-based row number, header excluded.
    pub row: usize,
    /// The original row as decoded, for the caller to inspect.
    pub data: Value,
    /// Every reason the row was rejected, in check order.
    pub errors: Vec<String>,
}

/// Structured outcome of one import call.
///
/// `imported + failed` always equals the number of decoded rows. The ids in
/// `inserted_ids` are in insert order, which is input order with invalid
/// rows removed.
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    pub failed: usize,
    pub inserted_ids: Vec<i64>,
    pub row_errors: Vec<RowError>,
}

impl ImportReport {
    /// Total rows the batch decoded, valid and invalid together.
    pub fn row_count(&self) -> usize {
        self.imported + self.failed
    }
}

// =============================================================================
// Export Payload
// =============================================================================

/// Serialized export bytes plus the content metadata an HTTP layer needs.
#[derive(Debug, Clone)]
pub struct ExportPayload {
    pub mime_type: String,
    pub filename: String,
    pub bytes: Vec<u8>,
}

// =============================================================================
// Tests
// =============================================================================
