//! Input/output formats and their adapters.
//!
//! [`Format`] is a closed enumeration - one variant per supported payload
//! format, each with exactly one [`FormatAdapter`] implementation. Adding a
//! format means adding a variant and an adapter, not sprinkling string
//! comparisons over the import and export paths.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::error::{DecodeResult, EncodeResult};
use crate::models::{RawRow, StoredLead};

pub mod csv;
pub mod excel;

pub use self::csv::CsvAdapter;
pub use self::excel::ExcelAdapter;

/// Column order for exports, shared by both adapters.
///
/// Headers are emitted camelCase; the import side accepts them through the
/// alias fallback, so an exported file re-imports cleanly.
pub const EXPORT_COLUMNS: [&str; 23] = [
    "id",
    "address",
    "city",
    "state",
    "zipCode",
    "county",
    "ownerName",
    "ownerPhone",
    "ownerEmail",
    "propertyType",
    "bedrooms",
    "bathrooms",
    "squareFeet",
    "yearBuilt",
    "estimatedValue",
    "estimatedEquity",
    "mortgageBalance",
    "lastSaleDate",
    "lastSalePrice",
    "status",
    "notes",
    "createdAt",
    "updatedAt",
];

/// The format string was neither `csv` nor `excel`.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Invalid format. Use csv or excel")]
pub struct UnknownFormat;

/// Supported payload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Delimited text (`.csv`).
    Csv,
    /// Open XML workbook (`.xlsx`).
    Excel,
}

impl Format {
    /// MIME type for export responses.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Format::Csv => "text/csv",
            Format::Excel => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    /// File extension for suggested filenames.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Excel => "xlsx",
        }
    }

    /// The adapter implementing this format.
    pub fn adapter(&self) -> &'static dyn FormatAdapter {
        match self {
            Format::Csv => &CsvAdapter,
            Format::Excel => &ExcelAdapter,
        }
    }
}

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Format::Csv),
            "excel" | "xlsx" => Ok(Format::Excel),
            _ => Err(UnknownFormat),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Csv => write!(f, "csv"),
            Format::Excel => write!(f, "excel"),
        }
    }
}

/// Converts payloads to raw rows and stored records back to payloads.
///
/// Decode failures abort the whole call - a malformed payload never yields
/// a partial row set.
pub trait FormatAdapter: Sync {
    /// Decode an opaque payload into ordered raw rows.
    fn decode(&self, payload: &[u8]) -> DecodeResult<Vec<RawRow>>;

    /// Encode ordered records into an opaque payload.
    fn encode(&self, leads: &[StoredLead]) -> EncodeResult<Vec<u8>>;
}

/// Render one stored lead as export cells, in [`EXPORT_COLUMNS`] order.
pub(crate) fn record_cells(lead: &StoredLead) -> Vec<String> {
    fn opt_str(v: &Option<String>) -> String {
        v.clone().unwrap_or_default()
    }
    fn opt_int(v: Option<i64>) -> String {
        v.map(|n| n.to_string()).unwrap_or_default()
    }
    fn opt_num(v: Option<f64>) -> String {
        v.map(|n| n.to_string()).unwrap_or_default()
    }

    vec![
        lead.id.to_string(),
        lead.lead.address.clone(),
        lead.lead.city.clone(),
        lead.lead.state.clone(),
        lead.lead.zip_code.clone(),
        opt_str(&lead.lead.county),
        opt_str(&lead.lead.owner_name),
        opt_str(&lead.lead.owner_phone),
        opt_str(&lead.lead.owner_email),
        lead.lead.property_type.clone(),
        opt_int(lead.lead.bedrooms),
        opt_num(lead.lead.bathrooms),
        opt_int(lead.lead.square_feet),
        opt_int(lead.lead.year_built),
        opt_num(lead.lead.estimated_value),
        opt_num(lead.lead.estimated_equity),
        opt_num(lead.lead.mortgage_balance),
        opt_str(&lead.lead.last_sale_date),
        opt_num(lead.lead.last_sale_price),
        lead.lead.status.clone(),
        opt_str(&lead.lead.notes),
        lead.created_at.to_rfc3339(),
        lead.updated_at.to_rfc3339(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!("csv".parse::<Format>(), Ok(Format::Csv));
        assert_eq!("excel".parse::<Format>(), Ok(Format::Excel));
        assert_eq!("xlsx".parse::<Format>(), Ok(Format::Excel));
        assert_eq!(" CSV ".parse::<Format>(), Ok(Format::Csv));
        assert_eq!("pdf".parse::<Format>(), Err(UnknownFormat));
        assert_eq!("".parse::<Format>(), Err(UnknownFormat));
    }

    #[test]
    fn test_unknown_format_message() {
        assert_eq!(UnknownFormat.to_string(), "Invalid format. Use csv or excel");
    }

    #[test]
    fn test_mime_and_extension() {
        assert_eq!(Format::Csv.mime_type(), "text/csv");
        assert_eq!(Format::Csv.extension(), "csv");
        assert!(Format::Excel.mime_type().contains("spreadsheetml"));
        assert_eq!(Format::Excel.extension(), "xlsx");
    }

    #[test]
    fn test_export_columns_count_matches_cells() {
        use crate::models::{Lead, StoredLead};
        use chrono::Utc;

        let lead = StoredLead {
            id: 1,
            lead: Lead {
                user_id: "u".into(),
                address: "1 Elm".into(),
                city: "Aurora".into(),
                state: "CO".into(),
                zip_code: "80010".into(),
                county: None,
                owner_name: None,
                owner_phone: None,
                owner_email: None,
                property_type: "Unknown".into(),
                bedrooms: None,
                bathrooms: None,
                square_feet: None,
                year_built: None,
                estimated_value: None,
                estimated_equity: None,
                mortgage_balance: None,
                last_sale_date: None,
                last_sale_price: None,
                status: "New".into(),
                notes: None,
            },
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(record_cells(&lead).len(), EXPORT_COLUMNS.len());
    }
}
