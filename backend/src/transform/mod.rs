//! Row normalization: raw input rows to canonical lead records.
//!
//! [`normalize`] is invoked only on rows that already passed validation and
//! is total - it never fails. Field aliasing (snake_case preferred,
//! camelCase fallback) is resolved here, numeric text is coerced through the
//! named functions below, and absent fields land on their defaults.
//!
//! # Coercion contract
//!
//! `coerce_int` / `coerce_decimal` parse trimmed base-10 text. Absence and
//! parse failure both degrade to `None` - never a panic, never `NaN`, never
//! a silent zero. A legitimate `"0"` is kept as `Some(0)`: only
//! unparseable or missing input becomes null.

use crate::models::{non_empty, Lead, RawRow, DEFAULT_PROPERTY_TYPE, DEFAULT_STATUS};

/// Parse an optional cell as a base-10 integer. `None` on absence or
/// failure.
pub fn coerce_int(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
}

/// Parse an optional cell as a decimal number. `None` on absence or
/// failure; a non-finite parse result also degrades to `None`.
pub fn coerce_decimal(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Normalize a validated row into a canonical [`Lead`] owned by `user_id`.
///
/// Required fields are taken as-is (validation guarantees presence);
/// optional text fields resolve through their alias pair; numeric fields go
/// through the coercion functions above.
pub fn normalize(row: &RawRow, user_id: &str) -> Lead {
    Lead {
        user_id: user_id.to_string(),
        address: non_empty(&row.address).unwrap_or_default().to_string(),
        city: non_empty(&row.city).unwrap_or_default().to_string(),
        state: non_empty(&row.state).unwrap_or_default().to_string(),
        zip_code: row.zip_code.value().unwrap_or_default().to_string(),
        county: non_empty(&row.county).map(str::to_string),
        owner_name: row.owner_name.value().map(str::to_string),
        owner_phone: row.owner_phone.value().map(str::to_string),
        owner_email: row.owner_email.value().map(str::to_string),
        property_type: row
            .property_type
            .value()
            .unwrap_or(DEFAULT_PROPERTY_TYPE)
            .to_string(),
        bedrooms: coerce_int(non_empty(&row.bedrooms)),
        bathrooms: coerce_decimal(non_empty(&row.bathrooms)),
        square_feet: coerce_int(row.square_feet.value()),
        year_built: coerce_int(row.year_built.value()),
        estimated_value: coerce_decimal(row.estimated_value.value()),
        estimated_equity: coerce_decimal(row.estimated_equity.value()),
        mortgage_balance: coerce_decimal(row.mortgage_balance.value()),
        last_sale_date: row.last_sale_date.value().map(str::to_string),
        last_sale_price: coerce_decimal(row.last_sale_price.value()),
        status: non_empty(&row.status).unwrap_or(DEFAULT_STATUS).to_string(),
        notes: non_empty(&row.notes).map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        let mut row = RawRow::default();
        for (key, value) in pairs {
            row.set(key, value);
        }
        row
    }

    fn base_row() -> RawRow {
        row(&[
            ("address", "123 Main St"),
            ("city", "Springfield"),
            ("state", "IL"),
            ("zip_code", "62701"),
        ])
    }

    #[test]
    fn test_coerce_int_parses_and_degrades() {
        assert_eq!(coerce_int(Some("3")), Some(3));
        assert_eq!(coerce_int(Some(" 42 ")), Some(42));
        assert_eq!(coerce_int(Some("abc")), None);
        assert_eq!(coerce_int(Some("3.5")), None);
        assert_eq!(coerce_int(None), None);
    }

    #[test]
    fn test_coerce_int_keeps_zero() {
        // zero is a value, not a parse failure
        assert_eq!(coerce_int(Some("0")), Some(0));
    }

    #[test]
    fn test_coerce_decimal_parses_and_degrades() {
        assert_eq!(coerce_decimal(Some("2.5")), Some(2.5));
        assert_eq!(coerce_decimal(Some("250000")), Some(250000.0));
        assert_eq!(coerce_decimal(Some("n/a")), None);
        assert_eq!(coerce_decimal(None), None);
        assert_eq!(coerce_decimal(Some("0")), Some(0.0));
    }

    #[test]
    fn test_coerce_decimal_rejects_non_finite() {
        assert_eq!(coerce_decimal(Some("NaN")), None);
        assert_eq!(coerce_decimal(Some("inf")), None);
    }

    #[test]
    fn test_defaults_applied() {
        let lead = normalize(&base_row(), "user-1");
        assert_eq!(lead.user_id, "user-1");
        assert_eq!(lead.property_type, "Unknown");
        assert_eq!(lead.status, "New");
        assert_eq!(lead.bedrooms, None);
        assert_eq!(lead.estimated_value, None);
        assert_eq!(lead.notes, None);
    }

    #[test]
    fn test_snake_case_wins_over_camel_case() {
        let mut raw = base_row();
        raw.set("ownerPhone", "+19998887777");
        raw.set("owner_phone", "+12175551234");
        let lead = normalize(&raw, "user-1");
        assert_eq!(lead.owner_phone.as_deref(), Some("+12175551234"));
    }

    #[test]
    fn test_empty_snake_case_falls_back_to_camel() {
        let mut raw = base_row();
        raw.set("owner_email", "");
        raw.set("ownerEmail", "jane@example.com");
        let lead = normalize(&raw, "user-1");
        assert_eq!(lead.owner_email.as_deref(), Some("jane@example.com"));
    }

    #[test]
    fn test_numeric_garbage_becomes_null() {
        let mut raw = base_row();
        raw.set("bedrooms", "three");
        raw.set("estimatedValue", "unknown");
        raw.set("square_feet", "");
        let lead = normalize(&raw, "user-1");
        assert_eq!(lead.bedrooms, None);
        assert_eq!(lead.estimated_value, None);
        assert_eq!(lead.square_feet, None);
    }

    #[test]
    fn test_fractional_bathrooms() {
        let mut raw = base_row();
        raw.set("bathrooms", "2.5");
        let lead = normalize(&raw, "user-1");
        assert_eq!(lead.bathrooms, Some(2.5));
    }

    #[test]
    fn test_all_fields_resolved() {
        let raw = row(&[
            ("address", "456 Oak Ave"),
            ("city", "Decatur"),
            ("state", "IL"),
            ("zipCode", "62521"),
            ("county", "Macon"),
            ("owner_name", "Jane Doe"),
            ("owner_phone", "+12175551234"),
            ("owner_email", "jane@example.com"),
            ("property_type", "Single Family"),
            ("bedrooms", "3"),
            ("bathrooms", "1.5"),
            ("square_feet", "1450"),
            ("year_built", "1962"),
            ("estimated_value", "185000"),
            ("estimated_equity", "92000.50"),
            ("mortgage_balance", "93000"),
            ("last_sale_date", "2019-06-01"),
            ("last_sale_price", "150000"),
            ("status", "Contacted"),
            ("notes", "call after 5pm"),
        ]);
        let lead = normalize(&raw, "user-7");
        assert_eq!(lead.zip_code, "62521");
        assert_eq!(lead.county.as_deref(), Some("Macon"));
        assert_eq!(lead.property_type, "Single Family");
        assert_eq!(lead.bedrooms, Some(3));
        assert_eq!(lead.bathrooms, Some(1.5));
        assert_eq!(lead.square_feet, Some(1450));
        assert_eq!(lead.year_built, Some(1962));
        assert_eq!(lead.estimated_value, Some(185000.0));
        assert_eq!(lead.estimated_equity, Some(92000.5));
        assert_eq!(lead.mortgage_balance, Some(93000.0));
        assert_eq!(lead.last_sale_date.as_deref(), Some("2019-06-01"));
        assert_eq!(lead.last_sale_price, Some(150000.0));
        assert_eq!(lead.status, "Contacted");
        assert_eq!(lead.notes.as_deref(), Some("call after 5pm"));
    }
}
