//! Row validation against the lead schema.
//!
//! [`validate`] is a pure function: given one [`RawRow`] it returns a
//! [`Verdict`] with every violation collected - a row missing three required
//! fields reports all three, not just the first. Validation is the only gate
//! for row health; normalization downstream never rejects a row.
//!
//! # Checks
//!
//! - `address`, `city`, `state`, `zip_code` must be present and non-empty
//! - `owner_phone`, when present, must look like an E.164 number
//! - `owner_email`, when present, must look like `local@domain.tld`

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{non_empty, RawRow, Verdict};

/// E.164-style phone: optional leading `+`, first digit 1-9, ten to
/// fifteen digits total. Short fragments like `123` do not pass.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[1-9]\d{9,14}$").expect("phone regex"));

/// Simplified email shape: no whitespace or `@` in local/domain parts,
/// domain must contain a dot.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

/// Validate one raw row. Collects all violations; never short-circuits.
pub fn validate(row: &RawRow) -> Verdict {
    let mut errors = Vec::new();

    if non_empty(&row.address).is_none() {
        errors.push("Address is required".to_string());
    }
    if non_empty(&row.city).is_none() {
        errors.push("City is required".to_string());
    }
    if non_empty(&row.state).is_none() {
        errors.push("State is required".to_string());
    }
    if !row.zip_code.is_present() {
        errors.push("Zip code is required".to_string());
    }

    if let Some(phone) = row.owner_phone.value() {
        if !PHONE_RE.is_match(phone) {
            errors.push("Invalid phone number format".to_string());
        }
    }

    if let Some(email) = row.owner_email.value() {
        if !EMAIL_RE.is_match(email) {
            errors.push("Invalid email format".to_string());
        }
    }

    Verdict::from_errors(errors)
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

    #[test]
    fn test_complete_row_is_valid() {
        let verdict = validate(&row(&[
            ("address", "123 Main St"),
            ("city", "Springfield"),
            ("state", "IL"),
            ("zip_code", "62701"),
            ("owner_phone", "+12175551234"),
            ("owner_email", "john@example.com"),
        ]));
        assert!(verdict.valid, "errors: {:?}", verdict.errors);
        assert!(verdict.errors.is_empty());
    }

    #[test]
    fn test_empty_address_reports_required() {
        let verdict = validate(&row(&[
            ("address", ""),
            ("city", "Springfield"),
            ("state", "IL"),
            ("zip_code", "62701"),
        ]));
        assert!(!verdict.valid);
        assert_eq!(verdict.errors, vec!["Address is required"]);
    }

    #[test]
    fn test_all_missing_fields_are_reported() {
        let verdict = validate(&row(&[("state", "IL")]));
        assert!(!verdict.valid);
        assert_eq!(
            verdict.errors,
            vec![
                "Address is required",
                "City is required",
                "Zip code is required",
            ]
        );
    }

    #[test]
    fn test_missing_two_required_fields_reports_both() {
        let verdict = validate(&row(&[("address", "123 Main St"), ("state", "IL")]));
        assert_eq!(verdict.errors.len(), 2);
        assert!(verdict.errors.contains(&"City is required".to_string()));
        assert!(verdict.errors.contains(&"Zip code is required".to_string()));
    }

    #[test]
    fn test_short_phone_is_invalid() {
        let verdict = validate(&row(&[
            ("address", "123 Main St"),
            ("city", "Springfield"),
            ("state", "IL"),
            ("zip_code", "62701"),
            ("owner_phone", "123"),
        ]));
        assert!(!verdict.valid);
        assert!(verdict
            .errors
            .contains(&"Invalid phone number format".to_string()));
    }

    #[test]
    fn test_phone_with_letters_is_invalid() {
        let verdict = validate(&row(&[
            ("address", "123 Main St"),
            ("city", "Springfield"),
            ("state", "IL"),
            ("zip_code", "62701"),
            ("ownerPhone", "+1 (217) 555-1234"),
        ]));
        assert!(verdict
            .errors
            .contains(&"Invalid phone number format".to_string()));
    }

    #[test]
    fn test_plain_ten_digit_phone_is_valid() {
        let verdict = validate(&row(&[
            ("address", "123 Main St"),
            ("city", "Springfield"),
            ("state", "IL"),
            ("zip_code", "62701"),
            ("owner_phone", "2175551234"),
        ]));
        assert!(verdict.valid, "errors: {:?}", verdict.errors);
    }

    #[test]
    fn test_malformed_email_is_invalid() {
        let verdict = validate(&row(&[
            ("address", "123 Main St"),
            ("city", "Springfield"),
            ("state", "IL"),
            ("zip_code", "62701"),
            ("owner_email", "invalid-email"),
        ]));
        assert!(!verdict.valid);
        assert!(verdict.errors.contains(&"Invalid email format".to_string()));
    }

    #[test]
    fn test_email_without_domain_dot_is_invalid() {
        let verdict = validate(&row(&[
            ("address", "123 Main St"),
            ("city", "Springfield"),
            ("state", "IL"),
            ("zip_code", "62701"),
            ("owner_email", "john@localhost"),
        ]));
        assert!(verdict.errors.contains(&"Invalid email format".to_string()));
    }

    #[test]
    fn test_absent_optionals_do_not_error() {
        let verdict = validate(&row(&[
            ("address", "123 Main St"),
            ("city", "Springfield"),
            ("state", "IL"),
            ("zipCode", "62701"),
        ]));
        assert!(verdict.valid);
    }

    #[test]
    fn test_zip_code_accepted_under_either_spelling() {
        let snake = validate(&row(&[
            ("address", "1 Elm"),
            ("city", "Aurora"),
            ("state", "CO"),
            ("zip_code", "80010"),
        ]));
        let camel = validate(&row(&[
            ("address", "1 Elm"),
            ("city", "Aurora"),
            ("state", "CO"),
            ("zipCode", "80010"),
        ]));
        assert!(snake.valid);
        assert!(camel.valid);
    }
}
