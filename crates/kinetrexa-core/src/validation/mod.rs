//! Applicant field validation helpers.
//!
//! The derive-based checks on request types cover shape (lengths, email,
//! URL); the helpers here cover the fields that need custom rules.

use std::sync::OnceLock;

use regex::Regex;
use validator::ValidationError;

/// Digits-only core of a phone number after stripping separators:
/// optional leading `+`, then 7 to 15 digits (E.164 upper bound).
fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("phone regex is valid"))
}

/// Validate a phone number, tolerating spaces, dashes, and parentheses.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let stripped: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();

    if phone_regex().is_match(&stripped) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone");
        err.message = Some("phone must be 7-15 digits, optionally prefixed with +".into());
        Err(err)
    }
}

/// Canonical form used for storage and duplicate checks.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
