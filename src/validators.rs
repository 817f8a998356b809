/// Identifier and phone validators for the intake forms.
///
/// Pure, total functions: each takes the raw field value, normalizes it the
/// way the backend expects, and returns either the normalized value or a
/// human-readable reason. No locale or time dependence.
use regex::Regex;

/// Validate a business/owner tax ID.
///
/// Input is uppercased first; the accepted shape is five letters, four
/// digits, one letter (10 characters).
pub fn validate_tax_id(raw: &str) -> Result<String, String> {
    let normalized = raw.trim().to_uppercase();
    if normalized.is_empty() {
        return Err("Tax ID is required.".to_string());
    }

    let pattern = Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").unwrap();
    if !pattern.is_match(&normalized) {
        return Err("Invalid tax ID format.".to_string());
    }

    Ok(normalized)
}

/// Validate a 12-digit national ID.
///
/// Non-digits are stripped before the length check, so formatted input like
/// "1234 5678 9012" is accepted.
pub fn validate_national_id(raw: &str) -> Result<String, String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err("National ID is required.".to_string());
    }
    if digits.len() != 12 {
        return Err("National ID must be 12 digits.".to_string());
    }

    Ok(digits)
}

/// Validate a corporate registration number.
///
/// The field is optional: an empty value is valid and normalizes to the
/// empty string. Non-empty values are uppercased and must match the fixed
/// 21-character shape (leading L or U, then digits/letters blocks).
pub fn validate_registration_number(raw: &str) -> Result<String, String> {
    let normalized = raw.trim().to_uppercase();
    if normalized.is_empty() {
        return Ok(String::new());
    }

    let pattern = Regex::new(r"^[LU][0-9]{5}[A-Z]{2}[0-9]{4}[A-Z]{3}[0-9]{6}$").unwrap();
    if !pattern.is_match(&normalized) {
        return Err("Invalid registration number format. (e.g., L12345DL2000PTC123456)".to_string());
    }

    Ok(normalized)
}

/// Validate a phone number.
///
/// The sole acceptance rule: at least 10 digits remain after stripping
/// every non-digit character. Returns the digit string.
pub fn validate_phone(raw: &str) -> Result<String, String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < 10 {
        return Err("Enter a valid phone number (at least 10 digits).".to_string());
    }

    Ok(digits)
}
