//! Input validation functions
//!
//! Custom validators plugged into the `validator` derive on the request
//! types, plus helpers the backend applies before touching the store.

use chrono::{NaiveDate, Utc};
use std::borrow::Cow;
use std::sync::OnceLock;
use validator::ValidationError;

/// bcrypt only reads this many bytes of a password
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Digit count range for phone numbers (E.164 allows at most 15)
const MIN_PHONE_DIGITS: usize = 7;
const MAX_PHONE_DIGITS: usize = 15;

fn phone_regex() -> &'static regex_lite::Regex {
    static PHONE: OnceLock<regex_lite::Regex> = OnceLock::new();
    PHONE.get_or_init(|| {
        regex_lite::Regex::new(r"^\+?[0-9(][0-9 ()-]{5,19}$").expect("phone regex is valid")
    })
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// Canonical form of an email used for lookups and storage
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Reject empty or whitespace-only strings
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("blank", "Value must not be blank"));
    }
    Ok(())
}

/// Validate a phone number: digits with optional leading `+`, spaces,
/// dashes and parentheses
pub fn validate_phone_number(phone: &str) -> Result<(), ValidationError> {
    let phone = phone.trim();
    if phone.is_empty() {
        return Err(error("required", "Phone number is required"));
    }
    if !phone_regex().is_match(phone) {
        return Err(error("phone", "Invalid phone number format"));
    }
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits) {
        return Err(error("phone", "Phone number must contain 7 to 15 digits"));
    }
    Ok(())
}

/// Validate a new password: not blank, and no longer than bcrypt can hash
/// without truncation
///
/// The limit is in bytes, not characters: 25 three-byte code points are
/// already over it.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.trim().is_empty() {
        return Err(error("required", "Password is required"));
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(error("password_too_long", "Password must be at most 72 bytes"));
    }
    Ok(())
}

/// Validate that a date lies strictly in the past
pub fn validate_past_date(date: &NaiveDate) -> Result<(), ValidationError> {
    let today = Utc::now().date_naive();
    if *date >= today {
        return Err(error("past", "Date of birth must be in the past"));
    }
    Ok(())
}
