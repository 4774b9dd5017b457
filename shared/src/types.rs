//! Request and response types for the customer auth API
//!
//! JSON field names are camelCase to match what the web client sends.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use crate::validation::{
    validate_not_blank, validate_password, validate_past_date, validate_phone_number,
};

/// Token type reported alongside every issued token
pub const BEARER: &str = "Bearer";

// ============================================================================
// Auth Types
// ============================================================================

/// Customer registration request
#[derive(Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(
        length(max = 100, message = "First name is too long"),
        custom(function = "validate_not_blank", message = "First name is required")
    )]
    pub first_name: String,
    #[validate(
        length(max = 100, message = "Last name is too long"),
        custom(function = "validate_not_blank", message = "Last name is required")
    )]
    pub last_name: String,
    #[validate(email(message = "Invalid email format"), length(max = 255))]
    pub email: String,
    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: String,
    #[validate(custom(function = "validate_password"))]
    pub password: String,
    pub confirm_password: String,
    #[validate(custom(function = "validate_past_date"))]
    pub date_of_birth: NaiveDate,
}

impl RegisterRequest {
    /// Whether the password and its confirmation are identical
    pub fn passwords_match(&self) -> bool {
        self.password == self.confirm_password
    }
}

// Passwords never reach logs, even through `{:?}`.
impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("phone_number", &self.phone_number)
            .field("password", &"[REDACTED]")
            .field("confirm_password", &"[REDACTED]")
            .field("date_of_birth", &self.date_of_birth)
            .finish()
    }
}

/// Login request
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Token returned after a successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtResponse {
    pub token: String,
    #[serde(rename = "type")]
    pub token_type: String,
}

impl JwtResponse {
    pub fn bearer(token: String) -> Self {
        Self {
            token,
            token_type: BEARER.to_string(),
        }
    }
}

/// Plain confirmation message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
