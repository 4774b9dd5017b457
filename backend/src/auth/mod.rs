//! Authentication module
//!
//! Provides bcrypt password hashing and JWT issuance.

mod jwt;
mod password;

pub use jwt::{Claims, JwtService};
pub use password::{PasswordService, MIN_COST};
