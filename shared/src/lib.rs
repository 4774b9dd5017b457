//! PillPath Shared Library
//!
//! Wire types and input validation shared between the backend and any
//! client that talks to the customer auth API.

pub mod types;
pub mod validation;

// Re-export commonly used items
pub use types::*;
