//! Password hashing using bcrypt
//!
//! Provides salted hashing and verification. The digest embeds its own
//! salt and cost, so verification needs nothing but the stored string.
//!
//! # Performance Considerations
//!
//! bcrypt only reads the first 72 bytes of a password. Longer inputs are
//! refused here so two passwords sharing a 72-byte prefix never verify
//! against each other.
//!
//! bcrypt is intentionally CPU-intensive. Request handlers go through the
//! `_async` variants, which run on the blocking thread pool.

use anyhow::Result;
use pillpath_shared::validation::MAX_PASSWORD_BYTES;

/// Lowest cost bcrypt accepts
pub const MIN_COST: u32 = 4;

/// Password hashing service
#[derive(Debug, Clone, Copy)]
pub struct PasswordService {
    cost: u32,
}

impl PasswordService {
    /// Create a hasher with the given bcrypt cost (4..=31)
    pub fn new(cost: u32) -> Result<Self> {
        if !(MIN_COST..=31).contains(&cost) {
            anyhow::bail!("bcrypt cost must be between {} and 31, got {}", MIN_COST, cost);
        }
        Ok(Self { cost })
    }

    /// Hash a password (blocking operation)
    pub fn hash(&self, password: &str) -> Result<String> {
        if password.len() > MAX_PASSWORD_BYTES {
            anyhow::bail!("Password exceeds {} bytes", MAX_PASSWORD_BYTES);
        }
        bcrypt::hash(password, self.cost)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))
    }

    /// Hash a password asynchronously (non-blocking)
    ///
    /// Spawns the CPU-intensive work on a blocking thread pool,
    /// preventing it from blocking the async runtime.
    pub async fn hash_async(&self, password: String) -> Result<String> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Verify a password against a digest (blocking operation)
    ///
    /// A digest that is not valid bcrypt is an error, not a mismatch.
    /// A password over the byte limit never matches.
    pub fn verify(password: &str, hash: &str) -> Result<bool> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Ok(false);
        }
        bcrypt::verify(password, hash).map_err(|e| anyhow::anyhow!("Invalid hash format: {}", e))
    }

    /// Verify a password asynchronously (non-blocking)
    pub async fn verify_async(password: String, hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &hash))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast() -> PasswordService {
        PasswordService::new(MIN_COST).unwrap()
    }

    #[test]
    fn test_hash_and_verify() {
        let password = "secure_password_123";
        let hash = fast().hash(password).unwrap();

        assert_ne!(hash, password);
        assert!(PasswordService::verify(password, &hash).unwrap());
        assert!(!PasswordService::verify("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_different_hashes_for_same_password() {
        let password = "test_password";
        let hash1 = fast().hash(password).unwrap();
        let hash2 = fast().hash(password).unwrap();

        // Hashes should be different due to random salt
        assert_ne!(hash1, hash2);

        // But both should verify correctly
        assert!(PasswordService::verify(password, &hash1).unwrap());
        assert!(PasswordService::verify(password, &hash2).unwrap());
    }

    #[test]
    fn test_digest_records_cost() {
        let hash = fast().hash("p1").unwrap();
        assert!(hash.starts_with("$2b$04$"));
    }

    #[test]
    fn test_cost_out_of_range_rejected() {
        assert!(PasswordService::new(3).is_err());
        assert!(PasswordService::new(32).is_err());
        assert!(PasswordService::new(bcrypt::DEFAULT_COST).is_ok());
    }

    #[test]
    fn test_long_password_not_truncated() {
        let stored = "A".repeat(MAX_PASSWORD_BYTES);
        let hash = fast().hash(&stored).unwrap();

        assert!(PasswordService::verify(&stored, &hash).unwrap());
        // Same 72-byte prefix, different tail
        assert!(!PasswordService::verify(&format!("{}WRONG", stored), &hash).unwrap());
        assert!(fast().hash(&format!("{}correct", stored)).is_err());
    }

    #[test]
    fn test_garbage_digest_is_error() {
        assert!(PasswordService::verify("p1", "not-a-bcrypt-hash").is_err());
    }

    #[tokio::test]
    async fn test_async_hash_and_verify() {
        let password = "async_test_password".to_string();
        let hash = fast().hash_async(password.clone()).await.unwrap();

        assert!(PasswordService::verify_async(password.clone(), hash.clone())
            .await
            .unwrap());
        assert!(!PasswordService::verify_async("wrong".to_string(), hash)
            .await
            .unwrap());
    }
}
