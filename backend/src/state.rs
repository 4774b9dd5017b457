//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction. Everything in it
//! is built once at startup from `AppConfig` and is read-only afterwards.

use crate::auth::{JwtService, PasswordService};
use crate::config::AppConfig;
use crate::repositories::{CustomerStore, PgCustomerStore};
use crate::services::CustomerService;
use anyhow::Result;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state
///
/// All fields are cheap to clone (`Arc` or already reference counted).
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Registration and login
    pub customers: CustomerService,
}

impl AppState {
    /// Wire the service graph around the given store
    ///
    /// # Note
    /// This pre-computes JWT keys from the config secret and should only
    /// be called once at application startup.
    pub fn new(store: Arc<dyn CustomerStore>, config: AppConfig) -> Result<Self> {
        let hasher = PasswordService::new(config.password.bcrypt_cost)?;
        let jwt = JwtService::new(config.jwt.secret.expose_secret(), config.jwt.expiry_secs);

        Ok(Self {
            customers: CustomerService::new(store, hasher, jwt)?,
            config: Arc::new(config),
        })
    }

    /// State backed by the PostgreSQL customer store
    pub fn with_postgres(db: PgPool, config: AppConfig) -> Result<Self> {
        Self::new(Arc::new(PgCustomerStore::new(db)), config)
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the customer service
    #[inline]
    pub fn customers(&self) -> &CustomerService {
        &self.customers
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::auth::MIN_COST;
    use crate::config::{AppConfig, DatabaseConfig, JwtConfig, PasswordConfig, ServerConfig};
    use secrecy::SecretString;

    /// Configuration with a fixed secret and the cheapest bcrypt cost
    pub fn test_config() -> AppConfig {
        AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                host: "localhost".to_string(),
                port: 5432,
                name: "pillpath_test".to_string(),
                username: "test".to_string(),
                password: SecretString::new("test".to_string()),
                max_connections: 1,
            },
            jwt: JwtConfig {
                secret: SecretString::new("test-secret-key-for-testing-only-32chars".to_string()),
                expiry_secs: 3600,
            },
            password: PasswordConfig {
                bcrypt_cost: MIN_COST,
            },
        }
    }
}
