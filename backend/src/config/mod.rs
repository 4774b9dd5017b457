//! Configuration management for the PillPath backend
//!
//! Configuration is loaded hierarchically:
//! 1. Default values for every non-secret key (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: PILLPATH__)
//! 4. `DB_USERNAME`, `DB_PASSWORD` and `JWT_SECRET`, usually from `.env`
//!
//! Database credentials and the JWT secret have no defaults, so loading
//! fails when they are absent and the server refuses to start.

use anyhow::Result;
use config::{builder::DefaultState, ConfigBuilder};
use secrecy::SecretString;
use secrecy::ExposeSecret;
use serde::Deserialize;
use std::env;

/// Longest token lifetime accepted (one year)
pub const MAX_JWT_EXPIRY_SECS: i64 = 365 * 24 * 60 * 60;

/// Shortest JWT secret accepted in production
pub const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub username: String,
    pub password: SecretString,
    pub max_connections: u32,
}

/// JWT configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: SecretString,
    pub expiry_secs: i64,
}

/// Password hashing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PasswordConfig {
    pub bcrypt_cost: u32,
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with PILLPATH__ prefix
    /// 4. DB_USERNAME / DB_PASSWORD / JWT_SECRET
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = Self::defaults()?
            // Load from environment-specific config file
            .add_source(config::File::with_name(&config_file).required(false))
            // e.g., PILLPATH__SERVER__PORT=9000 sets server.port
            .add_source(config::Environment::with_prefix("PILLPATH").separator("__"))
            .set_override_option("database.username", env::var("DB_USERNAME").ok())?
            .set_override_option("database.password", env::var("DB_PASSWORD").ok())?
            .set_override_option("jwt.secret", env::var("JWT_SECRET").ok())?
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate(Self::is_production())?;
        Ok(config)
    }

    /// Reject values that would only fail later, at request time
    pub fn validate(&self, production: bool) -> Result<()> {
        if !(1..=MAX_JWT_EXPIRY_SECS).contains(&self.jwt.expiry_secs) {
            anyhow::bail!(
                "jwt.expiry_secs must be between 1 and {}, got {}",
                MAX_JWT_EXPIRY_SECS,
                self.jwt.expiry_secs
            );
        }

        if production && self.jwt.secret.expose_secret().len() < MIN_PRODUCTION_SECRET_LEN {
            anyhow::bail!(
                "JWT secret must be at least {} characters in production",
                MIN_PRODUCTION_SECRET_LEN
            );
        }

        Ok(())
    }

    /// Builder seeded with defaults for every key that is safe to default
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("database.host", "localhost")?
            .set_default("database.port", 5432)?
            .set_default("database.name", "pillpath")?
            .set_default("database.max_connections", 10)?
            .set_default("jwt.expiry_secs", 86_400)? // 24 hours
            .set_default("password.bcrypt_cost", i64::from(bcrypt::DEFAULT_COST))?)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}
