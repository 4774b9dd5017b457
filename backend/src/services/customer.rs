//! Customer service for registration and login
//!
//! # Performance Optimizations
//!
//! - Password hashing/verification runs on blocking thread pool
//! - JWT keys are pre-computed once at startup
//!
//! # Timing
//!
//! A login for an unknown email still runs one bcrypt verification, against
//! a digest made at startup with the configured cost, so response time does
//! not reveal whether the email is registered.

use crate::auth::{JwtService, PasswordService};
use crate::error::ApiError;
use crate::repositories::{CustomerStore, NewCustomer};
use anyhow::Result;
use pillpath_shared::types::{JwtResponse, LoginRequest, MessageResponse, RegisterRequest};
use pillpath_shared::validation::normalize_email;
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

/// Confirmation returned by a successful registration
pub const REGISTERED: &str = "Customer registered successfully";

/// Registration and login over a customer store
#[derive(Clone)]
pub struct CustomerService {
    store: Arc<dyn CustomerStore>,
    hasher: PasswordService,
    jwt: JwtService,
    /// Verified against when the email is unknown
    dummy_hash: Arc<str>,
}

impl CustomerService {
    /// Wire the service; hashes the dummy digest once, at `hasher`'s cost
    pub fn new(
        store: Arc<dyn CustomerStore>,
        hasher: PasswordService,
        jwt: JwtService,
    ) -> Result<Self> {
        let dummy_hash = hasher.hash(&uuid::Uuid::new_v4().to_string())?.into();

        Ok(Self {
            store,
            hasher,
            jwt,
            dummy_hash,
        })
    }

    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    /// Register a new customer
    ///
    /// Field validation and the password confirmation check both run before
    /// the store is consulted, so a mismatch is reported the same way
    /// whether or not the email is taken. The store is written at most once.
    pub async fn register(&self, request: RegisterRequest) -> Result<MessageResponse, ApiError> {
        request.validate()?;

        if !request.passwords_match() {
            return Err(ApiError::PasswordMismatch);
        }

        let email = normalize_email(&request.email);

        if self.store.exists_by_email(&email).await? {
            warn!(email = %email, "Registration rejected: email already registered");
            return Err(ApiError::DuplicateEmail);
        }

        // Hash password on blocking thread pool (CPU-intensive)
        let password_hash = self.hasher.hash_async(request.password).await?;

        // A racing registration that passed the check above loses here
        let customer = self
            .store
            .save(NewCustomer {
                first_name: request.first_name.trim().to_string(),
                last_name: request.last_name.trim().to_string(),
                email,
                phone_number: request.phone_number.trim().to_string(),
                password_hash,
                date_of_birth: request.date_of_birth,
            })
            .await?;

        info!(customer_id = %customer.id, email = %customer.email, "Customer registered");

        Ok(MessageResponse::new(REGISTERED))
    }

    /// Login with email and password
    ///
    /// Unknown email and wrong password produce the same error.
    pub async fn login(&self, request: LoginRequest) -> Result<JwtResponse, ApiError> {
        let email = normalize_email(&request.email);

        let Some(customer) = self.store.find_by_email(&email).await? else {
            // Spend the same bcrypt work as a wrong password would
            PasswordService::verify_async(request.password, self.dummy_hash.to_string()).await?;
            info!(email = %email, "Login failed");
            return Err(ApiError::InvalidCredentials);
        };

        // Verify password on blocking thread pool (CPU-intensive)
        let valid = PasswordService::verify_async(request.password, customer.password_hash)
            .await?;

        if !valid {
            info!(email = %email, "Login failed");
            return Err(ApiError::InvalidCredentials);
        }

        let token = self.jwt.issue(&customer.email)?;
        info!(customer_id = %customer.id, "Customer logged in");

        Ok(JwtResponse::bearer(token))
    }
}
