//! Customer credential store
//!
//! The store is the only place that enforces email uniqueness. Callers may
//! pre-check with `exists_by_email`, but a concurrent registration that slips
//! past the check is still rejected by `save` with `StoreError::DuplicateEmail`.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

/// Customer record from the store
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Customer {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub password_hash: String,
    pub date_of_birth: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a customer; the store assigns id and timestamp
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub password_hash: String,
    pub date_of_birth: NaiveDate,
}

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Email is already registered")]
    DuplicateEmail,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence abstraction over the customer table
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Check if a customer with this email exists
    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError>;

    /// Find customer by email
    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, StoreError>;

    /// Persist a new customer
    async fn save(&self, customer: NewCustomer) -> Result<Customer, StoreError>;
}

/// PostgreSQL-backed customer store
#[derive(Clone)]
pub struct PgCustomerStore {
    pool: PgPool,
}

impl PgCustomerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerStore for PgCustomerStore {
    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM customers WHERE email = $1)
            "#,
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, StoreError> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, first_name, last_name, email, phone_number,
                   password_hash, date_of_birth, created_at
            FROM customers
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    async fn save(&self, customer: NewCustomer) -> Result<Customer, StoreError> {
        sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers
                (first_name, last_name, email, phone_number, password_hash, date_of_birth)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, first_name, last_name, email, phone_number,
                      password_hash, date_of_birth, created_at
            "#,
        )
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.email)
        .bind(&customer.phone_number)
        .bind(&customer.password_hash)
        .bind(customer.date_of_birth)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                StoreError::DuplicateEmail
            }
            other => StoreError::Database(other),
        })
    }
}
