//! In-memory customer store
//!
//! Same contract as the PostgreSQL store, with the map's write lock playing
//! the role of the unique constraint. Used by tests and local runs without
//! a database.

use super::customer::{Customer, CustomerStore, NewCustomer, StoreError};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Customer store backed by a map keyed on email
#[derive(Default)]
pub struct InMemoryCustomerStore {
    customers: RwLock<HashMap<String, Customer>>,
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored customers
    pub async fn len(&self) -> usize {
        self.customers.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.customers.read().await.is_empty()
    }
}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self.customers.read().await.contains_key(email))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, StoreError> {
        Ok(self.customers.read().await.get(email).cloned())
    }

    async fn save(&self, customer: NewCustomer) -> Result<Customer, StoreError> {
        let mut customers = self.customers.write().await;
        if customers.contains_key(&customer.email) {
            return Err(StoreError::DuplicateEmail);
        }

        let record = Customer {
            id: Uuid::new_v4(),
            first_name: customer.first_name,
            last_name: customer.last_name,
            email: customer.email,
            phone_number: customer.phone_number,
            password_hash: customer.password_hash,
            date_of_birth: customer.date_of_birth,
            created_at: Utc::now(),
        };
        customers.insert(record.email.clone(), record.clone());

        Ok(record)
    }
}
