//! Database repositories
//!
//! Provides the customer credential store and its implementations.

pub mod customer;
pub mod memory;

pub use customer::{Customer, CustomerStore, NewCustomer, PgCustomerStore, StoreError};
pub use memory::InMemoryCustomerStore;
