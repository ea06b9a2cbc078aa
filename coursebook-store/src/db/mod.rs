//! Database layer - connection pool, schema and stores
//!
//! # Design Principles
//!
//! - Connection pool, cloned into each repository
//! - Uniqueness is a database constraint; violations become `DbError::DuplicateKey`
//! - Student writes and their enrollment replacement share one transaction
//! - `MemoryStore` mirrors the PostgreSQL semantics for tests and demos

pub mod error;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod repos;

pub use error::DbError;
pub use memory::MemoryStore;
pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
