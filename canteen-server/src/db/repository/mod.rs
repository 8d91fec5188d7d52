//! Repository Module
//!
//! Provides CRUD operations for the SurrealDB tables.

// Offers
pub mod offer;

// Orders
pub mod order;

// Menu
pub mod food_item;

// Re-exports
pub use food_item::FoodItemRepository;
pub use offer::OfferRepository;
pub use order::OrderRepository;

use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: "table:id" strings at the API boundary
// =============================================================================
//
// surrealdb::RecordId handles all ids:
//   - parse: let id: RecordId = "food_order:abc".parse()?;
//   - build: let id = RecordId::from_table_key("food_order", "abc");
//   - CRUD: db.select(id) / db.delete(id) take a RecordId directly

/// Build a RecordId from an id that may or may not carry the table prefix
pub fn record_key(table: &str, id: &str) -> RecordId {
    match id.parse::<RecordId>() {
        Ok(rid) if rid.table() == table => rid,
        _ => RecordId::from_table_key(table, id),
    }
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
