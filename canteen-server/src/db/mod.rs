//! Database Module
//!
//! Handles the embedded SurrealDB (RocksDB) connection and schema.
//! The schema is applied on every connect; all statements are
//! IF NOT EXISTS so reconnecting is a no-op.

pub mod models;
pub mod repository;

use std::path::Path;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

const NAMESPACE: &str = "canteen";
const DATABASE: &str = "canteen";

/// Table definitions
///
/// Tables are SCHEMAFULL. Names avoid SurrealQL keywords, which is why
/// orders live in `food_order`. Field names match the wire format
/// (camelCase) so records serialize straight into API responses.
const SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS offer SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS code ON offer TYPE string;
DEFINE FIELD IF NOT EXISTS description ON offer TYPE string;
DEFINE FIELD IF NOT EXISTS discountType ON offer TYPE string ASSERT $value INSIDE ["percentage", "flat"];
DEFINE FIELD IF NOT EXISTS discountValue ON offer TYPE int;
DEFINE FIELD IF NOT EXISTS minOrderValue ON offer TYPE int DEFAULT 0;
DEFINE FIELD IF NOT EXISTS startDate ON offer TYPE int;
DEFINE FIELD IF NOT EXISTS endDate ON offer TYPE int;
DEFINE FIELD IF NOT EXISTS active ON offer TYPE bool DEFAULT true;
DEFINE FIELD IF NOT EXISTS maxUses ON offer TYPE int DEFAULT 0;
DEFINE FIELD IF NOT EXISTS uses ON offer TYPE int DEFAULT 0;
DEFINE FIELD IF NOT EXISTS createdAt ON offer TYPE int;
DEFINE INDEX IF NOT EXISTS uniq_offer_code ON offer FIELDS code UNIQUE;

DEFINE TABLE IF NOT EXISTS offer_usage SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS offer ON offer_usage TYPE record<offer>;
DEFINE FIELD IF NOT EXISTS userId ON offer_usage TYPE string;
DEFINE FIELD IF NOT EXISTS orderId ON offer_usage TYPE string;
DEFINE FIELD IF NOT EXISTS usedAt ON offer_usage TYPE int;
DEFINE INDEX IF NOT EXISTS uniq_offer_usage_order ON offer_usage FIELDS offer, orderId UNIQUE;

DEFINE TABLE IF NOT EXISTS food_order SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS userId ON food_order TYPE string;
DEFINE FIELD IF NOT EXISTS items ON food_order TYPE array;
DEFINE FIELD IF NOT EXISTS items.* ON food_order FLEXIBLE TYPE object;
DEFINE FIELD IF NOT EXISTS totalAmount ON food_order TYPE int;
DEFINE FIELD IF NOT EXISTS status ON food_order TYPE string ASSERT $value INSIDE ["pending", "preparing", "ready", "completed"];
DEFINE FIELD IF NOT EXISTS payment ON food_order FLEXIBLE TYPE option<object>;
DEFINE FIELD IF NOT EXISTS estimatedReadyTime ON food_order TYPE option<int>;
DEFINE FIELD IF NOT EXISTS createdAt ON food_order TYPE int;
DEFINE INDEX IF NOT EXISTS idx_food_order_user ON food_order FIELDS userId;

DEFINE TABLE IF NOT EXISTS food_item SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS name ON food_item TYPE string;
DEFINE FIELD IF NOT EXISTS description ON food_item TYPE string DEFAULT "";
DEFINE FIELD IF NOT EXISTS price ON food_item TYPE int;
DEFINE FIELD IF NOT EXISTS category ON food_item TYPE string;
DEFINE FIELD IF NOT EXISTS image ON food_item TYPE option<string>;
DEFINE FIELD IF NOT EXISTS isPopular ON food_item TYPE bool DEFAULT false;
DEFINE FIELD IF NOT EXISTS isHealthy ON food_item TYPE bool DEFAULT false;
DEFINE FIELD IF NOT EXISTS calories ON food_item TYPE option<int>;
DEFINE FIELD IF NOT EXISTS protein ON food_item TYPE option<int>;
DEFINE FIELD IF NOT EXISTS carbs ON food_item TYPE option<int>;
DEFINE FIELD IF NOT EXISTS fats ON food_item TYPE option<int>;
DEFINE FIELD IF NOT EXISTS rating ON food_item TYPE int DEFAULT 45;
DEFINE FIELD IF NOT EXISTS available ON food_item TYPE bool DEFAULT true;
DEFINE FIELD IF NOT EXISTS createdAt ON food_item TYPE int;
"#;

/// Open the embedded database at `path` and apply the schema
pub async fn connect(path: &Path) -> Result<Surreal<Db>, surrealdb::Error> {
    let db = Surreal::new::<RocksDb>(path).await?;
    db.use_ns(NAMESPACE).use_db(DATABASE).await?;

    apply_schema(&db).await?;
    tracing::info!("Database connection established (embedded RocksDB)");

    Ok(db)
}

/// Apply table and index definitions (idempotent)
pub async fn apply_schema(db: &Surreal<Db>) -> Result<(), surrealdb::Error> {
    db.query(SCHEMA).await?.check()?;
    Ok(())
}
