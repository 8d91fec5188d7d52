use std::path::PathBuf;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::notify::OrderNotifier;
use crate::utils::{AppError, AppResult};

/// Server state - shared handles for every request
///
/// Cloning is shallow; the database handle and the notifier are both
/// internally reference-counted.
///
/// | Field | Type | Purpose |
/// |-------|------|---------|
/// | config | Config | Configuration (immutable) |
/// | db | Surreal<Db> | Embedded database |
/// | notifier | OrderNotifier | WebSocket push registry |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
    /// WebSocket push registry
    pub notifier: OrderNotifier,
}

impl ServerState {
    /// Initialize server state
    ///
    /// Creates the data directory, opens the database at
    /// `data_dir/canteen.db` and applies the schema.
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let data_dir = PathBuf::from(&config.data_dir);
        std::fs::create_dir_all(&data_dir)
            .map_err(|e| AppError::internal(format!("Failed to create data directory: {}", e)))?;

        let db_path = data_dir.join("canteen.db");
        let db = crate::db::connect(&db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {}", e)))?;

        Ok(Self {
            config: config.clone(),
            db,
            notifier: OrderNotifier::new(),
        })
    }

    /// Database handle
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }
}
