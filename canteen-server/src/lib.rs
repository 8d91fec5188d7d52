//! Canteen Server - campus canteen ordering backend
//!
//! # Architecture overview
//!
//! - **HTTP API** (`api`): REST endpoints plus the order push WebSocket
//! - **Database** (`db`): embedded SurrealDB storage with typed repositories
//! - **Pricing** (`pricing`): coupon discount calculator
//! - **Notify** (`notify`): per-user WebSocket connection registry
//!
//! # Module structure
//!
//! ```text
//! canteen-server/src/
//! ├── core/          # Config, state, server
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # Models, schema, repositories
//! ├── notify/        # Order push fan-out
//! ├── pricing/       # Discount calculation
//! └── utils/         # Errors, logging, time
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod notify;
pub mod pricing;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, Server, ServerState};
pub use notify::{OrderNotifier, WsEvent};
pub use pricing::{Discount, compute_discount};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::init_logger;

pub fn print_banner() {
    println!(
        r#"
   ______            __
  / ____/___ _____  / /____  ___  ____
 / /   / __ `/ __ \/ __/ _ \/ _ \/ __ \
/ /___/ /_/ / / / / /_/  __/  __/ / / /
\____/\__,_/_/ /_/\__/\___/\___/_/ /_/
    "#
    );
}
