//! Utility modules

pub mod error;
pub mod logger;
pub mod time;

pub use error::{AppError, AppResult};
pub use logger::init_logger;
pub use time::now_millis;
