//! Time utilities
//!
//! All timestamps in the system are i64 epoch milliseconds (UTC).
//! Handlers stamp requests with [`now_millis`] and pass the value down;
//! repositories never read the clock themselves.

/// Current UTC time as epoch milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
