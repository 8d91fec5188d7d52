/// Server configuration
///
/// # Environment variables
///
/// Every entry can be overridden through the environment:
///
/// | Variable | Default | Purpose |
/// |----------|---------|---------|
/// | SERVER_HOST | 0.0.0.0 | Bind address |
/// | SERVER_PORT | 5000 | HTTP port |
/// | DATA_DIR | ./data | Database directory |
/// | LOG_DIR | ./logs | Log directory |
/// | LOG_LEVEL | info | Default tracing filter |
///
/// # Example
///
/// ```ignore
/// DATA_DIR=/var/lib/canteen SERVER_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address for the HTTP server
    pub host: String,
    /// HTTP API port
    pub port: u16,
    /// Directory holding the embedded database
    pub data_dir: String,
    /// Directory for rolling log files
    pub log_dir: String,
    /// Default tracing filter when RUST_LOG is unset
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to defaults
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "./data".into()),
            log_dir: std::env::var("LOG_DIR").unwrap_or_else(|_| "./logs".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
        }
    }

    /// Override data directory and port, keeping the rest from the environment
    ///
    /// Used by tests
    pub fn with_overrides(data_dir: impl Into<String>, port: u16) -> Self {
        let mut config = Self::from_env();
        config.data_dir = data_dir.into();
        config.port = port;
        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
