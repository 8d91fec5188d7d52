//! Logging initialization
//!
//! Console logging by default; when a log directory is provided the
//! output goes to a daily rolling file instead (used in production so
//! the console stays clean).

use tracing_subscriber::EnvFilter;

/// Initialize global logger
///
/// `level` is the default filter when `RUST_LOG` is not set.
/// `log_dir` switches output from console to a daily rolling file.
pub fn init_logger(level: &str, log_dir: Option<&str>) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    match log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "canteen-server");

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file_appender)
                .with_ansi(false)
                .with_file(false)
                .with_line_number(false)
                .with_thread_ids(false)
                .with_target(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_file(false)
                .with_line_number(false)
                .with_thread_ids(false)
                .with_target(false)
                .init();
        }
    }
}
