//! Logging and observability
//!
//! Structured logging through `tracing`, with console output and optional
//! rotating JSON log files.
//!
//! # Example
//!
//! ```no_run
//! use dbprovider::logging::init_logging;
//! use dbprovider::config::LoggingConfig;
//!
//! let _guard = init_logging("info", &LoggingConfig::default()).expect("Failed to initialize logging");
//! tracing::info!(host = "db.internal", "Connect to database");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use dbprovider::log_error_with_context;
/// use dbprovider::domain::DatabaseError;
///
/// let error = DatabaseError::PingTimeout { timeout_ms: 2000 };
/// log_error_with_context!(&error, "ping database failed");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

#[cfg(test)]
mod tests {
    use crate::domain::DatabaseError;

    #[test]
    fn test_log_error_with_context_without_subscriber() {
        let error = DatabaseError::PoolClosed;
        log_error_with_context!(&error, "handle closed");
    }
}
