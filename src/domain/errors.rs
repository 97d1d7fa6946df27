//! Domain error types
//!
//! This module defines the error hierarchy for dbprovider.
//! Driver and pool errors are flattened into messages so callers never
//! depend on third-party error types.

use thiserror::Error;

/// Main dbprovider error type
///
/// This is the primary error type used throughout the crate.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Database connection and statement errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Dependency container errors
    #[error("Container error: {0}")]
    Container(#[from] ContainerError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl ProviderError {
    /// Whether the error was raised while reaching the database server
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            ProviderError::Database(
                DatabaseError::OpenFailed(_)
                    | DatabaseError::PingFailed(_)
                    | DatabaseError::PingTimeout { .. }
            )
        ) || matches!(
            self,
            ProviderError::Container(ContainerError::ConstructionFailed { source, .. })
                if source.is_connectivity()
        )
    }
}

/// Database-specific errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The connection handle could not be opened
    #[error("Failed to open connection: {0}")]
    OpenFailed(String),

    /// The startup ping returned an error
    #[error("Ping failed: {0}")]
    PingFailed(String),

    /// The startup ping did not complete in time
    #[error("Ping timed out after {timeout_ms}ms")]
    PingTimeout { timeout_ms: u64 },

    /// The connection handle has been closed
    #[error("Connection handle is closed")]
    PoolClosed,

    /// A raw statement failed
    #[error("Statement failed: {0}")]
    QueryFailed(String),

    /// A raw statement was empty
    #[error("Statement is empty")]
    EmptyStatement,
}

/// Dependency container errors
#[derive(Debug, Error)]
pub enum ContainerError {
    /// No provider was registered for the requested type
    #[error("No provider registered for {0}")]
    NotRegistered(&'static str),

    /// A provider produced a value of the wrong type
    #[error("Provider for {0} produced a value of another type")]
    TypeMismatch(&'static str),

    /// A provider returned an error
    #[error("Failed to construct {type_name}: {source}")]
    ConstructionFailed {
        type_name: &'static str,
        source: Box<ProviderError>,
    },
}

// Conversion from std::io::Error
impl From<std::io::Error> for ProviderError {
    fn from(err: std::io::Error) -> Self {
        ProviderError::Io(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ProviderError {
    fn from(err: toml::de::Error) -> Self {
        ProviderError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_display() {
        let err = ProviderError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_database_error_conversion() {
        let db_err = DatabaseError::PingTimeout { timeout_ms: 2000 };
        let err: ProviderError = db_err.into();
        assert!(matches!(err, ProviderError::Database(_)));
        assert_eq!(err.to_string(), "Database error: Ping timed out after 2000ms");
    }

    #[test]
    fn test_container_error_conversion() {
        let err: ProviderError = ContainerError::NotRegistered("u32").into();
        assert!(matches!(err, ProviderError::Container(_)));
        assert!(err.to_string().contains("u32"));
    }

    #[test]
    fn test_is_connectivity() {
        let open: ProviderError = DatabaseError::OpenFailed("refused".to_string()).into();
        assert!(open.is_connectivity());

        let nested: ProviderError = ContainerError::ConstructionFailed {
            type_name: "ConnectionHandle",
            source: Box::new(DatabaseError::PingFailed("refused".to_string()).into()),
        }
        .into();
        assert!(nested.is_connectivity());

        let empty: ProviderError = DatabaseError::EmptyStatement.into();
        assert!(!empty.is_connectivity());
        assert!(!ProviderError::Configuration("bad".to_string()).is_connectivity());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: ProviderError = io_err.into();
        assert!(matches!(err, ProviderError::Io(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: ProviderError = toml_err.into();
        assert!(matches!(err, ProviderError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_provider_error_implements_std_error() {
        let err = ProviderError::Other("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
