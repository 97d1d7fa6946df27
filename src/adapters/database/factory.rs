//! Database provider factories
//!
//! The two factories registered into the dependency container: one opens a
//! [`ConnectionHandle`] from configuration, the other adapts a handle into a
//! [`RawExecutor`].

use crate::adapters::postgresql::client::{ConnectionHandle, PING_TIMEOUT};
use crate::adapters::postgresql::raw::RawExecutor;
use crate::config::{AppConfig, DatabaseSettings};
use crate::container::Container;
use crate::domain::{ContainerError, ProviderError, Result};
use crate::log_error_with_context;
use std::sync::Arc;

/// Build a connection handle from configuration
///
/// Uses the `[database]` section, or the defaults when it is absent. If
/// `must_connect` is set the server is pinged with [`PING_TIMEOUT`] before the
/// handle is returned. Failures are logged and returned; nothing is retried.
///
/// # Errors
///
/// Returns an error if the handle cannot be opened or, with `must_connect`,
/// if the ping fails or times out.
pub async fn provide_connection(config: &AppConfig) -> Result<ConnectionHandle> {
    let settings = match config.database {
        Some(ref settings) => settings.clone(),
        None => {
            tracing::debug!("No [database] section configured, using defaults");
            DatabaseSettings::default()
        }
    };

    let handle = ConnectionHandle::open(settings).map_err(|e| {
        log_error_with_context!(&e, "connect to database failed");
        e
    })?;

    tracing::info!(
        url = %handle.redacted_url(),
        max_lifetime_seconds = handle.settings().max_lifetime_seconds,
        max_idle_time_seconds = handle.settings().max_idle_time_seconds,
        "Connect to database"
    );

    if handle.settings().must_connect {
        if let Err(e) = handle.ping(PING_TIMEOUT).await {
            log_error_with_context!(&e, "ping database failed");
            return Err(e);
        }
        tracing::info!("Ping database done");
    }

    Ok(handle)
}

/// Adapt a connection handle into the raw-statement interface
///
/// # Errors
///
/// Returns an error if the handle has been closed.
pub fn provide_raw_executor(handle: Arc<ConnectionHandle>) -> Result<RawExecutor> {
    tracing::debug!("Convert connection handle to raw executor");

    let executor = RawExecutor::new(handle).map_err(|e| {
        log_error_with_context!(&e, "init raw executor failed");
        e
    })?;

    tracing::info!("Raw executor ready");
    Ok(executor)
}

/// Register both database factories into a container
///
/// The connection factory resolves [`AppConfig`] from the container and falls
/// back to the default configuration when none was provided. The adapter
/// factory resolves the [`ConnectionHandle`], so both share one pool.
pub fn register_database_providers(container: &Container) {
    container.provide::<ConnectionHandle, _, _>(|c: Container| async move {
        let config = match c.resolve::<AppConfig>().await {
            Ok(config) => config,
            Err(ProviderError::Container(ContainerError::NotRegistered(_))) => {
                Arc::new(AppConfig::default())
            }
            Err(e) => return Err(e),
        };
        provide_connection(&config).await
    });

    container.provide::<RawExecutor, _, _>(|c: Container| async move {
        let handle = c.resolve::<ConnectionHandle>().await?;
        provide_raw_executor(handle)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DatabaseError;
    use std::time::{Duration, Instant};

    fn config_with(settings: DatabaseSettings) -> AppConfig {
        AppConfig {
            database: Some(settings),
            ..Default::default()
        }
    }

    fn refused(must_connect: bool) -> DatabaseSettings {
        DatabaseSettings {
            port: 1,
            user: "app".to_string(),
            must_connect,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_defaults_when_section_missing() {
        let handle = provide_connection(&AppConfig::default()).await.unwrap();
        assert_eq!(handle.settings().host, "127.0.0.1");
        assert_eq!(handle.settings().port, 5432);
        assert_eq!(handle.settings().service, "postgres");
        assert!(!handle.settings().must_connect);
    }

    #[tokio::test]
    async fn test_unreachable_without_must_connect_succeeds() {
        let handle = provide_connection(&config_with(refused(false))).await;
        assert!(handle.is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_with_must_connect_fails_within_bound() {
        let started = Instant::now();
        let err = provide_connection(&config_with(refused(true))).await.unwrap_err();

        assert!(err.is_connectivity());
        assert!(started.elapsed() < PING_TIMEOUT + Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_open_failure_is_reported() {
        let mut settings = refused(false);
        settings
            .options
            .insert("not_a_real_option".to_string(), "x".to_string());

        let err = provide_connection(&config_with(settings)).await.unwrap_err();
        assert!(matches!(err, ProviderError::Database(DatabaseError::OpenFailed(_))));
    }

    #[tokio::test]
    async fn test_raw_executor_from_open_handle() {
        let handle = Arc::new(provide_connection(&config_with(refused(false))).await.unwrap());
        assert!(provide_raw_executor(handle.clone()).is_ok());

        handle.close();
        assert!(provide_raw_executor(handle).is_err());
    }
}
