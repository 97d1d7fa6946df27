//! Integration tests for the database providers
//!
//! No PostgreSQL server is needed: the tests target a refused port or a
//! listener that accepts TCP connections but never answers the handshake.

use dbprovider::adapters::database::{
    provide_connection, register_database_providers, RawStatements,
};
use dbprovider::adapters::postgresql::{ConnectionHandle, RawExecutor, PING_TIMEOUT};
use dbprovider::config::{AppConfig, DatabaseSettings};
use dbprovider::container::Container;
use dbprovider::domain::{ContainerError, DatabaseError, ProviderError};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;

fn config_for(port: u16, must_connect: bool) -> AppConfig {
    AppConfig {
        database: Some(DatabaseSettings {
            host: "127.0.0.1".to_string(),
            port,
            user: "app".to_string(),
            must_connect,
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Listener that completes TCP handshakes but never reads or writes
async fn silent_listener() -> (TcpListener, u16) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    (listener, port)
}

#[tokio::test]
async fn test_must_connect_times_out_against_silent_server() {
    let (_listener, port) = silent_listener().await;

    let started = Instant::now();
    let err = provide_connection(&config_for(port, true))
        .await
        .unwrap_err();
    let elapsed = started.elapsed();

    assert!(
        matches!(err, ProviderError::Database(DatabaseError::PingTimeout { timeout_ms: 2000 })),
        "unexpected error: {err}"
    );
    assert!(elapsed >= PING_TIMEOUT);
    assert!(elapsed < PING_TIMEOUT + Duration::from_secs(2));
}

#[tokio::test]
async fn test_without_must_connect_silent_server_is_not_contacted() {
    let (_listener, port) = silent_listener().await;

    let started = Instant::now();
    let handle = provide_connection(&config_for(port, false)).await.unwrap();

    assert!(started.elapsed() < Duration::from_millis(500));
    assert_eq!(handle.status().size, 0);
}

#[tokio::test]
async fn test_container_builds_shared_handle_and_executor() {
    let container = Container::new();
    container.provide_value(config_for(1, false));
    register_database_providers(&container);

    let executor = container.resolve::<RawExecutor>().await.unwrap();
    let handle = container.resolve::<ConnectionHandle>().await.unwrap();
    let again = container.resolve::<ConnectionHandle>().await.unwrap();

    assert!(Arc::ptr_eq(&handle, &again));
    assert_eq!(handle.settings().port, 1);

    // The server is unreachable, so the first real statement fails
    let err = executor.execute_raw("SELECT 1", &[]).await.unwrap_err();
    assert!(matches!(err, ProviderError::Database(DatabaseError::QueryFailed(_))));
}

#[tokio::test]
async fn test_container_without_config_uses_defaults() {
    let container = Container::new();
    register_database_providers(&container);

    let handle = container.resolve::<ConnectionHandle>().await.unwrap();
    assert_eq!(handle.settings().host, "127.0.0.1");
    assert_eq!(handle.settings().port, 5432);
    assert_eq!(handle.settings().service, "postgres");
}

#[tokio::test]
async fn test_container_must_connect_failure_propagates() {
    let container = Container::new();
    container.provide_value(config_for(1, true));
    register_database_providers(&container);

    let err = container.resolve::<RawExecutor>().await.unwrap_err();
    assert!(err.is_connectivity(), "unexpected error: {err}");
    assert!(matches!(
        err,
        ProviderError::Container(ContainerError::ConstructionFailed { .. })
    ));
    assert!(err.to_string().contains("ConnectionHandle"));
}

#[tokio::test]
async fn test_executor_unavailable_after_handle_closed() {
    let container = Container::new();
    container.provide_value(config_for(1, false));
    register_database_providers(&container);

    let handle = container.resolve::<ConnectionHandle>().await.unwrap();
    handle.close();

    let err = container.resolve::<RawExecutor>().await.unwrap_err();
    assert!(!err.is_connectivity());
    assert!(err.to_string().contains("closed"));
}
