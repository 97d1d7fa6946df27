//! PostgreSQL connection handle
//!
//! A [`ConnectionHandle`] owns a lazily connecting `deadpool-postgres` pool
//! built from [`DatabaseSettings`]. Opening the handle never touches the
//! network; the first checkout (or an explicit [`ConnectionHandle::ping`])
//! does.

use crate::config::DatabaseSettings;
use crate::domain::{DatabaseError, Result};
use deadpool_postgres::{
    Hook, HookError, Manager, ManagerConfig, Object, Pool, PoolError, RecyclingMethod, Runtime,
};
use std::time::Duration;
use tokio_postgres::NoTls;

/// Upper bound for the startup connectivity check
pub const PING_TIMEOUT: Duration = Duration::from_secs(2);

/// Open handle to a PostgreSQL server
///
/// Cloning the underlying pool is cheap; share the handle itself through an
/// `Arc` so every consumer sees the same pool.
pub struct ConnectionHandle {
    /// Connection pool
    pool: Pool,

    /// Settings snapshot the handle was opened with
    settings: DatabaseSettings,

    /// Connection URL with the password masked
    redacted_url: String,
}

impl std::fmt::Debug for ConnectionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionHandle")
            .field("url", &self.redacted_url)
            .field("status", &self.pool.status())
            .finish()
    }
}

impl ConnectionHandle {
    /// Open a handle from settings
    ///
    /// Builds the connection URL, parses it into a driver configuration and
    /// creates the pool. Pooled connections past `max_lifetime_seconds` or idle
    /// longer than `max_idle_time_seconds` are discarded instead of reused.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::OpenFailed`] when the URL is rejected by the
    /// driver or the pool cannot be built.
    pub fn open(settings: DatabaseSettings) -> Result<Self> {
        let url = settings.connection_url()?;
        let redacted_url = settings.redacted_url()?;

        let pg_config: tokio_postgres::Config = url.as_str().parse().map_err(|e| {
            DatabaseError::OpenFailed(format!("invalid connection string {redacted_url}: {e}"))
        })?;

        let manager = Manager::from_config(
            pg_config,
            NoTls,
            ManagerConfig {
                recycling_method: RecyclingMethod::Fast,
            },
        );

        let max_idle = settings.max_idle_time();
        let max_lifetime = settings.max_lifetime();

        let pool = Pool::builder(manager)
            .max_size(settings.max_connections)
            .runtime(Runtime::Tokio1)
            .pre_recycle(Hook::sync_fn(move |_, metrics| {
                match expiry_reason(metrics.age(), metrics.last_used(), max_idle, max_lifetime) {
                    Some(reason) => Err(HookError::Message(reason.into())),
                    None => Ok(()),
                }
            }))
            .build()
            .map_err(|e| {
                DatabaseError::OpenFailed(format!("failed to create connection pool: {e}"))
            })?;

        Ok(Self {
            pool,
            settings,
            redacted_url,
        })
    }

    /// Verify the server answers within `timeout`
    ///
    /// Checks out a connection and runs `SELECT 1`. The pending connect is
    /// dropped when the timeout elapses.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::PingTimeout`] when the deadline passes and
    /// [`DatabaseError::PingFailed`] when the driver reports an error.
    pub async fn ping(&self, timeout: Duration) -> Result<()> {
        match tokio::time::timeout(timeout, self.ping_once()).await {
            Ok(result) => result,
            Err(_) => Err(DatabaseError::PingTimeout {
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            }
            .into()),
        }
    }

    async fn ping_once(&self) -> Result<()> {
        let client = self
            .pool
            .get()
            .await
            .map_err(|e| DatabaseError::PingFailed(e.to_string()))?;

        client
            .simple_query("SELECT 1")
            .await
            .map_err(|e| DatabaseError::PingFailed(e.to_string()))?;

        Ok(())
    }

    /// Check out a pooled connection
    pub(crate) async fn checkout(&self) -> Result<Object> {
        self.pool.get().await.map_err(|e| match e {
            PoolError::Closed => DatabaseError::PoolClosed.into(),
            other => {
                DatabaseError::QueryFailed(format!("failed to get connection from pool: {other}"))
                    .into()
            }
        })
    }

    /// Settings the handle was opened with
    pub fn settings(&self) -> &DatabaseSettings {
        &self.settings
    }

    /// Connection URL safe for logs
    pub fn redacted_url(&self) -> &str {
        &self.redacted_url
    }

    /// Pool statistics
    pub fn status(&self) -> deadpool_postgres::Status {
        self.pool.status()
    }

    /// Close the handle; subsequent checkouts fail
    pub fn close(&self) {
        self.pool.close();
    }

    /// Whether [`ConnectionHandle::close`] has been called
    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}

/// Why a pooled connection must not be reused, if it must not
///
/// Called from the pool's `pre_recycle` hook. The hook only runs when an
/// established connection is handed back out, so covering the wiring itself
/// needs a live server; the unit tests cover this decision.
fn expiry_reason(
    age: Duration,
    idle: Duration,
    max_idle: Option<Duration>,
    max_lifetime: Option<Duration>,
) -> Option<&'static str> {
    if max_lifetime.is_some_and(|limit| age > limit) {
        return Some("connection exceeded max lifetime");
    }
    if max_idle.is_some_and(|limit| idle > limit) {
        return Some("connection exceeded max idle time");
    }
    None
}
