//! External system integrations.
//!
//! - [`database`] - the query-execution trait and provider factories
//! - [`postgresql`] - the PostgreSQL connection handle and raw executor
//!
//! # Building providers without a container
//!
//! ```rust,no_run
//! use dbprovider::adapters::database::{provide_connection, provide_raw_executor};
//! use dbprovider::config::AppConfig;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let handle = Arc::new(provide_connection(&AppConfig::default()).await?);
//! let executor = provide_raw_executor(handle)?;
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod postgresql;
