//! Dependency container
//!
//! A small typed registry of async factories. The database providers are
//! registered with [`register_database_providers`](crate::adapters::database::register_database_providers)
//! and resolved by type:
//!
//! ```rust,no_run
//! use dbprovider::adapters::database::{register_database_providers, RawStatements};
//! use dbprovider::adapters::postgresql::RawExecutor;
//! use dbprovider::config::load_config;
//! use dbprovider::container::Container;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let container = Container::global();
//! container.provide_value(load_config("dbprovider.toml")?);
//! register_database_providers(container);
//!
//! let executor = container.resolve::<RawExecutor>().await?;
//! executor.batch_execute_raw("SELECT 1").await?;
//! # Ok(())
//! # }
//! ```

pub mod registry;

pub use registry::Container;
