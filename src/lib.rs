// dbprovider - Configuration-driven database providers
// Copyright (c) 2026 dbprovider Contributors
// Licensed under the MIT License

//! # dbprovider
//!
//! Builds a PostgreSQL connection handle from configuration and exposes it
//! through a restricted, raw-statement-only query interface. Both are
//! registered as factories in a dependency [`container::Container`] so other
//! parts of an application can resolve them by type.
//!
//! ## Architecture
//!
//! - [`config`] - TOML configuration with defaults and environment overrides
//! - [`adapters`] - Connection handle, raw executor and the provider factories
//! - [`container`] - Typed dependency container
//! - [`domain`] - Error types and the [`domain::Result`] alias
//! - [`logging`] - Structured logging
//! - [`cli`] - Command-line interface for the `dbprovider` binary
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dbprovider::adapters::database::{register_database_providers, RawStatements};
//! use dbprovider::adapters::postgresql::RawExecutor;
//! use dbprovider::config::load_config;
//! use dbprovider::container::Container;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let container = Container::global();
//!     container.provide_value(load_config("dbprovider.toml")?);
//!     register_database_providers(container);
//!
//!     // Opens the handle (pinging it if `must_connect` is set) and adapts it
//!     let executor = container.resolve::<RawExecutor>().await?;
//!     let rows = executor.query_raw("SELECT 1::INT4", &[]).await?;
//!     println!("{}", rows[0].get::<_, i32>(0));
//!     Ok(())
//! }
//! ```
//!
//! ## Startup connectivity
//!
//! With `must_connect = true` the connection factory pings the server and
//! fails if it does not answer within [`adapters::postgresql::PING_TIMEOUT`].
//! Without it, opening the handle performs no I/O and an unreachable server is
//! only noticed on first use.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod container;
pub mod domain;
pub mod logging;
