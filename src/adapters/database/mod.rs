//! Database abstraction layer
//!
//! The restricted query interface ([`RawStatements`]) and the factories that
//! build and register the database providers.

pub mod factory;
pub mod traits;

pub use factory::{provide_connection, provide_raw_executor, register_database_providers};
pub use traits::RawStatements;
