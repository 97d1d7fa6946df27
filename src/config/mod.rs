//! Configuration management for dbprovider.
//!
//! Settings are read from a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Environment overrides (`DBPROVIDER_<SECTION>_<KEY>`)
//! - Defaults for every optional setting, including a missing `[database]` section
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [database]
//! host = "db.example.com"
//! port = 5432
//! service = "orders"
//! user = "orders_app"
//! password = "${ORDERS_DB_PASSWORD}"
//! max_idle_time_seconds = 300
//! max_lifetime_seconds = 1800
//! must_connect = true
//!
//! [database.options]
//! application_name = "orders-api"
//!
//! [logging]
//! local_enabled = false
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use dbprovider::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("dbprovider.toml")?;
//! let settings = config.database_settings();
//! println!("Database: {}:{}/{}", settings.host, settings.port, settings.service);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, load_config_str};
pub use schema::{AppConfig, ApplicationConfig, DatabaseSettings, LoggingConfig};
pub use secret::{secret_string, SecretString, SecretValue};
