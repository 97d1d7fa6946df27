//! Validate config command implementation

use super::{EXIT_CONFIG, EXIT_OK};
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates as part of loading
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let settings = config.database_settings();
        let url = settings.redacted_url()?;

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        if config.database.is_none() {
            println!("  Database: no [database] section, defaults apply");
        }
        println!("  Connection URL: {url}");
        println!("  Max Connections: {}", settings.max_connections);
        println!("  Max Idle Time: {}s", settings.max_idle_time_seconds);
        println!("  Max Lifetime: {}s", settings.max_lifetime_seconds);
        println!("  Must Connect: {}", settings.must_connect);
        println!();

        Ok(EXIT_OK)
    }
}
