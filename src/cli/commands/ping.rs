//! Ping command implementation
//!
//! Registers the database providers into the global container exactly as an
//! application would, forces `must_connect`, and resolves the raw executor.

use super::{EXIT_CONFIG, EXIT_CONNECTION, EXIT_OK};
use crate::adapters::database::{register_database_providers, RawStatements};
use crate::adapters::postgresql::{RawExecutor, PING_TIMEOUT};
use crate::config::{load_config, AppConfig};
use crate::container::Container;
use crate::domain::ProviderError;
use clap::Args;
use std::path::Path;

/// Arguments for the ping command
#[derive(Args, Debug)]
pub struct PingArgs {
    /// Raw statement to run after a successful ping
    #[arg(short, long)]
    pub statement: Option<String>,
}

impl PingArgs {
    /// Execute the ping command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let mut config = if Path::new(config_path).exists() {
            match load_config(config_path) {
                Ok(c) => c,
                Err(e) => {
                    println!("❌ Failed to load configuration: {e}");
                    return Ok(EXIT_CONFIG);
                }
            }
        } else {
            tracing::warn!(config_path = %config_path, "Configuration file not found, using defaults");
            AppConfig::default()
        };

        let mut settings = config.database_settings();
        settings.must_connect = true;
        let url = settings.redacted_url()?;
        config.database = Some(settings);

        println!("🔌 Pinging {url} (timeout {}s)", PING_TIMEOUT.as_secs());

        let container = Container::global();
        container.provide_value(config);
        register_database_providers(container);

        let executor = match container.resolve::<RawExecutor>().await {
            Ok(executor) => executor,
            Err(e) => return Ok(report_failure(&e)),
        };
        println!("✅ Database reachable");

        if let Some(ref statement) = self.statement {
            if let Err(e) = executor.batch_execute_raw(statement).await {
                println!("❌ Statement failed: {e}");
                return Ok(EXIT_CONNECTION);
            }
            println!("✅ Statement executed");
        }

        Ok(EXIT_OK)
    }
}

fn report_failure(error: &ProviderError) -> i32 {
    println!("❌ {error}");
    if error.is_connectivity() {
        EXIT_CONNECTION
    } else {
        EXIT_CONFIG
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContainerError, DatabaseError};

    #[test]
    fn test_report_failure_exit_codes() {
        let timeout: ProviderError = DatabaseError::PingTimeout { timeout_ms: 2000 }.into();
        assert_eq!(report_failure(&timeout), EXIT_CONNECTION);

        let missing: ProviderError = ContainerError::NotRegistered("RawExecutor").into();
        assert_eq!(report_failure(&missing), EXIT_CONFIG);
    }
}
