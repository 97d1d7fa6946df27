//! CLI interface and argument parsing

pub mod commands;

use clap::{Parser, Subcommand};

/// dbprovider - check database provider configuration and connectivity
#[derive(Parser, Debug)]
#[command(name = "dbprovider")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "dbprovider.toml", env = "DBPROVIDER_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "DBPROVIDER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Build the providers and ping the database
    Ping(commands::ping::PingArgs),
}
