//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{AppConfig, DatabaseSettings};
use super::secret_string;
use crate::domain::errors::ProviderError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "DBPROVIDER";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into AppConfig
/// 4. Applies environment variable overrides (DBPROVIDER_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, a referenced environment
/// variable is unset, the TOML is malformed, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use dbprovider::config::loader::load_config;
///
/// let config = load_config("dbprovider.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ProviderError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ProviderError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_str(&contents)
}

/// Loads configuration from TOML text
///
/// Same pipeline as [`load_config`] minus the file read.
pub fn load_config_str(contents: &str) -> Result<AppConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: AppConfig = toml::from_str(&contents)
        .map_err(|e| ProviderError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        ProviderError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // The pattern is a literal, so compilation cannot fail
    PATTERN.get_or_init(|| Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap())
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = env_var_pattern();
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    String::new()
                }
            }
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ProviderError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn env_key(section: &str, key: &str) -> String {
    format!("{ENV_PREFIX}_{section}_{key}")
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        ProviderError::Configuration(format!("Invalid value '{value}' for {name}"))
    })
}

/// Applies environment variable overrides using the DBPROVIDER_* prefix
///
/// Variables follow the pattern `DBPROVIDER_<SECTION>_<KEY>`, for example
/// `DBPROVIDER_DATABASE_HOST`. A database override creates the `[database]`
/// section from defaults when the file has none.
fn apply_env_overrides(config: &mut AppConfig) -> Result<()> {
    if let Ok(val) = std::env::var(env_key("APPLICATION", "LOG_LEVEL")) {
        config.application.log_level = val;
    }

    let mut database = config.database.clone().unwrap_or_default();
    let touched = apply_database_overrides(&mut database)?;
    if touched {
        config.database = Some(database);
    }

    if let Ok(val) = std::env::var(env_key("LOGGING", "LOCAL_ENABLED")) {
        config.logging.local_enabled = parse_env(&env_key("LOGGING", "LOCAL_ENABLED"), &val)?;
    }
    if let Ok(val) = std::env::var(env_key("LOGGING", "LOCAL_PATH")) {
        config.logging.local_path = val;
    }

    Ok(())
}

fn apply_database_overrides(db: &mut DatabaseSettings) -> Result<bool> {
    let mut touched = false;
    let var = |key: &str| {
        let name = env_key("DATABASE", key);
        std::env::var(&name).ok().map(|value| (name, value))
    };

    if let Some((_, val)) = var("HOST") {
        db.host = val;
        touched = true;
    }
    if let Some((name, val)) = var("PORT") {
        db.port = parse_env(&name, &val)?;
        touched = true;
    }
    if let Some((_, val)) = var("SERVICE") {
        db.service = val;
        touched = true;
    }
    if let Some((_, val)) = var("USER") {
        db.user = val;
        touched = true;
    }
    if let Some((_, val)) = var("PASSWORD") {
        db.password = Some(secret_string(val));
        touched = true;
    }
    if let Some((name, val)) = var("MAX_IDLE_TIME_SECONDS") {
        db.max_idle_time_seconds = parse_env(&name, &val)?;
        touched = true;
    }
    if let Some((name, val)) = var("MAX_LIFETIME_SECONDS") {
        db.max_lifetime_seconds = parse_env(&name, &val)?;
        touched = true;
    }
    if let Some((name, val)) = var("MUST_CONNECT") {
        db.must_connect = parse_env(&name, &val)?;
        touched = true;
    }
    if let Some((name, val)) = var("MAX_CONNECTIONS") {
        db.max_connections = parse_env(&name, &val)?;
        touched = true;
    }

    Ok(touched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_substitute_env_vars() {
        let _guard = ENV_MUTEX.lock().unwrap();
        std::env::set_var("DBP_TEST_VAR", "test_value");
        let input = "password = \"${DBP_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "password = \"test_value\"\n");
        std::env::remove_var("DBP_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        let _guard = ENV_MUTEX.lock().unwrap();
        std::env::remove_var("DBP_MISSING_VAR");
        let input = "password = \"${DBP_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("DBP_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        let input = "# password = \"${DBP_NEVER_SET}\"";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("${DBP_NEVER_SET}"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(ProviderError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let toml_content = r#"
[application]
log_level = "debug"

[database]
host = "db.internal"
port = 6432
service = "inventory"
user = "inventory_rw"
password = "pw"
must_connect = true
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");

        let db = config.database.unwrap();
        assert_eq!(db.host, "db.internal");
        assert_eq!(db.port, 6432);
        assert_eq!(db.service, "inventory");
        assert!(db.must_connect);
    }

    #[test]
    fn test_invalid_env_override_is_rejected() {
        let _guard = ENV_MUTEX.lock().unwrap();
        std::env::set_var("DBPROVIDER_DATABASE_PORT", "not-a-port");
        let result = load_config_str("");
        std::env::remove_var("DBPROVIDER_DATABASE_PORT");

        let err = result.unwrap_err();
        assert!(err.to_string().contains("DBPROVIDER_DATABASE_PORT"));
    }
}
