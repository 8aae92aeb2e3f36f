use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a
/// `HashMap` lookup instead of `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("KARBON_ENV", "development"));
    let log_level = or_default("KARBON_LOG_LEVEL", "info");
    let sites_path = PathBuf::from(or_default("KARBON_SITES_PATH", "./config/sites.yaml"));
    let output_path = PathBuf::from(or_default("KARBON_OUTPUT_PATH", "./products.json"));

    let max_concurrent_tasks = parse_usize("KARBON_MAX_CONCURRENT_TASKS", "8")?;
    if max_concurrent_tasks == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "KARBON_MAX_CONCURRENT_TASKS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let user_agent = or_default("KARBON_USER_AGENT", "karbon/0.1 (retail-scraper)");
    let connect_timeout_secs = parse_u64("KARBON_CONNECT_TIMEOUT_SECS", "10")?;

    Ok(AppConfig {
        env,
        log_level,
        sites_path,
        output_path,
        max_concurrent_tasks,
        user_agent,
        connect_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
