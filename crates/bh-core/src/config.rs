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
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        optional(var).unwrap_or_else(|| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_positive_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        let value = raw.parse::<usize>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(value)
    };

    let env = parse_environment(&or_default("BH_ENV", "development"))?;
    let log_level = or_default("BH_LOG_LEVEL", "info");

    let github_token = optional("GITHUB_TOKEN");
    let github_api_url = or_default("BH_GITHUB_API_URL", "https://api.github.com");

    let judge_url = optional("BH_JUDGE_URL");
    let judge_api_key = optional("BH_JUDGE_API_KEY");
    let judge_batch_size = parse_positive_usize("BH_JUDGE_BATCH_SIZE", "20")?;

    let request_timeout_secs = parse_u64("BH_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("BH_USER_AGENT", "builder-harvester/0.1 (lead-discovery)");
    let max_retries = parse_u32("BH_MAX_RETRIES", "3")?;
    let retry_backoff_base_secs = parse_u64("BH_RETRY_BACKOFF_BASE_SECS", "5")?;
    let max_concurrent_requests = parse_positive_usize("BH_MAX_CONCURRENT_REQUESTS", "4")?;

    let raw_dir = PathBuf::from(or_default("BH_RAW_DIR", "data/raw"));
    let out_dir = PathBuf::from(or_default("BH_OUT_DIR", "out"));

    Ok(AppConfig {
        env,
        log_level,
        github_token,
        github_api_url,
        judge_url,
        judge_api_key,
        judge_batch_size,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_secs,
        max_concurrent_requests,
        raw_dir,
        out_dir,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BH_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
