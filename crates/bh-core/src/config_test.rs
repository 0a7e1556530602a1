use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "BH_ENV"));
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.github_token.is_none());
    assert_eq!(cfg.github_api_url, "https://api.github.com");
    assert!(cfg.judge_url.is_none());
    assert!(cfg.judge_api_key.is_none());
    assert_eq!(cfg.judge_batch_size, 20);
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "builder-harvester/0.1 (lead-discovery)");
    assert_eq!(cfg.max_retries, 3);
    assert_eq!(cfg.retry_backoff_base_secs, 5);
    assert_eq!(cfg.max_concurrent_requests, 4);
    assert_eq!(cfg.raw_dir.to_str(), Some("data/raw"));
    assert_eq!(cfg.out_dir.to_str(), Some("out"));
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("GITHUB_TOKEN", "ghp_test");
    map.insert("BH_JUDGE_URL", "http://localhost:9000/judge");
    map.insert("BH_JUDGE_BATCH_SIZE", "5");
    map.insert("BH_MAX_CONCURRENT_REQUESTS", "8");
    map.insert("BH_OUT_DIR", "/tmp/leads");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.github_token.as_deref(), Some("ghp_test"));
    assert_eq!(cfg.judge_url.as_deref(), Some("http://localhost:9000/judge"));
    assert_eq!(cfg.judge_batch_size, 5);
    assert_eq!(cfg.max_concurrent_requests, 8);
    assert_eq!(cfg.out_dir.to_str(), Some("/tmp/leads"));
}

#[test]
fn blank_optional_values_count_as_unset() {
    let mut map = HashMap::new();
    map.insert("GITHUB_TOKEN", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.github_token.is_none());
}

#[test]
fn zero_batch_size_is_rejected() {
    let mut map = HashMap::new();
    map.insert("BH_JUDGE_BATCH_SIZE", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(
            result,
            Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BH_JUDGE_BATCH_SIZE"
        ),
        "expected InvalidEnvVar(BH_JUDGE_BATCH_SIZE), got: {result:?}"
    );
}

#[test]
fn invalid_max_retries_is_rejected() {
    let mut map = HashMap::new();
    map.insert("BH_MAX_RETRIES", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(
            result,
            Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BH_MAX_RETRIES"
        ),
        "expected InvalidEnvVar(BH_MAX_RETRIES), got: {result:?}"
    );
}

#[test]
fn invalid_request_timeout_is_rejected() {
    let mut map = HashMap::new();
    map.insert("BH_REQUEST_TIMEOUT_SECS", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(
            result,
            Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BH_REQUEST_TIMEOUT_SECS"
        ),
        "expected InvalidEnvVar(BH_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn debug_output_redacts_secrets() {
    let mut map = HashMap::new();
    map.insert("GITHUB_TOKEN", "ghp_supersecret");
    map.insert("BH_JUDGE_API_KEY", "sk-supersecret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("supersecret"), "leaked secret: {rendered}");
    assert!(rendered.contains("[redacted]"));
}
