use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub github_token: Option<String>,
    pub github_api_url: String,
    pub judge_url: Option<String>,
    pub judge_api_key: Option<String>,
    pub judge_batch_size: usize,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
    pub max_concurrent_requests: usize,
    pub raw_dir: PathBuf,
    pub out_dir: PathBuf,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field(
                "github_token",
                &self.github_token.as_ref().map(|_| "[redacted]"),
            )
            .field("github_api_url", &self.github_api_url)
            .field("judge_url", &self.judge_url)
            .field(
                "judge_api_key",
                &self.judge_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("judge_batch_size", &self.judge_batch_size)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_secs", &self.retry_backoff_base_secs)
            .field("max_concurrent_requests", &self.max_concurrent_requests)
            .field("raw_dir", &self.raw_dir)
            .field("out_dir", &self.out_dir)
            .finish()
    }
}
