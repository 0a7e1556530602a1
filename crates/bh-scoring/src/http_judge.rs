//! [`Judge`] backed by an HTTP classification endpoint.

use std::time::Duration;

use async_trait::async_trait;
use bh_core::{RawProfile, RepoSummary};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::JudgeError;
use crate::judge::{Judge, Judgment};
use crate::retry::retry_with_backoff;

/// HTTP judge client.
///
/// Posts `{"profiles": [...]}` to the configured URL and expects
/// `{"results": [...]}` back, one result per profile in the same order.
pub struct HttpJudge {
    client: Client,
    url: String,
    api_key: Option<String>,
    max_retries: u32,
    backoff_base_secs: u64,
}

#[derive(Serialize)]
struct JudgeRequest<'a> {
    profiles: Vec<ProfilePayload<'a>>,
}

#[derive(Serialize)]
struct ProfilePayload<'a> {
    source: &'a str,
    source_id: &'a str,
    name: &'a str,
    bio: Option<&'a str>,
    profile_url: &'a str,
    repos: &'a [RepoSummary],
}

#[derive(Deserialize)]
struct JudgeResponse {
    results: Vec<Judgment>,
}

impl<'a> From<&'a RawProfile> for ProfilePayload<'a> {
    fn from(profile: &'a RawProfile) -> Self {
        Self {
            source: &profile.source,
            source_id: &profile.source_id,
            name: &profile.name,
            bio: profile.bio.as_deref(),
            profile_url: profile.profile_url.as_str(),
            repos: profile.metadata.repos(),
        }
    }
}

impl HttpJudge {
    /// Create a judge client with no retries.
    ///
    /// # Errors
    ///
    /// Returns [`JudgeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        url: &str,
        api_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, JudgeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            url: url.to_owned(),
            api_key: api_key.map(str::to_owned),
            max_retries: 0,
            backoff_base_secs: 0,
        })
    }

    /// Retry transient failures up to `max_retries` times.
    #[must_use]
    pub fn with_retries(mut self, max_retries: u32, backoff_base_secs: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_secs = backoff_base_secs;
        self
    }

    async fn post_batch(&self, request: &JudgeRequest<'_>) -> Result<Vec<Judgment>, JudgeError> {
        let mut builder = self.client.post(&self.url).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(JudgeError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let parsed: JudgeResponse =
            serde_json::from_str(&body).map_err(|e| JudgeError::Deserialize {
                context: format!("judge response from {}", self.url),
                source: e,
            })?;
        Ok(parsed.results)
    }
}

#[async_trait]
impl Judge for HttpJudge {
    async fn judge(&self, batch: &[RawProfile]) -> Result<Vec<Judgment>, JudgeError> {
        let request = JudgeRequest {
            profiles: batch.iter().map(ProfilePayload::from).collect(),
        };
        let results = retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            self.post_batch(&request)
        })
        .await?;

        if results.len() != batch.len() {
            return Err(JudgeError::Misaligned {
                expected: batch.len(),
                got: results.len(),
            });
        }
        Ok(results)
    }
}
