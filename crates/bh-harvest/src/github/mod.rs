//! GitHub repository-search harvester.

mod profiles;
mod types;

use std::time::Duration;

use async_trait::async_trait;
use bh_core::{AppConfig, RawProfile, GITHUB_SOURCE};
use futures::{StreamExt, TryStreamExt};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::HarvestError;
use crate::harvester::{HarvestRequest, Harvester};
use crate::rate_limit::retry_with_backoff;

use self::profiles::{enrichment_from_user, owner_profiles};
use self::types::{GithubUser, SearchResponse};

/// Public GitHub REST API root.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Results requested per topic search.
const SEARCH_PAGE_SIZE: &str = "50";

/// Fallback wait when a rate-limit response carries no usable hint.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Harvests repository owners from GitHub topic searches.
///
/// Each topic is searched with `topic:<t> stars:>=<min>`, sorted by stars.
/// Owners become [`RawProfile`]s with their repositories in
/// [`bh_core::ProfileMetadata::Github`]. With enrichment on, one extra
/// `/users/{login}` lookup per owner fills the display name, bio,
/// and social links; a failed lookup keeps the un-enriched profile.
pub struct GitHubHarvester {
    client: Client,
    base_url: Url,
    token: Option<String>,
    max_retries: u32,
    backoff_base_secs: u64,
    max_concurrent: usize,
}

impl GitHubHarvester {
    /// Creates a harvester against the public GitHub API.
    ///
    /// # Errors
    ///
    /// Returns [`HarvestError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        token: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, HarvestError> {
        Self::with_base_url(DEFAULT_API_URL, token, timeout_secs, user_agent)
    }

    /// Creates a harvester against a custom API root (GitHub Enterprise or a
    /// mock server in tests). Retries are disabled and requests run one at a
    /// time until configured otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`HarvestError::InvalidBaseUrl`] if `base_url` does not parse,
    /// or [`HarvestError::Http`] if the client cannot be constructed.
    pub fn with_base_url(
        base_url: &str,
        token: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, HarvestError> {
        // `Url::join` replaces the last path segment unless it ends in '/'.
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized).map_err(|e| HarvestError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url,
            token: token.map(str::to_owned).filter(|t| !t.trim().is_empty()),
            max_retries: 0,
            backoff_base_secs: 0,
            max_concurrent: 1,
        })
    }

    /// Builds a harvester from the loaded application config.
    ///
    /// # Errors
    ///
    /// See [`Self::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, HarvestError> {
        Ok(Self::with_base_url(
            &config.github_api_url,
            config.github_token.as_deref(),
            config.request_timeout_secs,
            &config.user_agent,
        )?
        .with_retries(config.max_retries, config.retry_backoff_base_secs)
        .with_max_concurrent(config.max_concurrent_requests))
    }

    /// Retry transient failures (rate limiting, network, 5xx) up to
    /// `max_retries` times with `backoff_base_secs * 2^attempt` delays.
    #[must_use]
    pub fn with_retries(mut self, max_retries: u32, backoff_base_secs: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_secs = backoff_base_secs;
        self
    }

    /// Cap on in-flight API requests. Zero is treated as one.
    #[must_use]
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    fn endpoint(&self, path: &str) -> Result<Url, HarvestError> {
        self.base_url
            .join(path)
            .map_err(|e| HarvestError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    async fn search_topic(
        &self,
        topic: &str,
        min_stars: u32,
    ) -> Result<SearchResponse, HarvestError> {
        let mut url = self.endpoint("search/repositories")?;
        url.query_pairs_mut()
            .append_pair("q", &format!("topic:{topic} stars:>={min_stars}"))
            .append_pair("sort", "stars")
            .append_pair("per_page", SEARCH_PAGE_SIZE);

        let response: SearchResponse = self
            .get_json(url, &format!("search for topic {topic}"))
            .await?;
        tracing::debug!(topic, hits = response.items.len(), "topic search complete");
        Ok(response)
    }

    async fn fetch_user(&self, login: &str) -> Result<GithubUser, HarvestError> {
        let url = self.endpoint(&format!("users/{login}"))?;
        self.get_json(url, &format!("user {login}")).await
    }

    /// GET `url` and decode the JSON body, retrying transient failures.
    ///
    /// # Errors
    ///
    /// - [`HarvestError::RateLimited`]: 429, or 403 with
    ///   `x-ratelimit-remaining: 0`, after all retries.
    /// - [`HarvestError::NotFound`]: 404 (not retried).
    /// - [`HarvestError::UnexpectedStatus`]: other non-2xx statuses; 5xx is
    ///   retried first.
    /// - [`HarvestError::Http`] or [`HarvestError::Deserialize`] for
    ///   transport and decoding failures.
    async fn get_json<T: DeserializeOwned + Send>(
        &self,
        url: Url,
        context: &str,
    ) -> Result<T, HarvestError> {
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            async move {
                let mut request = self
                    .client
                    .get(url.clone())
                    .header(reqwest::header::ACCEPT, "application/vnd.github+json");
                if let Some(token) = &self.token {
                    request = request.bearer_auth(token);
                }

                let response = request.send().await?;
                let status = response.status();

                if let Some(retry_after_secs) = rate_limit_wait(&response) {
                    return Err(HarvestError::RateLimited {
                        host: url.host_str().unwrap_or_default().to_owned(),
                        retry_after_secs,
                    });
                }

                if status == StatusCode::NOT_FOUND {
                    return Err(HarvestError::NotFound {
                        url: url.to_string(),
                    });
                }

                if !status.is_success() {
                    return Err(HarvestError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }

                let body = response.text().await?;
                serde_json::from_str::<T>(&body).map_err(|e| HarvestError::Deserialize {
                    context: context.to_owned(),
                    source: e,
                })
            }
        })
        .await
    }
}

/// Seconds to wait if `response` signals rate limiting, `None` otherwise.
///
/// GitHub answers 429 for secondary limits and 403 with
/// `x-ratelimit-remaining: 0` once the primary quota is spent.
fn rate_limit_wait(response: &reqwest::Response) -> Option<u64> {
    let headers = response.headers();
    let header_u64 = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok())
    };

    match response.status() {
        StatusCode::TOO_MANY_REQUESTS => Some(
            header_u64(reqwest::header::RETRY_AFTER.as_str()).unwrap_or(DEFAULT_RETRY_AFTER_SECS),
        ),
        StatusCode::FORBIDDEN if header_u64("x-ratelimit-remaining") == Some(0) => {
            let now = u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default();
            Some(
                header_u64("x-ratelimit-reset")
                    .map_or(DEFAULT_RETRY_AFTER_SECS, |reset| reset.saturating_sub(now)),
            )
        }
        _ => None,
    }
}

#[async_trait]
impl Harvester for GitHubHarvester {
    fn source(&self) -> &'static str {
        GITHUB_SOURCE
    }

    async fn harvest(&self, request: &HarvestRequest) -> Result<Vec<RawProfile>, HarvestError> {
        let min_stars = request.min_stars;

        // `buffered` keeps topic order so owner first-seen order is stable.
        let searches: Vec<SearchResponse> = futures::stream::iter(request.topics.clone())
            .map(|topic| async move { self.search_topic(&topic, min_stars).await })
            .buffered(self.max_concurrent)
            .try_collect()
            .await?;

        let profiles = owner_profiles(searches.into_iter().flat_map(|s| s.items));
        tracing::info!(
            topics = request.topics.len(),
            owners = profiles.len(),
            "github search complete"
        );

        if !request.enrich {
            return Ok(profiles);
        }

        let enriched: Vec<RawProfile> = futures::stream::iter(profiles)
            .map(|mut profile| async move {
                match self.fetch_user(&profile.source_id).await {
                    Ok(user) => {
                        let enrichment = enrichment_from_user(&profile, user);
                        profile.apply_enrichment(enrichment);
                    }
                    Err(e) => {
                        tracing::warn!(
                            login = %profile.source_id,
                            error = %e,
                            "user enrichment failed, keeping search data"
                        );
                    }
                }
                profile
            })
            .buffered(self.max_concurrent)
            .collect()
            .await;

        Ok(enriched)
    }
}
