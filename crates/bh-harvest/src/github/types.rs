//! Wire types for the GitHub REST API responses the harvester consumes.
//!
//! Only the fields used downstream are modelled; everything else in the
//! payload is ignored by serde.

use serde::Deserialize;

/// Response body from `GET /search/repositories`.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub items: Vec<SearchRepo>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SearchRepo {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub topics: Vec<String>,
    pub html_url: String,
    pub pushed_at: Option<String>,
    pub owner: RepoOwner,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RepoOwner {
    pub login: String,
    pub html_url: String,
}

/// Response body from `GET /users/{login}`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct GithubUser {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub blog: Option<String>,
    pub twitter_username: Option<String>,
}
