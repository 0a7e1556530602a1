//! Shared data model and configuration for builder-harvester.
//!
//! Every URL and timestamp that enters a [`RawProfile`], [`Evidence`] or
//! [`Person`] goes through a validated value type, so downstream stages
//! (scoring, identity resolution, export) never see malformed data.

pub mod app_config;
pub mod config;
pub mod error;
pub mod models;
pub mod values;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, ModelError};
pub use models::{
    Enrichment, Evidence, GithubMetadata, Person, ProfileMetadata, RawProfile, RepoSummary,
    SocialLinks,
};
pub use values::{IsoTimestamp, Score, WebUrl};

/// Source identifier for profiles harvested from GitHub.
pub const GITHUB_SOURCE: &str = "github";

/// Source identifier for evidence produced by the judgment step.
pub const JUDGE_SOURCE: &str = "llm";
