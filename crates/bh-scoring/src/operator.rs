//! Operator-strength score from repository activity.

use bh_core::{ProfileMetadata, RawProfile, RepoSummary};

/// Topic vocabulary that marks a repository as relevant. Matched by
/// substring in either direction against lowercased repository topics.
pub const RELEVANT_TOPICS: &[&str] = &[
    "battery-management",
    "lithium-ion-batteries",
    "battery",
    "iot-projects",
    "iot",
    "robotics",
    "embedded-systems",
    "embedded",
    "power-management",
    "energy-storage",
    "energy",
];

/// Total stars at which the star component saturates.
const STAR_SATURATION: f64 = 1000.0;

/// Relevant-repository count at which the repo component saturates.
const RELEVANT_REPO_SATURATION: f64 = 3.0;

/// Weight of each of the two components.
const COMPONENT_WEIGHT: f64 = 0.5;

/// Score a profile's operator strength in `[0.0, 1.0]`.
///
/// Only profiles carrying repository metadata with at least one repository
/// score above zero. Half of the score comes from total stars (saturating at
/// 1000) and half from the number of relevant repositories (saturating at 3).
#[must_use]
pub fn calculate_operator_score(profile: &RawProfile) -> f64 {
    let ProfileMetadata::Github(meta) = &profile.metadata else {
        return 0.0;
    };
    if meta.repos.is_empty() {
        return 0.0;
    }

    let total_stars: u64 = meta.repos.iter().map(|r| r.stars).sum();
    let relevant_repos = meta.repos.iter().filter(|r| is_relevant(r)).count();

    #[allow(clippy::cast_precision_loss)]
    let star_score = (total_stars as f64 / STAR_SATURATION).min(1.0) * COMPONENT_WEIGHT;
    #[allow(clippy::cast_precision_loss)]
    let repo_score =
        (relevant_repos as f64 / RELEVANT_REPO_SATURATION).min(1.0) * COMPONENT_WEIGHT;

    (star_score + repo_score).min(1.0)
}

fn is_relevant(repo: &RepoSummary) -> bool {
    repo.topics
        .iter()
        .map(|t| t.to_lowercase())
        .any(|topic| {
            RELEVANT_TOPICS
                .iter()
                .any(|relevant| topic.contains(relevant) || relevant.contains(topic.as_str()))
        })
}
