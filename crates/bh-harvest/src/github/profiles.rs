//! Conversion from GitHub API payloads into [`RawProfile`]s.

use std::collections::HashMap;

use bh_core::{
    Enrichment, GithubMetadata, IsoTimestamp, ProfileMetadata, RawProfile, RepoSummary,
    SocialLinks, WebUrl, GITHUB_SOURCE,
};

use super::types::{GithubUser, SearchRepo};

/// Fold search hits into one profile per repository owner.
///
/// Owners keep the order in which they were first seen. A repository found
/// under several topics is recorded once. Hits with an unparsable owner or
/// repository URL are skipped with a warning.
pub(crate) fn owner_profiles(repos: impl IntoIterator<Item = SearchRepo>) -> Vec<RawProfile> {
    let mut profiles: Vec<RawProfile> = Vec::new();
    let mut by_login: HashMap<String, usize> = HashMap::new();

    for repo in repos {
        let repo_url = match WebUrl::parse(&repo.html_url) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(
                    repo = %repo.name,
                    error = %e,
                    "skipping repository with invalid URL"
                );
                continue;
            }
        };

        let slot = if let Some(&slot) = by_login.get(&repo.owner.login) {
            slot
        } else {
            let profile_url = match WebUrl::parse(&repo.owner.html_url) {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!(
                        login = %repo.owner.login,
                        error = %e,
                        "skipping owner with invalid profile URL"
                    );
                    continue;
                }
            };
            let mut profile = RawProfile::new(
                GITHUB_SOURCE,
                repo.owner.login.clone(),
                repo.owner.login.clone(),
                profile_url,
            );
            profile.metadata = ProfileMetadata::Github(GithubMetadata::default());
            profiles.push(profile);
            by_login.insert(repo.owner.login.clone(), profiles.len() - 1);
            profiles.len() - 1
        };

        if let ProfileMetadata::Github(meta) = &mut profiles[slot].metadata {
            if meta.repos.iter().all(|r| r.url != repo_url) {
                meta.repos.push(RepoSummary {
                    name: repo.name,
                    description: repo.description,
                    stars: repo.stargazers_count,
                    topics: repo.topics,
                    url: repo_url,
                    pushed_at: repo
                        .pushed_at
                        .as_deref()
                        .and_then(|ts| IsoTimestamp::parse(ts).ok()),
                });
            }
        }
    }

    profiles
}

/// Build the enrichment for `profile` from its user record.
pub(crate) fn enrichment_from_user(profile: &RawProfile, user: GithubUser) -> Enrichment {
    let links = SocialLinks {
        github: Some(profile.profile_url.clone()),
        twitter: user
            .twitter_username
            .as_deref()
            .map(str::trim)
            .filter(|handle| !handle.is_empty())
            .and_then(|handle| WebUrl::parse(&format!("https://twitter.com/{handle}")).ok()),
        website: user.blog.as_deref().and_then(website_url),
        linkedin: None,
    };

    Enrichment {
        name: user.name,
        bio: user.bio,
        social_links: Some(links),
    }
}

/// Users often enter a bare host in the blog field; assume https.
fn website_url(blog: &str) -> Option<WebUrl> {
    let blog = blog.trim();
    if blog.is_empty() {
        return None;
    }
    if blog.starts_with("http://") || blog.starts_with("https://") {
        WebUrl::parse(blog).ok()
    } else {
        WebUrl::parse(&format!("https://{blog}")).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::super::types::RepoOwner;
    use super::*;

    fn hit(login: &str, repo: &str, topics: &[&str]) -> SearchRepo {
        SearchRepo {
            name: repo.to_owned(),
            description: Some(format!("{repo} firmware")),
            stargazers_count: 120,
            topics: topics.iter().map(|t| (*t).to_owned()).collect(),
            html_url: format!("https://github.com/{login}/{repo}"),
            pushed_at: Some("2025-03-01T12:00:00Z".to_owned()),
            owner: RepoOwner {
                login: login.to_owned(),
                html_url: format!("https://github.com/{login}"),
            },
        }
    }

    #[test]
    fn groups_repos_by_owner_in_first_seen_order() {
        let profiles = owner_profiles([
            hit("jane", "bms", &["battery-management"]),
            hit("raj", "sensor-hub", &["iot"]),
            hit("jane", "charger", &["battery"]),
        ]);

        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].source_id, "jane");
        assert_eq!(profiles[0].name, "jane");
        assert_eq!(profiles[0].source, "github");
        assert_eq!(profiles[0].profile_url.as_str(), "https://github.com/jane");
        assert_eq!(profiles[0].metadata.repos().len(), 2);
        assert_eq!(profiles[1].source_id, "raj");
    }

    #[test]
    fn same_repo_under_two_topics_is_recorded_once() {
        let profiles = owner_profiles([
            hit("jane", "bms", &["battery-management"]),
            hit("jane", "bms", &["battery-management"]),
        ]);
        assert_eq!(profiles[0].metadata.repos().len(), 1);
    }

    #[test]
    fn invalid_owner_url_is_skipped() {
        let mut bad = hit("ghost", "repo", &[]);
        bad.owner.html_url = "not a url".to_owned();
        let profiles = owner_profiles([bad, hit("jane", "bms", &[])]);
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].source_id, "jane");
    }

    #[test]
    fn unparsable_push_time_is_dropped() {
        let mut repo = hit("jane", "bms", &[]);
        repo.pushed_at = Some("yesterday".to_owned());
        let profiles = owner_profiles([repo]);
        assert!(profiles[0].metadata.repos()[0].pushed_at.is_none());
    }

    #[test]
    fn enrichment_builds_social_links() {
        let profile = owner_profiles([hit("jane", "bms", &[])]).remove(0);
        let user = GithubUser {
            name: Some("Jane Smith".to_owned()),
            bio: Some("Building batteries".to_owned()),
            blog: Some("jane.dev".to_owned()),
            twitter_username: Some("janesmith".to_owned()),
        };

        let enrichment = enrichment_from_user(&profile, user);
        let links = enrichment.social_links.unwrap();

        assert_eq!(enrichment.name.as_deref(), Some("Jane Smith"));
        assert_eq!(links.github.unwrap().as_str(), "https://github.com/jane");
        assert_eq!(links.twitter.unwrap().as_str(), "https://twitter.com/janesmith");
        assert_eq!(links.website.unwrap().as_str(), "https://jane.dev");
        assert!(links.linkedin.is_none());
    }

    #[test]
    fn website_keeps_explicit_scheme_and_drops_garbage() {
        assert_eq!(
            website_url("http://jane.dev/blog").unwrap().as_str(),
            "http://jane.dev/blog"
        );
        assert!(website_url("   ").is_none());
        assert!(website_url("not a host at all").is_none());
    }
}
