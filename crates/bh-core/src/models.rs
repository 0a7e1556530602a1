use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::values::{IsoTimestamp, Score, WebUrl};

/// Social and web links attached to a profile.
///
/// Every present field is a validated [`WebUrl`]; an absent field is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<WebUrl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<WebUrl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<WebUrl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<WebUrl>,
}

impl SocialLinks {
    /// Copy each of `other`'s fields that is still absent here. Populated
    /// fields are never overwritten.
    pub fn fill_missing(&mut self, other: &SocialLinks) {
        fill(&mut self.linkedin, &other.linkedin);
        fill(&mut self.twitter, &other.twitter);
        fill(&mut self.github, &other.github);
        fill(&mut self.website, &other.website);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.linkedin.is_none()
            && self.twitter.is_none()
            && self.github.is_none()
            && self.website.is_none()
    }
}

fn fill<T: Clone>(slot: &mut Option<T>, candidate: &Option<T>) {
    if slot.is_none() {
        slot.clone_from(candidate);
    }
}

/// One repository owned by a harvested GitHub profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSummary {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub stars: u64,
    #[serde(default)]
    pub topics: Vec<String>,
    pub url: WebUrl,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pushed_at: Option<IsoTimestamp>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubMetadata {
    #[serde(default)]
    pub repos: Vec<RepoSummary>,
}

/// Source-specific data carried alongside a [`RawProfile`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProfileMetadata {
    Github(GithubMetadata),
    #[default]
    None,
}

impl ProfileMetadata {
    /// Repositories for repository-hosting sources; empty otherwise.
    #[must_use]
    pub fn repos(&self) -> &[RepoSummary] {
        match self {
            ProfileMetadata::Github(meta) => &meta.repos,
            ProfileMetadata::None => &[],
        }
    }

    /// Most recent repository push, if any repository reports one.
    #[must_use]
    pub fn last_activity(&self) -> Option<IsoTimestamp> {
        self.repos()
            .iter()
            .filter_map(|r| r.pushed_at.as_ref())
            .max_by_key(|ts| ts.as_utc())
            .cloned()
    }
}

/// Fields returned by a secondary lookup against a profile's own source.
#[derive(Debug, Clone, Default)]
pub struct Enrichment {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub social_links: Option<SocialLinks>,
}

/// One harvested observation, before scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawProfile {
    pub source: String,
    pub source_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub profile_url: WebUrl,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_links: Option<SocialLinks>,
    #[serde(default)]
    pub metadata: ProfileMetadata,
}

impl RawProfile {
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        source_id: impl Into<String>,
        name: impl Into<String>,
        profile_url: WebUrl,
    ) -> Self {
        Self {
            source: source.into(),
            source_id: source_id.into(),
            name: name.into(),
            bio: None,
            profile_url,
            social_links: None,
            metadata: ProfileMetadata::None,
        }
    }

    /// Apply a secondary lookup.
    ///
    /// A looked-up display name replaces the harvest-time placeholder. The
    /// bio is filled only when absent, and social links only fill fields that
    /// are still empty.
    pub fn apply_enrichment(&mut self, enrichment: Enrichment) {
        if let Some(name) = enrichment.name.filter(|n| !n.trim().is_empty()) {
            self.name = name;
        }
        if self.bio.is_none() {
            self.bio = enrichment.bio.filter(|b| !b.trim().is_empty());
        }
        if let Some(links) = enrichment.social_links.filter(|l| !l.is_empty()) {
            match &mut self.social_links {
                Some(existing) => existing.fill_missing(&links),
                None => self.social_links = Some(links),
            }
        }
    }
}

/// A justification snippet tied to a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    pub source: String,
    pub text: String,
    pub url: WebUrl,
    pub timestamp: IsoTimestamp,
}

impl Evidence {
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        text: impl Into<String>,
        url: WebUrl,
        timestamp: IsoTimestamp,
    ) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
            url,
            timestamp,
        }
    }
}

/// A scored lead; the unit that identity resolution matches and merges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub person_id: String,
    pub name: String,
    pub primary_url: WebUrl,
    pub sources: BTreeSet<String>,
    pub operator_score: Score,
    pub angel_score: Score,
    #[serde(default)]
    pub evidence: Vec<Evidence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_links: Option<SocialLinks>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_activity: Option<IsoTimestamp>,
    /// Set only on merge results, where it equals `person_id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_id: Option<String>,
}

impl Person {
    #[must_use]
    pub fn new(
        person_id: impl Into<String>,
        name: impl Into<String>,
        primary_url: WebUrl,
        source: impl Into<String>,
        operator_score: impl Into<Score>,
        angel_score: impl Into<Score>,
    ) -> Self {
        Self {
            person_id: person_id.into(),
            name: name.into(),
            primary_url,
            sources: BTreeSet::from([source.into()]),
            operator_score: operator_score.into(),
            angel_score: angel_score.into(),
            evidence: Vec::new(),
            social_links: None,
            last_activity: None,
            canonical_id: None,
        }
    }

    /// Whether this record is the product of a merge.
    #[must_use]
    pub fn is_merged(&self) -> bool {
        self.canonical_id.as_deref() == Some(self.person_id.as_str())
    }
}
