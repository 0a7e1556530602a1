use async_trait::async_trait;
use bh_core::RawProfile;

use crate::error::HarvestError;

/// Parameters for one harvest run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestRequest {
    /// Topic or query strings to search for.
    pub topics: Vec<String>,
    /// Minimum popularity (e.g. repository stars) for a match to count.
    pub min_stars: u32,
    /// Perform one extra lookup per profile to fill name, bio, and links.
    pub enrich: bool,
}

/// A data source that produces raw profiles.
///
/// A failed source call fails the whole harvest; implementations may
/// tolerate per-profile enrichment failures.
#[async_trait]
pub trait Harvester: Send + Sync {
    /// Source identifier stamped on every returned profile.
    fn source(&self) -> &'static str;

    /// # Errors
    ///
    /// Returns [`HarvestError`] if a source call fails.
    async fn harvest(&self, request: &HarvestRequest) -> Result<Vec<RawProfile>, HarvestError>;
}
