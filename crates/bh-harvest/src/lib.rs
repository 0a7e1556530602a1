//! Profile harvesting for builder-harvester.
//!
//! A [`Harvester`] turns a set of topics into [`bh_core::RawProfile`]s. The
//! shipped implementation is [`GitHubHarvester`], which searches repositories
//! by topic and treats their owners as candidate leads.

pub mod error;
pub mod github;
pub mod harvester;

mod rate_limit;

pub use error::HarvestError;
pub use github::{GitHubHarvester, DEFAULT_API_URL};
pub use harvester::{HarvestRequest, Harvester};
