//! Identity resolution: decide which scored [`bh_core::Person`] records
//! denote the same individual and collapse each group into one canonical
//! record.

pub mod error;
pub mod matcher;
pub mod merge;
pub mod normalize;

pub use error::MergeError;
pub use matcher::{find_matches, MIN_CORROBORATION};
pub use merge::{merge_profiles, resolve_identities, CROSS_SOURCE_BOOST};
pub use normalize::normalize_name;
