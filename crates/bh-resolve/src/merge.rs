//! Collapse matched records into one canonical [`Person`].

use std::collections::HashMap;

use bh_core::{Person, Score, SocialLinks};

use crate::error::MergeError;
use crate::matcher::find_matches;

/// Score multiplier applied when a merged record spans more than one source.
pub const CROSS_SOURCE_BOOST: f64 = 1.1;

/// Merge records known to denote one individual.
///
/// Identity fields come from the first record. Sources are unioned, each
/// score is the maximum across inputs (boosted by [`CROSS_SOURCE_BOOST`]
/// when more than one source contributed), evidence is concatenated in input
/// order, and social links are filled field by field with earlier records
/// taking priority. A single record is returned unchanged.
///
/// # Errors
///
/// Returns [`MergeError::Empty`] if `people` is empty.
pub fn merge_profiles(people: &[Person]) -> Result<Person, MergeError> {
    let (base, rest) = people.split_first().ok_or(MergeError::Empty)?;
    if rest.is_empty() {
        return Ok(base.clone());
    }

    let mut merged = base.clone();

    for p in rest {
        merged.sources.extend(p.sources.iter().cloned());
    }

    let max_score = |pick: fn(&Person) -> Score| {
        people.iter().map(pick).fold(Score::ZERO, Score::max)
    };
    merged.operator_score = max_score(|p| p.operator_score);
    merged.angel_score = max_score(|p| p.angel_score);

    if merged.sources.len() > 1 {
        merged.operator_score = merged.operator_score.boosted(CROSS_SOURCE_BOOST);
        merged.angel_score = merged.angel_score.boosted(CROSS_SOURCE_BOOST);
    }

    merged.evidence = people.iter().flat_map(|p| p.evidence.iter().cloned()).collect();

    merged.social_links = people
        .iter()
        .filter_map(|p| p.social_links.as_ref())
        .fold(None, |acc: Option<SocialLinks>, links| match acc {
            None => Some(links.clone()),
            Some(mut existing) => {
                existing.fill_missing(links);
                Some(existing)
            }
        });

    if merged.last_activity.is_none() {
        merged.last_activity = rest.iter().find_map(|p| p.last_activity.clone());
    }

    merged.canonical_id = Some(merged.person_id.clone());

    Ok(merged)
}

/// Match and merge a full set of scored records.
///
/// Members of each matched group are merged in their input order, and the
/// merged record takes the position of the group's first member. Unmatched
/// records pass through untouched.
#[must_use]
pub fn resolve_identities(people: Vec<Person>) -> Vec<Person> {
    let groups = find_matches(&people);
    if groups.is_empty() {
        return people;
    }

    let position: HashMap<&str, usize> = people
        .iter()
        .enumerate()
        .map(|(i, p)| (p.person_id.as_str(), i))
        .collect();

    // Slot index -> merged record, and the set of slots folded into another.
    let mut replacements: HashMap<usize, Person> = HashMap::new();
    let mut absorbed: Vec<usize> = Vec::new();

    for group in &groups {
        let mut slots: Vec<usize> = group
            .iter()
            .filter_map(|id| position.get(id.as_str()).copied())
            .collect();
        slots.sort_unstable();

        let Some((&first, others)) = slots.split_first() else {
            continue;
        };
        let members: Vec<Person> = slots.iter().map(|&i| people[i].clone()).collect();
        // Non-empty by construction, so this always merges.
        if let Ok(merged) = merge_profiles(&members) {
            tracing::info!(
                person_id = %merged.person_id,
                members = members.len(),
                sources = ?merged.sources,
                "merged duplicate profiles"
            );
            replacements.insert(first, merged);
            absorbed.extend_from_slice(others);
        }
    }

    people
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !absorbed.contains(i))
        .map(|(i, p)| replacements.remove(&i).unwrap_or(p))
        .collect()
}
