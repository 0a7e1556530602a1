//! Multi-field corroboration matching.
//!
//! Two records match only when they agree on at least
//! [`MIN_CORROBORATION`] independent fields, so a shared common name alone
//! never merges two different people. Grouping is pairwise and greedy: once
//! an id is grouped, later pairs touching it are dropped, and groups never
//! grow beyond two members.

use std::collections::{BTreeSet, HashMap, HashSet};

use bh_core::{Person, WebUrl};

use crate::normalize::normalize_name;

/// Number of agreeing fields required to confirm a pair.
pub const MIN_CORROBORATION: u32 = 2;

/// Key -> ids index that remembers the order keys were first seen.
#[derive(Default)]
struct OrderedIndex<'a> {
    positions: HashMap<String, usize>,
    entries: Vec<Vec<&'a str>>,
}

impl<'a> OrderedIndex<'a> {
    fn insert(&mut self, key: String, id: &'a str) {
        let slot = if let Some(&slot) = self.positions.get(&key) {
            slot
        } else {
            self.entries.push(Vec::new());
            self.positions.insert(key, self.entries.len() - 1);
            self.entries.len() - 1
        };
        self.entries[slot].push(id);
    }

    fn insert_url(&mut self, url: Option<&WebUrl>, id: &'a str) {
        if let Some(url) = url {
            self.insert(url.as_str().to_lowercase(), id);
        }
    }
}

/// Find groups of person ids that likely denote the same individual.
///
/// Fields compared: normalized name, linkedin, twitter, and website URLs
/// (case-insensitive). GitHub URLs are not a matching signal. Confirmed
/// pairs are emitted in the order they were first corroborated, and every
/// returned group has exactly two members.
#[must_use]
pub fn find_matches(people: &[Person]) -> Vec<BTreeSet<String>> {
    let mut by_name = OrderedIndex::default();
    let mut by_linkedin = OrderedIndex::default();
    let mut by_twitter = OrderedIndex::default();
    let mut by_website = OrderedIndex::default();

    for person in people {
        let id = person.person_id.as_str();
        by_name.insert(normalize_name(&person.name), id);

        if let Some(links) = &person.social_links {
            by_linkedin.insert_url(links.linkedin.as_ref(), id);
            by_twitter.insert_url(links.twitter.as_ref(), id);
            by_website.insert_url(links.website.as_ref(), id);
        }
    }

    let mut pair_order: Vec<(&str, &str)> = Vec::new();
    let mut counts: HashMap<(&str, &str), u32> = HashMap::new();

    for index in [&by_name, &by_linkedin, &by_twitter, &by_website] {
        for ids in index.entries.iter().filter(|ids| ids.len() > 1) {
            for (i, &a) in ids.iter().enumerate() {
                for &b in &ids[i + 1..] {
                    let pair = if a <= b { (a, b) } else { (b, a) };
                    let count = counts.entry(pair).or_insert_with(|| {
                        pair_order.push(pair);
                        0
                    });
                    *count += 1;
                }
            }
        }
    }

    let mut grouped: HashSet<&str> = HashSet::new();
    let mut groups = Vec::new();

    for pair in pair_order {
        if counts[&pair] < MIN_CORROBORATION {
            continue;
        }
        let (a, b) = pair;
        if a == b || grouped.contains(a) || grouped.contains(b) {
            tracing::debug!(a, b, "skipping corroborated pair, member already grouped");
            continue;
        }
        grouped.insert(a);
        grouped.insert(b);
        groups.push(BTreeSet::from([a.to_owned(), b.to_owned()]));
    }

    groups
}

#[cfg(test)]
mod tests {
    use bh_core::SocialLinks;

    use super::*;

    fn url(s: &str) -> WebUrl {
        WebUrl::parse(s).unwrap()
    }

    fn person(id: &str, name: &str, links: Option<SocialLinks>) -> Person {
        let mut p = Person::new(
            id,
            name,
            url(&format!("https://example.com/{id}")),
            "github",
            0.5,
            0.5,
        );
        p.social_links = links;
        p
    }

    fn linkedin(handle: &str) -> SocialLinks {
        SocialLinks {
            linkedin: Some(url(&format!("https://linkedin.com/in/{handle}"))),
            ..SocialLinks::default()
        }
    }

    fn ids(group: &BTreeSet<String>) -> Vec<&str> {
        group.iter().map(String::as_str).collect()
    }

    #[test]
    fn name_and_linkedin_corroborate() {
        let people = [
            person("gh_jane", "Jane Smith", Some(linkedin("janesmith"))),
            person("ph_jane", "Jane R Smith", Some(linkedin("janesmith"))),
        ];
        let matches = find_matches(&people);
        assert_eq!(matches.len(), 1);
        assert_eq!(ids(&matches[0]), ["gh_jane", "ph_jane"]);
    }

    #[test]
    fn name_alone_does_not_match() {
        let people = [
            person("a", "Jane Smith", None),
            person("b", "Jane Smith", None),
        ];
        assert!(find_matches(&people).is_empty());
    }

    #[test]
    fn single_social_link_alone_does_not_match() {
        let people = [
            person("a", "Jane Smith", Some(linkedin("shared"))),
            person("b", "Raj Patel", Some(linkedin("shared"))),
        ];
        assert!(find_matches(&people).is_empty());
    }

    #[test]
    fn two_social_links_match_without_name() {
        let links = SocialLinks {
            twitter: Some(url("https://twitter.com/jane")),
            website: Some(url("https://jane.dev")),
            ..SocialLinks::default()
        };
        let people = [
            person("a", "Jane Smith", Some(links.clone())),
            person("b", "jsmith", Some(links)),
        ];
        assert_eq!(find_matches(&people).len(), 1);
    }

    #[test]
    fn url_comparison_ignores_case() {
        let upper = SocialLinks {
            linkedin: Some(url("https://LinkedIn.com/in/JaneSmith")),
            ..SocialLinks::default()
        };
        let people = [
            person("a", "Jane Smith", Some(upper)),
            person("b", "Jane Smith", Some(linkedin("janesmith"))),
        ];
        assert_eq!(find_matches(&people).len(), 1);
    }

    #[test]
    fn github_links_are_not_a_signal() {
        let gh = SocialLinks {
            github: Some(url("https://github.com/jane")),
            ..SocialLinks::default()
        };
        let people = [
            person("a", "Jane Smith", Some(gh.clone())),
            person("b", "Jane Smith", Some(gh)),
        ];
        assert!(find_matches(&people).is_empty());
    }

    #[test]
    fn triple_produces_single_pairwise_group() {
        // All three share a name; each shares a linkedin with the next one.
        let people = [
            person("a", "Jane Smith", Some(linkedin("one"))),
            person(
                "b",
                "Jane Smith",
                Some(SocialLinks {
                    linkedin: Some(url("https://linkedin.com/in/one")),
                    twitter: Some(url("https://twitter.com/two")),
                    ..SocialLinks::default()
                }),
            ),
            person(
                "c",
                "Jane Smith",
                Some(SocialLinks {
                    twitter: Some(url("https://twitter.com/two")),
                    ..SocialLinks::default()
                }),
            ),
        ];
        let matches = find_matches(&people);
        assert_eq!(matches.len(), 1, "got {matches:?}");
        assert_eq!(ids(&matches[0]), ["a", "b"]);
    }

    #[test]
    fn no_id_appears_in_two_groups() {
        let shared = linkedin("shared");
        let people: Vec<Person> = (0..6)
            .map(|i| person(&format!("p{i}"), "Jane Smith", Some(shared.clone())))
            .collect();
        let matches = find_matches(&people);
        let mut seen = HashSet::new();
        for group in &matches {
            assert_eq!(group.len(), 2);
            for id in group {
                assert!(seen.insert(id.clone()), "{id} grouped twice");
            }
        }
        assert_eq!(matches.len(), 3);
    }

    #[test]
    fn blank_names_still_corroborate() {
        // Both normalize to "", which is an ordinary name key.
        let people = [
            person("a", "  ", Some(linkedin("x"))),
            person("b", "", Some(linkedin("x"))),
        ];
        let matches = find_matches(&people);
        assert_eq!(matches.len(), 1);
        assert_eq!(ids(&matches[0]), ["a", "b"]);
    }

    #[test]
    fn output_is_deterministic() {
        let shared = linkedin("shared");
        let people: Vec<Person> = (0..5)
            .map(|i| person(&format!("p{i}"), "Jane Smith", Some(shared.clone())))
            .collect();
        let first = find_matches(&people);
        for _ in 0..10 {
            assert_eq!(find_matches(&people), first);
        }
        assert_eq!(ids(&first[0]), ["p0", "p1"]);
    }
}
