//! Keyword heuristics for the angel-investment signal.

use std::sync::LazyLock;

use bh_core::RawProfile;
use regex::{RegexSet, RegexSetBuilder};

/// Angel score assigned to profiles classified [`AngelSignal::AutoYes`].
pub const AUTO_YES_ANGEL_SCORE: f64 = 0.9;

/// Angel score assigned to profiles classified [`AngelSignal::AutoNo`].
pub const AUTO_NO_ANGEL_SCORE: f64 = 0.1;

/// Strong-affirmative patterns, matched case-insensitively as regexes.
const AUTO_YES_PATTERNS: &[&str] = &[
    "angel investor",
    "investing in",
    "advisor",
    "check size",
    r"\$\d+k.*check",
];

/// Strong-negative phrases, matched as substrings of the lowercased bio.
const AUTO_NO_PHRASES: &[&str] = &[
    "seeking investors",
    "looking for funding",
    "we're hiring",
    "join our team",
];

const ADVISORY_HINTS: &[&str] = &["advisor", "advising", "mentor", "helping"];

/// Bios shorter than this carry too little signal to route to judgment.
const MIN_BIO_CHARS: usize = 10;

static AUTO_YES_RE: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSetBuilder::new(AUTO_YES_PATTERNS)
        .case_insensitive(true)
        .build()
        .expect("valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngelSignal {
    AutoYes,
    AutoNo,
    Borderline,
}

impl AngelSignal {
    /// Heuristic angel score, or `None` for borderline profiles that need
    /// judgment.
    #[must_use]
    pub fn heuristic_score(self) -> Option<f64> {
        match self {
            AngelSignal::AutoYes => Some(AUTO_YES_ANGEL_SCORE),
            AngelSignal::AutoNo => Some(AUTO_NO_ANGEL_SCORE),
            AngelSignal::Borderline => None,
        }
    }
}

impl std::fmt::Display for AngelSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AngelSignal::AutoYes => write!(f, "auto_yes"),
            AngelSignal::AutoNo => write!(f, "auto_no"),
            AngelSignal::Borderline => write!(f, "borderline"),
        }
    }
}

/// Classify a profile's angel-investment signal from its bio.
///
/// Checks run in strict order: affirmative patterns, negative phrases, the
/// short-bio cutoff, then advisory hints. Because "advisor" is also an
/// affirmative pattern, a bio containing it is always `AutoYes`.
#[must_use]
pub fn classify_angel_signal(profile: &RawProfile) -> AngelSignal {
    let bio = profile.bio.as_deref().unwrap_or_default().to_lowercase();

    if AUTO_YES_RE.is_match(&bio) {
        return AngelSignal::AutoYes;
    }

    if AUTO_NO_PHRASES.iter().any(|phrase| bio.contains(phrase)) {
        return AngelSignal::AutoNo;
    }

    if bio.chars().count() < MIN_BIO_CHARS {
        return AngelSignal::AutoNo;
    }

    if ADVISORY_HINTS.iter().any(|hint| bio.contains(hint)) {
        return AngelSignal::Borderline;
    }

    AngelSignal::AutoNo
}
