//! `run` command: harvest, score, classify, resolve, filter, export.
//!
//! Every stage consumes the full output of the previous one. Judge and
//! harvest failures abort the run before anything is exported.

use std::path::PathBuf;

use anyhow::Context;
use bh_core::{
    AppConfig, Evidence, IsoTimestamp, Person, ProfileMetadata, RawProfile, GITHUB_SOURCE,
    JUDGE_SOURCE,
};
use bh_harvest::{HarvestRequest, Harvester};
use bh_resolve::resolve_identities;
use bh_scoring::{
    calculate_operator_score, classify_angel_signal, classify_borderline, HttpJudge, Judge,
    Judgment,
};

use crate::export::export_leads_csv;
use crate::harvest::{build_github_harvester, dated_path, read_raw_profiles, today};
use crate::thresholds::Thresholds;

#[derive(Debug)]
pub(crate) struct RunArgs {
    pub thresholds: Thresholds,
    pub topics: Vec<String>,
    pub min_stars: u32,
    pub raw: Option<PathBuf>,
    pub enrich: bool,
    pub out: Option<PathBuf>,
}

/// Heuristically scored people, plus the profiles that need a judge.
#[derive(Debug, Default)]
pub(crate) struct ScoredProfiles {
    pub people: Vec<Person>,
    pub borderline: Vec<RawProfile>,
}

/// `gh_<login>` for GitHub, `<source>_<id>` otherwise.
pub(crate) fn person_id(profile: &RawProfile) -> String {
    if profile.source == GITHUB_SOURCE {
        format!("gh_{}", profile.source_id)
    } else {
        format!("{}_{}", profile.source, profile.source_id)
    }
}

fn person_from_profile(
    profile: &RawProfile,
    operator_score: f64,
    angel_score: f64,
    evidence: Evidence,
) -> Person {
    let mut person = Person::new(
        person_id(profile),
        profile.name.clone(),
        profile.profile_url.clone(),
        profile.source.clone(),
        operator_score,
        angel_score,
    );
    person.evidence = vec![evidence];
    person.social_links.clone_from(&profile.social_links);
    person.last_activity = profile.metadata.last_activity();
    person
}

fn harvest_evidence(profile: &RawProfile) -> Evidence {
    let text = match &profile.metadata {
        ProfileMetadata::Github(meta) => format!("GitHub: {} repos", meta.repos.len()),
        ProfileMetadata::None => format!("Harvested from {}", profile.source),
    };
    Evidence::new(
        profile.source.clone(),
        text,
        profile.profile_url.clone(),
        IsoTimestamp::now(),
    )
}

/// Score every profile with the heuristics. Profiles whose angel signal is
/// borderline are set aside for the judge instead of becoming people.
pub(crate) fn score_profiles(profiles: Vec<RawProfile>) -> ScoredProfiles {
    let mut scored = ScoredProfiles::default();

    for profile in profiles {
        let signal = classify_angel_signal(&profile);
        let Some(angel_score) = signal.heuristic_score() else {
            scored.borderline.push(profile);
            continue;
        };
        let operator_score = calculate_operator_score(&profile);
        tracing::debug!(
            source_id = %profile.source_id,
            %signal,
            operator_score,
            "profile scored"
        );
        let evidence = harvest_evidence(&profile);
        scored
            .people
            .push(person_from_profile(&profile, operator_score, angel_score, evidence));
    }

    scored
}

fn judged_person(profile: &RawProfile, judgment: Judgment) -> Person {
    let evidence = Evidence::new(
        JUDGE_SOURCE,
        judgment.evidence.join("; "),
        profile.profile_url.clone(),
        IsoTimestamp::now(),
    );
    person_from_profile(profile, judgment.operator_score, judgment.angel_score, evidence)
}

/// Route borderline profiles through `judge`.
///
/// # Errors
///
/// Fails if there are borderline profiles but no judge, or if any batch
/// fails or comes back misaligned.
pub(crate) async fn judge_borderline(
    judge: Option<&dyn Judge>,
    borderline: Vec<RawProfile>,
    batch_size: usize,
) -> anyhow::Result<Vec<Person>> {
    if borderline.is_empty() {
        return Ok(Vec::new());
    }
    let Some(judge) = judge else {
        anyhow::bail!(
            "{} borderline profiles found but no judge is configured (set BH_JUDGE_URL)",
            borderline.len()
        );
    };

    let judged = classify_borderline(judge, borderline, batch_size)
        .await
        .context("borderline classification failed")?;

    Ok(judged
        .into_iter()
        .map(|(profile, judgment)| judged_person(&profile, judgment))
        .collect())
}

/// Harvest live, attributing failures to the harvester's source.
pub(crate) async fn harvest_profiles(
    harvester: &dyn Harvester,
    request: &HarvestRequest,
) -> anyhow::Result<Vec<RawProfile>> {
    harvester
        .harvest(request)
        .await
        .with_context(|| format!("{} harvest failed", harvester.source()))
}

/// Stages 2 to 5 of the run, up to (not including) the export itself.
/// Returns the qualified leads in pipeline order.
///
/// # Errors
///
/// Propagates judge failures; see [`judge_borderline`].
pub(crate) async fn run_pipeline(
    profiles: Vec<RawProfile>,
    judge: Option<&dyn Judge>,
    batch_size: usize,
    thresholds: Thresholds,
) -> anyhow::Result<Vec<Person>> {
    println!("\n[2/5] Scoring profiles...");
    let ScoredProfiles {
        mut people,
        borderline,
    } = score_profiles(profiles);
    println!(
        "  {} scored heuristically, {} borderline",
        people.len(),
        borderline.len()
    );

    if borderline.is_empty() {
        println!("\n[3/5] No borderline cases, skipping judge");
    } else {
        println!(
            "\n[3/5] Classifying {} borderline profiles with judge...",
            borderline.len()
        );
        people.extend(judge_borderline(judge, borderline, batch_size).await?);
    }

    println!("\n[4/5] Checking for duplicates...");
    let before = people.len();
    let people = resolve_identities(people);
    println!("  Merged {} duplicate records", before - people.len());

    println!("\n[5/5] Filtering and exporting...");
    let qualified: Vec<Person> = people
        .into_iter()
        .filter(|p| thresholds.qualifies(p))
        .collect();
    tracing::info!(qualified = qualified.len(), %thresholds, "leads filtered");

    Ok(qualified)
}

fn build_judge(config: &AppConfig) -> anyhow::Result<Option<HttpJudge>> {
    let Some(url) = config.judge_url.as_deref() else {
        return Ok(None);
    };
    let judge = HttpJudge::new(
        url,
        config.judge_api_key.as_deref(),
        config.request_timeout_secs,
        &config.user_agent,
    )
    .context("failed to build judge client")?
    .with_retries(config.max_retries, config.retry_backoff_base_secs);
    Ok(Some(judge))
}

pub(crate) async fn run_command(config: &AppConfig, args: &RunArgs) -> anyhow::Result<()> {
    println!("Running full pipeline...");

    let profiles = match &args.raw {
        Some(path) => {
            println!("\n[1/5] Loading saved harvest {}...", path.display());
            read_raw_profiles(path)?
        }
        None => {
            println!("\n[1/5] Harvesting GitHub...");
            let harvester = build_github_harvester(config)?;
            let request = HarvestRequest {
                topics: args.topics.clone(),
                min_stars: args.min_stars,
                enrich: args.enrich,
            };
            harvest_profiles(&harvester, &request).await?
        }
    };
    println!("  Found {} profiles", profiles.len());

    let judge = build_judge(config)?;
    let qualified = run_pipeline(
        profiles,
        judge.as_ref().map(|j| j as &dyn Judge),
        config.judge_batch_size,
        args.thresholds,
    )
    .await?;

    let out = args
        .out
        .clone()
        .unwrap_or_else(|| dated_path(&config.out_dir, "notion_import", "csv", today()));
    export_leads_csv(&out, &qualified)?;

    println!("\nDone! Exported {} leads -> {}", qualified.len(), out.display());
    println!("   Operator threshold: {}", args.thresholds.operator);
    println!("   Angel threshold: {}", args.thresholds.angel);
    Ok(())
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
