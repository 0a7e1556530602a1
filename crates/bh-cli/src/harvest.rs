//! `harvest-gh` command and the raw-harvest JSON files it writes.

use std::path::{Path, PathBuf};

use anyhow::Context;
use bh_core::{AppConfig, RawProfile};
use bh_harvest::{GitHubHarvester, HarvestRequest, Harvester};
use chrono::NaiveDate;

/// `<dir>/<prefix>_<YYYY-MM-DD>.<ext>`
pub(crate) fn dated_path(dir: &Path, prefix: &str, ext: &str, date: NaiveDate) -> PathBuf {
    dir.join(format!("{prefix}_{}.{ext}", date.format("%Y-%m-%d")))
}

pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub(crate) fn build_github_harvester(config: &AppConfig) -> anyhow::Result<GitHubHarvester> {
    if config.github_token.is_none() {
        tracing::warn!("GITHUB_TOKEN is not set; unauthenticated requests have a low rate limit");
    }
    GitHubHarvester::from_config(config).context("failed to build GitHub client")
}

/// Write profiles as pretty-printed JSON, creating parent directories.
pub(crate) fn write_raw_profiles(path: &Path, profiles: &[RawProfile]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(profiles).context("failed to serialize profiles")?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

/// Read a file written by [`write_raw_profiles`]. URLs and timestamps are
/// re-validated on load.
pub(crate) fn read_raw_profiles(path: &Path) -> anyhow::Result<Vec<RawProfile>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("invalid harvest file {}", path.display()))
}

pub(crate) async fn run_harvest_gh(
    config: &AppConfig,
    topics: Vec<String>,
    min_stars: u32,
    enrich: bool,
) -> anyhow::Result<()> {
    println!("Harvesting GitHub for topics: {}", topics.join(","));

    let harvester = build_github_harvester(config)?;
    let request = HarvestRequest {
        topics,
        min_stars,
        enrich,
    };
    let profiles = harvester
        .harvest(&request)
        .await
        .context("GitHub harvest failed")?;

    let path = dated_path(&config.raw_dir, "gh", "json", today());
    write_raw_profiles(&path, &profiles)?;

    println!("Harvested {} GitHub profiles -> {}", profiles.len(), path.display());
    Ok(())
}
