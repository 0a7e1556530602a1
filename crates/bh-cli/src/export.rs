//! Notion-importable CSV export.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use bh_core::{IsoTimestamp, Person};

pub(crate) const CSV_HEADERS: [&str; 6] = [
    "Name",
    "Primary URL",
    "Operator Score",
    "Angel Score",
    "Evidence Summary",
    "Last Activity",
];

/// Evidence texts shown per lead.
const MAX_SUMMARY_EVIDENCE: usize = 3;

pub(crate) fn evidence_summary(person: &Person) -> String {
    person
        .evidence
        .iter()
        .take(MAX_SUMMARY_EVIDENCE)
        .map(|e| e.text.as_str())
        .collect::<Vec<_>>()
        .join(". ")
}

/// Write one row per person, in input order, after a header row.
pub(crate) fn write_leads_csv<W: Write>(writer: W, people: &[Person]) -> Result<(), csv::Error> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(CSV_HEADERS)?;

    for person in people {
        let operator = format!("{:.2}", person.operator_score.value());
        let angel = format!("{:.2}", person.angel_score.value());
        let summary = evidence_summary(person);
        csv.write_record([
            person.name.as_str(),
            person.primary_url.as_str(),
            operator.as_str(),
            angel.as_str(),
            summary.as_str(),
            person.last_activity.as_ref().map_or("", IsoTimestamp::as_str),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

/// Export `people` to `path`, creating parent directories.
pub(crate) fn export_leads_csv(path: &Path, people: &[Person]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    write_leads_csv(file, people).with_context(|| format!("failed to write {}", path.display()))
}
