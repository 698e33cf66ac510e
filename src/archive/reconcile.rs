use std::collections::BTreeSet;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::archive::manifest::Manifest;
use crate::error::{ManifestError, PruneError};

pub const PDF_SUFFIX: &str = ".pdf";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrunePlan {
    pub kept: Vec<OsString>,
    pub doomed: Vec<OsString>,
}

#[derive(Debug, Default)]
pub struct PruneOutcome {
    pub deleted: Vec<String>,
    pub skipped: Vec<PruneError>,
}

/// Titles of every record that carries a `file_link`.
pub fn expected_filenames(manifest: &Manifest, source: &Path) -> Result<BTreeSet<String>> {
    let mut expected = BTreeSet::new();
    for (index, record) in manifest.records().iter().enumerate() {
        if !record.has_file_link() {
            continue;
        }
        let Some(title) = record.title() else {
            return Err(ManifestError::shape(
                source,
                format!("entry {index} has file_link but no string title"),
            )
            .into());
        };
        expected.insert(title.to_string());
    }
    Ok(expected)
}

/// Case-sensitive; strips exactly one trailing `.pdf`.
pub fn pdf_base_name(file_name: &str) -> Option<&str> {
    file_name.strip_suffix(PDF_SUFFIX)
}

/// A name that is not UTF-8 can never equal a JSON title, so it is only
/// kept when its UTF-8 base is expected.
fn is_expected(name: &OsStr, expected: &BTreeSet<String>) -> Option<bool> {
    if !name.as_encoded_bytes().ends_with(PDF_SUFFIX.as_bytes()) {
        return None;
    }
    Some(
        name.to_str()
            .and_then(pdf_base_name)
            .is_some_and(|base| expected.contains(base)),
    )
}

pub fn plan_prune(dir: &Path, expected: &BTreeSet<String>) -> Result<PrunePlan> {
    let read_dir =
        fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))?;

    let mut plan = PrunePlan::default();
    for entry in read_dir {
        let entry = entry.with_context(|| format!("failed to list {}", dir.display()))?;
        let name = entry.file_name();
        match is_expected(&name, expected) {
            Some(true) => plan.kept.push(name),
            Some(false) => plan.doomed.push(name),
            None => {}
        }
    }

    plan.kept.sort();
    plan.doomed.sort();
    tracing::debug!(
        dir = %dir.display(),
        kept = plan.kept.len(),
        doomed = plan.doomed.len(),
        "prune plan computed"
    );
    Ok(plan)
}

fn entry_path(dir: &Path, name: &OsStr) -> PathBuf {
    dir.join(name)
}

/// `announce` runs before each removal so the caller can report the file
/// even if the removal then fails.
pub fn apply_prune(
    dir: &Path,
    plan: &PrunePlan,
    mut announce: impl FnMut(&str),
) -> Result<PruneOutcome> {
    let mut outcome = PruneOutcome::default();
    for name in &plan.doomed {
        let shown = name.to_string_lossy().into_owned();
        announce(&shown);
        let path = entry_path(dir, name);
        match fs::remove_file(&path) {
            Ok(()) => outcome.deleted.push(shown),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                let race = PruneError::Race { name: shown };
                tracing::warn!(path = %path.display(), "{race}");
                outcome.skipped.push(race);
            }
            Err(err) => {
                return Err(err).with_context(|| format!("failed to delete {}", path.display()));
            }
        }
    }
    Ok(outcome)
}
