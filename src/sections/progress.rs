//! Section-splitting progress
//!
//! Combines the index manifest with the section files present on disk to
//! decide where the section-writing stage stands. Nothing here is cached:
//! every call re-reads the directory, so two calls against an unchanged
//! filesystem return identical records.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use tracing::{debug, warn};

use super::manifest::{check_index_format, IndexFormat};
use crate::fs::PlanningDir;

/// Leading ASCII digit run of a section file name, any width
static SECTION_FILE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^section-([0-9]+)").expect("section file pattern is valid"));

/// Where the section-splitting stage stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionState {
    /// No sections directory, or nothing in it yet
    Fresh,
    /// index.md exists but its manifest block is missing or malformed
    InvalidIndex,
    /// Valid manifest, no section written
    HasIndex,
    /// Valid manifest, some sections written
    Partial,
    /// Valid manifest, every defined section written
    Complete,
}

impl SectionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionState::Fresh => "fresh",
            SectionState::InvalidIndex => "invalid_index",
            SectionState::HasIndex => "has_index",
            SectionState::Partial => "partial",
            SectionState::Complete => "complete",
        }
    }
}

impl fmt::Display for SectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of section-writing progress for one planning directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionProgress {
    pub state: SectionState,
    pub index_exists: bool,
    /// Sections declared by the manifest, in manifest order
    pub defined_sections: Vec<String>,
    /// Section files on disk (extension stripped), ordered by number
    pub completed_sections: Vec<String>,
    /// Defined sections without a file, in manifest order
    pub missing_sections: Vec<String>,
    pub next_section: Option<String>,
    /// `"{completed}/{defined}"`
    pub progress: String,
    /// Raw manifest diagnostic for surfacing parse errors
    pub index_format: IndexFormat,
}

/// Section files (without `.md`) in `sections_dir`, sorted by section number.
///
/// Unlike manifest validation, the number may be any width here:
/// `section-1-setup.md` and `section-001-setup.md` are both picked up.
pub fn get_completed_sections(sections_dir: &Path) -> Result<Vec<String>> {
    if !sections_dir.is_dir() {
        return Ok(Vec::new());
    }

    let pattern = format!(
        "{}/section-*.md",
        glob::Pattern::escape(&sections_dir.to_string_lossy())
    );

    let mut completed: Vec<(u64, String)> = Vec::new();
    for entry in glob::glob(&pattern).context("Invalid section file pattern")? {
        let path = entry.with_context(|| {
            format!(
                "Failed to read sections directory: {}",
                sections_dir.display()
            )
        })?;

        if !path.is_file() {
            continue;
        }

        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        match section_file_number(stem) {
            Some(number) => completed.push((number, stem.to_string())),
            None => warn!("Ignoring section file without a number: {}", path.display()),
        }
    }

    // glob yields paths alphabetically; the stable sort keeps that as tie-break
    completed.sort_by_key(|(number, _)| *number);

    Ok(completed.into_iter().map(|(_, name)| name).collect())
}

fn section_file_number(stem: &str) -> Option<u64> {
    SECTION_FILE_NUMBER
        .captures(stem)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Check section-splitting progress for a planning directory.
pub fn check_section_progress(planning_dir: &Path) -> Result<SectionProgress> {
    let dir = PlanningDir::new(planning_dir);
    let sections_dir = dir.sections_dir();
    let index_path = dir.index_path();

    let sections_dir_exists = sections_dir.is_dir();
    let index_exists = index_path.exists();

    let index_format = if index_exists {
        check_index_format(&index_path)?
    } else {
        IndexFormat::absent()
    };

    let completed_sections = if sections_dir_exists {
        get_completed_sections(&sections_dir)?
    } else {
        Vec::new()
    };

    let defined_sections = index_format.sections.clone();
    let completed_set: HashSet<&str> = completed_sections.iter().map(String::as_str).collect();
    let missing_sections: Vec<String> = defined_sections
        .iter()
        .filter(|s| !completed_set.contains(s.as_str()))
        .cloned()
        .collect();

    let state = derive_state(
        sections_dir_exists,
        index_exists,
        index_format.manifest_valid,
        &defined_sections,
        &completed_sections,
        &missing_sections,
    );

    let progress = if defined_sections.is_empty() {
        "0/0".to_string()
    } else {
        format!("{}/{}", completed_sections.len(), defined_sections.len())
    };

    debug!(
        planning_dir = %planning_dir.display(),
        state = %state,
        progress = %progress,
        "Checked section progress"
    );

    Ok(SectionProgress {
        state,
        index_exists,
        next_section: missing_sections.first().cloned(),
        defined_sections,
        completed_sections,
        missing_sections,
        progress,
        index_format,
    })
}

/// Map the observed facts onto exactly one state. Anything not matched by
/// an explicit rule is `Fresh`.
fn derive_state(
    sections_dir_exists: bool,
    index_exists: bool,
    manifest_valid: bool,
    defined: &[String],
    completed: &[String],
    missing: &[String],
) -> SectionState {
    if !sections_dir_exists || (!index_exists && completed.is_empty()) {
        SectionState::Fresh
    } else if index_exists && !manifest_valid {
        SectionState::InvalidIndex
    } else if index_exists && completed.is_empty() {
        SectionState::HasIndex
    } else if index_exists && !missing.is_empty() {
        SectionState::Partial
    } else if index_exists && !defined.is_empty() {
        SectionState::Complete
    } else {
        SectionState::Fresh
    }
}
