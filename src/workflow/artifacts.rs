//! Workflow artifacts present in a planning directory
//!
//! Each completed workflow stage leaves a file behind. Their presence is all
//! the resume logic needs to know where a paused session left off.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::fs::PlanningDir;
use crate::sections::{SectionProgress, SectionState};

pub const RESEARCH_FILE: &str = "claude-research.md";
pub const INTERVIEW_FILE: &str = "claude-interview.md";
pub const SPEC_FILE: &str = "claude-spec.md";
pub const PLAN_FILE: &str = "claude-plan.md";
pub const INTEGRATION_NOTES_FILE: &str = "claude-integration-notes.md";
pub const PLAN_TDD_FILE: &str = "claude-plan-tdd.md";

/// Which workflow artifacts exist
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningFiles {
    pub research: bool,
    pub interview: bool,
    pub spec: bool,
    pub plan: bool,
    pub integration_notes: bool,
    pub plan_tdd: bool,
    /// File names under `reviews/`
    pub reviews: Vec<String>,
    /// `section-*.md` file names under `sections/`
    pub sections: Vec<String>,
    pub sections_index: bool,
}

/// Scan a planning directory for existing workflow artifacts.
pub fn scan_planning_files(planning_dir: &Path) -> Result<PlanningFiles> {
    let dir = PlanningDir::new(planning_dir);

    let sections_dir = dir.sections_dir();
    let (sections, sections_index) = if sections_dir.exists() {
        (
            list_file_names(&sections_dir, "section-*.md")?,
            dir.index_path().exists(),
        )
    } else {
        (Vec::new(), false)
    };

    let reviews_dir = dir.reviews_dir();
    let reviews = if reviews_dir.exists() {
        list_file_names(&reviews_dir, "*.md")?
    } else {
        Vec::new()
    };

    Ok(PlanningFiles {
        research: dir.file(RESEARCH_FILE).exists(),
        interview: dir.file(INTERVIEW_FILE).exists(),
        spec: dir.file(SPEC_FILE).exists(),
        plan: dir.file(PLAN_FILE).exists(),
        integration_notes: dir.file(INTEGRATION_NOTES_FILE).exists(),
        plan_tdd: dir.file(PLAN_TDD_FILE).exists(),
        reviews,
        sections,
        sections_index,
    })
}

fn list_file_names(dir: &Path, file_pattern: &str) -> Result<Vec<String>> {
    let pattern = format!(
        "{}/{file_pattern}",
        glob::Pattern::escape(&dir.to_string_lossy())
    );

    let mut names = Vec::new();
    for entry in glob::glob(&pattern).context("Invalid artifact pattern")? {
        let path = entry.with_context(|| format!("Failed to read directory: {}", dir.display()))?;
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

/// Human-readable list of what was found, for the setup report.
pub fn build_files_summary(
    files: &PlanningFiles,
    section_progress: &SectionProgress,
) -> Vec<String> {
    let mut summary: Vec<String> = [
        (files.research, RESEARCH_FILE),
        (files.interview, INTERVIEW_FILE),
        (files.spec, SPEC_FILE),
        (files.plan, PLAN_FILE),
        (files.integration_notes, INTEGRATION_NOTES_FILE),
        (files.plan_tdd, PLAN_TDD_FILE),
    ]
    .into_iter()
    .filter(|(present, _)| *present)
    .map(|(_, name)| name.to_string())
    .collect();

    if !files.reviews.is_empty() {
        summary.push(format!("reviews/ ({} files)", files.reviews.len()));
    }

    if !files.sections.is_empty() || files.sections_index {
        let progress = &section_progress.progress;
        let state = section_progress.state;
        if state == SectionState::Complete {
            summary.push(format!("sections/ ({progress} complete)"));
        } else if files.sections_index {
            summary.push(format!("sections/ ({progress}, {state})"));
        } else {
            summary.push(format!(
                "sections/ ({} files, no index)",
                files.sections.len()
            ));
        }
    }

    summary
}
