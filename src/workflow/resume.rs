//! Resume-step inference
//!
//! The most advanced completed stage wins. Rules are evaluated top to bottom
//! and the first match decides; a new stage is added by inserting one row
//! at its priority position in [`RESUME_RULES`].

use super::artifacts::PlanningFiles;
use super::steps::FIRST_WORKFLOW_STEP;
use crate::sections::{SectionProgress, SectionState};

/// Where a paused workflow should continue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumePoint {
    /// Step to resume at; `None` once every section is written
    pub step: Option<u32>,
    /// What was last completed, for the resume message
    pub last_completed: String,
}

impl ResumePoint {
    pub fn is_complete(&self) -> bool {
        self.step.is_none()
    }
}

enum Label {
    Fixed(&'static str),
    /// "sections {progress}, next: {next_section}"
    SectionProgress,
}

struct ResumeRule {
    applies: fn(&PlanningFiles, &SectionProgress) -> bool,
    step: Option<u32>,
    label: Label,
}

const RESUME_RULES: &[ResumeRule] = &[
    ResumeRule {
        applies: sections_complete,
        step: None,
        label: Label::Fixed("complete"),
    },
    ResumeRule {
        applies: sections_in_progress,
        step: Some(19),
        label: Label::SectionProgress,
    },
    ResumeRule {
        applies: has_section_files,
        step: Some(18),
        label: Label::Fixed("section files exist but no index"),
    },
    ResumeRule {
        applies: has_plan_tdd,
        step: Some(17),
        label: Label::Fixed("TDD plan complete"),
    },
    ResumeRule {
        applies: has_integration_notes,
        step: Some(15),
        label: Label::Fixed("feedback integrated"),
    },
    ResumeRule {
        applies: has_reviews,
        step: Some(14),
        label: Label::Fixed("external review complete"),
    },
    ResumeRule {
        applies: has_plan,
        step: Some(12),
        label: Label::Fixed("implementation plan complete"),
    },
    ResumeRule {
        applies: has_spec,
        step: Some(11),
        label: Label::Fixed("spec complete"),
    },
    ResumeRule {
        applies: has_interview,
        step: Some(10),
        label: Label::Fixed("interview complete"),
    },
    ResumeRule {
        applies: has_research,
        step: Some(8),
        label: Label::Fixed("research complete"),
    },
];

fn sections_complete(files: &PlanningFiles, progress: &SectionProgress) -> bool {
    files.sections_index && progress.state == SectionState::Complete
}

fn sections_in_progress(files: &PlanningFiles, progress: &SectionProgress) -> bool {
    files.sections_index
        && matches!(
            progress.state,
            SectionState::Partial | SectionState::HasIndex
        )
}

fn has_section_files(files: &PlanningFiles, _: &SectionProgress) -> bool {
    !files.sections.is_empty()
}

fn has_plan_tdd(files: &PlanningFiles, _: &SectionProgress) -> bool {
    files.plan_tdd
}

fn has_integration_notes(files: &PlanningFiles, _: &SectionProgress) -> bool {
    files.integration_notes
}

fn has_reviews(files: &PlanningFiles, _: &SectionProgress) -> bool {
    !files.reviews.is_empty()
}

fn has_plan(files: &PlanningFiles, _: &SectionProgress) -> bool {
    files.plan
}

fn has_spec(files: &PlanningFiles, _: &SectionProgress) -> bool {
    files.spec
}

fn has_interview(files: &PlanningFiles, _: &SectionProgress) -> bool {
    files.interview
}

fn has_research(files: &PlanningFiles, _: &SectionProgress) -> bool {
    files.research
}

/// Infer which step to resume from.
///
/// Returns step `None` with label `"complete"` when every section is
/// written, and step 6 with label `"none"` for a fresh start.
pub fn infer_resume_step(files: &PlanningFiles, progress: &SectionProgress) -> ResumePoint {
    RESUME_RULES
        .iter()
        .find(|rule| (rule.applies)(files, progress))
        .map(|rule| ResumePoint {
            step: rule.step,
            last_completed: match rule.label {
                Label::Fixed(text) => text.to_string(),
                Label::SectionProgress => format!(
                    "sections {}, next: {}",
                    progress.progress,
                    progress.next_section.as_deref().unwrap_or("None")
                ),
            },
        })
        .unwrap_or_else(|| ResumePoint {
            step: Some(FIRST_WORKFLOW_STEP),
            last_completed: "none".to_string(),
        })
}
