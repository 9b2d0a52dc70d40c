//! Generate the TODO list with one item per section
//! Usage: deep-plan generate-section-todos --planning-dir <dir>

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::CommandOutput;
use crate::fs::{load_session_config, SessionConfig};
use crate::sections::{check_section_progress, SectionState};
use crate::workflow::steps::GENERATE_SECTION_TODOS_STEP;
use crate::workflow::{generate_section_todo_items, generate_todos, TodoContext, TodoItem};

/// State reported when the session config cannot be loaded
pub const CONFIG_ERROR_STATE: &str = "error";

/// Result of section TODO generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionTodosReport {
    pub success: bool,
    pub error: Option<String>,
    pub todos: Vec<TodoItem>,
    /// A section state, or `"error"` when the session config is unusable
    pub state: String,
    pub total_sections: usize,
    /// Number of section files already written
    pub completed_sections: usize,
    pub missing_sections: Vec<String>,
}

impl SectionTodosReport {
    fn failure(state: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            todos: Vec::new(),
            state: state.into(),
            total_sections: 0,
            completed_sections: 0,
            missing_sections: Vec::new(),
        }
    }
}

fn todo_context(config: &SessionConfig) -> TodoContext {
    TodoContext {
        plugin_root: config.plugin_root.clone(),
        planning_dir: config.planning_dir.clone(),
        initial_file: config.initial_file.clone(),
        context_check_enabled: Some(config.check_enabled()),
    }
}

/// Build the TODO list for the section-writing stage.
///
/// Fails when there is no index yet or the index manifest is invalid.
/// Once every section is written the placeholders are kept as-is.
pub fn generate_section_todos(
    planning_dir: &Path,
    config: &SessionConfig,
) -> Result<SectionTodosReport> {
    let progress = check_section_progress(planning_dir)?;
    let state = progress.state;
    let context = todo_context(config);

    let report = match state {
        SectionState::Fresh => SectionTodosReport::failure(
            state.as_str(),
            "No sections/index.md found. Create the section index first (step 18).",
        ),
        SectionState::InvalidIndex => {
            let reason = progress
                .index_format
                .error
                .as_deref()
                .unwrap_or("SECTION_MANIFEST block is invalid");
            SectionTodosReport::failure(state.as_str(), format!("Invalid index.md: {reason}"))
        }
        SectionState::Complete => SectionTodosReport {
            success: true,
            error: None,
            todos: generate_todos(GENERATE_SECTION_TODOS_STEP, None, &context),
            state: state.to_string(),
            total_sections: progress.defined_sections.len(),
            completed_sections: progress.completed_sections.len(),
            missing_sections: Vec::new(),
        },
        SectionState::HasIndex | SectionState::Partial => {
            let section_todos = generate_section_todo_items(
                &progress.defined_sections,
                &progress.completed_sections,
            );
            SectionTodosReport {
                success: true,
                error: None,
                todos: generate_todos(
                    GENERATE_SECTION_TODOS_STEP,
                    Some(section_todos.as_slice()),
                    &context,
                ),
                state: state.to_string(),
                total_sections: progress.defined_sections.len(),
                completed_sections: progress.completed_sections.len(),
                missing_sections: progress.missing_sections,
            }
        }
    };

    Ok(report)
}

/// Execute the generate-section-todos command
pub fn execute(planning_dir: &Path) -> Result<CommandOutput> {
    let config = match load_session_config(planning_dir) {
        Ok(config) => config,
        Err(e) => {
            let report = SectionTodosReport::failure(
                CONFIG_ERROR_STATE,
                format!("Session config not found. Run setup-session first. Error: {e}"),
            );
            return CommandOutput::new(&report, false);
        }
    };

    let report = generate_section_todos(planning_dir, &config)?;
    let success = report.success;
    CommandOutput::new(&report, success)
}
