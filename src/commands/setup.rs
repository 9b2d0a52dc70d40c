//! Set up or resume a planning session from a spec file
//! Usage: deep-plan setup-session --file <spec> --plugin-root <dir>
//!
//! The planning directory is always the spec file's parent. Existing
//! workflow artifacts decide whether this is a new session, a resumed
//! one, or one that has already finished.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use super::CommandOutput;
use crate::fs::{get_or_create_session_config, PlanningDir};
use crate::sections::{check_section_progress, SectionProgress};
use crate::workflow::steps::{FINAL_STEP, FIRST_WORKFLOW_STEP};
use crate::workflow::{
    build_files_summary, generate_todos, infer_resume_step, scan_planning_files, step_name,
    PlanningFiles, ResumePoint, TodoContext, TodoItem,
};

/// Why a spec file cannot start a session
#[derive(Debug, Error)]
pub enum SpecFileError {
    #[error("Spec file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Expected a spec file, got a directory: {}", .0.display())]
    IsDirectory(PathBuf),

    #[error("Spec file is empty: {}", .0.display())]
    Empty(PathBuf),
}

/// Check that the spec file exists, is a regular file and has content.
pub fn validate_spec_file(path: &Path) -> Result<(), SpecFileError> {
    let Ok(metadata) = fs::metadata(path) else {
        return Err(SpecFileError::NotFound(path.to_path_buf()));
    };
    if metadata.is_dir() {
        return Err(SpecFileError::IsDirectory(path.to_path_buf()));
    }
    if metadata.len() == 0 {
        return Err(SpecFileError::Empty(path.to_path_buf()));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    New,
    Resume,
    Complete,
}

impl SessionMode {
    /// A session is new only when it would start at the first workflow step
    /// and nothing was found on disk.
    pub fn determine(resume: &ResumePoint, files_summary: &[String]) -> Self {
        match resume.step {
            None => SessionMode::Complete,
            Some(step) if step == FIRST_WORKFLOW_STEP && files_summary.is_empty() => {
                SessionMode::New
            }
            Some(_) => SessionMode::Resume,
        }
    }

    /// Action name kept in `state_check`; a new session is reported as fresh
    pub fn recommended_action(&self) -> &'static str {
        match self {
            SessionMode::New => "fresh",
            SessionMode::Resume => "resume",
            SessionMode::Complete => "complete",
        }
    }
}

/// User-facing summary line for the session
pub fn build_message(mode: SessionMode, resume: &ResumePoint, planning_dir: &Path) -> String {
    match (mode, resume.step) {
        (SessionMode::Resume, Some(step)) => format!(
            "Resuming from step {step} ({}). Last completed: {}",
            step_name(step),
            resume.last_completed
        ),
        (SessionMode::Complete, _) | (SessionMode::Resume, None) => {
            "Planning workflow complete - all sections written".to_string()
        }
        (SessionMode::New, _) => format!(
            "Starting new planning session in: {}",
            planning_dir.display()
        ),
    }
}

/// What was found in the planning directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateCheck {
    pub planning_dir_exists: bool,
    pub planning_dir: String,
    pub files_found: PlanningFiles,
    pub files_summary: Vec<String>,
    pub recommended_action: String,
    pub resume_from_step: Option<u32>,
    pub message: String,
    pub section_progress: SectionProgress,
}

/// Successful setup result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupReport {
    pub success: bool,
    pub mode: SessionMode,
    pub planning_dir: String,
    pub initial_file: String,
    pub plugin_root: String,
    pub resume_from_step: Option<u32>,
    pub config_created: bool,
    pub message: String,
    pub state_check: StateCheck,
    pub section_progress: SectionProgress,
    pub todos: Vec<TodoItem>,
}

/// Rejected setup; `mode` is always `"error"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupFailure {
    pub success: bool,
    pub error: String,
    pub mode: String,
}

impl SetupFailure {
    fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            mode: "error".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupOutcome {
    Ready(Box<SetupReport>),
    Rejected(SetupFailure),
}

/// Set up a session for an absolute spec file path.
///
/// Bad input (missing, directory, or empty spec; unusable session config)
/// is a [`SetupOutcome::Rejected`]; I/O failures while scanning are errors.
pub fn setup_session(file_path: &Path, plugin_root: &Path) -> Result<SetupOutcome> {
    if let Err(e) = validate_spec_file(file_path) {
        return Ok(SetupOutcome::Rejected(SetupFailure::new(e.to_string())));
    }

    let planning_dir = file_path
        .parent()
        .context("Spec file has no parent directory")?;

    let (session_config, config_created) =
        match get_or_create_session_config(planning_dir, plugin_root, file_path) {
            Ok(result) => result,
            Err(e) => {
                return Ok(SetupOutcome::Rejected(SetupFailure::new(format!(
                    "Session config error: {e}"
                ))))
            }
        };

    let files_found = scan_planning_files(planning_dir)?;
    let section_progress = check_section_progress(planning_dir)?;
    let resume = infer_resume_step(&files_found, &section_progress);
    let files_summary = build_files_summary(&files_found, &section_progress);

    let mode = SessionMode::determine(&resume, &files_summary);
    let message = build_message(mode, &resume, planning_dir);
    debug!(
        "Session in {} is {:?}, resume step {:?}",
        planning_dir.display(),
        mode,
        resume.step
    );

    let planning_dir_str = planning_dir.to_string_lossy().into_owned();
    let initial_file = file_path.to_string_lossy().into_owned();
    let plugin_root_str = plugin_root.to_string_lossy().into_owned();

    let context = TodoContext {
        plugin_root: Some(plugin_root_str.clone()),
        planning_dir: Some(planning_dir_str.clone()),
        initial_file: Some(initial_file.clone()),
        context_check_enabled: Some(session_config.check_enabled()),
    };
    let todos = generate_todos(resume.step.unwrap_or(FINAL_STEP), None, &context);

    let state_check = StateCheck {
        planning_dir_exists: PlanningDir::new(planning_dir).exists(),
        planning_dir: planning_dir_str.clone(),
        files_found,
        files_summary,
        recommended_action: mode.recommended_action().to_string(),
        resume_from_step: resume.step,
        message: message.clone(),
        section_progress: section_progress.clone(),
    };

    info!("{message}");

    Ok(SetupOutcome::Ready(Box::new(SetupReport {
        success: true,
        mode,
        planning_dir: planning_dir_str,
        initial_file,
        plugin_root: plugin_root_str,
        resume_from_step: resume.step,
        config_created,
        message,
        state_check,
        section_progress,
        todos,
    })))
}

/// Execute the setup-session command
///
/// # Arguments
/// * `file` - Spec file; relative paths resolve against the current directory
/// * `plugin_root` - Plugin installation holding the global `config.json`
pub fn execute(file: &Path, plugin_root: &Path) -> Result<CommandOutput> {
    let file_path = if file.is_absolute() {
        file.to_path_buf()
    } else {
        std::env::current_dir()
            .context("Failed to determine current directory")?
            .join(file)
    };

    match setup_session(&file_path, plugin_root)? {
        SetupOutcome::Ready(report) => CommandOutput::new(&report, true),
        SetupOutcome::Rejected(failure) => CommandOutput::new(&failure, false),
    }
}
