//! Check section-writing progress
//! Usage: deep-plan check-sections --planning-dir <dir>

use anyhow::Result;
use std::path::Path;

use super::CommandOutput;
use crate::sections::check_section_progress;

/// Execute the check-sections command
pub fn execute(planning_dir: &Path) -> Result<CommandOutput> {
    let progress = check_section_progress(planning_dir)?;
    CommandOutput::new(&progress, true)
}
