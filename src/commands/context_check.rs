//! Decide whether to offer context compaction before an expensive step
//! Usage: deep-plan check-context --planning-dir <dir> --upcoming-operation <name>

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::CommandOutput;
use crate::fs::{load_session_config, ConfigError, SessionConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextAction {
    Prompt,
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptOption {
    pub label: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextPrompt {
    pub message: String,
    pub options: Vec<PromptOption>,
}

impl ContextPrompt {
    fn for_operation(upcoming_operation: &str) -> Self {
        Self {
            message: format!(
                "Next step is: {upcoming_operation}\n\n\
                 If your context is high, now is a good time to /compact."
            ),
            options: vec![
                PromptOption {
                    label: "Continue".to_string(),
                    description: "Proceed with the operation".to_string(),
                },
                PromptOption {
                    label: "Compact first".to_string(),
                    description: "Run /compact, then say 'continue' to resume".to_string(),
                },
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextDecision {
    pub action: ContextAction,
    pub reason: String,
    pub check_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<ContextPrompt>,
}

/// Decide from the loaded session config. An unreadable config still
/// prompts.
pub fn decide(
    config: Result<SessionConfig, ConfigError>,
    upcoming_operation: &str,
) -> ContextDecision {
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            return ContextDecision {
                action: ContextAction::Prompt,
                reason: format!("Config error ({e}), defaulting to prompt"),
                check_enabled: true,
                prompt: Some(ContextPrompt::for_operation(upcoming_operation)),
            }
        }
    };

    if !config.check_enabled() {
        return ContextDecision {
            action: ContextAction::Skip,
            reason: "Context prompts disabled in config".to_string(),
            check_enabled: false,
            prompt: None,
        };
    }

    ContextDecision {
        action: ContextAction::Prompt,
        reason: "Context prompts enabled".to_string(),
        check_enabled: true,
        prompt: Some(ContextPrompt::for_operation(upcoming_operation)),
    }
}

/// Execute the check-context command
pub fn execute(planning_dir: &Path, upcoming_operation: &str) -> Result<CommandOutput> {
    let decision = decide(load_session_config(planning_dir), upcoming_operation);
    CommandOutput::new(&decision, true)
}
