//! Entry points called by the planning orchestrator.
//!
//! Every command produces exactly one JSON document for stdout plus the
//! process exit code.

pub mod check_sections;
pub mod context_check;
pub mod section_todos;
pub mod setup;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;

/// Rendered result of a command
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutput {
    pub body: Value,
    pub success: bool,
}

impl CommandOutput {
    pub fn new<T: Serialize>(body: &T, success: bool) -> Result<Self> {
        let body = serde_json::to_value(body).context("Failed to serialize command output")?;
        Ok(Self { body, success })
    }

    /// Generic envelope for errors that escape a command
    pub fn failure(error: impl fmt::Display) -> Self {
        Self {
            body: json!({
                "success": false,
                "error": error.to_string(),
            }),
            success: false,
        }
    }

    pub fn exit_code(&self) -> i32 {
        if self.success {
            0
        } else {
            1
        }
    }
}

impl fmt::Display for CommandOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string_pretty(&self.body).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}
