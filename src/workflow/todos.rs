//! TODO list generation for the planning workflow

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::steps::{GENERATE_SECTION_TODOS_CONTENT, WORKFLOW_STEPS, WRITE_SECTIONS_CONTENT};

/// Status of a TODO item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoStatus {
    Pending,
    InProgress,
    Completed,
}

impl TodoStatus {
    /// Status of a table step relative to the step currently being worked on
    pub fn for_step(step: u32, current_step: u32) -> Self {
        match step.cmp(&current_step) {
            std::cmp::Ordering::Less => TodoStatus::Completed,
            std::cmp::Ordering::Equal => TodoStatus::InProgress,
            std::cmp::Ordering::Greater => TodoStatus::Pending,
        }
    }
}

/// One entry of the checklist handed to the assistant's TODO tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub content: String,
    pub status: TodoStatus,
    #[serde(rename = "activeForm")]
    pub active_form: String,
}

impl TodoItem {
    pub fn new(
        content: impl Into<String>,
        status: TodoStatus,
        active_form: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            status,
            active_form: active_form.into(),
        }
    }
}

/// Session context pinned at the top of the list as completed items, so
/// the paths survive context compaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoContext {
    pub plugin_root: Option<String>,
    pub planning_dir: Option<String>,
    pub initial_file: Option<String>,
    pub context_check_enabled: Option<bool>,
}

impl TodoContext {
    /// Provided entries as `(key, value)` in their fixed order.
    /// Empty strings count as not provided.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let paths = [
            ("plugin_root", &self.plugin_root),
            ("planning_dir", &self.planning_dir),
            ("initial_file", &self.initial_file),
        ];

        let mut entries: Vec<(&'static str, String)> = paths
            .into_iter()
            .filter_map(|(key, value)| {
                value
                    .as_deref()
                    .filter(|v| !v.is_empty())
                    .map(|v| (key, v.to_string()))
            })
            .collect();

        if let Some(enabled) = self.context_check_enabled {
            entries.push(("context_check_enabled", enabled.to_string()));
        }

        entries
    }
}

/// Build the TODO list with a status for each step.
///
/// When `section_todos` is given, "Generate section TODOs" is dropped and
/// "Write section files" is replaced in place by the section items, which
/// keep their own statuses.
pub fn generate_todos(
    current_step: u32,
    section_todos: Option<&[TodoItem]>,
    context: &TodoContext,
) -> Vec<TodoItem> {
    let mut todos: Vec<TodoItem> = context
        .entries()
        .into_iter()
        .map(|(key, value)| {
            TodoItem::new(
                format!("{key}={value}"),
                TodoStatus::Completed,
                format!("Context: {key}"),
            )
        })
        .collect();

    for step in WORKFLOW_STEPS {
        if let Some(section_todos) = section_todos {
            if step.content == GENERATE_SECTION_TODOS_CONTENT {
                continue;
            }
            if step.content == WRITE_SECTIONS_CONTENT {
                todos.extend_from_slice(section_todos);
                continue;
            }
        }

        todos.push(TodoItem::new(
            step.content,
            TodoStatus::for_step(step.step, current_step),
            step.active_form,
        ));
    }

    todos
}

/// One TODO per defined section, in manifest order; sections already
/// written are marked completed.
pub fn generate_section_todo_items(
    all_sections: &[String],
    completed_sections: &[String],
) -> Vec<TodoItem> {
    let completed: HashSet<&str> = completed_sections.iter().map(String::as_str).collect();

    all_sections
        .iter()
        .map(|name| {
            let status = if completed.contains(name.as_str()) {
                TodoStatus::Completed
            } else {
                TodoStatus::Pending
            };
            TodoItem::new(
                format!("Read section-splitting.md and write {name}"),
                status,
                format!("Writing {name}"),
            )
        })
        .collect()
}
