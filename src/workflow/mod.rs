//! The linear planning workflow: step table, resume inference and TODOs

pub mod artifacts;
pub mod resume;
pub mod steps;
pub mod todos;

pub use artifacts::{build_files_summary, scan_planning_files, PlanningFiles};
pub use resume::{infer_resume_step, ResumePoint};
pub use steps::{step_name, WorkflowStep, WORKFLOW_STEPS};
pub use todos::{generate_section_todo_items, generate_todos, TodoContext, TodoItem, TodoStatus};
