//! The fixed step table of the planning workflow.
//!
//! Steps 0-4 are setup, 6-22 the workflow proper. Step 5 was folded into
//! setup and is retired; numbers stay strictly increasing in table order.

/// One row of the step table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowStep {
    /// TODO content shown to the user
    pub content: &'static str,
    /// Present-continuous form shown while the step runs
    pub active_form: &'static str,
    pub step: u32,
    /// Short name used in resume messages
    pub name: &'static str,
}

const fn step(
    step: u32,
    content: &'static str,
    active_form: &'static str,
    name: &'static str,
) -> WorkflowStep {
    WorkflowStep {
        content,
        active_form,
        step,
        name,
    }
}

pub const WORKFLOW_STEPS: &[WorkflowStep] = &[
    step(0, "Check context / offer compaction", "Checking context", "Context check"),
    step(
        1,
        "Print intro and validate environment",
        "Validating environment",
        "Print intro and validate environment",
    ),
    step(
        2,
        "Handle environment errors",
        "Handling environment errors",
        "Handle environment errors",
    ),
    step(
        3,
        "Validate spec file input",
        "Validating spec file input",
        "Validate spec file input",
    ),
    step(
        4,
        "Setup planning session",
        "Setting up planning session",
        "Setup planning session",
    ),
    step(6, "Research decision", "Deciding on research approach", "Research decision"),
    step(7, "Execute research", "Executing research", "Execute research"),
    step(8, "Detailed interview", "Conducting detailed interview", "Detailed interview"),
    step(
        9,
        "Save interview transcript",
        "Saving interview transcript",
        "Save interview transcript",
    ),
    step(10, "Write initial spec", "Writing initial spec", "Write initial spec"),
    step(
        11,
        "Generate implementation plan",
        "Generating implementation plan",
        "Generate implementation plan",
    ),
    step(
        12,
        "Context check (pre-review)",
        "Checking context (pre-review)",
        "Context check (pre-review)",
    ),
    step(
        13,
        "External LLM review",
        "Running external LLM review",
        "External LLM review",
    ),
    step(
        14,
        "Integrate external feedback",
        "Integrating external feedback",
        "Integrate external feedback",
    ),
    step(
        15,
        "User review of integrated plan",
        "Waiting for user review",
        "User review of integrated plan",
    ),
    step(16, "Apply TDD approach", "Applying TDD approach", "Apply TDD approach"),
    step(
        17,
        "Context check (pre-split)",
        "Checking context (pre-split)",
        "Context check (pre-split)",
    ),
    step(18, "Create section index", "Creating section index", "Create section index"),
    step(
        GENERATE_SECTION_TODOS_STEP,
        GENERATE_SECTION_TODOS_CONTENT,
        "Generating section TODOs",
        "Generate section TODOs",
    ),
    step(
        WRITE_SECTIONS_STEP,
        WRITE_SECTIONS_CONTENT,
        "Writing section files",
        "Write section files",
    ),
    step(
        21,
        "Final status and cleanup",
        "Finalizing status and cleanup",
        "Final status and cleanup",
    ),
    step(
        FINAL_STEP,
        "Output summary",
        "Outputting summary",
        "Output summary",
    ),
];

/// Placeholder dropped when per-section TODOs are available
pub const GENERATE_SECTION_TODOS_CONTENT: &str = "Generate section TODOs";
pub const GENERATE_SECTION_TODOS_STEP: u32 = 19;

/// Placeholder replaced by per-section TODOs
pub const WRITE_SECTIONS_CONTENT: &str = "Write section files";
pub const WRITE_SECTIONS_STEP: u32 = 20;

/// First workflow step after setup; where a fresh session starts
pub const FIRST_WORKFLOW_STEP: u32 = 6;

/// Last step; used as the current step once the workflow is complete
pub const FINAL_STEP: u32 = 22;

/// Look up a step by number
pub fn find_step(number: u32) -> Option<&'static WorkflowStep> {
    WORKFLOW_STEPS.iter().find(|s| s.step == number)
}

/// Display name of a step, falling back to `Step N` for unknown numbers
pub fn step_name(number: u32) -> String {
    find_step(number)
        .map(|s| s.name.to_string())
        .unwrap_or_else(|| format!("Step {number}"))
}
