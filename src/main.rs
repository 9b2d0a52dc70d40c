use anyhow::Result;
use clap::{Parser, Subcommand};
use deep_plan::commands::{check_sections, context_check, section_todos, setup, CommandOutput};
use deep_plan::logging::init_logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "deep-plan")]
#[command(about = "Workflow state tracking for deep planning sessions", long_about = None)]
#[command(version)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set up or resume a planning session from a spec file
    SetupSession {
        /// Path to the spec file (the planning directory is its parent)
        #[arg(long)]
        file: PathBuf,

        /// Plugin root directory holding config.json
        #[arg(long, env = "CLAUDE_PLUGIN_ROOT")]
        plugin_root: PathBuf,
    },

    /// Report section-writing progress
    CheckSections {
        /// Planning directory
        #[arg(long)]
        planning_dir: PathBuf,
    },

    /// Generate the TODO list with one item per section
    GenerateSectionTodos {
        /// Planning directory (must contain deep_plan_config.json)
        #[arg(long)]
        planning_dir: PathBuf,
    },

    /// Decide whether to offer context compaction before an operation
    CheckContext {
        /// Planning directory (contains deep_plan_config.json)
        #[arg(long)]
        planning_dir: PathBuf,

        /// Name of the upcoming operation (e.g. "External LLM Review")
        #[arg(long)]
        upcoming_operation: String,
    },
}

fn run(command: Commands) -> Result<CommandOutput> {
    match command {
        Commands::SetupSession { file, plugin_root } => setup::execute(&file, &plugin_root),
        Commands::CheckSections { planning_dir } => check_sections::execute(&planning_dir),
        Commands::GenerateSectionTodos { planning_dir } => section_todos::execute(&planning_dir),
        Commands::CheckContext {
            planning_dir,
            upcoming_operation,
        } => context_check::execute(&planning_dir, &upcoming_operation),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("Warning: {e}");
    }

    let output = run(cli.command).unwrap_or_else(|e| CommandOutput::failure(format!("{e:#}")));

    println!("{output}");
    std::process::exit(output.exit_code());
}
