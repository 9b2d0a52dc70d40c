use std::path::{Path, PathBuf};

/// Subdirectory holding the section index and section files
pub const SECTIONS_DIR: &str = "sections";

/// Index document inside the sections directory
pub const INDEX_FILE: &str = "index.md";

/// Subdirectory holding external review output
pub const REVIEWS_DIR: &str = "reviews";

/// Per-session config written into the planning directory
pub const SESSION_CONFIG_FILE: &str = "deep_plan_config.json";

/// A planning directory: the parent directory of the spec file that drives a
/// planning session. Every workflow artifact lives at a conventional path
/// beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanningDir {
    root: PathBuf,
}

impl PlanningDir {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn exists(&self) -> bool {
        self.root.exists()
    }

    pub fn sections_dir(&self) -> PathBuf {
        self.root.join(SECTIONS_DIR)
    }

    pub fn index_path(&self) -> PathBuf {
        self.sections_dir().join(INDEX_FILE)
    }

    pub fn reviews_dir(&self) -> PathBuf {
        self.root.join(REVIEWS_DIR)
    }

    pub fn session_config_path(&self) -> PathBuf {
        self.root.join(SESSION_CONFIG_FILE)
    }

    /// Path of a top-level artifact such as `claude-plan.md`
    pub fn file(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}
