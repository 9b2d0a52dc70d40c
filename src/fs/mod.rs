pub mod planning_dir;
pub mod session_config;

pub use planning_dir::PlanningDir;

// Re-export commonly used config functions
pub use session_config::{
    get_or_create_session_config, load_session_config, ConfigError, SessionConfig,
};
