//! Session config I/O
//!
//! A planning session keeps its settings in `<planning_dir>/deep_plan_config.json`:
//! the three session paths plus a copy of the plugin's global `config.json`
//! taken when the session was created.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::planning_dir::PlanningDir;

/// Global settings file at the plugin root
pub const GLOBAL_CONFIG_FILE: &str = "config.json";

/// Keys owned by the session; never taken from the global config
const SESSION_KEYS: [&str; 3] = ["plugin_root", "planning_dir", "initial_file"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Session config not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Session config is corrupt ({}): {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },

    #[error("Failed to write session config {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid plugin config {}: {reason}", path.display())]
    InvalidGlobalConfig { path: PathBuf, reason: String },
}

/// Persisted settings for one planning session.
///
/// Only `context.check_enabled` and the three path keys are interpreted;
/// any of the paths may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin_root: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planning_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_file: Option<String>,
    /// Everything copied from the plugin's global config
    #[serde(flatten)]
    pub settings: Map<String, Value>,
}

impl SessionConfig {
    /// `context.check_enabled`, defaulting to enabled
    pub fn check_enabled(&self) -> bool {
        self.settings
            .get("context")
            .and_then(|context| context.get("check_enabled"))
            .and_then(Value::as_bool)
            .unwrap_or(true)
    }
}

/// Load the session config of a planning directory.
pub fn load_session_config(planning_dir: &Path) -> Result<SessionConfig, ConfigError> {
    let path = PlanningDir::new(planning_dir).session_config_path();
    if !path.exists() {
        return Err(ConfigError::NotFound(path));
    }

    let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|e| ConfigError::Corrupt {
        path,
        reason: e.to_string(),
    })
}

/// Load the plugin's global settings.
///
/// A missing file yields empty settings; a file that is not a JSON object
/// is an error.
pub fn load_global_settings(plugin_root: &Path) -> Result<Map<String, Value>, ConfigError> {
    let path = plugin_root.join(GLOBAL_CONFIG_FILE);
    if !path.exists() {
        warn!(
            "No plugin config at {}, session starts with default settings",
            path.display()
        );
        return Ok(Map::new());
    }

    let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(settings)) => Ok(settings),
        Ok(_) => Err(ConfigError::InvalidGlobalConfig {
            path,
            reason: "expected a JSON object".to_string(),
        }),
        Err(e) => Err(ConfigError::InvalidGlobalConfig {
            path,
            reason: e.to_string(),
        }),
    }
}

/// Create and write a fresh session config, overwriting any existing one.
pub fn create_session_config(
    planning_dir: &Path,
    plugin_root: &Path,
    initial_file: &Path,
) -> Result<SessionConfig, ConfigError> {
    let mut settings = load_global_settings(plugin_root)?;
    for key in SESSION_KEYS {
        settings.remove(key);
    }

    let config = SessionConfig {
        plugin_root: Some(plugin_root.to_string_lossy().into_owned()),
        planning_dir: Some(planning_dir.to_string_lossy().into_owned()),
        initial_file: Some(initial_file.to_string_lossy().into_owned()),
        settings,
    };

    let path = PlanningDir::new(planning_dir).session_config_path();
    let json = serde_json::to_string_pretty(&config).map_err(|e| ConfigError::Corrupt {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    fs::write(&path, json).map_err(|source| ConfigError::Write {
        path: path.clone(),
        source,
    })?;

    info!("Created session config {}", path.display());
    Ok(config)
}

/// Return the existing session config, or create one.
///
/// The flag is `true` when a new file was written. A corrupt existing file
/// is reported, never overwritten.
pub fn get_or_create_session_config(
    planning_dir: &Path,
    plugin_root: &Path,
    initial_file: &Path,
) -> Result<(SessionConfig, bool), ConfigError> {
    match load_session_config(planning_dir) {
        Ok(config) => {
            debug!("Reusing session config in {}", planning_dir.display());
            Ok((config, false))
        }
        Err(ConfigError::NotFound(_)) => {
            create_session_config(planning_dir, plugin_root, initial_file).map(|c| (c, true))
        }
        Err(e) => Err(e),
    }
}
