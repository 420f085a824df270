//! Dashboard config — the machine roster.
//!
//! `~/.cycletrack/config.yaml`, for example:
//!
//! ```yaml
//! machines:
//!   - D1
//!   - D2
//!   - D3
//!   - D4
//!   - M10
//!   - M14
//! ```
//!
//! The roster length fixes the slot count for the life of a session. Unlike
//! the runtime snapshots, a corrupt config is a startup error rather than a
//! silent fallback — a mangled roster would reshape the whole board.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::store::{data_root_at, home};

pub const CONFIG_FILE: &str = "config.yaml";

/// Default roster: four Doosan stations and two Mazak stations.
pub const DEFAULT_MACHINES: [&str; 6] = ["D1", "D2", "D3", "D4", "M10", "M14"];

/// The dashboard configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Ordered slot roster; position is the slot id.
    pub machines: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            machines: DEFAULT_MACHINES.map(String::from).to_vec(),
        }
    }
}

/// `<home>/.cycletrack/config.yaml` — pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    data_root_at(home).join(CONFIG_FILE)
}

/// Load the config, or the built-in default roster when the file is absent.
///
/// Returns `CoreError::ConfigParse` on malformed YAML and
/// `CoreError::Validation` on an empty roster.
pub fn load_config_at(home: &Path) -> Result<DashboardConfig, CoreError> {
    let path = config_path_at(home);
    if !path.exists() {
        return Ok(DashboardConfig::default());
    }
    let contents = std::fs::read_to_string(&path)?;
    let config: DashboardConfig =
        serde_yaml::from_str(&contents).map_err(|e| CoreError::ConfigParse { path, source: e })?;
    if config.machines.is_empty() {
        return Err(CoreError::Validation(
            "config.yaml must list at least one machine".into(),
        ));
    }
    Ok(config)
}

/// `load_config_at` convenience wrapper.
pub fn load_config() -> Result<DashboardConfig, CoreError> {
    load_config_at(&home()?)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
