//! CLI defaults loaded from a JSON file.

use anyhow::{Context, Result};
use cubegrade_color::{OutputProfile, DEFAULT_GRID_SIZE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming a config file when `--config` is absent.
pub const CONFIG_ENV: &str = "CUBEGRADE_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub grid_size: usize,
    pub profile: OutputProfile,
    pub title: String,
    /// Longest edge reference images are reduced to before analysis.
    pub analysis_max_dimension: u32,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            profile: OutputProfile::Standard,
            title: "Custom Grade".to_string(),
            analysis_max_dimension: 256,
        }
    }
}

impl CliConfig {
    /// Load from `explicit`, else from `$CUBEGRADE_CONFIG`, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        match resolve_path(explicit, env) {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }
}

fn resolve_path(explicit: Option<&Path>, env: Option<PathBuf>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| env.filter(|p| !p.as_os_str().is_empty()))
}
