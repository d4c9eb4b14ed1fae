use std::path::Path;

use anyhow::{Context, Result};
use hull::HullConfig;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Simulation frames per second; each frame advances `1 / frame_hz`.
    pub frame_hz: f32,
    /// Write the final layout back to `--layout` when the session ends.
    pub autosave: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { frame_hz: 60.0, autosave: false }
    }
}

impl SessionConfig {
    pub fn dt(&self) -> f32 {
        1.0 / self.frame_hz.max(1.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub hull: HullConfig,
    pub session: SessionConfig,
}

pub fn parse_config(text: &str) -> Result<Config> {
    toml::from_str(text).context("parsing walker config")
}

/// Load the TOML config at `path`. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        warn!(path = %path.display(), "config not found, using defaults");
        return Ok(Config::default());
    }
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_config(&text).with_context(|| format!("in {}", path.display()))
}
