use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Optional settings file, looked up in the working directory.
pub const CONFIG_FILE: &str = "dashboard.json";

/// Dashboard settings. Every key is optional in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Dataset shown at startup.
    pub data_path: PathBuf,
    /// How many of the most common job titles are selected initially.
    pub top_titles: usize,
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/tech_jobs.csv"),
            top_titles: 10,
            window_size: [1280.0, 860.0],
        }
    }
}

impl DashboardConfig {
    /// Read `path`; a missing file means defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Like [`from_file`](Self::from_file) but never fails: a broken file is
    /// logged and ignored.
    pub fn load_or_default(path: &Path) -> Self {
        Self::from_file(path).unwrap_or_else(|e| {
            log::warn!("Ignoring config: {e:#}");
            Self::default()
        })
    }
}
