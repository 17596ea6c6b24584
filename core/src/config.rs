//! Runtime configuration — data paths and the analytics refresh interval.
//!
//! Loaded from a JSON file when one is provided; every field has a default
//! so the runner can start from flags alone.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_REFRESH_SECS: u64 = 5 * 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Clustered customer dataset (CSV).
    pub dataset_path: String,
    /// SQLite database path; ":memory:" for ephemeral runs.
    pub db_path: String,
    /// Directory holding scaler.json and cluster_model.json.
    pub model_dir: String,
    /// Seconds between background analytics refresh passes.
    pub refresh_secs: u64,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            dataset_path: "data/Transaction_clustered.csv".to_string(),
            db_path: "advisor.db".to_string(),
            model_dir: "model".to_string(),
            refresh_secs: DEFAULT_REFRESH_SECS,
        }
    }
}

impl AdvisorConfig {
    /// Load from a JSON file. Missing fields fall back to defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }
}
