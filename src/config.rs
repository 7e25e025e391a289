use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

/// File looked up in the working directory at startup.
pub const CONFIG_FILE_NAME: &str = "survey-dash.json";

/// Dataset shipped alongside the dashboard.
pub const DEFAULT_DATASET_PATH: &str = "dados_corrigidos.csv";

// ---------------------------------------------------------------------------
// Answer labels
// ---------------------------------------------------------------------------

/// The exact strings used by yes/no survey columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswerLabels {
    pub affirmative: String,
    pub negative: String,
}

impl Default for AnswerLabels {
    fn default() -> Self {
        Self {
            affirmative: "Sim".to_string(),
            negative: "Não".to_string(),
        }
    }
}

impl AnswerLabels {
    /// Exact-match test; no trimming or case folding.
    pub fn is_affirmative(&self, value: &str) -> bool {
        value == self.affirmative
    }

    /// The pair in display order (yes first).
    pub fn pair(&self) -> [&str; 2] {
        [self.affirmative.as_str(), self.negative.as_str()]
    }
}

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub dataset_path: PathBuf,
    pub labels: AnswerLabels,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            labels: AnswerLabels::default(),
        }
    }
}

impl DashboardConfig {
    /// Read `survey-dash.json` from `dir` if present, defaults otherwise.
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            log::debug!("No {CONFIG_FILE_NAME} in {}, using defaults", dir.display());
            return Ok(Self::default());
        }
        let mut config = Self::from_file(&path)?;
        if config.dataset_path.is_relative() {
            config.dataset_path = dir.join(&config.dataset_path);
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| DashboardError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|e| DashboardError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}
