//! Engine configuration.

use anyhow::{Context, Result};
use jsinfer_common::limits::{DEFAULT_EVALUATION_BUDGET, DEFAULT_SCRIPT_EXTENSIONS};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Files whose name ends in one of these are tracked; updater
    /// notifications for any other file are ignored.
    pub script_extensions: Vec<String>,
    /// Symbol entries one type query may make; see
    /// [`DEFAULT_EVALUATION_BUDGET`].
    pub evaluation_budget: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            script_extensions: DEFAULT_SCRIPT_EXTENSIONS
                .iter()
                .map(|ext| (*ext).to_string())
                .collect(),
            evaluation_budget: DEFAULT_EVALUATION_BUDGET,
        }
    }
}

impl EngineConfig {
    pub fn from_json(source: &str) -> Result<EngineConfig> {
        serde_json::from_str(source).context("failed to parse engine configuration")
    }

    pub fn load(path: &Path) -> Result<EngineConfig> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read engine configuration: {}", path.display()))?;
        EngineConfig::from_json(&source)
            .with_context(|| format!("failed to load engine configuration: {}", path.display()))
    }

    pub fn is_script_file(&self, file_name: &str) -> bool {
        self.script_extensions
            .iter()
            .any(|ext| file_name.ends_with(ext.as_str()))
    }

}

#[cfg(test)]
#[path = "../tests/config_tests.rs"]
mod config_tests;
