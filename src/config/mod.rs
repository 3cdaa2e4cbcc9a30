pub mod analyzer;
pub mod paths;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub use analyzer::AnalyzerConfig;
pub use paths::PathConfig;

/// Main configuration for hardware compatibility analysis
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analyzer: AnalyzerConfig,
    pub paths: PathConfig,
}

impl Config {
    /// Load configuration from a JSON file; missing fields keep their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&json)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.analyzer.validate()?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)
            .with_context(|| format!("writing config {}", path.as_ref().display()))?;
        Ok(())
    }
}
