use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Path configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Catalog payload to analyze; the built-in catalog is used when unset
    pub catalog_path: Option<String>,
    pub report_dir: String,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            report_dir: "reports".to_string(),
        }
    }
}

impl PathConfig {
    pub fn catalog_file(&self) -> Option<PathBuf> {
        self.catalog_path.as_ref().map(PathBuf::from)
    }

    pub fn report_file(&self, name: &str) -> PathBuf {
        PathBuf::from(&self.report_dir).join(format!("{}.json", name))
    }
}
