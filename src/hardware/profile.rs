//! Hardware profile supplied to each analysis call

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{check_non_negative, AnalysisError};

/// Kind of storage the catalog files are loaded from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Hdd,
    #[default]
    Ssd,
    Nvme,
}

impl StorageKind {
    pub fn label(&self) -> &'static str {
        match self {
            StorageKind::Hdd => "hdd",
            StorageKind::Ssd => "ssd",
            StorageKind::Nvme => "nvme",
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StorageKind {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hdd" => Ok(StorageKind::Hdd),
            "ssd" => Ok(StorageKind::Ssd),
            "nvme" => Ok(StorageKind::Nvme),
            other => Err(AnalysisError::input(
                "storage",
                format!("expected one of hdd, ssd, nvme, got `{}`", other),
            )),
        }
    }
}

/// Memory available to run a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardwareProfile {
    /// Accelerator memory (VRAM)
    pub fast_memory_gb: f64,
    /// System memory (RAM) used for offloading
    pub slow_memory_gb: f64,
    #[serde(default)]
    pub storage: StorageKind,
}

impl HardwareProfile {
    pub fn new(fast_memory_gb: f64, slow_memory_gb: f64, storage: StorageKind) -> Self {
        Self {
            fast_memory_gb,
            slow_memory_gb,
            storage,
        }
    }

    /// Build a profile from user-entered strings such as `"24GB"`
    pub fn parse(fast: &str, slow: &str, storage: &str) -> Result<Self, AnalysisError> {
        let profile = Self {
            fast_memory_gb: parse_memory_gb(fast, "fast_memory_gb")?,
            slow_memory_gb: parse_memory_gb(slow, "slow_memory_gb")?,
            storage: storage.parse()?,
        };
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        check_non_negative(self.fast_memory_gb)
            .map_err(|reason| AnalysisError::input("fast_memory_gb", reason))?;
        check_non_negative(self.slow_memory_gb)
            .map_err(|reason| AnalysisError::input("slow_memory_gb", reason))?;
        Ok(())
    }
}

static MEMORY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(\d+(?:\.\d+)?)\s*(?:g|gb|gib)?\s*$").unwrap());

/// Parse a memory amount in gigabytes
///
/// Accepts a bare number or one suffixed with `g`, `gb` or `gib`.
pub fn parse_memory_gb(raw: &str, field: &'static str) -> Result<f64, AnalysisError> {
    let caps = MEMORY_PATTERN
        .captures(raw)
        .ok_or_else(|| AnalysisError::input(field, format!("`{}` is not a memory amount", raw)))?;

    caps[1]
        .parse::<f64>()
        .map_err(|e| AnalysisError::input(field, e.to_string()))
}
