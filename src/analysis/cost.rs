//! Memory cost of a recipe

use crate::catalog::{AuxiliaryRelease, ModelRelease};
use crate::config::AnalyzerConfig;

/// Costs of one recipe, in GB, before any hardware is considered
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecipeCost {
    /// Sum of the component file sizes
    pub raw_gb: f64,
    /// `raw_gb` scaled by the fast memory safety factor
    pub fast_mem_gb: f64,
    /// Footprint when the whole recipe sits in slow memory
    pub slow_mem_gb: f64,
}

/// Compute fast and slow memory cost; an absent decoder costs nothing
pub fn recipe_cost(
    model: &ModelRelease,
    encoders: &[&AuxiliaryRelease],
    decoder: Option<&AuxiliaryRelease>,
    config: &AnalyzerConfig,
) -> RecipeCost {
    let raw_gb = model.file_size_gb
        + encoders.iter().map(|e| e.file_size_gb).sum::<f64>()
        + decoder.map_or(0.0, |d| d.file_size_gb);

    RecipeCost {
        raw_gb,
        fast_mem_gb: raw_gb * config.fast_mem_safety_factor,
        slow_mem_gb: raw_gb + config.slow_mem_base_overhead_gb,
    }
}
