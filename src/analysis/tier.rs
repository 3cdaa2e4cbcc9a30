//! Performance tier of a recipe on a hardware profile

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::AnalyzerConfig;
use crate::hardware::HardwareProfile;

/// Tier of an emitted result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Optimal,
    DegradedOffload,
}

impl Tier {
    /// Position in the final result ordering
    pub fn rank(&self) -> u8 {
        match self {
            Tier::Optimal => 0,
            Tier::DegradedOffload => 1,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Optimal => f.write_str("Optimal"),
            Tier::DegradedOffload => f.write_str("DegradedOffload"),
        }
    }
}

/// Outcome of classifying one recipe
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Classification {
    Optimal,
    DegradedOffload {
        /// Fast memory demand beyond what the GPU has
        overflow_gb: f64,
        /// Slow memory needed for the overflow plus the base overhead
        required_slow_mem_gb: f64,
    },
    Infeasible,
}

impl Classification {
    pub fn tier(&self) -> Option<Tier> {
        match self {
            Classification::Optimal => Some(Tier::Optimal),
            Classification::DegradedOffload { .. } => Some(Tier::DegradedOffload),
            Classification::Infeasible => None,
        }
    }
}

/// Most fast memory overflow the hardware may offload
pub fn max_offload_gb(hardware: &HardwareProfile, config: &AnalyzerConfig) -> f64 {
    (hardware.slow_memory_gb * config.offload_fraction_cap).min(config.absolute_offload_cap_gb)
}

/// Classify a recipe by its fast memory cost; all boundaries are inclusive
///
/// The cost is first rounded up to the reported precision, so the figures
/// in a result always agree with its tier.
pub fn classify(
    fast_mem_gb: f64,
    hardware: &HardwareProfile,
    config: &AnalyzerConfig,
) -> Classification {
    let fast_mem_gb = config.ceil_cost(fast_mem_gb);
    if fast_mem_gb <= hardware.fast_memory_gb {
        return Classification::Optimal;
    }

    let overflow_gb = fast_mem_gb - hardware.fast_memory_gb;
    let required_slow_mem_gb = config.ceil_cost(overflow_gb + config.slow_mem_base_overhead_gb);

    if hardware.slow_memory_gb >= required_slow_mem_gb
        && overflow_gb <= max_offload_gb(hardware, config)
    {
        Classification::DegradedOffload {
            overflow_gb,
            required_slow_mem_gb,
        }
    } else {
        Classification::Infeasible
    }
}
