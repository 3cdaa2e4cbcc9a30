use serde::{Deserialize, Serialize};

use crate::error::{check_non_negative, AnalysisError};

/// Float noise tolerated below the last reported decimal place
const ROUNDING_NOISE: f64 = 1e-9;

/// Tunable constants of the compatibility analysis
///
/// The high-end filter and both offload caps are business constants. Keep
/// them here rather than deriving new values in code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    // Cost model
    pub fast_mem_safety_factor: f64,
    pub slow_mem_base_overhead_gb: f64,

    // Offload limits
    pub offload_fraction_cap: f64,
    pub absolute_offload_cap_gb: f64,
    pub heavy_offload_threshold_gb: f64,

    // Curation rule for strong GPUs
    pub high_end_threshold_gb: f64,
    pub min_priority_for_high_end: i64,

    // Score defaults for recipes without auxiliary releases
    pub empty_aux_priority: f64,
    pub empty_aux_quality: f64,

    /// Decimal places kept in reported costs
    pub cost_precision: u32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            fast_mem_safety_factor: 1.03,
            slow_mem_base_overhead_gb: 2.0,
            offload_fraction_cap: 0.75,
            absolute_offload_cap_gb: 64.0,
            heavy_offload_threshold_gb: 16.0,
            high_end_threshold_gb: 16.0,
            min_priority_for_high_end: 10,
            empty_aux_priority: 20.0,
            empty_aux_quality: 100.0,
            cost_precision: 2,
        }
    }
}

impl AnalyzerConfig {
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let quantities = [
            ("fast_mem_safety_factor", self.fast_mem_safety_factor),
            ("slow_mem_base_overhead_gb", self.slow_mem_base_overhead_gb),
            ("offload_fraction_cap", self.offload_fraction_cap),
            ("absolute_offload_cap_gb", self.absolute_offload_cap_gb),
            ("heavy_offload_threshold_gb", self.heavy_offload_threshold_gb),
            ("high_end_threshold_gb", self.high_end_threshold_gb),
            ("empty_aux_priority", self.empty_aux_priority),
            ("empty_aux_quality", self.empty_aux_quality),
        ];
        for (field, value) in quantities {
            check_non_negative(value).map_err(|reason| AnalysisError::config(field, reason))?;
        }

        if self.fast_mem_safety_factor == 0.0 {
            return Err(AnalysisError::config(
                "fast_mem_safety_factor",
                "must be greater than zero",
            ));
        }
        if self.offload_fraction_cap > 1.0 {
            return Err(AnalysisError::config(
                "offload_fraction_cap",
                format!("must be at most 1.0, got {}", self.offload_fraction_cap),
            ));
        }
        if self.cost_precision > 6 {
            return Err(AnalysisError::config(
                "cost_precision",
                format!("at most 6 decimal places, got {}", self.cost_precision),
            ));
        }

        Ok(())
    }

    /// Round a cost for reporting
    pub fn round_cost(&self, value: f64) -> f64 {
        let scale = 10f64.powi(self.cost_precision as i32);
        (value * scale).round() / scale
    }

    /// Round a cost up to the reported precision
    ///
    /// Tiers are decided on this value, so a reported cost never lands on
    /// the wrong side of a memory limit.
    pub fn ceil_cost(&self, value: f64) -> f64 {
        let scale = 10f64.powi(self.cost_precision as i32);
        let scaled = (value * scale - ROUNDING_NOISE).ceil();
        if scaled <= 0.0 { 0.0 } else { scaled / scale }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(AnalyzerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_fraction_above_one() {
        let config = AnalyzerConfig {
            offload_fraction_cap: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AnalysisError::InvalidConfig {
                field: "offload_fraction_cap",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_zero_safety_factor() {
        let config = AnalyzerConfig {
            fast_mem_safety_factor: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_round_cost() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.round_cost(12.360000000000001), 12.36);
        assert_eq!(config.round_cost(6.3649), 6.36);
    }

    #[test]
    fn test_ceil_cost() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.ceil_cost(8.0036), 8.01);
        assert_eq!(config.ceil_cost(8.00001), 8.01);
        assert_eq!(config.ceil_cost(12.360000000000001), 12.36);
        assert_eq!(config.ceil_cost(6.359999999999999), 6.36);
        assert_eq!(config.ceil_cost(0.0), 0.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AnalyzerConfig =
            serde_json::from_str(r#"{"offload_fraction_cap": 0.5}"#).unwrap();
        assert_eq!(config.offload_fraction_cap, 0.5);
        assert_eq!(config.fast_mem_safety_factor, 1.03);
    }
}
