//! Catalog construction from a quantization table
//!
//! Mirrors the joins a catalog database performs: releases name their
//! quantization and pick up its quality score and priority from the table.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::types::{
    AuxiliaryId, AuxiliaryRelease, Catalog, ModelCategory, ModelId, ModelRelease, ReleaseId,
};
use crate::hardware::{GpuFamily, PrecisionSupport};

/// GPU families that run a precision in hardware
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpuRequirements {
    pub supported_families: Vec<GpuFamily>,
    /// Other families can still run it, emulated and slower
    pub software_fallback: bool,
}

impl GpuRequirements {
    pub fn support_for(&self, family: GpuFamily) -> PrecisionSupport {
        if self.supported_families.contains(&family) {
            PrecisionSupport::Native
        } else if self.software_fallback {
            PrecisionSupport::Software
        } else {
            PrecisionSupport::None
        }
    }
}

/// A numeric precision a release can be published in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantization {
    pub name: String,
    pub quality_score: f64,
    pub priority: i64,
    /// `None` means any GPU runs it natively
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu_requirements: Option<GpuRequirements>,
}

impl Quantization {
    fn requiring(mut self, families: &[GpuFamily], software_fallback: bool) -> Self {
        self.gpu_requirements = Some(GpuRequirements {
            supported_families: families.to_vec(),
            software_fallback,
        });
        self
    }

    /// How a GPU family executes this precision
    pub fn support_on(&self, family: GpuFamily) -> PrecisionSupport {
        self.gpu_requirements
            .as_ref()
            .map_or(PrecisionSupport::Native, |r| r.support_for(family))
    }
}

fn quant(name: &str, quality_score: f64, priority: i64) -> Quantization {
    Quantization {
        name: name.to_string(),
        quality_score,
        priority,
        gpu_requirements: None,
    }
}

/// Standard quantizations, best first
pub static QUANTIZATIONS: Lazy<Vec<Quantization>> = Lazy::new(|| {
    use GpuFamily::*;

    vec![
        quant("FP16", 100.0, 20),
        quant("FP8", 95.0, 18).requiring(&[Rtx40, Rtx30], true),
        quant("GGUF Q8_0", 97.0, 16),
        quant("INT8", 90.0, 15).requiring(&[Rtx40, Rtx30, Rtx20], false),
        quant("GGUF Q6_K", 93.0, 14),
        quant("GGUF Q5_K_M", 90.0, 12),
        quant("GGUF Q5_0", 88.0, 11),
        quant("GGUF Q4_K_M", 85.0, 10),
        quant("FP4", 80.0, 9).requiring(&[Rtx40], true),
        quant("GGUF Q4_0", 80.0, 8),
        quant("GGUF Q3_K_M", 70.0, 5),
        quant("GGUF Q2_K", 55.0, 2),
    ]
});

pub fn find_quantization(name: &str) -> Option<&'static Quantization> {
    QUANTIZATIONS
        .iter()
        .find(|q| q.name.eq_ignore_ascii_case(name))
}

/// Builds a denormalized catalog, assigning release ids in insertion order
#[derive(Debug, Clone)]
pub struct CatalogBuilder {
    catalog: Catalog,
    quantizations: Vec<Quantization>,
    next_release_id: ReleaseId,
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self {
            catalog: Catalog::default(),
            quantizations: QUANTIZATIONS.clone(),
            next_release_id: 1,
        }
    }

    /// Register a quantization, replacing any with the same name
    pub fn quantization(mut self, name: &str, quality_score: f64, priority: i64) -> Self {
        self.quantizations
            .retain(|q| !q.name.eq_ignore_ascii_case(name));
        self.quantizations
            .push(quant(name, quality_score, priority));
        self
    }

    pub fn model_release(
        mut self,
        model_id: ModelId,
        model_name: &str,
        category: ModelCategory,
        quantization: &str,
        file_size_gb: f64,
    ) -> Self {
        let (quality_score, priority) = self.lookup(quantization);
        let id = self.next_id();
        self.catalog.models.push(ModelRelease {
            id,
            model_id,
            model_name: model_name.to_string(),
            category,
            quantization: quantization.to_string(),
            file_size_gb,
            quality_score,
            priority,
            repository: None,
        });
        self
    }

    /// Add an encoder release required by every model in `compatible`
    pub fn encoder_release(
        mut self,
        encoder_id: AuxiliaryId,
        name: &str,
        quantization: &str,
        file_size_gb: f64,
        compatible: &[ModelId],
    ) -> Self {
        let rows = self.auxiliary_rows(encoder_id, name, quantization, file_size_gb, compatible);
        self.catalog.encoders.extend(rows);
        self
    }

    /// Add a decoder (VAE) release usable by every model in `compatible`
    pub fn decoder_release(
        mut self,
        decoder_id: AuxiliaryId,
        name: &str,
        quantization: &str,
        file_size_gb: f64,
        compatible: &[ModelId],
    ) -> Self {
        let rows = self.auxiliary_rows(decoder_id, name, quantization, file_size_gb, compatible);
        self.catalog.decoders.extend(rows);
        self
    }

    pub fn build(self) -> Catalog {
        self.catalog
    }

    fn auxiliary_rows(
        &mut self,
        owner_id: AuxiliaryId,
        owner_name: &str,
        quantization: &str,
        file_size_gb: f64,
        compatible: &[ModelId],
    ) -> Vec<AuxiliaryRelease> {
        let (quality_score, priority) = self.lookup(quantization);
        let id = self.next_id();
        compatible
            .iter()
            .map(|&model_id| AuxiliaryRelease {
                id,
                owner_id,
                owner_name: owner_name.to_string(),
                quantization: quantization.to_string(),
                file_size_gb,
                quality_score,
                priority,
                compatible_model_id: model_id,
                repository: None,
            })
            .collect()
    }

    fn lookup(&self, quantization: &str) -> (f64, i64) {
        match self
            .quantizations
            .iter()
            .find(|q| q.name.eq_ignore_ascii_case(quantization))
        {
            Some(q) => (q.quality_score, q.priority),
            None => {
                tracing::warn!("unknown quantization `{}`, scored as 0", quantization);
                (0.0, 0)
            }
        }
    }

    fn next_id(&mut self) -> ReleaseId {
        let id = self.next_release_id;
        self.next_release_id += 1;
        id
    }
}
