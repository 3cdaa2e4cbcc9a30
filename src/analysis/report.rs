//! Result composition and global ranking

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::champion::Candidate;
use super::tier::{Classification, Tier};
use crate::catalog::{
    AuxiliaryKind, AuxiliaryRelease, BaseModel, ModelCategory, ModelId, ReleaseId,
};
use crate::config::AnalyzerConfig;
use crate::hardware::HardwareProfile;

pub const NOTE_OPTIMAL_ALL_IN_FAST_MEM: &str = "note_optimal_all_in_fast_mem";
pub const NOTE_OPTIMAL_FAST_MEM_USAGE: &str = "note_optimal_fast_mem_usage";
pub const NOTE_POSSIBLE_OFFLOAD: &str = "note_possible_offload";
pub const NOTE_POSSIBLE_SLOW_MEM_USAGE: &str = "note_possible_slow_mem_usage";
pub const NOTE_WARNING_HEAVY_OFFLOAD: &str = "note_warning_heavy_offload";
pub const NOTE_PRECISION_SOFTWARE_FALLBACK: &str = "note_precision_software_fallback";
pub const NOTE_PRECISION_UNSUPPORTED: &str = "note_precision_unsupported";

/// Label used for a missing decoder
pub const NOT_APPLICABLE: &str = "N/A";

/// A message key with numeric parameters, rendered by the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub key: String,
    /// What the note is about, e.g. a quantization name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, f64>,
}

impl Note {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            subject: None,
            params: BTreeMap::new(),
        }
    }

    pub fn about(mut self, subject: &str) -> Self {
        self.subject = Some(subject.to_string());
        self
    }

    pub fn with(mut self, name: &str, value: f64) -> Self {
        self.params.insert(name.to_string(), value);
        self
    }
}

/// One component of a recipe and its memory cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentCost {
    /// `None` for the placeholder of a missing decoder
    pub release_id: Option<ReleaseId>,
    pub name: String,
    pub quantization: String,
    pub cost_gb: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuxiliaryComponent {
    pub kind: AuxiliaryKind,
    #[serde(flatten)]
    pub component: ComponentCost,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentBreakdown {
    pub model: ComponentCost,
    pub encoders: Vec<AuxiliaryComponent>,
    pub decoder: AuxiliaryComponent,
}

/// A recommended recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub id: String,
    pub recipe_label: String,
    pub model_id: ModelId,
    pub model_category: ModelCategory,
    pub tier: Tier,
    pub total_fast_mem_cost: f64,
    pub total_slow_mem_cost: f64,
    pub quality_score: f64,
    pub notes: Vec<Note>,
    pub components: ComponentBreakdown,
}

/// Stable id from the component release ids
///
/// Encoder ids are sorted so the id does not depend on enumeration order.
pub fn recipe_id(
    model_release: ReleaseId,
    encoder_releases: &[ReleaseId],
    decoder_release: Option<ReleaseId>,
) -> String {
    let mut encoders = encoder_releases.to_vec();
    encoders.sort_unstable();
    let encoders = if encoders.is_empty() {
        "none".to_string()
    } else {
        encoders
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    };
    let decoder = decoder_release.map_or_else(|| "none".to_string(), |id| id.to_string());

    format!("m{}-e{}-d{}", model_release, encoders, decoder)
}

fn auxiliary_component(
    kind: AuxiliaryKind,
    release: &AuxiliaryRelease,
    config: &AnalyzerConfig,
) -> AuxiliaryComponent {
    AuxiliaryComponent {
        kind,
        component: ComponentCost {
            release_id: Some(release.id),
            name: release.owner_name.clone(),
            quantization: release.quantization.clone(),
            cost_gb: config.round_cost(release.file_size_gb),
        },
    }
}

/// Turn a champion into a result with notes
pub fn compose(
    candidate: &Candidate<'_>,
    base_model: &BaseModel,
    hardware: &HardwareProfile,
    config: &AnalyzerConfig,
) -> Option<AnalysisResult> {
    // Same rounding the classifier applied
    let fast_mem = config.ceil_cost(candidate.cost.fast_mem_gb);

    let (tier, slow_mem, notes) = match candidate.classification {
        Classification::Optimal => (
            Tier::Optimal,
            config.round_cost(config.slow_mem_base_overhead_gb),
            vec![
                Note::new(NOTE_OPTIMAL_ALL_IN_FAST_MEM),
                Note::new(NOTE_OPTIMAL_FAST_MEM_USAGE)
                    .with("used", fast_mem)
                    .with("total", hardware.fast_memory_gb),
            ],
        ),
        Classification::DegradedOffload {
            overflow_gb,
            required_slow_mem_gb,
        } => {
            let offloaded = config.ceil_cost(overflow_gb);
            let mut notes = vec![
                Note::new(NOTE_POSSIBLE_OFFLOAD),
                Note::new(NOTE_POSSIBLE_SLOW_MEM_USAGE)
                    .with("used", required_slow_mem_gb)
                    .with("offloaded", offloaded),
            ];
            if overflow_gb > config.heavy_offload_threshold_gb {
                let warning = Note::new(NOTE_WARNING_HEAVY_OFFLOAD).with("offloaded", offloaded);
                notes.push(warning);
            }
            (Tier::DegradedOffload, required_slow_mem_gb, notes)
        }
        Classification::Infeasible => return None,
    };

    let encoder_ids: Vec<ReleaseId> = candidate.encoders.iter().map(|e| e.id).collect();
    let model = candidate.model;

    let decoder = match candidate.decoder {
        Some(release) => auxiliary_component(AuxiliaryKind::Decoder, release, config),
        None => AuxiliaryComponent {
            kind: AuxiliaryKind::Decoder,
            component: ComponentCost {
                release_id: None,
                name: NOT_APPLICABLE.to_string(),
                quantization: NOT_APPLICABLE.to_string(),
                cost_gb: 0.0,
            },
        },
    };

    Some(AnalysisResult {
        id: recipe_id(model.id, &encoder_ids, candidate.decoder.map(|d| d.id)),
        recipe_label: format!("{} ({})", base_model.name, model.quantization),
        model_id: base_model.id,
        model_category: base_model.category,
        tier,
        total_fast_mem_cost: fast_mem,
        total_slow_mem_cost: slow_mem,
        quality_score: model.quality_score,
        notes,
        components: ComponentBreakdown {
            model: ComponentCost {
                release_id: Some(model.id),
                name: base_model.name.clone(),
                quantization: model.quantization.clone(),
                cost_gb: config.round_cost(model.file_size_gb),
            },
            encoders: candidate
                .encoders
                .iter()
                .map(|e| auxiliary_component(AuxiliaryKind::Encoder, e, config))
                .collect(),
            decoder,
        },
    })
}

/// Sort by category, then tier, then quality (best first)
///
/// The id is the last key so equal results still order the same way.
pub fn rank(results: &mut [AnalysisResult]) {
    results.sort_by(|a, b| {
        a.model_category
            .rank()
            .cmp(&b.model_category.rank())
            .then_with(|| a.tier.rank().cmp(&b.tier.rank()))
            .then_with(|| b.quality_score.total_cmp(&a.quality_score))
            .then_with(|| a.id.cmp(&b.id))
    });
}
