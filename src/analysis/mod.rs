//! Hardware compatibility analysis
//!
//! For every base model in the catalog the analyzer walks all recipes
//! (model release × one release per required encoder × decoder choice),
//! classifies each against the hardware, and keeps the best recipe per
//! tier. The result is a pure function of the hardware, the catalog and
//! the configuration.

pub mod champion;
pub mod cost;
pub mod permutations;
pub mod report;
pub mod tier;

pub use champion::{Candidate, ChampionSlots, ScoreVector};
pub use cost::{recipe_cost, RecipeCost};
pub use permutations::AuxiliaryPermutations;
pub use report::{
    rank, recipe_id, AnalysisResult, AuxiliaryComponent, ComponentBreakdown, ComponentCost, Note,
    NOTE_PRECISION_SOFTWARE_FALLBACK, NOTE_PRECISION_UNSUPPORTED, NOT_APPLICABLE,
};
pub use tier::{classify, max_offload_gb, Classification, Tier};

use crate::catalog::{AuxiliaryRelease, BaseModel, Catalog, CatalogIndex};
use crate::config::AnalyzerConfig;
use crate::error::AnalysisError;
use crate::hardware::HardwareProfile;

/// Analyze with the default configuration
pub fn analyze(
    hardware: &HardwareProfile,
    catalog: &Catalog,
) -> Result<Vec<AnalysisResult>, AnalysisError> {
    Analyzer::default().analyze(hardware, catalog)
}

/// Runs the analysis with a fixed configuration
///
/// Holds no state between calls and can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn analyze(
        &self,
        hardware: &HardwareProfile,
        catalog: &Catalog,
    ) -> Result<Vec<AnalysisResult>, AnalysisError> {
        hardware.validate()?;

        let index = CatalogIndex::build(catalog);
        let mut results = Vec::new();

        for base_model in &index.base_models {
            let slots = self.select_champions(base_model, &index, hardware);
            results.extend(
                slots
                    .into_champions()
                    .filter_map(|c| report::compose(&c, base_model, hardware, &self.config)),
            );
        }

        rank(&mut results);

        tracing::info!(
            "analysis for {:.1}GB fast / {:.1}GB slow: {} results from {} base models",
            hardware.fast_memory_gb,
            hardware.slow_memory_gb,
            results.len(),
            index.base_models.len()
        );
        Ok(results)
    }

    /// Whether a model release is considered at all on this hardware
    pub fn is_admissible(&self, priority: i64, hardware: &HardwareProfile) -> bool {
        !(hardware.fast_memory_gb > self.config.high_end_threshold_gb
            && priority < self.config.min_priority_for_high_end)
    }

    fn select_champions<'a>(
        &self,
        base_model: &BaseModel,
        index: &CatalogIndex<'a>,
        hardware: &HardwareProfile,
    ) -> ChampionSlots<'a> {
        let mut slots = ChampionSlots::default();
        let required = index.required_encoder_ids(base_model.id);
        let decoder_choices: Vec<Option<&'a AuxiliaryRelease>> =
            match index.decoder_releases(base_model.id) {
                [] => vec![None],
                decoders => decoders.iter().copied().map(Some).collect(),
            };

        let permutations = AuxiliaryPermutations::new(required, &index.releases_by_encoder_id);
        let combinations = permutations.total();
        let mut evaluated = 0usize;
        let mut skipped = 0usize;

        for &model in index.model_releases(base_model.id) {
            if !self.is_admissible(model.priority, hardware) {
                skipped += 1;
                continue;
            }

            for encoders in permutations.clone() {
                debug_assert_eq!(encoders.len(), required.len());

                for &decoder in &decoder_choices {
                    evaluated += 1;
                    let cost = recipe_cost(model, &encoders, decoder, &self.config);
                    let classification = classify(cost.fast_mem_gb, hardware, &self.config);
                    tracing::trace!(
                        "{} ({}): {:.2}GB fast, {:.2}GB fully offloaded, {:?}",
                        base_model.name,
                        model.quantization,
                        cost.fast_mem_gb,
                        cost.slow_mem_gb,
                        classification
                    );
                    if classification == Classification::Infeasible {
                        continue;
                    }

                    let mut auxiliaries = encoders.clone();
                    auxiliaries.extend(decoder);
                    let score =
                        ScoreVector::new(model, &auxiliaries, cost.fast_mem_gb, &self.config);

                    slots.offer(Candidate {
                        model,
                        encoders: encoders.clone(),
                        decoder,
                        cost,
                        classification,
                        score,
                    });
                }
            }
        }

        tracing::debug!(
            "{}: {} releases ({} skipped), {} encoder combinations x {} decoders, \
             {} recipes evaluated, optimal={}, offload={}",
            base_model.name,
            index.model_releases(base_model.id).len(),
            skipped,
            combinations,
            decoder_choices.len(),
            evaluated,
            slots.optimal.is_some(),
            slots.degraded.is_some()
        );

        slots
    }
}
