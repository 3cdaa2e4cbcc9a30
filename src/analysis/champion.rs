//! Best recipe per base model and tier

use std::cmp::Ordering;

use super::cost::RecipeCost;
use super::tier::{Classification, Tier};
use crate::catalog::{AuxiliaryRelease, ModelRelease};
use crate::config::AnalyzerConfig;

/// Lexicographic score of a recipe, higher is better in every position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreVector {
    pub model_priority: f64,
    pub model_quality: f64,
    pub mean_aux_priority: f64,
    pub mean_aux_quality: f64,
    /// Negated fast memory cost, so cheaper recipes score higher
    pub neg_fast_mem_gb: f64,
}

impl ScoreVector {
    pub fn new(
        model: &ModelRelease,
        auxiliaries: &[&AuxiliaryRelease],
        fast_mem_gb: f64,
        config: &AnalyzerConfig,
    ) -> Self {
        let (mean_aux_priority, mean_aux_quality) = if auxiliaries.is_empty() {
            (config.empty_aux_priority, config.empty_aux_quality)
        } else {
            let n = auxiliaries.len() as f64;
            (
                auxiliaries.iter().map(|a| a.priority as f64).sum::<f64>() / n,
                auxiliaries.iter().map(|a| a.quality_score).sum::<f64>() / n,
            )
        };

        Self {
            model_priority: model.priority as f64,
            model_quality: model.quality_score,
            mean_aux_priority,
            mean_aux_quality,
            neg_fast_mem_gb: -fast_mem_gb,
        }
    }

    fn as_array(&self) -> [f64; 5] {
        [
            self.model_priority,
            self.model_quality,
            self.mean_aux_priority,
            self.mean_aux_quality,
            self.neg_fast_mem_gb,
        ]
    }

    /// Compare element by element; the first strict difference decides
    pub fn compare(&self, other: &Self) -> Ordering {
        self.as_array()
            .iter()
            .zip(other.as_array().iter())
            .map(|(a, b)| a.total_cmp(b))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

/// A feasible recipe together with its evaluation
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    pub model: &'a ModelRelease,
    pub encoders: Vec<&'a AuxiliaryRelease>,
    pub decoder: Option<&'a AuxiliaryRelease>,
    pub cost: RecipeCost,
    pub classification: Classification,
    pub score: ScoreVector,
}

impl<'a> Candidate<'a> {
    pub fn tier(&self) -> Option<Tier> {
        self.classification.tier()
    }
}

/// Champion slots of one base model
#[derive(Debug, Default)]
pub struct ChampionSlots<'a> {
    pub optimal: Option<Candidate<'a>>,
    pub degraded: Option<Candidate<'a>>,
}

impl<'a> ChampionSlots<'a> {
    /// Offer a candidate; returns whether it became the champion of its tier
    ///
    /// Ties keep the incumbent. Infeasible candidates are ignored.
    pub fn offer(&mut self, candidate: Candidate<'a>) -> bool {
        let slot = match candidate.tier() {
            Some(Tier::Optimal) => &mut self.optimal,
            Some(Tier::DegradedOffload) => &mut self.degraded,
            None => return false,
        };

        let replace = match slot.as_ref() {
            Some(current) => candidate.score.compare(&current.score) == Ordering::Greater,
            None => true,
        };
        if replace {
            *slot = Some(candidate);
        }
        replace
    }

    /// Champions in tier order
    pub fn into_champions(self) -> impl Iterator<Item = Candidate<'a>> {
        self.optimal.into_iter().chain(self.degraded)
    }
}
