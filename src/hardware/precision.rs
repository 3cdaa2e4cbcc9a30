//! Reduced-precision support of a resolved GPU
//!
//! The engine only sees memory sizes. Once the caller knows the actual
//! card, results whose components use a precision the card runs through
//! a software fallback, or not at all, get a note naming that precision.

use super::gpus::{GpuSpec, PrecisionSupport};
use crate::analysis::{
    AnalysisResult, Note, NOTE_PRECISION_SOFTWARE_FALLBACK, NOTE_PRECISION_UNSUPPORTED,
};
use crate::catalog::{find_quantization, Quantization};

impl GpuSpec {
    /// Weaker of the family requirement and the card's own flag
    pub fn precision_support(&self, quantization: &Quantization) -> PrecisionSupport {
        let by_family = quantization.support_on(self.family);
        let by_card = match quantization.name.as_str() {
            "FP8" => self.fp8_support,
            "FP4" => self.fp4_support,
            _ => PrecisionSupport::Native,
        };
        by_family.max(by_card)
    }
}

/// Attach precision notes for `gpu` to every result
///
/// Each quantization is noted once per result, whichever components use it.
/// Names missing from the standard table are left alone.
pub fn annotate_precision(results: &mut [AnalysisResult], gpu: &GpuSpec) {
    for result in results.iter_mut() {
        let components = &result.components;
        let mut names: Vec<&str> = vec![components.model.quantization.as_str()];
        names.extend(
            components
                .encoders
                .iter()
                .map(|e| e.component.quantization.as_str()),
        );
        names.push(components.decoder.component.quantization.as_str());

        let mut seen = Vec::new();
        let mut notes = Vec::new();
        for quantization in names.into_iter().filter_map(find_quantization) {
            if seen.contains(&quantization.name) {
                continue;
            }
            seen.push(quantization.name.clone());

            let key = match gpu.precision_support(quantization) {
                PrecisionSupport::Native => continue,
                PrecisionSupport::Software => NOTE_PRECISION_SOFTWARE_FALLBACK,
                PrecisionSupport::None => NOTE_PRECISION_UNSUPPORTED,
            };
            tracing::debug!("{}: {} on {}", result.id, key, gpu.name);
            notes.push(Note::new(key).about(&quantization.name));
        }
        result.notes.extend(notes);
    }
}
