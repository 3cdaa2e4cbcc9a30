//! Starter catalog shipped with the binary

use super::builder::CatalogBuilder;
use super::types::{Catalog, ModelCategory};

// Base models
const SD15: u64 = 1;
const SDXL: u64 = 2;
const FLUX1_DEV: u64 = 3;
const WAN21_14B: u64 = 4;
const LLAMA31_8B: u64 = 5;

// Encoders
const CLIP_L: u64 = 1;
const CLIP_G: u64 = 2;
const T5_XXL: u64 = 3;
const UMT5_XXL: u64 = 4;

// Decoders
const VAE_SD15: u64 = 1;
const VAE_SDXL: u64 = 2;
const VAE_FLUX: u64 = 3;
const VAE_WAN: u64 = 4;

/// Catalog used when no catalog file is given
pub fn builtin_catalog() -> Catalog {
    use ModelCategory::*;

    let mut builder = CatalogBuilder::new();

    for (quant, size) in [("FP16", 2.13), ("GGUF Q8_0", 1.15), ("GGUF Q4_K_M", 0.68)] {
        let name = "Stable Diffusion 1.5";
        builder = builder.model_release(SD15, name, ImageGeneration, quant, size);
    }
    for (quant, size) in [
        ("FP16", 6.94),
        ("FP8", 3.47),
        ("GGUF Q8_0", 3.68),
        ("GGUF Q4_K_M", 2.02),
    ] {
        builder = builder.model_release(SDXL, "Stable Diffusion XL", ImageGeneration, quant, size);
    }
    for (quant, size) in [
        ("FP16", 23.8),
        ("FP8", 11.9),
        ("GGUF Q8_0", 12.7),
        ("GGUF Q6_K", 9.86),
        ("GGUF Q5_K_M", 8.42),
        ("GGUF Q4_K_M", 6.81),
        ("GGUF Q3_K_M", 5.23),
        ("GGUF Q2_K", 4.03),
    ] {
        builder = builder.model_release(FLUX1_DEV, "FLUX.1 [dev]", ImageGeneration, quant, size);
    }
    for (quant, size) in [
        ("FP16", 28.6),
        ("FP8", 14.3),
        ("GGUF Q8_0", 15.4),
        ("GGUF Q4_K_M", 9.12),
        ("GGUF Q3_K_M", 7.21),
    ] {
        builder = builder.model_release(WAN21_14B, "Wan 2.1 14B", VideoGeneration, quant, size);
    }
    for (quant, size) in [
        ("GGUF Q8_0", 8.54),
        ("GGUF Q6_K", 6.6),
        ("GGUF Q5_K_M", 5.73),
        ("GGUF Q4_K_M", 4.92),
        ("GGUF Q3_K_M", 4.02),
        ("GGUF Q2_K", 3.18),
    ] {
        builder = builder.model_release(LLAMA31_8B, "Llama 3.1 8B Instruct", Llm, quant, size);
    }

    builder
        .encoder_release(CLIP_L, "CLIP-L", "FP16", 0.25, &[SD15, SDXL, FLUX1_DEV])
        .encoder_release(CLIP_G, "CLIP-G", "FP16", 1.39, &[SDXL])
        .encoder_release(T5_XXL, "T5-XXL", "FP16", 9.79, &[FLUX1_DEV])
        .encoder_release(T5_XXL, "T5-XXL", "FP8", 4.89, &[FLUX1_DEV])
        .encoder_release(T5_XXL, "T5-XXL", "GGUF Q8_0", 5.06, &[FLUX1_DEV])
        .encoder_release(T5_XXL, "T5-XXL", "GGUF Q4_K_M", 2.9, &[FLUX1_DEV])
        .encoder_release(UMT5_XXL, "UMT5-XXL", "FP16", 11.4, &[WAN21_14B])
        .encoder_release(UMT5_XXL, "UMT5-XXL", "FP8", 6.74, &[WAN21_14B])
        .decoder_release(VAE_SD15, "VAE (SD 1.5)", "FP16", 0.32, &[SD15])
        .decoder_release(VAE_SDXL, "VAE (SDXL)", "FP16", 0.33, &[SDXL])
        .decoder_release(VAE_FLUX, "VAE (FLUX.1)", "FP16", 0.33, &[FLUX1_DEV])
        .decoder_release(VAE_WAN, "VAE (Wan 2.1)", "FP16", 0.25, &[WAN21_14B])
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogIndex;

    #[test]
    fn test_builtin_catalog_shape() {
        let catalog = builtin_catalog();
        let index = CatalogIndex::build(&catalog);

        assert_eq!(index.base_models.len(), 5);
        assert_eq!(index.required_encoder_ids(SDXL), &[CLIP_L, CLIP_G]);
        assert_eq!(index.required_encoder_ids(FLUX1_DEV), &[CLIP_L, T5_XXL]);
        assert!(index.required_encoder_ids(LLAMA31_8B).is_empty());
        assert_eq!(index.releases_by_encoder_id[&T5_XXL].len(), 4);
    }

    #[test]
    fn test_builtin_release_ids_unique_per_table() {
        let catalog = builtin_catalog();
        let mut ids: Vec<u64> = catalog.models.iter().map(|m| m.id).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }
}
