use std::collections::HashMap;

use ksimply_rs::analysis::{
    analyze, max_offload_gb, AnalysisResult, Analyzer, AuxiliaryPermutations, Tier,
};
use ksimply_rs::catalog::{builtin_catalog, Catalog, CatalogBuilder, CatalogIndex, ModelCategory};
use ksimply_rs::config::AnalyzerConfig;
use ksimply_rs::hardware::{HardwareProfile, StorageKind};
use ksimply_rs::AnalysisError;

const IMAGE: ModelCategory = ModelCategory::ImageGeneration;

fn hw(fast: f64, slow: f64) -> HardwareProfile {
    HardwareProfile::new(fast, slow, StorageKind::Ssd)
}

/// One model (10GB) with one required encoder (2GB), no decoder
fn single_model_catalog() -> Catalog {
    CatalogBuilder::new()
        .model_release(1, "Test Model", IMAGE, "FP16", 10.0)
        .encoder_release(1, "Test Encoder", "FP16", 2.0, &[1])
        .build()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn test_fits_in_fast_memory() {
    let results = analyze(&hw(24.0, 32.0), &single_model_catalog()).unwrap();

    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert_eq!(result.tier, Tier::Optimal);
    assert!(approx(result.total_fast_mem_cost, 12.36));
    assert_eq!(result.total_slow_mem_cost, 2.0);
    assert_eq!(result.notes[0].key, "note_optimal_all_in_fast_mem");
    assert_eq!(result.notes[1].params["used"], 12.36);
    assert_eq!(result.notes[1].params["total"], 24.0);
}

#[test]
fn test_offloads_on_small_gpu() {
    let results = analyze(&hw(8.0, 16.0), &single_model_catalog()).unwrap();

    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert_eq!(result.tier, Tier::DegradedOffload);
    assert!(approx(result.total_fast_mem_cost, 12.36));
    assert!(approx(result.total_slow_mem_cost, 6.36));

    let keys: Vec<&str> = result.notes.iter().map(|n| n.key.as_str()).collect();
    assert_eq!(
        keys,
        vec!["note_possible_offload", "note_possible_slow_mem_usage"]
    );
    assert_eq!(result.notes[1].params["offloaded"], 4.36);
}

#[test]
fn test_reported_costs_agree_with_tier_at_rounding_edge() {
    // 7.7705 * 1.03 = 8.0036, just over 8GB until rounded up
    let catalog = CatalogBuilder::new()
        .model_release(1, "Edge", IMAGE, "FP16", 7.7705)
        .build();

    let results = analyze(&hw(8.0, 32.0), &catalog).unwrap();
    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert_eq!(result.tier, Tier::DegradedOffload);
    assert_eq!(result.total_fast_mem_cost, 8.01);
    assert!(result.total_fast_mem_cost > 8.0);
    assert_eq!(result.total_slow_mem_cost, 2.01);

    let offloaded = result.notes[1].params["offloaded"];
    assert_eq!(offloaded, 0.01);
    assert!(offloaded > 0.0);
}

#[test]
fn test_permutations_empty_when_required_encoder_has_no_releases() {
    // Model 1 requires encoders 1 and 2; take away every release of encoder 2
    let catalog = CatalogBuilder::new()
        .model_release(1, "Needs Two", IMAGE, "FP16", 4.0)
        .encoder_release(1, "Encoder A", "FP16", 1.0, &[1])
        .encoder_release(2, "Encoder B", "FP16", 1.0, &[1])
        .build();

    let mut index = CatalogIndex::build(&catalog);
    index.releases_by_encoder_id.remove(&2);
    let perms = AuxiliaryPermutations::new(
        index.required_encoder_ids(1),
        &index.releases_by_encoder_id,
    );
    assert_eq!(perms.count(), 0);
}

#[test]
fn test_equal_scores_pick_cheaper_release() {
    let catalog = CatalogBuilder::new()
        .quantization("Variant A", 90.0, 15)
        .quantization("Variant B", 90.0, 15)
        .model_release(1, "Twin", IMAGE, "Variant A", 6.0)
        .model_release(1, "Twin", IMAGE, "Variant B", 4.0)
        .build();

    let results = analyze(&hw(12.0, 16.0), &catalog).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].components.model.quantization, "Variant B");
    assert_eq!(results[0].components.model.cost_gb, 4.0);
}

#[test]
fn test_priority_wins_over_cost() {
    let results = analyze(&hw(12.0, 16.0), &builtin_catalog()).unwrap();
    let sd15 = results
        .iter()
        .find(|r| r.recipe_label.starts_with("Stable Diffusion 1.5"))
        .unwrap();
    // FP16 has the highest priority and fits, so it beats the smaller GGUF files
    assert_eq!(sd15.recipe_label, "Stable Diffusion 1.5 (FP16)");
}

#[test]
fn test_high_end_filter_skips_low_priority_releases() {
    let catalog = CatalogBuilder::new()
        .model_release(1, "Tiny Only", ModelCategory::Llm, "GGUF Q2_K", 3.0)
        .build();

    assert_eq!(analyze(&hw(16.0, 32.0), &catalog).unwrap().len(), 1);
    assert!(analyze(&hw(24.0, 32.0), &catalog).unwrap().is_empty());

    let relaxed = Analyzer::new(AnalyzerConfig {
        min_priority_for_high_end: 0,
        ..Default::default()
    })
    .unwrap();
    let results = relaxed.analyze(&hw(24.0, 32.0), &catalog).unwrap();
    assert_eq!(results.len(), 1);
}

#[test]
fn test_infeasible_recipes_are_dropped() {
    let catalog = CatalogBuilder::new()
        .model_release(1, "Huge", ModelCategory::VideoGeneration, "FP16", 200.0)
        .build();
    assert!(analyze(&hw(8.0, 32.0), &catalog).unwrap().is_empty());
}

#[test]
fn test_empty_catalog() {
    let catalog = Catalog::default();
    assert!(catalog.is_empty());
    assert!(analyze(&hw(24.0, 32.0), &catalog).unwrap().is_empty());
}

#[test]
fn test_invalid_hardware_is_an_error() {
    let err = analyze(&hw(-1.0, 32.0), &builtin_catalog()).unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::InvalidInput {
            field: "fast_memory_gb",
            ..
        }
    ));

    assert!(HardwareProfile::parse("a lot", "32", "ssd").is_err());
}

#[test]
fn test_both_tiers_for_one_model() {
    // Q4 fits in 8GB, FP16 only with offload
    let catalog = CatalogBuilder::new()
        .model_release(1, "Split", IMAGE, "FP16", 10.0)
        .model_release(1, "Split", IMAGE, "GGUF Q4_K_M", 5.0)
        .build();

    let results = analyze(&hw(8.0, 32.0), &catalog).unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].tier, Tier::Optimal);
    assert_eq!(results[0].recipe_label, "Split (GGUF Q4_K_M)");
    assert_eq!(results[1].tier, Tier::DegradedOffload);
    assert_eq!(results[1].recipe_label, "Split (FP16)");
    assert_ne!(results[0].id, results[1].id);
}

// Properties over the built-in catalog across a range of hardware

fn hardware_grid() -> Vec<HardwareProfile> {
    let mut grid = Vec::new();
    for fast in [0.0, 4.0, 7.0, 8.0, 12.0, 16.0, 20.0, 24.0, 48.0, 80.0] {
        for slow in [0.0, 8.0, 16.0, 32.0, 64.0, 128.0] {
            grid.push(hw(fast, slow));
        }
    }
    grid
}

#[test]
fn test_output_is_deterministic() {
    let catalog = builtin_catalog();
    for hardware in hardware_grid() {
        let first = analyze(&hardware, &catalog).unwrap();
        let second = analyze(&hardware, &catalog).unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}

#[test]
fn test_results_cover_every_required_encoder() {
    let catalog = builtin_catalog();
    let index = CatalogIndex::build(&catalog);
    for hardware in hardware_grid() {
        for result in analyze(&hardware, &catalog).unwrap() {
            let required = index.required_encoder_ids(result.model_id);
            assert_eq!(result.components.encoders.len(), required.len());
        }
    }
}

#[test]
fn test_tier_correctness() {
    let config = AnalyzerConfig::default();
    let catalog = builtin_catalog();

    for hardware in hardware_grid() {
        let max_offload = max_offload_gb(&hardware, &config);
        for result in analyze(&hardware, &catalog).unwrap() {
            let fast = result.total_fast_mem_cost;
            match result.tier {
                Tier::Optimal => assert!(fast <= hardware.fast_memory_gb),
                Tier::DegradedOffload => {
                    let overflow = fast - hardware.fast_memory_gb;
                    assert!(overflow > 0.0);
                    assert!(overflow <= max_offload);
                    assert!(result.total_slow_mem_cost <= hardware.slow_memory_gb);
                }
            }
        }
    }
}

#[test]
fn test_at_most_one_result_per_tier_and_model() {
    let catalog = builtin_catalog();
    for hardware in hardware_grid() {
        let mut by_model: HashMap<u64, Vec<Tier>> = HashMap::new();
        for result in analyze(&hardware, &catalog).unwrap() {
            let tiers = by_model.entry(result.model_id).or_default();
            tiers.push(result.tier);
        }
        for tiers in by_model.values() {
            assert!(tiers.len() <= 2);
            if tiers.len() == 2 {
                assert!(tiers.contains(&Tier::Optimal));
                assert!(tiers.contains(&Tier::DegradedOffload));
            }
        }
    }
}

fn optimal_models(results: &[AnalysisResult]) -> Vec<u64> {
    results
        .iter()
        .filter(|r| r.tier == Tier::Optimal)
        .map(|r| r.model_id)
        .collect()
}

#[test]
fn test_more_fast_memory_never_loses_optimal_results() {
    // Stay on one side of the high-end threshold, which changes the candidate set
    let catalog = builtin_catalog();
    for slow in [16.0, 64.0] {
        let mut previous: Vec<u64> = Vec::new();
        for fast in [2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0] {
            let results = analyze(&hw(fast, slow), &catalog).unwrap();
            let current = optimal_models(&results);
            for model_id in &previous {
                assert!(current.contains(model_id));
            }
            previous = current;
        }
    }
}

#[test]
fn test_global_order() {
    let results = analyze(&hw(12.0, 64.0), &builtin_catalog()).unwrap();
    assert!(!results.is_empty());
    for pair in results.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let key_a = (a.model_category.rank(), a.tier.rank());
        let key_b = (b.model_category.rank(), b.tier.rank());
        assert!(key_a <= key_b);
        if key_a == key_b {
            assert!(a.quality_score >= b.quality_score);
        }
    }
}
