//! CLI command implementations

use anyhow::{Context, Result};
use ksimply_rs::analysis::{AnalysisResult, Analyzer, Note, Tier};
use ksimply_rs::catalog::{builtin_catalog, Catalog, CatalogIndex};
use ksimply_rs::config::Config;
use ksimply_rs::hardware::{
    annotate_precision, detect_system_memory_gb, find_gpu, list_gpus, parse_memory_gb, GpuSpec,
    HardwareProfile, StorageKind,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub struct AnalyzeArgs {
    pub gpu: Option<String>,
    pub vram: Option<String>,
    pub ram: Option<String>,
    pub storage: String,
    pub catalog: Option<String>,
    pub config: Option<String>,
    pub output: Option<String>,
    pub save: bool,
    pub json: bool,
}

/// Saved analysis run
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub generated_at: String,
    pub gpu: Option<String>,
    pub hardware: HardwareProfile,
    pub results: Vec<AnalysisResult>,
}

impl AnalysisReport {
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("writing report {}", path.display()))?;
        Ok(())
    }
}

fn load_config(path: Option<&str>) -> Result<Config> {
    match path {
        Some(p) => Config::load(p),
        None => Ok(Config::default()),
    }
}

fn load_catalog(path: Option<&str>, config: &Config) -> Result<Catalog> {
    let path = path
        .map(PathBuf::from)
        .or_else(|| config.paths.catalog_file());
    let catalog = match path {
        Some(p) => Catalog::load(p)?,
        None => builtin_catalog(),
    };
    if catalog.is_empty() {
        tracing::warn!("catalog has no model releases, nothing to analyze");
    }
    Ok(catalog)
}

/// Hardware profile plus the registry entry when the GPU was named
fn resolve_hardware(args: &AnalyzeArgs) -> Result<(HardwareProfile, Option<&'static GpuSpec>)> {
    let (fast_memory_gb, gpu) = match (&args.gpu, &args.vram) {
        (Some(name), _) => {
            let gpu = find_gpu(name)
                .ok_or_else(|| anyhow::anyhow!("GPU not found: {}. Run `ksimply gpus`", name))?;
            (gpu.vram_gb, Some(gpu))
        }
        (None, Some(vram)) => (parse_memory_gb(vram, "fast_memory_gb")?, None),
        (None, None) => anyhow::bail!("Specify the GPU with --gpu <NAME> or --vram <GB>"),
    };

    let slow_memory_gb = match &args.ram {
        Some(ram) => parse_memory_gb(ram, "slow_memory_gb")?,
        None => detect_system_memory_gb()
            .ok_or_else(|| anyhow::anyhow!("Could not detect memory. Use --ram <GB>"))?,
    };

    let storage: StorageKind = args.storage.parse()?;
    let hardware = HardwareProfile::new(fast_memory_gb, slow_memory_gb, storage);
    hardware.validate()?;
    Ok((hardware, gpu))
}

pub fn analyze(args: AnalyzeArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let catalog = load_catalog(args.catalog.as_deref(), &config)?;
    let (hardware, gpu) = resolve_hardware(&args)?;

    let analyzer = Analyzer::new(config.analyzer.clone())?;
    let mut results = analyzer.analyze(&hardware, &catalog)?;
    if let Some(gpu) = gpu {
        annotate_precision(&mut results, gpu);
    }

    let now = chrono::Utc::now();
    let report_path = match (&args.output, args.save) {
        (Some(output), _) => Some(PathBuf::from(output)),
        (None, true) => Some(
            config
                .paths
                .report_file(&format!("analysis_{}", now.format("%Y%m%d_%H%M%S"))),
        ),
        (None, false) => None,
    };
    if let Some(path) = report_path {
        let report = AnalysisReport {
            generated_at: now.to_rfc3339(),
            gpu: args.gpu.clone(),
            hardware: hardware.clone(),
            results: results.clone(),
        };
        report.save(&path)?;
        tracing::info!("report saved to {}", path.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    print_results(&hardware, &results);
    Ok(())
}

fn print_results(hardware: &HardwareProfile, results: &[AnalysisResult]) {
    println!();
    println!("╔══════════════════════════════════════════════════════════════════════╗");
    println!(
        "║  Hardware: {:.1}GB VRAM | {:.1}GB RAM | {}",
        hardware.fast_memory_gb, hardware.slow_memory_gb, hardware.storage
    );
    println!("╠══════════════════════════════════════════════════════════════════════╣");
    println!("║  RECIPE RECOMMENDATIONS                                              ║");
    println!("╚══════════════════════════════════════════════════════════════════════╝");
    println!();

    if results.is_empty() {
        println!("  No recipe in the catalog runs on this hardware.");
        println!();
        return;
    }

    let mut current_category = None;
    for result in results {
        if current_category != Some(result.model_category) {
            current_category = Some(result.model_category);
            println!("── {} ──", result.model_category);
        }

        let status = match result.tier {
            Tier::Optimal => "✅ OPTIMAL",
            Tier::DegradedOffload => "⚠️  OFFLOAD",
        };
        println!("  {} - {}", status, result.recipe_label);
        println!(
            "    VRAM: {:.2}GB | RAM: {:.2}GB | Quality: {}",
            result.total_fast_mem_cost, result.total_slow_mem_cost, result.quality_score
        );

        let components = &result.components;
        let encoders: Vec<String> = components
            .encoders
            .iter()
            .map(|e| format!("{} ({})", e.component.name, e.component.quantization))
            .collect();
        println!(
            "    Encoders: {} | VAE: {}",
            if encoders.is_empty() {
                "none".to_string()
            } else {
                encoders.join(", ")
            },
            components.decoder.component.name
        );

        for note in &result.notes {
            println!("    • {}", render_note(note));
        }
        println!();
    }

    if hardware.storage == StorageKind::Hdd {
        println!("  Note: loading weights from an HDD makes startup noticeably slower.");
        println!();
    }
}

/// English text for a note key
pub fn render_note(note: &Note) -> String {
    let param = |name: &str| note.params.get(name).copied().unwrap_or(0.0);
    let subject = note.subject.as_deref().unwrap_or("This precision");

    match note.key.as_str() {
        "note_optimal_all_in_fast_mem" => "Runs entirely in GPU memory.".to_string(),
        "note_optimal_fast_mem_usage" => format!(
            "Uses about {:.2}GB of {:.1}GB VRAM.",
            param("used"),
            param("total")
        ),
        "note_possible_offload" => {
            "Runs with part of the weights offloaded to system memory.".to_string()
        }
        "note_possible_slow_mem_usage" => format!(
            "Needs about {:.2}GB of system RAM ({:.2}GB offloaded).",
            param("used"),
            param("offloaded")
        ),
        "note_warning_heavy_offload" => format!(
            "Heavy offload ({:.2}GB): expect much slower generation.",
            param("offloaded")
        ),
        "note_precision_software_fallback" => format!(
            "{} runs through a software fallback on this GPU: expect slower generation.",
            subject
        ),
        "note_precision_unsupported" => format!("{} is not supported by this GPU.", subject),
        other => other.to_string(),
    }
}

pub fn gpus() -> Result<()> {
    println!(
        "{:<28} {:>8}  {:<12} {:<9} {:<9}",
        "GPU", "VRAM", "FAMILY", "FP8", "FP4"
    );
    for gpu in list_gpus() {
        println!(
            "{:<28} {:>6.0}GB  {:<12} {:<9} {:<9}",
            gpu.name,
            gpu.vram_gb,
            label(gpu.family)?,
            label(gpu.fp8_support)?,
            label(gpu.fp4_support)?,
        );
    }
    Ok(())
}

/// Serialized name of a unit enum variant
fn label<T: Serialize>(value: T) -> Result<String> {
    let value = serde_json::to_value(value)?;
    Ok(value.as_str().unwrap_or("?").to_string())
}

pub fn models(catalog: Option<String>) -> Result<()> {
    let catalog = load_catalog(catalog.as_deref(), &Config::default())?;
    let index = CatalogIndex::build(&catalog);

    for name in catalog.model_names() {
        let category = index
            .base_models
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.category.label())
            .unwrap_or("?");
        println!("  {} ({})", name, category);
    }
    Ok(())
}

pub fn config(output: Option<String>) -> Result<()> {
    let config = Config::default();
    match output {
        Some(path) => {
            config.save(&path)?;
            println!("Default configuration written to {}", path);
        }
        None => println!("{}", serde_json::to_string_pretty(&config)?),
    }
    Ok(())
}
