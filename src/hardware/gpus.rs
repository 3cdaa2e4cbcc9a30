//! GPU registry used to resolve a GPU name into fast memory

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// GPU architecture family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GpuFamily {
    #[serde(rename = "rtx-40")]
    Rtx40,
    #[serde(rename = "rtx-30")]
    Rtx30,
    #[serde(rename = "rtx-20")]
    Rtx20,
    #[serde(rename = "amd-rx-7000")]
    AmdRx7000,
    #[serde(rename = "generic")]
    Generic,
}

/// How a reduced precision is executed on a GPU, strongest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrecisionSupport {
    Native,
    Software,
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GpuSpec {
    pub name: String,
    pub vram_gb: f64,
    pub family: GpuFamily,
    pub fp8_support: PrecisionSupport,
    pub fp4_support: PrecisionSupport,
}

fn gpu(
    name: &str,
    vram_gb: f64,
    family: GpuFamily,
    fp8_support: PrecisionSupport,
    fp4_support: PrecisionSupport,
) -> GpuSpec {
    GpuSpec {
        name: name.to_string(),
        vram_gb,
        family,
        fp8_support,
        fp4_support,
    }
}

/// Known GPUs, in no particular order
pub static GPU_REGISTRY: Lazy<Vec<GpuSpec>> = Lazy::new(|| {
    use GpuFamily::*;
    use PrecisionSupport as P;

    vec![
        // Ada Lovelace
        gpu("GeForce RTX 4090", 24.0, Rtx40, P::Native, P::Native),
        gpu("GeForce RTX 4080", 16.0, Rtx40, P::Native, P::Native),
        gpu("GeForce RTX 4070 Ti", 12.0, Rtx40, P::Native, P::Native),
        gpu("GeForce RTX 4060 Ti", 16.0, Rtx40, P::Native, P::Native),
        gpu("GeForce RTX 4060", 8.0, Rtx40, P::Native, P::Native),
        // Ampere
        gpu("GeForce RTX 3090", 24.0, Rtx30, P::Software, P::None),
        gpu("GeForce RTX 3080", 10.0, Rtx30, P::Software, P::None),
        gpu("GeForce RTX 3060", 12.0, Rtx30, P::None, P::None),
        // Turing
        gpu("GeForce RTX 2080 Ti", 11.0, Rtx20, P::Software, P::None),
        gpu("GeForce RTX 2060", 6.0, Rtx20, P::None, P::None),
        // RDNA 3
        gpu("Radeon RX 7900 XTX", 24.0, AmdRx7000, P::Software, P::None),
        gpu("Radeon RX 7600", 8.0, AmdRx7000, P::None, P::None),
    ]
});

/// Look up a GPU by name, ignoring case and surrounding whitespace
pub fn find_gpu(name: &str) -> Option<&'static GpuSpec> {
    let wanted = name.trim().to_lowercase();
    GPU_REGISTRY
        .iter()
        .find(|g| g.name.to_lowercase() == wanted)
}

/// All known GPUs sorted by name
pub fn list_gpus() -> Vec<&'static GpuSpec> {
    let mut gpus: Vec<&GpuSpec> = GPU_REGISTRY.iter().collect();
    gpus.sort_by(|a, b| a.name.cmp(&b.name));
    gpus
}
