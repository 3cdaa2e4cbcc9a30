pub mod detection;
pub mod gpus;
pub mod precision;
pub mod profile;

pub use detection::detect_system_memory_gb;
pub use gpus::{find_gpu, list_gpus, GpuFamily, GpuSpec, PrecisionSupport, GPU_REGISTRY};
pub use precision::annotate_precision;
pub use profile::{parse_memory_gb, HardwareProfile, StorageKind};
