pub mod builder;
pub mod builtin;
pub mod index;
pub mod types;

use anyhow::Context;
use std::fs;
use std::path::Path;

pub use builder::{
    find_quantization, CatalogBuilder, GpuRequirements, Quantization, QUANTIZATIONS,
};
pub use builtin::builtin_catalog;
pub use index::CatalogIndex;
pub use types::{
    AuxiliaryId, AuxiliaryKind, AuxiliaryRelease, BaseModel, Catalog, ModelCategory, ModelId,
    ModelRelease, ReleaseId,
};

impl Catalog {
    /// Load a catalog payload from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading catalog {}", path.display()))?;
        let catalog: Self = serde_json::from_str(&json)
            .with_context(|| format!("parsing catalog {}", path.display()))?;

        tracing::info!(
            "loaded catalog {}: {} model, {} encoder, {} decoder rows",
            path.display(),
            catalog.models.len(),
            catalog.encoders.len(),
            catalog.decoders.len()
        );
        Ok(catalog)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)
            .with_context(|| format!("writing catalog {}", path.as_ref().display()))?;
        Ok(())
    }
}
