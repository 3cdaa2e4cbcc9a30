//! Hardware compatibility analysis for generative-model pipelines
//!
//! Given a hardware profile (GPU memory, system memory) and a catalog of
//! model, encoder and decoder releases, this crate works out which
//! combinations of base model, quantization and auxiliary sub-models the
//! hardware can run, and whether they fit entirely in GPU memory or need
//! to offload part of the weights to system memory.
//!
//! ## Main Components
//!
//! - `catalog`: Typed catalog rows, indexing and the built-in catalog
//! - `analysis`: Recipe enumeration, cost model, tiers and champion selection
//! - `hardware`: Hardware profile, GPU registry and memory detection
//! - `config`: Configuration management

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod error;
pub mod hardware;

pub use analysis::{analyze, AnalysisResult, Analyzer, Tier};
pub use catalog::Catalog;
pub use config::Config;
pub use error::AnalysisError;
pub use hardware::HardwareProfile;

/// Library errors
pub use anyhow::{Error, Result};
