//! Typed catalog rows
//!
//! Rows arrive already joined: every release carries its owner's name,
//! its quantization name, quality score and priority.

use serde::{Deserialize, Serialize};
use std::fmt;

pub type ReleaseId = u64;
pub type ModelId = u64;
pub type AuxiliaryId = u64;

/// What a base model generates
///
/// Unknown labels deserialize to `Other` instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ModelCategory {
    ImageGeneration,
    VideoGeneration,
    AudioGeneration,
    Llm,
    Other,
}

impl ModelCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ModelCategory::ImageGeneration => "Image Generation",
            ModelCategory::VideoGeneration => "Video Generation",
            ModelCategory::AudioGeneration => "Audio Generation",
            ModelCategory::Llm => "LLM",
            ModelCategory::Other => "Other",
        }
    }

    /// Position in the final result ordering
    pub fn rank(&self) -> u8 {
        match self {
            ModelCategory::ImageGeneration => 0,
            ModelCategory::VideoGeneration => 1,
            ModelCategory::AudioGeneration => 2,
            ModelCategory::Llm => 3,
            ModelCategory::Other => 4,
        }
    }
}

impl From<String> for ModelCategory {
    fn from(label: String) -> Self {
        match label.trim().to_lowercase().as_str() {
            "image generation" | "imagegen" | "image" => ModelCategory::ImageGeneration,
            "video generation" | "videogen" | "video" => ModelCategory::VideoGeneration,
            "audio generation" | "music generation" | "audiogen" | "audio" => {
                ModelCategory::AudioGeneration
            }
            "llm" => ModelCategory::Llm,
            _ => ModelCategory::Other,
        }
    }
}

impl From<ModelCategory> for String {
    fn from(category: ModelCategory) -> Self {
        category.label().to_string()
    }
}

impl fmt::Display for ModelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A base model, deduplicated from its releases
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseModel {
    pub id: ModelId,
    pub name: String,
    pub category: ModelCategory,
}

/// One downloadable variant of a base model at a given quantization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRelease {
    pub id: ReleaseId,
    pub model_id: ModelId,
    pub model_name: String,
    pub category: ModelCategory,
    pub quantization: String,
    pub file_size_gb: f64,
    pub quality_score: f64,
    pub priority: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
}

/// Encoder or decoder (VAE)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuxiliaryKind {
    Encoder,
    Decoder,
}

/// One variant of an auxiliary sub-model, paired with one compatible model
///
/// A release compatible with several models appears once per model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuxiliaryRelease {
    pub id: ReleaseId,
    pub owner_id: AuxiliaryId,
    pub owner_name: String,
    pub quantization: String,
    pub file_size_gb: f64,
    pub quality_score: f64,
    pub priority: i64,
    pub compatible_model_id: ModelId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
}

/// The denormalized catalog payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub models: Vec<ModelRelease>,
    #[serde(default)]
    pub encoders: Vec<AuxiliaryRelease>,
    #[serde(default, alias = "vaes")]
    pub decoders: Vec<AuxiliaryRelease>,
}

impl Catalog {
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Distinct base model names, sorted
    pub fn model_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.models.iter().map(|m| m.model_name.clone()).collect();
        names.sort();
        names.dedup();
        names
    }
}
