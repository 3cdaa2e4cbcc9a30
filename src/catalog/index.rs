//! Lookup structures built once per analysis call

use std::collections::{HashMap, HashSet};

use super::types::{
    AuxiliaryId, AuxiliaryRelease, BaseModel, Catalog, ModelId, ModelRelease, ReleaseId,
};

/// Borrowed index over a catalog payload
///
/// Every list keeps the payload's row order. Join duplicates of the same
/// release id under one key are indexed once.
#[derive(Debug, Default)]
pub struct CatalogIndex<'a> {
    /// First-seen order; the first row wins on conflicting name or category
    pub base_models: Vec<BaseModel>,
    pub releases_by_model_id: HashMap<ModelId, Vec<&'a ModelRelease>>,
    pub required_encoder_ids_by_model_id: HashMap<ModelId, Vec<AuxiliaryId>>,
    pub releases_by_encoder_id: HashMap<AuxiliaryId, Vec<&'a AuxiliaryRelease>>,
    pub releases_by_decoder_model_id: HashMap<ModelId, Vec<&'a AuxiliaryRelease>>,
}

impl<'a> CatalogIndex<'a> {
    pub fn build(catalog: &'a Catalog) -> Self {
        let mut index = Self::default();

        let mut seen_models = HashSet::new();
        for release in &catalog.models {
            if seen_models.insert(release.model_id) {
                index.base_models.push(BaseModel {
                    id: release.model_id,
                    name: release.model_name.clone(),
                    category: release.category,
                });
            }
            push_unique(
                index
                    .releases_by_model_id
                    .entry(release.model_id)
                    .or_default(),
                release,
                |r| r.id,
            );
        }

        for encoder in &catalog.encoders {
            let required = index
                .required_encoder_ids_by_model_id
                .entry(encoder.compatible_model_id)
                .or_default();
            if !required.contains(&encoder.owner_id) {
                required.push(encoder.owner_id);
            }
            push_unique(
                index
                    .releases_by_encoder_id
                    .entry(encoder.owner_id)
                    .or_default(),
                encoder,
                |r| r.id,
            );
        }

        for decoder in &catalog.decoders {
            push_unique(
                index
                    .releases_by_decoder_model_id
                    .entry(decoder.compatible_model_id)
                    .or_default(),
                decoder,
                |r| r.id,
            );
        }

        for model_id in index
            .required_encoder_ids_by_model_id
            .keys()
            .chain(index.releases_by_decoder_model_id.keys())
        {
            if !seen_models.contains(model_id) {
                tracing::warn!("orphan auxiliary rows for model {}", model_id);
            }
        }

        index
    }

    pub fn model_releases(&self, model_id: ModelId) -> &[&'a ModelRelease] {
        self.releases_by_model_id
            .get(&model_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn required_encoder_ids(&self, model_id: ModelId) -> &[AuxiliaryId] {
        self.required_encoder_ids_by_model_id
            .get(&model_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn decoder_releases(&self, model_id: ModelId) -> &[&'a AuxiliaryRelease] {
        self.releases_by_decoder_model_id
            .get(&model_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

fn push_unique<'a, T>(list: &mut Vec<&'a T>, item: &'a T, id: fn(&T) -> ReleaseId) {
    let item_id = id(item);
    if !list.iter().any(|existing| id(existing) == item_id) {
        list.push(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::ModelCategory;

    fn model(
        id: ReleaseId,
        model_id: ModelId,
        name: &str,
        category: ModelCategory,
    ) -> ModelRelease {
        ModelRelease {
            id,
            model_id,
            model_name: name.to_string(),
            category,
            quantization: "FP16".to_string(),
            file_size_gb: 4.0,
            quality_score: 100.0,
            priority: 10,
            repository: None,
        }
    }

    fn aux(id: ReleaseId, owner_id: AuxiliaryId, model_id: ModelId) -> AuxiliaryRelease {
        AuxiliaryRelease {
            id,
            owner_id,
            owner_name: format!("aux-{}", owner_id),
            quantization: "FP16".to_string(),
            file_size_gb: 0.5,
            quality_score: 100.0,
            priority: 10,
            compatible_model_id: model_id,
            repository: None,
        }
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::default();
        let index = CatalogIndex::build(&catalog);
        assert!(index.base_models.is_empty());
        assert!(index.model_releases(1).is_empty());
        assert!(index.required_encoder_ids(1).is_empty());
    }

    #[test]
    fn test_first_occurrence_wins() {
        let catalog = Catalog {
            models: vec![
                model(1, 7, "Stable Diffusion XL", ModelCategory::ImageGeneration),
                model(2, 7, "SDXL renamed", ModelCategory::VideoGeneration),
            ],
            ..Default::default()
        };
        let index = CatalogIndex::build(&catalog);

        assert_eq!(index.base_models.len(), 1);
        assert_eq!(index.base_models[0].name, "Stable Diffusion XL");
        let category = index.base_models[0].category;
        assert_eq!(category, ModelCategory::ImageGeneration);
        assert_eq!(index.model_releases(7).len(), 2);
    }

    #[test]
    fn test_required_encoders_keep_first_seen_order() {
        let catalog = Catalog {
            models: vec![model(1, 1, "FLUX.1", ModelCategory::ImageGeneration)],
            encoders: vec![
                aux(10, 3, 1),
                aux(11, 2, 1),
                aux(12, 3, 1),
                aux(13, 2, 9),
            ],
            ..Default::default()
        };
        let index = CatalogIndex::build(&catalog);

        assert_eq!(index.required_encoder_ids(1), &[3, 2]);
        assert_eq!(index.required_encoder_ids(9), &[2]);
        assert_eq!(index.releases_by_encoder_id[&3].len(), 2);
        // release 11 and 13 share owner 2 but are different releases
        assert_eq!(index.releases_by_encoder_id[&2].len(), 2);
    }

    #[test]
    fn test_join_duplicates_indexed_once() {
        // One encoder release compatible with two models appears twice
        let catalog = Catalog {
            models: vec![
                model(1, 1, "SD 1.5", ModelCategory::ImageGeneration),
                model(2, 2, "SD 1.5 Inpaint", ModelCategory::ImageGeneration),
            ],
            encoders: vec![aux(10, 4, 1), aux(10, 4, 2)],
            decoders: vec![aux(20, 5, 1), aux(20, 5, 1)],
        };
        let index = CatalogIndex::build(&catalog);

        assert_eq!(index.releases_by_encoder_id[&4].len(), 1);
        assert_eq!(index.required_encoder_ids(1), &[4]);
        assert_eq!(index.required_encoder_ids(2), &[4]);
        assert_eq!(index.decoder_releases(1).len(), 1);
        assert!(index.decoder_releases(2).is_empty());
    }
}
