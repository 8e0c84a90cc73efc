use pulsar_core::coordinates::CartesianPosition;
use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::catalog::PulsarCatalog;
use crate::error::CatalogResult;

/// Labeled point of interest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    /// 3D position in world units
    pub position: CartesianPosition,
}

impl Tag {
    pub fn new(name: impl Into<String>, position: CartesianPosition) -> Self {
        Self { name: name.into(), position }
    }

    /// Distance from the origin (Earth)
    pub fn distance(&self) -> f64 {
        self.position.magnitude()
    }
}

/// Tag list: statically configured entries first, then added ones
#[derive(Debug, Clone, Default)]
pub struct Tagger {
    tags: Vec<Tag>,
}

impl Tagger {
    pub fn with_defaults(defaults: impl IntoIterator<Item = Tag>) -> Self {
        Self { tags: defaults.into_iter().collect() }
    }

    pub fn add_tags(&mut self, tags: impl IntoIterator<Item = Tag>) {
        self.tags.extend(tags);
    }

    /// Add `count` distinct random placed pulsars from the catalog
    pub fn add_random<R: Rng>(
        &mut self,
        catalog: &PulsarCatalog,
        count: usize,
        world_units_per_kpc: f64,
        rng: &mut R,
    ) -> usize {
        let tags = random_tags(catalog, count, world_units_per_kpc, rng);
        let added = tags.len();
        self.add_tags(tags);
        added
    }

    pub fn tags(&self) -> &[Tag] { &self.tags }
    pub fn len(&self) -> usize { self.tags.len() }
    pub fn is_empty(&self) -> bool { self.tags.is_empty() }

    pub fn into_tags(self) -> Vec<Tag> {
        self.tags
    }
}

/// Pick up to `count` distinct placed records and tag them at their position
pub fn random_tags<R: Rng>(
    catalog: &PulsarCatalog,
    count: usize,
    world_units_per_kpc: f64,
    rng: &mut R,
) -> Vec<Tag> {
    let placed: Vec<_> = catalog.placed().collect();
    if count > placed.len() {
        tracing::warn!("Requested {} tags but only {} pulsars are placed", count, placed.len());
    }
    let amount = count.min(placed.len());

    index::sample(rng, placed.len(), amount)
        .into_iter()
        .filter_map(|i| {
            let record = placed[i];
            record
                .to_cartesian(world_units_per_kpc)
                .map(|position| Tag::new(record.name.clone(), position))
        })
        .collect()
}

/// Load static tags from a JSON file
pub fn load_tags_json(path: &Path) -> CatalogResult<Vec<Tag>> {
    let contents = fs::read_to_string(path)?;
    let tags: Vec<Tag> = serde_json::from_str(&contents)?;
    tracing::info!("Loaded {} static tags from {:?}", tags.len(), path);
    Ok(tags)
}
