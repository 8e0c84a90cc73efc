//! Population build configuration

use pulsar_core::constants::WORLD_UNITS_PER_KPC;
use pulsar_data::Tag;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::body::Classification;
use crate::error::{PopulationError, PopulationResult};
use crate::visibility::VisibilityConfig;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PopulationConfig {
    /// Seed for every random draw during ingestion and build
    pub seed: u64,
    /// Number of random pulsars to tag
    pub tag_count: usize,
    pub world_units_per_kpc: f64,
    pub visibility: VisibilityConfig,
    /// Tags always present, ahead of the random ones
    pub static_tags: Vec<Tag>,
    /// Fixed classification per pulsar name, skipping the random draw
    pub classification_overrides: BTreeMap<String, Classification>,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tag_count: 10,
            world_units_per_kpc: WORLD_UNITS_PER_KPC,
            visibility: VisibilityConfig::default(),
            static_tags: Vec::new(),
            classification_overrides: BTreeMap::new(),
        }
    }
}

impl PopulationConfig {
    pub fn from_json_str(json: &str) -> PopulationResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_json(path: &Path) -> PopulationResult<Self> {
        tracing::info!("Loading population config from {:?}", path);
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> PopulationResult<()> {
        let positive = |name: &str, value: f64| {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(PopulationError::Config(format!("{} must be positive, got {}", name, value)))
            }
        };

        positive("world_units_per_kpc", self.world_units_per_kpc)?;
        positive("visibility.cutoff_distance", self.visibility.cutoff_distance)?;
        positive("visibility.min_radius", self.visibility.min_radius)?;
        positive("visibility.jet_fade_distance", self.visibility.jet_fade_distance)?;
        Ok(())
    }
}
