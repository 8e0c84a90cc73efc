//! Population engine: builds one orbital body per placed catalog record and
//! drives attention, stepping and visibility every tick.

use nalgebra::UnitQuaternion;
use pulsar_core::{LogRange, MagnitudeGradient};
use pulsar_data::{CatalogError, PulsarCatalog, Tag, Tagger};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;
use serde::Serialize;
use std::path::Path;

use crate::attention::{AttentionChange, AttentionTracker};
use crate::body::{BodyId, BodySnapshot, OrbitalBody};
use crate::config::PopulationConfig;
use crate::describe::BodyDescription;
use crate::error::PopulationResult;
use crate::viewer::{to_dvec3, ViewerState};
use crate::visibility::VisibilityPolicy;

/// Outcome of one tick
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    /// Bodies attended during this tick
    pub attended: Vec<BodyId>,
    pub change: AttentionChange,
}

/// Serializable state of the whole population
#[derive(Clone, Debug, Serialize)]
pub struct PopulationSnapshot {
    pub tick: u64,
    pub unplaced: usize,
    pub rejected: usize,
    pub gradient_range: Option<LogRange>,
    pub bodies: Vec<BodySnapshot>,
    pub tags: Vec<Tag>,
}

pub struct PopulationEngine {
    config: PopulationConfig,
    policy: VisibilityPolicy,
    gradient: MagnitudeGradient,
    bodies: Vec<OrbitalBody>,
    tags: Vec<Tag>,
    attention: AttentionTracker,
    unplaced: usize,
    rejected: usize,
    ticks: u64,
}

impl PopulationEngine {
    /// Parse catalog text and build, seeding every draw from `config.seed`
    pub fn from_text(text: &str, config: PopulationConfig) -> PopulationResult<Self> {
        config.validate()?;
        let mut rng = ChaChaRng::seed_from_u64(config.seed);
        let catalog = PulsarCatalog::parse(text, &mut rng)?;
        Self::build(&catalog, config, &mut rng)
    }

    /// Read a catalog file and build from it
    pub fn load(path: &Path, config: PopulationConfig) -> PopulationResult<Self> {
        tracing::info!("Loading pulsar catalog from {:?}", path);
        let text = std::fs::read_to_string(path).map_err(CatalogError::from)?;
        Self::from_text(&text, config)
    }

    /// Build from an already parsed catalog
    pub fn build<R: Rng>(
        catalog: &PulsarCatalog,
        config: PopulationConfig,
        rng: &mut R,
    ) -> PopulationResult<Self> {
        if catalog.is_empty() {
            return Err(CatalogError::EmptyCatalog.into());
        }
        config.validate()?;

        let scale = config.world_units_per_kpc;
        let gradient = MagnitudeGradient::from_magnitudes(catalog.iter().map(|r| r.bsurf));

        let mut bodies = Vec::new();
        for record in catalog.placed() {
            let Some(position) = record.to_cartesian(scale) else {
                continue;
            };

            let orientation = UnitQuaternion::from_euler_angles(
                rng.random_range(0.0..360.0_f64).to_radians(),
                rng.random_range(0.0..360.0_f64).to_radians(),
                rng.random_range(0.0..360.0_f64).to_radians(),
            );

            let mut body = OrbitalBody::new(BodyId(bodies.len()), record.clone(), position, orientation);
            body.set_color(gradient.color(record.bsurf));
            body.create(rng, config.classification_overrides.get(&record.name).copied())?;
            bodies.push(body);
        }

        let mut tagger = Tagger::with_defaults(config.static_tags.iter().cloned());
        tagger.add_random(catalog, config.tag_count, scale, rng);

        let mut engine = Self {
            policy: VisibilityPolicy::new(config.visibility),
            config,
            gradient,
            bodies,
            tags: tagger.into_tags(),
            attention: AttentionTracker::new(),
            unplaced: catalog.unplaced_count(),
            rejected: catalog.rejected().len(),
            ticks: 0,
        };
        engine.update_visibility(&ViewerState::default());

        tracing::info!(
            "Built population: {} bodies, {} unplaced, {} tags",
            engine.bodies.len(),
            engine.unplaced,
            engine.tags.len()
        );

        Ok(engine)
    }

    pub fn config(&self) -> &PopulationConfig { &self.config }
    pub fn policy(&self) -> &VisibilityPolicy { &self.policy }
    pub fn gradient(&self) -> &MagnitudeGradient { &self.gradient }
    pub fn bodies(&self) -> &[OrbitalBody] { &self.bodies }
    pub fn tags(&self) -> &[Tag] { &self.tags }
    pub fn attention(&self) -> &AttentionTracker { &self.attention }
    pub fn unplaced_count(&self) -> usize { self.unplaced }
    pub fn rejected_count(&self) -> usize { self.rejected }
    pub fn tick_count(&self) -> u64 { self.ticks }

    pub fn body(&self, id: BodyId) -> Option<&OrbitalBody> {
        self.bodies.get(id.0)
    }

    pub fn find(&self, name: &str) -> Option<&OrbitalBody> {
        self.bodies.iter().find(|b| b.name() == name)
    }

    /// Nearest body whose primary sphere lies on the gaze ray
    pub fn pick(&self, viewer: &ViewerState) -> Option<BodyId> {
        let radius = self.policy.config().min_radius;

        self.bodies
            .iter()
            .filter_map(|body| {
                let center = to_dvec3(&body.primary_world_position());
                viewer
                    .ray_sphere(center, radius * body.scale_correction())
                    .map(|t| (body.id(), t))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    /// Visibility, gaze pick, attention and stepping for one tick
    pub fn tick(&mut self, viewer: &ViewerState) -> TickReport {
        self.update_visibility(viewer);
        let hit = self.pick(viewer);
        self.advance(hit)
    }

    /// Like [`tick`](Self::tick) with attended bodies chosen by the host
    pub fn tick_with_hits<I>(&mut self, viewer: &ViewerState, hits: I) -> TickReport
    where
        I: IntoIterator<Item = BodyId>,
    {
        self.update_visibility(viewer);
        self.advance(hits)
    }

    fn update_visibility(&mut self, viewer: &ViewerState) {
        for body in &mut self.bodies {
            let distance = viewer.distance_to(&body.position());
            body.apply_visibility(self.policy.evaluate(distance));
        }
    }

    fn advance<I>(&mut self, hits: I) -> TickReport
    where
        I: IntoIterator<Item = BodyId>,
    {
        let count = self.bodies.len();
        let change = self.attention.update(hits.into_iter().filter(|id| id.0 < count));

        for id in &change.deactivated {
            if self.bodies[id.0].deactivate() {
                tracing::debug!("Deactivated {} '{}'", id, self.bodies[id.0].name());
            }
        }
        for id in &change.activated {
            if self.bodies[id.0].activate() {
                tracing::debug!("Activated {} '{}'", id, self.bodies[id.0].name());
            }
        }

        let attended: Vec<BodyId> = self.attention.attended().collect();
        for id in &attended {
            self.bodies[id.0].orbit_step();
        }

        self.ticks += 1;
        TickReport { tick: self.ticks, attended, change }
    }

    pub fn describe(&self, id: BodyId, viewer: &ViewerState) -> Option<BodyDescription> {
        self.body(id)
            .map(|body| BodyDescription::new(body, viewer, self.config.world_units_per_kpc))
    }

    pub fn snapshot(&self) -> PopulationSnapshot {
        PopulationSnapshot {
            tick: self.ticks,
            unplaced: self.unplaced,
            rejected: self.rejected,
            gradient_range: self.gradient.range(),
            bodies: self.bodies.iter().map(OrbitalBody::snapshot).collect(),
            tags: self.tags.clone(),
        }
    }
}
