//! Orbital body: one placed pulsar, possibly with a binary companion
//!
//! A body is built in the `Uninitialized` state and moves to `Isolated` or
//! `Binary` exactly once through [`OrbitalBody::create`]. After that only the
//! phases, the activation flags and the visibility outputs change.

use nalgebra::{Unit, UnitQuaternion, Vector3};
use pulsar_core::constants::{
    BINARY_ROTATION_RATE, COMPANION_TEMPERATURE, ORBIT_GUIDE_STEP, ROTATION_MULTIPLIER,
};
use pulsar_core::coordinates::CartesianPosition;
use pulsar_core::Rgba;
use pulsar_data::SourceRecord;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt;

use crate::error::{BodyError, BodyResult};
use crate::visibility::{Lod, Visibility};

/// Companion size multiplier range for neutron star / high mass binaries
const HIGH_MASS_SCALE: (f64, f64) = (1.0, 4.0);

/// Orbital radius range for binaries [kpc]
const ORBITAL_RADIUS: (f64, f64) = (2.0, 8.0);

/// Index of a body inside its population
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyId(pub usize);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    /// Neutron star with a neutron star companion
    NeutronStarPair,
    /// Neutron star with a high mass companion
    NeutronStarHighMass,
    Isolated,
}

impl Classification {
    pub const ALL: [Classification; 3] = [
        Classification::NeutronStarPair,
        Classification::NeutronStarHighMass,
        Classification::Isolated,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Classification::NeutronStarPair => "Neutron Star - Neutron Star",
            Classification::NeutronStarHighMass => "Neutron Star - High Mass",
            Classification::Isolated => "Isolated",
        }
    }

    pub fn is_binary(&self) -> bool {
        !matches!(self, Classification::Isolated)
    }

    /// Uniform draw over the three classes
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BodyState {
    Uninitialized,
    Isolated,
    Binary,
}

/// A sphere placed in the body's local frame
#[derive(Clone, Debug, PartialEq)]
pub struct Component {
    /// Local offset from the orbit center
    pub offset: Vector3<f64>,
    pub scale: f64,
    pub visible: bool,
}

impl Component {
    fn at_origin(visible: bool) -> Self {
        Self { offset: Vector3::zeros(), scale: 1.0, visible }
    }
}

/// Circular guide line around the local origin, in the plane the components orbit in
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitGuide {
    pub radius: f64,
    /// Angle per segment [rad]
    pub step: f64,
    pub visible: bool,
}

impl OrbitGuide {
    pub fn new(radius: f64) -> Self {
        Self { radius, step: ORBIT_GUIDE_STEP, visible: false }
    }

    /// Guide vertices from θ = 0 to θ = 2π, closing on the first point
    pub fn points(&self) -> Vec<Vector3<f64>> {
        if self.radius <= 0.0 || self.step <= 0.0 {
            return Vec::new();
        }

        let segments = (TAU / self.step) as usize;
        (0..=segments)
            .map(|i| i as f64 * self.step)
            .chain(std::iter::once(TAU))
            .map(|theta| Vector3::new(self.radius * theta.cos(), 0.0, self.radius * theta.sin()))
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrbitCenter {
    pub visible: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Jet {
    pub visible: bool,
    /// Length factor in [0, 1], driven by viewer distance
    pub scale: f64,
}

pub struct OrbitalBody {
    id: BodyId,
    source: SourceRecord,
    /// Orbit center in world units
    position: CartesianPosition,
    /// Placement orientation of the whole system
    orientation: UnitQuaternion<f64>,
    rotation_axis: Unit<Vector3<f64>>,

    state: BodyState,
    classification: Option<Classification>,
    orbital_radius: f64,
    companion_temperature: Option<f64>,

    pub primary: Component,
    pub companion: Component,
    pub orbit_guide: OrbitGuide,
    pub orbit_center: OrbitCenter,
    pub jet: Jet,

    binary_phase: f64,
    spin_phase: f64,
    active: bool,

    color: Rgba,
    companion_color: Rgba,

    scale_correction: f64,
    lod: Lod,
}

impl OrbitalBody {
    pub fn new(
        id: BodyId,
        source: SourceRecord,
        position: CartesianPosition,
        orientation: UnitQuaternion<f64>,
    ) -> Self {
        let [x, y, z] = source.rotation_axis();
        let rotation_axis = Unit::new_normalize(Vector3::new(x, y, z));

        Self {
            id,
            source,
            position,
            orientation,
            rotation_axis,
            state: BodyState::Uninitialized,
            classification: None,
            orbital_radius: 0.0,
            companion_temperature: None,
            primary: Component::at_origin(true),
            companion: Component::at_origin(false),
            orbit_guide: OrbitGuide::new(0.0),
            orbit_center: OrbitCenter { visible: false },
            jet: Jet { visible: false, scale: 1.0 },
            binary_phase: 0.0,
            spin_phase: 0.0,
            active: false,
            color: Rgba::WHITE,
            companion_color: Rgba::WHITE,
            scale_correction: 1.0,
            lod: Lod::Resolved,
        }
    }

    /// Assign classification and companion parameters. Runs once per body.
    pub fn create<R: Rng>(
        &mut self,
        rng: &mut R,
        fixed: Option<Classification>,
    ) -> BodyResult<BodyState> {
        if self.state != BodyState::Uninitialized {
            return Err(BodyError::AlreadyCreated(self.source.name.clone()));
        }

        let classification = fixed.unwrap_or_else(|| Classification::random(rng));
        self.classification = Some(classification);

        if !classification.is_binary() {
            self.orbital_radius = 0.0;
            self.companion.scale = 0.0;
            self.state = BodyState::Isolated;
            return Ok(self.state);
        }

        if classification == Classification::NeutronStarHighMass {
            self.companion.scale *= rng.random_range(HIGH_MASS_SCALE.0..=HIGH_MASS_SCALE.1);
        }

        let radius = rng.random_range(ORBITAL_RADIUS.0..=ORBITAL_RADIUS.1);
        let temperature = rng.random_range(COMPANION_TEMPERATURE.0..=COMPANION_TEMPERATURE.1);

        self.orbital_radius = radius;
        self.companion_temperature = Some(temperature);
        self.companion_color = Rgba::from_temperature(temperature);
        self.set_orbit(radius);
        self.state = BodyState::Binary;

        tracing::debug!("{} '{}' created as {} (r = {:.2})", self.id, self.source.name, classification, radius);
        Ok(self.state)
    }

    /// Primary and companion on opposite ends of the local Z axis
    fn set_orbit(&mut self, radius: f64) {
        self.primary.offset = Vector3::new(0.0, 0.0, radius);
        self.companion.offset = Vector3::new(0.0, 0.0, -radius);
        let visible = self.orbit_guide.visible;
        self.orbit_guide = OrbitGuide { visible, ..OrbitGuide::new(radius) };
    }

    /// Advance one tick of orbital and self rotation
    pub fn orbit_step(&mut self) {
        match self.state {
            BodyState::Uninitialized => return,
            BodyState::Binary => self.binary_phase += BINARY_ROTATION_RATE,
            BodyState::Isolated => {}
        }
        self.spin_phase += TAU * self.source.f0 * ROTATION_MULTIPLIER;
    }

    /// Show jet, companion and orbit visuals. Returns false if already active.
    pub fn activate(&mut self) -> bool {
        self.set_active(true)
    }

    /// Hide jet, companion and orbit visuals. Returns false if already inactive.
    pub fn deactivate(&mut self) -> bool {
        self.set_active(false)
    }

    fn set_active(&mut self, active: bool) -> bool {
        if self.active == active {
            return false;
        }
        self.active = active;
        self.jet.visible = active;
        self.companion.visible = active;
        self.orbit_guide.visible = active;
        self.orbit_center.visible = active;
        true
    }

    pub fn apply_visibility(&mut self, visibility: Visibility) {
        self.scale_correction = visibility.scale;
        self.lod = visibility.lod;
        self.jet.scale = visibility.jet_scale;
    }

    pub fn set_color(&mut self, color: Rgba) {
        self.color = color;
    }

    pub fn id(&self) -> BodyId { self.id }
    pub fn name(&self) -> &str { &self.source.name }
    pub fn source(&self) -> &SourceRecord { &self.source }
    pub fn position(&self) -> CartesianPosition { self.position }
    pub fn orientation(&self) -> UnitQuaternion<f64> { self.orientation }
    pub fn rotation_axis(&self) -> Unit<Vector3<f64>> { self.rotation_axis }
    pub fn state(&self) -> BodyState { self.state }
    pub fn classification(&self) -> Option<Classification> { self.classification }
    pub fn orbital_radius(&self) -> f64 { self.orbital_radius }
    pub fn companion_temperature(&self) -> Option<f64> { self.companion_temperature }
    pub fn is_active(&self) -> bool { self.active }
    pub fn color(&self) -> Rgba { self.color }
    pub fn companion_color(&self) -> Rgba { self.companion_color }
    pub fn scale_correction(&self) -> f64 { self.scale_correction }
    pub fn lod(&self) -> Lod { self.lod }

    /// Accumulated orbital angle about local +Y [rad]
    pub fn binary_phase(&self) -> f64 {
        self.binary_phase
    }

    /// Accumulated self-rotation angle about the rotation axis [rad]
    pub fn spin_phase(&self) -> f64 {
        self.spin_phase
    }

    /// Primary's own orientation from the spin phase
    pub fn spin_rotation(&self) -> UnitQuaternion<f64> {
        UnitQuaternion::from_axis_angle(&self.rotation_axis, self.spin_phase.rem_euclid(TAU))
    }

    /// Local offset to world position: scale, orbit, placement, translation
    fn local_to_world(&self, offset: &Vector3<f64>) -> CartesianPosition {
        let orbit = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), self.binary_phase);
        let world = self.orientation * (orbit * (offset * self.scale_correction));
        CartesianPosition::new(
            self.position.x + world.x,
            self.position.y + world.y,
            self.position.z + world.z,
        )
    }

    pub fn primary_world_position(&self) -> CartesianPosition {
        self.local_to_world(&self.primary.offset)
    }

    pub fn companion_world_position(&self) -> CartesianPosition {
        self.local_to_world(&self.companion.offset)
    }

    pub fn snapshot(&self) -> BodySnapshot {
        BodySnapshot {
            id: self.id,
            name: self.source.name.clone(),
            classification: self.classification,
            position: self.position.to_array(),
            primary_offset: to_array(&self.primary.offset),
            companion_offset: to_array(&self.companion.offset),
            primary_world: self.primary_world_position().to_array(),
            companion_world: self.companion_world_position().to_array(),
            orbital_radius: self.orbital_radius,
            binary_phase: self.binary_phase,
            spin_phase: self.spin_phase,
            active: self.active,
            jet_visible: self.jet.visible,
            companion_visible: self.companion.visible,
            orbit_visible: self.orbit_guide.visible,
            color: self.color.to_array(),
            companion_color: self.companion_color.to_array(),
            companion_scale: self.companion.scale,
            companion_temperature: self.companion_temperature,
            scale_correction: self.scale_correction,
            lod: self.lod,
            jet_scale: self.jet.scale,
        }
    }
}

fn to_array(v: &Vector3<f64>) -> [f64; 3] {
    [v.x, v.y, v.z]
}

/// Host-facing view of a body
#[derive(Clone, Debug, Serialize)]
pub struct BodySnapshot {
    pub id: BodyId,
    pub name: String,
    pub classification: Option<Classification>,
    pub position: [f64; 3],
    pub primary_offset: [f64; 3],
    pub companion_offset: [f64; 3],
    pub primary_world: [f64; 3],
    pub companion_world: [f64; 3],
    pub orbital_radius: f64,
    pub binary_phase: f64,
    pub spin_phase: f64,
    pub active: bool,
    pub jet_visible: bool,
    pub companion_visible: bool,
    pub orbit_visible: bool,
    pub color: [f32; 4],
    pub companion_color: [f32; 4],
    pub companion_scale: f64,
    pub companion_temperature: Option<f64>,
    pub scale_correction: f64,
    pub lod: Lod,
    pub jet_scale: f64,
}
