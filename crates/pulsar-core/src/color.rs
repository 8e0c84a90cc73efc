//! Linear RGBA colors and blackbody conversion

use serde::{Deserialize, Serialize};

use crate::constants::COMPANION_TEMPERATURE;

/// RGBA color with channels in [0, 1]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn opaque(rgb: [f32; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2], 1.0)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Per-channel linear interpolation, alpha included
    pub fn lerp(&self, other: &Rgba, t: f32) -> Rgba {
        Rgba {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Opaque color of a blackbody at the given temperature (Kelvin)
    pub fn from_temperature(kelvin: f64) -> Self {
        Self::opaque(blackbody_to_rgb(kelvin))
    }
}

/// Fit breakpoint of the channel curves, in hundreds of Kelvin
const KNEE: f64 = 66.0;

/// Blackbody color of a companion star.
///
/// Uses Tanner Helland's curve fit. The temperature is clamped to the
/// companion range in [`COMPANION_TEMPERATURE`].
pub fn blackbody_to_rgb(kelvin: f64) -> [f32; 3] {
    let (lo, hi) = COMPANION_TEMPERATURE;
    let t = kelvin.clamp(lo, hi) / 100.0;
    [red(t), green(t), blue(t)].map(|c| (c.clamp(0.0, 255.0) / 255.0) as f32)
}

fn red(t: f64) -> f64 {
    if t <= KNEE {
        255.0
    } else {
        329.698727446 * (t - 60.0).powf(-0.1332047592)
    }
}

fn green(t: f64) -> f64 {
    if t <= KNEE {
        99.4708025861 * t.ln() - 161.1195681661
    } else {
        288.1221695283 * (t - 60.0).powf(-0.0755148492)
    }
}

fn blue(t: f64) -> f64 {
    match t {
        t if t >= KNEE => 255.0,
        t if t <= 19.0 => 0.0,
        t => 138.5177312231 * (t - 10.0).ln() - 305.0447927307,
    }
}
