//! Log-scaled color mapping of a physical magnitude
//!
//! Used to tint pulsars by surface magnetic field. A magnitude of zero is the
//! catalog's "unknown" marker and gets the sentinel color.

use serde::{Deserialize, Serialize};

use crate::color::Rgba;

/// Two-stop color gradient evaluated on [0, 1]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorGradient {
    pub start: Rgba,
    pub end: Rgba,
}

impl ColorGradient {
    pub fn new(start: Rgba, end: Rgba) -> Self {
        Self { start, end }
    }

    pub fn evaluate(&self, t: f64) -> Rgba {
        self.start.lerp(&self.end, t.clamp(0.0, 1.0) as f32)
    }
}

impl Default for ColorGradient {
    /// Opaque green at t=0 fading to transparent blue at t=1
    fn default() -> Self {
        Self::new(Rgba::GREEN, Rgba::BLUE.with_alpha(0.0))
    }
}

/// log10 range of the known magnitudes in a population
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogRange {
    pub min: f64,
    pub max: f64,
}

impl LogRange {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn is_degenerate(&self) -> bool {
        self.span() == 0.0
    }
}

/// Maps magnitudes to colors through a log10-normalized gradient
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MagnitudeGradient {
    gradient: ColorGradient,
    /// None when the population has no known magnitude
    range: Option<LogRange>,
    unknown: Rgba,
}

/// Zero, negative and non-finite values carry no usable magnitude
fn is_known(magnitude: f64) -> bool {
    magnitude.is_finite() && magnitude > 0.0
}

impl MagnitudeGradient {
    /// Build from every magnitude in the population, unknown ones included
    pub fn from_magnitudes<I>(magnitudes: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        Self::with_gradient(magnitudes, ColorGradient::default())
    }

    pub fn with_gradient<I>(magnitudes: I, gradient: ColorGradient) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let (min, max) = magnitudes
            .into_iter()
            .filter(|m| is_known(*m))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), m| (lo.min(m), hi.max(m)));

        let range = if min.is_finite() && max.is_finite() {
            let range = LogRange { min: min.log10(), max: max.log10() };
            if range.is_degenerate() {
                tracing::debug!("Degenerate magnitude range at 10^{:.3}, all gradient positions are 0", range.min);
            }
            Some(range)
        } else {
            None
        };

        Self { gradient, range, unknown: Rgba::WHITE }
    }

    pub fn range(&self) -> Option<LogRange> {
        self.range
    }

    pub fn unknown_color(&self) -> Rgba {
        self.unknown
    }

    /// Normalized gradient position, None for unknown magnitudes
    pub fn position(&self, magnitude: f64) -> Option<f64> {
        if !is_known(magnitude) {
            return None;
        }
        let range = self.range?;
        if range.is_degenerate() {
            return Some(0.0);
        }
        Some(((magnitude.log10() - range.min) / range.span()).clamp(0.0, 1.0))
    }

    pub fn color(&self, magnitude: f64) -> Rgba {
        match self.position(magnitude) {
            Some(t) => self.gradient.evaluate(t),
            None => self.unknown,
        }
    }
}
