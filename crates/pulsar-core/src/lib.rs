pub mod color;
pub mod constants;
pub mod coordinates;
pub mod gradient;
pub mod sphere;

#[cfg(test)]
mod tests;

pub use color::{blackbody_to_rgb, Rgba};
pub use coordinates::{
    cartesian_to_celestial, celestial_to_cartesian, sexagesimal_to_cartesian, CartesianPosition,
    EquatorialPosition, Sexagesimal, SexagesimalError,
};
pub use gradient::{ColorGradient, LogRange, MagnitudeGradient};
pub use sphere::{CelestialSphere, GridLine, GridLineKind, SphereConfig};
