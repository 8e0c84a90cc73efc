//! Text fields describing a body to the viewer

use std::fmt;

use crate::body::OrbitalBody;
use crate::viewer::ViewerState;

/// `"<value> [<unit>]"`
pub fn with_unit(value: impl fmt::Display, unit: &str) -> String {
    format!("{} [{}]", value, unit)
}

#[derive(Clone, Debug, PartialEq)]
pub struct BodyDescription {
    pub name: String,
    /// Distance to the viewer, rounded to whole kpc
    pub distance: String,
    pub frequency: String,
    pub surface_field: String,
    pub classification: String,
    /// Binaries only
    pub companion_temperature: Option<String>,
    pub right_ascension: String,
    pub declination: String,
}

impl BodyDescription {
    pub fn new(body: &OrbitalBody, viewer: &ViewerState, world_units_per_kpc: f64) -> Self {
        let source = body.source();
        let distance_kpc = viewer.distance_to(&body.primary_world_position()) / world_units_per_kpc;

        Self {
            name: source.name.clone(),
            distance: with_unit(distance_kpc.round(), "kpc"),
            frequency: with_unit(source.f0, "Hz"),
            surface_field: with_unit(source.bsurf, "G"),
            classification: body
                .classification()
                .map(|c| c.label().to_string())
                .unwrap_or_else(|| "Unknown".to_string()),
            companion_temperature: body.companion_temperature().map(|t| with_unit(t.round(), "K")),
            right_ascension: source.right_ascension.to_string(),
            declination: source.declination.to_string(),
        }
    }
}

impl fmt::Display for BodyDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "Distance: {}", self.distance)?;
        writeln!(f, "Frequency: {}", self.frequency)?;
        writeln!(f, "B surface: {}", self.surface_field)?;
        writeln!(f, "Type: {}", self.classification)?;
        if let Some(temperature) = &self.companion_temperature {
            writeln!(f, "Companion Temperature: {}", temperature)?;
        }
        writeln!(f, "RA: {}", self.right_ascension)?;
        write!(f, "DEC: {}", self.declination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{BodyId, Classification};
    use glam::DVec3;
    use nalgebra::UnitQuaternion;
    use pulsar_core::coordinates::{CartesianPosition, Sexagesimal};
    use pulsar_data::SourceRecord;
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;

    fn body(classification: Classification) -> OrbitalBody {
        let record = SourceRecord {
            name: "PSR_A".to_string(),
            line: 2,
            right_ascension: Sexagesimal::new(5.0, 34.0, 31.97),
            declination: Sexagesimal::new(-22.0, 0.0, 52.1),
            f0: 30.2,
            distance_kpc: 2.0,
            bsurf: 3.7e12,
            rotation_euler_deg: [0.0, 0.0, 1.0],
        };
        let mut body = OrbitalBody::new(
            BodyId(0),
            record,
            CartesianPosition::new(256.0, 0.0, 0.0),
            UnitQuaternion::identity(),
        );
        let mut rng = ChaChaRng::seed_from_u64(0);
        body.create(&mut rng, Some(classification)).unwrap();
        body
    }

    #[test]
    fn test_unit_labels() {
        let d = BodyDescription::new(&body(Classification::Isolated), &ViewerState::default(), 128.0);
        assert_eq!(d.distance, "2 [kpc]");
        assert_eq!(d.frequency, "30.2 [Hz]");
        assert_eq!(d.surface_field, "3700000000000 [G]");
        assert_eq!(d.classification, "Isolated");
        assert!(d.companion_temperature.is_none());
        assert_eq!(d.right_ascension, "5:34:31.97");
        assert_eq!(d.declination, "-22:0:52.1");
    }

    #[test]
    fn test_binary_has_temperature() {
        let d = BodyDescription::new(&body(Classification::NeutronStarPair), &ViewerState::default(), 128.0);
        let temperature = d.companion_temperature.clone().unwrap();
        assert!(temperature.ends_with(" [K]"));
        assert!(d.to_string().contains("Companion Temperature: "));
    }

    #[test]
    fn test_distance_from_moved_viewer() {
        let viewer = ViewerState::new(DVec3::new(-128.0, 0.0, 0.0), DVec3::X);
        let d = BodyDescription::new(&body(Classification::Isolated), &viewer, 128.0);
        assert_eq!(d.distance, "3 [kpc]");
    }
}
