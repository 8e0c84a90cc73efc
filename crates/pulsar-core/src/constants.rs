/// World units per kiloparsec used when placing catalog sources
pub const WORLD_UNITS_PER_KPC: f64 = 128.0;

/// Degrees of right ascension per hour
pub const DEGREES_PER_HOUR: f64 = 15.0;

/// Degrees of right ascension per minute of time
pub const DEGREES_PER_MINUTE: f64 = 0.25;

/// Degrees of right ascension per second of time (1/240)
pub const DEGREES_PER_SECOND: f64 = 1.0 / 240.0;

/// Arcminutes per degree
pub const ARCMIN_PER_DEGREE: f64 = 60.0;

/// Arcseconds per degree
pub const ARCSEC_PER_DEGREE: f64 = 3600.0;

/// Distance beyond which apparent size is held constant (world units)
pub const CUTOFF_DISTANCE: f64 = 256.0;

/// Minimum rendered radius of a pulsar (world units)
pub const PULSAR_RADIUS: f64 = 1.0;

/// Distance under which the jet is drawn at full length (world units)
pub const JET_FADE_DISTANCE: f64 = 16.0;

/// Cosmetic down-scaling of spin frequency so hundreds of Hz stay visible
pub const ROTATION_MULTIPLIER: f64 = 1e-5;

/// Binary rotation per orbit step (radians)
pub const BINARY_ROTATION_RATE: f64 = 0.5;

/// Angular resolution of the orbit guide (radians per segment)
pub const ORBIT_GUIDE_STEP: f64 = 0.01;

/// Companion star temperature range (Kelvin)
pub const COMPANION_TEMPERATURE: (f64, f64) = (1000.0, 10000.0);

/// Radius of the celestial reference sphere (world units)
pub const SPHERE_RADIUS: f64 = 1024.0;

/// Sweep divisions for parallels and meridians
pub const SPHERE_DIVISIONS: u32 = 64;
