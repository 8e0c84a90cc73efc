pub mod attention;
pub mod body;
pub mod config;
pub mod describe;
pub mod error;
pub mod population;
pub mod viewer;
pub mod visibility;


pub use attention::{AttentionChange, AttentionTracker};
pub use body::{BodyId, BodySnapshot, BodyState, Classification, OrbitGuide, OrbitalBody};
pub use config::PopulationConfig;
pub use describe::{with_unit, BodyDescription};
pub use error::{BodyError, BodyResult, PopulationError, PopulationResult};
pub use population::{PopulationEngine, PopulationSnapshot, TickReport};
pub use viewer::ViewerState;
pub use visibility::{Lod, Visibility, VisibilityConfig, VisibilityPolicy};
