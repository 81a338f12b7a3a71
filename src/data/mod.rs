//! Static generation data and configuration
//!
//! Room type and theme tables are compiled in; run settings come from an
//! optional RON file.

pub mod config;
pub mod difficulty;
pub mod room_types;
pub mod themes;

pub use config::{DoorPlanning, GeneratorConfig, WorldSettings, CONFIG_FILE};
pub use difficulty::Difficulty;
pub use room_types::{FeatureKind, RoomShape, RoomType, SpawnMode, ROOM_TYPES};
pub use themes::{Theme, THEMES};
