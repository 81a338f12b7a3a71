//! Qmapgen - Procedural dungeon levels for Quake
//!
//! Places themed rooms on a grid, joins them with doors and teleporters,
//! populates them, and writes the result as a `.map` file.

pub mod data;
pub mod error;
pub mod export;
pub mod session;
pub mod world;

// Re-export commonly used types
pub use data::{Difficulty, GeneratorConfig, WorldSettings};
pub use error::{GenError, Result};
pub use export::{export_level, render_map, MapDocument};
pub use session::{generate, Session};
pub use world::generation::{GenerationStats, Level};
