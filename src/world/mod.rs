//! World module
//!
//! Contains the grid, rooms, room connections and procedural generation.

pub mod features;
pub mod generation;
pub mod grid;
pub mod links;
pub mod room;
pub mod units;

pub use grid::{Grid, GridRect};
pub use links::{Direction, Door, TeleporterEndpoint, TeleporterPair, TeleporterRecord};
pub use room::{LiquidKind, Room, RoomFeature, Surface, SurfaceTextures};
