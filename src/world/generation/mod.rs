//! Procedural level generation
//!
//! Stages run in a fixed order against one seeded RNG: room placement,
//! theming, door planning, connectivity repair, then population. The
//! [`crate::Session`] drives them; each stage lives in its own module.

pub mod connectivity;
pub mod doors;
pub mod population;
pub mod rooms;
pub mod themes;

use std::fmt;

pub use doors::{find_adjacency, is_multi_room_corner, DoorRejection};
pub use population::Spawn;
pub use themes::TexturePools;

use super::{Door, Grid, Room, TeleporterPair};

/// Counters collected while generating a level
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationStats {
    pub rooms_requested: usize,
    pub rooms_placed: usize,
    /// Room slots whose every placement attempt collided
    pub placements_skipped: usize,
    pub doors: usize,
    /// Adjacent room pairs left without a door
    pub doors_skipped: usize,
    /// Door-connected components before repair
    pub components: usize,
    pub teleporter_pairs: usize,
    pub features: usize,
    pub features_dropped: usize,
    pub monsters: usize,
    pub items: usize,
}

impl fmt::Display for GenerationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} rooms ({} skipped), {} doors ({} skipped), {} components, {} teleporters, {} features, {} monsters, {} items",
            self.rooms_placed,
            self.rooms_requested,
            self.placements_skipped,
            self.doors,
            self.doors_skipped,
            self.components,
            self.teleporter_pairs,
            self.features,
            self.monsters,
            self.items,
        )
    }
}

/// A fully generated level, ready for export
#[derive(Debug, Clone)]
pub struct Level {
    /// Seed the level was generated from
    pub seed: u64,
    pub grid: Grid,
    pub rooms: Vec<Room>,
    pub doors: Vec<Door>,
    pub teleporters: Vec<TeleporterPair>,
    /// Room holding the exit
    pub goal: Option<usize>,
    pub spawns: Vec<Spawn>,
    pub stats: GenerationStats,
}

impl Level {
    pub fn room(&self, index: usize) -> Option<&Room> {
        self.rooms.get(index)
    }

    /// Player start position, if the level has a spawn room
    pub fn player_start(&self) -> Option<(i32, i32, i32)> {
        self.rooms.first().map(population::player_start)
    }

    /// True when every room can be reached from room 0
    pub fn is_connected(&self) -> bool {
        let adjacency =
            connectivity::adjacency_list(self.rooms.len(), &self.doors, &self.teleporters);
        connectivity::connected_components(&adjacency).len() <= 1
    }

    /// True when any room opens to the sky
    pub fn has_outdoor_rooms(&self) -> bool {
        self.rooms.iter().any(|r| r.room_type.is_outdoor())
    }
}
