//! Rooms and their surfaces
//!
//! A room is created by the allocator, decorated once by the later stages,
//! and read-only afterwards.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::grid::GridRect;
use super::units::{WorldRect, CEILING_HEIGHT, CELL_SIZE};
use crate::data::{RoomType, Theme};
use crate::error::GenError;

/// A texturable surface category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Surface {
    Floor,
    Wall,
    Ceiling,
}

impl Surface {
    pub fn name(&self) -> &'static str {
        match self {
            Surface::Floor => "floor",
            Surface::Wall => "wall",
            Surface::Ceiling => "ceiling",
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Surface {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "floor" => Ok(Surface::Floor),
            "wall" => Ok(Surface::Wall),
            "ceiling" => Ok(Surface::Ceiling),
            _ => Err(GenError::UnknownSurface(s.to_string())),
        }
    }
}

/// Resolved texture per surface
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurfaceTextures {
    pub floor: String,
    pub wall: String,
    pub ceiling: String,
}

/// Liquid used by pools and pits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LiquidKind {
    Water,
    Slime,
    Lava,
}

impl LiquidKind {
    pub fn texture(&self) -> &'static str {
        match self {
            LiquidKind::Water => "*water0",
            LiquidKind::Slime => "*slime0",
            LiquidKind::Lava => "*lava1",
        }
    }

    /// Damage per hurt tick dealt by the pool's trigger volume
    pub fn damage(&self) -> u32 {
        match self {
            LiquidKind::Water => 0,
            LiquidKind::Slime => 5,
            LiquidKind::Lava => 30,
        }
    }
}

/// Optional special feature carried by a room
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RoomFeature {
    #[default]
    None,
    /// Central pit, sized as a fraction of the room's interior cells
    Pit { ratio: f32 },
    /// Shallow pool inset from the walls
    Liquid { kind: LiquidKind, damage: u32 },
    /// Floor-to-ceiling columns
    Pillars { count: u8 },
    /// Raised blocks at increasing heights
    Platforms { count: u8 },
}

/// A placed room
#[derive(Debug, Clone)]
pub struct Room {
    pub index: usize,
    pub rect: GridRect,
    pub room_type: &'static RoomType,
    /// `None` when textures come from the default pools
    pub theme: Option<&'static Theme>,
    pub textures: SurfaceTextures,
    pub feature: RoomFeature,
}

impl Room {
    pub fn new(index: usize, rect: GridRect, room_type: &'static RoomType) -> Self {
        Self {
            index,
            rect,
            room_type,
            theme: None,
            textures: SurfaceTextures::default(),
            feature: RoomFeature::None,
        }
    }

    /// Floor height, shifted by the room type's offset
    pub fn floor_z(&self) -> i32 {
        self.room_type.floor_offset
    }

    pub fn ceiling_z(&self) -> i32 {
        self.room_type.ceiling_height.unwrap_or(CEILING_HEIGHT)
    }

    /// Footprint in engine units, measured to the wall centre lines
    pub fn bounds(&self) -> WorldRect {
        WorldRect::new(
            self.rect.left() as i32 * CELL_SIZE,
            self.rect.bottom() as i32 * CELL_SIZE,
            self.rect.right() as i32 * CELL_SIZE,
            self.rect.top() as i32 * CELL_SIZE,
        )
    }

    pub fn center(&self) -> (i32, i32) {
        self.bounds().center()
    }

    pub fn theme_name(&self) -> &'static str {
        self.theme.map_or("default", |t| t.name)
    }
}
