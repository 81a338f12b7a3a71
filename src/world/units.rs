//! World-unit dimensions
//!
//! Grid cells map to fixed-size squares in engine units. Heights are
//! measured from the base floor at z = 0.

/// Engine units per grid cell
pub const CELL_SIZE: i32 = 256;
pub const WALL_THICKNESS: i32 = 16;
pub const FLOOR_THICKNESS: i32 = 16;
/// Default ceiling height above the base floor
pub const CEILING_HEIGHT: i32 = 192;

pub const DOOR_WIDTH: i32 = 64;
pub const DOOR_HEIGHT: i32 = 128;
/// Thickness of the sliding door slab
pub const DOOR_THICKNESS: i32 = 8;

/// Air gap between the grid and the sealing hull
pub const HULL_PADDING: i32 = 64;
pub const HULL_THICKNESS: i32 = 32;

/// Dry margin kept between a liquid pool and the room walls
pub const WALKWAY_MARGIN: i32 = 64;
pub const PIT_DEPTH: i32 = 96;
pub const LIQUID_DEPTH: i32 = 32;
pub const PILLAR_SIZE: i32 = 32;
pub const PLATFORM_SIZE: i32 = 128;
pub const PLATFORM_MIN_SIZE: i32 = 64;
/// Height gained by each successive platform
pub const PLATFORM_STEP: i32 = 32;

pub const PAD_SIZE: i32 = 48;
pub const PAD_HEIGHT: i32 = 8;
pub const GOAL_PAD_SIZE: i32 = 64;
/// Height of teleport and exit trigger volumes
pub const TRIGGER_HEIGHT: i32 = 64;

/// Point entities sit this far above the floor
pub const SPAWN_HEIGHT: i32 = 24;
/// Lights hang this far below the ceiling
pub const LIGHT_DROP: i32 = 32;
/// Half-width of the box kept clear around a spawned entity
pub const ENTITY_CLEARANCE: i32 = 24;

/// Convert a grid coordinate (possibly fractional) to engine units
pub fn to_world(grid: f64) -> i32 {
    (grid * CELL_SIZE as f64).round() as i32
}

/// Axis-aligned rectangle in engine units (min inclusive, max exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldRect {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl WorldRect {
    pub fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    /// Square of side `size` centred on a point
    pub fn centered(x: i32, y: i32, size: i32) -> Self {
        let half = size / 2;
        Self::new(x - half, y - half, x - half + size, y - half + size)
    }

    pub fn width(&self) -> i32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> i32 {
        self.max_y - self.min_y
    }

    /// True when the rectangle has no positive area
    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    pub fn center(&self) -> (i32, i32) {
        ((self.min_x + self.max_x) / 2, (self.min_y + self.max_y) / 2)
    }

    /// Shrink by `amount` on every side (may become degenerate)
    pub fn inset(&self, amount: i32) -> Self {
        Self::new(
            self.min_x + amount,
            self.min_y + amount,
            self.max_x - amount,
            self.max_y - amount,
        )
    }

    pub fn intersects(&self, other: &WorldRect) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }

    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.min_x && x < self.max_x && y >= self.min_y && y < self.max_y
    }
}
