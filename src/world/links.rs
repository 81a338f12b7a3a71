//! Connections between rooms
//!
//! Doors join rooms that share a wall. Teleporter pairs join rooms that
//! could not otherwise be reached.

use serde::{Deserialize, Serialize};

use super::units::{to_world, DOOR_WIDTH};

/// Cardinal side of a room (+y is north)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Grid step towards the neighbouring cell on this side
    pub fn offset(&self) -> (i64, i64) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    /// East and west walls run along the y axis
    pub fn wall_runs_along_y(&self) -> bool {
        matches!(self, Direction::East | Direction::West)
    }
}

/// A doorway between two rooms sharing a boundary
#[derive(Debug, Clone, PartialEq)]
pub struct Door {
    /// Door centre in grid units, lying on the shared boundary
    pub position: (f64, f64),
    /// Side of the first room the door is cut into
    pub direction: Direction,
    pub texture: String,
    /// Direction the door slides when opening (engine angle in degrees)
    pub angle: i32,
    /// Connected rooms, lower index first
    pub rooms: (usize, usize),
}

impl Door {
    /// Slide angle for a door cut into a wall on the given side
    pub fn slide_angle(direction: Direction) -> i32 {
        if direction.wall_runs_along_y() {
            90
        } else {
            0
        }
    }

    pub fn connects(&self, a: usize, b: usize) -> bool {
        self.rooms == (a.min(b), a.max(b))
    }

    /// Lattice coordinate of the wall line the door sits on
    pub fn boundary(&self) -> f64 {
        if self.direction.wall_runs_along_y() {
            self.position.0
        } else {
            self.position.1
        }
    }

    /// Door centre measured along its wall
    pub fn along(&self) -> f64 {
        if self.direction.wall_runs_along_y() {
            self.position.1
        } else {
            self.position.0
        }
    }

    /// Extent of the opening along its wall, in engine units
    pub fn opening(&self) -> (i32, i32) {
        let center = to_world(self.along());
        (center - DOOR_WIDTH / 2, center + DOOR_WIDTH / 2)
    }
}

/// One end of a teleporter link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeleporterEndpoint {
    pub room: usize,
    /// Centre of the trigger pad, engine units
    pub pad: (i32, i32),
    /// Where players arriving at this end appear
    pub destination: (i32, i32),
    /// Name other triggers use to target this end's destination
    pub targetname: String,
}

/// A bidirectional teleporter link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeleporterPair {
    pub id: usize,
    pub a: TeleporterEndpoint,
    pub b: TeleporterEndpoint,
}

/// One of the four linked entity records of a teleporter pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeleporterRecord<'a> {
    /// Touch volume at `at`, sending players to the destination named `target`
    Trigger { at: &'a TeleporterEndpoint, target: &'a str },
    /// Arrival point at `at`
    Destination { at: &'a TeleporterEndpoint },
}

impl TeleporterPair {
    pub fn rooms(&self) -> (usize, usize) {
        (self.a.room, self.b.room)
    }

    /// Trigger and destination records; each trigger targets the other end
    pub fn records(&self) -> [TeleporterRecord<'_>; 4] {
        [
            TeleporterRecord::Trigger { at: &self.a, target: &self.b.targetname },
            TeleporterRecord::Destination { at: &self.b },
            TeleporterRecord::Trigger { at: &self.b, target: &self.a.targetname },
            TeleporterRecord::Destination { at: &self.a },
        ]
    }
}
