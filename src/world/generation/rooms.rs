//! Room placement
//!
//! Drops rectangular rooms onto the occupancy grid at random positions,
//! keeping the first candidate that touches no existing room.

use rand::Rng;
use rand::rngs::StdRng;

use crate::data::{RoomShape, RoomType};
use crate::world::{Grid, GridRect, Room};

/// Draw a width and height for a room of the given type.
///
/// Returns `None` when the type cannot fit on the grid at all.
fn draw_size(
    rng: &mut StdRng,
    room_type: &RoomType,
    default_range: (usize, usize),
    grid_size: usize,
) -> Option<(usize, usize)> {
    let (min, max) = room_type.size_range(default_range);
    let max = max.min(grid_size);
    if min == 0 || min > max {
        return None;
    }

    match room_type.shape {
        RoomShape::Normal => {
            let width = rng.gen_range(min..=max);
            let height = rng.gen_range(min..=max);
            Some((width, height))
        }
        RoomShape::Hallway => {
            // Long and one cell wide, running either way
            let long = rng.gen_range(min..=max);
            if rng.gen_bool(0.5) {
                Some((long, 1))
            } else {
                Some((1, long))
            }
        }
    }
}

/// Try to place one room of `room_type`, giving it index `index`.
///
/// Each attempt draws a size and a position that fits inside the grid; the
/// first free area wins and is marked on the grid. `None` means every
/// attempt collided, which callers count as a skip.
pub fn place_room(
    rng: &mut StdRng,
    grid: &mut Grid,
    room_type: &'static RoomType,
    default_range: (usize, usize),
    attempts: u32,
    index: usize,
) -> Option<Room> {
    let grid_size = grid.size();

    for _ in 0..attempts {
        let (width, height) = draw_size(rng, room_type, default_range, grid_size)?;
        let x = rng.gen_range(0..=grid_size - width);
        let y = rng.gen_range(0..=grid_size - height);
        let rect = GridRect::new(x, y, width, height);

        if grid.is_area_free(&rect) {
            grid.occupy(&rect, index);
            return Some(Room::new(index, rect, room_type));
        }
    }

    None
}

/// Place a room at a fixed rectangle, bypassing the random draw
pub fn place_room_at(
    grid: &mut Grid,
    rect: GridRect,
    room_type: &'static RoomType,
    index: usize,
) -> Option<Room> {
    if !grid.is_area_free(&rect) {
        return None;
    }
    grid.occupy(&rect, index);
    Some(Room::new(index, rect, room_type))
}
