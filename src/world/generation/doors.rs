//! Door planning
//!
//! Every pair of rooms sharing a wall segment is a door candidate. A door
//! sits at the middle of the shared segment and must clear the corner
//! buffer, open into the right rooms, and stay off lattice points where
//! three or more rooms meet.

use rand::rngs::StdRng;

use super::themes::pick_texture;
use crate::data::themes::DOOR_TEXTURES;
use crate::data::DoorPlanning;
use crate::world::{Direction, Door, Grid, GridRect, Room};

/// A wall segment shared by two rooms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjacency {
    /// Side of the first room the shared wall lies on
    pub direction: Direction,
    /// Lattice coordinate of the shared wall line
    pub boundary: usize,
    /// Extent of the shared segment along the wall
    pub overlap: (usize, usize),
}

impl Adjacency {
    /// Lattice point on the wall at `along`, as (x, y)
    fn point(&self, along: f64) -> (f64, f64) {
        if self.direction.wall_runs_along_y() {
            (self.boundary as f64, along)
        } else {
            (along, self.boundary as f64)
        }
    }
}

/// Why a door candidate was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorRejection {
    /// Shared segment is too short once the corner buffers are removed
    TooNarrow,
    /// The cells either side of the door belong to other rooms
    WrongRooms,
    /// The door would sit where three or more rooms meet
    MultiRoomCorner,
}

fn shared_span(a: (usize, usize), b: (usize, usize)) -> Option<(usize, usize)> {
    let lo = a.0.max(b.0);
    let hi = a.1.min(b.1);
    (hi > lo).then_some((lo, hi))
}

/// Find the wall segment shared by two rectangles, if any.
///
/// Only edge contact with a positive overlap counts; rectangles touching at
/// a single corner are not adjacent.
pub fn find_adjacency(a: &GridRect, b: &GridRect) -> Option<Adjacency> {
    let ys = (a.bottom(), a.top());
    let b_ys = (b.bottom(), b.top());
    let xs = (a.left(), a.right());
    let b_xs = (b.left(), b.right());

    let candidates = [
        (a.right() == b.left(), Direction::East, a.right(), shared_span(ys, b_ys)),
        (b.right() == a.left(), Direction::West, a.left(), shared_span(ys, b_ys)),
        (a.top() == b.bottom(), Direction::North, a.top(), shared_span(xs, b_xs)),
        (b.top() == a.bottom(), Direction::South, a.bottom(), shared_span(xs, b_xs)),
    ];

    candidates.into_iter().find_map(|(touching, direction, boundary, overlap)| {
        if touching {
            overlap.map(|overlap| Adjacency { direction, boundary, overlap })
        } else {
            None
        }
    })
}

/// Door centre along the shared wall, or `None` when the buffered segment
/// is narrower than the minimum door width.
pub fn door_along(adjacency: &Adjacency, planning: &DoorPlanning) -> Option<f64> {
    let start = adjacency.overlap.0 as f64 + planning.corner_buffer;
    let end = adjacency.overlap.1 as f64 - planning.corner_buffer;
    if end - start < planning.min_door_width {
        return None;
    }
    Some((start + end) / 2.0)
}

/// Check that the cell on the near side of the door belongs to `a` and the
/// cell on the far side to `b`.
pub fn opens_between(grid: &Grid, adjacency: &Adjacency, along: f64, a: usize, b: usize) -> bool {
    let cell = along.floor() as i64;
    let boundary = adjacency.boundary as i64;
    let near = match adjacency.direction {
        Direction::East => (boundary - 1, cell),
        Direction::West => (boundary, cell),
        Direction::North => (cell, boundary - 1),
        Direction::South => (cell, boundary),
    };
    let (dx, dy) = adjacency.direction.offset();
    let far = (near.0 + dx, near.1 + dy);

    grid.room_at(near.0, near.1) == Some(a) && grid.room_at(far.0, far.1) == Some(b)
}

/// True when `point` lies within `tolerance` of a lattice point that is a
/// rectangle corner of three or more distinct rooms.
pub fn is_multi_room_corner(rooms: &[Room], point: (f64, f64), tolerance: f64) -> bool {
    let lx = point.0.round();
    let ly = point.1.round();
    if (point.0 - lx).abs() > tolerance || (point.1 - ly).abs() > tolerance {
        return false;
    }
    if lx < 0.0 || ly < 0.0 {
        return false;
    }
    let lattice = (lx as usize, ly as usize);

    let meeting = rooms
        .iter()
        .filter(|room| room.rect.corners().contains(&lattice))
        .count();
    meeting >= 3
}

/// Validate a door between rooms `a` and `b` and return its position
pub fn check_door(
    grid: &Grid,
    rooms: &[Room],
    adjacency: &Adjacency,
    a: usize,
    b: usize,
    planning: &DoorPlanning,
) -> Result<(f64, f64), DoorRejection> {
    let along = door_along(adjacency, planning).ok_or(DoorRejection::TooNarrow)?;
    if !opens_between(grid, adjacency, along, a, b) {
        return Err(DoorRejection::WrongRooms);
    }
    let position = adjacency.point(along);
    if is_multi_room_corner(rooms, position, planning.corner_tolerance) {
        return Err(DoorRejection::MultiRoomCorner);
    }
    Ok(position)
}

/// Result of the door planning pass
#[derive(Debug, Default)]
pub struct DoorPlan {
    pub doors: Vec<Door>,
    /// Adjacent pairs that got no door
    pub skipped: usize,
}

/// Plan at most one door per adjacent room pair, in pair order.
///
/// One door texture is drawn per accepted door.
pub fn plan_doors(
    rng: &mut StdRng,
    grid: &Grid,
    rooms: &[Room],
    planning: &DoorPlanning,
    variety: bool,
) -> DoorPlan {
    let mut plan = DoorPlan::default();

    for (i, first) in rooms.iter().enumerate() {
        for second in &rooms[i + 1..] {
            let Some(adjacency) = find_adjacency(&first.rect, &second.rect) else {
                continue;
            };

            match check_door(grid, rooms, &adjacency, first.index, second.index, planning) {
                Ok(position) => {
                    plan.doors.push(Door {
                        position,
                        direction: adjacency.direction,
                        texture: pick_texture(rng, DOOR_TEXTURES, variety),
                        angle: Door::slide_angle(adjacency.direction),
                        rooms: (first.index, second.index),
                    });
                }
                Err(reason) => {
                    log::debug!(
                        "No door between rooms {} and {}: {:?}",
                        first.index,
                        second.index,
                        reason
                    );
                    plan.skipped += 1;
                }
            }
        }
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::room_types;
    use rand::SeedableRng;

    fn layout(size: usize, rects: &[GridRect]) -> (Grid, Vec<Room>) {
        let mut grid = Grid::new(size);
        let rooms = rects
            .iter()
            .enumerate()
            .map(|(i, rect)| {
                grid.occupy(rect, i);
                Room::new(i, *rect, room_types::standard())
            })
            .collect();
        (grid, rooms)
    }

    #[test]
    fn test_adjacency_sides() {
        let a = GridRect::new(0, 0, 2, 2);
        let east = find_adjacency(&a, &GridRect::new(2, 1, 2, 3)).expect("east");
        assert_eq!(east.direction, Direction::East);
        assert_eq!(east.boundary, 2);
        assert_eq!(east.overlap, (1, 2));

        let north = find_adjacency(&a, &GridRect::new(1, 2, 1, 1)).expect("north");
        assert_eq!(north.direction, Direction::North);
        assert_eq!(north.overlap, (1, 2));

        let west = find_adjacency(&GridRect::new(3, 0, 1, 1), &GridRect::new(1, 0, 2, 2));
        assert_eq!(west.map(|w| w.direction), Some(Direction::West));
    }

    #[test]
    fn test_corner_touch_is_not_adjacent() {
        let a = GridRect::new(0, 0, 2, 2);
        assert_eq!(find_adjacency(&a, &GridRect::new(2, 2, 1, 1)), None);
        assert_eq!(find_adjacency(&a, &GridRect::new(3, 0, 1, 1)), None);
    }

    #[test]
    fn test_buffer_rejects_short_walls() {
        let planning = DoorPlanning::default();
        let short = Adjacency { direction: Direction::East, boundary: 1, overlap: (0, 1) };
        assert_eq!(door_along(&short, &planning), None);

        // 2 cells minus 2 × 0.75 leaves exactly the minimum width
        let exact = Adjacency { direction: Direction::East, boundary: 1, overlap: (0, 2) };
        assert_eq!(door_along(&exact, &planning), Some(1.0));
    }

    #[test]
    fn test_three_room_corner_detected() {
        // Three rooms whose corners all meet at (2, 2)
        let (_, rooms) = layout(
            4,
            &[GridRect::new(0, 0, 2, 2), GridRect::new(2, 0, 2, 2), GridRect::new(0, 2, 2, 2)],
        );
        assert!(is_multi_room_corner(&rooms, (2.0, 2.0), 0.1));
        assert!(is_multi_room_corner(&rooms, (2.05, 1.95), 0.1));
        assert!(!is_multi_room_corner(&rooms, (2.0, 1.5), 0.1));
        // Only two rooms meet at (2, 0)
        assert!(!is_multi_room_corner(&rooms, (2.0, 0.0), 0.1));
    }

    #[test]
    fn test_door_on_shared_corner_never_accepted() {
        let (grid, rooms) = layout(
            4,
            &[GridRect::new(0, 0, 2, 2), GridRect::new(2, 0, 2, 2), GridRect::new(0, 2, 2, 2)],
        );
        // Unbuffered planning whose door would land right on the shared corner
        let planning = DoorPlanning { corner_buffer: 0.0, min_door_width: 0.0, corner_tolerance: 0.1 };
        let adjacency = Adjacency { direction: Direction::East, boundary: 2, overlap: (2, 2) };
        assert_eq!(
            check_door(&grid, &rooms, &adjacency, 0, 1, &planning),
            Err(DoorRejection::WrongRooms)
        );
        assert!(is_multi_room_corner(&rooms, adjacency.point(2.0), planning.corner_tolerance));
    }

    #[test]
    fn test_plan_doors_for_l_layout() {
        let (grid, rooms) = layout(
            4,
            &[GridRect::new(0, 0, 2, 2), GridRect::new(2, 0, 2, 2), GridRect::new(0, 2, 2, 2)],
        );
        let mut rng = StdRng::seed_from_u64(1);
        let plan = plan_doors(&mut rng, &grid, &rooms, &DoorPlanning::default(), true);

        assert_eq!(plan.doors.len(), 2);
        assert_eq!(plan.skipped, 0);
        assert_eq!(plan.doors[0].rooms, (0, 1));
        assert_eq!(plan.doors[0].position, (2.0, 1.0));
        assert_eq!(plan.doors[0].angle, 90);
        assert_eq!(plan.doors[1].rooms, (0, 2));
        assert_eq!(plan.doors[1].position, (1.0, 2.0));
        assert_eq!(plan.doors[1].angle, 0);
        for door in &plan.doors {
            assert!(DOOR_TEXTURES.contains(&door.texture.as_str()));
            assert!(!is_multi_room_corner(&rooms, door.position, 0.1));
        }
    }

    #[test]
    fn test_single_cells_are_too_narrow() {
        let (grid, rooms) = layout(
            3,
            &[GridRect::new(0, 0, 1, 1), GridRect::new(1, 0, 1, 1), GridRect::new(0, 1, 1, 1)],
        );
        let mut rng = StdRng::seed_from_u64(2);
        let plan = plan_doors(&mut rng, &grid, &rooms, &DoorPlanning::default(), true);
        assert!(plan.doors.is_empty());
        assert_eq!(plan.skipped, 2);
    }

    #[test]
    fn test_wrong_room_check() {
        let (grid, _) = layout(4, &[GridRect::new(0, 0, 1, 2), GridRect::new(1, 0, 1, 1)]);
        let adjacency = Adjacency { direction: Direction::East, boundary: 1, overlap: (0, 1) };
        assert!(opens_between(&grid, &adjacency, 0.5, 0, 1));
        // The cell east of (0, 1) is empty
        assert!(!opens_between(&grid, &adjacency, 1.5, 0, 1));
        assert!(!opens_between(&grid, &adjacency, 0.5, 1, 0));
    }
}
