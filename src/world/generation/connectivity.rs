//! Connectivity repair
//!
//! Rooms joined by doors form components. Every component that cannot be
//! walked to from the spawn room gets one teleporter pair linking it to the
//! spawn component, so the whole level is reachable.

use std::collections::VecDeque;

use rand::Rng;
use rand::rngs::StdRng;

use crate::world::units::CELL_SIZE;
use crate::world::{Door, Room, TeleporterEndpoint, TeleporterPair};

/// Offset of a pad from its cell corner; the destination sits in the
/// opposite quarter of the same cell
const QUARTER: i32 = CELL_SIZE / 4;

/// Undirected room graph from doors and teleporter pairs
pub fn adjacency_list(
    room_count: usize,
    doors: &[Door],
    teleporters: &[TeleporterPair],
) -> Vec<Vec<usize>> {
    let mut adjacency = vec![Vec::new(); room_count];
    let edges = doors
        .iter()
        .map(|d| d.rooms)
        .chain(teleporters.iter().map(|t| t.rooms()));

    for (a, b) in edges {
        if a < room_count && b < room_count && a != b {
            adjacency[a].push(b);
            adjacency[b].push(a);
        }
    }
    adjacency
}

/// Hop counts from `start` by breadth-first search; `None` for unreachable rooms
pub fn bfs_distances(adjacency: &[Vec<usize>], start: usize) -> Vec<Option<usize>> {
    let mut distances = vec![None; adjacency.len()];
    if start >= adjacency.len() {
        return distances;
    }

    let mut queue = VecDeque::new();
    distances[start] = Some(0);
    queue.push_back(start);

    while let Some(room) = queue.pop_front() {
        let next = distances[room].map_or(0, |d| d + 1);
        for &neighbour in &adjacency[room] {
            if distances[neighbour].is_none() {
                distances[neighbour] = Some(next);
                queue.push_back(neighbour);
            }
        }
    }
    distances
}

/// Connected components in index order; rooms within a component appear in
/// discovery order. The first component always holds room 0.
pub fn connected_components(adjacency: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let mut seen = vec![false; adjacency.len()];
    let mut components = Vec::new();

    for start in 0..adjacency.len() {
        if seen[start] {
            continue;
        }
        let mut component = Vec::new();
        let mut queue = VecDeque::from([start]);
        seen[start] = true;

        while let Some(room) = queue.pop_front() {
            component.push(room);
            for &neighbour in &adjacency[room] {
                if !seen[neighbour] {
                    seen[neighbour] = true;
                    queue.push_back(neighbour);
                }
            }
        }
        components.push(component);
    }
    components
}

/// Pad and destination for the `slot`-th teleporter endpoint in a room.
///
/// Slots walk the room's cells row by row, first using the south-west
/// quarter of each cell for the pad, then the north-east quarter, so
/// endpoints sharing a room never overlap until every spot is taken.
pub fn endpoint_spot(room: &Room, slot: usize) -> ((i32, i32), (i32, i32)) {
    let area = room.rect.area().max(1);
    if slot >= 2 * area {
        log::warn!("Room {} has more teleporter endpoints than free spots", room.index);
    }
    let cell = slot % area;
    let cx = (room.rect.left() + cell % room.rect.width.max(1)) as i32 * CELL_SIZE;
    let cy = (room.rect.bottom() + cell / room.rect.width.max(1)) as i32 * CELL_SIZE;

    if (slot / area) % 2 == 0 {
        ((cx + QUARTER, cy + QUARTER), (cx + QUARTER, cy + 3 * QUARTER))
    } else {
        ((cx + 3 * QUARTER, cy + 3 * QUARTER), (cx + 3 * QUARTER, cy + QUARTER))
    }
}

/// Link every component unreachable from room 0 back to the spawn component.
///
/// For each stranded component one room is drawn from it and one from the
/// spawn component. Returns the new pairs in component order.
pub fn ensure_connectivity(rng: &mut StdRng, rooms: &[Room], doors: &[Door]) -> Vec<TeleporterPair> {
    let components = connected_components(&adjacency_list(rooms.len(), doors, &[]));
    let Some((spawn, stranded)) = components.split_first() else {
        return Vec::new();
    };

    let mut slots = vec![0usize; rooms.len()];
    let mut endpoint = |room: usize, name: String| {
        let (pad, destination) = endpoint_spot(&rooms[room], slots[room]);
        slots[room] += 1;
        TeleporterEndpoint { room, pad, destination, targetname: name }
    };

    let mut pairs = Vec::with_capacity(stranded.len());
    for (id, component) in stranded.iter().enumerate() {
        let far = component[rng.gen_range(0..component.len())];
        let near = spawn[rng.gen_range(0..spawn.len())];

        log::debug!("Teleporter {} links room {} to room {}", id, near, far);
        pairs.push(TeleporterPair {
            id,
            a: endpoint(near, format!("tele_{}_a", id)),
            b: endpoint(far, format!("tele_{}_b", id)),
        });
    }
    pairs
}

/// Room farthest from room 0 by hops through doors and teleporters.
///
/// Ties go to the higher index. A level needs two rooms to have a goal.
pub fn farthest_room(room_count: usize, doors: &[Door], teleporters: &[TeleporterPair]) -> Option<usize> {
    if room_count < 2 {
        return None;
    }
    let distances = bfs_distances(&adjacency_list(room_count, doors, teleporters), 0);
    distances
        .iter()
        .enumerate()
        .skip(1)
        .filter_map(|(room, d)| d.map(|d| (d, room)))
        .max()
        .map(|(_, room)| room)
}
