//! Feature layouts
//!
//! Pure geometry for room features. Both the population pass (to keep spawns
//! clear) and the emitter (to build solids) read layouts from here, so the
//! two always agree.

use super::grid::GridRect;
use super::room::{Room, RoomFeature};
use super::units::{
    WorldRect, CELL_SIZE, PILLAR_SIZE, PLATFORM_MIN_SIZE, PLATFORM_SIZE, PLATFORM_STEP,
    WALKWAY_MARGIN, WALL_THICKNESS,
};

/// A raised platform: footprint and top height
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub rect: WorldRect,
    pub top: i32,
}

/// Usable floor inside a room once the wall half-thickness and walkway are removed
fn inner_area(room: &Room) -> WorldRect {
    room.bounds().inset(WALKWAY_MARGIN + WALL_THICKNESS / 2)
}

/// Cells of a central pit; `None` when the room has no interior cells.
///
/// The pit never touches the room's border ring of cells so a dry walkway
/// remains along every wall.
pub fn pit_cells(rect: &GridRect, ratio: f32) -> Option<GridRect> {
    if rect.width < 3 || rect.height < 3 {
        return None;
    }
    let inner_w = rect.width - 2;
    let inner_h = rect.height - 2;
    let scale = |n: usize| ((n as f32 * ratio).round() as usize).clamp(1, n);
    let pit_w = scale(inner_w);
    let pit_h = scale(inner_h);
    Some(GridRect::new(
        rect.x + 1 + (inner_w - pit_w) / 2,
        rect.y + 1 + (inner_h - pit_h) / 2,
        pit_w,
        pit_h,
    ))
}

/// Pool area of a liquid feature; `None` when the walkway leaves no room
pub fn liquid_pool(room: &Room) -> Option<WorldRect> {
    let pool = inner_area(room);
    (!pool.is_degenerate()).then_some(pool)
}

/// Number of pillars suited to a room's footprint
pub fn pillar_count_for(rect: &GridRect) -> u8 {
    let short = rect.width.min(rect.height);
    let long = rect.width.max(rect.height);
    if short >= 4 {
        4
    } else if long >= 3 {
        2
    } else {
        1
    }
}

/// Pillar centres: one in the middle, two along the long axis, or a 2×2 grid
pub fn pillar_positions(room: &Room, count: u8) -> Vec<(i32, i32)> {
    let b = room.bounds();
    let (cx, cy) = b.center();
    match count {
        0 => Vec::new(),
        1 => vec![(cx, cy)],
        2 if b.width() >= b.height() => {
            vec![(b.min_x + b.width() / 3, cy), (b.min_x + b.width() * 2 / 3, cy)]
        }
        2 => vec![(cx, b.min_y + b.height() / 3), (cx, b.min_y + b.height() * 2 / 3)],
        _ => {
            let (qx, qy) = (b.width() / 4, b.height() / 4);
            vec![
                (b.min_x + qx, b.min_y + qy),
                (b.max_x - qx, b.min_y + qy),
                (b.min_x + qx, b.max_y - qy),
                (b.max_x - qx, b.max_y - qy),
            ]
        }
    }
}

/// Up to `count` platforms along the room diagonal, each higher than the last.
///
/// Fewer platforms are returned when the room is too small to fit them.
pub fn platforms(room: &Room, count: u8) -> Vec<Platform> {
    let area = inner_area(room);
    if area.is_degenerate() {
        return Vec::new();
    }

    let mut n = i32::from(count.min(3));
    while n > 0 {
        let slot_x = area.width() / n;
        let slot_y = area.height() / n;
        let size_x = PLATFORM_SIZE.min(slot_x - WALL_THICKNESS);
        let size_y = PLATFORM_SIZE.min(slot_y - WALL_THICKNESS);
        if size_x >= PLATFORM_MIN_SIZE && size_y >= PLATFORM_MIN_SIZE {
            return (0..n)
                .map(|i| {
                    let cx = area.min_x + slot_x * i + slot_x / 2;
                    let cy = area.min_y + slot_y * i + slot_y / 2;
                    let rect = WorldRect::new(
                        cx - size_x / 2,
                        cy - size_y / 2,
                        cx - size_x / 2 + size_x,
                        cy - size_y / 2 + size_y,
                    );
                    Platform { rect, top: room.floor_z() + PLATFORM_STEP * (i + 1) }
                })
                .collect();
        }
        n -= 1;
    }
    Vec::new()
}

/// Floor areas covered by the room's feature
pub fn footprints(room: &Room) -> Vec<WorldRect> {
    match room.feature {
        RoomFeature::None => Vec::new(),
        RoomFeature::Pit { ratio } => pit_cells(&room.rect, ratio)
            .map(|pit| {
                vec![WorldRect::new(
                    pit.left() as i32 * CELL_SIZE,
                    pit.bottom() as i32 * CELL_SIZE,
                    pit.right() as i32 * CELL_SIZE,
                    pit.top() as i32 * CELL_SIZE,
                )]
            })
            .unwrap_or_default(),
        RoomFeature::Liquid { .. } => liquid_pool(room).into_iter().collect(),
        RoomFeature::Pillars { count } => pillar_positions(room, count)
            .into_iter()
            .map(|(x, y)| WorldRect::centered(x, y, PILLAR_SIZE))
            .collect(),
        RoomFeature::Platforms { count } => {
            platforms(room, count).into_iter().map(|p| p.rect).collect()
        }
    }
}

/// True when the feature would produce no geometry for this room
pub fn is_degenerate(room: &Room, feature: RoomFeature) -> bool {
    match feature {
        RoomFeature::None => false,
        RoomFeature::Pit { ratio } => pit_cells(&room.rect, ratio).is_none(),
        RoomFeature::Liquid { .. } => liquid_pool(room).is_none(),
        RoomFeature::Pillars { count } => count == 0,
        RoomFeature::Platforms { count } => platforms(room, count).is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::room_types;

    fn room(x: usize, y: usize, w: usize, h: usize) -> Room {
        Room::new(0, GridRect::new(x, y, w, h), room_types::standard())
    }

    #[test]
    fn test_pit_keeps_border_ring() {
        assert_eq!(pit_cells(&GridRect::new(0, 0, 2, 5), 0.5), None);
        assert_eq!(pit_cells(&GridRect::new(0, 0, 3, 3), 0.5), Some(GridRect::new(1, 1, 1, 1)));

        let pit = pit_cells(&GridRect::new(2, 2, 6, 5), 0.5).expect("pit");
        assert_eq!(pit, GridRect::new(4, 3, 2, 2));
        // Interior spans x 3..7, y 3..6
        assert!(pit.left() >= 3 && pit.right() <= 7);
        assert!(pit.bottom() >= 3 && pit.top() <= 6);
    }

    #[test]
    fn test_liquid_pool_inset() {
        let pool = liquid_pool(&room(0, 0, 1, 1)).expect("pool fits a single cell");
        assert_eq!(pool, WorldRect::new(72, 72, 184, 184));
    }

    #[test]
    fn test_pillar_layouts_scale() {
        assert_eq!(pillar_count_for(&GridRect::new(0, 0, 2, 2)), 1);
        assert_eq!(pillar_count_for(&GridRect::new(0, 0, 3, 2)), 2);
        assert_eq!(pillar_count_for(&GridRect::new(0, 0, 4, 5)), 4);

        let r = room(0, 0, 3, 2);
        assert_eq!(pillar_positions(&r, 2), vec![(256, 256), (512, 256)]);
        let r = room(0, 0, 4, 4);
        let four = pillar_positions(&r, 4);
        assert_eq!(four.len(), 4);
        assert!(four.contains(&(256, 256)) && four.contains(&(768, 768)));
    }

    #[test]
    fn test_platforms_climb_and_shrink_to_fit() {
        let big = platforms(&room(0, 0, 4, 4), 3);
        assert_eq!(big.len(), 3);
        assert!(big.windows(2).all(|w| w[0].top < w[1].top));
        assert!(big.iter().all(|p| !p.rect.is_degenerate()));

        // A single cell only fits one platform
        assert_eq!(platforms(&room(0, 0, 1, 1), 3).len(), 1);
    }

    #[test]
    fn test_footprints_follow_feature() {
        let mut r = room(0, 0, 3, 3);
        assert!(footprints(&r).is_empty());
        r.feature = RoomFeature::Pit { ratio: 0.5 };
        assert_eq!(footprints(&r), vec![WorldRect::new(256, 256, 512, 512)]);
        r.feature = RoomFeature::Pillars { count: 2 };
        assert_eq!(footprints(&r).len(), 2);
    }
}
