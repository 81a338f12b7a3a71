//! Level to map document
//!
//! Walks a finished [`Level`] and produces the worldspawn solids and every
//! point and brush entity. Uses no randomness: the same level always gives
//! the same document.

use std::collections::BTreeSet;

use super::brush::Brush;
use super::entity::{origin, Entity};
use super::writer::MapDocument;
use crate::data::themes::{
    GOAL_TEXTURE, HULL_CEILING_TEXTURE, HULL_FLOOR_TEXTURE, HULL_WALL_TEXTURE, TELEPORT_TEXTURE,
    TRIGGER_TEXTURE,
};
use crate::data::WorldSettings;
use crate::world::features::{self, liquid_pool, pit_cells};
use crate::world::generation::Level;
use crate::world::units::{
    to_world, WorldRect, CELL_SIZE, DOOR_HEIGHT, DOOR_THICKNESS, FLOOR_THICKNESS, GOAL_PAD_SIZE,
    HULL_PADDING, HULL_THICKNESS, LIGHT_DROP, LIQUID_DEPTH, PAD_HEIGHT, PAD_SIZE, PILLAR_SIZE,
    PIT_DEPTH, SPAWN_HEIGHT, TRIGGER_HEIGHT, WALL_THICKNESS,
};
use crate::world::{Direction, Door, LiquidKind, Room, RoomFeature, TeleporterRecord};

const HALF_WALL: i32 = WALL_THICKNESS / 2;
/// Corner lights sit this far in from the walls
const CORNER_LIGHT_INSET: i32 = 64;
const DOOR_SPEED: i32 = 100;
const DOOR_WAIT: i32 = 3;

/// Build the complete map document for a level
pub fn build_document(level: &Level, world: &WorldSettings) -> MapDocument {
    let mut entities = vec![worldspawn(level, world)];

    if let Some(start) = level.player_start() {
        entities.push(Entity::new("info_player_start").with("origin", origin(start)).with("angle", 0));
    }
    entities.extend(level.rooms.iter().flat_map(lights));
    entities.extend(level.spawns.iter().map(|spawn| {
        let mut entity = Entity::new(spawn.classname).with("origin", origin(spawn.origin));
        if let Some(angle) = spawn.angle {
            entity.set("angle", angle);
        }
        entity
    }));
    entities.extend(level.doors.iter().filter_map(|door| door_entity(level, door)));
    entities.extend(teleporters(level));
    entities.extend(level.rooms.iter().flat_map(hazards));
    entities.extend(exit(level, world));

    MapDocument { header: header(level), entities }
}

fn header(level: &Level) -> Vec<String> {
    vec![
        "Game: Quake".to_string(),
        "Format: Standard".to_string(),
        format!("Generator: qmapgen {}", env!("CARGO_PKG_VERSION")),
        format!("Seed: {}", level.seed),
        format!("Layout: {}", level.stats),
    ]
}

fn worldspawn(level: &Level, world: &WorldSettings) -> Entity {
    let mut entity = Entity::new("worldspawn")
        .with("wad", &world.wad)
        .with("message", &world.message)
        .with("worldtype", world.worldtype);
    if let Some(minlight) = world.minlight {
        entity.set("_minlight", minlight);
    }
    if let Some(fog) = &world.fog {
        entity.set("fog", fog);
    }
    if level.has_outdoor_rooms() {
        entity.set("_sunlight", 200);
        entity.set("_sun_mangle", "45 -60 0");
    }

    emit_hull(&mut entity, level);
    emit_surfaces(&mut entity, level);
    emit_walls(&mut entity, level);
    emit_features(&mut entity, level);
    emit_pads(&mut entity, level);
    entity
}

/// Lowest floor and highest ceiling over all rooms
fn height_range<'a>(rooms: impl IntoIterator<Item = &'a Room>) -> Option<(i32, i32)> {
    rooms.into_iter().fold(None, |range, room| {
        let (lo, hi) = range.unwrap_or((room.floor_z(), room.ceiling_z()));
        Some((lo.min(room.floor_z()), hi.max(room.ceiling_z())))
    })
}

/// Six slabs enclosing the whole grid with an air gap
fn emit_hull(entity: &mut Entity, level: &Level) {
    let extent = level.grid.size() as i32 * CELL_SIZE;
    let (floor, ceiling) = height_range(&level.rooms).unwrap_or((0, 0));
    let (x0, y0) = (-HULL_PADDING, -HULL_PADDING);
    let (x1, y1) = (extent + HULL_PADDING, extent + HULL_PADDING);
    let z0 = floor - PIT_DEPTH - FLOOR_THICKNESS - HULL_PADDING;
    let z1 = ceiling + FLOOR_THICKNESS + HULL_PADDING;
    let t = HULL_THICKNESS;

    entity.section("hull");
    entity.push_brush(Brush::new([x0 - t, y0 - t, z0 - t], [x1 + t, y1 + t, z0], HULL_FLOOR_TEXTURE));
    entity.push_brush(Brush::new([x0 - t, y0 - t, z1], [x1 + t, y1 + t, z1 + t], HULL_CEILING_TEXTURE));
    entity.push_brush(Brush::new([x0 - t, y0 - t, z0], [x0, y1 + t, z1], HULL_WALL_TEXTURE));
    entity.push_brush(Brush::new([x1, y0 - t, z0], [x1 + t, y1 + t, z1], HULL_WALL_TEXTURE));
    entity.push_brush(Brush::new([x0, y0 - t, z0], [x1, y0, z1], HULL_WALL_TEXTURE));
    entity.push_brush(Brush::new([x0, y1, z0], [x1, y1 + t, z1], HULL_WALL_TEXTURE));
}

fn cell_rect(x: usize, y: usize) -> WorldRect {
    let (x, y) = (x as i32 * CELL_SIZE, y as i32 * CELL_SIZE);
    WorldRect::new(x, y, x + CELL_SIZE, y + CELL_SIZE)
}

/// Cells of every pit, which get a sunken bottom instead of a floor
fn pit_cell_set(level: &Level) -> BTreeSet<(usize, usize)> {
    level
        .rooms
        .iter()
        .filter_map(|room| match room.feature {
            RoomFeature::Pit { ratio } => pit_cells(&room.rect, ratio),
            _ => None,
        })
        .flat_map(|pit| pit.cells().collect::<Vec<_>>())
        .collect()
}

/// Floor and ceiling slab for every occupied cell
fn emit_surfaces(entity: &mut Entity, level: &Level) {
    let pits = pit_cell_set(level);

    for room in &level.rooms {
        entity.section(format!("room {}: {} ({})", room.index, room.room_type.name, room.theme_name()));
        let (floor, ceiling) = (room.floor_z(), room.ceiling_z());

        for (x, y) in room.rect.cells() {
            let rect = cell_rect(x, y);
            if pits.contains(&(x, y)) {
                let bottom = floor - PIT_DEPTH;
                entity.push_brush(Brush::from_rect(rect, (bottom - FLOOR_THICKNESS, bottom), &room.textures.wall));
                entity.push_brush(Brush::from_rect(rect, (bottom, bottom + LIQUID_DEPTH), LiquidKind::Lava.texture()));
            } else {
                entity.push_brush(Brush::from_rect(rect, (floor - FLOOR_THICKNESS, floor), &room.textures.floor));
            }
            entity.push_brush(Brush::from_rect(rect, (ceiling, ceiling + FLOOR_THICKNESS), &room.textures.ceiling));
        }
    }
}

/// Slab centred on a wall line
fn wall_slab(runs_along_y: bool, boundary: i32, along: (i32, i32), z: (i32, i32), texture: &str) -> Option<Brush> {
    if runs_along_y {
        Brush::new([boundary - HALF_WALL, along.0, z.0], [boundary + HALF_WALL, along.1, z.1], texture)
    } else {
        Brush::new([along.0, boundary - HALF_WALL, z.0], [along.1, boundary + HALF_WALL, z.1], texture)
    }
}

/// Door opening on a wall: extent along the wall and its height range
#[derive(Debug, Clone, Copy)]
struct Opening {
    along: (i32, i32),
    z: (i32, i32),
}

fn door_heights(level: &Level, door: &Door) -> Option<(i32, i32)> {
    let a = level.room(door.rooms.0)?;
    let b = level.room(door.rooms.1)?;
    let bottom = a.floor_z().max(b.floor_z());
    Some((bottom, bottom + DOOR_HEIGHT))
}

/// Wall pieces for one cell edge: the full slab, or jambs, lintel and sill
/// around a door opening.
fn wall_pieces(
    runs_along_y: bool,
    boundary: i32,
    span: (i32, i32),
    z: (i32, i32),
    opening: Option<Opening>,
    texture: &str,
) -> Vec<Option<Brush>> {
    let gap = opening.and_then(|o| {
        let g0 = span.0.max(o.along.0);
        let g1 = span.1.min(o.along.1);
        (g1 > g0).then_some(((g0, g1), o.z))
    });

    match gap {
        None => vec![wall_slab(runs_along_y, boundary, span, z, texture)],
        Some(((g0, g1), (d0, d1))) => vec![
            wall_slab(runs_along_y, boundary, (span.0, g0), z, texture),
            wall_slab(runs_along_y, boundary, (g1, span.1), z, texture),
            wall_slab(runs_along_y, boundary, (g0, g1), (d1, z.1), texture),
            wall_slab(runs_along_y, boundary, (g0, g1), (z.0, d0), texture),
        ],
    }
}

/// Walls on every cell edge facing empty space or another room.
///
/// A shared edge is written once, by the lower-indexed room.
fn emit_walls(entity: &mut Entity, level: &Level) {
    const SIDES: [Direction; 4] = [Direction::West, Direction::East, Direction::South, Direction::North];

    entity.section("walls");
    for (x, y, owner) in level.grid.occupied_cells() {
        let Some(room) = level.room(owner) else { continue };

        for side in SIDES {
            let (dx, dy) = side.offset();
            let neighbour = level.grid.room_at(x as i64 + dx, y as i64 + dy);
            match neighbour {
                Some(n) if n <= owner => continue,
                _ => {}
            }

            let cell = cell_rect(x, y);
            let runs_along_y = side.wall_runs_along_y();
            let (boundary, span) = match side {
                Direction::West => (cell.min_x, (cell.min_y, cell.max_y)),
                Direction::East => (cell.max_x, (cell.min_y, cell.max_y)),
                Direction::South => (cell.min_y, (cell.min_x, cell.max_x)),
                Direction::North => (cell.max_y, (cell.min_x, cell.max_x)),
            };
            let span = (span.0 - HALF_WALL, span.1 + HALF_WALL);

            let other = neighbour.and_then(|n| level.room(n));
            let Some((floor, ceiling)) = height_range([Some(room), other].into_iter().flatten()) else {
                continue;
            };
            let z = (floor - FLOOR_THICKNESS, ceiling + FLOOR_THICKNESS);

            let opening = neighbour.and_then(|n| {
                level
                    .doors
                    .iter()
                    .find(|d| {
                        d.connects(owner, n)
                            && d.direction.wall_runs_along_y() == runs_along_y
                            && to_world(d.boundary()) == boundary
                    })
                    .and_then(|d| Some(Opening { along: d.opening(), z: door_heights(level, d)? }))
            });

            for piece in wall_pieces(runs_along_y, boundary, span, z, opening, &room.textures.wall) {
                entity.push_brush(piece);
            }
        }
    }
}

/// Pit linings, pools, pillars and platforms
fn emit_features(entity: &mut Entity, level: &Level) {
    for room in &level.rooms {
        let (floor, ceiling) = (room.floor_z(), room.ceiling_z());
        let texture = &room.textures;

        match room.feature {
            RoomFeature::None => continue,
            RoomFeature::Pit { ratio } => {
                let Some(pit) = pit_cells(&room.rect, ratio) else { continue };
                entity.section(format!("room {} pit", room.index));
                let r = WorldRect::new(
                    pit.left() as i32 * CELL_SIZE,
                    pit.bottom() as i32 * CELL_SIZE,
                    pit.right() as i32 * CELL_SIZE,
                    pit.top() as i32 * CELL_SIZE,
                );
                let t = FLOOR_THICKNESS;
                let z = (floor - PIT_DEPTH - t, floor - t);
                entity.push_brush(Brush::new([r.min_x - t, r.min_y - t, z.0], [r.min_x, r.max_y + t, z.1], &texture.wall));
                entity.push_brush(Brush::new([r.max_x, r.min_y - t, z.0], [r.max_x + t, r.max_y + t, z.1], &texture.wall));
                entity.push_brush(Brush::new([r.min_x, r.min_y - t, z.0], [r.max_x, r.min_y, z.1], &texture.wall));
                entity.push_brush(Brush::new([r.min_x, r.max_y, z.0], [r.max_x, r.max_y + t, z.1], &texture.wall));
            }
            RoomFeature::Liquid { kind, .. } => {
                let Some(pool) = liquid_pool(room) else { continue };
                entity.section(format!("room {} pool", room.index));
                entity.push_brush(Brush::from_rect(pool, (floor, floor + LIQUID_DEPTH), kind.texture()));
            }
            RoomFeature::Pillars { count } => {
                entity.section(format!("room {} pillars", room.index));
                for (x, y) in features::pillar_positions(room, count) {
                    let rect = WorldRect::centered(x, y, PILLAR_SIZE);
                    entity.push_brush(Brush::from_rect(rect, (floor, ceiling), &texture.wall));
                }
            }
            RoomFeature::Platforms { count } => {
                entity.section(format!("room {} platforms", room.index));
                for platform in features::platforms(room, count) {
                    entity.push_brush(Brush::from_rect(platform.rect, (floor, platform.top), &texture.floor));
                }
            }
        }
    }
}

/// Teleporter pads and the goal pad
fn emit_pads(entity: &mut Entity, level: &Level) {
    if level.teleporters.is_empty() && level.goal.is_none() {
        return;
    }
    entity.section("pads");

    for end in level.teleporters.iter().flat_map(|t| [&t.a, &t.b]) {
        let Some(room) = level.room(end.room) else { continue };
        let rect = WorldRect::centered(end.pad.0, end.pad.1, PAD_SIZE);
        entity.push_brush(Brush::from_rect(rect, (room.floor_z(), room.floor_z() + PAD_HEIGHT), TELEPORT_TEXTURE));
    }

    if let Some(room) = level.goal.and_then(|g| level.room(g)) {
        let (x, y) = room.center();
        let rect = WorldRect::centered(x, y, GOAL_PAD_SIZE);
        entity.push_brush(Brush::from_rect(rect, (room.floor_z(), room.floor_z() + PAD_HEIGHT), GOAL_TEXTURE));
    }
}

/// Light positions for a room, kept out of pillars
pub fn light_positions(room: &Room) -> Vec<(i32, i32, i32)> {
    let z = room.ceiling_z() - LIGHT_DROP;
    let b = room.bounds();

    let mut spots = if room.room_type.multi_light {
        let c = b.inset(CORNER_LIGHT_INSET);
        let mut corners = vec![(c.min_x, c.min_y), (c.max_x, c.min_y), (c.min_x, c.max_y), (c.max_x, c.max_y)];
        if room.rect.width >= 3 && room.rect.height >= 3 {
            corners.push(b.center());
        }
        corners
    } else {
        vec![b.center()]
    };

    if let RoomFeature::Pillars { .. } = room.feature {
        let blocked: Vec<WorldRect> = features::footprints(room).iter().map(|r| r.inset(-HALF_WALL)).collect();
        for spot in &mut spots {
            if blocked.iter().any(|r| r.contains_point(spot.0, spot.1)) {
                spot.0 += PILLAR_SIZE + WALL_THICKNESS;
            }
        }
    }

    spots.into_iter().map(|(x, y)| (x, y, z)).collect()
}

fn lights(room: &Room) -> Vec<Entity> {
    light_positions(room)
        .into_iter()
        .map(|at| {
            let mut light = Entity::new("light")
                .with("origin", origin(at))
                .with("light", room.room_type.light);
            if let Some((r, g, b)) = room.room_type.light_color {
                light.set("_color", format!("{} {} {}", r, g, b));
            }
            light
        })
        .collect()
}

/// Sliding door with its own slab filling the opening
fn door_entity(level: &Level, door: &Door) -> Option<Entity> {
    let (bottom, top) = door_heights(level, door)?;
    let (a0, a1) = door.opening();
    let boundary = to_world(door.boundary());
    let half = DOOR_THICKNESS / 2;

    let brush = if door.direction.wall_runs_along_y() {
        Brush::new([boundary - half, a0, bottom], [boundary + half, a1, top], &door.texture)
    } else {
        Brush::new([a0, boundary - half, bottom], [a1, boundary + half, top], &door.texture)
    };

    Some(
        Entity::new("func_door")
            .with("angle", door.angle)
            .with("speed", DOOR_SPEED)
            .with("wait", DOOR_WAIT)
            .with_brush(brush),
    )
}

/// Trigger volume sitting on top of a pad
fn pad_trigger(room: &Room, center: (i32, i32), size: i32) -> Option<Brush> {
    let base = room.floor_z() + PAD_HEIGHT;
    Brush::from_rect(WorldRect::centered(center.0, center.1, size), (base, base + TRIGGER_HEIGHT), TRIGGER_TEXTURE)
}

fn teleporters(level: &Level) -> Vec<Entity> {
    let mut entities = Vec::new();
    for pair in &level.teleporters {
        for record in pair.records() {
            match record {
                TeleporterRecord::Trigger { at, target } => {
                    let Some(room) = level.room(at.room) else { continue };
                    entities.push(
                        Entity::new("trigger_teleport")
                            .with("target", target)
                            .with_brush(pad_trigger(room, at.pad, PAD_SIZE)),
                    );
                }
                TeleporterRecord::Destination { at } => {
                    let Some(room) = level.room(at.room) else { continue };
                    let (x, y) = at.destination;
                    entities.push(
                        Entity::new("info_teleport_destination")
                            .with("targetname", &at.targetname)
                            .with("origin", origin((x, y, room.floor_z() + SPAWN_HEIGHT)))
                            .with("angle", 0),
                    );
                }
            }
        }
    }
    entities
}

/// Damage volumes over harmful liquids
fn hazards(room: &Room) -> Vec<Entity> {
    let floor = room.floor_z();
    let hurt = |rect: WorldRect, z: (i32, i32), damage: u32| {
        Entity::new("trigger_hurt")
            .with("dmg", damage)
            .with_brush(Brush::from_rect(rect, z, TRIGGER_TEXTURE))
    };

    match room.feature {
        RoomFeature::Liquid { damage, .. } if damage > 0 => liquid_pool(room)
            .map(|pool| hurt(pool, (floor, floor + LIQUID_DEPTH), damage))
            .into_iter()
            .collect(),
        RoomFeature::Pit { ratio } => pit_cells(&room.rect, ratio)
            .map(|pit| {
                let rect = WorldRect::new(
                    pit.left() as i32 * CELL_SIZE,
                    pit.bottom() as i32 * CELL_SIZE,
                    pit.right() as i32 * CELL_SIZE,
                    pit.top() as i32 * CELL_SIZE,
                );
                let bottom = floor - PIT_DEPTH;
                hurt(rect, (bottom, bottom + LIQUID_DEPTH), LiquidKind::Lava.damage())
            })
            .into_iter()
            .collect(),
        _ => Vec::new(),
    }
}

/// Level exit over the goal pad
fn exit(level: &Level, world: &WorldSettings) -> Option<Entity> {
    let room = level.goal.and_then(|g| level.room(g))?;
    Some(
        Entity::new("trigger_changelevel")
            .with("map", &world.next_map)
            .with_brush(pad_trigger(room, room.center(), GOAL_PAD_SIZE)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{room_types, GeneratorConfig};
    use crate::world::GridRect;
    use crate::Session;

    fn level(rects: &[GridRect]) -> Level {
        let config = GeneratorConfig { seed: Some(7), ..GeneratorConfig::default() };
        let mut session = Session::new(config).expect("session");
        for rect in rects {
            session.add_room(*rect, room_types::standard()).expect("room fits");
        }
        session.finish()
    }

    fn strictly_overlaps(brush: &Brush, min: [i32; 3], max: [i32; 3]) -> bool {
        (0..3).all(|axis| brush.min()[axis] < max[axis] && min[axis] < brush.max()[axis])
    }

    #[test]
    fn test_single_room_document() {
        let mut lvl = level(&[GridRect::new(0, 0, 3, 3)]);
        lvl.rooms[0].feature = RoomFeature::None;
        let doc = build_document(&lvl, &WorldSettings::default());

        assert_eq!(doc.entities_of("info_player_start").count(), 1);
        assert_eq!(doc.entities_of("func_door").count(), 0);
        assert_eq!(doc.entities_of("trigger_teleport").count(), 0);
        assert_eq!(doc.entities_of("trigger_changelevel").count(), 0);
        assert_eq!(doc.entities_of("light").count(), 1);

        // hull + 9 floors + 9 ceilings + 12 perimeter wall slabs
        let world = doc.worldspawn().expect("worldspawn");
        assert_eq!(world.classname(), "worldspawn");
        assert_eq!(world.brushes().len(), 6 + 9 + 9 + 12);
        assert_eq!(world.get("message"), Some("Procedural Dungeon"));
    }

    #[test]
    fn test_teleporter_entities_cross_link() {
        let lvl = level(&[GridRect::new(0, 0, 2, 2), GridRect::new(7, 7, 2, 2)]);
        let doc = build_document(&lvl, &WorldSettings::default());

        let triggers: Vec<_> = doc.entities_of("trigger_teleport").collect();
        let destinations: Vec<_> = doc.entities_of("info_teleport_destination").collect();
        assert_eq!(triggers.len(), 2);
        assert_eq!(destinations.len(), 2);
        for trigger in triggers {
            let target = trigger.get("target").expect("target");
            assert!(destinations.iter().any(|d| d.get("targetname") == Some(target)));
            assert_eq!(trigger.brushes().len(), 1);
        }
        assert_eq!(doc.entities_of("trigger_changelevel").count(), 1);
    }

    #[test]
    fn test_door_opening_is_clear() {
        let lvl = level(&[GridRect::new(0, 0, 2, 2), GridRect::new(2, 0, 2, 2)]);
        assert_eq!(lvl.doors.len(), 1);
        let doc = build_document(&lvl, &WorldSettings::default());

        let doors: Vec<_> = doc.entities_of("func_door").collect();
        assert_eq!(doors.len(), 1);
        assert_eq!(doors[0].get("angle"), Some("90"));

        // Opening at x = 512, y 224..288, z 0..128
        let world = doc.worldspawn().expect("worldspawn");
        let (min, max) = ([504, 224, 0], [520, 288, 128]);
        assert!(!world.brushes().iter().any(|b| strictly_overlaps(b, min, max)));
        assert!(strictly_overlaps(&doors[0].brushes()[0], min, max));
    }

    #[test]
    fn test_every_room_is_enclosed_by_hull() {
        let config = GeneratorConfig { seed: Some(21), ..GeneratorConfig::default() };
        let lvl = crate::generate(config).expect("level");
        let doc = build_document(&lvl, &WorldSettings::default());
        let world = doc.worldspawn().expect("worldspawn");
        let hull_floor = &world.brushes()[0];
        let hull_ceiling = &world.brushes()[1];
        for brush in &world.brushes()[6..] {
            assert!(brush.min()[2] >= hull_floor.max()[2]);
            assert!(brush.max()[2] <= hull_ceiling.min()[2]);
        }
    }

    #[test]
    fn test_lights_avoid_pillars() {
        let mut room = Room::new(0, GridRect::new(0, 0, 1, 1), room_types::standard());
        room.feature = RoomFeature::Pillars { count: 1 };
        let lights = light_positions(&room);
        assert_eq!(lights.len(), 1);
        let pillar = WorldRect::centered(128, 128, PILLAR_SIZE);
        assert!(!pillar.contains_point(lights[0].0, lights[0].1));
        assert_eq!(lights[0].2, room.ceiling_z() - LIGHT_DROP);
    }

    fn brush_at<'a>(entity: &'a Entity, min: [i32; 3], max: [i32; 3]) -> Option<&'a Brush> {
        entity.brushes().iter().find(|b| b.min() == min && b.max() == max)
    }

    fn featured(rect: GridRect, feature: RoomFeature) -> (Level, MapDocument) {
        let mut lvl = level(&[rect]);
        lvl.rooms[0].feature = feature;
        let doc = build_document(&lvl, &WorldSettings::default());
        (lvl, doc)
    }

    #[test]
    fn test_pit_sinks_lava_and_closes_basin() {
        let (lvl, doc) = featured(GridRect::new(0, 0, 3, 3), RoomFeature::Pit { ratio: 0.5 });
        let world = doc.worldspawn().expect("worldspawn");
        let room = &lvl.rooms[0];
        let floor = room.floor_z();
        let bottom = floor - PIT_DEPTH;
        let t = FLOOR_THICKNESS;

        // The centre cell loses its floor slab; its neighbours keep theirs
        assert!(brush_at(world, [256, 256, floor - t], [512, 512, floor]).is_none());
        assert!(brush_at(world, [0, 256, floor - t], [256, 512, floor]).is_some());

        let lava = brush_at(world, [256, 256, bottom], [512, 512, bottom + LIQUID_DEPTH]).expect("lava");
        assert_eq!(lava.texture(), "*lava1");
        assert!(brush_at(world, [256, 256, bottom - t], [512, 512, bottom]).is_some());

        // Lining walls run from under the pit bottom up to the surrounding floor slabs
        let (z0, z1) = (bottom - t, floor - t);
        for (min, max) in [
            ([240, 240, z0], [256, 528, z1]),
            ([512, 240, z0], [528, 528, z1]),
            ([256, 240, z0], [512, 256, z1]),
            ([256, 512, z0], [512, 528, z1]),
        ] {
            let lining = brush_at(world, min, max).expect("lining wall");
            assert_eq!(lining.texture(), room.textures.wall);
        }

        let hurts: Vec<_> = doc.entities_of("trigger_hurt").collect();
        assert_eq!(hurts.len(), 1);
        assert_eq!(hurts[0].get("dmg"), Some("30"));
        assert_eq!(hurts[0].brushes()[0].min(), [256, 256, bottom]);
    }

    #[test]
    fn test_harmful_pool_gets_matching_trigger() {
        let slime = RoomFeature::Liquid { kind: LiquidKind::Slime, damage: 5 };
        let (lvl, doc) = featured(GridRect::new(0, 0, 3, 3), slime);
        let world = doc.worldspawn().expect("worldspawn");
        let floor = lvl.rooms[0].floor_z();
        let pool = liquid_pool(&lvl.rooms[0]).expect("pool");
        let (min, max) = ([pool.min_x, pool.min_y, floor], [pool.max_x, pool.max_y, floor + LIQUID_DEPTH]);

        assert_eq!(brush_at(world, min, max).expect("pool brush").texture(), "*slime0");
        let hurts: Vec<_> = doc.entities_of("trigger_hurt").collect();
        assert_eq!(hurts.len(), 1);
        assert_eq!(hurts[0].get("dmg"), Some("5"));
        assert_eq!(hurts[0].brushes()[0].min(), min);
        assert_eq!(hurts[0].brushes()[0].max(), max);

        let water = RoomFeature::Liquid { kind: LiquidKind::Water, damage: 0 };
        let (_, doc) = featured(GridRect::new(0, 0, 3, 3), water);
        assert_eq!(doc.entities_of("trigger_hurt").count(), 0);
    }

    #[test]
    fn test_pillars_reach_ceiling() {
        let (lvl, doc) = featured(GridRect::new(0, 0, 4, 4), RoomFeature::Pillars { count: 4 });
        let world = doc.worldspawn().expect("worldspawn");
        let room = &lvl.rooms[0];

        let positions = features::pillar_positions(room, 4);
        assert_eq!(positions.len(), 4);
        for (x, y) in positions {
            let r = WorldRect::centered(x, y, PILLAR_SIZE);
            let pillar = brush_at(world, [r.min_x, r.min_y, room.floor_z()], [r.max_x, r.max_y, room.ceiling_z()]);
            assert!(pillar.is_some(), "no pillar at ({}, {})", x, y);
        }
    }

    #[test]
    fn test_platforms_rise() {
        let (lvl, doc) = featured(GridRect::new(0, 0, 4, 4), RoomFeature::Platforms { count: 3 });
        let world = doc.worldspawn().expect("worldspawn");
        let room = &lvl.rooms[0];

        let platforms = features::platforms(room, 3);
        assert_eq!(platforms.len(), 3);
        let tops: Vec<i32> = platforms
            .iter()
            .map(|p| {
                let r = p.rect;
                brush_at(world, [r.min_x, r.min_y, room.floor_z()], [r.max_x, r.max_y, p.top])
                    .expect("platform brush")
                    .max()[2]
            })
            .collect();
        assert!(tops.windows(2).all(|w| w[0] < w[1]));
        assert!(tops[0] > room.floor_z());
    }

    #[test]
    fn test_multi_light_rooms() {
        let arena = room_types::room_type("arena").expect("arena");
        let room = Room::new(0, GridRect::new(0, 0, 4, 4), arena);
        assert_eq!(light_positions(&room).len(), 5);
    }

    #[test]
    fn test_document_is_deterministic() {
        let config = GeneratorConfig { seed: Some(99), ..GeneratorConfig::default() };
        let a = build_document(&crate::generate(config.clone()).expect("a"), &config.world).to_string();
        let b = build_document(&crate::generate(config.clone()).expect("b"), &config.world).to_string();
        assert_eq!(a, b);
    }
}
