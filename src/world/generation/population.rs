//! Room population
//!
//! Gives rooms their special features and fills them with monsters and
//! supplies according to each room type's spawn mode. The spawn room gets a
//! fixed starting kit instead.

use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::data::{Difficulty, FeatureKind, SpawnMode};
use crate::world::features::{self, pillar_count_for};
use crate::world::units::{
    WorldRect, CELL_SIZE, ENTITY_CLEARANCE, GOAL_PAD_SIZE, PAD_SIZE, SPAWN_HEIGHT,
    WALL_THICKNESS,
};
use crate::world::{Room, RoomFeature, TeleporterPair};

/// Melee monsters
pub const MELEE: &[&str] = &["monster_knight", "monster_dog", "monster_demon1"];
/// Ranged monsters
pub const RANGED: &[&str] = &["monster_army", "monster_ogre", "monster_enforcer"];
pub const SUPPLIES: &[&str] = &["item_health", "item_shells", "item_spikes", "item_armor1"];
pub const BOSS: &str = "monster_shambler";
pub const BOSS_REWARD: &str = "item_armor2";

/// Items placed around the player start, offset from the room centre
pub const STARTING_KIT: &[(&str, (i32, i32))] = &[
    ("item_health", (-64, 0)),
    ("item_shells", (64, 0)),
    ("weapon_supershotgun", (0, 64)),
];

/// Facing angles monsters are given
const FACINGS: [i32; 4] = [0, 90, 180, 270];

/// Distance from the wall centre line to a walkway spawn spot
const WALKWAY_SPOT: i32 = WALL_THICKNESS / 2 + 32;

/// A point entity placed in a room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spawn {
    pub room: usize,
    pub classname: &'static str,
    pub origin: (i32, i32, i32),
    pub angle: Option<i32>,
}

impl Spawn {
    pub fn is_monster(&self) -> bool {
        self.classname.starts_with("monster_")
    }
}

/// Where the player starts in the spawn room
pub fn player_start(room: &Room) -> (i32, i32, i32) {
    let (x, y) = room.center();
    (x, y, room.floor_z() + SPAWN_HEIGHT)
}

/// The spawn room's fixed starting items
pub fn starting_kit(room: &Room) -> Vec<Spawn> {
    let (cx, cy) = room.center();
    STARTING_KIT
        .iter()
        .map(|&(classname, (dx, dy))| Spawn {
            room: room.index,
            classname,
            origin: (cx + dx, cy + dy, room.floor_z() + SPAWN_HEIGHT),
            angle: None,
        })
        .collect()
}

/// Roll a feature for a room; draws nothing when the type has no features
pub fn choose_feature(rng: &mut StdRng, room: &Room) -> RoomFeature {
    let kinds = room.room_type.features;
    if kinds.is_empty() || !rng.gen_bool(room.room_type.feature_chance.clamp(0.0, 1.0)) {
        return RoomFeature::None;
    }

    match kinds[rng.gen_range(0..kinds.len())] {
        FeatureKind::Pit => RoomFeature::Pit { ratio: rng.gen_range(0.34f32..=0.6) },
        FeatureKind::Liquid(kind) => RoomFeature::Liquid { kind, damage: kind.damage() },
        FeatureKind::Pillars => RoomFeature::Pillars { count: pillar_count_for(&room.rect) },
        FeatureKind::Platforms => RoomFeature::Platforms { count: rng.gen_range(1..=3) },
    }
}

/// Areas in a room spawns must keep clear of
pub fn reserved_areas(
    room: &Room,
    teleporters: &[TeleporterPair],
    goal: Option<usize>,
) -> Vec<WorldRect> {
    let mut reserved = features::footprints(room);

    if room.index == 0 {
        let (x, y, _) = player_start(room);
        reserved.push(WorldRect::centered(x, y, 2 * ENTITY_CLEARANCE));
        for item in starting_kit(room) {
            reserved.push(WorldRect::centered(item.origin.0, item.origin.1, 2 * ENTITY_CLEARANCE));
        }
    }

    if goal == Some(room.index) {
        let (x, y) = room.center();
        reserved.push(WorldRect::centered(x, y, GOAL_PAD_SIZE));
    }

    for end in teleporters.iter().flat_map(|t| [&t.a, &t.b]) {
        if end.room == room.index {
            reserved.push(WorldRect::centered(end.pad.0, end.pad.1, PAD_SIZE));
            reserved.push(WorldRect::centered(
                end.destination.0,
                end.destination.1,
                2 * ENTITY_CLEARANCE,
            ));
        }
    }

    reserved
}

/// Candidate spawn spots: every cell centre plus the middle of each wall's
/// walkway, minus any spot whose clearance box touches a reserved area.
pub fn spawn_spots(room: &Room, reserved: &[WorldRect]) -> Vec<(i32, i32)> {
    let b = room.bounds();
    let (cx, cy) = b.center();
    let half = CELL_SIZE / 2;

    let cells = room
        .rect
        .cells()
        .map(|(x, y)| (x as i32 * CELL_SIZE + half, y as i32 * CELL_SIZE + half));
    let walkway = [
        (cx, b.min_y + WALKWAY_SPOT),
        (cx, b.max_y - WALKWAY_SPOT),
        (b.min_x + WALKWAY_SPOT, cy),
        (b.max_x - WALKWAY_SPOT, cy),
    ];

    cells
        .chain(walkway)
        .filter(|&(x, y)| {
            let clearance = WorldRect::centered(x, y, 2 * ENTITY_CLEARANCE);
            !reserved.iter().any(|r| r.intersects(&clearance))
        })
        .collect()
}

fn pick(rng: &mut StdRng, pool: &[&'static str]) -> &'static str {
    pool[rng.gen_range(0..pool.len())]
}

/// Melee or ranged, evenly
fn any_monster(rng: &mut StdRng) -> &'static str {
    if rng.gen_bool(0.5) {
        pick(rng, MELEE)
    } else {
        pick(rng, RANGED)
    }
}

/// Monsters and items for a room's spawn mode, before placement
pub fn roll_spawns(
    rng: &mut StdRng,
    mode: SpawnMode,
    difficulty: Difficulty,
) -> (Vec<&'static str>, Vec<&'static str>) {
    let mut monsters = Vec::new();
    let mut items = Vec::new();

    match mode {
        SpawnMode::None => {}
        SpawnMode::SuppliesOnly => {
            let n = rng.gen_range(2..=4);
            items.extend((0..n).map(|_| pick(rng, SUPPLIES)));
        }
        SpawnMode::Minimal => {
            let n = difficulty.scale_monsters(rng.gen_range(0..=1));
            monsters.extend((0..n).map(|_| pick(rng, MELEE)));
        }
        SpawnMode::Ambush { multiplier } => {
            let base: usize = rng.gen_range(1..=2);
            let n = difficulty.scale_monsters(base * multiplier as usize);
            monsters.extend((0..n).map(|_| any_monster(rng)));
        }
        SpawnMode::Horde => {
            let n = difficulty.scale_monsters(rng.gen_range(4..=7));
            monsters.extend((0..n).map(|_| any_monster(rng)));
        }
        SpawnMode::Boss => {
            monsters.push(BOSS);
            let escorts = difficulty.scale_monsters(rng.gen_range(1..=2));
            monsters.extend((0..escorts).map(|_| pick(rng, RANGED)));
            items.push(BOSS_REWARD);
        }
        SpawnMode::Normal => {
            let n = difficulty.scale_monsters(1 + rng.gen_range(0..=2));
            monsters.extend((0..n).map(|_| any_monster(rng)));
            let extra = rng.gen_range(0..=1);
            items.extend((0..extra).map(|_| pick(rng, SUPPLIES)));
        }
    }

    (monsters, items)
}

/// Roll and place a room's spawns on distinct free spots.
///
/// Monsters are placed before items; whatever does not fit is dropped.
pub fn populate_room(
    rng: &mut StdRng,
    room: &Room,
    reserved: &[WorldRect],
    difficulty: Difficulty,
) -> Vec<Spawn> {
    let (monsters, items) = roll_spawns(rng, room.room_type.spawn, difficulty);
    if monsters.is_empty() && items.is_empty() {
        return Vec::new();
    }

    let mut spots = spawn_spots(room, reserved);
    spots.shuffle(rng);

    let z = room.floor_z() + SPAWN_HEIGHT;
    let wanted = monsters.len() + items.len();
    let mut spawns = Vec::with_capacity(wanted);
    let mut spots = spots.into_iter();

    for classname in monsters {
        let Some((x, y)) = spots.next() else { break };
        let angle = FACINGS[rng.gen_range(0..FACINGS.len())];
        spawns.push(Spawn { room: room.index, classname, origin: (x, y, z), angle: Some(angle) });
    }
    for classname in items {
        let Some((x, y)) = spots.next() else { break };
        spawns.push(Spawn { room: room.index, classname, origin: (x, y, z), angle: None });
    }

    if spawns.len() < wanted {
        log::debug!(
            "Room {} fits {} of {} spawns",
            room.index,
            spawns.len(),
            wanted
        );
    }
    spawns
}

/// Outcome of the population pass
#[derive(Debug, Default)]
pub struct Population {
    pub spawns: Vec<Spawn>,
    pub features: usize,
    /// Features rolled but too small for their room
    pub features_dropped: usize,
}

/// Assign features then spawns, room by room.
///
/// The spawn room, the goal room and teleporter rooms keep a plain floor.
pub fn populate(
    rng: &mut StdRng,
    rooms: &mut [Room],
    teleporters: &[TeleporterPair],
    goal: Option<usize>,
    difficulty: Difficulty,
) -> Population {
    let mut population = Population::default();

    for room in rooms.iter_mut() {
        let index = room.index;
        let linked = teleporters.iter().any(|t| t.a.room == index || t.b.room == index);
        let eligible = index != 0 && goal != Some(index) && !linked;

        if eligible {
            let feature = choose_feature(rng, room);
            if features::is_degenerate(room, feature) {
                log::debug!("Room {} too small for {:?}", index, feature);
                population.features_dropped += 1;
            } else {
                if feature != RoomFeature::None {
                    population.features += 1;
                }
                room.feature = feature;
            }
        }

        if index == 0 {
            population.spawns.extend(starting_kit(room));
            continue;
        }

        let reserved = reserved_areas(room, teleporters, goal);
        population.spawns.extend(populate_room(rng, room, &reserved, difficulty));
    }

    population
}
