//! Generation session
//!
//! Owns the RNG and every intermediate product of a run. Stages must run in
//! order; [`Session::generate`] does that in one call.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::data::{GeneratorConfig, RoomType, Theme};
use crate::error::Result;
use crate::world::generation::{
    connectivity, doors, population, rooms, themes, GenerationStats, Level, Spawn, TexturePools,
};
use crate::world::{Door, Grid, GridRect, Room, TeleporterPair};

/// One level's worth of generation state
pub struct Session {
    config: GeneratorConfig,
    /// Seed actually used, recorded even when drawn from entropy
    seed: u64,
    rng: StdRng,
    pools: TexturePools,
    grid: Grid,
    rooms: Vec<Room>,
    doors: Vec<Door>,
    teleporters: Vec<TeleporterPair>,
    /// Theme of the most recently themed room
    last_theme: Option<&'static Theme>,
    goal: Option<usize>,
    spawns: Vec<Spawn>,
    stats: GenerationStats,
}

impl Session {
    /// Validate the configuration and seed the RNG
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        let pools = TexturePools::from_overrides(&config.texture_pools)?;

        let seed = match config.seed {
            Some(s) => s,
            None => StdRng::from_entropy().gen(),
        };
        log::debug!("Session seeded with {}", seed);

        Ok(Self {
            grid: Grid::new(config.grid_size),
            rng: StdRng::seed_from_u64(seed),
            seed,
            pools,
            rooms: Vec::new(),
            doors: Vec::new(),
            teleporters: Vec::new(),
            last_theme: None,
            goal: None,
            spawns: Vec::new(),
            stats: GenerationStats::default(),
            config,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    pub fn teleporters(&self) -> &[TeleporterPair] {
        &self.teleporters
    }

    pub fn stats(&self) -> &GenerationStats {
        &self.stats
    }

    /// Replace the texture pool for a surface. Custom pools replace theming.
    pub fn set_texture_pool(&mut self, surface: &str, textures: Vec<String>) -> Result<()> {
        self.pools.set_pool(surface, textures)
    }

    /// Place a room at a fixed position; returns its index
    pub fn add_room(&mut self, rect: GridRect, room_type: &'static RoomType) -> Option<usize> {
        let index = self.rooms.len();
        let room = rooms::place_room_at(&mut self.grid, rect, room_type, index)?;
        self.rooms.push(room);
        self.stats.rooms_placed += 1;
        Some(index)
    }

    /// Roll room types and place up to `num_rooms` rooms
    pub fn place_rooms(&mut self) {
        let range = (self.config.room_min, self.config.room_max);
        self.stats.rooms_requested += self.config.num_rooms;

        for _ in 0..self.config.num_rooms {
            let room_type = themes::select_room_type(&mut self.rng);
            let index = self.rooms.len();
            match rooms::place_room(
                &mut self.rng,
                &mut self.grid,
                room_type,
                range,
                self.config.placement_attempts,
                index,
            ) {
                Some(room) => {
                    log::debug!("Room {} ({}) at {:?}", index, room_type.name, room.rect);
                    self.rooms.push(room);
                    self.stats.rooms_placed += 1;
                }
                None => {
                    log::debug!("No space for a {} room", room_type.name);
                    self.stats.placements_skipped += 1;
                }
            }
        }

        if self.rooms.is_empty() {
            log::warn!("No rooms could be placed on a {0}x{0} grid", self.config.grid_size);
        }
        log::info!("Placed {} of {} rooms", self.stats.rooms_placed, self.stats.rooms_requested);
        log::debug!("Layout:\n{}", self.grid);
    }

    /// Pick a theme and textures for every room
    pub fn apply_themes(&mut self) {
        let themed = self.config.themed && !self.pools.is_customized();

        for room in &mut self.rooms {
            room.theme = if themed {
                let theme = themes::choose_theme(&mut self.rng, self.last_theme);
                self.last_theme = Some(theme);
                Some(theme)
            } else {
                None
            };
            themes::assign_textures(&mut self.rng, room, &self.pools, self.config.texture_variety);
        }
    }

    pub fn plan_doors(&mut self) {
        let plan = doors::plan_doors(
            &mut self.rng,
            &self.grid,
            &self.rooms,
            &self.config.door,
            self.config.texture_variety,
        );
        self.stats.doors = plan.doors.len();
        self.stats.doors_skipped = plan.skipped;
        self.doors = plan.doors;
        log::info!("Planned {} doors ({} skipped)", self.stats.doors, self.stats.doors_skipped);
    }

    /// Link stranded components back to the spawn room and pick the goal
    pub fn ensure_connectivity(&mut self) {
        let adjacency = connectivity::adjacency_list(self.rooms.len(), &self.doors, &[]);
        self.stats.components = connectivity::connected_components(&adjacency).len();

        self.teleporters = connectivity::ensure_connectivity(&mut self.rng, &self.rooms, &self.doors);
        self.stats.teleporter_pairs = self.teleporters.len();
        self.goal = connectivity::farthest_room(self.rooms.len(), &self.doors, &self.teleporters);

        if !self.teleporters.is_empty() {
            log::info!(
                "Linked {} components with {} teleporter pairs",
                self.stats.components,
                self.teleporters.len()
            );
        }
    }

    pub fn populate(&mut self) {
        let result = population::populate(
            &mut self.rng,
            &mut self.rooms,
            &self.teleporters,
            self.goal,
            self.config.difficulty,
        );
        self.stats.features = result.features;
        self.stats.features_dropped = result.features_dropped;
        self.stats.monsters = result.spawns.iter().filter(|s| s.is_monster()).count();
        self.stats.items = result.spawns.len() - self.stats.monsters;
        self.spawns = result.spawns;
        log::info!(
            "Spawned {} monsters and {} items ({})",
            self.stats.monsters,
            self.stats.items,
            self.config.difficulty.name()
        );
    }

    /// Run every stage after placement on rooms already added
    pub fn finish(mut self) -> Level {
        self.apply_themes();
        self.plan_doors();
        self.ensure_connectivity();
        self.populate();
        self.into_level()
    }

    /// Run the whole pipeline
    pub fn generate(mut self) -> Level {
        self.place_rooms();
        self.finish()
    }

    pub fn into_level(self) -> Level {
        Level {
            seed: self.seed,
            grid: self.grid,
            rooms: self.rooms,
            doors: self.doors,
            teleporters: self.teleporters,
            goal: self.goal,
            spawns: self.spawns,
            stats: self.stats,
        }
    }
}

/// Generate a level from a configuration
pub fn generate(config: GeneratorConfig) -> Result<Level> {
    Ok(Session::new(config)?.generate())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::room_types;
    use crate::error::GenError;

    fn seeded(seed: u64) -> GeneratorConfig {
        GeneratorConfig { seed: Some(seed), ..GeneratorConfig::default() }
    }

    #[test]
    fn test_same_seed_same_level() {
        let a = generate(seeded(42)).expect("level");
        let b = generate(seeded(42)).expect("level");
        assert_eq!(a.grid.to_string(), b.grid.to_string());
        assert_eq!(a.doors, b.doors);
        assert_eq!(a.teleporters, b.teleporters);
        assert_eq!(a.spawns, b.spawns);
        assert_eq!(a.stats, b.stats);
    }

    #[test]
    fn test_unseeded_records_seed() {
        let config = GeneratorConfig { seed: None, ..GeneratorConfig::default() };
        let session = Session::new(config).expect("session");
        let seed = session.seed();
        let level = session.generate();
        assert_eq!(level.seed, seed);

        let replay = generate(seeded(seed)).expect("level");
        assert_eq!(replay.grid.to_string(), level.grid.to_string());
    }

    #[test]
    fn test_single_room_level() {
        let config = GeneratorConfig { grid_size: 3, ..seeded(1) };
        let mut session = Session::new(config).expect("session");
        assert_eq!(session.add_room(GridRect::new(0, 0, 3, 3), room_types::standard()), Some(0));
        let level = session.finish();

        assert!(level.doors.is_empty());
        assert!(level.teleporters.is_empty());
        assert_eq!(level.goal, None);
        assert!(level.is_connected());
        assert_eq!(level.player_start(), Some((384, 384, 24)));
    }

    #[test]
    fn test_two_distant_rooms_linked_by_teleporter() {
        let mut session = Session::new(seeded(2)).expect("session");
        session.add_room(GridRect::new(0, 0, 2, 2), room_types::standard());
        session.add_room(GridRect::new(7, 7, 2, 2), room_types::standard());
        let level = session.finish();

        assert!(level.doors.is_empty());
        assert_eq!(level.teleporters.len(), 1);
        assert_eq!(level.stats.components, 2);
        assert_eq!(level.goal, Some(1));
        assert!(level.is_connected());
    }

    #[test]
    fn test_three_room_corner_repaired_by_teleporters() {
        // Three single cells meeting at lattice point (1, 1)
        let config = GeneratorConfig { grid_size: 3, ..seeded(4) };
        let mut session = Session::new(config).expect("session");
        for rect in [GridRect::new(0, 0, 1, 1), GridRect::new(1, 0, 1, 1), GridRect::new(0, 1, 1, 1)] {
            session.add_room(rect, room_types::standard());
        }
        let level = session.finish();

        assert!(level.doors.is_empty());
        assert_eq!(level.stats.doors_skipped, 2);
        assert_eq!(level.stats.components, 3);
        assert_eq!(level.teleporters.len(), 2);
        assert!(level.is_connected());
    }

    #[test]
    fn test_custom_pool_disables_themes() {
        let mut session = Session::new(seeded(3)).expect("session");
        session
            .set_texture_pool("wall", vec!["wizmet1_2".to_string()])
            .expect("pool");
        assert!(matches!(
            session.set_texture_pool("sky", vec!["sky1".to_string()]),
            Err(GenError::UnknownSurface(_))
        ));
        let level = session.generate();
        assert!(level.rooms.iter().all(|r| r.theme.is_none()));
        assert!(level.rooms.iter().all(|r| r.textures.wall == "wizmet1_2"));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GeneratorConfig { room_min: 6, room_max: 2, ..GeneratorConfig::default() };
        assert!(matches!(Session::new(config), Err(GenError::InvalidConfig(_))));
    }

    #[test]
    fn test_tiny_grid_yields_empty_level() {
        let config = GeneratorConfig { grid_size: 1, room_min: 2, room_max: 3, ..seeded(5) };
        let level = generate(config).expect("level");
        assert!(level.rooms.is_empty());
        assert_eq!(level.stats.placements_skipped, level.stats.rooms_requested);
        assert_eq!(level.player_start(), None);
    }
}
