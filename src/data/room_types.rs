//! Room type definitions
//!
//! Each room type is a gameplay archetype: how big it gets, how it is lit,
//! what spawns in it and which special features it may carry.

use crate::world::LiquidKind;

/// Footprint style used by the allocator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomShape {
    /// Width and height drawn independently from the size range
    Normal,
    /// One cell wide, long side drawn from the size range
    Hallway,
}

/// How densely a room is populated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnMode {
    /// Nothing spawns
    None,
    /// Items only, no monsters
    SuppliesOnly,
    /// At most one weak monster
    Minimal,
    /// Baseline monster count multiplied
    Ambush { multiplier: u32 },
    /// Many mixed monsters
    Horde,
    /// A boss monster with escorts
    Boss,
    /// Baseline monster plus a random extra
    Normal,
}

/// Feature a room type is allowed to roll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    Pit,
    Liquid(LiquidKind),
    Pillars,
    Platforms,
}

/// A room archetype
#[derive(Debug, Clone)]
pub struct RoomType {
    pub name: &'static str,
    /// Relative selection weight
    pub weight: u32,
    /// Size range in cells; `None` uses the configured default range
    pub size: Option<(usize, usize)>,
    pub shape: RoomShape,
    /// Light intensity
    pub light: u32,
    /// Optional light colour (RGB)
    pub light_color: Option<(u8, u8, u8)>,
    /// Four corner lights plus optional centre light instead of one centre light
    pub multi_light: bool,
    pub spawn: SpawnMode,
    /// Floor height relative to the base floor (sunken rooms are negative)
    pub floor_offset: i32,
    /// Ceiling height override
    pub ceiling_height: Option<i32>,
    /// Ceiling texture override, applied regardless of theme
    pub ceiling_texture: Option<&'static str>,
    pub features: &'static [FeatureKind],
    /// Chance a room of this type gets one of its features
    pub feature_chance: f64,
}

impl RoomType {
    /// Size range for this type, falling back to the configured default
    pub fn size_range(&self, default: (usize, usize)) -> (usize, usize) {
        self.size.unwrap_or(default)
    }

    pub fn is_outdoor(&self) -> bool {
        self.ceiling_texture.is_some_and(|t| t.starts_with("sky"))
    }
}

/// The room type table
pub static ROOM_TYPES: &[RoomType] = &[
    RoomType {
        name: "standard",
        weight: 30,
        size: None,
        shape: RoomShape::Normal,
        light: 300,
        light_color: None,
        multi_light: false,
        spawn: SpawnMode::Normal,
        floor_offset: 0,
        ceiling_height: None,
        ceiling_texture: None,
        features: &[FeatureKind::Pillars, FeatureKind::Platforms],
        feature_chance: 0.25,
    },
    RoomType {
        name: "hallway",
        weight: 14,
        size: Some((3, 6)),
        shape: RoomShape::Hallway,
        light: 200,
        light_color: None,
        multi_light: false,
        spawn: SpawnMode::Minimal,
        floor_offset: 0,
        ceiling_height: None,
        ceiling_texture: None,
        features: &[],
        feature_chance: 0.0,
    },
    RoomType {
        name: "arena",
        weight: 8,
        size: Some((4, 6)),
        shape: RoomShape::Normal,
        light: 350,
        light_color: None,
        multi_light: true,
        spawn: SpawnMode::Horde,
        floor_offset: 0,
        ceiling_height: Some(256),
        ceiling_texture: None,
        features: &[FeatureKind::Pillars, FeatureKind::Platforms],
        feature_chance: 0.7,
    },
    RoomType {
        name: "storage",
        weight: 10,
        size: Some((1, 3)),
        shape: RoomShape::Normal,
        light: 250,
        light_color: None,
        multi_light: false,
        spawn: SpawnMode::SuppliesOnly,
        floor_offset: 0,
        ceiling_height: None,
        ceiling_texture: None,
        features: &[],
        feature_chance: 0.0,
    },
    RoomType {
        name: "ambush",
        weight: 8,
        size: None,
        shape: RoomShape::Normal,
        light: 150,
        light_color: None,
        multi_light: false,
        spawn: SpawnMode::Ambush { multiplier: 2 },
        floor_offset: 0,
        ceiling_height: None,
        ceiling_texture: None,
        features: &[FeatureKind::Pillars],
        feature_chance: 0.5,
    },
    RoomType {
        name: "shrine",
        weight: 5,
        size: Some((2, 3)),
        shape: RoomShape::Normal,
        light: 400,
        light_color: Some((255, 210, 140)),
        multi_light: false,
        spawn: SpawnMode::None,
        floor_offset: 0,
        ceiling_height: None,
        ceiling_texture: None,
        features: &[FeatureKind::Liquid(LiquidKind::Water)],
        feature_chance: 0.5,
    },
    RoomType {
        name: "lava_pit",
        weight: 6,
        size: Some((3, 5)),
        shape: RoomShape::Normal,
        light: 250,
        light_color: Some((255, 110, 40)),
        multi_light: false,
        spawn: SpawnMode::Normal,
        floor_offset: 0,
        ceiling_height: None,
        ceiling_texture: None,
        features: &[FeatureKind::Pit, FeatureKind::Liquid(LiquidKind::Lava)],
        feature_chance: 0.9,
    },
    RoomType {
        name: "sewer",
        weight: 6,
        size: Some((2, 5)),
        shape: RoomShape::Normal,
        light: 220,
        light_color: Some((120, 255, 120)),
        multi_light: false,
        spawn: SpawnMode::Minimal,
        floor_offset: 0,
        ceiling_height: None,
        ceiling_texture: None,
        features: &[FeatureKind::Liquid(LiquidKind::Slime)],
        feature_chance: 0.8,
    },
    RoomType {
        name: "courtyard",
        weight: 4,
        size: Some((3, 7)),
        shape: RoomShape::Normal,
        light: 300,
        light_color: None,
        multi_light: true,
        spawn: SpawnMode::Normal,
        floor_offset: 0,
        ceiling_height: Some(320),
        ceiling_texture: Some("sky1"),
        features: &[FeatureKind::Pillars],
        feature_chance: 0.4,
    },
    RoomType {
        name: "crypt",
        weight: 6,
        size: None,
        shape: RoomShape::Normal,
        light: 180,
        light_color: Some((180, 180, 255)),
        multi_light: false,
        spawn: SpawnMode::Normal,
        floor_offset: -16,
        ceiling_height: None,
        ceiling_texture: None,
        features: &[FeatureKind::Pit],
        feature_chance: 0.3,
    },
    RoomType {
        name: "lair",
        weight: 2,
        size: Some((4, 6)),
        shape: RoomShape::Normal,
        light: 200,
        light_color: Some((255, 60, 60)),
        multi_light: true,
        spawn: SpawnMode::Boss,
        floor_offset: 0,
        ceiling_height: Some(256),
        ceiling_texture: None,
        features: &[FeatureKind::Pillars],
        feature_chance: 0.5,
    },
];

/// Find a room type by name
pub fn room_type(name: &str) -> Option<&'static RoomType> {
    ROOM_TYPES.iter().find(|t| t.name == name)
}

/// The plain type used for hand-placed rooms and fallbacks
pub fn standard() -> &'static RoomType {
    &ROOM_TYPES[0]
}
