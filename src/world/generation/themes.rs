//! Room type and texture theme selection
//!
//! Room types are a weighted roll over the type table. Themes follow the
//! previous room's related list most of the time so neighbouring rooms look
//! alike, with periodic jumps to any theme.

use std::collections::BTreeMap;

use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::data::room_types::{self, ROOM_TYPES};
use crate::data::themes::{self, DEFAULT_CEILING, DEFAULT_FLOOR, DEFAULT_WALL, THEMES};
use crate::data::{RoomType, Theme};
use crate::error::{GenError, Result};
use crate::world::{Room, Surface, SurfaceTextures};

/// Chance the next theme comes from the previous theme's related list
pub const RELATED_THEME_CHANCE: f64 = 0.7;

/// Texture used if a list ever turns out empty
const FALLBACK_TEXTURE: &str = "base";

/// Weighted choice over the room type table
pub fn select_room_type(rng: &mut StdRng) -> &'static RoomType {
    let total: u32 = ROOM_TYPES.iter().map(|t| t.weight).sum();
    if total == 0 {
        return room_types::standard();
    }

    let mut roll = rng.gen_range(0..total);
    for room_type in ROOM_TYPES {
        if roll < room_type.weight {
            return room_type;
        }
        roll -= room_type.weight;
    }

    room_types::standard()
}

fn any_theme(rng: &mut StdRng) -> &'static Theme {
    &THEMES[rng.gen_range(0..THEMES.len())]
}

/// Choose the theme for the next room given the previous room's theme
pub fn choose_theme(rng: &mut StdRng, previous: Option<&'static Theme>) -> &'static Theme {
    let Some(previous) = previous else {
        return any_theme(rng);
    };

    if rng.gen_bool(RELATED_THEME_CHANCE) && !previous.related.is_empty() {
        let name = previous.related[rng.gen_range(0..previous.related.len())];
        if let Some(theme) = themes::theme(name) {
            return theme;
        }
        log::warn!("Theme {} lists unknown related theme {}", previous.name, name);
    }

    any_theme(rng)
}

/// Per-surface texture pools used when a room has no theme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TexturePools {
    floor: Vec<String>,
    wall: Vec<String>,
    ceiling: Vec<String>,
    customized: bool,
}

impl Default for TexturePools {
    fn default() -> Self {
        let owned = |list: &[&str]| -> Vec<String> { list.iter().map(|t| t.to_string()).collect() };
        Self {
            floor: owned(DEFAULT_FLOOR),
            wall: owned(DEFAULT_WALL),
            ceiling: owned(DEFAULT_CEILING),
            customized: false,
        }
    }
}

impl TexturePools {
    /// Default pools with the overrides from a configuration applied
    pub fn from_overrides(overrides: &BTreeMap<String, Vec<String>>) -> Result<Self> {
        let mut pools = Self::default();
        for (surface, textures) in overrides {
            pools.set_pool(surface, textures.clone())?;
        }
        Ok(pools)
    }

    /// Replace the pool for a surface given by name.
    ///
    /// Unknown surface names and empty lists are configuration errors.
    pub fn set_pool(&mut self, surface: &str, textures: Vec<String>) -> Result<()> {
        let surface: Surface = surface.parse()?;
        self.set(surface, textures)
    }

    pub fn set(&mut self, surface: Surface, textures: Vec<String>) -> Result<()> {
        if textures.is_empty() {
            return Err(GenError::EmptyTexturePool(surface));
        }
        match surface {
            Surface::Floor => self.floor = textures,
            Surface::Wall => self.wall = textures,
            Surface::Ceiling => self.ceiling = textures,
        }
        self.customized = true;
        Ok(())
    }

    pub fn get(&self, surface: Surface) -> &[String] {
        match surface {
            Surface::Floor => &self.floor,
            Surface::Wall => &self.wall,
            Surface::Ceiling => &self.ceiling,
        }
    }

    /// True once any pool has been replaced; custom pools take precedence over themes
    pub fn is_customized(&self) -> bool {
        self.customized
    }
}

/// Pick one texture from a list; without variety the first entry is used
/// and no randomness is consumed.
pub fn pick_texture<S: AsRef<str>>(rng: &mut StdRng, list: &[S], variety: bool) -> String {
    let chosen = if variety { list.choose(rng) } else { list.first() };
    chosen.map_or(FALLBACK_TEXTURE, |t| t.as_ref()).to_string()
}

/// Resolve floor, wall and ceiling textures for a room from its theme or
/// the default pools, then apply the room type's ceiling override.
pub fn assign_textures(rng: &mut StdRng, room: &mut Room, pools: &TexturePools, variety: bool) {
    let mut textures = match room.theme {
        Some(theme) => SurfaceTextures {
            floor: pick_texture(rng, theme.floor, variety),
            wall: pick_texture(rng, theme.wall, variety),
            ceiling: pick_texture(rng, theme.ceiling, variety),
        },
        None => SurfaceTextures {
            floor: pick_texture(rng, pools.get(Surface::Floor), variety),
            wall: pick_texture(rng, pools.get(Surface::Wall), variety),
            ceiling: pick_texture(rng, pools.get(Surface::Ceiling), variety),
        },
    };

    if let Some(ceiling) = room.room_type.ceiling_texture {
        textures.ceiling = ceiling.to_string();
    }

    room.textures = textures;
}
