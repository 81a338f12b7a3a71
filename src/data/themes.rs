//! Texture themes and default texture pools
//!
//! Themes bundle per-surface texture candidates. Each theme lists related
//! themes so consecutive rooms drift between visually compatible sets.

/// A named bundle of texture candidates
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub floor: &'static [&'static str],
    pub wall: &'static [&'static str],
    pub ceiling: &'static [&'static str],
    /// Themes preferred for the next room (directed, not necessarily mutual)
    pub related: &'static [&'static str],
}

pub static THEMES: &[Theme] = &[
    Theme {
        name: "medieval",
        floor: &["ground1_6", "cop1_1", "floor01_5"],
        wall: &["stone1_3", "wall5_4", "city4_7"],
        ceiling: &["ceiling4", "ceil1_1"],
        related: &["stone", "wizard"],
    },
    Theme {
        name: "stone",
        floor: &["rock4_1", "ground1_6"],
        wall: &["rock3_2", "rock5_2", "bricka2_1"],
        ceiling: &["ceiling5", "rock3_8"],
        related: &["medieval", "swamp"],
    },
    Theme {
        name: "wizard",
        floor: &["wizmet1_2", "wiz1_4"],
        wall: &["wizard1_2", "wizwood1_2", "wbrick1_5"],
        ceiling: &["wizmet1_1", "wceiling4"],
        related: &["medieval"],
    },
    Theme {
        name: "metal",
        floor: &["metal5_1", "metal4_8"],
        wall: &["metal1_2", "metal2_1", "metal5_2"],
        ceiling: &["metal4_2", "metal5_8"],
        related: &["tech", "base"],
    },
    Theme {
        name: "tech",
        floor: &["floor01_5", "tech08_1"],
        wall: &["tech01_1", "tech03_1", "tech06_1", "tech09_3"],
        ceiling: &["tech02_1", "ceiling1_3"],
        related: &["base", "metal"],
    },
    Theme {
        name: "base",
        floor: &["floor01_5", "mmetal1_2"],
        wall: &["tech06_1", "comp1_1", "twall1_4"],
        ceiling: &["ceiling1_3", "tech02_1"],
        related: &["tech"],
    },
    Theme {
        name: "swamp",
        floor: &["wswamp1_4", "ground1_6"],
        wall: &["wswamp2_1", "wswamp1_2"],
        ceiling: &["wswamp1_4"],
        related: &[],
    },
];

/// Floor pool used when no theme resolves
pub const DEFAULT_FLOOR: &[&str] = &["ground1_6", "floor01_5", "metal5_1", "rock4_1"];
/// Wall pool used when no theme resolves
pub const DEFAULT_WALL: &[&str] = &["city4_7", "stone1_3", "tech01_1", "rock3_2"];
/// Ceiling pool used when no theme resolves
pub const DEFAULT_CEILING: &[&str] = &["ceiling1_3", "ceiling4", "metal4_2"];

/// Sliding door textures
pub const DOOR_TEXTURES: &[&str] = &["door01_2", "door02_7", "door03_3", "dr01_1"];

pub const TELEPORT_TEXTURE: &str = "*teleport";
pub const GOAL_TEXTURE: &str = "tlight11";
/// Textures used for the sealing hull around the whole level
pub const HULL_WALL_TEXTURE: &str = "city4_7";
pub const HULL_FLOOR_TEXTURE: &str = "ground1_6";
pub const HULL_CEILING_TEXTURE: &str = "ceiling1_3";
/// Texture for trigger volumes (never rendered)
pub const TRIGGER_TEXTURE: &str = "trigger";

/// Find a theme by name
pub fn theme(name: &str) -> Option<&'static Theme> {
    THEMES.iter().find(|t| t.name == name)
}
