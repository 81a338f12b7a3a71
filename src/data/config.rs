//! Generator configuration
//!
//! Loaded from a RON file, with hardcoded defaults when no file exists.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::Difficulty;
use crate::error::{GenError, Result};

/// Default configuration file name looked up by the binary
pub const CONFIG_FILE: &str = "qmapgen.ron";

/// Tolerances used when cutting doors between rooms (all in grid cells)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorPlanning {
    /// Inset from each end of a shared boundary before a door may sit there
    pub corner_buffer: f64,
    /// Shortest buffered boundary that still receives a door
    pub min_door_width: f64,
    /// Distance within which a door counts as sitting on a lattice point
    pub corner_tolerance: f64,
}

impl Default for DoorPlanning {
    fn default() -> Self {
        Self {
            corner_buffer: 0.75,
            min_door_width: 0.5,
            corner_tolerance: 0.1,
        }
    }
}

/// Keys written into the world entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    /// Level title shown on load
    pub message: String,
    /// Texture WAD search path
    pub wad: String,
    /// 0 = medieval, 1 = metal, 2 = base (selects key sounds and models)
    pub worldtype: u8,
    /// Map loaded by the exit trigger
    pub next_map: String,
    /// Minimum light level for the light compiler
    pub minlight: Option<u32>,
    /// Fog as "density r g b"
    pub fog: Option<String>,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            message: "Procedural Dungeon".to_string(),
            wad: "gfx/base.wad".to_string(),
            worldtype: 0,
            next_map: "start".to_string(),
            minlight: Some(8),
            fog: None,
        }
    }
}

/// Everything a generation run depends on besides the random stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Seed for the random stream; drawn from entropy when absent
    pub seed: Option<u64>,
    /// Grid is `grid_size × grid_size` cells
    pub grid_size: usize,
    /// Default room size range in cells
    pub room_min: usize,
    pub room_max: usize,
    /// Number of room placements attempted
    pub num_rooms: usize,
    /// Candidate positions tried per room before skipping it
    pub placement_attempts: u32,
    /// Draw random textures from each list; otherwise always take the first
    pub texture_variety: bool,
    /// Theme rooms; when off textures come from the default pools
    pub themed: bool,
    pub difficulty: Difficulty,
    pub door: DoorPlanning,
    /// Per-surface pool overrides ("floor", "wall", "ceiling")
    pub texture_pools: BTreeMap<String, Vec<String>>,
    pub world: WorldSettings,
    /// Where the binary writes the map
    pub output: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            grid_size: 10,
            room_min: 2,
            room_max: 5,
            num_rooms: 8,
            placement_attempts: 50,
            texture_variety: true,
            themed: true,
            difficulty: Difficulty::Normal,
            door: DoorPlanning::default(),
            texture_pools: BTreeMap::new(),
            world: WorldSettings::default(),
            output: PathBuf::from("random_dungeon.map"),
        }
    }
}

impl GeneratorConfig {
    /// Parse a configuration from RON text
    pub fn from_ron(content: &str) -> Result<Self> {
        let config: GeneratorConfig = ron::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_ron(&content)
    }

    /// Load a configuration file, using defaults when it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match fs::metadata(path) {
            Ok(_) => {
                log::info!("Loading configuration from {}", path.display());
                Self::load(path)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No {} found, using default configuration", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Write the default configuration as pretty RON for editing
    pub fn export_default(path: &Path) -> Result<()> {
        let content = ron::ser::to_string_pretty(&Self::default(), ron::ser::PrettyConfig::default())?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Reject settings no layout can be generated from
    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 {
            return Err(GenError::InvalidConfig("grid_size must be at least 1".to_string()));
        }
        if self.room_min == 0 {
            return Err(GenError::InvalidConfig("room_min must be at least 1".to_string()));
        }
        if self.room_min > self.room_max {
            return Err(GenError::InvalidConfig(format!(
                "room_min ({}) exceeds room_max ({})",
                self.room_min, self.room_max
            )));
        }
        let tolerances = [
            ("corner_buffer", self.door.corner_buffer),
            ("min_door_width", self.door.min_door_width),
            ("corner_tolerance", self.door.corner_tolerance),
        ];
        for (name, value) in tolerances {
            if !value.is_finite() || value < 0.0 {
                return Err(GenError::InvalidConfig(format!(
                    "door.{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GeneratorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.grid_size, 10);
        assert_eq!(config.placement_attempts, 50);
        assert_eq!(config.door.corner_buffer, 0.75);
    }

    #[test]
    fn test_partial_ron_fills_defaults() {
        let config = GeneratorConfig::from_ron("(grid_size: 3, num_rooms: 1, seed: Some(7))")
            .expect("valid config");
        assert_eq!(config.grid_size, 3);
        assert_eq!(config.num_rooms, 1);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.room_max, 5);
        assert_eq!(config.world.next_map, "start");
    }

    #[test]
    fn test_invalid_bounds_rejected() {
        let err = GeneratorConfig::from_ron("(room_min: 4, room_max: 2)").unwrap_err();
        assert!(matches!(err, GenError::InvalidConfig(_)));

        let err = GeneratorConfig::from_ron("(grid_size: 0)").unwrap_err();
        assert!(matches!(err, GenError::InvalidConfig(_)));

        let err = GeneratorConfig::from_ron("(door: (corner_buffer: -1.0))").unwrap_err();
        assert!(matches!(err, GenError::InvalidConfig(_)));
    }

    #[test]
    fn test_malformed_ron_is_parse_error() {
        let err = GeneratorConfig::from_ron("(grid_size: \"ten\")").unwrap_err();
        assert!(matches!(err, GenError::ConfigParse(_)));
    }

    #[test]
    fn test_export_then_load() {
        let path = std::env::temp_dir().join(format!("qmapgen-config-{}.ron", std::process::id()));
        GeneratorConfig::export_default(&path).expect("export");
        let loaded = GeneratorConfig::load(&path).expect("load");
        assert_eq!(loaded, GeneratorConfig::default());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = Path::new("definitely/not/here/qmapgen.ron");
        let config = GeneratorConfig::load_or_default(path).expect("defaults");
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn test_unreachable_file_is_an_error() {
        // A regular file used as a directory fails with something other than NotFound
        let file = std::env::temp_dir().join(format!("qmapgen-notdir-{}", std::process::id()));
        fs::write(&file, "").expect("create file");
        let result = GeneratorConfig::load_or_default(&file.join("qmapgen.ron"));
        assert!(matches!(result, Err(GenError::Io(_))));
        let _ = fs::remove_file(&file);
    }
}
