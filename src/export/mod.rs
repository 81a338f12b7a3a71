//! Map export
//!
//! Turns a generated level into Quake `.map` text: box brushes, entities,
//! and the document that holds them.

pub mod brush;
pub mod emitter;
pub mod entity;
pub mod writer;

use std::path::Path;

pub use brush::{Brush, Face};
pub use emitter::build_document;
pub use entity::Entity;
pub use writer::{write_map_file, MapDocument};

use crate::data::WorldSettings;
use crate::error::Result;
use crate::world::generation::Level;

/// Render a level as `.map` text
pub fn render_map(level: &Level, world: &WorldSettings) -> String {
    build_document(level, world).to_string()
}

/// Render a level and write it to `path`
pub fn export_level(level: &Level, world: &WorldSettings, path: &Path) -> Result<()> {
    let document = build_document(level, world);
    log::debug!(
        "Writing {} entities and {} brushes",
        document.entities.len(),
        document.brush_count()
    );
    write_map_file(path, &document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{room_types, GeneratorConfig};
    use crate::world::GridRect;
    use crate::Session;

    /// Every brush line: three point triples, a texture and `0 0 0 1 1`
    fn check_face_line(line: &str) {
        assert_eq!(line.matches('(').count(), 3, "{}", line);
        assert_eq!(line.matches(')').count(), 3, "{}", line);
        for triple in line.split(')').take(3) {
            let coords: Vec<&str> = triple.trim().trim_start_matches('(').split_whitespace().collect();
            assert_eq!(coords.len(), 3, "{}", line);
            assert!(coords.iter().all(|c| c.parse::<i32>().is_ok()), "{}", line);
        }
        let tail: Vec<&str> = line.rsplit(')').next().unwrap_or_default().split_whitespace().collect();
        assert_eq!(tail.len(), 6, "{}", line);
        assert_eq!(&tail[1..], ["0", "0", "0", "1", "1"]);
    }

    #[test]
    fn test_lone_room_renders_well_formed_map() {
        let config = GeneratorConfig { grid_size: 3, seed: Some(11), ..GeneratorConfig::default() };
        let mut session = Session::new(config).expect("session");
        assert_eq!(session.add_room(GridRect::new(1, 1, 1, 1), room_types::standard()), Some(0));
        let level = session.finish();

        assert_eq!(level.rooms.len(), 1);
        assert!(level.doors.is_empty());
        assert!(level.teleporters.is_empty());

        let text = render_map(&level, &WorldSettings::default());
        assert_eq!(text.matches('{').count(), text.matches('}').count());
        assert_eq!(text.matches("\"classname\" \"worldspawn\"").count(), 1);
        assert_eq!(text.matches("\"classname\" \"info_player_start\"").count(), 1);
        assert!(text.starts_with("// Game: Quake\n"));
        assert!(text.contains("// entity 0\n{\n\"classname\" \"worldspawn\""));
        assert!(text.contains("// hull\n"));

        // Brace depth: entities open at 1, brushes at 2 with exactly six faces each
        let mut depth = 0;
        let mut faces = 0;
        let mut brushes = 0;
        for line in text.lines() {
            match line {
                "{" => {
                    depth += 1;
                    faces = 0;
                }
                "}" => {
                    if depth == 2 {
                        assert_eq!(faces, 6);
                        brushes += 1;
                    }
                    depth -= 1;
                }
                _ if line.starts_with('(') => {
                    assert_eq!(depth, 2);
                    check_face_line(line);
                    faces += 1;
                }
                _ => {}
            }
        }
        assert_eq!(depth, 0);
        // Hull, one floor, one ceiling and four walls
        assert_eq!(brushes, 6 + 1 + 1 + 4);
    }
}
