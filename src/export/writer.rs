//! Map file text
//!
//! Renders a document to the standard `.map` text layout and writes it out
//! so a partial file is never left at the destination.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use super::entity::Entity;
use crate::error::Result;

/// Header comments plus entities, worldspawn first
#[derive(Debug, Clone, Default)]
pub struct MapDocument {
    pub header: Vec<String>,
    pub entities: Vec<Entity>,
}

impl MapDocument {
    pub fn worldspawn(&self) -> Option<&Entity> {
        self.entities.first()
    }

    /// Entities with the given classname
    pub fn entities_of<'a>(&'a self, classname: &'a str) -> impl Iterator<Item = &'a Entity> + 'a {
        self.entities.iter().filter(move |e| e.classname() == classname)
    }

    pub fn brush_count(&self) -> usize {
        self.entities.iter().map(|e| e.brushes().len()).sum()
    }
}

impl fmt::Display for MapDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.header {
            writeln!(f, "// {}", line)?;
        }
        for (i, entity) in self.entities.iter().enumerate() {
            writeln!(f, "// entity {}", i)?;
            write!(f, "{}", entity)?;
        }
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write the document to `path` via a sibling temp file and a rename
pub fn write_map_file(path: &Path, document: &MapDocument) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp = temp_path(path);
    fs::write(&tmp, document.to_string())?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }

    log::info!("Map written to {}", path.display());
    Ok(())
}
