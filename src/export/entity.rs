//! Map entities
//!
//! An entity is an ordered list of key/value pairs plus, for brush
//! entities, the solids it owns.

use std::fmt;

use super::brush::Brush;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entity {
    properties: Vec<(String, String)>,
    brushes: Vec<Brush>,
    /// Comment lines written before the brush at the given index
    sections: Vec<(usize, String)>,
}

/// Values are written inside double quotes, which they cannot contain
fn sanitize(value: &str) -> String {
    value.replace('"', "'")
}

/// Format a point the way origins are written
pub fn origin((x, y, z): (i32, i32, i32)) -> String {
    format!("{} {} {}", x, y, z)
}

impl Entity {
    pub fn new(classname: &str) -> Self {
        let mut entity = Self::default();
        entity.set("classname", classname);
        entity
    }

    /// Set a property, builder style
    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.set(key, value);
        self
    }

    /// Set a property, replacing any earlier value for the key
    pub fn set(&mut self, key: &str, value: impl ToString) {
        let value = sanitize(&value.to_string());
        match self.properties.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.properties.push((key.to_string(), value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn classname(&self) -> &str {
        self.get("classname").unwrap_or_default()
    }

    /// Start a commented group of brushes
    pub fn section(&mut self, title: impl Into<String>) {
        self.sections.push((self.brushes.len(), title.into()));
    }

    /// Add a brush; degenerate (`None`) brushes are dropped
    pub fn push_brush(&mut self, brush: Option<Brush>) -> bool {
        match brush {
            Some(brush) => {
                self.brushes.push(brush);
                true
            }
            None => false,
        }
    }

    pub fn with_brush(mut self, brush: Option<Brush>) -> Self {
        self.push_brush(brush);
        self
    }

    pub fn brushes(&self) -> &[Brush] {
        &self.brushes
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{{")?;
        for (key, value) in &self.properties {
            writeln!(f, "\"{}\" \"{}\"", key, value)?;
        }

        let mut sections = self.sections.iter().peekable();
        for (i, brush) in self.brushes.iter().enumerate() {
            while let Some((_, title)) = sections.next_if(|(at, _)| *at == i) {
                writeln!(f, "// {}", title)?;
            }
            write!(f, "{}", brush)?;
        }
        writeln!(f, "}}")
    }
}
