//! Axis-aligned box brushes
//!
//! Every solid in the level is a box written as six planes, each defined by
//! three points. Point order fixes which side of the plane is solid, so the
//! winding below must not change.

use std::fmt;

use crate::world::units::WorldRect;

/// A point in engine units
pub type Point = [i32; 3];

/// One brush plane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    pub points: [Point; 3],
    pub texture: String,
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for [x, y, z] in &self.points {
            write!(f, "( {} {} {} ) ", x, y, z)?;
        }
        write!(f, "{} 0 0 0 1 1", self.texture)
    }
}

/// A box between two corners with one texture on every face
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Brush {
    min: Point,
    max: Point,
    texture: String,
}

impl Brush {
    /// Build a box; `None` unless it has positive extent on every axis
    pub fn new(min: Point, max: Point, texture: impl Into<String>) -> Option<Self> {
        if (0..3).any(|axis| max[axis] <= min[axis]) {
            return None;
        }
        Some(Self { min, max, texture: texture.into() })
    }

    /// Extrude a floor-plan rectangle between two heights
    pub fn from_rect(rect: WorldRect, z: (i32, i32), texture: impl Into<String>) -> Option<Self> {
        Self::new([rect.min_x, rect.min_y, z.0], [rect.max_x, rect.max_y, z.1], texture)
    }

    pub fn min(&self) -> Point {
        self.min
    }

    pub fn max(&self) -> Point {
        self.max
    }

    pub fn texture(&self) -> &str {
        &self.texture
    }

    /// Faces in west, east, south, north, bottom, top order
    pub fn faces(&self) -> [Face; 6] {
        let [x1, y1, z1] = self.min;
        let [x2, y2, z2] = self.max;
        let face = |points: [Point; 3]| Face { points, texture: self.texture.clone() };

        [
            face([[x1, y1, z1], [x1, y1 + 1, z1], [x1, y1, z1 + 1]]),
            face([[x2, y1, z1], [x2, y1, z1 + 1], [x2, y1 + 1, z1]]),
            face([[x1, y1, z1], [x1, y1, z1 + 1], [x1 + 1, y1, z1]]),
            face([[x1, y2, z1], [x1 + 1, y2, z1], [x1, y2, z1 + 1]]),
            face([[x1, y1, z1], [x1 + 1, y1, z1], [x1, y1 + 1, z1]]),
            face([[x1, y1, z2], [x1, y1 + 1, z2], [x1 + 1, y1, z2]]),
        ]
    }
}

impl fmt::Display for Brush {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{{")?;
        for face in self.faces() {
            writeln!(f, "{}", face)?;
        }
        writeln!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_rejected() {
        assert!(Brush::new([0, 0, 0], [64, 64, 0], "base").is_none());
        assert!(Brush::new([0, 0, 0], [-8, 64, 64], "base").is_none());
        assert!(Brush::new([0, 0, 0], [1, 1, 1], "base").is_some());
    }

    #[test]
    fn test_face_lines() {
        let brush = Brush::new([0, 0, -16], [256, 256, 0], "ground1_6").expect("brush");
        let lines: Vec<String> = brush.faces().iter().map(|f| f.to_string()).collect();
        assert_eq!(lines[0], "( 0 0 -16 ) ( 0 1 -16 ) ( 0 0 -15 ) ground1_6 0 0 0 1 1");
        assert_eq!(lines[1], "( 256 0 -16 ) ( 256 0 -15 ) ( 256 1 -16 ) ground1_6 0 0 0 1 1");
        assert_eq!(lines[3], "( 0 256 -16 ) ( 1 256 -16 ) ( 0 256 -15 ) ground1_6 0 0 0 1 1");
        assert_eq!(lines[5], "( 0 0 0 ) ( 0 1 0 ) ( 1 0 0 ) ground1_6 0 0 0 1 1");
    }

    #[test]
    fn test_display_wraps_in_braces() {
        let text = Brush::new([0, 0, 0], [8, 8, 8], "trigger").expect("brush").to_string();
        assert!(text.starts_with("{\n"));
        assert!(text.ends_with("}\n"));
        assert_eq!(text.lines().count(), 8);
    }
}
