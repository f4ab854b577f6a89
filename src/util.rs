//! Utility functions for colors and planar geometry.
//!
//! This module provides:
//! - Color-name mapping used by the config parser
//! - Distance and containment helpers backing the hit-test regions
//! - Label anchoring helpers

use crate::draw::{Color, Coordinate, color::*};

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// Used by the configuration system and by [`Color`]'s `FromStr` impl.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "lightblue", "yellow", "orange", "magenta"/"pink",
///   "white", "black", "transparent"
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.trim().to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "lightblue" => Some(LIGHT_BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "magenta" | "pink" | "fuchsia" => Some(MAGENTA),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        "transparent" => Some(TRANSPARENT),
        _ => None,
    }
}

// ============================================================================
// Geometry
// ============================================================================

/// Axis-aligned rectangle in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Inclusive containment test on the rectangle's edges.
    pub fn contains(&self, point: Coordinate) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Squared euclidean distance between two coordinates.
pub fn distance_squared(a: Coordinate, b: Coordinate) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

/// Returns true when `point` lies strictly inside the circle.
///
/// Compares squared distances, so a point exactly on the boundary is outside.
pub fn inside_circle(point: Coordinate, center: Coordinate, radius: f64) -> bool {
    distance_squared(point, center) < radius * radius
}

/// Shortest squared distance from `point` to the segment `[start, end]`.
pub fn distance_squared_to_segment(point: Coordinate, start: Coordinate, end: Coordinate) -> f64 {
    let seg_x = end.x - start.x;
    let seg_y = end.y - start.y;
    let len_sq = seg_x * seg_x + seg_y * seg_y;

    if len_sq < f64::EPSILON {
        // Segment is essentially a point
        return distance_squared(point, start);
    }

    // Project point onto line, clamped to segment
    let t = (((point.x - start.x) * seg_x + (point.y - start.y) * seg_y) / len_sq).clamp(0.0, 1.0);
    let projection = Coordinate::new(start.x + seg_x * t, start.y + seg_y * t);

    distance_squared(point, projection)
}

/// Containment test for a rectangle whose corners are rounded by `radius`.
pub fn rounded_rect_contains(rect: Rect, radius: f64, point: Coordinate) -> bool {
    if !rect.contains(point) {
        return false;
    }

    let radius = radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);
    if radius == 0.0 {
        return true;
    }

    // Clamp into the inner rectangle; only the corner quadrants need the arc test
    let inner_x = point.x.clamp(rect.x + radius, rect.x + rect.width - radius);
    let inner_y = point.y.clamp(rect.y + radius, rect.y + rect.height - radius);
    distance_squared(point, Coordinate::new(inner_x, inner_y)) <= radius * radius
}

/// Index of the topmost vertex (smallest y, first one on ties).
pub fn topmost_vertex(points: &[Coordinate]) -> Option<usize> {
    points
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (index, point)| match best {
            Some((_, y)) if y <= point.y => best,
            _ => Some((index, point.y)),
        })
        .map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inside_circle_excludes_boundary() {
        let center = Coordinate::new(0.0, 0.0);
        assert!(inside_circle(Coordinate::new(3.0, 3.9), center, 5.0));
        assert!(!inside_circle(Coordinate::new(3.0, 4.0), center, 5.0));
        assert!(!inside_circle(Coordinate::new(5.0, 0.0), center, 5.0));
    }

    #[test]
    fn segment_distance_clamps_to_endpoints() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(10.0, 0.0);
        assert_eq!(distance_squared_to_segment(Coordinate::new(5.0, 3.0), a, b), 9.0);
        assert_eq!(distance_squared_to_segment(Coordinate::new(13.0, 4.0), a, b), 25.0);
        assert_eq!(distance_squared_to_segment(Coordinate::new(1.0, 1.0), a, a), 2.0);
    }

    #[test]
    fn rounded_rect_cuts_corners() {
        let rect = Rect::new(0.0, 0.0, 40.0, 20.0);
        assert!(rounded_rect_contains(rect, 10.0, Coordinate::new(20.0, 10.0)));
        assert!(rounded_rect_contains(rect, 10.0, Coordinate::new(39.0, 10.0)));
        assert!(!rounded_rect_contains(rect, 10.0, Coordinate::new(0.5, 0.5)));
        assert!(!rounded_rect_contains(rect, 10.0, Coordinate::new(41.0, 10.0)));
    }

    #[test]
    fn topmost_vertex_prefers_first_on_ties() {
        let points = [
            Coordinate::new(0.0, 5.0),
            Coordinate::new(1.0, 2.0),
            Coordinate::new(2.0, 2.0),
        ];
        assert_eq!(topmost_vertex(&points), Some(1));
        assert_eq!(topmost_vertex(&[]), None);
    }

    #[test]
    fn color_names_are_case_insensitive() {
        assert_eq!(name_to_color("White"), Some(WHITE));
        assert_eq!(name_to_color("pink"), Some(MAGENTA));
        assert_eq!(name_to_color("nope"), None);
    }
}
