//! Cached hit-test geometry produced by the renderer.
//!
//! Regions are only built by the rendering pass (constructors are crate-private
//! to `draw`); the event classifier consumes them through
//! [`Region::contains_point`] and [`Region::intersects_stroke`].

use super::annotation::{AnnotationId, Coordinate};
use crate::util::{self, Rect};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
enum RegionShape {
    Circle { center: Coordinate, radius: f64 },
    RoundedRect { rect: Rect, radius: f64 },
    Segment { start: Coordinate, end: Coordinate },
}

/// A drawn path together with the stroke width it was drawn with.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    shape: RegionShape,
    stroke_width: f64,
}

impl Region {
    pub(in crate::draw) fn circle(center: Coordinate, radius: f64, stroke_width: f64) -> Self {
        Self {
            shape: RegionShape::Circle { center, radius },
            stroke_width,
        }
    }

    pub(in crate::draw) fn rounded_rect(rect: Rect, radius: f64) -> Self {
        Self {
            shape: RegionShape::RoundedRect { rect, radius },
            stroke_width: 0.0,
        }
    }

    pub(in crate::draw) fn segment(start: Coordinate, end: Coordinate, stroke_width: f64) -> Self {
        Self {
            shape: RegionShape::Segment { start, end },
            stroke_width,
        }
    }

    /// Fill membership: is `point` inside the area enclosed by the path?
    ///
    /// Segments enclose no area and never contain a point.
    pub fn contains_point(&self, point: Coordinate) -> bool {
        match &self.shape {
            RegionShape::Circle { center, radius } => util::inside_circle(point, *center, *radius),
            RegionShape::RoundedRect { rect, radius } => {
                util::rounded_rect_contains(*rect, *radius, point)
            }
            RegionShape::Segment { .. } => false,
        }
    }

    /// Stroke membership: is `point` covered by the path's stroke?
    pub fn intersects_stroke(&self, point: Coordinate) -> bool {
        let half = self.stroke_width / 2.0;
        if half <= 0.0 {
            return false;
        }

        match &self.shape {
            RegionShape::Circle { center, radius } => {
                let distance = util::distance_squared(point, *center).sqrt();
                (distance - radius).abs() <= half
            }
            RegionShape::RoundedRect { .. } => false,
            RegionShape::Segment { start, end } => {
                util::distance_squared_to_segment(point, *start, *end) <= half * half
            }
        }
    }
}

/// Hit regions for the body of one annotation.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeRegions {
    /// Single-vertex annotations
    Point(Region),
    /// One region per drawn segment, closing segment included
    Segments(Vec<Region>),
}

/// Everything the classifier needs to hit-test one annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationPaths {
    pub label: Region,
    pub shape: ShapeRegions,
}

impl AnnotationPaths {
    /// Whether the label box contains `point`.
    pub fn label_hit(&self, point: Coordinate) -> bool {
        point_in_cached_region(&self.label, point)
    }

    /// Whether the point disc or any drawn segment's stroke covers `point`.
    pub fn shape_hit(&self, point: Coordinate) -> bool {
        match &self.shape {
            ShapeRegions::Point(region) => point_in_cached_region(region, point),
            ShapeRegions::Segments(segments) => segments
                .iter()
                .any(|segment| point_in_stroke_region(segment, point)),
        }
    }

    pub fn hit(&self, point: Coordinate) -> bool {
        self.label_hit(point) || self.shape_hit(point)
    }
}

/// Fill-membership test against a cached region.
pub fn point_in_cached_region(region: &Region, point: Coordinate) -> bool {
    region.contains_point(point)
}

/// Stroke-membership test against a cached region.
pub fn point_in_stroke_region(region: &Region, point: Coordinate) -> bool {
    region.intersects_stroke(point)
}

/// Per-annotation hit regions from the last render pass.
///
/// Derived data: it is rebuilt from scratch on every pass, so annotations that
/// disappeared from the input simply have no entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathCache {
    entries: Vec<(AnnotationId, AnnotationPaths)>,
    index: HashMap<AnnotationId, usize>,
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub(in crate::draw) fn insert(&mut self, id: AnnotationId, paths: AnnotationPaths) {
        if let Some(&slot) = self.index.get(&id) {
            self.entries[slot].1 = paths;
        } else {
            self.index.insert(id.clone(), self.entries.len());
            self.entries.push((id, paths));
        }
    }

    pub fn get(&self, id: &str) -> Option<&AnnotationPaths> {
        self.index.get(id).map(|&slot| &self.entries[slot].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops entries whose id fails `keep`.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str) -> bool,
    {
        self.entries.retain(|(id, _)| keep(id));
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(slot, (id, _))| (id.clone(), slot))
            .collect();
    }

    /// Ids whose cached label or body covers `point`, in draw order.
    pub fn hits(&self, point: Coordinate) -> Vec<AnnotationId> {
        self.entries
            .iter()
            .filter(|(_, paths)| paths.hit(point))
            .map(|(id, _)| id.clone())
            .collect()
    }
}
