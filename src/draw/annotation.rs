//! Annotation geometry: coordinates, shape kinds and committed annotations.

use serde::{Deserialize, Serialize};

/// Caller-assigned, stable annotation identifier.
pub type AnnotationId = String;

/// Index of a vertex inside a coordinate list.
pub type PointId = usize;

/// Surface-local coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Kind of vector shape an annotation represents.
///
/// Each kind carries its own completion and closure policy so callers never
/// need to re-dispatch on the kind to know how many vertices a shape needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    /// Single vertex
    Point,
    /// Two vertices
    Line,
    /// Closed ring of at least three vertices
    Polygon,
    /// Open chain of at least two vertices
    Polyline,
}

impl ShapeKind {
    /// Exact vertex count at which the shape completes on its own.
    ///
    /// `None` for kinds that only finish on an explicit user action.
    pub fn auto_complete_at(self) -> Option<usize> {
        match self {
            ShapeKind::Point => Some(1),
            ShapeKind::Line => Some(2),
            ShapeKind::Polygon | ShapeKind::Polyline => None,
        }
    }

    /// Minimum number of committed vertices for a valid shape of this kind.
    pub fn min_points(self) -> usize {
        match self {
            ShapeKind::Point => 1,
            ShapeKind::Line | ShapeKind::Polyline => 2,
            ShapeKind::Polygon => 3,
        }
    }

    /// Whether the shape's last vertex connects back to the first.
    pub fn is_closed(self) -> bool {
        !matches!(self, ShapeKind::Polyline)
    }

    /// Whether pressing vertex 0 can finish the shape.
    pub fn closes_on_first_point(self) -> bool {
        matches!(self, ShapeKind::Polygon)
    }

    /// Whether a finish key may complete this shape given `placed` vertices.
    ///
    /// Lines accept a manual finish only while an existing annotation is edited.
    pub fn ready_for_manual_finish(self, placed: usize, editing: bool) -> bool {
        match self {
            ShapeKind::Point => false,
            ShapeKind::Line => editing,
            ShapeKind::Polygon | ShapeKind::Polyline => placed >= self.min_points(),
        }
    }

    /// Whether `placed` vertices complete the shape without user confirmation.
    pub fn is_complete(self, placed: usize) -> bool {
        self.auto_complete_at() == Some(placed)
    }

    /// Whether a committed shape of this kind may have `count` vertices.
    pub fn accepts_vertex_count(self, count: usize) -> bool {
        match self.auto_complete_at() {
            Some(exact) => count == exact,
            None => count >= self.min_points(),
        }
    }

    /// Infers the kind of an existing annotation from its geometry.
    ///
    /// Returns `None` for an empty coordinate list.
    pub fn infer(coordinate_count: usize, is_closed: bool) -> Option<Self> {
        match coordinate_count {
            0 => None,
            1 => Some(ShapeKind::Point),
            2 => Some(ShapeKind::Line),
            _ if is_closed => Some(ShapeKind::Polygon),
            _ => Some(ShapeKind::Polyline),
        }
    }
}

/// A committed, identified vector shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: AnnotationId,
    pub name: String,
    #[serde(rename = "shape_kind", alias = "kind")]
    pub kind: ShapeKind,
    pub is_closed: bool,
    pub coordinates: Vec<Coordinate>,
}

impl Annotation {
    /// Builds an annotation whose closure flag follows `kind`.
    pub fn new(
        id: impl Into<AnnotationId>,
        name: impl Into<String>,
        kind: ShapeKind,
        coordinates: Vec<Coordinate>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            is_closed: kind.is_closed(),
            coordinates,
        }
    }

    /// Shape kind implied by the stored geometry, falling back to the stored kind.
    pub fn inferred_kind(&self) -> ShapeKind {
        ShapeKind::infer(self.coordinates.len(), self.is_closed).unwrap_or(self.kind)
    }

    /// Checks the vertex-count and closure invariants of the stored kind.
    pub fn is_well_formed(&self) -> bool {
        self.kind.accepts_vertex_count(self.coordinates.len())
            && self.is_closed == self.kind.is_closed()
    }
}
