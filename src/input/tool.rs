//! Drawing tool selection.

use crate::draw::ShapeKind;
use serde::{Deserialize, Serialize};

/// Drawing tool selection.
///
/// The active tool determines which shape kind new vertices build. With no
/// shape tool selected the engine only hovers and selects annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    /// Hover and select existing annotations
    #[default]
    Inactive,
    /// Single vertex, completes on placement
    Point,
    /// Two vertices, completes on the second
    Line,
    /// Closed ring of at least three vertices
    Polygon,
    /// Open chain of at least two vertices
    Polyline,
}

impl Tool {
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            Tool::Inactive => None,
            Tool::Point => Some(ShapeKind::Point),
            Tool::Line => Some(ShapeKind::Line),
            Tool::Polygon => Some(ShapeKind::Polygon),
            Tool::Polyline => Some(ShapeKind::Polyline),
        }
    }
}

impl From<ShapeKind> for Tool {
    fn from(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Point => Tool::Point,
            ShapeKind::Line => Tool::Line,
            ShapeKind::Polygon => Tool::Polygon,
            ShapeKind::Polyline => Tool::Polyline,
        }
    }
}
