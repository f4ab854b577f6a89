//! Inputs of one render pass.

use super::annotation::{Annotation, AnnotationId, Coordinate, PointId};
use super::style::AnnotationStyle;
use super::style_table::StyleTable;

/// The shape currently being created or edited.
#[derive(Debug, Clone, Copy)]
pub struct EditedShape<'a> {
    /// Working vertex list, look-ahead vertex included
    pub points: &'a [Coordinate],
    /// Style of the working geometry (selected base plus edit override)
    pub style: &'a AnnotationStyle,
    /// Per-vertex overrides resolved against `style`
    pub point_styles: &'a StyleTable<PointId>,
    /// Whether the geometry is a finished shape (true while editing)
    pub complete: bool,
    /// Closure flag of the shape kind being drawn
    pub closed: bool,
}

impl EditedShape<'_> {
    /// A closing segment is drawn only for complete, closed rings.
    pub fn draws_closing_segment(&self) -> bool {
        self.complete && self.closed && self.points.len() > 2
    }
}

/// Everything drawn in one pass: committed annotations plus the edited shape.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Committed annotations in draw order (first = bottom layer)
    pub annotations: &'a [Annotation],
    /// Id of the annotation under edition; it is drawn as the edited shape instead
    pub editing: Option<&'a AnnotationId>,
    /// Overrides for committed annotations
    pub styles: &'a StyleTable<AnnotationId>,
    pub edited: EditedShape<'a>,
}

impl<'a> Frame<'a> {
    /// Committed annotations that are drawn as such (edit target excluded).
    pub fn committed(&self) -> impl Iterator<Item = &'a Annotation> + 'a {
        let editing = self.editing;
        self.annotations
            .iter()
            .filter(move |annotation| Some(&annotation.id) != editing)
    }
}
