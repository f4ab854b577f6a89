//! The mutation surface handed to event handlers.

use super::AnnotationEngine;
use crate::draw::{
    Annotation, AnnotationId, Coordinate, DrawSurface, PartialStyle, PointId, StyleAssignment,
};

/// Drawing deferred until after the frame is rendered.
pub type Overlay = Box<dyn FnOnce(&mut dyn DrawSurface)>;

/// Bounded set of mutations available while handling one event.
///
/// Handlers never touch the engine's vertex list or style tables directly;
/// every change goes through here. Index-based calls with an out-of-range
/// index are ignored.
pub struct Operations<'a> {
    engine: &'a mut AnnotationEngine,
    overlays: &'a mut Vec<Overlay>,
}

impl<'a> Operations<'a> {
    pub(super) fn new(engine: &'a mut AnnotationEngine, overlays: &'a mut Vec<Overlay>) -> Self {
        Self { engine, overlays }
    }

    // =========================================================================
    // Read access
    // =========================================================================

    pub fn points(&self) -> &[Coordinate] {
        &self.engine.points
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.engine.annotations
    }

    pub fn edit_target(&self) -> Option<&Annotation> {
        self.engine.edit_target.as_ref()
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Appends a vertex and returns its index.
    pub fn add_point(&mut self, at: Coordinate) -> PointId {
        self.engine.points.push(at);
        self.engine.points.len() - 1
    }

    pub fn move_point(&mut self, index: PointId, to: Coordinate) {
        match self.engine.points.get_mut(index) {
            Some(point) => *point = to,
            None => log::debug!("Ignoring move of missing vertex {}", index),
        }
    }

    /// Clears the working geometry and its vertex styles.
    pub fn finish_current_line(&mut self) {
        self.engine.points.clear();
        self.engine.point_styles.clear();
    }

    // =========================================================================
    // Annotation styles
    // =========================================================================

    pub fn set_style_to_annotations<I>(&mut self, assignment: &StyleAssignment, ids: I)
    where
        I: IntoIterator<Item = AnnotationId>,
    {
        self.engine.annotation_styles.assign(assignment, ids);
    }

    /// Binds `assignment` to `id` after removing its name from every other id.
    pub fn set_style_exclusively(&mut self, assignment: &StyleAssignment, id: AnnotationId) {
        self.engine.annotation_styles.exclusive_assign(assignment, id);
    }

    /// Drops every style bound to the given ids.
    pub fn remove_style_from_annotations(&mut self, ids: &[AnnotationId]) {
        self.engine.annotation_styles.remove_targets(ids);
    }

    pub fn remove_styles_by_name(&mut self, name: &str) {
        self.engine.annotation_styles.remove_by_name(name);
    }

    // =========================================================================
    // Vertex styles
    // =========================================================================

    pub fn set_style_to_points<I>(&mut self, assignment: &StyleAssignment, indexes: I)
    where
        I: IntoIterator<Item = PointId>,
    {
        self.engine.point_styles.assign(assignment, indexes);
    }

    pub fn set_point_style_exclusively(&mut self, assignment: &StyleAssignment, index: PointId) {
        self.engine.point_styles.exclusive_assign(assignment, index);
    }

    pub fn remove_style_from_points(&mut self, indexes: &[PointId]) {
        self.engine.point_styles.remove_targets(indexes);
    }

    pub fn clear_point_styles(&mut self) {
        self.engine.point_styles.clear();
    }

    /// Overrides the style of the working geometry.
    pub fn set_style_for_annotation_to_edit(&mut self, style: PartialStyle) {
        self.engine.edit_override = (!style.is_empty()).then_some(style);
    }

    // =========================================================================
    // Host inputs
    // =========================================================================

    /// Replaces the committed annotation list (e.g. after a commit).
    pub fn set_annotations(&mut self, annotations: Vec<Annotation>) {
        self.engine.set_annotations(annotations);
    }

    pub fn set_annotation_to_edit(&mut self, annotation: Option<Annotation>) {
        self.engine.set_annotation_to_edit(annotation);
    }

    /// Schedules `draw` to run on the surface once this event's frame is rendered.
    pub fn draw_on_surface<F>(&mut self, draw: F)
    where
        F: FnOnce(&mut dyn DrawSurface) + 'static,
    {
        self.overlays.push(Box::new(draw));
    }
}
