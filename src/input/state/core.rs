//! Engine instance: working geometry, style tables and the event cycle.

use super::handler::EventHandler;
use super::operations::{Operations, Overlay};
use crate::config::Config;
use crate::draw::{
    Annotation, AnnotationId, AnnotationStyle, Coordinate, DrawSurface, PartialStyle, PathCache,
    PointId, Renderer, StyleTable,
};
use crate::input::classify::{ClassifyContext, classify};
use crate::input::events::{RawEvent, SemanticEvent};

/// Owns everything one interactive surface needs between events.
///
/// Each call to [`AnnotationEngine::process`] runs one full cycle: classify the
/// raw event against the geometry and hit regions of the previous frame, hand
/// it to the caller's handler together with [`Operations`], redraw, run the
/// deferred overlays and cache the new hit regions.
pub struct AnnotationEngine {
    /// Committed annotations supplied by the host, in draw order
    pub(super) annotations: Vec<Annotation>,
    /// Annotation whose vertices are being modified
    pub(super) edit_target: Option<Annotation>,
    /// Working vertex list (look-ahead vertex included during creation)
    pub(super) points: Vec<Coordinate>,
    pub(super) annotation_styles: StyleTable<AnnotationId>,
    pub(super) point_styles: StyleTable<PointId>,
    /// Base style of the working geometry
    pub(super) selected_style: AnnotationStyle,
    /// Override applied on top of `selected_style`
    pub(super) edit_override: Option<PartialStyle>,
    pub(super) renderer: Renderer,
    /// Hit regions from the last render pass
    pub(super) path_cache: PathCache,
    pub(super) vertex_hit_radius: f64,
}

impl AnnotationEngine {
    pub fn new(config: &Config) -> Self {
        Self {
            annotations: Vec::new(),
            edit_target: None,
            points: Vec::new(),
            annotation_styles: StyleTable::new(),
            point_styles: StyleTable::new(),
            selected_style: config.styles.selected_style(),
            edit_override: None,
            renderer: Renderer::from_config(config),
            path_cache: PathCache::new(),
            vertex_hit_radius: config.engine.vertex_hit_radius,
        }
    }

    /// Replaces the committed annotation list.
    ///
    /// Cached regions of annotations that are no longer listed are dropped
    /// right away so they cannot be hit before the next render.
    pub fn set_annotations(&mut self, annotations: Vec<Annotation>) {
        self.annotations = annotations;
        let annotations = &self.annotations;
        self.path_cache
            .retain(|id| annotations.iter().any(|annotation| annotation.id == id));
    }

    /// Starts (or with `None` stops) editing an annotation.
    ///
    /// The annotation's coordinates are copied into the working vertex list.
    pub fn set_annotation_to_edit(&mut self, annotation: Option<Annotation>) {
        self.point_styles.clear();
        match annotation {
            Some(annotation) => {
                log::debug!(
                    "Editing annotation {} ({} vertices)",
                    annotation.id,
                    annotation.coordinates.len()
                );
                self.points = annotation.coordinates.clone();
                self.edit_target = Some(annotation);
            }
            None => {
                if let Some(previous) = self.edit_target.take() {
                    log::debug!("Stopped editing annotation {}", previous.id);
                }
                self.points.clear();
            }
        }
    }

    /// Aborts uncommitted geometry.
    ///
    /// Clearing the edit target stays with the caller, who owns that handle.
    pub fn cancel_creation(&mut self) {
        if !self.points.is_empty() {
            log::debug!("Cancelled creation, dropped {} vertices", self.points.len());
        }
        self.points.clear();
        self.point_styles.clear();
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn edit_target(&self) -> Option<&Annotation> {
        self.edit_target.as_ref()
    }

    /// Working vertex list, look-ahead vertex included.
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn annotation_styles(&self) -> &StyleTable<AnnotationId> {
        &self.annotation_styles
    }

    pub fn annotation_styles_mut(&mut self) -> &mut StyleTable<AnnotationId> {
        &mut self.annotation_styles
    }

    pub fn point_styles(&self) -> &StyleTable<PointId> {
        &self.point_styles
    }

    pub fn path_cache(&self) -> &PathCache {
        &self.path_cache
    }

    /// Classifies `raw` against the current geometry and last frame's regions.
    pub fn classify(&self, raw: &RawEvent) -> SemanticEvent {
        classify(
            raw,
            &ClassifyContext {
                points: &self.points,
                path_cache: &self.path_cache,
                annotation_styles: &self.annotation_styles,
                editing: self.edit_target.is_some(),
                vertex_hit_radius: self.vertex_hit_radius,
            },
        )
    }

    /// Runs one event cycle and returns the event the handler saw.
    pub fn process<H>(
        &mut self,
        raw: RawEvent,
        handler: &mut H,
        surface: &mut dyn DrawSurface,
    ) -> SemanticEvent
    where
        H: EventHandler + ?Sized,
    {
        let event = self.classify(&raw);
        log::debug!("Semantic event: {:?}", event);

        let mut overlays: Vec<Overlay> = Vec::new();
        {
            let mut ops = Operations::new(self, &mut overlays);
            handler.handle(&event, &mut ops);
        }

        self.render(surface);
        for overlay in overlays {
            overlay(&mut *surface);
        }

        event
    }
}
