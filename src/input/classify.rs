//! Maps raw input plus current geometry to a single semantic event.
//!
//! Pointer events are checked in a fixed priority order:
//! 1. committed annotation regions from the last render (skipped while editing)
//! 2. vertices of the edited geometry within the hit radius
//! 3. empty space

use super::events::{
    AnnotationHit, MouseButton, PointerPhase, PointerTarget, RawEvent, SemanticEvent,
};
use crate::draw::{AnnotationId, Coordinate, PathCache, PointId, StyleTable};
use crate::util;

/// Everything the classifier reads; borrowed from the engine for one event.
#[derive(Debug, Clone, Copy)]
pub struct ClassifyContext<'a> {
    /// Edited geometry, look-ahead vertex included
    pub points: &'a [Coordinate],
    pub path_cache: &'a PathCache,
    pub annotation_styles: &'a StyleTable<AnnotationId>,
    /// Whether an edit target is set
    pub editing: bool,
    pub vertex_hit_radius: f64,
}

pub fn classify(raw: &RawEvent, ctx: &ClassifyContext<'_>) -> SemanticEvent {
    let geometry = ctx.points.to_vec();
    let (phase, at) = match *raw {
        RawEvent::PointerDown {
            at,
            button: MouseButton::Right,
        } => return SemanticEvent::ContextMenu { at, geometry },
        RawEvent::PointerDown { at, .. } => (PointerPhase::Down, at),
        RawEvent::PointerMove { at } => (PointerPhase::Move, at),
        RawEvent::PointerUp { at, .. } => (PointerPhase::Up, at),
        RawEvent::KeyDown(key) => return SemanticEvent::KeyDown { key, geometry },
        RawEvent::KeyUp(key) => return SemanticEvent::KeyUp { key, geometry },
    };

    SemanticEvent::Pointer {
        phase,
        at,
        target: pointer_target(at, ctx),
        geometry,
    }
}

fn pointer_target(at: Coordinate, ctx: &ClassifyContext<'_>) -> PointerTarget {
    if !ctx.editing {
        let hits: Vec<AnnotationHit> = ctx
            .path_cache
            .hits(at)
            .into_iter()
            .map(|id| AnnotationHit {
                styles: ctx.annotation_styles.style_names(&id),
                id,
            })
            .collect();
        if !hits.is_empty() {
            return PointerTarget::Annotations(hits);
        }
    }

    let vertices = detect_on_existing_points(ctx.points, at, ctx.vertex_hit_radius, ctx.editing);
    if vertices.is_empty() {
        PointerTarget::Empty
    } else {
        PointerTarget::ExistingPoints(vertices)
    }
}

/// Indexes of the vertices within `radius` of `at`.
///
/// Outside edition the trailing vertex is provisional (it follows the pointer)
/// and is never reported.
pub fn detect_on_existing_points(
    points: &[Coordinate],
    at: Coordinate,
    radius: f64,
    editing: bool,
) -> Vec<PointId> {
    let candidates = if editing {
        points
    } else {
        &points[..points.len().saturating_sub(1)]
    };

    candidates
        .iter()
        .enumerate()
        .filter(|(_, vertex)| util::inside_circle(at, **vertex, radius))
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{
        Annotation, AnnotationStyle, EditedShape, Frame, Renderer, ShapeKind, StyleAssignment,
    };
    use crate::draw::surface::recording::RecordingSurface;
    use crate::input::Key;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    fn cache_for(annotations: &[Annotation]) -> PathCache {
        let styles = StyleTable::new();
        let point_styles = StyleTable::new();
        let selected = AnnotationStyle::selected();
        let frame = Frame {
            annotations,
            editing: None,
            styles: &styles,
            edited: EditedShape {
                points: &[],
                style: &selected,
                point_styles: &point_styles,
                complete: false,
                closed: false,
            },
        };
        Renderer::default().render_frame(&mut RecordingSurface::new(), &frame)
    }

    fn ctx<'a>(
        points: &'a [Coordinate],
        cache: &'a PathCache,
        styles: &'a StyleTable<AnnotationId>,
        editing: bool,
    ) -> ClassifyContext<'a> {
        ClassifyContext {
            points,
            path_cache: cache,
            annotation_styles: styles,
            editing,
            vertex_hit_radius: 7.0,
        }
    }

    fn down(x: f64, y: f64) -> RawEvent {
        RawEvent::PointerDown {
            at: c(x, y),
            button: MouseButton::Left,
        }
    }

    #[test]
    fn look_ahead_vertex_is_never_reported_during_creation() {
        let points = [c(0.0, 0.0), c(40.0, 40.0), c(40.0, 40.0)];
        assert_eq!(detect_on_existing_points(&points, c(40.0, 41.0), 7.0, false), vec![1]);
        assert_eq!(
            detect_on_existing_points(&points, c(40.0, 41.0), 7.0, true),
            vec![1, 2]
        );

        let single = [c(5.0, 5.0)];
        assert!(detect_on_existing_points(&single, c(5.0, 5.0), 7.0, false).is_empty());
    }

    #[test]
    fn vertex_radius_boundary_is_outside() {
        let points = [c(0.0, 0.0)];
        assert!(detect_on_existing_points(&points, c(7.0, 0.0), 7.0, true).is_empty());
        assert_eq!(detect_on_existing_points(&points, c(6.9, 0.0), 7.0, true), vec![0]);
    }

    #[test]
    fn annotation_label_wins_over_vertex() {
        // Label box of a line anchored at (100, 100) spans y 80..100
        let line = Annotation::new(
            "a1",
            "Line",
            ShapeKind::Line,
            vec![c(100.0, 100.0), c(200.0, 100.0)],
        );
        let cache = cache_for(&[line]);
        let mut styles = StyleTable::new();
        styles.exclusive_assign(
            &StyleAssignment::new("click", 1, Default::default()),
            "a1".to_string(),
        );
        // A working vertex sits inside the label, followed by the look-ahead vertex
        let points = [c(110.0, 90.0), c(300.0, 300.0)];

        let event = classify(&down(111.0, 90.0), &ctx(&points, &cache, &styles, false));
        match event {
            SemanticEvent::Pointer {
                phase: PointerPhase::Down,
                target: PointerTarget::Annotations(hits),
                ..
            } => {
                assert_eq!(hits.len(), 1);
                assert_eq!(hits[0].id, "a1");
                assert!(hits[0].has_style("click"));
            }
            other => panic!("expected annotation hit, got {other:?}"),
        }
    }

    #[test]
    fn editing_skips_annotation_regions() {
        let line = Annotation::new(
            "a1",
            "Line",
            ShapeKind::Line,
            vec![c(100.0, 100.0), c(200.0, 100.0)],
        );
        let cache = cache_for(&[line]);
        let styles = StyleTable::new();
        let points = [c(110.0, 90.0)];

        let event = classify(&down(111.0, 90.0), &ctx(&points, &cache, &styles, true));
        assert!(matches!(
            event,
            SemanticEvent::Pointer {
                target: PointerTarget::ExistingPoints(ref hits),
                ..
            } if hits == &vec![0]
        ));
    }

    #[test]
    fn empty_space_carries_geometry_snapshot() {
        let cache = PathCache::new();
        let styles = StyleTable::new();
        let points = [c(1.0, 1.0), c(2.0, 2.0)];
        let event = classify(
            &RawEvent::PointerMove { at: c(300.0, 300.0) },
            &ctx(&points, &cache, &styles, false),
        );
        assert_eq!(event.geometry(), &points);
        assert!(matches!(
            event,
            SemanticEvent::Pointer {
                phase: PointerPhase::Move,
                target: PointerTarget::Empty,
                ..
            }
        ));
    }

    #[test]
    fn secondary_button_and_keys_classify_directly() {
        let cache = PathCache::new();
        let styles = StyleTable::new();
        let context = ctx(&[], &cache, &styles, false);

        let right = RawEvent::PointerDown {
            at: c(4.0, 4.0),
            button: MouseButton::Right,
        };
        assert!(matches!(classify(&right, &context), SemanticEvent::ContextMenu { .. }));
        assert!(matches!(
            classify(&RawEvent::KeyUp(Key::Space), &context),
            SemanticEvent::KeyUp { key: Key::Space, .. }
        ));
    }
}
