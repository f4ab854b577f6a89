use super::*;
use crate::config::{CLICK_STYLE, Config, HIGHLIGHT_STYLE, HOVER_STYLE};
use crate::draw::surface::recording::{Call, RecordingSurface};
use crate::draw::color::RED;
use crate::draw::style::{PartialLineStyle, PartialPointStyle, TextAlign};
use crate::draw::{
    Annotation, Color, Coordinate, DrawSurface, PartialStyle, ShapeKind, StyleAssignment,
};
use crate::input::{Key, MouseButton, PointerPhase, PointerTarget, RawEvent, SemanticEvent, Tool};

fn c(x: f64, y: f64) -> Coordinate {
    Coordinate::new(x, y)
}

/// Engine, stock state machine and a recording surface wired together.
struct Harness {
    engine: AnnotationEngine,
    machine: StateMachine<MemoryHost>,
    surface: RecordingSurface,
}

impl Harness {
    fn new(annotations: Vec<Annotation>) -> Self {
        let config = Config::default();
        let mut engine = AnnotationEngine::new(&config);
        engine.set_annotations(annotations.clone());
        let machine = StateMachine::new(&config, MemoryHost::with_annotations(annotations));
        let mut surface = RecordingSurface::new();
        engine.render(&mut surface);
        Self {
            engine,
            machine,
            surface,
        }
    }

    fn with_tool(tool: Tool) -> Self {
        let mut harness = Self::new(Vec::new());
        harness.machine.select_tool(&mut harness.engine, tool);
        harness
    }

    fn edit(&mut self, id: &str) {
        let annotation = self.machine.host().get(id).cloned();
        assert!(annotation.is_some(), "unknown annotation {id}");
        self.engine.set_annotation_to_edit(annotation);
        self.engine.render(&mut self.surface);
    }

    fn send(&mut self, raw: RawEvent) -> SemanticEvent {
        self.engine.process(raw, &mut self.machine, &mut self.surface)
    }

    fn down(&mut self, x: f64, y: f64) -> SemanticEvent {
        self.send(RawEvent::PointerDown {
            at: c(x, y),
            button: MouseButton::Left,
        })
    }

    fn up(&mut self, x: f64, y: f64) -> SemanticEvent {
        self.send(RawEvent::PointerUp {
            at: c(x, y),
            button: MouseButton::Left,
        })
    }

    fn click(&mut self, x: f64, y: f64) {
        self.down(x, y);
        self.up(x, y);
    }

    fn move_to(&mut self, x: f64, y: f64) -> SemanticEvent {
        self.send(RawEvent::PointerMove { at: c(x, y) })
    }

    fn key(&mut self, key: Key) {
        self.send(RawEvent::KeyDown(key));
        self.send(RawEvent::KeyUp(key));
    }

    fn committed(&self) -> &[Annotation] {
        self.machine.host().annotations()
    }
}

fn polygon_a1() -> Annotation {
    Annotation::new(
        "a1",
        "Plot",
        ShapeKind::Polygon,
        vec![c(0.0, 0.0), c(10.0, 0.0), c(10.0, 10.0)],
    )
}

fn line(id: &str, y: f64) -> Annotation {
    Annotation::new(id, "Line", ShapeKind::Line, vec![c(100.0, y), c(200.0, y)])
}

// =============================================================================
// Creation
// =============================================================================

#[test]
fn line_completes_exactly_on_second_vertex() {
    let mut h = Harness::with_tool(Tool::Line);

    h.click(10.0, 10.0);
    assert!(h.committed().is_empty());
    // Placed vertex plus look-ahead vertex
    assert_eq!(h.engine.points(), &[c(10.0, 10.0), c(10.0, 10.0)]);

    h.move_to(30.0, 30.0);
    assert_eq!(h.engine.points()[1], c(30.0, 30.0));

    h.down(50.0, 50.0);
    assert_eq!(h.committed().len(), 1);
    let annotation = &h.committed()[0];
    assert_eq!(annotation.coordinates, vec![c(10.0, 10.0), c(50.0, 50.0)]);
    assert_eq!(annotation.kind, ShapeKind::Line);
    assert!(annotation.is_closed);
    assert_eq!(annotation.name, "Annotation 1");

    assert!(h.engine.points().is_empty());
    assert_eq!(h.engine.annotations().len(), 1);
    assert!(h.engine.annotation_styles().has_style(&"1".to_string(), CLICK_STYLE));
    assert_eq!(h.machine.mode(), Mode::Creation(ShapeKind::Line));
}

#[test]
fn point_completes_on_first_vertex() {
    let mut h = Harness::with_tool(Tool::Point);
    h.down(42.0, 24.0);

    assert_eq!(h.committed().len(), 1);
    assert_eq!(h.committed()[0].coordinates, vec![c(42.0, 24.0)]);
    assert!(h.engine.points().is_empty());
}

#[test]
fn polygon_closes_on_first_vertex_with_hint() {
    let mut h = Harness::with_tool(Tool::Polygon);
    h.click(0.0, 0.0);
    h.click(100.0, 0.0);
    h.click(100.0, 100.0);

    h.move_to(1.0, 1.0);
    assert!(h.engine.point_styles().has_style(&0, HIGHLIGHT_STYLE));

    h.move_to(50.0, 50.0);
    assert!(h.engine.point_styles().is_empty());

    h.move_to(1.0, 1.0);
    h.down(1.0, 1.0);
    assert_eq!(h.committed().len(), 1);
    let polygon = &h.committed()[0];
    assert_eq!(polygon.kind, ShapeKind::Polygon);
    assert!(polygon.is_closed);
    assert_eq!(
        polygon.coordinates,
        vec![c(0.0, 0.0), c(100.0, 0.0), c(100.0, 100.0)]
    );
}

#[test]
fn finish_key_needs_minimum_vertex_count() {
    let mut h = Harness::with_tool(Tool::Polygon);
    h.click(0.0, 0.0);
    h.click(100.0, 0.0);
    h.key(Key::Space);
    assert!(h.committed().is_empty());

    h.click(100.0, 100.0);
    h.key(Key::Space);
    assert_eq!(h.committed().len(), 1);
    assert_eq!(h.committed()[0].coordinates.len(), 3);
}

#[test]
fn polyline_finishes_open() {
    let mut h = Harness::with_tool(Tool::Polyline);
    h.click(0.0, 0.0);
    h.click(50.0, 0.0);
    h.key(Key::Space);

    let polyline = &h.committed()[0];
    assert_eq!(polyline.kind, ShapeKind::Polyline);
    assert!(!polyline.is_closed);
    assert_eq!(polyline.coordinates, vec![c(0.0, 0.0), c(50.0, 0.0)]);
}

#[test]
fn press_on_previous_vertex_adds_nothing() {
    let mut h = Harness::with_tool(Tool::Polyline);
    h.click(0.0, 0.0);
    h.click(50.0, 0.0);
    h.click(51.0, 1.0);
    // Two placed vertices plus look-ahead
    assert_eq!(h.engine.points().len(), 3);
}

#[test]
fn secondary_button_cancels_creation_but_keeps_tool() {
    let mut h = Harness::with_tool(Tool::Polygon);
    h.click(0.0, 0.0);
    h.click(100.0, 0.0);

    h.send(RawEvent::PointerDown {
        at: c(5.0, 5.0),
        button: MouseButton::Right,
    });
    assert!(h.engine.points().is_empty());
    assert!(h.committed().is_empty());
    assert_eq!(h.machine.mode(), Mode::Creation(ShapeKind::Polygon));

    // Fresh shape starts cleanly afterwards
    h.click(10.0, 10.0);
    assert_eq!(h.engine.points().len(), 2);
}

#[test]
fn escape_cancels_creation() {
    let mut h = Harness::with_tool(Tool::Polyline);
    h.click(0.0, 0.0);
    h.key(Key::Escape);
    assert!(h.engine.points().is_empty());
}

#[test]
fn cancel_creation_leaves_inactive() {
    let mut h = Harness::with_tool(Tool::Polygon);
    h.click(0.0, 0.0);
    h.machine.cancel_creation(&mut h.engine);

    assert!(h.engine.points().is_empty());
    assert_eq!(h.machine.mode(), Mode::Inactive);
}

#[test]
fn shapes_can_be_drawn_over_annotations() {
    let mut h = Harness::new(vec![line("a1", 100.0)]);
    h.machine.select_tool(&mut h.engine, Tool::Point);

    // Inside the label box of a1
    h.down(110.0, 90.0);
    assert_eq!(h.committed().len(), 2);
    assert_eq!(h.committed()[1].coordinates, vec![c(110.0, 90.0)]);
}

#[test]
fn switching_tool_mid_shape_starts_from_scratch() {
    let mut h = Harness::with_tool(Tool::Polygon);
    h.click(0.0, 0.0);
    h.click(100.0, 0.0);

    h.machine.select_tool(&mut h.engine, Tool::Line);
    assert!(h.engine.points().is_empty());
    assert_eq!(h.machine.mode(), Mode::Creation(ShapeKind::Line));

    h.click(300.0, 300.0);
    assert!(h.committed().is_empty());
    h.click(400.0, 300.0);

    assert_eq!(h.committed().len(), 1);
    let line = &h.committed()[0];
    assert_eq!(line.kind, ShapeKind::Line);
    assert_eq!(line.coordinates, vec![c(300.0, 300.0), c(400.0, 300.0)]);
    assert!(line.is_well_formed());
}

#[test]
fn press_on_vertex_zero_before_polygon_can_close_is_ignored() {
    let mut h = Harness::with_tool(Tool::Polygon);
    h.click(0.0, 0.0);
    h.click(100.0, 0.0);

    h.click(1.0, 1.0);
    assert!(h.committed().is_empty());
    // Still two placed vertices plus look-ahead
    assert_eq!(h.engine.points().len(), 3);
    assert_eq!(h.engine.points()[0], c(0.0, 0.0));

    h.click(100.0, 100.0);
    h.click(1.0, 1.0);
    assert_eq!(h.committed().len(), 1);
    assert_eq!(
        h.committed()[0].coordinates,
        vec![c(0.0, 0.0), c(100.0, 0.0), c(100.0, 100.0)]
    );
}

// =============================================================================
// Edition
// =============================================================================

#[test]
fn edition_commits_polygon_on_vertex_zero_press() {
    let mut h = Harness::new(vec![polygon_a1()]);
    h.edit("a1");
    assert_eq!(h.engine.points(), polygon_a1().coordinates.as_slice());

    let event = h.down(0.0, 0.0);
    assert!(matches!(
        event,
        SemanticEvent::Pointer {
            phase: PointerPhase::Down,
            target: PointerTarget::ExistingPoints(ref hits),
            ..
        } if hits == &vec![0]
    ));
    assert_eq!(h.machine.mode(), Mode::Edition(ShapeKind::Polygon));

    h.up(0.0, 0.0);
    assert_eq!(h.committed().len(), 1);
    let committed = &h.committed()[0];
    assert_eq!(committed.id, "a1");
    assert_eq!(committed.coordinates.len(), 3);
    assert!(h.engine.edit_target().is_none());
    assert!(h.engine.points().is_empty());
    assert!(h.engine.annotation_styles().has_style(&"a1".to_string(), CLICK_STYLE));
}

#[test]
fn drag_moves_one_vertex_and_reports_live_geometry() {
    let roof = Annotation::new(
        "r",
        "Roof",
        ShapeKind::Polyline,
        vec![c(0.0, 0.0), c(50.0, 50.0), c(100.0, 0.0)],
    );
    let mut h = Harness::new(vec![roof]);
    h.edit("r");

    h.down(50.0, 50.0);
    h.move_to(60.0, 40.0);
    h.move_to(70.0, 30.0);
    assert_eq!(h.engine.points()[1], c(70.0, 30.0));
    assert_eq!(h.machine.host().drag_events(), 2);

    h.up(70.0, 30.0);
    assert!(h.engine.edit_target().is_some());

    h.key(Key::Space);
    let committed = h.machine.host().get("r").cloned();
    assert_eq!(
        committed.map(|a| a.coordinates),
        Some(vec![c(0.0, 0.0), c(70.0, 30.0), c(100.0, 0.0)])
    );
}

#[test]
fn dragged_point_commits_on_release() {
    let pin = Annotation::new("p", "Pin", ShapeKind::Point, vec![c(20.0, 20.0)]);
    let mut h = Harness::new(vec![pin]);
    h.edit("p");

    h.down(21.0, 21.0);
    h.move_to(40.0, 45.0);
    h.up(40.0, 45.0);

    assert_eq!(
        h.machine.host().get("p").map(|a| a.coordinates.clone()),
        Some(vec![c(40.0, 45.0)])
    );
    assert!(h.engine.edit_target().is_none());
}

#[test]
fn stray_drag_input_is_ignored() {
    let mut h = Harness::new(vec![polygon_a1()]);
    h.edit("a1");

    h.move_to(300.0, 300.0);
    h.up(300.0, 300.0);
    assert_eq!(h.engine.points(), polygon_a1().coordinates.as_slice());
    assert!(h.engine.edit_target().is_some());
}

#[test]
fn moved_vertex_zero_does_not_close() {
    let mut h = Harness::new(vec![polygon_a1()]);
    h.edit("a1");

    h.down(0.0, 0.0);
    h.move_to(-5.0, -5.0);
    h.up(-5.0, -5.0);
    assert!(h.engine.edit_target().is_some());
    assert_eq!(h.engine.points()[0], c(-5.0, -5.0));
}

#[test]
fn press_outside_edited_shape_commits_it() {
    let mut h = Harness::new(vec![line("l1", 100.0)]);
    h.edit("l1");

    h.down(200.0, 100.0);
    assert_eq!(h.machine.mode(), Mode::Edition(ShapeKind::Line));
    h.move_to(220.0, 140.0);
    h.up(220.0, 140.0);
    assert!(h.engine.edit_target().is_some());

    h.down(500.0, 500.0);
    assert!(h.engine.edit_target().is_none());
    assert!(h.engine.points().is_empty());
    assert_eq!(
        h.machine.host().get("l1").map(|a| a.coordinates.clone()),
        Some(vec![c(100.0, 100.0), c(220.0, 140.0)])
    );
    assert!(h.engine.annotation_styles().has_style(&"l1".to_string(), CLICK_STYLE));
}

// =============================================================================
// Inactive: hover and selection
// =============================================================================

#[test]
fn hover_and_click_are_exclusive() {
    let mut h = Harness::new(vec![line("a1", 100.0), line("a2", 300.0)]);
    let a1 = "a1".to_string();
    let a2 = "a2".to_string();

    h.move_to(110.0, 90.0);
    assert_eq!(h.engine.annotation_styles().targets_with(HOVER_STYLE), vec![a1.clone()]);

    h.down(110.0, 90.0);
    assert!(h.engine.annotation_styles().has_style(&a1, CLICK_STYLE));
    assert_eq!(h.machine.host().selected(), Some(&a1));

    h.down(110.0, 290.0);
    assert_eq!(h.engine.annotation_styles().targets_with(CLICK_STYLE), vec![a2.clone()]);

    // a2 is selected, so hovering it does not add hover
    h.move_to(110.0, 290.0);
    assert!(h.engine.annotation_styles().targets_with(HOVER_STYLE).is_empty());

    h.move_to(110.0, 90.0);
    h.move_to(500.0, 500.0);
    assert!(h.engine.annotation_styles().targets_with(HOVER_STYLE).is_empty());
}

// =============================================================================
// Engine surface and pure transitions
// =============================================================================

#[test]
fn overlays_draw_after_the_frame() {
    let config = Config::default();
    let mut engine = AnnotationEngine::new(&config);
    let mut surface = RecordingSurface::new();
    let mut handler = |_event: &SemanticEvent, ops: &mut Operations<'_>| {
        ops.draw_on_surface(|surface: &mut dyn DrawSurface| {
            let black = Color::new(0.0, 0.0, 0.0, 1.0);
            surface.fill_text("hint", Coordinate::new(1.0, 2.0), black, TextAlign::Left);
        });
    };

    engine.process(RawEvent::PointerMove { at: c(5.0, 5.0) }, &mut handler, &mut surface);
    assert!(matches!(
        surface.calls.last(),
        Some(Call::Text { text, .. }) if text == "hint"
    ));
}

#[test]
fn closure_handlers_mutate_through_operations() {
    let config = Config::default();
    let mut engine = AnnotationEngine::new(&config);
    let mut surface = RecordingSurface::new();
    let mut handler = |event: &SemanticEvent, ops: &mut Operations<'_>| {
        if let Some(at) = event.position() {
            let index = ops.add_point(at);
            ops.move_point(index + 5, at);
        }
    };

    engine.process(RawEvent::PointerMove { at: c(5.0, 5.0) }, &mut handler, &mut surface);
    engine.process(RawEvent::KeyUp(Key::Space), &mut handler, &mut surface);
    assert_eq!(engine.points(), &[c(5.0, 5.0)]);
}

fn segment_colors(surface: &RecordingSurface) -> Vec<Color> {
    surface
        .calls
        .iter()
        .filter_map(|call| match call {
            Call::Segment { color, .. } => Some(*color),
            _ => None,
        })
        .collect()
}

fn vertex_fills(surface: &RecordingSurface) -> Vec<Color> {
    surface
        .calls
        .iter()
        .filter_map(|call| match call {
            Call::CircleFill { color, .. } => Some(*color),
            _ => None,
        })
        .collect()
}

#[test]
fn annotation_styles_apply_to_several_ids_and_come_off_again() {
    let config = Config::default();
    let mut engine = AnnotationEngine::new(&config);
    engine.set_annotations(vec![line("a1", 100.0), line("a2", 300.0)]);
    let mut surface = RecordingSurface::new();
    let alert = StyleAssignment::new(
        "alert",
        5,
        PartialStyle {
            line: Some(PartialLineStyle {
                stroke_color: Some(RED),
                ..Default::default()
            }),
            ..Default::default()
        },
    );
    let base = config.styles.unselected_style().line.stroke_color;

    let mut assign = |_event: &SemanticEvent, ops: &mut Operations<'_>| {
        ops.set_style_to_annotations(&alert, ["a1".to_string(), "a2".to_string()]);
    };
    engine.process(RawEvent::KeyUp(Key::Space), &mut assign, &mut surface);
    assert_eq!(segment_colors(&surface), vec![RED, RED]);

    let mut remove = |_event: &SemanticEvent, ops: &mut Operations<'_>| {
        ops.remove_style_from_annotations(&["a1".to_string()]);
    };
    engine.process(RawEvent::KeyUp(Key::Space), &mut remove, &mut surface);
    assert_eq!(segment_colors(&surface), vec![base, RED]);
    assert!(!engine.annotation_styles().has_style(&"a1".to_string(), "alert"));
}

#[test]
fn point_styles_apply_to_several_vertices_and_come_off_again() {
    let config = Config::default();
    let mut engine = AnnotationEngine::new(&config);
    let mut surface = RecordingSurface::new();
    let marked = StyleAssignment::new(
        "marked",
        3,
        PartialStyle {
            point: Some(PartialPointStyle {
                fill_color: Some(RED),
                ..Default::default()
            }),
            ..Default::default()
        },
    );
    let base = config.styles.selected_style().point.fill_color;

    let mut assign = |_event: &SemanticEvent, ops: &mut Operations<'_>| {
        for x in [10.0, 20.0, 30.0] {
            ops.add_point(c(x, x));
        }
        ops.set_style_to_points(&marked, [0, 2]);
    };
    engine.process(RawEvent::KeyUp(Key::Space), &mut assign, &mut surface);
    assert_eq!(vertex_fills(&surface), vec![RED, base, RED]);

    let mut remove = |_event: &SemanticEvent, ops: &mut Operations<'_>| {
        ops.remove_style_from_points(&[0]);
    };
    engine.process(RawEvent::KeyUp(Key::Space), &mut remove, &mut surface);
    assert_eq!(vertex_fills(&surface), vec![base, base, RED]);
}

#[test]
fn transition_is_pure_over_the_event_snapshot() {
    let state = EngineState {
        tool: Tool::Line,
        ..Default::default()
    };
    let event = SemanticEvent::Pointer {
        phase: PointerPhase::Down,
        at: c(3.0, 4.0),
        target: PointerTarget::Empty,
        geometry: Vec::new(),
    };

    let (next, ops) = transition(state.clone(), &event, &MachineSettings::default());
    assert_eq!(
        ops,
        vec![Operation::AddPoint(c(3.0, 4.0)), Operation::AddPoint(c(3.0, 4.0))]
    );
    assert_eq!(next.temp_point, Some(1));

    // Same input, same output
    let (again, ops_again) = transition(state, &event, &MachineSettings::default());
    assert_eq!(again, next);
    assert_eq!(ops_again, ops);
}

#[test]
fn stale_look_ahead_index_is_dropped() {
    let state = EngineState {
        tool: Tool::Polygon,
        temp_point: Some(4),
        ..Default::default()
    };
    let event = SemanticEvent::Pointer {
        phase: PointerPhase::Move,
        at: c(3.0, 4.0),
        target: PointerTarget::Empty,
        geometry: Vec::new(),
    };

    let (next, ops) = transition(state, &event, &MachineSettings::default());
    assert!(ops.is_empty());
    assert_eq!(next.temp_point, None);
}

#[test]
fn oversized_line_geometry_never_commits() {
    let state = EngineState {
        tool: Tool::Line,
        ..Default::default()
    };
    let event = SemanticEvent::Pointer {
        phase: PointerPhase::Down,
        at: c(300.0, 300.0),
        target: PointerTarget::Empty,
        geometry: vec![c(0.0, 0.0), c(100.0, 0.0), c(100.0, 0.0)],
    };

    let (_, ops) = transition(state, &event, &MachineSettings::default());
    assert!(
        !ops.iter().any(|op| matches!(op, Operation::Commit { .. })),
        "unexpected commit in {ops:?}"
    );
}
