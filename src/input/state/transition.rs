//! Pure state transitions: `(EngineState, SemanticEvent) -> (EngineState, [Operation])`.
//!
//! Nothing here touches an engine or a surface. The working geometry comes
//! from the snapshot carried by the event, and every effect is returned as an
//! [`Operation`] for the caller to apply.

use crate::config::Config;
use crate::draw::{AnnotationId, Coordinate, PointId, ShapeKind};
use crate::input::events::{Key, SemanticEvent};
use crate::input::tool::Tool;

/// Mode of the interaction, derived from the edit target and the active tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// No edit target and no shape tool: hover and select only
    Inactive,
    /// Building a new shape with the active tool
    Creation(ShapeKind),
    /// Modifying the vertices of an existing annotation
    Edition(ShapeKind),
}

/// The annotation being edited and the kind inferred from its geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTarget {
    pub id: AnnotationId,
    pub kind: ShapeKind,
}

/// Machine-owned interaction state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineState {
    pub tool: Tool,
    pub editing: Option<EditTarget>,
    /// Vertex following the pointer while dragging (Edition)
    pub drag_point: Option<PointId>,
    /// Whether the dragged vertex moved since it was pressed
    pub drag_moved: bool,
    /// Look-ahead vertex previewing the next segment (Creation)
    pub temp_point: Option<PointId>,
    /// Whether vertex 0 currently shows the closing hint
    pub closing_hint: bool,
    /// Annotation holding the hover style (Inactive)
    pub hovered: Option<AnnotationId>,
}

impl EngineState {
    pub fn mode(&self) -> Mode {
        match (&self.editing, self.tool.shape_kind()) {
            (Some(target), _) => Mode::Edition(target.kind),
            (None, Some(kind)) => Mode::Creation(kind),
            (None, None) => Mode::Inactive,
        }
    }

    /// Forgets vertex indexes that no longer exist in `geometry`.
    ///
    /// The working list can be cleared behind the machine's back (cancel,
    /// edit target change), so indexes are re-validated on every event.
    fn sanitized(mut self, geometry: &[Coordinate]) -> Self {
        let creating = matches!(self.mode(), Mode::Creation(_));
        if self
            .temp_point
            .is_some_and(|index| !creating || index + 1 != geometry.len())
        {
            self.temp_point = None;
        }
        if self.drag_point.is_some_and(|index| index >= geometry.len()) {
            self.drag_point = None;
            self.drag_moved = false;
        }
        if geometry.is_empty() {
            self.closing_hint = false;
        }
        self
    }
}

/// Named styles the machine asks the caller to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleRole {
    Hover,
    Click,
    Highlight,
}

/// One effect of a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    AddPoint(Coordinate),
    MovePoint(PointId, Coordinate),
    /// Finish the shape: clear the working list and hand the geometry to the host
    Commit {
        coordinates: Vec<Coordinate>,
        kind: ShapeKind,
    },
    /// Abort the uncommitted geometry
    Cancel,
    /// Live geometry of the edited annotation during a drag
    Dragged(Vec<Coordinate>),
    /// Move `role` exclusively to an annotation
    AssignRole(StyleRole, AnnotationId),
    /// Remove `role` from every annotation
    ClearRole(StyleRole),
    /// Mark vertex 0 as the closing target
    HighlightPoint(PointId),
    ClearPointStyles,
}

/// Key bindings the machine reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineSettings {
    pub finish_keys: Vec<Key>,
    pub cancel_keys: Vec<Key>,
}

impl Default for MachineSettings {
    fn default() -> Self {
        Self {
            finish_keys: vec![Key::Space],
            cancel_keys: vec![Key::Escape],
        }
    }
}

impl MachineSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            finish_keys: config.finish_keys(),
            cancel_keys: config.cancel_keys(),
        }
    }
}

/// Computes the next state and the operations `event` calls for.
///
/// Out-of-order input (a drag move without a pressed vertex, a finish key
/// with too few vertices) yields no operation.
pub fn transition(
    state: EngineState,
    event: &SemanticEvent,
    settings: &MachineSettings,
) -> (EngineState, Vec<Operation>) {
    let geometry = event.geometry();
    let mut step = Transition {
        state: state.sanitized(geometry),
        points: geometry.to_vec(),
        ops: Vec::new(),
    };

    let mode = step.state.mode();
    if mode != Mode::Inactive && step.state.hovered.take().is_some() {
        step.ops.push(Operation::ClearRole(StyleRole::Hover));
    }

    match event {
        SemanticEvent::Pointer {
            phase, at, target, ..
        } => step.on_pointer(mode, *phase, *at, target),
        SemanticEvent::ContextMenu { .. } => step.on_cancel(mode),
        SemanticEvent::KeyUp { key, .. } => {
            if settings.finish_keys.contains(key) {
                step.on_finish_key(mode);
            } else if settings.cancel_keys.contains(key) {
                step.on_cancel(mode);
            }
        }
        SemanticEvent::KeyDown { .. } => {}
    }

    (step.state, step.ops)
}

/// Working copy of one transition.
pub(super) struct Transition {
    pub(super) state: EngineState,
    /// Geometry as it will be once `ops` are applied
    pub(super) points: Vec<Coordinate>,
    pub(super) ops: Vec<Operation>,
}

impl Transition {
    /// Vertices that count towards completion (look-ahead excluded).
    pub(super) fn placed(&self) -> usize {
        self.points.len() - usize::from(self.state.temp_point.is_some())
    }

    pub(super) fn add_point(&mut self, at: Coordinate) -> PointId {
        self.points.push(at);
        self.ops.push(Operation::AddPoint(at));
        self.points.len() - 1
    }

    pub(super) fn move_point(&mut self, index: PointId, to: Coordinate) {
        if let Some(point) = self.points.get_mut(index) {
            *point = to;
            self.ops.push(Operation::MovePoint(index, to));
        }
    }

    /// Commits the working geometry minus the look-ahead vertex.
    ///
    /// Geometry whose vertex count does not fit `kind` is never committed.
    pub(super) fn commit(&mut self, kind: ShapeKind) {
        if !kind.accepts_vertex_count(self.placed()) {
            log::warn!(
                "Refusing to commit {:?} with {} vertices",
                kind,
                self.placed()
            );
            return;
        }
        if let Some(temp) = self.state.temp_point.take() {
            self.points.remove(temp);
        }
        let coordinates = std::mem::take(&mut self.points);
        log::debug!("Completing {:?} with {} vertices", kind, coordinates.len());
        self.ops.push(Operation::Commit { coordinates, kind });
        self.reset_working_state();
    }

    fn reset_working_state(&mut self) {
        self.state.temp_point = None;
        self.state.drag_point = None;
        self.state.drag_moved = false;
        self.state.closing_hint = false;
    }

    fn on_finish_key(&mut self, mode: Mode) {
        let (kind, editing) = match mode {
            Mode::Creation(kind) => (kind, false),
            Mode::Edition(kind) => (kind, true),
            Mode::Inactive => return,
        };
        if kind.ready_for_manual_finish(self.placed(), editing) {
            self.commit(kind);
        } else {
            log::debug!(
                "Finish ignored: {:?} with {} vertices is not ready",
                kind,
                self.placed()
            );
        }
    }

    fn on_cancel(&mut self, mode: Mode) {
        match mode {
            Mode::Inactive => {}
            Mode::Creation(_) if self.points.is_empty() => {}
            Mode::Creation(_) | Mode::Edition(_) => {
                self.points.clear();
                self.ops.push(Operation::Cancel);
                self.reset_working_state();
            }
        }
    }
}
