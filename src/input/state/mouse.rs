use crate::config::CLICK_STYLE;
use crate::draw::{Coordinate, ShapeKind};
use crate::input::events::{AnnotationHit, PointerPhase, PointerTarget};

use super::transition::{Mode, Operation, StyleRole, Transition};

impl Transition {
    /// Dispatches a pointer event according to the current mode.
    pub(super) fn on_pointer(
        &mut self,
        mode: Mode,
        phase: PointerPhase,
        at: Coordinate,
        target: &PointerTarget,
    ) {
        match mode {
            Mode::Inactive => self.on_inactive_pointer(phase, target),
            Mode::Creation(kind) => self.on_creation_pointer(kind, phase, at, target),
            Mode::Edition(kind) => self.on_edition_pointer(kind, phase, at, target),
        }
    }

    // =========================================================================
    // Inactive: hover and select
    // =========================================================================

    fn on_inactive_pointer(&mut self, phase: PointerPhase, target: &PointerTarget) {
        match (phase, target) {
            (PointerPhase::Down, PointerTarget::Annotations(hits)) => {
                if let Some(hit) = hits.first() {
                    self.ops
                        .push(Operation::AssignRole(StyleRole::Click, hit.id.clone()));
                }
            }
            (PointerPhase::Move, PointerTarget::Annotations(hits)) => {
                match hits.iter().find(|hit| !hit.has_style(CLICK_STYLE)) {
                    Some(AnnotationHit { id, .. }) => {
                        if self.state.hovered.as_ref() != Some(id) {
                            self.ops
                                .push(Operation::AssignRole(StyleRole::Hover, id.clone()));
                            self.state.hovered = Some(id.clone());
                        }
                    }
                    None => self.clear_hover(),
                }
            }
            (PointerPhase::Move, _) => self.clear_hover(),
            _ => {}
        }
    }

    fn clear_hover(&mut self) {
        if self.state.hovered.take().is_some() {
            self.ops.push(Operation::ClearRole(StyleRole::Hover));
        }
    }

    // =========================================================================
    // Creation: place vertices, preview the next one, close polygons
    // =========================================================================

    fn on_creation_pointer(
        &mut self,
        kind: ShapeKind,
        phase: PointerPhase,
        at: Coordinate,
        target: &PointerTarget,
    ) {
        // Annotations under the pointer do not block drawing over them
        let vertices: &[usize] = match target {
            PointerTarget::ExistingPoints(vertices) => vertices,
            PointerTarget::Annotations(_) | PointerTarget::Empty => &[],
        };

        match phase {
            PointerPhase::Down => {
                if self.can_close_on(kind, vertices) {
                    self.commit(kind);
                } else if self.on_last_placed_vertex(vertices) {
                    log::debug!("Pointer down still on the previous vertex, ignored");
                } else if kind.closes_on_first_point() && vertices.contains(&0) {
                    log::debug!(
                        "Pointer down on vertex 0 before the {:?} can close, ignored",
                        kind
                    );
                } else {
                    self.place_vertex(kind, at);
                }
            }
            PointerPhase::Move => {
                if let Some(temp) = self.state.temp_point {
                    self.move_point(temp, at);
                }
                if self.can_close_on(kind, vertices) {
                    if !self.state.closing_hint {
                        self.ops.push(Operation::HighlightPoint(0));
                        self.state.closing_hint = true;
                    }
                } else if self.state.closing_hint {
                    self.ops.push(Operation::ClearPointStyles);
                    self.state.closing_hint = false;
                }
            }
            PointerPhase::Up => {
                if kind.is_complete(self.placed()) {
                    self.commit(kind);
                }
            }
        }
    }

    /// Whether a press on `vertices` closes the shape on vertex 0.
    fn can_close_on(&self, kind: ShapeKind, vertices: &[usize]) -> bool {
        kind.closes_on_first_point()
            && vertices.contains(&0)
            && kind.ready_for_manual_finish(self.placed(), false)
    }

    fn on_last_placed_vertex(&self, vertices: &[usize]) -> bool {
        self.placed()
            .checked_sub(1)
            .is_some_and(|last| vertices.contains(&last))
    }

    /// Validates a vertex at `at`, then either completes the shape or adds a
    /// new look-ahead vertex.
    fn place_vertex(&mut self, kind: ShapeKind, at: Coordinate) {
        match self.state.temp_point.take() {
            Some(temp) => self.move_point(temp, at),
            None => {
                self.add_point(at);
            }
        }

        if kind.is_complete(self.placed()) {
            self.commit(kind);
        } else {
            let temp = self.add_point(at);
            self.state.temp_point = Some(temp);
        }
    }

    // =========================================================================
    // Edition: drag vertices
    // =========================================================================

    fn on_edition_pointer(
        &mut self,
        kind: ShapeKind,
        phase: PointerPhase,
        at: Coordinate,
        target: &PointerTarget,
    ) {
        match phase {
            PointerPhase::Down => match target {
                PointerTarget::ExistingPoints(vertices) => {
                    self.state.drag_point = vertices.first().copied();
                    self.state.drag_moved = false;
                }
                // A press outside the edited shape finishes the edition
                PointerTarget::Empty | PointerTarget::Annotations(_) => {
                    if self.points.len() >= kind.min_points() {
                        self.commit(kind);
                    }
                }
            },
            PointerPhase::Move => {
                if let Some(index) = self.state.drag_point {
                    self.move_point(index, at);
                    self.state.drag_moved = true;
                    self.ops.push(Operation::Dragged(self.points.clone()));
                }
            }
            PointerPhase::Up => {
                let Some(index) = self.state.drag_point.take() else {
                    log::debug!("Pointer up without a dragged vertex, ignored");
                    return;
                };
                let moved = std::mem::take(&mut self.state.drag_moved);

                let closes = kind.closes_on_first_point()
                    && index == 0
                    && !moved
                    && self.points.len() >= kind.min_points();
                if kind == ShapeKind::Point || closes {
                    self.commit(kind);
                }
            }
        }
    }
}
