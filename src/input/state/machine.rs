//! Interaction policy: runs [`transition`] and applies its operations.

use super::AnnotationEngine;
use super::handler::EventHandler;
use super::host::AnnotationHost;
use super::operations::Operations;
use super::transition::{
    EditTarget, EngineState, MachineSettings, Mode, Operation, StyleRole, transition,
};
use crate::config::Config;
use crate::draw::{PartialStyle, StyleAssignment};
use crate::input::events::SemanticEvent;
use crate::input::tool::Tool;

/// Named styles the machine assigns, taken from configuration.
#[derive(Debug, Clone)]
struct Roles {
    hover: StyleAssignment,
    click: StyleAssignment,
    highlight: StyleAssignment,
    edit: PartialStyle,
}

impl Roles {
    fn get(&self, role: StyleRole) -> &StyleAssignment {
        match role {
            StyleRole::Hover => &self.hover,
            StyleRole::Click => &self.click,
            StyleRole::Highlight => &self.highlight,
        }
    }
}

/// Event handler driving creation, edition, hover and selection.
///
/// Commits, drags, selections and cancellations are reported to the host `H`.
pub struct StateMachine<H: AnnotationHost> {
    state: EngineState,
    settings: MachineSettings,
    roles: Roles,
    host: H,
}

impl<H: AnnotationHost> StateMachine<H> {
    pub fn new(config: &Config, host: H) -> Self {
        Self {
            state: EngineState::default(),
            settings: MachineSettings::from_config(config),
            roles: Roles {
                hover: config.styles.hover_assignment(),
                click: config.styles.click_assignment(),
                highlight: config.styles.highlight_assignment(),
                edit: config.styles.edit.clone(),
            },
            host,
        }
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Selects the tool used for new shapes.
    ///
    /// Uncommitted vertices of a shape in progress are discarded, so the new
    /// tool always starts from an empty vertex list. The geometry of an
    /// annotation under edition is left alone.
    pub fn select_tool(&mut self, engine: &mut AnnotationEngine, tool: Tool) {
        log::debug!("Tool selected: {:?}", tool);
        if engine.edit_target().is_none() {
            engine.cancel_creation();
        }
        self.state.tool = tool;
        self.state.temp_point = None;
        self.state.closing_hint = false;
    }

    /// Aborts in-progress geometry; without an edit target the machine goes Inactive.
    pub fn cancel_creation(&mut self, engine: &mut AnnotationEngine) {
        engine.cancel_creation();
        self.state.temp_point = None;
        self.state.drag_point = None;
        self.state.drag_moved = false;
        self.state.closing_hint = false;
        if engine.edit_target().is_none() {
            self.state.tool = Tool::Inactive;
        }
        self.host.creation_cancelled();
    }

    /// Mirrors the engine's edit target into the machine state.
    fn sync_edit_target(&mut self, ops: &Operations<'_>) {
        let target = ops.edit_target().map(|annotation| EditTarget {
            id: annotation.id.clone(),
            kind: annotation.inferred_kind(),
        });
        if self.state.editing != target {
            self.state.editing = target;
            self.state.drag_point = None;
            self.state.drag_moved = false;
            self.state.temp_point = None;
        }
    }

    fn apply(&mut self, operation: Operation, ops: &mut Operations<'_>) {
        match operation {
            Operation::AddPoint(at) => {
                ops.add_point(at);
            }
            Operation::MovePoint(index, to) => ops.move_point(index, to),
            Operation::Commit { coordinates, kind } => {
                ops.finish_current_line();
                let edited = self.state.editing.take().map(|target| target.id);
                let id = self.host.annotation_ended(edited.as_ref(), coordinates, kind);

                ops.set_annotations(self.host.annotations().to_vec());
                if edited.is_some() {
                    ops.set_annotation_to_edit(None);
                }
                ops.remove_styles_by_name(&self.roles.click.name);
                ops.set_style_exclusively(&self.roles.click, id);
            }
            Operation::Cancel => {
                ops.finish_current_line();
                if self.state.editing.take().is_some() {
                    ops.set_annotation_to_edit(None);
                }
                self.host.creation_cancelled();
            }
            Operation::Dragged(coordinates) => {
                if let Some(target) = &self.state.editing {
                    self.host.annotation_dragged(&target.id, &coordinates);
                }
            }
            Operation::AssignRole(role, id) => {
                if role == StyleRole::Click {
                    self.host.annotation_selected(&id);
                }
                ops.set_style_exclusively(self.roles.get(role), id);
            }
            Operation::ClearRole(role) => ops.remove_styles_by_name(&self.roles.get(role).name),
            Operation::HighlightPoint(index) => {
                ops.set_point_style_exclusively(&self.roles.highlight, index);
            }
            Operation::ClearPointStyles => ops.clear_point_styles(),
        }
    }
}

impl<H: AnnotationHost> EventHandler for StateMachine<H> {
    fn handle(&mut self, event: &SemanticEvent, ops: &mut Operations<'_>) {
        self.sync_edit_target(ops);
        ops.set_style_for_annotation_to_edit(self.roles.edit.clone());

        let (state, operations) =
            transition(std::mem::take(&mut self.state), event, &self.settings);
        self.state = state;

        for operation in operations {
            self.apply(operation, ops);
        }
    }
}
