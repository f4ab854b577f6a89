//! Scripted sessions: a JSON list of tool selections, edit targets and input
//! events replayed through the engine and the stock state machine.
//!
//! ```json
//! {
//!   "annotations": [],
//!   "steps": [
//!     { "action": "tool", "tool": "line" },
//!     { "action": "click", "x": 10, "y": 10 },
//!     { "action": "click", "x": 50, "y": 50 }
//!   ]
//! }
//! ```

use crate::config::Config;
use crate::draw::{Annotation, AnnotationId, Coordinate, DrawSurface};
use crate::input::{
    AnnotationEngine, AnnotationHost, Key, MemoryHost, MouseButton, RawEvent, StateMachine, Tool,
};
use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A scripted session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Script {
    /// Committed annotations present before the first step
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Select the drawing tool; uncommitted vertices are discarded
    Tool { tool: Tool },
    /// Start editing the annotation with this id
    Edit { id: AnnotationId },
    /// Stop editing without committing
    StopEditing,
    Down {
        x: f64,
        y: f64,
        #[serde(default)]
        button: MouseButton,
    },
    Move {
        x: f64,
        y: f64,
    },
    Up {
        x: f64,
        y: f64,
        #[serde(default)]
        button: MouseButton,
    },
    /// Primary-button down and up at the same position
    Click { x: f64, y: f64 },
    /// Key down and up
    Key { key: String },
    KeyDown { key: String },
    KeyUp { key: String },
    /// Abort the shape in progress
    Cancel,
}

impl Script {
    pub fn from_json(source: &str) -> Result<Self> {
        serde_json::from_str(source).context("Invalid session script")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::from_json(&source).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

/// Replays `script` and returns the committed annotations afterwards.
///
/// The final frame is left drawn on `surface`.
pub fn replay(
    script: &Script,
    config: &Config,
    surface: &mut dyn DrawSurface,
) -> Result<Vec<Annotation>> {
    let host = MemoryHost::with_annotations(script.annotations.clone());
    let mut engine = AnnotationEngine::new(config);
    engine.set_annotations(host.annotations().to_vec());
    let mut machine = StateMachine::new(config, host);
    engine.render(surface);

    for (index, step) in script.steps.iter().enumerate() {
        log::debug!("Step {}: {:?}", index + 1, step);
        run_step(step, &mut engine, &mut machine, surface)
            .with_context(|| format!("Step {} ({:?}) failed", index + 1, step))?;
    }

    if let Some(target) = engine.edit_target() {
        log::warn!("Script ended while annotation {} was still being edited", target.id);
    }

    Ok(machine.into_host().into_annotations())
}

fn run_step(
    step: &Step,
    engine: &mut AnnotationEngine,
    machine: &mut StateMachine<MemoryHost>,
    surface: &mut dyn DrawSurface,
) -> Result<()> {
    let events = match step {
        Step::Tool { tool } => {
            machine.select_tool(engine, *tool);
            Vec::new()
        }
        Step::Edit { id } => {
            let annotation = machine
                .host()
                .get(id)
                .cloned()
                .ok_or_else(|| anyhow!("No annotation with id '{}'", id))?;
            engine.set_annotation_to_edit(Some(annotation));
            Vec::new()
        }
        Step::StopEditing => {
            engine.set_annotation_to_edit(None);
            Vec::new()
        }
        Step::Cancel => {
            machine.cancel_creation(engine);
            Vec::new()
        }
        Step::Down { x, y, button } => vec![RawEvent::PointerDown {
            at: Coordinate::new(*x, *y),
            button: *button,
        }],
        Step::Move { x, y } => vec![RawEvent::PointerMove {
            at: Coordinate::new(*x, *y),
        }],
        Step::Up { x, y, button } => vec![RawEvent::PointerUp {
            at: Coordinate::new(*x, *y),
            button: *button,
        }],
        Step::Click { x, y } => {
            let at = Coordinate::new(*x, *y);
            let button = MouseButton::Left;
            vec![
                RawEvent::PointerDown { at, button },
                RawEvent::PointerUp { at, button },
            ]
        }
        Step::Key { key } => {
            let key = Key::from_name(key)?;
            vec![RawEvent::KeyDown(key), RawEvent::KeyUp(key)]
        }
        Step::KeyDown { key } => vec![RawEvent::KeyDown(Key::from_name(key)?)],
        Step::KeyUp { key } => vec![RawEvent::KeyUp(Key::from_name(key)?)],
    };

    if events.is_empty() {
        engine.render(surface);
    }
    for raw in events {
        engine.process(raw, machine, surface);
    }
    Ok(())
}
