//! Raw input and the semantic events the classifier turns it into.

use crate::draw::{AnnotationId, Coordinate, PointId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Generic key representation.
///
/// Hosts map their native key codes to these values; configuration refers to
/// them by name (see [`Key::from_name`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    /// Escape key
    Escape,
    /// Return/Enter key
    Return,
    /// Backspace key
    Backspace,
    /// Tab key
    Tab,
    /// Space bar
    Space,
    /// Delete key
    Delete,
    /// Shift modifier
    Shift,
    /// Ctrl modifier
    Ctrl,
    /// Alt modifier
    Alt,
    /// Unmapped or unrecognized key
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    #[error("empty key name")]
    Empty,
    #[error("unknown key name '{0}'")]
    Unknown(String),
}

impl Key {
    /// Parses a key name such as "space", "Escape", "Return" or a single character.
    pub fn from_name(name: &str) -> Result<Self, KeyParseError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(KeyParseError::Empty);
        }

        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(if c == ' ' { Key::Space } else { Key::Char(c) });
        }

        match name.to_lowercase().as_str() {
            "space" => Ok(Key::Space),
            "escape" | "esc" => Ok(Key::Escape),
            "return" | "enter" => Ok(Key::Return),
            "backspace" => Ok(Key::Backspace),
            "tab" => Ok(Key::Tab),
            "delete" | "del" => Ok(Key::Delete),
            "shift" => Ok(Key::Shift),
            "ctrl" | "control" => Ok(Key::Ctrl),
            "alt" => Ok(Key::Alt),
            _ => Err(KeyParseError::Unknown(name.to_string())),
        }
    }
}

/// Mouse button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    /// Primary button (placing and dragging vertices)
    #[default]
    Left,
    /// Secondary button (context menu, cancels creation)
    Right,
    /// Middle button (ignored)
    Middle,
}

/// A pointer or keyboard occurrence as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawEvent {
    PointerDown { at: Coordinate, button: MouseButton },
    PointerMove { at: Coordinate },
    PointerUp { at: Coordinate, button: MouseButton },
    KeyDown(Key),
    KeyUp(Key),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// A committed annotation under the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationHit {
    pub id: AnnotationId,
    /// Names of the style overrides the annotation currently holds
    pub styles: Vec<String>,
}

impl AnnotationHit {
    pub fn has_style(&self, name: &str) -> bool {
        self.styles.iter().any(|style| style == name)
    }
}

/// What a pointer event landed on, in classification priority order.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerTarget {
    /// Label or body of one or more committed annotations
    Annotations(Vec<AnnotationHit>),
    /// One or more vertices of the edited geometry (several when they coincide)
    ExistingPoints(Vec<PointId>),
    /// Nothing in particular
    Empty,
}

/// A classified input event.
///
/// Every variant carries a snapshot of the edited geometry at classification
/// time, look-ahead vertex included.
#[derive(Debug, Clone, PartialEq)]
pub enum SemanticEvent {
    Pointer {
        phase: PointerPhase,
        at: Coordinate,
        target: PointerTarget,
        geometry: Vec<Coordinate>,
    },
    /// Secondary-button press
    ContextMenu {
        at: Coordinate,
        geometry: Vec<Coordinate>,
    },
    KeyDown {
        key: Key,
        geometry: Vec<Coordinate>,
    },
    KeyUp {
        key: Key,
        geometry: Vec<Coordinate>,
    },
}

impl SemanticEvent {
    pub fn geometry(&self) -> &[Coordinate] {
        match self {
            SemanticEvent::Pointer { geometry, .. }
            | SemanticEvent::ContextMenu { geometry, .. }
            | SemanticEvent::KeyDown { geometry, .. }
            | SemanticEvent::KeyUp { geometry, .. } => geometry,
        }
    }

    /// Pointer position, if this is a pointer event.
    pub fn position(&self) -> Option<Coordinate> {
        match self {
            SemanticEvent::Pointer { at, .. } | SemanticEvent::ContextMenu { at, .. } => Some(*at),
            SemanticEvent::KeyDown { .. } | SemanticEvent::KeyUp { .. } => None,
        }
    }
}
