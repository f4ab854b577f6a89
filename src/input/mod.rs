//! Input handling and the interaction state machine.
//!
//! Raw pointer and keyboard input is classified against the current geometry
//! and the hit regions of the last frame ([`classify`]), then handed to an
//! [`EventHandler`]. [`StateMachine`] is the stock handler: it owns the
//! Inactive / Creation / Edition mode and reports finished shapes to an
//! [`AnnotationHost`].

pub mod classify;
pub mod events;
pub mod state;
pub mod tool;

// Re-export commonly used types at module level
pub use classify::{ClassifyContext, classify, detect_on_existing_points};
pub use events::{
    AnnotationHit, Key, KeyParseError, MouseButton, PointerPhase, PointerTarget, RawEvent,
    SemanticEvent,
};
pub use state::{
    AnnotationEngine, AnnotationHost, EngineState, EventHandler, MachineSettings, MemoryHost,
    Mode, Operation, Operations, StateMachine, transition,
};
pub use tool::Tool;
