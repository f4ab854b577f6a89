mod core;
mod handler;
mod host;
mod machine;
mod mouse;
mod operations;
mod render;
#[cfg(test)]
mod tests;
mod transition;

pub use self::core::AnnotationEngine;
pub use handler::EventHandler;
pub use host::{AnnotationHost, MemoryHost};
pub use machine::StateMachine;
pub use operations::{Operations, Overlay};
pub use transition::{
    EditTarget, EngineState, MachineSettings, Mode, Operation, StyleRole, transition,
};
