//! Library exports for embedding the shapescriber annotation engine.
//!
//! Hosts drive [`input::AnnotationEngine`] with raw pointer and key events and
//! supply an [`input::EventHandler`]; [`input::StateMachine`] is the stock
//! policy for creating, editing, hovering and selecting shapes.

pub mod config;
pub mod draw;
pub mod input;
pub mod output;
pub mod script;
pub mod util;

pub use config::Config;
