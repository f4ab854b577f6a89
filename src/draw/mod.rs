//! Geometry and style model, hit-test regions and rendering.
//!
//! This module defines the data the engine works on and how it is drawn:
//! - [`Annotation`], [`Coordinate`], [`ShapeKind`]: committed vector shapes
//! - [`AnnotationStyle`], [`PartialStyle`], [`StyleTable`]: styles and overrides
//! - [`Region`], [`PathCache`]: hit-test geometry produced by rendering
//! - [`DrawSurface`], [`Renderer`]: the abstract surface and the frame renderer

pub mod annotation;
pub mod cairo_surface;
pub mod color;
pub mod font;
pub mod frame;
pub mod region;
pub mod render;
pub mod style;
pub mod style_table;
pub mod surface;

// Re-export commonly used types at module level
pub use annotation::{Annotation, AnnotationId, Coordinate, PointId, ShapeKind};
pub use cairo_surface::CairoSurface;
pub use color::Color;
pub use font::LabelFont;
pub use frame::{EditedShape, Frame};
pub use region::{AnnotationPaths, PathCache, Region, point_in_cached_region, point_in_stroke_region};
pub use render::{LabelMetrics, Renderer};
pub use style::{AnnotationStyle, PartialStyle};
pub use style_table::{StyleAssignment, StyleTable};
pub use surface::{DrawSurface, HeadlessSurface};
