//! Abstract 2D drawing surface the renderer draws through.

use super::annotation::Coordinate;
use super::color::Color;
use super::style::{LineStyle, Shadow, TextAlign};
use crate::util::Rect;

/// Minimal set of drawing primitives the renderer needs.
///
/// Implementations ignore drawing failures; a failed primitive only leaves the
/// frame incomplete.
pub trait DrawSurface {
    /// Surface size in pixels.
    fn size(&self) -> (f64, f64);

    /// Clears the whole surface to transparent.
    fn clear(&mut self);

    /// Strokes a straight segment.
    fn stroke_segment(&mut self, start: Coordinate, end: Coordinate, line: &LineStyle);

    /// Strokes a circle outline.
    fn stroke_circle(&mut self, center: Coordinate, radius: f64, width: f64, color: Color);

    /// Fills a disc.
    fn fill_circle(&mut self, center: Coordinate, radius: f64, color: Color);

    /// Fills a rectangle with rounded corners, optionally casting a shadow.
    fn fill_rounded_rect(&mut self, rect: Rect, radius: f64, color: Color, shadow: Option<&Shadow>);

    /// Draws a single line of text whose baseline starts at `origin`.
    fn fill_text(&mut self, text: &str, origin: Coordinate, color: Color, align: TextAlign);

    /// Advance width of `text` in the label font.
    fn measure_text(&self, text: &str) -> f64;
}

/// Surface without pixels: draws nothing, measures with a fixed advance.
///
/// Lets the engine run and hit-test without a graphics backend.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    width: f64,
    height: f64,
}

/// Per-character advance used by [`HeadlessSurface`] when measuring text.
const HEADLESS_CHAR_ADVANCE: f64 = 7.0;

impl HeadlessSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl DrawSurface for HeadlessSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self) {}

    fn stroke_segment(&mut self, _start: Coordinate, _end: Coordinate, _line: &LineStyle) {}

    fn stroke_circle(&mut self, _center: Coordinate, _radius: f64, _width: f64, _color: Color) {}

    fn fill_circle(&mut self, _center: Coordinate, _radius: f64, _color: Color) {}

    fn fill_rounded_rect(
        &mut self,
        _rect: Rect,
        _radius: f64,
        _color: Color,
        _shadow: Option<&Shadow>,
    ) {
    }

    fn fill_text(&mut self, _text: &str, _origin: Coordinate, _color: Color, _align: TextAlign) {}

    fn measure_text(&self, text: &str) -> f64 {
        text.chars().count() as f64 * HEADLESS_CHAR_ADVANCE
    }
}
