//! Frame rendering: committed annotations, their labels and the edited shape.
//!
//! Every pass clears the surface and returns a fresh [`PathCache`] describing
//! where each committed annotation ended up, for the next round of hit-testing.

use super::annotation::{Annotation, Coordinate};
use super::frame::{EditedShape, Frame};
use super::region::{AnnotationPaths, PathCache, Region, ShapeRegions};
use super::style::{AnnotationStyle, LabelStyle, LineStyle, PointStyle, TextAlign};
use super::surface::DrawSurface;
use crate::config::Config;
use crate::util::{self, Rect};

/// Space between a point annotation's outer ring and its label box.
const POINT_LABEL_GAP: f64 = 2.0;

/// Distance from the label box bottom to the text baseline.
const LABEL_BASELINE_INSET: f64 = 5.0;

/// Horizontal inset of label text inside its box.
const LABEL_TEXT_INSET: f64 = 4.0;

/// Label box geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelMetrics {
    pub height: f64,
    pub corner_radius: f64,
    /// Extra width added to the measured text
    pub padding: f64,
}

impl Default for LabelMetrics {
    fn default() -> Self {
        Self {
            height: 20.0,
            corner_radius: 10.0,
            padding: 10.0,
        }
    }
}

/// Stateless frame renderer configured with the base style of committed shapes.
#[derive(Debug, Clone)]
pub struct Renderer {
    /// Style of committed annotations before overrides
    pub base_style: AnnotationStyle,
    pub label: LabelMetrics,
    /// Minimum stroke width used for segment hit regions
    pub stroke_hit_width: f64,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            base_style: AnnotationStyle::unselected(),
            label: LabelMetrics::default(),
            stroke_hit_width: 8.0,
        }
    }
}

impl Renderer {
    pub fn from_config(config: &Config) -> Self {
        Self {
            base_style: config.styles.unselected_style(),
            label: LabelMetrics {
                height: config.label.box_height,
                corner_radius: config.label.corner_radius,
                padding: config.label.padding,
            },
            stroke_hit_width: config.engine.stroke_hit_width,
        }
    }

    /// Clears the surface and draws one full frame.
    ///
    /// Committed annotations come first (the edit target is skipped), then the
    /// edited shape on top. Returns the hit regions of every committed
    /// annotation drawn.
    pub fn render_frame(&self, surface: &mut dyn DrawSurface, frame: &Frame<'_>) -> PathCache {
        surface.clear();

        let mut cache = PathCache::new();
        for annotation in frame.committed() {
            let style = frame.styles.resolve(&self.base_style, &annotation.id);
            if let Some(paths) = self.draw_annotation(surface, annotation, &style) {
                cache.insert(annotation.id.clone(), paths);
            }
        }

        self.draw_edited_shape(surface, &frame.edited);

        log::trace!("Rendered frame with {} cached annotation paths", cache.len());
        cache
    }

    fn draw_annotation(
        &self,
        surface: &mut dyn DrawSurface,
        annotation: &Annotation,
        style: &AnnotationStyle,
    ) -> Option<AnnotationPaths> {
        let points = &annotation.coordinates;
        match points.as_slice() {
            [] => None,
            [point] => {
                draw_point(surface, *point, &style.point);
                let shape = ShapeRegions::Point(Region::circle(
                    *point,
                    style.point.outer_radius,
                    style.point.stroke_width,
                ));

                let text_width = surface.measure_text(&annotation.name);
                let box_width = text_width + self.label.padding;
                let bottom = point.y - style.point.outer_radius - POINT_LABEL_GAP;
                let rect = Rect::new(
                    point.x - box_width / 2.0,
                    bottom - self.label.height,
                    box_width,
                    self.label.height,
                );
                let label = self.draw_label(surface, &annotation.name, rect, &style.label);
                Some(AnnotationPaths { label, shape })
            }
            _ => {
                let segments = segment_pairs(points, annotation.is_closed && points.len() > 2)
                    .map(|(start, end)| {
                        surface.stroke_segment(start, end, &style.line);
                        self.segment_region(start, end, &style.line)
                    })
                    .collect();

                let anchor = util::topmost_vertex(points).map_or(points[0], |index| points[index]);
                let text_width = surface.measure_text(&annotation.name);
                let rect = Rect::new(
                    anchor.x - LABEL_TEXT_INSET / 2.0,
                    anchor.y - self.label.height,
                    text_width + self.label.padding,
                    self.label.height,
                );
                let label = self.draw_label(surface, &annotation.name, rect, &style.label);
                Some(AnnotationPaths {
                    label,
                    shape: ShapeRegions::Segments(segments),
                })
            }
        }
    }

    fn draw_edited_shape(&self, surface: &mut dyn DrawSurface, edited: &EditedShape<'_>) {
        let points = edited.points;
        if points.is_empty() {
            return;
        }

        for (start, end) in segment_pairs(points, edited.draws_closing_segment()) {
            surface.stroke_segment(start, end, &edited.style.line);
        }

        for (index, point) in points.iter().enumerate() {
            let style = edited.point_styles.resolve(edited.style, &index);
            draw_point(surface, *point, &style.point);
        }
    }

    fn segment_region(&self, start: Coordinate, end: Coordinate, line: &LineStyle) -> Region {
        Region::segment(start, end, line.width.max(self.stroke_hit_width))
    }

    /// Draws a label box and its text; returns the box region.
    fn draw_label(
        &self,
        surface: &mut dyn DrawSurface,
        text: &str,
        rect: Rect,
        style: &LabelStyle,
    ) -> Region {
        let rect = keep_on_surface(rect, surface.size());
        let shadow = style.shadow.is_visible().then_some(&style.shadow);
        surface.fill_rounded_rect(rect, self.label.corner_radius, style.fill_color, shadow);

        let baseline = rect.y + rect.height - LABEL_BASELINE_INSET;
        let x = match style.text_align {
            TextAlign::Left => rect.x + LABEL_TEXT_INSET,
            TextAlign::Center => rect.x + rect.width / 2.0,
            TextAlign::Right => rect.x + rect.width - LABEL_TEXT_INSET,
        };
        surface.fill_text(text, Coordinate::new(x, baseline), style.text_color, style.text_align);

        Region::rounded_rect(rect, self.label.corner_radius)
    }
}

/// Shifts `rect` so it lies inside a surface of `size`, as far as it fits.
fn keep_on_surface(rect: Rect, (width, height): (f64, f64)) -> Rect {
    Rect {
        x: rect.x.min(width - rect.width).max(0.0),
        y: rect.y.min(height - rect.height).max(0.0),
        ..rect
    }
}

/// Outer ring stroke plus inner disc fill.
fn draw_point(surface: &mut dyn DrawSurface, center: Coordinate, style: &PointStyle) {
    surface.stroke_circle(center, style.outer_radius, style.stroke_width, style.stroke_color);
    surface.fill_circle(center, style.inner_radius, style.fill_color);
}

/// Consecutive vertex pairs, plus last-to-first when `closing`.
fn segment_pairs(
    points: &[Coordinate],
    closing: bool,
) -> impl Iterator<Item = (Coordinate, Coordinate)> + '_ {
    let closing_pair = match (closing, points.first(), points.last()) {
        (true, Some(first), Some(last)) => Some((*last, *first)),
        _ => None,
    };
    points
        .windows(2)
        .map(|pair| (pair[0], pair[1]))
        .chain(closing_pair)
}
