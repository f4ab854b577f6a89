//! Cairo/Pango implementation of [`DrawSurface`].

use super::annotation::Coordinate;
use super::color::Color;
use super::font::LabelFont;
use super::style::{LineCap, LineStyle, Shadow, TextAlign};
use super::surface::DrawSurface;
use crate::util::Rect;
use std::f64::consts::PI;

/// Number of expanding passes used to approximate a blurred shadow.
const SHADOW_BLUR_PASSES: u32 = 4;

/// Draws onto a borrowed Cairo context.
pub struct CairoSurface<'a> {
    ctx: &'a cairo::Context,
    width: f64,
    height: f64,
    font: pango::FontDescription,
}

impl<'a> CairoSurface<'a> {
    pub fn new(ctx: &'a cairo::Context, width: f64, height: f64, font: &LabelFont) -> Self {
        Self {
            ctx,
            width,
            height,
            font: pango::FontDescription::from_string(&font.to_pango_string()),
        }
    }

    fn set_color(&self, color: Color) {
        self.ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    }

    fn layout(&self, text: &str) -> pango::Layout {
        let layout = pangocairo::functions::create_layout(self.ctx);
        layout.set_font_description(Some(&self.font));
        layout.set_text(text);
        layout
    }

    fn rounded_rect_path(&self, rect: Rect, radius: f64) {
        let radius = radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);
        let (x, y, w, h) = (rect.x, rect.y, rect.width, rect.height);

        self.ctx.new_path();
        self.ctx.arc(x + w - radius, y + radius, radius, -PI / 2.0, 0.0);
        self.ctx.arc(x + w - radius, y + h - radius, radius, 0.0, PI / 2.0);
        self.ctx.arc(x + radius, y + h - radius, radius, PI / 2.0, PI);
        self.ctx.arc(x + radius, y + radius, radius, PI, 3.0 * PI / 2.0);
        self.ctx.close_path();
    }
}

impl DrawSurface for CairoSurface<'_> {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        let _ = self.ctx.save();
        self.ctx.set_operator(cairo::Operator::Clear);
        let _ = self.ctx.paint();
        let _ = self.ctx.restore();
    }

    fn stroke_segment(&mut self, start: Coordinate, end: Coordinate, line: &LineStyle) {
        self.set_color(line.stroke_color);
        self.ctx.set_line_width(line.width);
        self.ctx.set_line_cap(match line.cap {
            LineCap::Butt => cairo::LineCap::Butt,
            LineCap::Round => cairo::LineCap::Round,
            LineCap::Square => cairo::LineCap::Square,
        });

        self.ctx.new_path();
        self.ctx.move_to(start.x, start.y);
        self.ctx.line_to(end.x, end.y);
        let _ = self.ctx.stroke();
    }

    fn stroke_circle(&mut self, center: Coordinate, radius: f64, width: f64, color: Color) {
        if width <= 0.0 || color.a <= 0.0 {
            return;
        }
        self.set_color(color);
        self.ctx.set_line_width(width);
        self.ctx.new_path();
        self.ctx.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
        let _ = self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: Coordinate, radius: f64, color: Color) {
        if color.a <= 0.0 {
            return;
        }
        self.set_color(color);
        self.ctx.new_path();
        self.ctx.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
        let _ = self.ctx.fill();
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f64, color: Color, shadow: Option<&Shadow>) {
        if let Some(shadow) = shadow.filter(|shadow| shadow.is_visible()) {
            // Cairo has no blur; stack expanding translucent copies instead
            let passes = if shadow.blur > 0.0 { SHADOW_BLUR_PASSES } else { 1 };
            let step = shadow.blur / passes as f64;
            let alpha = shadow.color.a / passes as f64;
            for pass in 0..passes {
                let grow = step * (pass + 1) as f64;
                let shadow_rect = Rect::new(
                    rect.x + shadow.offset_x - grow / 2.0,
                    rect.y + shadow.offset_y - grow / 2.0,
                    rect.width + grow,
                    rect.height + grow,
                );
                self.rounded_rect_path(shadow_rect, radius + grow / 2.0);
                self.set_color(Color { a: alpha, ..shadow.color });
                let _ = self.ctx.fill();
            }
        }

        self.rounded_rect_path(rect, radius);
        self.set_color(color);
        let _ = self.ctx.fill();
    }

    fn fill_text(&mut self, text: &str, origin: Coordinate, color: Color, align: TextAlign) {
        let _ = self.ctx.save();
        self.ctx.set_antialias(cairo::Antialias::Best);

        let layout = self.layout(text);
        let (width, _) = layout.pixel_size();
        let x = match align {
            TextAlign::Left => origin.x,
            TextAlign::Center => origin.x - width as f64 / 2.0,
            TextAlign::Right => origin.x - width as f64,
        };

        // Pango positions from the top-left corner; callers pass a baseline
        let baseline = layout.baseline() as f64 / pango::SCALE as f64;
        self.ctx.move_to(x, origin.y - baseline);
        self.set_color(color);
        pangocairo::functions::show_layout(self.ctx, &layout);

        let _ = self.ctx.restore();
    }

    fn measure_text(&self, text: &str) -> f64 {
        let (width, _) = self.layout(text).pixel_size();
        width as f64
    }
}
