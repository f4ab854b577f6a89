//! Annotation styles, partial overrides and the typed deep merge between them.
//!
//! An [`AnnotationStyle`] is fully specified. A [`PartialStyle`] mirrors its
//! shape with every leaf optional and is layered on top of a base style with
//! [`AnnotationStyle::merged`]: present leaves replace base leaves, nested
//! groups merge recursively, and the base itself is never touched.

use super::color::Color;
use crate::config::ColorSpec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Stroke end style for segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

/// Horizontal alignment of label text inside its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertex appearance: a stroked outer ring around a filled inner disc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PointStyle {
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub stroke_width: f64,
    #[schemars(with = "ColorSpec")]
    pub stroke_color: Color,
    #[schemars(with = "ColorSpec")]
    pub fill_color: Color,
}

/// Segment appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LineStyle {
    pub cap: LineCap,
    #[schemars(with = "ColorSpec")]
    pub stroke_color: Color,
    pub width: f64,
}

/// Drop shadow behind a label box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Shadow {
    pub offset_x: f64,
    pub offset_y: f64,
    pub blur: f64,
    #[schemars(with = "ColorSpec")]
    pub color: Color,
}

impl Shadow {
    /// A shadow with a transparent color or no blur and offset draws nothing.
    pub fn is_visible(&self) -> bool {
        self.color.a > 0.0 && (self.blur > 0.0 || self.offset_x != 0.0 || self.offset_y != 0.0)
    }
}

/// Label appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LabelStyle {
    #[schemars(with = "ColorSpec")]
    pub text_color: Color,
    pub text_align: TextAlign,
    #[schemars(with = "ColorSpec")]
    pub fill_color: Color,
    pub shadow: Shadow,
}

/// Complete style of one annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnnotationStyle {
    pub point: PointStyle,
    pub line: LineStyle,
    pub label: LabelStyle,
}

/// Override for [`PointStyle`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PartialPointStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outer_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<ColorSpec>")]
    pub stroke_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<ColorSpec>")]
    pub fill_color: Option<Color>,
}

/// Override for [`LineStyle`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PartialLineStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cap: Option<LineCap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<ColorSpec>")]
    pub stroke_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

/// Override for [`Shadow`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PartialShadow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blur: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<ColorSpec>")]
    pub color: Option<Color>,
}

/// Override for [`LabelStyle`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PartialLabelStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<ColorSpec>")]
    pub text_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<ColorSpec>")]
    pub fill_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<PartialShadow>,
}

/// Override for [`AnnotationStyle`]; every leaf is optional.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PartialStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point: Option<PartialPointStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<PartialLineStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<PartialLabelStyle>,
}

impl PartialStyle {
    /// True when the override carries no group at all.
    pub fn is_empty(&self) -> bool {
        self.point.is_none() && self.line.is_none() && self.label.is_none()
    }
}

impl PointStyle {
    pub fn merged(&self, over: &PartialPointStyle) -> Self {
        Self {
            inner_radius: over.inner_radius.unwrap_or(self.inner_radius),
            outer_radius: over.outer_radius.unwrap_or(self.outer_radius),
            stroke_width: over.stroke_width.unwrap_or(self.stroke_width),
            stroke_color: over.stroke_color.unwrap_or(self.stroke_color),
            fill_color: over.fill_color.unwrap_or(self.fill_color),
        }
    }
}

impl LineStyle {
    pub fn merged(&self, over: &PartialLineStyle) -> Self {
        Self {
            cap: over.cap.unwrap_or(self.cap),
            stroke_color: over.stroke_color.unwrap_or(self.stroke_color),
            width: over.width.unwrap_or(self.width),
        }
    }
}

impl Shadow {
    pub fn merged(&self, over: &PartialShadow) -> Self {
        Self {
            offset_x: over.offset_x.unwrap_or(self.offset_x),
            offset_y: over.offset_y.unwrap_or(self.offset_y),
            blur: over.blur.unwrap_or(self.blur),
            color: over.color.unwrap_or(self.color),
        }
    }
}

impl LabelStyle {
    pub fn merged(&self, over: &PartialLabelStyle) -> Self {
        Self {
            text_color: over.text_color.unwrap_or(self.text_color),
            text_align: over.text_align.unwrap_or(self.text_align),
            fill_color: over.fill_color.unwrap_or(self.fill_color),
            shadow: match &over.shadow {
                Some(shadow) => self.shadow.merged(shadow),
                None => self.shadow.clone(),
            },
        }
    }
}

impl AnnotationStyle {
    /// Deep, right-biased merge of `over` onto a copy of `self`.
    ///
    /// `None` returns an unchanged copy.
    pub fn merged(&self, over: Option<&PartialStyle>) -> Self {
        let Some(over) = over else {
            return self.clone();
        };

        Self {
            point: match &over.point {
                Some(point) => self.point.merged(point),
                None => self.point.clone(),
            },
            line: match &over.line {
                Some(line) => self.line.merged(line),
                None => self.line.clone(),
            },
            label: match &over.label {
                Some(label) => self.label.merged(label),
                None => self.label.clone(),
            },
        }
    }

    /// Style of committed annotations that carry no override.
    pub fn unselected() -> Self {
        Self {
            point: PointStyle {
                inner_radius: 5.0,
                outer_radius: 7.0,
                stroke_width: 2.0,
                stroke_color: Color::from_rgba8(0xFF, 0xFF, 0xFF, 0x95),
                fill_color: Color::from_rgba8(0x00, 0x53, 0xCC, 0x30),
            },
            line: LineStyle {
                cap: LineCap::Round,
                stroke_color: Color::from_rgb8(0xFF, 0xFF, 0xFF),
                width: 2.0,
            },
            label: LabelStyle {
                text_color: Color::from_rgb8(0x00, 0x53, 0xCC),
                text_align: TextAlign::Left,
                fill_color: Color::from_rgb8(0xFF, 0xFF, 0xFF),
                shadow: Shadow {
                    offset_x: 0.0,
                    offset_y: 0.0,
                    blur: 0.0,
                    color: super::color::TRANSPARENT,
                },
            },
        }
    }

    /// Style of the geometry currently being created or edited.
    pub fn selected() -> Self {
        let base = Self::unselected();
        Self {
            point: PointStyle {
                inner_radius: 8.0,
                outer_radius: 8.0,
                stroke_width: 1.0,
                stroke_color: Color::from_rgb8(0xFF, 0xFF, 0xFF),
                fill_color: super::color::MAGENTA,
            },
            line: LineStyle {
                stroke_color: Color::from_rgb8(0x00, 0x53, 0xCC),
                ..base.line
            },
            label: base.label,
        }
    }
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self::unselected()
    }
}
