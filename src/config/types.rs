//! Configuration type definitions.

use crate::draw::{AnnotationStyle, PartialStyle, StyleAssignment};
use crate::draw::color::{LIGHT_BLUE, WHITE};
use crate::draw::style::{
    PartialLabelStyle, PartialLineStyle, PartialPointStyle, PartialShadow,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Style name held exclusively by the hovered annotation.
pub const HOVER_STYLE: &str = "hover";
/// Style name held exclusively by the selected annotation.
pub const CLICK_STYLE: &str = "click";
/// Style name marking vertex 0 when a polygon can be closed on it.
pub const HIGHLIGHT_STYLE: &str = "highlight";

/// Interaction settings.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct EngineConfig {
    /// Radius around a vertex that counts as a hit, in pixels (valid range: 1.0 - 50.0)
    #[serde(default = "default_vertex_hit_radius")]
    pub vertex_hit_radius: f64,

    /// Minimum stroke width used for segment hit-testing (valid range: 1.0 - 40.0)
    /// Thin lines are hard to hover, so their hit area is widened to at least this.
    #[serde(default = "default_stroke_hit_width")]
    pub stroke_hit_width: f64,

    /// Keys that finish a polygon or polyline (e.g., "space", "return")
    #[serde(default = "default_finish_keys")]
    pub finish_keys: Vec<String>,

    /// Keys that abort the shape being created
    #[serde(default = "default_cancel_keys")]
    pub cancel_keys: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            vertex_hit_radius: default_vertex_hit_radius(),
            stroke_hit_width: default_stroke_hit_width(),
            finish_keys: default_finish_keys(),
            cancel_keys: default_cancel_keys(),
        }
    }
}

/// Label font and box geometry.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct LabelConfig {
    /// Font family name (e.g., "Sans", "Monospace")
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Font weight (e.g., "normal", "bold", "light", or 100-900)
    #[serde(default = "default_font_weight")]
    pub font_weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    #[serde(default = "default_font_style")]
    pub font_style: String,

    /// Font size in points (valid range: 6.0 - 48.0)
    #[serde(default = "default_font_size")]
    pub font_size: f64,

    /// Label box height in pixels
    #[serde(default = "default_box_height")]
    pub box_height: f64,

    /// Label box corner radius in pixels
    #[serde(default = "default_corner_radius")]
    pub corner_radius: f64,

    /// Width added to the measured text to size the box
    #[serde(default = "default_padding")]
    pub padding: f64,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            font_family: default_font_family(),
            font_weight: default_font_weight(),
            font_style: default_font_style(),
            font_size: default_font_size(),
            box_height: default_box_height(),
            corner_radius: default_corner_radius(),
            padding: default_padding(),
        }
    }
}

/// A priority-ranked override whose name is fixed by its role.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NamedStyleConfig {
    /// Higher priority wins when several overrides target the same annotation
    #[serde(default)]
    pub priority: i32,

    /// Leaves to override on the base style
    #[serde(default)]
    pub style: PartialStyle,
}

impl NamedStyleConfig {
    fn to_assignment(&self, name: &str) -> StyleAssignment {
        StyleAssignment::new(name, self.priority, self.style.clone())
    }
}

/// Style presets. Every entry is an override on the built-in defaults.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct StylesConfig {
    /// Committed annotations without any override
    #[serde(default)]
    pub unselected: PartialStyle,

    /// Geometry being created or edited
    #[serde(default)]
    pub selected: PartialStyle,

    /// Re-applied to the edited geometry on every event
    #[serde(default = "default_edit_style")]
    pub edit: PartialStyle,

    /// Annotation under the pointer
    #[serde(default = "default_hover_style")]
    pub hover: NamedStyleConfig,

    /// Selected (clicked or just committed) annotation
    #[serde(default = "default_click_style")]
    pub click: NamedStyleConfig,

    /// Vertex 0 when a click on it would close the polygon
    #[serde(default = "default_highlight_style")]
    pub highlight: NamedStyleConfig,
}

impl Default for StylesConfig {
    fn default() -> Self {
        Self {
            unselected: PartialStyle::default(),
            selected: PartialStyle::default(),
            edit: default_edit_style(),
            hover: default_hover_style(),
            click: default_click_style(),
            highlight: default_highlight_style(),
        }
    }
}

impl StylesConfig {
    pub fn unselected_style(&self) -> AnnotationStyle {
        AnnotationStyle::unselected().merged(Some(&self.unselected))
    }

    pub fn selected_style(&self) -> AnnotationStyle {
        AnnotationStyle::selected().merged(Some(&self.selected))
    }

    pub fn hover_assignment(&self) -> StyleAssignment {
        self.hover.to_assignment(HOVER_STYLE)
    }

    pub fn click_assignment(&self) -> StyleAssignment {
        self.click.to_assignment(CLICK_STYLE)
    }

    pub fn highlight_assignment(&self) -> StyleAssignment {
        self.highlight.to_assignment(HIGHLIGHT_STYLE)
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_vertex_hit_radius() -> f64 {
    7.0
}

fn default_stroke_hit_width() -> f64 {
    8.0
}

fn default_finish_keys() -> Vec<String> {
    vec!["space".to_string()]
}

fn default_cancel_keys() -> Vec<String> {
    vec!["escape".to_string()]
}

fn default_font_family() -> String {
    "Sans".to_string()
}

fn default_font_weight() -> String {
    "bold".to_string()
}

fn default_font_style() -> String {
    "normal".to_string()
}

fn default_font_size() -> f64 {
    12.0
}

fn default_box_height() -> f64 {
    20.0
}

fn default_corner_radius() -> f64 {
    10.0
}

fn default_padding() -> f64 {
    10.0
}

fn default_edit_style() -> PartialStyle {
    PartialStyle {
        line: Some(PartialLineStyle {
            stroke_color: Some("#0053CC".parse().unwrap_or(LIGHT_BLUE)),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn default_hover_style() -> NamedStyleConfig {
    NamedStyleConfig {
        priority: 0,
        style: PartialStyle {
            line: Some(PartialLineStyle {
                stroke_color: Some(LIGHT_BLUE),
                ..Default::default()
            }),
            label: Some(PartialLabelStyle {
                shadow: Some(PartialShadow {
                    blur: Some(8.0),
                    color: Some(WHITE),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        },
    }
}

fn default_click_style() -> NamedStyleConfig {
    NamedStyleConfig {
        priority: 1,
        style: PartialStyle {
            label: Some(PartialLabelStyle {
                fill_color: Some(LIGHT_BLUE),
                ..Default::default()
            }),
            ..Default::default()
        },
    }
}

fn default_highlight_style() -> NamedStyleConfig {
    NamedStyleConfig {
        priority: 2,
        style: PartialStyle {
            point: Some(PartialPointStyle {
                inner_radius: Some(12.0),
                outer_radius: Some(14.0),
                stroke_width: Some(2.0),
                stroke_color: "#FFFFFF95".parse().ok(),
                fill_color: "#0053CC66".parse().ok(),
            }),
            ..Default::default()
        },
    }
}
