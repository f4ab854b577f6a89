//! Label font description.

use crate::config::LabelConfig;

/// Font used for annotation labels.
///
/// Kept backend-neutral; [`LabelFont::to_pango_string`] produces the string the
/// Cairo surface hands to Pango.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelFont {
    /// Font family name (e.g., "Sans", "Monospace")
    pub family: String,
    /// Font weight (e.g., "normal", "bold" or numeric 100-900)
    pub weight: String,
    /// Font style (e.g., "normal", "italic", "oblique")
    pub style: String,
    /// Size in points
    pub size: f64,
}

impl Default for LabelFont {
    fn default() -> Self {
        Self {
            family: "Sans".to_string(),
            weight: "bold".to_string(),
            style: "normal".to_string(),
            size: 12.0,
        }
    }
}

impl From<&LabelConfig> for LabelFont {
    fn from(config: &LabelConfig) -> Self {
        Self {
            family: config.font_family.clone(),
            weight: config.font_weight.clone(),
            style: config.font_style.clone(),
            size: config.font_size,
        }
    }
}

impl LabelFont {
    /// Pango font description string: "Family [Style] [Weight] Size".
    ///
    /// Normal style and weight are omitted, e.g. "Sans Bold 12".
    pub fn to_pango_string(&self) -> String {
        let mut parts = vec![self.family.clone()];

        for attribute in [&self.style, &self.weight] {
            if !attribute.eq_ignore_ascii_case("normal") {
                parts.push(capitalize_first(attribute));
            }
        }

        parts.push(format!("{}", self.size.round() as i32));
        parts.join(" ")
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
