//! Configuration enum types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - a name, a hex string, or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// stroke_color = "lightblue"
///
/// # Hex color, optionally with alpha
/// fill_color = "#0053CC30"
///
/// # Custom RGB color (0-255 per component)
/// text_color = [255, 128, 0]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color (red, green, blue, lightblue, yellow, orange, magenta, white,
    /// black, transparent) or `#RGB` / `#RGBA` / `#RRGGBB` / `#RRGGBBAA`
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::Color;

    #[derive(Deserialize)]
    struct Holder {
        color: Color,
    }

    #[test]
    fn color_accepts_every_spec_form() {
        let named: Holder = toml::from_str(r#"color = "white""#).unwrap();
        assert_eq!(named.color, Color::new(1.0, 1.0, 1.0, 1.0));

        let hex: Holder = toml::from_str(r##"color = "#0053CC""##).unwrap();
        assert_eq!(hex.color.to_rgba8(), [0x00, 0x53, 0xCC, 0xFF]);

        let rgb: Holder = toml::from_str("color = [255, 0, 0]").unwrap();
        assert_eq!(rgb.color, Color::new(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn unknown_color_is_a_parse_error() {
        let result: Result<Holder, _> = toml::from_str(r#"color = "sparkly""#);
        assert!(result.is_err());
    }
}
