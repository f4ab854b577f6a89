//! Configuration file support for shapescriber.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/shapescriber/config.toml`. Settings include hit-testing
//! tolerances, finish/cancel keys, label geometry and the style presets applied to
//! annotations.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use types::{
    CLICK_STYLE, EngineConfig, HIGHLIGHT_STYLE, HOVER_STYLE, LabelConfig, NamedStyleConfig,
    StylesConfig,
};

use crate::input::Key;
use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [engine]
/// vertex_hit_radius = 7.0
/// finish_keys = ["space", "return"]
///
/// [label]
/// font_family = "Sans"
/// font_size = 12.0
///
/// [styles.hover]
/// priority = 0
/// style = { line = { stroke_color = "lightblue" } }
/// ```
#[derive(Debug, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Hit-testing tolerances and key bindings
    #[serde(default)]
    pub engine: EngineConfig,

    /// Label font and box geometry
    #[serde(default)]
    pub label: LabelConfig,

    /// Style presets and named overrides
    #[serde(default)]
    pub styles: StylesConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `vertex_hit_radius`: 1.0 - 50.0
    /// - `stroke_hit_width`: 1.0 - 40.0
    /// - `font_size`: 6.0 - 48.0
    /// - label box geometry: non-negative
    fn validate_and_clamp(&mut self) {
        // Vertex hit radius: 1.0 - 50.0
        if !(1.0..=50.0).contains(&self.engine.vertex_hit_radius) {
            log::warn!(
                "Invalid vertex_hit_radius {:.1}, clamping to 1.0-50.0 range",
                self.engine.vertex_hit_radius
            );
            self.engine.vertex_hit_radius = self.engine.vertex_hit_radius.clamp(1.0, 50.0);
        }

        // Stroke hit width: 1.0 - 40.0
        if !(1.0..=40.0).contains(&self.engine.stroke_hit_width) {
            log::warn!(
                "Invalid stroke_hit_width {:.1}, clamping to 1.0-40.0 range",
                self.engine.stroke_hit_width
            );
            self.engine.stroke_hit_width = self.engine.stroke_hit_width.clamp(1.0, 40.0);
        }

        // Font size: 6.0 - 48.0
        if !(6.0..=48.0).contains(&self.label.font_size) {
            log::warn!(
                "Invalid label font_size {:.1}, clamping to 6.0-48.0 range",
                self.label.font_size
            );
            self.label.font_size = self.label.font_size.clamp(6.0, 48.0);
        }

        for (name, value) in [
            ("box_height", &mut self.label.box_height),
            ("corner_radius", &mut self.label.corner_radius),
            ("padding", &mut self.label.padding),
        ] {
            if value.is_nan() || *value < 0.0 {
                log::warn!("Invalid label {} {:.1}, using 0.0", name, value);
                *value = 0.0;
            }
        }

        // Validate font weight is reasonable
        let valid_weight = matches!(
            self.label.font_weight.to_lowercase().as_str(),
            "normal" | "bold" | "light" | "ultralight" | "heavy" | "ultrabold"
        ) || self
            .label
            .font_weight
            .parse::<u32>()
            .is_ok_and(|w| (100..=900).contains(&w));

        if !valid_weight {
            log::warn!(
                "Invalid font_weight '{}', falling back to 'bold'",
                self.label.font_weight
            );
            self.label.font_weight = "bold".to_string();
        }

        // Validate font style
        if !matches!(
            self.label.font_style.to_lowercase().as_str(),
            "normal" | "italic" | "oblique"
        ) {
            log::warn!(
                "Invalid font_style '{}', falling back to 'normal'",
                self.label.font_style
            );
            self.label.font_style = "normal".to_string();
        }

        retain_known_keys("finish_keys", &mut self.engine.finish_keys);
        retain_known_keys("cancel_keys", &mut self.engine.cancel_keys);
    }

    /// Finish keys parsed from their names.
    pub fn finish_keys(&self) -> Vec<Key> {
        parse_keys(&self.engine.finish_keys)
    }

    /// Cancel keys parsed from their names.
    pub fn cancel_keys(&self) -> Vec<Key> {
        parse_keys(&self.engine.cancel_keys)
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/shapescriber/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("shapescriber");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default path, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config = Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Saves the current configuration to the default path.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory cannot be created
    /// - The config cannot be serialized to TOML
    /// - The file cannot be written
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        // Create directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// Writes the documented example config to `path`, refusing to overwrite.
    ///
    /// # Errors
    /// Returns an error if:
    /// - A config file already exists at the target path
    /// - The config directory cannot be created
    /// - The file cannot be written
    pub fn create_default_file_at(path: &Path) -> Result<()> {
        if path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                path.display()
            ));
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, Self::example_toml())?;

        info!("Created default config at {}", path.display());
        Ok(())
    }

    /// Creates the default configuration file in the user's config directory.
    pub fn create_default_file() -> Result<PathBuf> {
        let config_path = Self::get_config_path()?;
        Self::create_default_file_at(&config_path)?;
        Ok(config_path)
    }

    /// The documented example configuration shipped with the crate.
    pub fn example_toml() -> &'static str {
        include_str!("../../config.example.toml")
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

fn retain_known_keys(field: &str, names: &mut Vec<String>) {
    names.retain(|name| match Key::from_name(name) {
        Ok(_) => true,
        Err(err) => {
            log::warn!("Ignoring entry in {}: {}", field, err);
            false
        }
    });
}

fn parse_keys(names: &[String]) -> Vec<Key> {
    names
        .iter()
        .filter_map(|name| Key::from_name(name).ok())
        .collect()
}
