//! Board configuration: canvas size, background, initial style, stroke
//! width bounds, and the color palette.
//!
//! Every field has a default, so an empty JSON object is a valid config.

use crate::model::{Color, DEFAULT_STROKE_WIDTH, Style, ToolKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A palette entry. The color is stored explicitly rather than read back
/// from whatever renders the swatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swatch {
    pub name: String,
    pub color: Color,
}

impl Swatch {
    pub fn new(name: &str, color: Color) -> Self {
        Self {
            name: name.to_string(),
            color,
        }
    }
}

pub fn default_palette() -> Vec<Swatch> {
    vec![
        Swatch::new("white", Color::WHITE),
        Swatch::new("black", Color::BLACK),
        Swatch::new("red", Color::rgb(0xE0, 0x20, 0x20)),
        Swatch::new("green", Color::rgb(0x6D, 0xD4, 0x00)),
        Swatch::new("blue", Color::rgb(0x4A, 0x98, 0xF7)),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: u32,
    pub height: u32,
    pub background: Color,
    pub tool: ToolKind,
    pub color: Color,
    pub stroke_width: f64,
    pub fill: bool,
    pub min_stroke_width: f64,
    pub max_stroke_width: f64,
    pub palette: Vec<Swatch>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background: Color::WHITE,
            tool: ToolKind::Brush,
            color: Color::BLACK,
            stroke_width: DEFAULT_STROKE_WIDTH,
            fill: false,
            min_stroke_width: 1.0,
            max_stroke_width: 30.0,
            palette: default_palette(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Json(String),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(msg) => write!(f, "config parse error: {msg}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl BoardConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "canvas size {}x{} must be non-zero",
                self.width, self.height
            )));
        }
        if !self.background.is_opaque() {
            return Err(ConfigError::Invalid(format!(
                "background {} must be opaque",
                self.background
            )));
        }
        if !(self.min_stroke_width > 0.0 && self.min_stroke_width <= self.max_stroke_width) {
            return Err(ConfigError::Invalid(format!(
                "stroke width bounds [{}, {}] must be positive and ordered",
                self.min_stroke_width, self.max_stroke_width
            )));
        }
        if !(self.min_stroke_width..=self.max_stroke_width).contains(&self.stroke_width) {
            return Err(ConfigError::Invalid(format!(
                "stroke width {} outside [{}, {}]",
                self.stroke_width, self.min_stroke_width, self.max_stroke_width
            )));
        }
        Ok(())
    }

    /// Clamp a requested stroke width into the configured bounds.
    /// `None` for values that are not a positive number.
    pub fn clamp_stroke_width(&self, width: f64) -> Option<f64> {
        if width.is_finite() && width > 0.0 {
            Some(width.clamp(self.min_stroke_width, self.max_stroke_width))
        } else {
            None
        }
    }

    pub fn initial_style(&self) -> Style {
        Style {
            tool: self.tool,
            color: self.color,
            stroke_width: self.stroke_width,
            fill: self.fill,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_yields_defaults() {
        let config = BoardConfig::from_json("{}").unwrap();
        assert_eq!(config, BoardConfig::default());
        assert_eq!(config.initial_style(), Style::default());
        assert_eq!(config.palette.len(), 5);
    }

    #[test]
    fn partial_config_overrides_fields() {
        let config = BoardConfig::from_json(
            r##"{
                "width": 320,
                "height": 240,
                "background": "#000",
                "color": "rgb(255, 255, 255)",
                "tool": "circle",
                "palette": [{ "name": "ink", "color": "navy" }]
            }"##,
        )
        .unwrap();
        assert_eq!((config.width, config.height), (320, 240));
        assert_eq!(config.background, Color::BLACK);
        assert_eq!(config.color, Color::WHITE);
        assert_eq!(config.tool, ToolKind::Circle);
        assert_eq!(config.palette, vec![Swatch::new("ink", Color::rgb(0, 0, 128))]);
        assert_eq!(config.stroke_width, DEFAULT_STROKE_WIDTH);
    }

    #[test]
    fn bad_color_is_a_json_error() {
        let err = BoardConfig::from_json(r#"{ "color": "plaid" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(msg) if msg.contains("plaid")));
    }

    #[test]
    fn validation_rejects_bad_bounds() {
        assert!(matches!(
            BoardConfig::from_json(r#"{ "width": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            BoardConfig::from_json(r#"{ "min_stroke_width": 10, "max_stroke_width": 2 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            BoardConfig::from_json(r#"{ "stroke_width": 45 }"#),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn translucent_background_is_rejected() {
        let err = BoardConfig::from_json(r##"{ "background": "#ffffff80" }"##).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("opaque")));
        assert!(BoardConfig::from_json(r##"{ "background": "#fafafa" }"##).is_ok());
    }

    #[test]
    fn stroke_width_clamps_to_slider_range() {
        let config = BoardConfig::default();
        assert_eq!(config.clamp_stroke_width(12.0), Some(12.0));
        assert_eq!(config.clamp_stroke_width(0.5), Some(1.0));
        assert_eq!(config.clamp_stroke_width(99.0), Some(30.0));
        assert_eq!(config.clamp_stroke_width(0.0), None);
        assert_eq!(config.clamp_stroke_width(f64::NAN), None);
    }
}
