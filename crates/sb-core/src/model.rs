//! Drawing model shared by every Sketchboard crate.
//!
//! Colors, the five drawing tools, and the `Style` the UI hands to the
//! drawing core. Nothing here touches pixels; see `surface` and `raster`.

use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Colors ──────────────────────────────────────────────────────────────

/// 8-bit RGBA color, straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Why a color string was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    Empty,
    InvalidHex(String),
    InvalidFunction(String),
    UnknownName(String),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty color string"),
            Self::InvalidHex(s) => write!(f, "invalid hex color '{s}'"),
            Self::InvalidFunction(s) => write!(f, "invalid color function '{s}'"),
            Self::UnknownName(s) => write!(f, "unknown color name '{s}'"),
        }
    }
}

impl std::error::Error for ColorParseError {}

/// Helper to parse a single hex digit.
pub fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// CSS basic color keywords, plus `transparent`.
const NAMED_COLORS: &[(&str, Color)] = &[
    ("black", Color::rgb(0, 0, 0)),
    ("silver", Color::rgb(192, 192, 192)),
    ("gray", Color::rgb(128, 128, 128)),
    ("grey", Color::rgb(128, 128, 128)),
    ("white", Color::rgb(255, 255, 255)),
    ("maroon", Color::rgb(128, 0, 0)),
    ("red", Color::rgb(255, 0, 0)),
    ("purple", Color::rgb(128, 0, 128)),
    ("fuchsia", Color::rgb(255, 0, 255)),
    ("magenta", Color::rgb(255, 0, 255)),
    ("green", Color::rgb(0, 128, 0)),
    ("lime", Color::rgb(0, 255, 0)),
    ("olive", Color::rgb(128, 128, 0)),
    ("yellow", Color::rgb(255, 255, 0)),
    ("navy", Color::rgb(0, 0, 128)),
    ("blue", Color::rgb(0, 0, 255)),
    ("teal", Color::rgb(0, 128, 128)),
    ("aqua", Color::rgb(0, 255, 255)),
    ("cyan", Color::rgb(0, 255, 255)),
    ("orange", Color::rgb(255, 165, 0)),
    ("transparent", Color::rgba8(0, 0, 0, 0)),
];

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba8(r, g, b, 255)
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Parse any color string the palette, the color picker, or a style
    /// sheet can produce: hex, `rgb()`/`rgba()`, or a basic named color.
    pub fn parse(value: &str) -> Result<Self, ColorParseError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if value.starts_with('#') {
            return Self::from_hex(value).ok_or_else(|| ColorParseError::InvalidHex(value.into()));
        }
        let lower = value.to_ascii_lowercase();
        if lower.starts_with("rgb") {
            return Self::from_rgb_function(&lower)
                .ok_or_else(|| ColorParseError::InvalidFunction(value.into()));
        }
        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, color)| *color)
            .ok_or_else(|| ColorParseError::UnknownName(value.into()))
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        match bytes.len() {
            3 | 4 => {
                let mut channels = [255u8; 4];
                for (slot, byte) in channels.iter_mut().zip(bytes) {
                    *slot = hex_val(*byte)? * 17;
                }
                let [r, g, b, a] = channels;
                Some(Self::rgba8(r, g, b, a))
            }
            6 | 8 => {
                let mut channels = [255u8; 4];
                for (slot, pair) in channels.iter_mut().zip(bytes.chunks(2)) {
                    *slot = hex_val(pair[0])? << 4 | hex_val(pair[1])?;
                }
                let [r, g, b, a] = channels;
                Some(Self::rgba8(r, g, b, a))
            }
            _ => None,
        }
    }

    /// `rgb(r, g, b)` / `rgba(r, g, b, a)`, the form computed styles report.
    /// Alpha is a 0.0–1.0 fraction; channels may be separated by commas or
    /// spaces.
    fn from_rgb_function(value: &str) -> Option<Self> {
        let inner = value
            .strip_prefix("rgba(")
            .or_else(|| value.strip_prefix("rgb("))?
            .strip_suffix(')')?;
        let parts: Vec<&str> = inner
            .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() != 3 && parts.len() != 4 {
            return None;
        }
        let channel = |s: &str| -> Option<u8> {
            let v: f32 = s.parse().ok()?;
            Some(v.round().clamp(0.0, 255.0) as u8)
        };
        let alpha = match parts.get(3) {
            Some(s) => {
                let v: f32 = s.parse().ok()?;
                (v.clamp(0.0, 1.0) * 255.0).round() as u8
            }
            None => 255,
        };
        Some(Self::rgba8(
            channel(parts[0])?,
            channel(parts[1])?,
            channel(parts[2])?,
            alpha,
        ))
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when translucent.
    pub fn to_hex(&self) -> String {
        if self.is_opaque() {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

// ─── Tools ───────────────────────────────────────────────────────────────

/// The active tool determines how a gesture is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Brush,
    Eraser,
    Rectangle,
    Circle,
    Triangle,
}

impl ToolKind {
    pub const ALL: [ToolKind; 5] = [
        ToolKind::Brush,
        ToolKind::Eraser,
        ToolKind::Rectangle,
        ToolKind::Circle,
        ToolKind::Triangle,
    ];

    /// Look a tool up by its palette id (`"brush"`, `"rectangle"`, ...).
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.id() == id)
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::Brush => "brush",
            Self::Eraser => "eraser",
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Triangle => "triangle",
        }
    }

    /// Freehand tools accumulate segments onto the live raster instead of
    /// redrawing from the gesture snapshot.
    pub fn is_freehand(&self) -> bool {
        matches!(self, Self::Brush | Self::Eraser)
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

// ─── Style ───────────────────────────────────────────────────────────────

pub const DEFAULT_STROKE_WIDTH: f64 = 5.0;

/// Current tool and paint selection. Owned by the UI side; the drawing
/// core only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub tool: ToolKind,
    pub color: Color,
    pub stroke_width: f64,
    /// Solid fill instead of outline for shape tools.
    pub fill: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            tool: ToolKind::Brush,
            color: Color::BLACK,
            stroke_width: DEFAULT_STROKE_WIDTH,
            fill: false,
        }
    }
}

impl Style {
    /// The color strokes are painted with: the eraser paints with the
    /// background, every other tool with the selected color.
    pub fn stroke_color(&self, background: Color) -> Color {
        match self.tool {
            ToolKind::Eraser => background,
            _ => self.color,
        }
    }
}
