//! The raster surface the drawing core paints on.
//!
//! Modeled on an immediate-mode 2D context: persistent paint state
//! (colors, line width, cap), a current path built with `begin_path` /
//! `move_to` / `line_to` / `arc`, and whole-buffer snapshot/restore.
//! `PixmapSurface` is the software implementation; the wasm bridge
//! provides one over an HTML canvas.

use crate::model::Color;
use kurbo::Point;
use std::fmt;

/// How open stroke ends and corners are drawn.
///
/// `Round` also rounds joins; `Butt` pairs with miter joins, the
/// 2D-context defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
}

impl LineCap {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// Zero or unrepresentable dimensions.
    InvalidSize { width: u32, height: u32 },
    /// A snapshot taken at one size restored onto another.
    SnapshotMismatch,
    /// The backing context refused an operation.
    Backend(String),
    /// Image encoding failed during export.
    Encode(String),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { width, height } => {
                write!(f, "invalid surface size {width}x{height}")
            }
            Self::SnapshotMismatch => write!(f, "snapshot does not match surface size"),
            Self::Backend(msg) => write!(f, "surface backend error: {msg}"),
            Self::Encode(msg) => write!(f, "image encoding failed: {msg}"),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// Immediate-mode raster surface.
///
/// Rect operations accept negative widths/heights and normalize them.
/// Drawing outside the surface is clipped silently.
pub trait Surface {
    /// A full copy of the surface pixels.
    type Snapshot;

    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Reallocate the surface. Contents are lost and paint state resets.
    fn resize(&mut self, width: u32, height: u32) -> Result<(), SurfaceError>;

    fn set_fill_color(&mut self, color: Color);
    fn set_stroke_color(&mut self, color: Color);
    fn set_line_width(&mut self, width: f64);
    fn set_line_cap(&mut self, cap: LineCap);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    /// Reset the area to transparent.
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn begin_path(&mut self);
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    /// Circular arc, angles in radians, clockwise in screen space.
    /// Connects to the current point with a straight line first.
    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64);
    fn close_path(&mut self);
    fn fill(&mut self);
    fn stroke(&mut self);

    fn capture(&self) -> Result<Self::Snapshot, SurfaceError>;
    fn restore(&mut self, snapshot: &Self::Snapshot) -> Result<(), SurfaceError>;

    /// Encode the surface as a `data:image/png;base64,...` URL.
    fn to_data_url(&self) -> Result<String, SurfaceError>;
}
