pub mod config;
pub mod geometry;
pub mod model;
pub mod raster;
pub mod surface;

pub use config::{BoardConfig, ConfigError, Swatch, default_palette};
pub use model::*;
pub use raster::{PixmapSnapshot, PixmapSurface};
pub use surface::{LineCap, Surface, SurfaceError};

// Re-export kurbo's point so downstream crates don't need a direct dependency
pub use kurbo::Point;
