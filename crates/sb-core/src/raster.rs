//! Software raster surface backed by a tiny-skia `Pixmap`.
//!
//! The current path is accumulated as a `kurbo::BezPath` and converted to
//! a tiny-skia path when filled or stroked.

use crate::model::Color;
use crate::surface::{LineCap, Surface, SurfaceError};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use kurbo::{Arc, BezPath, PathEl, Point, Rect, Vec2};
use std::f64::consts::TAU;
use tiny_skia as sk;

/// Flattening tolerance for arcs, in pixels.
const ARC_TOLERANCE: f64 = 0.1;

/// Pixel copy of a `PixmapSurface`.
#[derive(Clone)]
pub struct PixmapSnapshot(sk::Pixmap);

impl PixmapSnapshot {
    pub fn width(&self) -> u32 {
        self.0.width()
    }

    pub fn height(&self) -> u32 {
        self.0.height()
    }

    pub fn data(&self) -> &[u8] {
        self.0.data()
    }
}

pub struct PixmapSurface {
    pixmap: sk::Pixmap,
    fill_color: Color,
    stroke_color: Color,
    line_width: f64,
    line_cap: LineCap,
    path: BezPath,
    current: Option<Point>,
    subpath_start: Option<Point>,
}

impl PixmapSurface {
    /// A transparent surface of the given size.
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        let pixmap =
            sk::Pixmap::new(width, height).ok_or(SurfaceError::InvalidSize { width, height })?;
        Ok(Self {
            pixmap,
            fill_color: Color::BLACK,
            stroke_color: Color::BLACK,
            line_width: 1.0,
            line_cap: LineCap::Butt,
            path: BezPath::new(),
            current: None,
            subpath_start: None,
        })
    }

    /// Read back one pixel, un-premultiplied. `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.pixmap.width() || y >= self.pixmap.height() {
            return None;
        }
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            Color::rgba8(c.red(), c.green(), c.blue(), c.alpha())
        })
    }

    /// Raw premultiplied RGBA bytes, row-major.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, SurfaceError> {
        self.pixmap
            .encode_png()
            .map_err(|e| SurfaceError::Encode(e.to_string()))
    }

    fn reset_paint_state(&mut self) {
        self.fill_color = Color::BLACK;
        self.stroke_color = Color::BLACK;
        self.line_width = 1.0;
        self.line_cap = LineCap::Butt;
        self.begin_path();
    }

    fn paint(color: Color) -> sk::Paint<'static> {
        let mut paint = sk::Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        paint.anti_alias = true;
        paint
    }

    fn sk_stroke(&self) -> sk::Stroke {
        let (line_cap, line_join) = match self.line_cap {
            LineCap::Butt => (sk::LineCap::Butt, sk::LineJoin::Miter),
            LineCap::Round => (sk::LineCap::Round, sk::LineJoin::Round),
        };
        sk::Stroke {
            width: self.line_width as f32,
            line_cap,
            line_join,
            ..Default::default()
        }
    }

    fn sk_rect(x: f64, y: f64, width: f64, height: f64) -> Option<sk::Rect> {
        let r = Rect::new(x, y, x + width, y + height).abs();
        sk::Rect::from_ltrb(r.x0 as f32, r.y0 as f32, r.x1 as f32, r.y1 as f32)
    }

    fn fill_sk_path(&mut self, path: &sk::Path, paint: &sk::Paint<'_>) {
        self.pixmap.fill_path(
            path,
            paint,
            sk::FillRule::Winding,
            sk::Transform::identity(),
            None,
        );
    }

    fn stroke_sk_path(&mut self, path: &sk::Path) {
        if self.line_width <= 0.0 {
            return;
        }
        let paint = Self::paint(self.stroke_color);
        let stroke = self.sk_stroke();
        self.pixmap
            .stroke_path(path, &paint, &stroke, sk::Transform::identity(), None);
    }
}

/// Convert a kurbo path to tiny-skia. `None` when the path is empty or
/// degenerate.
fn to_sk_path(path: &BezPath) -> Option<sk::Path> {
    let mut pb = sk::PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => pb.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(c1, c2, p) => pb.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

impl Surface for PixmapSurface {
    type Snapshot = PixmapSnapshot;

    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), SurfaceError> {
        self.pixmap =
            sk::Pixmap::new(width, height).ok_or(SurfaceError::InvalidSize { width, height })?;
        self.reset_paint_state();
        Ok(())
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    fn set_line_width(&mut self, width: f64) {
        // Like a 2D context, non-positive or non-finite widths are ignored.
        if width.is_finite() && width > 0.0 {
            self.line_width = width;
        } else {
            log::warn!("ignoring line width {width}");
        }
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.line_cap = cap;
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        if let Some(rect) = Self::sk_rect(x, y, width, height) {
            let paint = Self::paint(self.fill_color);
            self.pixmap
                .fill_rect(rect, &paint, sk::Transform::identity(), None);
        }
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        if width == 0.0 && height == 0.0 {
            return;
        }
        let mut pb = sk::PathBuilder::new();
        let (x0, y0) = (x as f32, y as f32);
        let (x1, y1) = ((x + width) as f32, (y + height) as f32);
        pb.move_to(x0, y0);
        pb.line_to(x1, y0);
        pb.line_to(x1, y1);
        pb.line_to(x0, y1);
        pb.close();
        if let Some(path) = pb.finish() {
            self.stroke_sk_path(&path);
        }
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        if let Some(rect) = Self::sk_rect(x, y, width, height) {
            let mut paint = sk::Paint::default();
            paint.blend_mode = sk::BlendMode::Clear;
            self.pixmap
                .fill_rect(rect, &paint, sk::Transform::identity(), None);
        }
    }

    fn begin_path(&mut self) {
        self.path = BezPath::new();
        self.current = None;
        self.subpath_start = None;
    }

    fn move_to(&mut self, p: Point) {
        self.path.move_to(p);
        self.current = Some(p);
        self.subpath_start = Some(p);
    }

    fn line_to(&mut self, p: Point) {
        if self.current.is_none() {
            return self.move_to(p);
        }
        self.path.line_to(p);
        self.current = Some(p);
    }

    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64) {
        if !radius.is_finite() || radius < 0.0 {
            log::warn!("ignoring arc with radius {radius}");
            return;
        }
        let start = center + Vec2::from_angle(start_angle) * radius;
        self.line_to(start);

        let arc = Arc {
            center,
            radii: Vec2::new(radius, radius),
            start_angle,
            sweep_angle: (end_angle - start_angle).clamp(-TAU, TAU),
            x_rotation: 0.0,
        };
        let mut end = start;
        let path = &mut self.path;
        arc.to_cubic_beziers(ARC_TOLERANCE, |c1, c2, p| {
            path.curve_to(c1, c2, p);
            end = p;
        });
        self.current = Some(end);
    }

    fn close_path(&mut self) {
        if self.current.is_some() {
            self.path.close_path();
            self.current = self.subpath_start;
        }
    }

    fn fill(&mut self) {
        if let Some(path) = to_sk_path(&self.path) {
            let paint = Self::paint(self.fill_color);
            self.fill_sk_path(&path, &paint);
        }
    }

    fn stroke(&mut self) {
        if let Some(path) = to_sk_path(&self.path) {
            self.stroke_sk_path(&path);
        }
    }

    fn capture(&self) -> Result<PixmapSnapshot, SurfaceError> {
        Ok(PixmapSnapshot(self.pixmap.clone()))
    }

    fn restore(&mut self, snapshot: &PixmapSnapshot) -> Result<(), SurfaceError> {
        if snapshot.width() != self.width() || snapshot.height() != self.height() {
            return Err(SurfaceError::SnapshotMismatch);
        }
        self.pixmap.data_mut().copy_from_slice(snapshot.0.data());
        Ok(())
    }

    fn to_data_url(&self) -> Result<String, SurfaceError> {
        let png = self.encode_png()?;
        Ok(format!("data:image/png;base64,{}", BASE64.encode(png)))
    }
}
