//! `Surface` over an HTML `<canvas>` 2D context.
//!
//! Thin forwarding layer: paint state and the current path live in the
//! browser's context. Snapshots are `ImageData` copies of the full canvas.

use sb_core::{Color, LineCap, Point, Surface, SurfaceError};
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

pub struct Canvas2dSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

fn backend_error(e: JsValue) -> SurfaceError {
    SurfaceError::Backend(e.as_string().unwrap_or_else(|| format!("{e:?}")))
}

impl Canvas2dSurface {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        Self { canvas, ctx }
    }
}

impl Surface for Canvas2dSurface {
    type Snapshot = ImageData;

    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), SurfaceError> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::InvalidSize { width, height });
        }
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        Ok(())
    }

    fn set_fill_color(&mut self, color: Color) {
        self.ctx.set_fill_style_str(&color.to_hex());
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.ctx.set_stroke_style_str(&color.to_hex());
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.ctx.set_line_cap(cap.as_str());
        self.ctx.set_line_join(match cap {
            LineCap::Butt => "miter",
            LineCap::Round => "round",
        });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.fill_rect(x, y, width, height);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.stroke_rect(x, y, width, height);
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.clear_rect(x, y, width, height);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, p: Point) {
        self.ctx.move_to(p.x, p.y);
    }

    fn line_to(&mut self, p: Point) {
        self.ctx.line_to(p.x, p.y);
    }

    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64) {
        if let Err(e) = self
            .ctx
            .arc(center.x, center.y, radius, start_angle, end_angle)
        {
            log::warn!("arc rejected: {}", backend_error(e));
        }
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn capture(&self) -> Result<ImageData, SurfaceError> {
        self.ctx
            .get_image_data(0.0, 0.0, self.width() as f64, self.height() as f64)
            .map_err(backend_error)
    }

    fn restore(&mut self, snapshot: &ImageData) -> Result<(), SurfaceError> {
        self.ctx
            .put_image_data(snapshot, 0.0, 0.0)
            .map_err(backend_error)
    }

    fn to_data_url(&self) -> Result<String, SurfaceError> {
        self.canvas.to_data_url().map_err(backend_error)
    }
}
