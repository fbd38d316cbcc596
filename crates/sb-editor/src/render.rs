//! Stroke renderer: turns one pointer-move of an active gesture into the
//! next visible frame.
//!
//! Shape tools restore the gesture snapshot and redraw the candidate shape
//! from scratch, so the preview never leaves ghost outlines and repeated
//! calls with the same frame produce the same pixels. Freehand tools skip
//! the restore and extend the stroke by one segment on the live raster.

use sb_core::geometry::{circle_radius, drag_rect, triangle_vertices};
use sb_core::{Color, LineCap, Point, Style, Surface, ToolKind};
use std::f64::consts::TAU;

/// Everything one render call reads from the session.
#[derive(Debug)]
pub struct Frame<'a, T> {
    /// Raster as it was just before the gesture started.
    pub snapshot: &'a T,
    /// Where the pointer went down.
    pub anchor: Point,
    /// Pointer position of the previous event in this gesture.
    pub previous: Point,
    pub current: Point,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeRenderer {
    background: Color,
}

impl StrokeRenderer {
    pub fn new(background: Color) -> Self {
        Self { background }
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Load line width, colors, and cap for `style` into the surface.
    pub fn apply_style<S: Surface>(&self, surface: &mut S, style: &Style) {
        surface.set_line_width(style.stroke_width);
        surface.set_stroke_color(style.stroke_color(self.background));
        surface.set_fill_color(style.color);
        surface.set_line_cap(if style.tool.is_freehand() {
            LineCap::Round
        } else {
            LineCap::Butt
        });
    }

    pub fn render<S: Surface>(&self, surface: &mut S, frame: &Frame<'_, S::Snapshot>, style: &Style) {
        self.apply_style(surface, style);
        log::trace!(
            "render {} ({}, {}) -> ({}, {})",
            style.tool,
            frame.anchor.x,
            frame.anchor.y,
            frame.current.x,
            frame.current.y
        );

        match style.tool {
            ToolKind::Brush | ToolKind::Eraser => extend_stroke(surface, frame),
            ToolKind::Rectangle => {
                if restore(surface, frame.snapshot) {
                    draw_rectangle(surface, frame, style.fill);
                }
            }
            ToolKind::Circle => {
                if restore(surface, frame.snapshot) {
                    draw_circle(surface, frame, style.fill);
                }
            }
            ToolKind::Triangle => {
                if restore(surface, frame.snapshot) {
                    draw_triangle(surface, frame, style.fill);
                }
            }
        }
    }
}

// ─── Per-tool drawing ────────────────────────────────────────────────────

fn restore<S: Surface>(surface: &mut S, snapshot: &S::Snapshot) -> bool {
    match surface.restore(snapshot) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("skipping frame: {e}");
            false
        }
    }
}

fn extend_stroke<S: Surface>(surface: &mut S, frame: &Frame<'_, S::Snapshot>) {
    surface.begin_path();
    surface.move_to(frame.previous);
    surface.line_to(frame.current);
    surface.stroke();
}

fn draw_rectangle<S: Surface>(surface: &mut S, frame: &Frame<'_, S::Snapshot>, fill: bool) {
    let drag = drag_rect(frame.anchor, frame.current);
    if drag.is_empty() {
        return;
    }
    let r = drag.bounds();
    if fill {
        surface.fill_rect(r.x0, r.y0, r.width(), r.height());
    } else {
        surface.stroke_rect(r.x0, r.y0, r.width(), r.height());
    }
}

fn draw_circle<S: Surface>(surface: &mut S, frame: &Frame<'_, S::Snapshot>, fill: bool) {
    let radius = circle_radius(frame.anchor, frame.current);
    surface.begin_path();
    surface.arc(frame.anchor, radius, 0.0, TAU);
    fill_or_stroke(surface, fill);
}

fn draw_triangle<S: Surface>(surface: &mut S, frame: &Frame<'_, S::Snapshot>, fill: bool) {
    let [a, b, c] = triangle_vertices(frame.anchor, frame.current);
    surface.begin_path();
    surface.move_to(a);
    surface.line_to(b);
    surface.line_to(c);
    surface.close_path();
    fill_or_stroke(surface, fill);
}

fn fill_or_stroke<S: Surface>(surface: &mut S, fill: bool) {
    if fill {
        surface.fill();
    } else {
        surface.stroke();
    }
}
