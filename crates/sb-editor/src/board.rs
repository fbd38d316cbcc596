//! The board: one raster surface, its drawing session, and the current
//! style, owned together by a single controller.
//!
//! Pointer events drive the session; the palette, slider, fill toggle,
//! clear, and export commands edit the style or the raster directly.

use crate::input::InputEvent;
use crate::render::StrokeRenderer;
use crate::session::DrawingSession;
use chrono::{Local, NaiveDateTime};
use sb_core::{
    BoardConfig, Color, ColorParseError, Point, Style, Surface, SurfaceError, Swatch, ToolKind,
};

/// An exported image, ready to hand to a download link or write to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub file_name: String,
    pub data_url: String,
}

/// File name for an image exported at `at`.
pub fn export_file_name(at: NaiveDateTime) -> String {
    format!("sketch-{}.png", at.format("%Y-%m-%d-%H%M%S"))
}

/// File name for an image exported now, in local time.
pub fn current_export_file_name() -> String {
    export_file_name(Local::now().naive_local())
}

pub struct Board<S: Surface> {
    surface: S,
    session: DrawingSession<S::Snapshot>,
    renderer: StrokeRenderer,
    style: Style,
    config: BoardConfig,
    /// Palette entry matching the current color, if any.
    selected_swatch: Option<usize>,
    /// Last color chosen with the color picker.
    custom_color: Option<Color>,
}

impl<S: Surface> Board<S> {
    /// Take ownership of `surface` and paint it with the background.
    pub fn new(surface: S, config: BoardConfig) -> Self {
        let style = config.initial_style();
        let selected_swatch = config.palette.iter().position(|s| s.color == style.color);
        let mut board = Self {
            surface,
            session: DrawingSession::new(),
            renderer: StrokeRenderer::new(config.background),
            style,
            config,
            selected_swatch,
            custom_color: None,
        };
        board.paint_background();
        board
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn background(&self) -> Color {
        self.renderer.background()
    }

    pub fn is_drawing(&self) -> bool {
        self.session.is_active()
    }

    pub fn palette(&self) -> &[Swatch] {
        &self.config.palette
    }

    pub fn selected_swatch(&self) -> Option<usize> {
        self.selected_swatch
    }

    pub fn custom_color(&self) -> Option<Color> {
        self.custom_color
    }

    // ─── Pointer input ───────────────────────────────────────────────────

    /// Dispatch a normalized input event. Returns `true` if the raster or
    /// the gesture state changed.
    pub fn handle(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::PointerDown { x, y } => self.pointer_down(x, y),
            InputEvent::PointerMove { x, y } => self.pointer_move(x, y),
            InputEvent::PointerUp => self.pointer_up(),
        }
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        self.session
            .press(&mut self.surface, &self.renderer, &self.style, Point::new(x, y))
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.session
            .pointer_move(&mut self.surface, &self.renderer, &self.style, Point::new(x, y))
    }

    pub fn pointer_up(&mut self) -> bool {
        self.session.release()
    }

    // ─── Style commands ──────────────────────────────────────────────────

    /// Select a tool by id. Unknown ids leave the tool unchanged.
    pub fn set_tool(&mut self, id: &str) -> bool {
        match ToolKind::from_id(id) {
            Some(tool) => {
                self.set_tool_kind(tool);
                true
            }
            None => {
                log::warn!("unknown tool '{id}'");
                false
            }
        }
    }

    pub fn set_tool_kind(&mut self, tool: ToolKind) {
        log::debug!("tool: {tool}");
        self.style.tool = tool;
    }

    /// Set the drawing color from any supported color string.
    pub fn set_color(&mut self, value: &str) -> Result<(), ColorParseError> {
        let color = Color::parse(value)?;
        self.set_color_value(color);
        Ok(())
    }

    pub fn set_color_value(&mut self, color: Color) {
        log::debug!("color: {color}");
        self.style.color = color;
        self.selected_swatch = self.config.palette.iter().position(|s| s.color == color);
        self.surface.set_fill_color(color);
    }

    /// Select a palette entry. Out-of-range indices are ignored.
    pub fn select_swatch(&mut self, index: usize) -> bool {
        let Some(swatch) = self.config.palette.get(index) else {
            log::warn!("no palette swatch at {index}");
            return false;
        };
        let color = swatch.color;
        self.set_color_value(color);
        self.selected_swatch = Some(index);
        true
    }

    /// Color picker: remember the custom color and draw with it.
    pub fn pick_color(&mut self, value: &str) -> Result<(), ColorParseError> {
        let color = Color::parse(value)?;
        self.custom_color = Some(color);
        self.set_color_value(color);
        Ok(())
    }

    /// Set the stroke width, clamped to the configured slider range.
    /// Returns the width now in effect, or `None` if `width` was rejected.
    pub fn set_stroke_width(&mut self, width: f64) -> Option<f64> {
        match self.config.clamp_stroke_width(width) {
            Some(clamped) => {
                log::debug!("stroke width: {clamped}");
                self.style.stroke_width = clamped;
                Some(clamped)
            }
            None => {
                log::warn!("rejecting stroke width {width}");
                None
            }
        }
    }

    pub fn set_fill_mode(&mut self, fill: bool) {
        log::debug!("fill: {fill}");
        self.style.fill = fill;
    }

    // ─── Raster commands ─────────────────────────────────────────────────

    /// Wipe the raster back to the background color.
    ///
    /// Ends any active gesture so its snapshot cannot bring back the
    /// cleared content.
    pub fn clear(&mut self) {
        if self.session.release() {
            log::debug!("clear ended the active gesture");
        }
        let (w, h) = (self.surface.width() as f64, self.surface.height() as f64);
        self.surface.clear_rect(0.0, 0.0, w, h);
        self.paint_background();
        log::debug!("board cleared");
    }

    /// Reallocate the raster at a new size and repaint the background.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), SurfaceError> {
        self.session.release();
        self.surface.resize(width, height)?;
        self.config.width = width;
        self.config.height = height;
        self.paint_background();
        Ok(())
    }

    pub fn export(&self) -> Result<Export, SurfaceError> {
        self.export_at(Local::now().naive_local())
    }

    pub fn export_at(&self, at: NaiveDateTime) -> Result<Export, SurfaceError> {
        let data_url = self.surface.to_data_url()?;
        let file_name = export_file_name(at);
        log::debug!("export {file_name} ({} bytes)", data_url.len());
        Ok(Export {
            file_name,
            data_url,
        })
    }

    /// Fill with the background, then hand the fill color back to the
    /// current drawing color.
    fn paint_background(&mut self) {
        let (w, h) = (self.surface.width() as f64, self.surface.height() as f64);
        self.surface.set_fill_color(self.renderer.background());
        self.surface.fill_rect(0.0, 0.0, w, h);
        self.surface.set_fill_color(self.style.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use sb_core::PixmapSurface;

    fn board() -> Board<PixmapSurface> {
        let surface = PixmapSurface::new(40, 30).unwrap();
        Board::new(surface, BoardConfig::default())
    }

    #[test]
    fn new_board_is_painted_with_background() {
        let board = board();
        assert_eq!(board.surface().pixel(0, 0), Some(Color::WHITE));
        assert_eq!(board.surface().pixel(39, 29), Some(Color::WHITE));
        assert_eq!(board.selected_swatch(), Some(1), "black is preselected");
    }

    #[test]
    fn unknown_tool_is_ignored() {
        let mut board = board();
        assert!(board.set_tool("triangle"));
        assert!(!board.set_tool("spray"));
        assert_eq!(board.style().tool, ToolKind::Triangle);
    }

    #[test]
    fn swatch_and_picker_selection() {
        let mut board = board();
        assert!(board.select_swatch(4));
        assert_eq!(board.style().color, Color::rgb(0x4A, 0x98, 0xF7));
        assert_eq!(board.selected_swatch(), Some(4));
        assert!(!board.select_swatch(9));
        assert_eq!(board.selected_swatch(), Some(4));

        board.pick_color("#123456").unwrap();
        assert_eq!(board.custom_color(), Some(Color::rgb(0x12, 0x34, 0x56)));
        assert_eq!(board.style().color, Color::rgb(0x12, 0x34, 0x56));
        assert_eq!(board.selected_swatch(), None);

        assert!(board.set_color("lavender-ish").is_err());
        assert_eq!(board.style().color, Color::rgb(0x12, 0x34, 0x56));
    }

    #[test]
    fn stroke_width_is_clamped() {
        let mut board = board();
        assert_eq!(board.set_stroke_width(12.0), Some(12.0));
        assert_eq!(board.set_stroke_width(100.0), Some(30.0));
        assert_eq!(board.set_stroke_width(-1.0), None);
        assert_eq!(board.style().stroke_width, 30.0);
    }

    #[test]
    fn clear_hands_fill_color_back_to_drawing_color() {
        let mut board = board();
        board.select_swatch(3);
        board.clear();
        // No gesture in between, so nothing reapplies the style.
        board.surface.fill_rect(2.0, 2.0, 4.0, 4.0);
        assert_eq!(board.surface().pixel(3, 3), Some(Color::rgb(0x6D, 0xD4, 0x00)));
        assert_eq!(board.surface().pixel(20, 20), Some(Color::WHITE));
    }

    #[test]
    fn clear_ends_active_gesture() {
        let mut board = board();
        board.pointer_down(5.0, 5.0);
        assert!(board.is_drawing());
        board.clear();
        assert!(!board.is_drawing());
        assert!(!board.pointer_move(20.0, 20.0));
    }

    #[test]
    fn resize_repaints_background() {
        let mut board = board();
        board.resize(64, 48).unwrap();
        assert_eq!(board.surface().pixel(63, 47), Some(Color::WHITE));
        assert_eq!((board.config().width, board.config().height), (64, 48));
        assert!(board.resize(0, 48).is_err());
    }

    #[test]
    fn export_name_uses_timestamp() {
        let at = NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(9, 5, 7)
            .unwrap();
        let export = board().export_at(at).unwrap();
        assert_eq!(export.file_name, "sketch-2026-10-18-090507.png");
        assert!(export.data_url.starts_with("data:image/png;base64,"));
    }
}
