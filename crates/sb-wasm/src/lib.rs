//! WASM bridge for Sketchboard — exposes the drawing board to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The page owns the
//! `<canvas>` and the widgets; it forwards pointer events and widget
//! changes here and triggers the download for `export()`.

mod canvas2d;

use canvas2d::Canvas2dSurface;
use sb_core::{BoardConfig, Swatch, ToolKind};
use sb_editor::{Board, Export, InputEvent};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// The main WASM-facing board controller.
///
/// Owns the board (canvas surface, drawing session, style). All
/// interaction from the page goes through this struct.
#[wasm_bindgen]
pub struct SbBoard {
    board: Board<Canvas2dSurface>,
}

#[wasm_bindgen]
impl SbBoard {
    /// Attach to a canvas element. `config_json` may be empty for defaults.
    ///
    /// The canvas keeps its current pixel size; call `resize` once layout
    /// is known.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config_json: &str) -> Result<SbBoard, JsValue> {
        // Set up panic hook for better error messages in console
        console_error_panic_hook_setup();

        let mut config = parse_config(config_json).map_err(js_error)?;
        config.width = canvas.width();
        config.height = canvas.height();

        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| js_error("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let surface = Canvas2dSurface::new(canvas, ctx);
        Ok(Self {
            board: Board::new(surface, config),
        })
    }

    /// Resize the canvas to its laid-out size. Clears the drawing.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), JsValue> {
        self.board.resize(width, height).map_err(js_error)
    }

    /// Handle pointer down. Returns true if a gesture started.
    pub fn handle_pointer_down(&mut self, x: f64, y: f64) -> bool {
        self.board.handle(InputEvent::from_pointer_down(x, y))
    }

    /// Handle pointer move. Returns true if a frame was drawn.
    pub fn handle_pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.board.handle(InputEvent::from_pointer_move(x, y))
    }

    /// Handle pointer up. Returns true if a gesture ended.
    pub fn handle_pointer_up(&mut self) -> bool {
        self.board.handle(InputEvent::from_pointer_up())
    }

    /// Switch the active tool by its button id.
    pub fn set_tool(&mut self, id: &str) -> bool {
        self.board.set_tool(id)
    }

    /// Get the current tool id.
    pub fn get_tool_name(&self) -> String {
        self.board.style().tool.id().to_string()
    }

    /// Set the drawing color from a CSS color string.
    pub fn set_color(&mut self, value: &str) -> bool {
        self.board.set_color(value).is_ok()
    }

    /// Select a palette entry by index.
    pub fn select_swatch(&mut self, index: usize) -> bool {
        self.board.select_swatch(index)
    }

    /// Color picker change.
    pub fn pick_color(&mut self, value: &str) -> bool {
        self.board.pick_color(value).is_ok()
    }

    /// Get the current color as `#RRGGBB`.
    pub fn get_color(&self) -> String {
        self.board.style().color.to_hex()
    }

    /// Slider change. Returns the width in effect, which may be clamped.
    pub fn set_stroke_width(&mut self, width: f64) -> f64 {
        self.board
            .set_stroke_width(width)
            .unwrap_or(self.board.style().stroke_width)
    }

    pub fn set_fill_mode(&mut self, fill: bool) {
        self.board.set_fill_mode(fill);
    }

    pub fn clear(&mut self) {
        self.board.clear();
    }

    /// Export the drawing. Returns JSON:
    /// `{"fileName":"sketch-....png","dataUrl":"data:image/png;base64,..."}`
    pub fn export(&self) -> Result<String, JsValue> {
        let export = self.board.export().map_err(js_error)?;
        Ok(export_json(&export))
    }

    /// Palette and selection state as JSON for building the color widgets.
    pub fn palette_json(&self) -> String {
        palette_json(
            self.board.palette(),
            self.board.selected_swatch(),
            self.board.custom_color().map(|c| c.to_hex()),
        )
    }
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Sketchboard WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

// ─── Helpers (no canvas needed) ──────────────────────────────────────────

fn js_error(e: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}

fn parse_config(json: &str) -> Result<BoardConfig, sb_core::ConfigError> {
    if json.trim().is_empty() {
        return Ok(BoardConfig::default());
    }
    BoardConfig::from_json(json)
}

fn export_json(export: &Export) -> String {
    serde_json::json!({
        "fileName": export.file_name,
        "dataUrl": export.data_url,
    })
    .to_string()
}

fn palette_json(palette: &[Swatch], selected: Option<usize>, custom: Option<String>) -> String {
    serde_json::json!({
        "swatches": palette,
        "selected": selected,
        "custom": custom,
    })
    .to_string()
}

/// List the tool ids the board accepts, as a JSON array.
#[wasm_bindgen]
pub fn tool_ids() -> String {
    let ids: Vec<&str> = ToolKind::ALL.iter().map(|t| t.id()).collect();
    serde_json::to_string(&ids).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sb_core::Color;

    #[test]
    fn empty_config_uses_defaults() {
        assert_eq!(parse_config("").unwrap(), BoardConfig::default());
        assert_eq!(parse_config("  ").unwrap(), BoardConfig::default());
        assert!(parse_config("{ \"width\": 0 }").is_err());
    }

    #[test]
    fn export_json_shape() {
        let json = export_json(&Export {
            file_name: "sketch-2026-10-18-090507.png".into(),
            data_url: "data:image/png;base64,AAAA".into(),
        });
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["fileName"], "sketch-2026-10-18-090507.png");
        assert_eq!(value["dataUrl"], "data:image/png;base64,AAAA");
    }

    #[test]
    fn palette_json_shape() {
        let palette = vec![Swatch::new("red", Color::rgb(0xE0, 0x20, 0x20))];
        let json = palette_json(&palette, Some(0), Some("#123456".into()));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["swatches"][0]["color"], "#E02020");
        assert_eq!(value["selected"], 0);
        assert_eq!(value["custom"], "#123456");
    }

    #[test]
    fn tool_ids_lists_every_tool() {
        assert_eq!(
            tool_ids(),
            r#"["brush","eraser","rectangle","circle","triangle"]"#
        );
    }
}
