//! Integration tests: full press → move → release gestures on a board
//! backed by the software raster (sb-editor + sb-core).

use pretty_assertions::assert_eq;
use sb_core::{BoardConfig, Color, PixmapSurface, ToolKind};
use sb_editor::{Board, InputEvent};

const RED: Color = Color::rgb(255, 0, 0);

fn make_board() -> Board<PixmapSurface> {
    let surface = PixmapSurface::new(120, 100).unwrap();
    let mut board = Board::new(surface, BoardConfig::default());
    board.set_color_value(RED);
    board
}

fn pixel(board: &Board<PixmapSurface>, x: u32, y: u32) -> Color {
    board.surface().pixel(x, y).unwrap()
}

fn drag(board: &mut Board<PixmapSurface>, points: &[(f64, f64)]) {
    let (first, rest) = points.split_first().unwrap();
    board.handle(InputEvent::from_pointer_down(first.0, first.1));
    for &(x, y) in rest {
        board.handle(InputEvent::from_pointer_move(x, y));
    }
    board.handle(InputEvent::from_pointer_up());
}

// ─── Session guards ─────────────────────────────────────────────────────

#[test]
fn events_before_press_change_nothing() {
    let mut board = make_board();
    let before = board.surface().data().to_vec();

    assert!(!board.handle(InputEvent::from_pointer_move(10.0, 10.0)));
    assert!(!board.handle(InputEvent::from_pointer_move(60.0, 60.0)));
    assert!(!board.handle(InputEvent::from_pointer_up()));

    assert!(!board.is_drawing());
    assert!(before == board.surface().data());
}

#[test]
fn moves_after_release_are_ignored() {
    let mut board = make_board();
    board.set_tool("rectangle");
    drag(&mut board, &[(10.0, 10.0), (30.0, 30.0)]);
    let after_gesture = board.surface().data().to_vec();

    assert!(!board.pointer_move(100.0, 90.0));
    assert!(after_gesture == board.surface().data());
}

// ─── Shape tools ────────────────────────────────────────────────────────

#[test]
fn outlined_rectangle_spans_anchor_to_pointer() {
    let mut board = make_board();
    board.set_tool("rectangle");
    drag(&mut board, &[(10.0, 10.0), (50.0, 40.0)]);

    // Edges at x = 10, x = 50, y = 10, y = 40; stroke width 5.
    assert_eq!(pixel(&board, 10, 25), RED);
    assert_eq!(pixel(&board, 49, 25), RED);
    assert_eq!(pixel(&board, 30, 10), RED);
    assert_eq!(pixel(&board, 30, 39), RED);
    assert_eq!(pixel(&board, 30, 25), Color::WHITE, "outline only");
    assert_eq!(pixel(&board, 70, 25), Color::WHITE);
}

#[test]
fn filled_rectangle_preview_has_no_ghosts() {
    let mut board = make_board();
    board.set_tool_kind(ToolKind::Rectangle);
    board.set_fill_mode(true);
    drag(
        &mut board,
        &[(10.0, 10.0), (100.0, 90.0), (60.0, 70.0), (30.0, 30.0)],
    );

    assert_eq!(pixel(&board, 20, 20), RED);
    assert_eq!(pixel(&board, 50, 50), Color::WHITE);
    assert_eq!(pixel(&board, 95, 85), Color::WHITE);
}

#[test]
fn repeated_move_to_same_point_is_idempotent() {
    for tool in ["rectangle", "circle", "triangle"] {
        let mut board = make_board();
        board.set_tool(tool);
        board.pointer_down(60.0, 20.0);
        board.pointer_move(85.0, 70.0);
        let once = board.surface().data().to_vec();
        board.pointer_move(85.0, 70.0);
        assert!(once == board.surface().data(), "{tool} accumulated");
    }
}

#[test]
fn shapes_commit_on_release_and_layer_over_earlier_ones() {
    let mut board = make_board();
    board.set_tool("circle");
    board.set_fill_mode(true);
    drag(&mut board, &[(30.0, 50.0), (30.0, 70.0)]);

    board.set_color("blue").unwrap();
    board.set_tool("triangle");
    drag(&mut board, &[(90.0, 20.0), (110.0, 80.0)]);

    assert_eq!(pixel(&board, 30, 50), RED);
    assert_eq!(pixel(&board, 90, 70), Color::rgb(0, 0, 255));
}

// ─── Freehand tools ─────────────────────────────────────────────────────

#[test]
fn brush_segments_accumulate() {
    let mut board = make_board();
    board.set_tool("brush");
    board.pointer_down(10.0, 10.0);

    board.pointer_move(60.0, 10.0);
    assert_eq!(pixel(&board, 35, 10), RED);

    board.pointer_move(60.0, 60.0);
    assert_eq!(pixel(&board, 35, 10), RED, "earlier segment kept");
    assert_eq!(pixel(&board, 60, 35), RED);

    board.pointer_move(110.0, 60.0);
    assert_eq!(pixel(&board, 35, 10), RED);
    assert_eq!(pixel(&board, 60, 35), RED);
    assert_eq!(pixel(&board, 85, 60), RED);

    board.pointer_up();
    // Nothing joins the last point back to the first.
    assert_eq!(pixel(&board, 35, 22), Color::WHITE);
}

#[test]
fn eraser_paints_background_over_ink() {
    let mut board = make_board();
    board.set_stroke_width(10.0);
    drag(&mut board, &[(10.0, 50.0), (110.0, 50.0)]);
    assert_eq!(pixel(&board, 60, 50), RED);

    board.set_tool("eraser");
    board.set_color("#00ff00").unwrap();
    drag(&mut board, &[(40.0, 50.0), (80.0, 50.0)]);

    assert_eq!(pixel(&board, 60, 50), Color::WHITE);
    assert_eq!(pixel(&board, 20, 50), RED, "outside the eraser path");
}

#[test]
fn eraser_uses_configured_background() {
    let config = BoardConfig {
        background: Color::rgb(20, 20, 20),
        ..BoardConfig::default()
    };
    let mut board = Board::new(PixmapSurface::new(60, 60).unwrap(), config);
    assert_eq!(board.background(), Color::rgb(20, 20, 20));
    board.set_color("white").unwrap();
    drag(&mut board, &[(5.0, 30.0), (55.0, 30.0)]);
    board.set_tool("eraser");
    drag(&mut board, &[(5.0, 30.0), (55.0, 30.0)]);

    assert_eq!(pixel(&board, 30, 30), Color::rgb(20, 20, 20));
}

// ─── Clear ──────────────────────────────────────────────────────────────

#[test]
fn clear_resets_raster_and_keeps_drawing_color() {
    let mut board = make_board();
    board.set_tool("rectangle");
    board.set_fill_mode(true);
    drag(&mut board, &[(10.0, 10.0), (110.0, 90.0)]);
    assert_eq!(pixel(&board, 60, 50), RED);

    board.clear();
    let blank = Board::new(PixmapSurface::new(120, 100).unwrap(), BoardConfig::default());
    assert!(board.surface().data() == blank.surface().data(), "raster differs from background");

    drag(&mut board, &[(10.0, 10.0), (40.0, 40.0)]);
    assert_eq!(pixel(&board, 25, 25), RED, "fill color restored after clear");
}

// ─── Export ─────────────────────────────────────────────────────────────

#[test]
fn export_produces_png_data_url() {
    let mut board = make_board();
    drag(&mut board, &[(10.0, 10.0), (100.0, 80.0)]);
    let export = board.export().unwrap();
    assert!(export.file_name.starts_with("sketch-"));
    assert!(export.file_name.ends_with(".png"));
    assert!(export.data_url.starts_with("data:image/png;base64,iVBORw0KGgo"));
}
