//! Gesture scripts: a JSON description of a board and the UI events to
//! play onto it.
//!
//! ```json
//! {
//!   "config": { "width": 400, "height": 300 },
//!   "steps": [
//!     { "tool": "rectangle" }, { "fill": true }, { "swatch": 2 },
//!     { "down": [10, 10] }, { "move": [120, 80] }, "up"
//!   ]
//! }
//! ```

use sb_core::{BoardConfig, ColorParseError, ConfigError, Surface, SurfaceError};
use sb_editor::{Board, InputEvent};
use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Tool(String),
    Color(String),
    Swatch(usize),
    Pick(String),
    Width(f64),
    Fill(bool),
    Down([f64; 2]),
    Move([f64; 2]),
    Up,
    Clear,
    Resize([u32; 2]),
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Script {
    pub config: BoardConfig,
    pub steps: Vec<Step>,
}

#[derive(Debug)]
pub enum ReplayError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Config(ConfigError),
    Color { step: usize, source: ColorParseError },
    UnknownTool { step: usize, id: String },
    UnknownSwatch { step: usize, index: usize },
    Surface(SurfaceError),
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Json(e) => write!(f, "script parse error: {e}"),
            Self::Config(e) => write!(f, "{e}"),
            Self::Color { step, source } => write!(f, "step {step}: {source}"),
            Self::UnknownTool { step, id } => write!(f, "step {step}: unknown tool '{id}'"),
            Self::UnknownSwatch { step, index } => {
                write!(f, "step {step}: no palette swatch at {index}")
            }
            Self::Surface(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Color { source, .. } => Some(source),
            Self::Surface(e) => Some(e),
            Self::UnknownTool { .. } | Self::UnknownSwatch { .. } => None,
        }
    }
}

impl From<std::io::Error> for ReplayError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ReplayError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<ConfigError> for ReplayError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<SurfaceError> for ReplayError {
    fn from(e: SurfaceError) -> Self {
        Self::Surface(e)
    }
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        let script: Self = serde_json::from_str(json)?;
        script.config.validate()?;
        Ok(script)
    }

    /// Play every step onto `board`, stopping at the first invalid one.
    pub fn play<S: Surface>(&self, board: &mut Board<S>) -> Result<(), ReplayError> {
        for (i, step) in self.steps.iter().enumerate() {
            log::trace!("step {i}: {step:?}");
            apply(board, i, step)?;
        }
        if board.is_drawing() {
            log::warn!("script ended mid-gesture; releasing");
            board.pointer_up();
        }
        Ok(())
    }
}

fn apply<S: Surface>(board: &mut Board<S>, step: usize, action: &Step) -> Result<(), ReplayError> {
    match action {
        Step::Tool(id) => {
            if !board.set_tool(id) {
                return Err(ReplayError::UnknownTool {
                    step,
                    id: id.clone(),
                });
            }
        }
        Step::Color(value) => board
            .set_color(value)
            .map_err(|source| ReplayError::Color { step, source })?,
        Step::Pick(value) => board
            .pick_color(value)
            .map_err(|source| ReplayError::Color { step, source })?,
        Step::Swatch(index) => {
            if !board.select_swatch(*index) {
                return Err(ReplayError::UnknownSwatch {
                    step,
                    index: *index,
                });
            }
        }
        Step::Width(width) => {
            board.set_stroke_width(*width);
        }
        Step::Fill(fill) => board.set_fill_mode(*fill),
        Step::Down([x, y]) => {
            board.handle(InputEvent::from_pointer_down(*x, *y));
        }
        Step::Move([x, y]) => {
            board.handle(InputEvent::from_pointer_move(*x, *y));
        }
        Step::Up => {
            board.handle(InputEvent::from_pointer_up());
        }
        Step::Clear => board.clear(),
        Step::Resize([w, h]) => board.resize(*w, *h)?,
    }
    Ok(())
}
