pub mod board;
pub mod input;
pub mod render;
pub mod session;

pub use board::{Board, Export, current_export_file_name, export_file_name};
pub use input::InputEvent;
pub use render::{Frame, StrokeRenderer};
pub use session::{DrawingSession, Gesture};
