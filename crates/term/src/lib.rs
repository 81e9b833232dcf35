//! Terminal presentation module
//!
//! - [`panels`]: the side panel, which is where the board's next-piece
//!   notifications and the score tracker's readouts land
//! - [`game_view`]: pure mapping from board + panel to a character frame
//! - [`renderer`]: raw-mode terminal lifecycle and frame drawing

pub mod game_view;
pub mod panels;
pub mod renderer;

pub use game_view::{Frame, GameView, ViewCell};
pub use panels::SidePanel;
pub use renderer::TerminalRenderer;
