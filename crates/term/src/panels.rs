//! Side panel state fed by the core's observer ports.
//!
//! The panel is a passive data holder: the board pushes the pending next
//! shape into it, the score tracker pushes readout lines. The game view
//! reads it when composing a frame. It never feeds back into core state.

use blockfall_core::board::PreviewSink;
use blockfall_core::catalog::TetrominoShape;
use blockfall_score::ScoreDisplay;

/// Latest next-piece shape and score readouts.
pub struct SidePanel {
    next: Option<&'static TetrominoShape>,
    score_line: String,
    high_score_line: String,
}

impl SidePanel {
    pub fn new() -> Self {
        Self {
            next: None,
            score_line: String::from("Score: 0"),
            high_score_line: String::from("High Score: 0"),
        }
    }

    pub fn next(&self) -> Option<&'static TetrominoShape> {
        self.next
    }

    pub fn score_line(&self) -> &str {
        &self.score_line
    }

    pub fn high_score_line(&self) -> &str {
        &self.high_score_line
    }
}

impl Default for SidePanel {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewSink for SidePanel {
    fn show_next(&mut self, shape: &'static TetrominoShape) {
        self.next = Some(shape);
    }
}

impl ScoreDisplay for SidePanel {
    fn show(&mut self, score: &str, high_score: &str) {
        self.score_line = score.to_string();
        self.high_score_line = high_score.to_string();
    }
}
