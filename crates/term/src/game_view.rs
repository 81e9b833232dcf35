//! GameView: maps the board and side panel into a character frame.
//!
//! This module is pure (no I/O). It can be unit-tested.

use blockfall_core::board::Phase;
use blockfall_core::catalog::TetrominoShape;
use blockfall_core::Board;
use blockfall_types::TileColor;

use crate::panels::SidePanel;

/// Columns reserved for the side panel, to the right of the well.
pub const PANEL_WIDTH: usize = 22;

/// One character cell of the composed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewCell {
    pub ch: char,
    pub color: Option<TileColor>,
}

impl Default for ViewCell {
    fn default() -> Self {
        Self {
            ch: ' ',
            color: None,
        }
    }
}

/// A composed frame, row-major.
pub struct Frame {
    width: usize,
    height: usize,
    cells: Vec<ViewCell>,
}

impl Frame {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![ViewCell::default(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell(&self, col: usize, row: usize) -> ViewCell {
        self.cells[row * self.width + col]
    }

    /// Rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[ViewCell]> {
        self.cells.chunks(self.width)
    }

    fn put(&mut self, col: usize, row: usize, ch: char, color: Option<TileColor>) {
        if col < self.width && row < self.height {
            self.cells[row * self.width + col] = ViewCell { ch, color };
        }
    }

    fn put_str(&mut self, col: usize, row: usize, text: &str, color: Option<TileColor>) {
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i, row, ch, color);
        }
    }
}

/// Composes the playfield, its border, and the side panel. Each grid cell
/// is two characters wide to compensate for terminal glyph aspect ratio.
#[derive(Default)]
pub struct GameView;

impl GameView {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, board: &Board, panel: &SidePanel, paused: bool) -> Frame {
        let bounds = board.bounds();
        let board_cols = bounds.width() as usize;
        let board_rows = bounds.height() as usize;

        // Two border columns/rows around the well.
        let well_width = board_cols * 2 + 2;
        let mut frame = Frame::new(well_width + 2 + PANEL_WIDTH, board_rows + 2);

        self.draw_border(&mut frame, well_width, board_rows);
        self.draw_cells(&mut frame, board);
        self.draw_panel(&mut frame, board, panel, paused, well_width + 2);

        frame
    }

    fn draw_border(&self, frame: &mut Frame, well_width: usize, board_rows: usize) {
        let bottom = board_rows + 1;
        for col in 1..well_width - 1 {
            frame.put(col, 0, '-', None);
            frame.put(col, bottom, '-', None);
        }
        for row in 1..bottom {
            frame.put(0, row, '|', None);
            frame.put(well_width - 1, row, '|', None);
        }
        frame.put(0, 0, '+', None);
        frame.put(well_width - 1, 0, '+', None);
        frame.put(0, bottom, '+', None);
        frame.put(well_width - 1, bottom, '+', None);
    }

    fn draw_cells(&self, frame: &mut Frame, board: &Board) {
        let bounds = board.bounds();
        // Top row of the well first.
        for (row_index, y) in bounds.rows().rev().enumerate() {
            for (col_index, x) in bounds.columns().enumerate() {
                if let Some(Some(kind)) = board.cell(x, y) {
                    let color = Some(TetrominoShape::get(kind).tile);
                    let col = 1 + col_index * 2;
                    let row = 1 + row_index;
                    frame.put(col, row, '[', color);
                    frame.put(col + 1, row, ']', color);
                }
            }
        }
    }

    fn draw_panel(
        &self,
        frame: &mut Frame,
        board: &Board,
        panel: &SidePanel,
        paused: bool,
        panel_col: usize,
    ) {
        frame.put_str(panel_col, 1, "Next:", None);
        if let Some(shape) = panel.next() {
            frame.put_str(panel_col + 6, 1, shape.kind.as_str(), None);
            for &(dx, dy) in &shape.cells {
                // Preview box spans dx -1..=2, dy 0..=1.
                let col = panel_col + ((dx + 1) * 2) as usize;
                let row = 2 + (1 - dy) as usize;
                frame.put(col, row, '[', Some(shape.tile));
                frame.put(col + 1, row, ']', Some(shape.tile));
            }
        }

        frame.put_str(panel_col, 5, panel.score_line(), None);
        frame.put_str(panel_col, 6, panel.high_score_line(), None);

        if board.phase() == Phase::GameOver {
            frame.put_str(panel_col, 8, "GAME OVER - r restarts", None);
        } else if paused {
            frame.put_str(panel_col, 8, "Paused", None);
        }
    }
}
