//! Board module - the central state machine
//!
//! Owns the bounded grid and the active piece's lifecycle, validates every
//! proposed piece position, scans for completed rows and collapses them.
//!
//! The board moves through four phases:
//!
//! - `Spawning`: ready to bring in the pending next piece
//! - `Settled`: an active piece is on the grid and movable
//! - `RowScanning`: a locked piece is being resolved into row clears
//! - `GameOver`: terminal until an external restart
//!
//! Collaborators are injected at construction behind the [`ScoreSink`] and
//! [`PreviewSink`] ports; `()` implements both as the absent-collaborator
//! no-op.

use std::cell::RefCell;
use std::rc::Rc;

use blockfall_types::{Bounds, Cell, GridPos, PieceKind, LINE_REWARD};

use crate::catalog::TetrominoShape;
use crate::piece::ActivePiece;
use crate::rng::RandomSource;

/// Board lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Spawning,
    Settled,
    RowScanning,
    GameOver,
}

/// Score collaborator port. Invoked once per cleared row and on game over.
pub trait ScoreSink {
    fn add_score(&mut self, points: u64);
    fn reset_score(&mut self);
}

/// Next-piece preview port. Invoked with the pending shape on each spawn.
pub trait PreviewSink {
    fn show_next(&mut self, shape: &'static TetrominoShape);
}

/// Absent collaborators degrade to no-ops.
impl ScoreSink for () {
    fn add_score(&mut self, _points: u64) {}
    fn reset_score(&mut self) {}
}

impl PreviewSink for () {
    fn show_next(&mut self, _shape: &'static TetrominoShape) {}
}

/// Shared single-threaded handles can stand in for the collaborator itself.
impl<T: ScoreSink> ScoreSink for Rc<RefCell<T>> {
    fn add_score(&mut self, points: u64) {
        self.borrow_mut().add_score(points);
    }

    fn reset_score(&mut self) {
        self.borrow_mut().reset_score();
    }
}

impl<T: PreviewSink> PreviewSink for Rc<RefCell<T>> {
    fn show_next(&mut self, shape: &'static TetrominoShape) {
        self.borrow_mut().show_next(shape);
    }
}

/// Bounded grid of cells, row-major flat storage.
struct Grid {
    bounds: Bounds,
    cells: Vec<Cell>,
}

impl Grid {
    fn new(bounds: Bounds) -> Self {
        let size = (bounds.width() * bounds.height()) as usize;
        Self {
            bounds,
            cells: vec![None; size],
        }
    }

    /// Flat index for `(x, y)`, or None when out of bounds.
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if !self.bounds.contains(x, y) {
            return None;
        }
        let col = (x - self.bounds.x_min()) as usize;
        let row = (y - self.bounds.y_min()) as usize;
        Some(row * self.bounds.width() as usize + col)
    }

    fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and empty. Out-of-bounds queries fail closed.
    fn is_empty(&self, x: i32, y: i32) -> bool {
        matches!(self.cell(x, y), Some(None))
    }

    /// Occupied, with out-of-bounds treated as occupied (fail closed).
    fn is_occupied(&self, x: i32, y: i32) -> bool {
        !self.is_empty(x, y)
    }

    fn clear_all(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }
}

/// The board: grid, active piece, pending next piece, and collaborators.
pub struct Board {
    grid: Grid,
    spawn_anchor: GridPos,
    active: Option<ActivePiece>,
    next: PieceKind,
    rng: Box<dyn RandomSource>,
    score: Box<dyn ScoreSink>,
    preview: Box<dyn PreviewSink>,
    phase: Phase,
}

impl Board {
    /// Board with no score or preview collaborators bound.
    pub fn new(bounds: Bounds, spawn_anchor: GridPos, rng: Box<dyn RandomSource>) -> Self {
        Self::with_collaborators(bounds, spawn_anchor, rng, Box::new(()), Box::new(()))
    }

    /// Board with collaborator handles injected at construction.
    pub fn with_collaborators(
        bounds: Bounds,
        spawn_anchor: GridPos,
        mut rng: Box<dyn RandomSource>,
        score: Box<dyn ScoreSink>,
        preview: Box<dyn PreviewSink>,
    ) -> Self {
        let next = draw_kind(rng.as_mut());
        Self {
            grid: Grid::new(bounds),
            spawn_anchor,
            active: None,
            next,
            rng,
            score,
            preview,
            phase: Phase::Spawning,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.grid.bounds
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    /// Kind of the pending next piece (the single look-ahead slot).
    pub fn next_kind(&self) -> PieceKind {
        self.next
    }

    /// Cell at `(x, y)`, or None for out-of-bounds queries.
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        self.grid.cell(x, y)
    }

    /// Write a single cell. Returns false (and writes nothing) out of bounds.
    pub fn set_cell(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        self.grid.set(x, y, cell)
    }

    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.grid.is_occupied(x, y)
    }

    pub fn occupied_count(&self) -> usize {
        self.grid.cells.iter().filter(|c| c.is_some()).count()
    }

    /// The single placement gate: every cell of the piece must be in bounds
    /// and empty. Short-circuits on the first violation.
    pub fn is_valid_position(&self, piece: &ActivePiece) -> bool {
        piece
            .world_cells()
            .iter()
            .all(|pos| self.grid.is_empty(pos.x, pos.y))
    }

    /// Write the piece's tile identity into every cell it occupies.
    pub fn set_piece(&mut self, piece: &ActivePiece) {
        let kind = piece.kind();
        for pos in piece.world_cells() {
            self.grid.set(pos.x, pos.y, Some(kind));
        }
    }

    /// Erase the piece's cells. The driver's erase step before re-validating
    /// a move; not part of locking.
    pub fn clear_piece(&mut self, piece: &ActivePiece) {
        for pos in piece.world_cells() {
            self.grid.set(pos.x, pos.y, None);
        }
    }

    /// Erase-test-redraw cycle for a proposed active-piece mutation.
    ///
    /// Builds the candidate with `f`, validates it with the piece's own
    /// cells lifted off the grid, and commits it, or restores the original.
    pub fn try_update_active(&mut self, f: impl FnOnce(&ActivePiece) -> ActivePiece) -> bool {
        if self.phase != Phase::Settled {
            return false;
        }
        let Some(current) = self.active else {
            return false;
        };

        let candidate = f(&current);
        self.clear_piece(&current);

        if self.is_valid_position(&candidate) {
            self.set_piece(&candidate);
            self.active = Some(candidate);
            true
        } else {
            self.set_piece(&current);
            false
        }
    }

    /// Consume the pending next piece and bring it in at the spawn anchor.
    ///
    /// On success the piece's cells are committed and the preview
    /// collaborator is told the new pending shape. A blocked anchor is the
    /// topping-out loss condition and triggers game over.
    pub fn spawn_piece(&mut self) -> bool {
        if self.phase != Phase::Spawning {
            return false;
        }

        let shape = TetrominoShape::get(self.next);
        self.next = draw_kind(self.rng.as_mut());

        let piece = ActivePiece::spawn(shape, self.spawn_anchor);
        if self.is_valid_position(&piece) {
            self.set_piece(&piece);
            self.active = Some(piece);
            self.phase = Phase::Settled;
            self.preview.show_next(TetrominoShape::get(self.next));
            true
        } else {
            self.game_over();
            false
        }
    }

    /// True iff every column in bounds at `row` is occupied. Rows outside
    /// bounds are never full.
    pub fn is_line_full(&self, row: i32) -> bool {
        if row < self.grid.bounds.y_min() || row >= self.grid.bounds.y_max() {
            return false;
        }
        self.grid
            .bounds
            .columns()
            .all(|col| self.grid.is_occupied(col, row))
    }

    /// Resolve a locked piece: scan rows bottom to top and collapse the
    /// full ones, awarding one line reward per cleared row.
    ///
    /// The cursor does not advance past a cleared row: the collapse drops
    /// the row above into the current index, and that row must be examined
    /// before moving on. Stacked full rows therefore each clear and score
    /// independently.
    pub fn clear_lines(&mut self) -> u32 {
        if self.phase == Phase::GameOver {
            return 0;
        }
        self.phase = Phase::RowScanning;
        self.active = None;

        let mut cleared = 0;
        let mut row = self.grid.bounds.y_min();
        while row < self.grid.bounds.y_max() {
            if self.is_line_full(row) {
                self.collapse_row(row);
                self.score.add_score(LINE_REWARD);
                cleared += 1;
            } else {
                row += 1;
            }
        }

        self.phase = Phase::Spawning;
        cleared
    }

    /// Empty `row`, then shift every row above it down by one, preserving
    /// per-column tile identity. The top row ends up empty: nothing exists
    /// above the top bound to shift in.
    pub fn collapse_row(&mut self, row: i32) {
        let bounds = self.grid.bounds;
        if row < bounds.y_min() || row >= bounds.y_max() {
            return;
        }

        for col in bounds.columns() {
            self.grid.set(col, row, None);
        }

        for r in row..bounds.y_max() {
            for col in bounds.columns() {
                let above = self.grid.cell(col, r + 1).unwrap_or(None);
                self.grid.set(col, r, above);
            }
        }
    }

    /// Topping-out: clear the whole grid, drop the active piece, zero the
    /// current score. Terminal until [`Board::restart`].
    pub fn game_over(&mut self) {
        self.grid.clear_all();
        self.active = None;
        self.score.reset_score();
        self.phase = Phase::GameOver;
    }

    /// External restart: empty grid, back to the Spawning phase. The random
    /// source keeps its state, so the piece sequence continues.
    pub fn restart(&mut self) {
        self.grid.clear_all();
        self.active = None;
        self.phase = Phase::Spawning;
    }
}

/// Uniform draw over the catalog.
fn draw_kind(rng: &mut dyn RandomSource) -> PieceKind {
    let index = rng.next_range(PieceKind::ALL.len() as u32) as usize;
    PieceKind::ALL[index]
}
