//! Piece module - the active falling piece
//!
//! An `ActivePiece` is a value: drivers build a mutated copy (translated or
//! rotated) and ask the board to validate and commit it. The piece never
//! touches the grid itself.

use blockfall_types::{GridPos, PieceKind};

use crate::catalog::{CellOffset, TetrominoShape};

/// The currently falling piece: shape kind, anchor position, and the
/// current cell offsets (post-rotation).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    kind: PieceKind,
    position: GridPos,
    cells: [CellOffset; 4],
}

impl ActivePiece {
    /// Create a piece from a catalog shape at the given anchor.
    pub fn spawn(shape: &TetrominoShape, position: GridPos) -> Self {
        Self {
            kind: shape.kind,
            position,
            cells: shape.cells,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn position(&self) -> GridPos {
        self.position
    }

    /// Anchor-relative cell offsets for the current orientation.
    pub fn cells(&self) -> &[CellOffset; 4] {
        &self.cells
    }

    /// Absolute grid positions of the piece's cells.
    pub fn world_cells(&self) -> [GridPos; 4] {
        self.cells
            .map(|(dx, dy)| GridPos::new(self.position.x + dx, self.position.y + dy))
    }

    /// Copy of this piece shifted by `(dx, dy)`.
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            position: self.position.offset(dx, dy),
            ..*self
        }
    }

    /// Copy of this piece rotated 90 degrees about its anchor.
    ///
    /// Plain offset rotation; the board's validity gate decides whether the
    /// result is usable. No wall kicks.
    pub fn rotated(&self, clockwise: bool) -> Self {
        let cells = self.cells.map(|(dx, dy)| {
            if clockwise {
                (dy, -dx)
            } else {
                (-dy, dx)
            }
        });
        Self { cells, ..*self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_takes_shape_layout() {
        let shape = TetrominoShape::get(PieceKind::T);
        let piece = ActivePiece::spawn(shape, GridPos::new(-1, 8));

        assert_eq!(piece.kind(), PieceKind::T);
        assert_eq!(piece.position(), GridPos::new(-1, 8));
        assert_eq!(piece.cells(), &shape.cells);
    }

    #[test]
    fn test_world_cells_translate_by_anchor() {
        let shape = TetrominoShape::get(PieceKind::O);
        let piece = ActivePiece::spawn(shape, GridPos::new(2, 3));

        let cells = piece.world_cells();
        assert!(cells.contains(&GridPos::new(2, 4)));
        assert!(cells.contains(&GridPos::new(3, 4)));
        assert!(cells.contains(&GridPos::new(2, 3)));
        assert!(cells.contains(&GridPos::new(3, 3)));
    }

    #[test]
    fn test_translated_moves_anchor_only() {
        let shape = TetrominoShape::get(PieceKind::L);
        let piece = ActivePiece::spawn(shape, GridPos::new(0, 0));
        let moved = piece.translated(-1, 2);

        assert_eq!(moved.position(), GridPos::new(-1, 2));
        assert_eq!(moved.cells(), piece.cells());
    }

    #[test]
    fn test_rotation_round_trips() {
        let shape = TetrominoShape::get(PieceKind::J);
        let piece = ActivePiece::spawn(shape, GridPos::new(0, 0));

        let back = piece.rotated(true).rotated(false);
        assert_eq!(back, piece);

        let full_turn = piece
            .rotated(true)
            .rotated(true)
            .rotated(true)
            .rotated(true);
        assert_eq!(full_turn, piece);
    }

    #[test]
    fn test_clockwise_rotation_maps_up_to_right() {
        let shape = TetrominoShape::get(PieceKind::I);
        let piece = ActivePiece::spawn(shape, GridPos::new(0, 0));
        let rotated = piece.rotated(true);

        // (x, y) -> (y, -x): the horizontal bar becomes vertical.
        assert_eq!(rotated.cells(), &[(1, 1), (1, 0), (1, -1), (1, -2)]);
    }
}
