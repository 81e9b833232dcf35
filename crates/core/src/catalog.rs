//! Catalog module - tetromino shape definitions and tile identity
//!
//! One immutable record per piece kind: the anchor-relative cell offsets of
//! the piece and the color its tiles render with. The table is a `const`
//! built at compile time; nothing mutates it after process start.

use blockfall_types::{PieceKind, TileColor};

/// Offset of a single cell relative to the piece anchor (x right, y up).
pub type CellOffset = (i32, i32);

/// Immutable shape record: kind tag, local cell layout, render identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TetrominoShape {
    pub kind: PieceKind,
    pub cells: [CellOffset; 4],
    pub tile: TileColor,
}

/// The full shape catalog, indexed in [`PieceKind::ALL`] order.
pub const CATALOG: [TetrominoShape; 7] = [
    TetrominoShape {
        kind: PieceKind::I,
        cells: [(-1, 1), (0, 1), (1, 1), (2, 1)],
        tile: TileColor::new(0, 240, 240),
    },
    TetrominoShape {
        kind: PieceKind::O,
        cells: [(0, 1), (1, 1), (0, 0), (1, 0)],
        tile: TileColor::new(240, 240, 0),
    },
    TetrominoShape {
        kind: PieceKind::T,
        cells: [(0, 1), (-1, 0), (0, 0), (1, 0)],
        tile: TileColor::new(160, 0, 240),
    },
    TetrominoShape {
        kind: PieceKind::S,
        cells: [(0, 1), (1, 1), (-1, 0), (0, 0)],
        tile: TileColor::new(0, 240, 0),
    },
    TetrominoShape {
        kind: PieceKind::Z,
        cells: [(-1, 1), (0, 1), (0, 0), (1, 0)],
        tile: TileColor::new(240, 0, 0),
    },
    TetrominoShape {
        kind: PieceKind::J,
        cells: [(-1, 1), (-1, 0), (0, 0), (1, 0)],
        tile: TileColor::new(0, 0, 240),
    },
    TetrominoShape {
        kind: PieceKind::L,
        cells: [(1, 1), (-1, 0), (0, 0), (1, 0)],
        tile: TileColor::new(240, 160, 0),
    },
];

impl TetrominoShape {
    /// Look up the catalog entry for a piece kind.
    pub fn get(kind: PieceKind) -> &'static TetrominoShape {
        let index = match kind {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        };
        &CATALOG[index]
    }
}
