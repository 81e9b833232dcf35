//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the board state machine and everything it needs:
//! the shape catalog, the active piece, and a seedable random source. It has
//! zero dependencies on UI, persistence, or I/O.
//!
//! # Module Structure
//!
//! - [`board`]: bounded grid, position validation, row scanning and collapse
//! - [`catalog`]: immutable tetromino shape/tile lookup table
//! - [`piece`]: the active falling piece and its proposed mutations
//! - [`rng`]: seedable LCG random source for next-piece selection
//!
//! Collaborators (score accumulation, next-piece preview) are reached
//! through the [`board::ScoreSink`] and [`board::PreviewSink`] ports, so the
//! core never looks anything up ambiently. A missing collaborator is the
//! no-op `()` implementation.

pub mod board;
pub mod catalog;
pub mod piece;
pub mod rng;

pub use board::{Board, Phase, PreviewSink, ScoreSink};
pub use catalog::{CellOffset, TetrominoShape, CATALOG};
pub use piece::ActivePiece;
pub use rng::{RandomSource, SimpleRng};
