//! Movement driver - proposes piece mutations through the board's gates
//!
//! Everything here goes through the board's public erase-test-redraw cycle;
//! the driver adds no placement rule of its own. Locking is driven from
//! here: when a piece can no longer descend, the driver resolves the lock
//! by scanning rows and spawning the next piece.

use blockfall_core::{Board, Phase};
use blockfall_types::GameAction;

/// Result of a gravity step or drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The active piece descended one row.
    Moved,
    /// The piece could not descend: it locked, rows were resolved, and the
    /// next piece spawned.
    Locked { rows_cleared: u32 },
    /// The spawn after a lock was blocked; the board is now over.
    GameOver,
    /// Nothing to do in the current phase.
    Idle,
}

/// Horizontal move, gated by the board. Returns whether it committed.
pub fn move_active(board: &mut Board, dx: i32) -> bool {
    board.try_update_active(|piece| piece.translated(dx, 0))
}

/// 90-degree rotation, gated by the board. Returns whether it committed.
pub fn rotate_active(board: &mut Board, clockwise: bool) -> bool {
    board.try_update_active(|piece| piece.rotated(clockwise))
}

/// Descend one row, or lock and resolve when the piece is grounded.
pub fn gravity_step(board: &mut Board) -> StepOutcome {
    if board.phase() != Phase::Settled {
        return StepOutcome::Idle;
    }
    if board.try_update_active(|piece| piece.translated(0, -1)) {
        StepOutcome::Moved
    } else {
        resolve_lock(board)
    }
}

/// Descend until grounded, then lock and resolve.
pub fn hard_drop(board: &mut Board) -> StepOutcome {
    if board.phase() != Phase::Settled {
        return StepOutcome::Idle;
    }
    while board.try_update_active(|piece| piece.translated(0, -1)) {}
    resolve_lock(board)
}

/// Lock resolution: scan and collapse rows, then spawn the next piece.
fn resolve_lock(board: &mut Board) -> StepOutcome {
    let rows_cleared = board.clear_lines();
    if board.spawn_piece() {
        StepOutcome::Locked { rows_cleared }
    } else {
        StepOutcome::GameOver
    }
}

/// Dispatch a game action against the board.
///
/// `Pause` and `Restart` are loop-level concerns and are left to the
/// caller; they report `Idle` here.
pub fn apply_action(board: &mut Board, action: GameAction) -> StepOutcome {
    match action {
        GameAction::MoveLeft => {
            move_active(board, -1);
            StepOutcome::Idle
        }
        GameAction::MoveRight => {
            move_active(board, 1);
            StepOutcome::Idle
        }
        GameAction::RotateCw => {
            rotate_active(board, true);
            StepOutcome::Idle
        }
        GameAction::RotateCcw => {
            rotate_active(board, false);
            StepOutcome::Idle
        }
        GameAction::SoftDrop => gravity_step(board),
        GameAction::HardDrop => hard_drop(board),
        GameAction::Pause | GameAction::Restart => StepOutcome::Idle,
    }
}
