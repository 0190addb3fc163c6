//! The evaluator port.
//!
//! [`Evaluator`] is the substitutability seam for position scoring: an
//! alternative implementation (for instance, one wrapping a neural
//! accumulator with sparse-delta updates on piece moves and a full refresh
//! when a king moves) can stand in for [`ClassicalEvaluator`] without any
//! other code changing. The search still calls `Board::evaluate`/
//! `evaluate_simple` directly for its leaf scoring; only the interface for
//! a pluggable evaluator is in scope here, not rerouting the search's hot
//! path through a `dyn Evaluator` handle. Loading an accumulator's weights
//! from a file is out of scope regardless.

use super::state::Board;
use super::types::Move;

/// A pluggable position evaluator.
///
/// `prepare_search`/`on_make_move`/`on_undo_move` exist for implementations
/// that carry incremental state of their own (an accumulator) alongside
/// Board's incremental material+PST total; the classical evaluator needs
/// none of that and leaves them as no-ops.
pub trait Evaluator: Send + Sync {
    /// Full-position score in centipawns, from the side to move.
    fn evaluate(&self, board: &Board) -> i32;

    /// Reset any accumulator state before a new search begins at the root.
    fn prepare_search(&mut self) {}

    /// Called after `board.make_move(mv)` is applied, before `mv` is
    /// undone. `mv` is already reflected in `board`.
    fn on_make_move(&mut self, _board: &Board, _mv: Move) {}

    /// Called after `board.unmake_move(mv)` is applied.
    fn on_undo_move(&mut self, _board: &Board, _mv: Move) {}
}

/// The classical tapered material/PST/positional evaluator.
///
/// Zero-sized: all state it needs (incremental material+PST, piece lists)
/// already lives on [`Board`] itself and is kept up to date by
/// `make_move`/`unmake_move` regardless of which evaluator is plugged in,
/// so the make/undo hooks are no-ops here.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClassicalEvaluator;

impl Evaluator for ClassicalEvaluator {
    fn evaluate(&self, board: &Board) -> i32 {
        board.evaluate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classical_evaluator_agrees_with_board_evaluate() {
        let board = Board::new();
        assert_eq!(ClassicalEvaluator.evaluate(&board), board.evaluate());
    }

    #[test]
    fn classical_evaluator_hooks_are_inert() {
        let mut board = Board::new();
        let mut evaluator = ClassicalEvaluator;
        evaluator.prepare_search();
        let mv = *board.generate_moves().iter().next().expect("startpos has legal moves");
        board.make_move(mv);
        evaluator.on_make_move(&board, mv);
        let during = evaluator.evaluate(&board);
        board.unmake_move(mv);
        evaluator.on_undo_move(&board, mv);
        assert_eq!(evaluator.evaluate(&board), Board::new().evaluate());
        let _ = during;
    }
}
