//! The two weak special-case difficulty levels.
//!
//! Difficulty 1 plays a one-ply evaluation with a few move-shape bonuses
//! and picks uniformly among everything within a wide margin of the best
//! score; difficulty 2 does the same but scores each candidate by a
//! two-ply minimax against the opponent's best reply, with a narrower
//! margin. Both exist to produce non-passive but clearly weak play for a
//! GUI's "easy" settings, not to approximate real search.

use super::super::{Board, Color, Move, PieceType, Square};

const LEVEL1_MARGIN: i32 = 600;
const LEVEL2_MARGIN: i32 = 250;

const CAPTURE_BONUS: i32 = 120;
const DEVELOPMENT_BONUS: i32 = 90;
const CENTRAL_PAWN_BONUS: i32 = 60;
const CASTLE_BONUS: i32 = 80;

fn back_rank(color: Color) -> usize {
    match color {
        Color::White => 0,
        Color::Black => 7,
    }
}

fn is_central_file(sq: Square) -> bool {
    matches!(sq.file(), 3 | 4)
}

/// Small move-shape bonuses shared by both weak levels: reward captures,
/// developing a minor piece off the back rank, central pawn pushes, and
/// castling. Must be read from `board` *before* `mv` is made.
fn shape_bonus(board: &Board, mv: Move) -> i32 {
    let mover = board.piece_at(mv.from());
    let mut bonus = 0;

    if mv.is_capture() {
        bonus += CAPTURE_BONUS;
    }
    if matches!(mover.kind, PieceType::Knight | PieceType::Bishop)
        && mv.from().rank() == back_rank(mover.color)
    {
        bonus += DEVELOPMENT_BONUS;
    }
    if mover.kind == PieceType::Pawn && is_central_file(mv.to()) && !mv.is_capture() {
        bonus += CENTRAL_PAWN_BONUS;
    }
    if mv.is_castling() {
        bonus += CASTLE_BONUS;
    }
    bonus
}

/// Deterministic xorshift draw used to pick among tied candidates. Seeded
/// from the position so identical inputs (same board, same candidate set)
/// always produce the same choice, per the engine's determinism
/// requirement, while different positions still vary.
struct PositionRng(u64);

impl PositionRng {
    fn new(seed: u64) -> Self {
        PositionRng(seed | 1)
    }

    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }
}

/// Pick uniformly among every move scoring within `margin` of the best
/// score in `scored`. `scored` must be non-empty.
fn pick_within_margin(board: &Board, scored: &[(Move, i32)], margin: i32) -> Move {
    let best = scored.iter().map(|&(_, s)| s).max().unwrap_or(0);
    let within: Vec<Move> = scored
        .iter()
        .filter(|&&(_, s)| s >= best - margin)
        .map(|&(mv, _)| mv)
        .collect();
    let mut rng = PositionRng::new(board.hash());
    let idx = (rng.next() as usize) % within.len();
    within[idx]
}

/// Difficulty 1: one-ply evaluation plus shape bonuses, random choice
/// within a wide margin of the best-scoring move.
pub fn pick_level_one_move(board: &mut Board, legal: &[Move]) -> Option<Move> {
    if legal.is_empty() {
        return None;
    }
    let scored: Vec<(Move, i32)> = legal
        .iter()
        .map(|&mv| {
            let bonus = shape_bonus(board, mv);
            board.make_move(mv);
            // `evaluate` is relative to the side now to move (the
            // opponent), so negate to get our own perspective.
            let score = -board.evaluate() + bonus;
            board.unmake_move(mv);
            (mv, score)
        })
        .collect();
    Some(pick_within_margin(board, &scored, LEVEL1_MARGIN))
}

/// Difficulty 2: two-ply minimax (the opponent picks their best reply),
/// plus the same shape bonuses, random choice within a narrower margin.
///
/// Per the engine's preserved source quirk: `evaluate()` is already
/// side-to-move-relative, so the position reached after our move and the
/// opponent's reply is evaluated from *our* perspective directly; the
/// result is negated once more to match the original engine's two-ply
/// scoring exactly (see the "Level-2 evaluation" open question).
pub fn pick_level_two_move(board: &mut Board, legal: &[Move]) -> Option<Move> {
    if legal.is_empty() {
        return None;
    }
    let mut scored: Vec<(Move, i32)> = Vec::with_capacity(legal.len());
    for &mv in legal {
        let bonus = shape_bonus(board, mv);
        board.make_move(mv);

        let reply_candidates: Vec<Move> = board.generate_moves().iter().copied().collect();
        let mut min_eval: Option<i32> = None;
        for reply in reply_candidates {
            if !board.is_legal_move(reply) {
                continue;
            }
            board.make_move(reply);
            let e = board.evaluate();
            board.unmake_move(reply);
            min_eval = Some(min_eval.map_or(e, |m| m.min(e)));
        }

        let score = match min_eval {
            Some(e) => -e + bonus,
            None if board.in_check() => i32::from(i16::MAX) + bonus, // opponent is mated
            None => bonus,                                          // stalemate
        };
        board.unmake_move(mv);
        scored.push((mv, score));
    }
    Some(pick_within_margin(board, &scored, LEVEL2_MARGIN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn level_one_returns_a_legal_move() {
        let mut board = Board::new();
        let legal = board.generate_moves();
        let moves: Vec<Move> = legal.iter().copied().collect();
        let chosen = pick_level_one_move(&mut board, &moves).unwrap();
        assert!(moves.contains(&chosen));
    }

    #[test]
    fn level_two_returns_a_legal_move() {
        let mut board = Board::new();
        let legal = board.generate_moves();
        let moves: Vec<Move> = legal.iter().copied().collect();
        let chosen = pick_level_two_move(&mut board, &moves).unwrap();
        assert!(moves.contains(&chosen));
    }

    #[test]
    fn level_one_is_deterministic_for_the_same_position() {
        let mut a = Board::new();
        let mut b = Board::new();
        let legal: Vec<Move> = a.generate_moves().iter().copied().collect();
        let pick_a = pick_level_one_move(&mut a, &legal).unwrap();
        let pick_b = pick_level_one_move(&mut b, &legal).unwrap();
        assert_eq!(pick_a, pick_b);
    }
}
