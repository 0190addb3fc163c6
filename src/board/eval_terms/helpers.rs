//! Shared attack-map computation for evaluation terms.
//!
//! Move generation's `reachable_squares` treats a square occupied by one's
//! own piece as unreachable; evaluation instead needs the full "what does
//! this piece attack" view (a piece defends the square its own piece
//! stands on too), so this computes that view once per `evaluate()` call
//! and hands it to every term that needs it, instead of each term
//! re-walking the board.

use crate::board::attacks::{step, BISHOP_DIRS, KING_DELTAS, KNIGHT_DELTAS, ROOK_DIRS};
use crate::board::eval_terms::tables::king_zone_attack_weight_x2;
use crate::board::state::Board;
use crate::board::types::{Color, PieceType, Square};

const ALL_DIRS: [(i32, i32); 8] = [
    (1, 1), (1, -1), (-1, 1), (-1, -1),
    (1, 0), (-1, 0), (0, 1), (0, -1),
];

/// Per-square, per-colour sum of `king_zone_attack_weight_x2` contributions
/// from every piece of that colour attacking the square. Doubles as a
/// plain "is this square attacked by colour X" predicate (`> 0`).
#[derive(Clone, Copy, Debug)]
pub(crate) struct AttackInfo {
    weight_x2: [[i32; 64]; 2],
}

impl AttackInfo {
    #[must_use]
    pub(crate) fn compute(board: &Board) -> Self {
        let mut weight_x2 = [[0i32; 64]; 2];
        for color in [Color::White, Color::Black] {
            for &sq in board.piece_list(color).as_slice() {
                let piece = board.piece_at(sq);
                let w = king_zone_attack_weight_x2(piece.kind);
                for target in attack_targets(board, sq, piece.kind, color) {
                    weight_x2[color.index()][target.index()] += w;
                }
            }
        }
        AttackInfo { weight_x2 }
    }

    #[must_use]
    pub(crate) fn is_attacked(&self, sq: Square, by: Color) -> bool {
        self.weight_x2[by.index()][sq.index()] > 0
    }

    #[must_use]
    pub(crate) fn weight_x2(&self, sq: Square, by: Color) -> i32 {
        self.weight_x2[by.index()][sq.index()]
    }
}

/// Every square `sq` (holding a piece of `kind`/`color`) attacks, including
/// a square occupied by a piece of its own colour (sliders stop there, but
/// the blocker square still counts as attacked/defended).
fn attack_targets(board: &Board, sq: Square, kind: PieceType, color: Color) -> Vec<Square> {
    let mut out = Vec::new();
    match kind {
        PieceType::Pawn => {
            for target in Board::pawn_attack_targets(sq, color).into_iter().flatten() {
                out.push(target);
            }
        }
        PieceType::Knight => {
            for (df, dr) in KNIGHT_DELTAS {
                if let Some(t) = step(sq, df, dr) {
                    out.push(t);
                }
            }
        }
        PieceType::King => {
            for (df, dr) in KING_DELTAS {
                if let Some(t) = step(sq, df, dr) {
                    out.push(t);
                }
            }
        }
        PieceType::Bishop | PieceType::Rook | PieceType::Queen => {
            let dirs: &[(i32, i32)] = match kind {
                PieceType::Bishop => &BISHOP_DIRS,
                PieceType::Rook => &ROOK_DIRS,
                _ => &ALL_DIRS,
            };
            for &(df, dr) in dirs {
                let mut cur = sq;
                while let Some(t) = step(cur, df, dr) {
                    out.push(t);
                    if board.piece_at(t).is_some() {
                        break;
                    }
                    cur = t;
                }
            }
        }
        PieceType::None => {}
    }
    out
}

/// Rank of advance from `color`'s own back rank (1 = starting rank, 8 =
/// the far edge); shared by the outpost and passed-pawn terms.
#[inline]
#[must_use]
pub(crate) fn relative_rank(rank: usize, color: Color) -> usize {
    match color {
        Color::White => rank + 1,
        Color::Black => 8 - rank,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_attack_weight_is_symmetric() {
        let board = Board::new();
        let info = AttackInfo::compute(&board);
        let mut white_total = 0;
        let mut black_total = 0;
        for idx in 0..64 {
            white_total += info.weight_x2(Square::from_index(idx), Color::White);
            black_total += info.weight_x2(Square::from_index(idx), Color::Black);
        }
        assert_eq!(white_total, black_total);
    }

    #[test]
    fn queen_square_is_attacked_by_adjacent_enemy_pawn() {
        let board = Board::from_fen_or_startpos("8/3p4/4Q3/8/8/8/8/8 w - - 0 1");
        let info = AttackInfo::compute(&board);
        assert!(info.is_attacked(Square::new(5, 4), Color::Black));
    }

    #[test]
    fn relative_rank_mirrors_for_black() {
        assert_eq!(relative_rank(1, Color::White), 2);
        assert_eq!(relative_rank(6, Color::Black), 2);
    }
}
