//! Passed pawns: a pawn with no enemy pawn on its file or either adjacent
//! file anywhere ahead of it earns a bonus by rank of advance. In the
//! endgame that bonus is scaled up and joined by king-distance and
//! rook-placement terms.

use crate::board::state::{Board, TaperedScore};
use crate::board::types::{Color, PieceType, Square};

use super::helpers::relative_rank;
use super::tables::{
    PASSED_PAWN_BASE, PASSED_PAWN_ENEMY_KING_FACTOR, PASSED_PAWN_KING_SUPPORT_FACTOR,
    PASSED_PAWN_ROOK_AHEAD_ENEMY, PASSED_PAWN_ROOK_AHEAD_FRIENDLY, PASSED_PAWN_ROOK_BEHIND_ENEMY,
    PASSED_PAWN_ROOK_BEHIND_FRIENDLY,
};

fn is_passed(board: &Board, sq: Square, color: Color) -> bool {
    let file = sq.file() as i32;
    let opponent = color.opponent();
    for f in (file - 1)..=(file + 1) {
        if !(0..8).contains(&f) {
            continue;
        }
        let file = f as usize;
        for r in 0..8 {
            let p = board.piece_at(Square::new(r, file));
            if p.kind != PieceType::Pawn || p.color != opponent {
                continue;
            }
            let ahead = match color {
                Color::White => r > sq.rank(),
                Color::Black => r < sq.rank(),
            };
            if ahead {
                return false;
            }
        }
    }
    true
}

fn chebyshev(a: Square, b: Square) -> i32 {
    let df = (a.file() as i32 - b.file() as i32).abs();
    let dr = (a.rank() as i32 - b.rank() as i32).abs();
    df.max(dr)
}

pub(crate) fn passed_pawns(board: &Board) -> TaperedScore {
    let mut mg = 0i32;
    let mut eg = 0i32;
    for color in [Color::White, Color::Black] {
        let sign = if color == Color::White { 1 } else { -1 };
        let opponent = color.opponent();
        let friendly_king = board.king_square(color);
        let enemy_king = board.king_square(opponent);

        for &sq in board.piece_list(color).as_slice() {
            if board.piece_at(sq).kind != PieceType::Pawn || !is_passed(board, sq, color) {
                continue;
            }

            let advance = (relative_rank(sq.rank(), color) - 1).min(7);
            let base = PASSED_PAWN_BASE[advance];
            mg += sign * base;

            let king_support = (6 - chebyshev(sq, friendly_king)) * PASSED_PAWN_KING_SUPPORT_FACTOR;
            let enemy_term = (chebyshev(sq, enemy_king) - 2) * PASSED_PAWN_ENEMY_KING_FACTOR;

            let mut rook_term = 0i32;
            for &rsq in board.piece_list(color).as_slice() {
                if board.piece_at(rsq).kind == PieceType::Rook && rsq.file() == sq.file() {
                    let behind = match color {
                        Color::White => rsq.rank() < sq.rank(),
                        Color::Black => rsq.rank() > sq.rank(),
                    };
                    rook_term += if behind {
                        PASSED_PAWN_ROOK_BEHIND_FRIENDLY
                    } else {
                        PASSED_PAWN_ROOK_AHEAD_FRIENDLY
                    };
                }
            }
            for &rsq in board.piece_list(opponent).as_slice() {
                if board.piece_at(rsq).kind == PieceType::Rook && rsq.file() == sq.file() {
                    let behind = match color {
                        Color::White => rsq.rank() < sq.rank(),
                        Color::Black => rsq.rank() > sq.rank(),
                    };
                    rook_term += if behind {
                        PASSED_PAWN_ROOK_BEHIND_ENEMY
                    } else {
                        PASSED_PAWN_ROOK_AHEAD_ENEMY
                    };
                }
            }

            eg += sign * (base * 3 / 2 + king_support + enemy_term + rook_term);
        }
    }
    TaperedScore { mg, eg }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advanced_passed_pawn_scores_more_than_a_rookie_one() {
        let advanced = Board::from_fen_or_startpos("7k/8/8/8/8/6P1/8/7K w - - 0 1");
        let home = Board::from_fen_or_startpos("7k/8/8/8/8/8/6P1/7K w - - 0 1");
        assert!(passed_pawns(&advanced).mg > passed_pawns(&home).mg);
    }

    #[test]
    fn blockaded_file_pawn_is_not_passed() {
        let board = Board::from_fen_or_startpos("7k/6p1/8/8/8/6P1/8/7K w - - 0 1");
        assert_eq!(passed_pawns(&board).mg, 0);
    }

    #[test]
    fn rook_behind_friendly_passer_helps_in_the_endgame() {
        let supported = Board::from_fen_or_startpos("7k/8/8/8/6P1/8/6R1/7K w - - 0 1");
        let unsupported = Board::from_fen_or_startpos("7k/8/8/8/6P1/8/8/6RK w - - 0 1");
        assert!(passed_pawns(&supported).eg > passed_pawns(&unsupported).eg);
    }
}
