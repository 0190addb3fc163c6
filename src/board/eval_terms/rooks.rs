//! Rook placement: open and semi-open files, the 7th/2nd rank, and bonuses
//! for a connected pair sharing an open file or both sitting on the 7th.

use crate::board::state::{Board, TaperedScore};
use crate::board::types::{Color, PieceType, Square};

use super::tables::{
    ROOK_7TH_RANK_BONUS, ROOK_BOTH_7TH_BONUS, ROOK_CONNECTED_BONUS, ROOK_OPEN_FILE_BONUS,
    ROOK_SEMI_OPEN_FILE_BONUS,
};

pub(crate) fn rook_files(board: &Board) -> TaperedScore {
    let mut score = 0i32;
    for color in [Color::White, Color::Black] {
        let sign = if color == Color::White { 1 } else { -1 };
        let opponent = color.opponent();
        let seventh_rank = if color == Color::White { 6 } else { 1 };

        let mut rook_squares = Vec::new();
        for &sq in board.piece_list(color).as_slice() {
            if board.piece_at(sq).kind != PieceType::Rook {
                continue;
            }
            rook_squares.push(sq);

            let file = sq.file();
            let has_own_pawn = (0..8).any(|r| {
                let p = board.piece_at(Square::new(r, file));
                p.kind == PieceType::Pawn && p.color == color
            });
            let has_enemy_pawn = (0..8).any(|r| {
                let p = board.piece_at(Square::new(r, file));
                p.kind == PieceType::Pawn && p.color == opponent
            });

            if !has_own_pawn {
                score += sign * if has_enemy_pawn { ROOK_SEMI_OPEN_FILE_BONUS } else { ROOK_OPEN_FILE_BONUS };
            }
            if sq.rank() == seventh_rank {
                score += sign * ROOK_7TH_RANK_BONUS;
            }
        }

        for i in 0..rook_squares.len() {
            for j in (i + 1)..rook_squares.len() {
                let (a, b) = (rook_squares[i], rook_squares[j]);
                if a.rank() == seventh_rank && b.rank() == seventh_rank {
                    score += sign * ROOK_BOTH_7TH_BONUS;
                }
                if a.file() == b.file() {
                    let has_own_pawn_between_file = (0..8).any(|r| {
                        let p = board.piece_at(Square::new(r, a.file()));
                        p.kind == PieceType::Pawn && p.color == color
                    });
                    if !has_own_pawn_between_file {
                        score += sign * ROOK_CONNECTED_BONUS;
                    }
                }
            }
        }
    }
    TaperedScore { mg: score, eg: score }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rook_on_open_file_beats_rook_behind_own_pawn() {
        let open = Board::from_fen_or_startpos("7k/8/8/8/8/8/8/3R3K w - - 0 1");
        let blocked = Board::from_fen_or_startpos("7k/8/8/8/8/8/3P4/3R3K w - - 0 1");
        assert!(rook_files(&open).mg > rook_files(&blocked).mg);
    }

    #[test]
    fn rook_on_seventh_rank_scores_a_bonus() {
        let board = Board::from_fen_or_startpos("7k/3R4/8/8/8/8/8/7K w - - 0 1");
        assert!(rook_files(&board).mg > 0);
    }

    #[test]
    fn connected_rooks_on_open_file_score_extra() {
        let board = Board::from_fen_or_startpos("7k/8/8/8/3R4/8/8/3R3K w - - 0 1");
        let single = Board::from_fen_or_startpos("7k/8/8/8/8/8/8/3R3K w - - 0 1");
        assert!(rook_files(&board).mg > 2 * rook_files(&single).mg);
    }
}
