//! Pawn structure: a penalty for every extra pawn stacked on a file, and a
//! penalty for pawns with no friendly pawn on either adjacent file.

use crate::board::state::{Board, TaperedScore};
use crate::board::types::{Color, PieceType};

use super::tables::{PAWN_DOUBLED_PENALTY, PAWN_ISOLATED_PENALTY};

pub(crate) fn pawn_structure(board: &Board) -> TaperedScore {
    let mut score = 0i32;
    for color in [Color::White, Color::Black] {
        let sign = if color == Color::White { 1 } else { -1 };
        let mut file_counts = [0i32; 8];
        let mut pawn_files = Vec::new();
        for &sq in board.piece_list(color).as_slice() {
            if board.piece_at(sq).kind == PieceType::Pawn {
                file_counts[sq.file()] += 1;
                pawn_files.push(sq.file());
            }
        }

        for file in 0..8 {
            if file_counts[file] >= 2 {
                score += sign * PAWN_DOUBLED_PENALTY * (file_counts[file] - 1);
            }
        }

        for file in pawn_files {
            let left = if file > 0 { file_counts[file - 1] > 0 } else { false };
            let right = if file < 7 { file_counts[file + 1] > 0 } else { false };
            if !left && !right {
                score += sign * PAWN_ISOLATED_PENALTY;
            }
        }
    }
    TaperedScore { mg: score, eg: score }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubled_pawns_are_penalized() {
        let board = Board::from_fen_or_startpos("7k/8/8/8/4P3/8/4P3/7K w - - 0 1");
        assert!(pawn_structure(&board).mg < 0);
    }

    #[test]
    fn isolated_pawn_is_penalized() {
        let board = Board::from_fen_or_startpos("7k/8/8/8/8/8/4P3/7K w - - 0 1");
        assert!(pawn_structure(&board).mg < 0);
    }

    #[test]
    fn supported_pawn_chain_has_no_penalty() {
        let board = Board::from_fen_or_startpos("7k/8/8/8/8/3PP3/8/7K w - - 0 1");
        assert_eq!(pawn_structure(&board).mg, 0);
    }
}
