//! Mobility: for every bishop, knight, rook and queen, count reachable
//! squares (empty-or-opponent, sliders stopping at the first piece) and
//! apply a diminishing-returns bonus. No mg/eg split in the source
//! formula, so both halves of the tapered score get the same value.

use crate::board::state::{Board, TaperedScore};
use crate::board::types::{Color, PieceType};

use super::tables::mobility_bonus;

pub(crate) fn mobility(board: &Board) -> TaperedScore {
    let mut score = 0i32;
    for color in [Color::White, Color::Black] {
        let sign = if color == Color::White { 1 } else { -1 };
        for &sq in board.piece_list(color).as_slice() {
            let kind = board.piece_at(sq).kind;
            if matches!(
                kind,
                PieceType::Knight | PieceType::Bishop | PieceType::Rook | PieceType::Queen
            ) {
                let count = board.reachable_squares(sq).len() as u32;
                score += sign * mobility_bonus(count);
            }
        }
    }
    TaperedScore { mg: score, eg: score }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_mobility_is_symmetric() {
        let board = Board::new();
        let score = mobility(&board);
        assert_eq!(score.mg, 0);
        assert_eq!(score.eg, 0);
    }

    #[test]
    fn knight_in_centre_beats_knight_in_corner() {
        let centre = Board::from_fen_or_startpos("7k/8/8/8/4N3/8/8/7K w - - 0 1");
        let corner = Board::from_fen_or_startpos("7k/8/8/8/8/8/8/N6K w - - 0 1");
        assert!(mobility(&centre).mg > mobility(&corner).mg);
    }

    #[test]
    fn blocked_rook_has_less_mobility_than_open_rook() {
        let open = Board::from_fen_or_startpos("7k/8/8/8/4R3/8/8/7K w - - 0 1");
        let blocked = Board::from_fen_or_startpos("7k/8/8/4P3/4R3/4P3/8/7K w - - 0 1");
        assert!(mobility(&open).mg > mobility(&blocked).mg);
    }
}
