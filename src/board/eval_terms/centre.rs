//! Centre control: knights and bishops are rewarded for occupying the
//! centre, peaking on d4/e4/d5/e5 and decaying outward.

use crate::board::state::{Board, TaperedScore};
use crate::board::types::{Color, PieceType};

use super::tables::CENTRE_BONUS;

pub(crate) fn centre_control(board: &Board) -> TaperedScore {
    let mut score = 0i32;
    for color in [Color::White, Color::Black] {
        let sign = if color == Color::White { 1 } else { -1 };
        for &sq in board.piece_list(color).as_slice() {
            let kind = board.piece_at(sq).kind;
            if matches!(kind, PieceType::Knight | PieceType::Bishop) {
                score += sign * CENTRE_BONUS[sq.index()];
            }
        }
    }
    TaperedScore { mg: score, eg: score }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knight_on_d4_beats_knight_in_corner() {
        let centre = Board::from_fen_or_startpos("7k/8/8/8/3N4/8/8/7K w - - 0 1");
        let corner = Board::from_fen_or_startpos("7k/8/8/8/8/8/8/N6K w - - 0 1");
        assert!(centre_control(&centre).mg > centre_control(&corner).mg);
    }

    #[test]
    fn starting_position_is_symmetric() {
        let board = Board::new();
        let score = centre_control(&board);
        assert_eq!(score.mg, 0);
        assert_eq!(score.eg, 0);
    }

    #[test]
    fn rooks_and_pawns_are_ignored() {
        let board = Board::from_fen_or_startpos("7k/8/8/8/3R4/8/8/7K w - - 0 1");
        assert_eq!(centre_control(&board).mg, 0);
    }
}
