//! Queen exposure: a queen standing on a square the opponent already
//! attacks is penalized, since it invites a tempo-losing attack on the
//! queen the moment the position opens. Middlegame only -- in the
//! endgame an active queen takes these risks on purpose.

use crate::board::state::{Board, TaperedScore};
use crate::board::types::{Color, PieceType};

use super::helpers::AttackInfo;
use super::tables::QUEEN_EXPOSURE_PENALTY;

pub(crate) fn queen_exposure(board: &Board, attacks: &AttackInfo) -> TaperedScore {
    let mut mg = 0i32;
    for color in [Color::White, Color::Black] {
        let sign = if color == Color::White { 1 } else { -1 };
        let opponent = color.opponent();
        for &sq in board.piece_list(color).as_slice() {
            if board.piece_at(sq).kind == PieceType::Queen && attacks.is_attacked(sq, opponent) {
                mg += sign * QUEEN_EXPOSURE_PENALTY;
            }
        }
    }
    TaperedScore { mg, eg: 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queen_attacked_by_pawn_is_penalized() {
        let board = Board::from_fen_or_startpos("7k/8/8/8/3p4/4Q3/8/7K w - - 0 1");
        let attacks = AttackInfo::compute(&board);
        assert!(queen_exposure(&board, &attacks).mg < 0);
    }

    #[test]
    fn undefended_untargeted_queen_has_no_penalty() {
        let board = Board::from_fen_or_startpos("7k/8/8/8/8/4Q3/8/7K w - - 0 1");
        let attacks = AttackInfo::compute(&board);
        assert_eq!(queen_exposure(&board, &attacks).mg, 0);
    }

    #[test]
    fn starting_position_is_symmetric() {
        let board = Board::new();
        let attacks = AttackInfo::compute(&board);
        assert_eq!(queen_exposure(&board, &attacks).mg, 0);
    }
}
