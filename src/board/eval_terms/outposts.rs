//! Outposts: a knight or bishop on ranks 4-6 (relative to its own side)
//! that no enemy pawn can ever challenge is worth a bonus, bigger for
//! knights, with extra credit for a centre file or friendly-pawn support.

use crate::board::state::{Board, TaperedScore};
use crate::board::types::{Color, PieceType, Square};

use super::helpers::relative_rank;
use super::tables::{
    BISHOP_OUTPOST_BONUS, KNIGHT_OUTPOST_BONUS, OUTPOST_CENTRE_FILE_BONUS, OUTPOST_DEFENDED_BONUS,
};

/// True iff some enemy pawn, now or after advancing, could ever attack `sq`.
fn can_be_challenged(board: &Board, sq: Square, color: Color) -> bool {
    let file = sq.file() as i32;
    let opponent = color.opponent();
    for f in [file - 1, file + 1] {
        if !(0..8).contains(&f) {
            continue;
        }
        let file = f as usize;
        for r in 0..8 {
            let p = board.piece_at(Square::new(r, file));
            if p.kind != PieceType::Pawn || p.color != opponent {
                continue;
            }
            let threatens = match color {
                Color::White => r >= sq.rank() + 1,
                Color::Black => r < sq.rank(),
            };
            if threatens {
                return true;
            }
        }
    }
    false
}

pub(crate) fn outposts(board: &Board) -> TaperedScore {
    let mut score = 0i32;
    for color in [Color::White, Color::Black] {
        let sign = if color == Color::White { 1 } else { -1 };
        for &sq in board.piece_list(color).as_slice() {
            let piece = board.piece_at(sq);
            if !matches!(piece.kind, PieceType::Knight | PieceType::Bishop) {
                continue;
            }
            let rel = relative_rank(sq.rank(), color);
            if !(4..=6).contains(&rel) {
                continue;
            }
            if can_be_challenged(board, sq, color) {
                continue;
            }

            let mut bonus = if piece.kind == PieceType::Knight {
                KNIGHT_OUTPOST_BONUS
            } else {
                BISHOP_OUTPOST_BONUS
            };
            if (2..=5).contains(&sq.file()) {
                bonus += OUTPOST_CENTRE_FILE_BONUS;
            }
            if board.square_attacked_by(sq, color) {
                bonus += OUTPOST_DEFENDED_BONUS;
            }
            score += sign * bonus;
        }
    }
    TaperedScore { mg: score, eg: score }
}
