//! King safety: a castled bonus, a pawn shield, open-file penalties on the
//! three files around the king, and a stepped penalty for weighted enemy
//! attackers in the nine-square king zone. Middlegame only.

use crate::board::state::{Board, TaperedScore};
use crate::board::types::{Color, PieceType, Square};

use super::helpers::AttackInfo;
use super::tables::{
    king_attack_penalty, KING_CASTLED_BONUS, KING_OPEN_FILE_PENALTY, KING_SHIELD_PAWN_BONUS,
};

pub(crate) fn king_safety(board: &Board, attacks: &AttackInfo) -> TaperedScore {
    let mut mg = 0i32;
    for color in [Color::White, Color::Black] {
        let sign = if color == Color::White { 1 } else { -1 };
        let king_sq = board.king_square(color);
        let back_rank = if color == Color::White { 0 } else { 7 };

        if king_sq.rank() == back_rank && matches!(king_sq.file(), 2 | 6) {
            mg += sign * KING_CASTLED_BONUS;
        }

        let shield_rank = if color == Color::White {
            king_sq.rank().checked_add(1)
        } else {
            king_sq.rank().checked_sub(1)
        };

        let king_file = king_sq.file() as i32;
        for f in (king_file - 1)..=(king_file + 1) {
            if !(0..8).contains(&f) {
                continue;
            }
            let file = f as usize;

            let has_friendly_pawn = (0..8).any(|r| {
                let p = board.piece_at(Square::new(r, file));
                p.kind == PieceType::Pawn && p.color == color
            });
            if !has_friendly_pawn {
                mg += sign * KING_OPEN_FILE_PENALTY;
            }

            if let Some(sr) = shield_rank {
                let p = board.piece_at(Square::new(sr, file));
                if p.kind == PieceType::Pawn && p.color == color {
                    mg += sign * KING_SHIELD_PAWN_BONUS;
                }
            }
        }

        let opponent = color.opponent();
        let (kf, kr) = (king_sq.file() as i32, king_sq.rank() as i32);
        let mut weighted_x2 = 0i32;
        for df in -1..=1 {
            for dr in -1..=1 {
                let (f, r) = (kf + df, kr + dr);
                if (0..8).contains(&f) && (0..8).contains(&r) {
                    let sq = Square::new(r as usize, f as usize);
                    weighted_x2 += attacks.weight_x2(sq, opponent);
                }
            }
        }
        mg += sign * king_attack_penalty(weighted_x2 / 2);
    }

    TaperedScore { mg, eg: 0 }
}
