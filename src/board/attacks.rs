//! Pure square-geometry helpers shared by move generation, SEE and the
//! evaluator's attack-zone terms.
//!
//! The board is a mailbox, not a bitboard, so "does piece X on square S
//! attack square T" is answered by stepping file/rank deltas across the
//! mailbox rather than masking precomputed 64-bit tables. This keeps the
//! move generator a direct transliteration of the per-piece-type attack
//! rules rather than a bitboard trick.

use super::state::Board;
use super::types::{Color, PieceType, Square};

pub(crate) const KNIGHT_DELTAS: [(i32, i32); 8] = [
    (1, 2), (2, 1), (2, -1), (1, -2), (-1, -2), (-2, -1), (-2, 1), (-1, 2),
];
pub(crate) const KING_DELTAS: [(i32, i32); 8] = [
    (1, 0), (1, 1), (0, 1), (-1, 1), (-1, 0), (-1, -1), (0, -1), (1, -1),
];
pub(crate) const BISHOP_DIRS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const ROOK_DIRS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

#[inline]
#[must_use]
pub(crate) fn step(sq: Square, df: i32, dr: i32) -> Option<Square> {
    let file = sq.file() as i32 + df;
    let rank = sq.rank() as i32 + dr;
    if (0..8).contains(&file) && (0..8).contains(&rank) {
        Some(Square::new(rank as usize, file as usize))
    } else {
        None
    }
}

impl Board {
    /// Every square a pawn of `color` standing on `sq` attacks diagonally
    /// (not its push square, which is not an attack).
    pub(crate) fn pawn_attack_targets(sq: Square, color: Color) -> [Option<Square>; 2] {
        let dr = if color == Color::White { 1 } else { -1 };
        [step(sq, -1, dr), step(sq, 1, dr)]
    }

    /// Does any piece of `attacker` attack `target`? Checked pawns first,
    /// then knights, bishop/queen diagonals, rook/queen orthogonals, king.
    #[must_use]
    pub fn square_attacked_by(&self, target: Square, attacker: Color) -> bool {
        // Pawns: a pawn attacks diagonally forward from its own
        // perspective, so we look *backward* from the target.
        let back = if attacker == Color::White { -1 } else { 1 };
        for df in [-1, 1] {
            if let Some(from) = step(target, df, back) {
                let p = self.piece_at(from);
                if p.kind == PieceType::Pawn && p.color == attacker {
                    return true;
                }
            }
        }

        for (df, dr) in KNIGHT_DELTAS {
            if let Some(from) = step(target, df, dr) {
                let p = self.piece_at(from);
                if p.kind == PieceType::Knight && p.color == attacker {
                    return true;
                }
            }
        }

        for (df, dr) in BISHOP_DIRS {
            if self.first_blocker_matches(target, df, dr, attacker, &[PieceType::Bishop, PieceType::Queen]) {
                return true;
            }
        }

        for (df, dr) in ROOK_DIRS {
            if self.first_blocker_matches(target, df, dr, attacker, &[PieceType::Rook, PieceType::Queen]) {
                return true;
            }
        }

        for (df, dr) in KING_DELTAS {
            if let Some(from) = step(target, df, dr) {
                let p = self.piece_at(from);
                if p.kind == PieceType::King && p.color == attacker {
                    return true;
                }
            }
        }

        false
    }

    /// Walk from `target` along `(df, dr)` until the edge or first piece;
    /// true iff that piece belongs to `attacker` and is one of `kinds`.
    fn first_blocker_matches(
        &self,
        target: Square,
        df: i32,
        dr: i32,
        attacker: Color,
        kinds: &[PieceType],
    ) -> bool {
        let mut cur = target;
        while let Some(next) = step(cur, df, dr) {
            let p = self.piece_at(next);
            if p.is_some() {
                return p.color == attacker && kinds.contains(&p.kind);
            }
            cur = next;
        }
        false
    }

    /// Count of empty-or-opponent squares reachable by the piece on `sq`
    /// (sliders stop at the first piece, inclusive if it is a capture).
    /// Used by both mobility scoring and SEE-style reasoning.
    pub(crate) fn reachable_squares(&self, sq: Square) -> Vec<Square> {
        let piece = self.piece_at(sq);
        let mut out = Vec::new();
        match piece.kind {
            PieceType::Knight => {
                for (df, dr) in KNIGHT_DELTAS {
                    if let Some(to) = step(sq, df, dr) {
                        if self.piece_at(to).color != piece.color || self.piece_at(to).is_none() {
                            out.push(to);
                        }
                    }
                }
            }
            PieceType::King => {
                for (df, dr) in KING_DELTAS {
                    if let Some(to) = step(sq, df, dr) {
                        if self.piece_at(to).is_none() || self.piece_at(to).color != piece.color {
                            out.push(to);
                        }
                    }
                }
            }
            PieceType::Bishop | PieceType::Rook | PieceType::Queen => {
                let dirs: &[(i32, i32)] = match piece.kind {
                    PieceType::Bishop => &BISHOP_DIRS,
                    PieceType::Rook => &ROOK_DIRS,
                    _ => &ALL_DIRS,
                };
                for &(df, dr) in dirs {
                    let mut cur = sq;
                    while let Some(to) = step(cur, df, dr) {
                        let occ = self.piece_at(to);
                        if occ.is_none() {
                            out.push(to);
                            cur = to;
                        } else {
                            if occ.color != piece.color {
                                out.push(to);
                            }
                            break;
                        }
                    }
                }
            }
            _ => {}
        }
        out
    }
}

const ALL_DIRS: [(i32, i32); 8] = [
    (1, 1), (1, -1), (-1, 1), (-1, -1), (1, 0), (-1, 0), (0, 1), (0, -1),
];
