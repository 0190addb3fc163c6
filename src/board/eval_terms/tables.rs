//! Material values, piece-square tables, and the other tuned constants
//! the evaluation terms read from.
//!
//! PST tables are declared from White's perspective (index 0 = a1, 63 =
//! h8, as in the mailbox); Black pieces look up the vertically mirrored
//! index (`sq ^ 56`), per the resolved mirroring convention recorded in
//! DESIGN.md.

use crate::board::state::TaperedScore;
use crate::board::types::{Color, Piece, PieceType, Square};

pub const BISHOP_PAIR_BONUS: i32 = 40;
pub const TEMPO_BONUS: i32 = 10;
/// Total phase weight at the start of a game (4 minors*1 + 2 rooks*2 +
/// 1 queen*4, per side, doubled): Q=4, R=2, B=1, N=1, totalled out of 24.
pub const PHASE_TOTAL: i32 = 24;

pub const PHASE_WEIGHT: [i32; 7] = [
    0, // None
    0, // Pawn
    1, // Knight
    1, // Bishop
    2, // Rook
    4, // Queen
    0, // King
];

#[rustfmt::skip]
const PAWN_PST_MG: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10,-20,-20, 10, 10,  5,
     5, -5,-10,  0,  0,-10, -5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5,  5, 10, 25, 25, 10,  5,  5,
    10, 10, 20, 30, 30, 20, 10, 10,
    50, 50, 50, 50, 50, 50, 50, 50,
     0,  0,  0,  0,  0,  0,  0,  0,
];
#[rustfmt::skip]
const PAWN_PST_EG: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    10, 10, 10, 10, 10, 10, 10, 10,
    10, 10, 10, 10, 10, 10, 10, 10,
    20, 20, 20, 20, 20, 20, 20, 20,
    35, 35, 35, 35, 35, 35, 35, 35,
    60, 60, 60, 60, 60, 60, 60, 60,
    90, 90, 90, 90, 90, 90, 90, 90,
     0,  0,  0,  0,  0,  0,  0,  0,
];
#[rustfmt::skip]
const KNIGHT_PST_MG: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];
const KNIGHT_PST_EG: [i32; 64] = KNIGHT_PST_MG;
#[rustfmt::skip]
const BISHOP_PST_MG: [i32; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];
const BISHOP_PST_EG: [i32; 64] = BISHOP_PST_MG;
#[rustfmt::skip]
const ROOK_PST_MG: [i32; 64] = [
     0,  0,  0,  5,  5,  0,  0,  0,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     5, 10, 10, 10, 10, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];
const ROOK_PST_EG: [i32; 64] = ROOK_PST_MG;
#[rustfmt::skip]
const QUEEN_PST_MG: [i32; 64] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -10,  5,  5,  5,  5,  5,  0,-10,
      0,  0,  5,  5,  5,  5,  0, -5,
     -5,  0,  5,  5,  5,  5,  0, -5,
    -10,  0,  5,  5,  5,  5,  0,-10,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];
const QUEEN_PST_EG: [i32; 64] = QUEEN_PST_MG;
#[rustfmt::skip]
const KING_PST_MG: [i32; 64] = [
     20, 30, 10,  0,  0, 10, 30, 20,
     20, 20,  0,  0,  0,  0, 20, 20,
    -10,-20,-20,-20,-20,-20,-20,-10,
    -20,-30,-30,-40,-40,-30,-30,-20,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
];
#[rustfmt::skip]
const KING_PST_EG: [i32; 64] = [
    -50,-30,-30,-30,-30,-30,-30,-50,
    -30,-30,  0,  0,  0,  0,-30,-30,
    -30,-10, 20, 30, 30, 20,-10,-30,
    -30,-10, 30, 40, 40, 30,-10,-30,
    -30,-10, 30, 40, 40, 30,-10,-30,
    -30,-10, 20, 30, 30, 20,-10,-30,
    -30,-20,-10,  0,  0,-10,-20,-30,
    -50,-40,-30,-20,-20,-30,-40,-50,
];

fn pst_pair(kind: PieceType) -> (&'static [i32; 64], &'static [i32; 64]) {
    match kind {
        PieceType::Pawn => (&PAWN_PST_MG, &PAWN_PST_EG),
        PieceType::Knight => (&KNIGHT_PST_MG, &KNIGHT_PST_EG),
        PieceType::Bishop => (&BISHOP_PST_MG, &BISHOP_PST_EG),
        PieceType::Rook => (&ROOK_PST_MG, &ROOK_PST_EG),
        PieceType::Queen => (&QUEEN_PST_MG, &QUEEN_PST_EG),
        PieceType::King => (&KING_PST_MG, &KING_PST_EG),
        PieceType::None => (&PAWN_PST_MG, &PAWN_PST_EG),
    }
}

/// Mirror the square vertically for Black so both colours index the same
/// White-relative table. Resolves the source's ambiguous mirroring (see
/// DESIGN.md): the mirror applies to Black, White looks up as-written.
#[inline]
#[must_use]
pub(crate) fn pst_index(color: Color, sq: Square) -> usize {
    match color {
        Color::White => sq.index(),
        Color::Black => sq.index() ^ 56,
    }
}

/// Net (material + PST) contribution of placing `piece` on `sq`, signed so
/// White's pieces add and Black's subtract — folding both colours into
/// one running total per §3's "incremental score... signed by colour".
#[must_use]
pub fn piece_square_value(piece: Piece, sq: Square) -> TaperedScore {
    let (mg_table, eg_table) = pst_pair(piece.kind);
    let idx = pst_index(piece.color, sq);
    let material = piece.kind.value();
    let mg = material + mg_table[idx];
    let eg = material + eg_table[idx];
    match piece.color {
        Color::White => TaperedScore { mg, eg },
        Color::Black => TaperedScore { mg: -mg, eg: -eg },
    }
}

// ----------------------------------------------------------------------
// Mobility: diminishing-returns lookup, first four squares worth 5 each,
// next four 3 each, next four 2 each, the rest 1 each, capped at 27.
// ----------------------------------------------------------------------
#[must_use]
pub fn mobility_bonus(reachable: u32) -> i32 {
    let mut remaining = reachable;
    let mut bonus = 0;
    for (count, value) in [(4, 5), (4, 3), (4, 2)] {
        let take = remaining.min(count);
        bonus += take as i32 * value;
        remaining -= take;
        if remaining == 0 {
            break;
        }
    }
    bonus += remaining as i32 * 1;
    bonus.min(27)
}

// ----------------------------------------------------------------------
// King safety attack-zone stepped penalty table.
// ----------------------------------------------------------------------
#[must_use]
pub fn king_attack_penalty(weighted_attackers: i32) -> i32 {
    if weighted_attackers >= 12 {
        -200
    } else if weighted_attackers >= 9 {
        -160
    } else if weighted_attackers >= 6 {
        -110
    } else if weighted_attackers >= 4 {
        -60
    } else if weighted_attackers >= 2 {
        -25
    } else {
        0
    }
}

/// Weighted attacker contribution per piece type for the king-safety
/// attack zone (Q=4, R=2.5 represented as half-units so the table stays
/// integral, B=2, N=2, P=1). Values are doubled; callers divide by 2.
#[must_use]
pub const fn king_zone_attack_weight_x2(kind: PieceType) -> i32 {
    match kind {
        PieceType::Queen => 8,
        PieceType::Rook => 5,
        PieceType::Bishop => 4,
        PieceType::Knight => 4,
        PieceType::Pawn => 2,
        _ => 0,
    }
}

/// Passed-pawn base bonus indexed by rank of advance (0 = own back rank).
pub const PASSED_PAWN_BASE: [i32; 8] = [0, 10, 15, 25, 45, 80, 140, 0];

/// Centre-control weighted bonus table, peaked on d4/e4/d5/e5.
#[rustfmt::skip]
pub const CENTRE_BONUS: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     0,  5,  5,  5,  5,  5,  5,  0,
     0,  5, 15, 20, 20, 15,  5,  0,
     0,  5, 20, 40, 40, 20,  5,  0,
     0,  5, 20, 40, 40, 20,  5,  0,
     0,  5, 15, 20, 20, 15,  5,  0,
     0,  5,  5,  5,  5,  5,  5,  0,
     0,  0,  0,  0,  0,  0,  0,  0,
];

/// Move-ordering centre bonus: +400 on d4/e4/d5/e5, +150 on the extended
/// centre (the 12 surrounding squares), 0 elsewhere.
#[must_use]
pub fn move_order_centre_bonus(sq: Square) -> i32 {
    let (file, rank) = (sq.file(), sq.rank());
    let is_core = (file == 3 || file == 4) && (rank == 3 || rank == 4);
    if is_core {
        return 400;
    }
    let is_extended = (2..=5).contains(&file) && (2..=5).contains(&rank);
    if is_extended {
        150
    } else {
        0
    }
}

// ----------------------------------------------------------------------
// King safety: pawn shield and file-openness terms (middlegame only).
// The attack-zone stepped penalty lives in `king_attack_penalty` above.
// ----------------------------------------------------------------------
pub const KING_CASTLED_BONUS: i32 = 30;
pub const KING_SHIELD_PAWN_BONUS: i32 = 25;
pub const KING_OPEN_FILE_PENALTY: i32 = -18;

// ----------------------------------------------------------------------
// Outposts (knights and bishops only).
// ----------------------------------------------------------------------
pub const KNIGHT_OUTPOST_BONUS: i32 = 30;
pub const BISHOP_OUTPOST_BONUS: i32 = 18;
pub const OUTPOST_CENTRE_FILE_BONUS: i32 = 10;
pub const OUTPOST_DEFENDED_BONUS: i32 = 12;

// ----------------------------------------------------------------------
// Rook files.
// ----------------------------------------------------------------------
pub const ROOK_OPEN_FILE_BONUS: i32 = 25;
pub const ROOK_SEMI_OPEN_FILE_BONUS: i32 = 15;
pub const ROOK_7TH_RANK_BONUS: i32 = 30;
pub const ROOK_CONNECTED_BONUS: i32 = 15;
pub const ROOK_BOTH_7TH_BONUS: i32 = 25;

// ----------------------------------------------------------------------
// Pawn structure.
// ----------------------------------------------------------------------
pub const PAWN_DOUBLED_PENALTY: i32 = -25;
pub const PAWN_ISOLATED_PENALTY: i32 = -20;

// ----------------------------------------------------------------------
// Passed pawns: endgame king/rook terms layered on `PASSED_PAWN_BASE`.
// ----------------------------------------------------------------------
pub const PASSED_PAWN_KING_SUPPORT_FACTOR: i32 = 5;
pub const PASSED_PAWN_ENEMY_KING_FACTOR: i32 = 8;
pub const PASSED_PAWN_ROOK_BEHIND_FRIENDLY: i32 = 35;
pub const PASSED_PAWN_ROOK_AHEAD_FRIENDLY: i32 = -15;
pub const PASSED_PAWN_ROOK_BEHIND_ENEMY: i32 = -40;
pub const PASSED_PAWN_ROOK_AHEAD_ENEMY: i32 = 20;

// ----------------------------------------------------------------------
// Queen exposure (middlegame only).
// ----------------------------------------------------------------------
pub const QUEEN_EXPOSURE_PENALTY: i32 = -150;
