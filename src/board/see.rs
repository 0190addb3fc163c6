//! Static Exchange Evaluation (SEE): simulate the full capture sequence on
//! one square and return the material balance for the side initiating it.
//!
//! The mailbox has no precomputed attack bitboards, so each step of the
//! exchange re-derives "what is the least valuable piece of colour X
//! attacking this square" by ray-walking a scratch copy of the mailbox,
//! the same way [`super::attacks::step`]-based move generation does.

use super::attacks::{step, BISHOP_DIRS, KING_DELTAS, KNIGHT_DELTAS, ROOK_DIRS};
use super::state::Board;
use super::types::{Color, Piece, PieceType, Square};

const SEE_VALUES: [i32; 7] = [
    0,     // None
    100,   // Pawn
    320,   // Knight
    330,   // Bishop
    500,   // Rook
    900,   // Queen
    20000, // King
];

fn pawn_attacker(occ: &[Piece; 64], target: Square, color: Color) -> Option<Square> {
    let back = if color == Color::White { -1 } else { 1 };
    [-1, 1].into_iter().find_map(|df| {
        let from = step(target, df, back)?;
        let p = occ[from.index()];
        (p.kind == PieceType::Pawn && p.color == color).then_some(from)
    })
}

fn knight_attacker(occ: &[Piece; 64], target: Square, color: Color) -> Option<Square> {
    KNIGHT_DELTAS.into_iter().find_map(|(df, dr)| {
        let from = step(target, df, dr)?;
        let p = occ[from.index()];
        (p.kind == PieceType::Knight && p.color == color).then_some(from)
    })
}

fn king_attacker(occ: &[Piece; 64], target: Square, color: Color) -> Option<Square> {
    KING_DELTAS.into_iter().find_map(|(df, dr)| {
        let from = step(target, df, dr)?;
        let p = occ[from.index()];
        (p.kind == PieceType::King && p.color == color).then_some(from)
    })
}

/// Ray-walk in each of `dirs` from `target` outward until the first
/// occupied square or the edge; if that square holds `kind`/`color`,
/// return it.
fn ray_attacker(
    occ: &[Piece; 64],
    target: Square,
    dirs: &[(i32, i32); 4],
    color: Color,
    kind: PieceType,
) -> Option<Square> {
    for &(df, dr) in dirs {
        let mut cur = target;
        while let Some(next) = step(cur, df, dr) {
            let p = occ[next.index()];
            if p.is_some() {
                if p.color == color && p.kind == kind {
                    return Some(next);
                }
                break;
            }
            cur = next;
        }
    }
    None
}

/// Any piece of `color` attacking `target`, least valuable first -- the
/// standard order for resolving a capture sequence.
fn least_valuable_attacker(occ: &[Piece; 64], target: Square, color: Color) -> Option<(Square, PieceType)> {
    if let Some(sq) = pawn_attacker(occ, target, color) {
        return Some((sq, PieceType::Pawn));
    }
    if let Some(sq) = knight_attacker(occ, target, color) {
        return Some((sq, PieceType::Knight));
    }
    if let Some(sq) = ray_attacker(occ, target, &BISHOP_DIRS, color, PieceType::Bishop) {
        return Some((sq, PieceType::Bishop));
    }
    if let Some(sq) = ray_attacker(occ, target, &ROOK_DIRS, color, PieceType::Rook) {
        return Some((sq, PieceType::Rook));
    }
    if let Some(sq) = ray_attacker(occ, target, &BISHOP_DIRS, color, PieceType::Queen) {
        return Some((sq, PieceType::Queen));
    }
    if let Some(sq) = ray_attacker(occ, target, &ROOK_DIRS, color, PieceType::Queen) {
        return Some((sq, PieceType::Queen));
    }
    if let Some(sq) = king_attacker(occ, target, color) {
        return Some((sq, PieceType::King));
    }
    None
}

/// Does any piece of `color` still attack `target`? Used to veto a king
/// "capture" in the exchange simulation that would walk into check.
fn any_attacker(occ: &[Piece; 64], target: Square, color: Color) -> bool {
    least_valuable_attacker(occ, target, color).is_some()
}

impl Board {
    /// Static Exchange Evaluation for the capture `from` -> `to`.
    ///
    /// Positive means the side moving wins material overall once every
    /// profitable recapture has been played out; negative means it loses
    /// material; zero is an even trade or (if `to` holds nothing and isn't
    /// the en-passant square) not a capture at all.
    #[must_use]
    pub fn see(&self, from: Square, to: Square) -> i32 {
        let attacker_piece = self.piece_at(from);
        if attacker_piece.is_none() {
            return 0;
        }
        let victim = if self.piece_at(to).is_some() {
            self.piece_at(to).kind
        } else if self.en_passant_target() == Some(to) {
            PieceType::Pawn
        } else {
            return 0;
        };
        self.see_impl(from, to, attacker_piece.kind, attacker_piece.color, victim)
    }

    /// SEE with the attacker/victim kinds already known, skipping the
    /// redundant lookups `see` would otherwise do.
    #[must_use]
    pub fn see_with_pieces(&self, from: Square, to: Square, attacker: PieceType, victim: PieceType) -> i32 {
        let color = self.piece_at(from).color;
        self.see_impl(from, to, attacker, color, victim)
    }

    fn see_impl(&self, from: Square, to: Square, attacker: PieceType, color: Color, victim: PieceType) -> i32 {
        const MAX_DEPTH: usize = 32;
        let mut occ = self.mailbox;
        let mut gain = [0i32; MAX_DEPTH];
        let mut depth = 0usize;
        gain[0] = SEE_VALUES[victim.index()];

        let mut cur_from = from;
        let mut cur_attacker = attacker;
        let mut cur_color = color;

        loop {
            occ[cur_from.index()] = Piece::NONE;
            occ[to.index()] = Piece::new(cur_attacker, cur_color);

            let side = cur_color.opponent();
            let Some((next_from, next_kind)) = least_valuable_attacker(&occ, to, side) else {
                break;
            };

            if next_kind == PieceType::King && any_attacker(&occ, to, cur_color) {
                break;
            }

            depth += 1;
            if depth >= MAX_DEPTH {
                break;
            }
            gain[depth] = SEE_VALUES[cur_attacker.index()] - gain[depth - 1];
            if (-gain[depth - 1]).max(gain[depth]) < 0 {
                break;
            }

            cur_from = next_from;
            cur_attacker = next_kind;
            cur_color = side;
        }

        while depth > 0 {
            depth -= 1;
            gain[depth] = -(-gain[depth]).max(gain[depth + 1]);
        }
        gain[0]
    }

    /// True iff the capture `from` -> `to` wins at least `threshold`
    /// centipawns by SEE. Cheaper than comparing the exact value when
    /// callers only need a yes/no answer for pruning.
    #[inline]
    #[must_use]
    pub fn see_ge(&self, from: Square, to: Square, threshold: i32) -> bool {
        self.see(from, to) >= threshold
    }

    /// Is moving the piece on `from` to the empty square `to` unlikely to
    /// drop material to an immediate recapture? A cheap approximation
    /// (checks only the moved piece's own safety, not the whole exchange)
    /// used to filter quiet moves in move ordering and pruning.
    #[must_use]
    pub fn see_quiet_safe(&self, from: Square, to: Square) -> bool {
        let piece = self.piece_at(from);
        if piece.is_none() {
            return true;
        }
        let mut occ = self.mailbox;
        occ[from.index()] = Piece::NONE;
        occ[to.index()] = piece;
        let Some((_, attacker_kind)) = least_valuable_attacker(&occ, to, piece.color.opponent()) else {
            return true;
        };
        SEE_VALUES[attacker_kind.index()] < SEE_VALUES[piece.kind.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_board(fen: &str) -> Board {
        Board::from_fen_or_startpos(fen)
    }

    #[test]
    fn simple_pawn_capture_wins_a_pawn() {
        let board = make_board("8/8/8/3p4/4P3/8/8/8 w - - 0 1");
        let see = board.see(Square::new(3, 4), Square::new(4, 3));
        assert_eq!(see, 100);
    }

    #[test]
    fn defended_pawn_capture_is_an_even_trade() {
        let board = make_board("8/8/2p5/3p4/4P3/8/8/8 w - - 0 1");
        let see = board.see(Square::new(3, 4), Square::new(4, 3));
        assert_eq!(see, 0);
    }

    #[test]
    fn knight_takes_defended_pawn_loses_material() {
        let board = make_board("8/8/2p5/3p4/4N3/8/8/8 w - - 0 1");
        let see = board.see(Square::new(3, 4), Square::new(4, 3));
        assert!(see < 0);
    }

    #[test]
    fn queen_takes_defended_pawn_loses_heavily() {
        let board = make_board("8/8/2p5/3p4/4Q3/8/8/8 w - - 0 1");
        let see = board.see(Square::new(3, 4), Square::new(4, 3));
        assert!(see < -700);
    }

    #[test]
    fn undefended_rook_capture_wins_the_rook() {
        let board = make_board("8/8/8/3r4/8/8/8/3R4 w - - 0 1");
        let see = board.see(Square::new(0, 3), Square::new(4, 3));
        assert_eq!(see, 500);
    }

    #[test]
    fn rook_xray_behind_rook_wins_a_rook_with_no_recapture() {
        let board = make_board("3r4/8/8/8/8/8/8/R2R4 w - - 0 1");
        let see = board.see(Square::new(0, 0), Square::new(7, 3));
        assert_eq!(see, 500);
    }

    #[test]
    fn bishop_xray_exchange_nets_a_bishop() {
        let board = make_board("8/8/5b2/4b3/3B4/2B5/8/8 w - - 0 1");
        let see = board.see(Square::new(2, 2), Square::new(4, 4));
        assert!(see > 0);
    }

    #[test]
    fn rook_xray_recapture_wins_undefended_rook() {
        let board = make_board("8/8/8/3r4/8/8/8/R2R4 w - - 0 1");
        let see = board.see(Square::new(0, 3), Square::new(4, 3));
        assert_eq!(see, 500);
    }

    #[test]
    fn bishop_behind_queen_wins_undefended_bishop() {
        let board = make_board("8/8/5b2/8/3B4/8/1Q6/8 w - - 0 1");
        let see = board.see(Square::new(3, 3), Square::new(5, 5));
        assert_eq!(see, 330);
    }

    #[test]
    fn knight_takes_undefended_pawn() {
        let board = make_board("8/8/8/3p4/2N1N3/8/8/8 w - - 0 1");
        let see = board.see(Square::new(3, 2), Square::new(4, 3));
        assert_eq!(see, 100);
    }

    #[test]
    fn queen_takes_rook_defended_by_pawn_loses_material() {
        let board = make_board("8/8/1p6/2r5/3Q4/8/8/8 w - - 0 1");
        let see = board.see(Square::new(3, 3), Square::new(4, 2));
        assert!(see < 0);
    }

    #[test]
    fn equal_knight_trade() {
        let board = make_board("8/8/8/3n4/2N5/8/8/8 w - - 0 1");
        let see = board.see(Square::new(3, 2), Square::new(4, 3));
        assert_eq!(see, 320);
    }

    #[test]
    fn bishop_trade_with_no_recapture_wins_a_bishop() {
        let board = make_board("8/8/8/3b4/4B3/5B2/8/8 w - - 0 1");
        let see = board.see(Square::new(3, 4), Square::new(4, 3));
        assert_eq!(see, 330);
    }

    #[test]
    fn en_passant_wins_a_pawn() {
        let board = make_board("8/8/8/3Pp3/8/8/8/8 w - e6 0 1");
        let see = board.see(Square::new(4, 3), Square::new(5, 4));
        assert_eq!(see, 100);
    }

    #[test]
    fn non_capture_move_scores_zero() {
        let board = make_board("8/8/8/8/4N3/8/8/8 w - - 0 1");
        let see = board.see(Square::new(3, 4), Square::new(5, 5));
        assert_eq!(see, 0);
    }

    #[test]
    fn undefended_piece_capture_wins_it_outright() {
        let board = make_board("8/8/8/3r4/8/8/8/3R4 w - - 0 1");
        let see = board.see(Square::new(0, 3), Square::new(4, 3));
        assert_eq!(see, 500);
    }

    #[test]
    fn pawn_takes_queen_defended_by_queen_still_wins_big() {
        let board = make_board("8/8/3q4/2q5/3P4/8/8/8 w - - 0 1");
        let see = board.see(Square::new(3, 3), Square::new(4, 2));
        assert!(see > 700);
    }

    #[test]
    fn see_ge_reports_winning_and_losing_thresholds() {
        let board = make_board("8/8/8/3p4/4N3/8/8/8 w - - 0 1");
        let (from, to) = (Square::new(3, 4), Square::new(4, 3));
        assert!(board.see_ge(from, to, 0));
        assert!(board.see_ge(from, to, 100));
        assert!(!board.see_ge(from, to, 200));
    }

    #[test]
    fn see_ge_losing_capture_fails_threshold() {
        let board = make_board("8/8/2p5/3p4/4Q3/8/8/8 w - - 0 1");
        let (from, to) = (Square::new(3, 4), Square::new(4, 3));
        assert!(!board.see_ge(from, to, 0));
    }

    #[test]
    fn quiet_move_into_pawn_attack_is_unsafe_for_a_knight() {
        let board = make_board("8/8/8/8/3p4/8/1N6/8 w - - 0 1");
        assert!(!board.see_quiet_safe(Square::new(1, 1), Square::new(3, 2)));
    }

    #[test]
    fn quiet_move_to_an_unattacked_square_is_safe() {
        let board = make_board("8/8/8/8/8/8/1N6/8 w - - 0 1");
        assert!(board.see_quiet_safe(Square::new(1, 1), Square::new(3, 2)));
    }
}
