//! Pseudo-legal and legal move generation.
//!
//! Generation is a pure function of the mailbox, side to move, en-passant
//! square and castling rights; it reads the piece list of the side to move
//! rather than scanning all 64 squares. Legality (does the move leave one's
//! own king in check) is checked by the make/undo filter in
//! [`Board::generate_legal_moves`], not by the generator itself.

use super::attacks::{step, BISHOP_DIRS, KING_DELTAS, KNIGHT_DELTAS, ROOK_DIRS};
use super::state::Board;
use super::types::{Color, Move, MoveList, PieceType, Square, PROMOTION_PIECES};

impl Board {
    /// All pseudo-legal moves for the side to move.
    #[must_use]
    pub fn generate_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        self.generate_moves_into(&mut moves, false);
        moves
    }

    /// Captures and promotions only, for quiescence search. Never includes castling.
    #[must_use]
    pub fn generate_tactical_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        self.generate_moves_into(&mut moves, true);
        moves
    }

    /// Pseudo-legal moves filtered by make/check/undo; the only legality filter
    /// the engine ever needs.
    #[must_use]
    pub fn generate_legal_moves(&mut self) -> MoveList {
        let side = self.side_to_move();
        let pseudo = self.generate_moves();
        let mut legal = MoveList::new();
        for &mv in pseudo.iter() {
            self.make_move(mv);
            let in_check = self.square_attacked_by(self.king_square(side), side.opponent());
            self.unmake_move(mv);
            if !in_check {
                legal.push(mv);
            }
        }
        legal
    }

    /// True iff `mv` survives the make/check/undo legality filter from the
    /// current position. Used to validate TT/PV moves cheaply without
    /// regenerating the whole move list.
    #[must_use]
    pub fn is_legal_move(&mut self, mv: Move) -> bool {
        let side = self.side_to_move();
        let pseudo = self.generate_moves();
        if !pseudo.iter().any(|m| *m == mv) {
            return false;
        }
        self.make_move(mv);
        let in_check = self.square_attacked_by(self.king_square(side), side.opponent());
        self.unmake_move(mv);
        !in_check
    }

    /// Count leaf positions reachable in exactly `depth` plies; the
    /// standard move-generator correctness check. Walks the make/undo
    /// stack rather than cloning the board at each ply.
    #[must_use]
    pub fn perft(&mut self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = self.generate_legal_moves();
        if depth == 1 {
            return moves.len() as u64;
        }
        let mut nodes = 0u64;
        for &mv in moves.iter() {
            self.make_move(mv);
            nodes += self.perft(depth - 1);
            self.unmake_move(mv);
        }
        nodes
    }

    fn generate_moves_into(&self, out: &mut MoveList, tactical_only: bool) {
        let side = self.side_to_move();
        let squares: Vec<Square> = self.piece_list(side).as_slice().to_vec();
        for sq in squares {
            let piece = self.piece_at(sq);
            match piece.kind {
                PieceType::Pawn => self.generate_pawn_moves(sq, side, out, tactical_only),
                PieceType::Knight => self.generate_stepper_moves(sq, side, &KNIGHT_DELTAS, out, tactical_only),
                PieceType::King => {
                    self.generate_stepper_moves(sq, side, &KING_DELTAS, out, tactical_only);
                    if !tactical_only {
                        self.generate_castling_moves(sq, side, out);
                    }
                }
                PieceType::Bishop => self.generate_slider_moves(sq, side, &BISHOP_DIRS, out, tactical_only),
                PieceType::Rook => self.generate_slider_moves(sq, side, &ROOK_DIRS, out, tactical_only),
                PieceType::Queen => {
                    self.generate_slider_moves(sq, side, &BISHOP_DIRS, out, tactical_only);
                    self.generate_slider_moves(sq, side, &ROOK_DIRS, out, tactical_only);
                }
                PieceType::None => {}
            }
        }
    }

    fn generate_pawn_moves(&self, sq: Square, side: Color, out: &mut MoveList, tactical_only: bool) {
        let dr = if side == Color::White { 1 } else { -1 };
        let start_rank = if side == Color::White { 1 } else { 6 };
        let last_rank = if side == Color::White { 7 } else { 0 };

        // Single and double advance.
        if let Some(one) = step(sq, 0, dr) {
            if self.piece_at(one).is_none() {
                if one.rank() as usize == last_rank {
                    for promo in PROMOTION_PIECES {
                        out.push(Move::promotion(sq, one, promo));
                    }
                } else if !tactical_only {
                    out.push(Move::quiet(sq, one));
                }

                if !tactical_only && sq.rank() as usize == start_rank {
                    if let Some(two) = step(sq, 0, 2 * dr) {
                        if self.piece_at(two).is_none() {
                            out.push(Move::double_pawn_push(sq, two));
                        }
                    }
                }
            }
        }

        // Diagonal captures and en passant.
        for df in [-1, 1] {
            let Some(to) = step(sq, df, dr) else { continue };
            let target = self.piece_at(to);
            if target.is_some() && target.color != side {
                if to.rank() as usize == last_rank {
                    for promo in PROMOTION_PIECES {
                        out.push(Move::promotion_capture(sq, to, promo, target.kind));
                    }
                } else {
                    out.push(Move::capture(sq, to, target.kind));
                }
            } else if target.is_none() && self.en_passant_target() == Some(to) {
                out.push(Move::en_passant(sq, to));
            }
        }
    }

    fn generate_stepper_moves(
        &self,
        sq: Square,
        side: Color,
        deltas: &[(i32, i32); 8],
        out: &mut MoveList,
        tactical_only: bool,
    ) {
        for &(df, dr) in deltas {
            let Some(to) = step(sq, df, dr) else { continue };
            let target = self.piece_at(to);
            if target.is_none() {
                if !tactical_only {
                    out.push(Move::quiet(sq, to));
                }
            } else if target.color != side {
                out.push(Move::capture(sq, to, target.kind));
            }
        }
    }

    fn generate_slider_moves(
        &self,
        sq: Square,
        side: Color,
        dirs: &[(i32, i32); 4],
        out: &mut MoveList,
        tactical_only: bool,
    ) {
        for &(df, dr) in dirs {
            let mut cur = sq;
            while let Some(to) = step(cur, df, dr) {
                let target = self.piece_at(to);
                if target.is_none() {
                    if !tactical_only {
                        out.push(Move::quiet(sq, to));
                    }
                    cur = to;
                } else {
                    if target.color != side {
                        out.push(Move::capture(sq, to, target.kind));
                    }
                    break;
                }
            }
        }
    }

    fn generate_castling_moves(&self, king_sq: Square, side: Color, out: &mut MoveList) {
        let rights = self.castling_rights();
        let back_rank = if side == Color::White { 0 } else { 7 };
        if king_sq.rank() as usize != back_rank || king_sq.file() != 4 {
            return;
        }
        let opponent = side.opponent();
        if self.square_attacked_by(king_sq, opponent) {
            return;
        }

        if rights.has(side, true) {
            let rook_sq = Square::new(back_rank, 7);
            let rook = self.piece_at(rook_sq);
            let empty = (5..7).all(|f| self.piece_at(Square::new(back_rank, f)).is_none());
            if rook.kind == PieceType::Rook && rook.color == side && empty {
                let path_clear = (5..=6).all(|f| {
                    !self.square_attacked_by(Square::new(back_rank, f), opponent)
                });
                if path_clear {
                    out.push(Move::castling(king_sq, Square::new(back_rank, 6)));
                }
            }
        }

        if rights.has(side, false) {
            let rook_sq = Square::new(back_rank, 0);
            let rook = self.piece_at(rook_sq);
            let empty = (1..4).all(|f| self.piece_at(Square::new(back_rank, f)).is_none());
            if rook.kind == PieceType::Rook && rook.color == side && empty {
                // b-file (f=1) must be empty but need not be unattacked.
                let path_clear = (2..=3).all(|f| {
                    !self.square_attacked_by(Square::new(back_rank, f), opponent)
                });
                if path_clear {
                    out.push(Move::castling(king_sq, Square::new(back_rank, 2)));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_has_twenty_moves() {
        let board = Board::new();
        assert_eq!(board.generate_moves().len(), 20);
    }

    #[test]
    fn starting_position_has_twenty_legal_moves() {
        let mut board = Board::new();
        assert_eq!(board.generate_legal_moves().len(), 20);
    }

    #[test]
    fn pinned_piece_cannot_move_off_pin_line() {
        // Black rook on e8 pins white's e-file; a white knight on e2 may not
        // hop away and expose the king on e1.
        let mut board = Board::from_fen_or_startpos("4r3/8/8/8/8/8/4N3/4K3 w - - 0 1");
        let legal = board.generate_legal_moves();
        assert!(!legal.iter().any(|m| m.from() == Square::new(1, 4) && m.to() == Square::new(3, 5)));
    }

    #[test]
    fn castling_excluded_from_tactical_moves() {
        let board = Board::new();
        let tactical = board.generate_tactical_moves();
        assert!(tactical.iter().all(|m| !m.is_castling()));
    }
}
