//! Fluent builder for constructing chess positions without going through
//! FEN text -- handy for tests that want a position described square by
//! square.
//!
//! # Example
//! ```
//! use chess_engine::board::{BoardBuilder, Color, PieceType, Square};
//!
//! let board = BoardBuilder::new()
//!     .piece(Square::new(0, 4), Color::White, PieceType::King)
//!     .piece(Square::new(7, 4), Color::Black, PieceType::King)
//!     .piece(Square::new(1, 0), Color::White, PieceType::Pawn)
//!     .side_to_move(Color::White)
//!     .build();
//! ```

use super::state::Board;
use super::types::{CastlingRights, Color, PieceType, Square};

/// A fluent builder for constructing `Board` positions.
#[derive(Clone, Debug)]
pub struct BoardBuilder {
    pieces: Vec<(Square, Color, PieceType)>,
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant_target: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardBuilder {
    /// Create a new empty board builder.
    #[must_use]
    pub fn new() -> Self {
        BoardBuilder {
            pieces: Vec::new(),
            side_to_move: Color::White,
            castling_rights: CastlingRights::none(),
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Create a builder starting from the standard initial position.
    #[must_use]
    pub fn starting_position() -> Self {
        let mut builder = Self::new();

        let back_rank = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];
        for (file, &kind) in back_rank.iter().enumerate() {
            builder.pieces.push((Square::new(0, file), Color::White, kind));
            builder.pieces.push((Square::new(7, file), Color::Black, kind));
        }
        for file in 0..8 {
            builder.pieces.push((Square::new(1, file), Color::White, PieceType::Pawn));
            builder.pieces.push((Square::new(6, file), Color::Black, PieceType::Pawn));
        }

        builder.castling_rights = CastlingRights::all();
        builder
    }

    /// Place a piece on the board, replacing whatever already occupies the
    /// square.
    #[must_use]
    pub fn piece(mut self, square: Square, color: Color, kind: PieceType) -> Self {
        self.pieces.retain(|(sq, _, _)| *sq != square);
        self.pieces.push((square, color, kind));
        self
    }

    /// Remove a piece from a square.
    #[must_use]
    pub fn clear(mut self, square: Square) -> Self {
        self.pieces.retain(|(sq, _, _)| *sq != square);
        self
    }

    /// Set the side to move.
    #[must_use]
    pub fn side_to_move(mut self, color: Color) -> Self {
        self.side_to_move = color;
        self
    }

    /// Set castling rights from a `CastlingRights` value.
    #[must_use]
    pub fn castling(mut self, rights: CastlingRights) -> Self {
        self.castling_rights = rights;
        self
    }

    /// Enable kingside castling for a color.
    #[must_use]
    pub fn castle_kingside(mut self, color: Color) -> Self {
        self.castling_rights.set(color, true);
        self
    }

    /// Enable queenside castling for a color.
    #[must_use]
    pub fn castle_queenside(mut self, color: Color) -> Self {
        self.castling_rights.set(color, false);
        self
    }

    /// Enable all castling rights.
    #[must_use]
    pub fn all_castling_rights(mut self) -> Self {
        self.castling_rights = CastlingRights::all();
        self
    }

    /// Disable all castling rights.
    #[must_use]
    pub fn no_castling_rights(mut self) -> Self {
        self.castling_rights = CastlingRights::none();
        self
    }

    /// Set the en passant target square.
    #[must_use]
    pub fn en_passant(mut self, target: Square) -> Self {
        self.en_passant_target = Some(target);
        self
    }

    /// Clear the en passant target.
    #[must_use]
    pub fn clear_en_passant(mut self) -> Self {
        self.en_passant_target = None;
        self
    }

    /// Set the halfmove clock (for the fifty-move rule).
    #[must_use]
    pub fn halfmove_clock(mut self, clock: u32) -> Self {
        self.halfmove_clock = clock;
        self
    }

    /// Set the fullmove number.
    #[must_use]
    pub fn fullmove_number(mut self, number: u32) -> Self {
        self.fullmove_number = number;
        self
    }

    /// Build the board, placing every piece and recomputing the Zobrist
    /// hash and incremental score from scratch.
    #[must_use]
    pub fn build(self) -> Board {
        let mut board = Board::empty();

        for (square, color, kind) in self.pieces {
            board.set_piece(square, super::types::Piece::new(kind, color));
        }

        board.side_to_move = self.side_to_move;
        board.castling_rights = self.castling_rights;
        board.en_passant_target = self.en_passant_target;
        board.halfmove_clock = self.halfmove_clock;
        board.fullmove_number = self.fullmove_number;
        board.recompute_hash_and_score();

        board
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_matches_board_new() {
        let built = BoardBuilder::starting_position().build();
        let standard = Board::new();
        assert_eq!(built.to_fen(), standard.to_fen());
    }

    #[test]
    fn empty_board_has_only_placed_pieces() {
        let board = BoardBuilder::new()
            .piece(Square::new(0, 4), Color::White, PieceType::King)
            .piece(Square::new(7, 4), Color::Black, PieceType::King)
            .build();

        assert!(board.piece_at(Square::new(0, 4)).is_some());
        assert!(board.piece_at(Square::new(7, 4)).is_some());
        assert!(board.piece_at(Square::new(0, 0)).is_none());
    }

    #[test]
    fn castling_rights_are_set_precisely() {
        let board = BoardBuilder::starting_position()
            .no_castling_rights()
            .castle_kingside(Color::White)
            .build();

        let rights = board.castling_rights();
        assert!(rights.has(Color::White, true));
        assert!(!rights.has(Color::White, false));
        assert!(!rights.has(Color::Black, true));
        assert!(!rights.has(Color::Black, false));
    }

    #[test]
    fn side_to_move_is_respected() {
        let board = BoardBuilder::new()
            .piece(Square::new(0, 4), Color::White, PieceType::King)
            .piece(Square::new(7, 4), Color::Black, PieceType::King)
            .side_to_move(Color::Black)
            .build();

        assert_eq!(board.side_to_move(), Color::Black);
    }

    #[test]
    fn clear_removes_only_the_named_square() {
        let board = BoardBuilder::starting_position()
            .clear(Square::new(0, 0))
            .build();

        assert!(board.piece_at(Square::new(0, 0)).is_none());
        assert!(board.piece_at(Square::new(0, 1)).is_some());
    }

    #[test]
    fn en_passant_target_is_kept() {
        let board = BoardBuilder::new()
            .piece(Square::new(4, 3), Color::White, PieceType::Pawn)
            .piece(Square::new(4, 4), Color::Black, PieceType::Pawn)
            .en_passant(Square::new(5, 4))
            .build();

        assert_eq!(board.en_passant_target(), Some(Square::new(5, 4)));
    }
}
