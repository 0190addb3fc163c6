//! FEN parsing and serialization, plus UCI long-algebraic move notation.

use std::fmt;
use std::str::FromStr;

use super::error::{FenError, MoveParseError};
use super::state::Board;
use super::types::{CastlingRights, Color, Move, Piece, PieceType, Square};

const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Board {
    /// Parse a board position from FEN notation.
    ///
    /// Returns an error describing the first thing wrong with `fen` rather
    /// than panicking or guessing; use [`Board::from_fen_or_startpos`] where
    /// a fallback is preferable to a `Result`.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let mut board = Board::empty();
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() < 4 {
            return Err(FenError::TooFewParts { found: parts.len() });
        }

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidRank { rank: ranks.len() });
        }
        for (rank_from_top, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_from_top;
            let mut file = 0usize;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                } else {
                    if file >= 8 {
                        return Err(FenError::TooManyFiles {
                            rank: rank_from_top,
                            files: file + 1,
                        });
                    }
                    let color = if c.is_uppercase() { Color::White } else { Color::Black };
                    let kind = PieceType::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                    board.set_piece(Square::new(rank, file), Piece::new(kind, color));
                    file += 1;
                }
            }
            if file != 8 {
                return Err(FenError::TooManyFiles { rank: rank_from_top, files: file });
            }
        }

        board.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove { found: other.to_string() });
            }
        };

        let mut castling = CastlingRights::none();
        if parts[2] != "-" {
            for c in parts[2].chars() {
                match c {
                    'K' => castling.set(Color::White, true),
                    'Q' => castling.set(Color::White, false),
                    'k' => castling.set(Color::Black, true),
                    'q' => castling.set(Color::Black, false),
                    _ => return Err(FenError::InvalidCastling { char: c }),
                }
            }
        }
        board.castling_rights = castling;

        board.en_passant_target = if parts[3] == "-" {
            None
        } else {
            let sq: Square = parts[3]
                .parse()
                .map_err(|_| FenError::InvalidEnPassant { found: parts[3].to_string() })?;
            Some(sq)
        };

        board.halfmove_clock = parts.get(4).and_then(|s| s.parse().ok()).unwrap_or(0);
        board.fullmove_number = parts.get(5).and_then(|s| s.parse().ok()).unwrap_or(1);

        board.recompute_hash_and_score();
        Ok(board)
    }

    /// Parse a board position from FEN notation, falling back to the
    /// standard starting position if `fen` is malformed. Used throughout
    /// tests and by UCI's `position fen ...` handling, where a bad string
    /// from an external source shouldn't take down the engine.
    #[must_use]
    pub fn from_fen_or_startpos(fen: &str) -> Self {
        Board::try_from_fen(fen).unwrap_or_else(|_err| {
            #[cfg(feature = "logging")]
            log::warn!("malformed FEN {fen:?} ({_err}), falling back to the starting position");
            Board::try_from_fen(STARTPOS).expect("startpos fen is valid")
        })
    }

    /// Parse a board position from FEN notation.
    ///
    /// # Panics
    /// Panics if the FEN string is invalid. Use `try_from_fen` for fallible parsing.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        Self::try_from_fen(fen).expect("invalid FEN string")
    }

    /// Convert the board position to FEN notation.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows = Vec::with_capacity(8);
        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8 {
                let piece = self.piece_at(Square::new(rank, file));
                if piece.is_some() {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(piece.kind.to_fen_char(piece.color).expect("occupied square has a char"));
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let active = if self.side_to_move == Color::White { "w" } else { "b" };

        let mut castling = String::new();
        if self.castling_rights.has(Color::White, true) {
            castling.push('K');
        }
        if self.castling_rights.has(Color::White, false) {
            castling.push('Q');
        }
        if self.castling_rights.has(Color::Black, true) {
            castling.push('k');
        }
        if self.castling_rights.has(Color::Black, false) {
            castling.push('q');
        }
        if castling.is_empty() {
            castling.push('-');
        }

        let ep = self.en_passant_target.map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{} {} {} {} {} {}",
            rows.join("/"),
            active,
            castling,
            ep,
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// Parse a move in UCI long algebraic notation (e.g., "e2e4", "e7e8q")
    /// against the current position's legal moves.
    pub fn parse_move(&mut self, uci: &str) -> Result<Move, MoveParseError> {
        if uci.len() < 4 || uci.len() > 5 {
            return Err(MoveParseError::InvalidLength { len: uci.len() });
        }

        let from: Square = uci[0..2]
            .parse()
            .map_err(|_| MoveParseError::InvalidSquare { notation: uci.to_string() })?;
        let to: Square = uci[2..4]
            .parse()
            .map_err(|_| MoveParseError::InvalidSquare { notation: uci.to_string() })?;

        let promotion = if uci.len() == 5 {
            let c = uci.as_bytes()[4] as char;
            let kind = PieceType::from_char(c).ok_or(MoveParseError::InvalidPromotion { char: c })?;
            if matches!(kind, PieceType::Pawn | PieceType::King | PieceType::None) {
                return Err(MoveParseError::InvalidPromotion { char: c });
            }
            Some(kind)
        } else {
            None
        };

        let legal_moves = self.generate_legal_moves();
        legal_moves
            .iter()
            .find(|m| m.from() == from && m.to() == to && m.promotion_piece() == promotion)
            .copied()
            .ok_or_else(|| MoveParseError::IllegalMove { notation: uci.to_string() })
    }

    /// Parse a UCI move and make it on the board in one call.
    pub fn make_move_uci(&mut self, uci: &str) -> Result<Move, MoveParseError> {
        let mv = self.parse_move(uci)?;
        self.make_move(mv);
        Ok(mv)
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::try_from_fen(s)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_round_trips() {
        let board = Board::try_from_fen(STARTPOS).unwrap();
        assert_eq!(board.to_fen(), STARTPOS);
    }

    #[test]
    fn malformed_fen_falls_back_to_startpos() {
        let board = Board::from_fen_or_startpos("not a fen at all");
        assert_eq!(board.to_fen(), STARTPOS);
    }

    #[test]
    fn en_passant_square_round_trips() {
        let fen = "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3";
        let board = Board::try_from_fen(fen).unwrap();
        assert_eq!(board.en_passant_target(), Some("d6".parse().unwrap()));
        assert_eq!(board.to_fen(), fen);
    }

    #[test]
    fn castling_rights_subset_round_trips() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1";
        let board = Board::try_from_fen(fen).unwrap();
        assert!(board.castling_rights().has(Color::White, true));
        assert!(!board.castling_rights().has(Color::White, false));
        assert!(!board.castling_rights().has(Color::Black, true));
        assert!(board.castling_rights().has(Color::Black, false));
        assert_eq!(board.to_fen(), fen);
    }

    #[test]
    fn too_few_fields_is_an_error() {
        assert_eq!(
            Board::try_from_fen("8/8/8/8/8/8/8/8 w").unwrap_err(),
            FenError::TooFewParts { found: 2 }
        );
    }

    #[test]
    fn invalid_piece_char_is_an_error() {
        assert!(matches!(
            Board::try_from_fen("xxxxxxxx/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::InvalidPiece { char: 'x' })
        ));
    }

    #[test]
    fn parse_move_finds_legal_pawn_push() {
        let mut board = Board::new();
        let mv = board.parse_move("e2e4").unwrap();
        assert_eq!(mv.to_string(), "e2e4");
    }

    #[test]
    fn parse_move_rejects_illegal_move() {
        let mut board = Board::new();
        assert!(board.parse_move("e2e5").is_err());
    }

    #[test]
    fn make_move_uci_applies_the_move() {
        let mut board = Board::new();
        board.make_move_uci("e2e4").unwrap();
        assert!(board.piece_at("e4".parse().unwrap()).kind == PieceType::Pawn);
        assert_eq!(board.side_to_move(), Color::Black);
    }

    #[test]
    fn promotion_uci_is_recognised() {
        let mut board = Board::try_from_fen("8/P7/8/8/8/8/8/k6K w - - 0 1").unwrap();
        let mv = board.parse_move("a7a8q").unwrap();
        assert_eq!(mv.promotion_piece(), Some(PieceType::Queen));
    }

    #[test]
    fn from_str_parses_via_trait() {
        let board: Board = STARTPOS.parse().unwrap();
        assert_eq!(board.side_to_move(), Color::White);
    }
}
