//! Piece and color types.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The kind of a chess piece, including the empty-square sentinel `None`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub enum PieceType {
    #[default]
    None,
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        match self {
            PieceType::None => 0,
            PieceType::Pawn => 1,
            PieceType::Knight => 2,
            PieceType::Bishop => 3,
            PieceType::Rook => 4,
            PieceType::Queen => 5,
            PieceType::King => 6,
        }
    }

    /// Parse a piece kind from a lowercase character (p, n, b, r, q, k).
    #[must_use]
    pub fn from_char(c: char) -> Option<PieceType> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceType::Pawn),
            'n' => Some(PieceType::Knight),
            'b' => Some(PieceType::Bishop),
            'r' => Some(PieceType::Rook),
            'q' => Some(PieceType::Queen),
            'k' => Some(PieceType::King),
            _ => None,
        }
    }

    /// Convert to a lowercase character; `None` has no character form.
    #[inline]
    #[must_use]
    pub const fn to_char(self) -> Option<char> {
        match self {
            PieceType::None => None,
            PieceType::Pawn => Some('p'),
            PieceType::Knight => Some('n'),
            PieceType::Bishop => Some('b'),
            PieceType::Rook => Some('r'),
            PieceType::Queen => Some('q'),
            PieceType::King => Some('k'),
        }
    }

    /// Convert to a character with case based on color (uppercase for White).
    #[must_use]
    pub fn to_fen_char(self, color: Color) -> Option<char> {
        self.to_char().map(|c| {
            if color == Color::White {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
    }

    /// Standard material value in centipawns. `None` and `King` are not
    /// meaningful for material counting but return a value anyway so
    /// callers never need to special-case the piece kind.
    #[inline]
    #[must_use]
    pub const fn value(self) -> i32 {
        match self {
            PieceType::None => 0,
            PieceType::Pawn => 100,
            PieceType::Knight => 320,
            PieceType::Bishop => 330,
            PieceType::Rook => 500,
            PieceType::Queen => 900,
            PieceType::King => 20000,
        }
    }

    #[inline]
    #[must_use]
    pub(crate) const fn is_none(self) -> bool {
        matches!(self, PieceType::None)
    }

    #[inline]
    #[must_use]
    pub(crate) const fn is_slider(self) -> bool {
        matches!(self, PieceType::Bishop | PieceType::Rook | PieceType::Queen)
    }
}

/// Promotion piece choices in order of typical preference (queen first).
pub(crate) const PROMOTION_PIECES: [PieceType; 4] = [
    PieceType::Queen,
    PieceType::Rook,
    PieceType::Bishop,
    PieceType::Knight,
];

/// Chess colors.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// Returns the opposite color.
    #[inline]
    #[must_use]
    pub(crate) const fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// A piece occupying (or not occupying) a mailbox square.
///
/// `kind == PieceType::None` is the empty-square sentinel; `color` and
/// `moved` carry no meaning in that case. Only kings and rooks ever
/// consult `moved` (it feeds castling-rights bookkeeping in some source
/// engines; this crate tracks castling rights directly on `Board`, so the
/// flag is kept for parity with the data model but is not load-bearing).
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Piece {
    pub kind: PieceType,
    pub color: Color,
    pub moved: bool,
}

impl Piece {
    pub(crate) const NONE: Piece = Piece {
        kind: PieceType::None,
        color: Color::White,
        moved: false,
    };

    #[inline]
    #[must_use]
    pub(crate) const fn new(kind: PieceType, color: Color) -> Self {
        Piece {
            kind,
            color,
            moved: false,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.kind.is_none()
    }

    #[inline]
    #[must_use]
    pub const fn is_some(self) -> bool {
        !self.kind.is_none()
    }
}

impl Default for Piece {
    fn default() -> Self {
        Piece::NONE
    }
}

/// Equality considers kind and colour only; the `moved` flag is metadata.
impl PartialEq for Piece {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && (self.kind.is_none() || self.color == other.color)
    }
}
impl Eq for Piece {}
