//! Move ordering utilities for search.

use super::super::PieceType;

/// Get material value for a piece (in centipawns)
pub fn piece_value(piece: PieceType) -> i32 {
    piece.value()
}
