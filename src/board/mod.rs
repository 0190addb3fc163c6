//! Chess board representation and game logic.
//!
//! Uses a 64-square mailbox plus per-colour piece lists for move generation
//! and position evaluation. Supports full chess rules including castling,
//! en passant, and promotions.
//!
//! # Example
//! ```
//! use chess_engine::board::{Board, Color, Piece};
//!
//! let mut board = Board::new();
//! let moves = board.generate_moves();
//! println!("Starting position has {} legal moves", moves.len());
//! ```

mod attacks;
mod builder;
mod error;
mod eval;
mod eval_terms;
mod evaluator;
mod fen;
mod make_unmake;
mod movegen;
mod piece_list;
pub mod prelude;
mod see;
mod search;
mod state;
mod types;

#[cfg(test)]
mod tests;

// Public API - types users need
pub use builder::BoardBuilder;
pub use error::{FenError, MoveParseError, SanError, SquareError};
pub use state::{Board, GameState};
pub use types::{CastlingRights, Color, Move, MoveKind, MoveList, MoveListIntoIter, Piece, PieceType, Square};

// Public API - search functions and configuration
pub use search::{
    find_best_move, find_best_move_with_ponder, find_best_move_with_time,
    find_best_move_with_time_and_ponder, SearchClock, SearchConfig, SearchLimits, SearchResult,
    SearchState, DEFAULT_TT_MB,
};

// Public API - root-parallel search
pub use search::{smp_search, SharedSearchState, SmpConfig};

// Re-export search internals for users who need fine-grained control
pub use search::{
    SearchInfoCallback, SearchIterationInfo, SearchParams, SearchStats, SearchTables,
};

// Public API - opening-book port (difficulty >= 3 only; see SearchConfig::book)
pub use search::{HardcodedBook, NullBook, OpeningBook, BOOK_MAX_PLIES};

// Public API - the evaluator port
pub use evaluator::{ClassicalEvaluator, Evaluator};

pub(crate) use types::{
    castle_bit, file_to_index, rank_to_index, CASTLE_BLACK_K, CASTLE_BLACK_Q, CASTLE_WHITE_K,
    CASTLE_WHITE_Q, EMPTY_MOVE, MAX_PLY, PROMOTION_PIECES, ScoredMoveList,
};
