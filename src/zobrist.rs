//! Zobrist hashing for chess positions.
//!
//! Provides incrementally-updatable 64-bit position hashes for transposition tables.

use rand::prelude::*;

use crate::board::{Color, PieceType, Square};

pub(crate) struct ZobristKeys {
    // piece_keys[piece_type][color][square_index]. piece_type 0 is
    // `PieceType::None` and is never consulted; it exists so every
    // `PieceType::index()` is a valid row without a subtraction at each
    // call site.
    pub(crate) piece_keys: [[[u64; 64]; 2]; 7],
    pub(crate) black_to_move_key: u64,
    // castling_keys[color][side] : 0=White, 1=Black; 0=Kingside, 1=Queenside
    pub(crate) castling_keys: [[u64; 2]; 2],
    // en_passant_keys[file_index] (only file matters for EP target)
    pub(crate) en_passant_keys: [u64; 8],
}

/// Fixed seed: changing it would invalidate any saved position or TT dump
/// that embeds Zobrist keys, so it must never change across releases.
const ZOBRIST_SEED: u64 = 1_234_567_890;

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);
        let mut piece_keys = [[[0; 64]; 2]; 7];
        let mut castling_keys = [[0; 2]; 2];
        let mut en_passant_keys = [0; 8];

        for piece in &mut piece_keys {
            for color in piece.iter_mut() {
                for key in color.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        let black_to_move_key = rng.gen();

        for color in &mut castling_keys {
            for key in color.iter_mut() {
                *key = rng.gen();
            }
        }

        for key in &mut en_passant_keys {
            *key = rng.gen();
        }

        ZobristKeys {
            piece_keys,
            black_to_move_key,
            castling_keys,
            en_passant_keys,
        }
    }

    #[inline]
    pub(crate) fn piece_key(&self, kind: PieceType, color: Color, sq: Square) -> u64 {
        debug_assert!(!kind.is_none());
        self.piece_keys[kind.index()][color.index()][sq.index()]
    }

    #[inline]
    pub(crate) fn castling_key(&self, color: Color, kingside: bool) -> u64 {
        self.castling_keys[color.index()][usize::from(!kingside)]
    }

    #[inline]
    pub(crate) fn en_passant_key(&self, file: usize) -> u64 {
        self.en_passant_keys[file]
    }
}

/// Initialize Zobrist keys lazily and globally; a single process-wide
/// table shared by every `Board` instance and every worker thread.
pub(crate) static ZOBRIST: std::sync::LazyLock<ZobristKeys> =
    std::sync::LazyLock::new(ZobristKeys::new);
