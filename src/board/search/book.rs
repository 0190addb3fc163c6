//! Opening-book port.
//!
//! The search depends on book lookups only through [`OpeningBook::probe`];
//! it does not know or care whether that probe consults a hardcoded line
//! table, a Polyglot file, or nothing at all. [`NullBook`] is the
//! always-absent implementation used when no book is configured.
//! [`HardcodedHeader`] is a small set of main-line openings, the same
//! shape as a textbook engine's built-in book, used by [`HardcodedBook`].

use std::collections::HashMap;
use std::sync::LazyLock;

use super::super::{Board, Move, Square};

/// Maximum ply (from the start of the game) at which a book is consulted.
pub const BOOK_MAX_PLIES: u32 = 8;

/// A pluggable source of book moves.
///
/// Implementations may always return `None` (no book). The search consults
/// `probe` only at difficulty >= 3 and only while `ply_from_game_start <
/// BOOK_MAX_PLIES`; the cutoff is enforced by the caller, not by
/// implementations, so a custom book need not duplicate it.
pub trait OpeningBook: Send + Sync {
    /// Return a book move for `board`, if one is known, given how many
    /// plies have been played since the start of the game.
    fn probe(&self, board: &Board, ply_from_game_start: u32) -> Option<Move>;
}

/// A book that never has an answer. The default when no book is wired in.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBook;

impl OpeningBook for NullBook {
    fn probe(&self, _board: &Board, _ply_from_game_start: u32) -> Option<Move> {
        None
    }
}

fn sq(file: char, rank: char) -> Square {
    let file_idx = (file as u8 - b'a') as usize;
    let rank_idx = (rank as u8 - b'1') as usize;
    Square::new(rank_idx, file_idx)
}

/// Replay a line of (from, to) square pairs from the starting position,
/// recording the Zobrist key seen before each move against the move played.
/// Mirrors `AddBookLine` in the original engine's hardcoded book.
fn add_line(table: &mut HashMap<u64, Vec<Move>>, line: &[(Square, Square)]) {
    let mut board = Board::new();
    for &(from, to) in line {
        let key = board.hash();
        let legal = board.generate_moves();
        let Some(&mv) = legal.iter().find(|m| m.from() == from && m.to() == to) else {
            break;
        };
        let entry = table.entry(key).or_default();
        if entry.len() < 4 && !entry.contains(&mv) {
            entry.push(mv);
        }
        board.make_move(mv);
    }
}

fn build_table() -> HashMap<u64, Vec<Move>> {
    let mut table = HashMap::new();

    let (e2, e4, e5, e6, e7) = (sq('e', '2'), sq('e', '4'), sq('e', '5'), sq('e', '6'), sq('e', '7'));
    let (d2, d4, d5, d6, d7) = (sq('d', '2'), sq('d', '4'), sq('d', '5'), sq('d', '6'), sq('d', '7'));
    let (c2, c4, c5, c6, c7) = (sq('c', '2'), sq('c', '4'), sq('c', '5'), sq('c', '6'), sq('c', '7'));
    let (f1, f3) = (sq('f', '1'), sq('f', '3'));
    let (g1, g2, g6, g7, g8) = (sq('g', '1'), sq('g', '2'), sq('g', '6'), sq('g', '7'), sq('g', '8'));
    let (b1, b5, b8) = (sq('b', '1'), sq('b', '5'), sq('b', '8'));
    let f6 = sq('f', '6');

    // Ruy Lopez: 1.e4 e5 2.Nf3 Nc6 3.Bb5
    add_line(&mut table, &[(e2, e4), (e7, e5), (g1, f3), (b8, sq('c', '6')), (f1, b5)]);
    // Italian Game: 1.e4 e5 2.Nf3 Nc6 3.Bc4
    add_line(&mut table, &[(e2, e4), (e7, e5), (g1, f3), (b8, sq('c', '6')), (f1, sq('c', '4'))]);
    // Sicilian Defense: 1.e4 c5 2.Nf3 d6 3.d4 cxd4 4.Nxd4
    add_line(
        &mut table,
        &[(e2, e4), (c7, c5), (g1, f3), (d7, d6), (d2, d4), (c5, d4), (f3, d4)],
    );
    // Queen's Gambit: 1.d4 d5 2.c4
    add_line(&mut table, &[(d2, d4), (d7, d5), (c2, c4)]);
    // King's Indian Defense: 1.d4 Nf6 2.c4 g6 3.Nc3
    add_line(&mut table, &[(d2, d4), (g8, f6), (c2, c4), (g7, g6), (b1, sq('c', '3'))]);
    // French Defense: 1.e4 e6 2.d4 d5
    add_line(&mut table, &[(e2, e4), (e7, e6), (d2, d4), (d7, d5)]);
    // Caro-Kann Defense: 1.e4 c6 2.d4 d5
    add_line(&mut table, &[(e2, e4), (c7, c6), (d2, d4), (d7, d5)]);
    // English Opening: 1.c4 e5 2.Nc3 Nf6
    add_line(&mut table, &[(c2, c4), (e7, e5), (b1, sq('c', '3')), (g8, f6)]);
    // Reti/King's pawn transposition guard: 1.Nf3 d5 2.g3
    add_line(&mut table, &[(g1, f3), (d7, d5), (g2, g6)]);

    table
}

static HARDCODED_TABLE: LazyLock<HashMap<u64, Vec<Move>>> = LazyLock::new(build_table);

/// A small hardcoded book of main-line openings, grounded on the original
/// engine's `OpeningBook.cpp`. Looks up the current position's Zobrist key
/// among a handful of known main lines and, if found, picks uniformly
/// among the (at most four) recorded replies.
#[derive(Debug, Default, Clone, Copy)]
pub struct HardcodedBook;

impl OpeningBook for HardcodedBook {
    fn probe(&self, board: &Board, ply_from_game_start: u32) -> Option<Move> {
        if ply_from_game_start >= BOOK_MAX_PLIES {
            return None;
        }
        let candidates = HARDCODED_TABLE.get(&board.hash())?;
        if candidates.is_empty() {
            return None;
        }
        let legal = board.generate_moves();
        let mut rng_state = board.hash() ^ u64::from(ply_from_game_start).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        // xorshift64* draw over the candidate list; deterministic per
        // position so repeated probes of the same board agree.
        rng_state ^= rng_state << 13;
        rng_state ^= rng_state >> 7;
        rng_state ^= rng_state << 17;
        let pick = (rng_state as usize) % candidates.len();
        let mv = candidates[pick];
        legal.iter().find(|m| *m == mv).copied()
    }
}
