//! `perft divide`: per-root-move leaf counts at a given depth, for
//! validating the move generator against known node counts.
//!
//! Usage: `perft [depth] [fen]` (defaults to the standard starting
//! position at depth 4).

use std::env;
use std::time::Instant;

use chess_engine::board::Board;

fn main() {
    let args: Vec<String> = env::args().collect();
    let depth: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(4);
    let fen = args
        .get(2)
        .map(String::as_str)
        .unwrap_or("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");

    let mut board = Board::from_fen_or_startpos(fen);
    println!("perft divide depth {depth} from {fen}");

    let start = Instant::now();
    let root_moves = board.generate_legal_moves();
    let mut total = 0u64;
    for mv in root_moves.iter() {
        board.make_move(*mv);
        let count = if depth == 0 { 1 } else { board.perft(depth - 1) };
        board.unmake_move(*mv);
        println!("  {mv}: {count}");
        total += count;
    }
    let elapsed = start.elapsed();

    println!("total: {total} in {elapsed:?}");
}
