//! Play a sequence of coordinate moves from the starting position and
//! report the resulting game state. Useful for manually verifying
//! checkmate/stalemate detection without a full protocol front-end.
//!
//! Usage: `mate_check <move1> <move2> ...` (e.g. `mate_check f2f3 e7e5 g2g4 d8h4`)

use std::env;

use chess_engine::board::{Board, GameState};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() <= 1 {
        eprintln!("usage: mate_check <move1> <move2> ...");
        return;
    }

    let mut board = Board::new();
    for uci in args.iter().skip(1) {
        match board.make_move_uci(uci) {
            Ok(mv) => println!("played {mv}"),
            Err(err) => {
                eprintln!("illegal move {uci}: {err}");
                return;
            }
        }
    }

    let state = board.game_state();
    println!("side_to_move: {}", board.side_to_move());
    println!("legal_moves: {}", board.generate_legal_moves().len());
    println!(
        "game_state: {}",
        match state {
            GameState::Playing => "playing",
            GameState::Check => "check",
            GameState::Checkmate => "checkmate",
            GameState::Stalemate => "stalemate",
            GameState::Draw => "draw",
        }
    );
}
