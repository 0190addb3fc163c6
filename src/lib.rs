// Crate root - export modules
pub mod board;
pub mod tt;
pub mod zobrist;
