//! Evaluation terms, one module per positional heuristic. `eval.rs` sums
//! these into the tapered middlegame/endgame total; each term here
//! returns a White-minus-Black net (mg, eg) pair.

pub mod tables;

mod centre;
mod helpers;
mod king_safety;
mod mobility;
mod outposts;
mod passed_pawns;
mod pawn_structure;
mod queen_exposure;
mod rooks;

pub(crate) use tables::piece_square_value;

pub(crate) use centre::centre_control;
pub(crate) use helpers::AttackInfo;
pub(crate) use king_safety::king_safety;
pub(crate) use mobility::mobility;
pub(crate) use outposts::outposts;
pub(crate) use passed_pawns::passed_pawns;
pub(crate) use pawn_structure::pawn_structure;
pub(crate) use queen_exposure::queen_exposure;
pub(crate) use rooks::rook_files;
