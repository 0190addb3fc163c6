//! Tapered position evaluation.
//!
//! Material and piece-square values are maintained incrementally on
//! [`Board::incremental_score`] by `set_piece`/`clear_piece`/`relocate_piece`;
//! this module folds in the positional terms that are too cheap to keep
//! incremental (mobility, king safety, pawn structure, ...) and tapers the
//! middlegame/endgame halves together by game phase.

use super::eval_terms::{
    centre_control, king_safety, mobility, outposts, passed_pawns, pawn_structure, queen_exposure,
    rook_files, tables, AttackInfo,
};
use super::state::{Board, TaperedScore};
use super::types::{Color, PieceType};

const TEMPO_BONUS: i32 = tables::TEMPO_BONUS;

impl Board {
    /// Sum of `PHASE_WEIGHT` over every piece on the board, capped at
    /// `PHASE_TOTAL`. 24 at the start of a game, falling to near 0 as
    /// pieces are traded off, driving the middlegame/endgame taper.
    #[must_use]
    pub(crate) fn game_phase(&self) -> i32 {
        let mut phase = 0;
        for color in [Color::White, Color::Black] {
            for &sq in self.piece_list(color).as_slice() {
                phase += tables::PHASE_WEIGHT[self.piece_at(sq).kind.index()];
            }
        }
        phase.min(tables::PHASE_TOTAL)
    }

    /// `PHASE_WEIGHT` summed over just `color`'s own pieces. Used by
    /// null-move pruning to detect zugzwang-prone endgames where one side
    /// has nothing but pawns and king left.
    #[must_use]
    pub(crate) fn material_phase_for(&self, color: Color) -> i32 {
        self.piece_list(color)
            .as_slice()
            .iter()
            .map(|&sq| tables::PHASE_WEIGHT[self.piece_at(sq).kind.index()])
            .sum()
    }

    fn bishop_pair_bonus(&self) -> TaperedScore {
        let mut net = 0i32;
        for color in [Color::White, Color::Black] {
            let sign = if color == Color::White { 1 } else { -1 };
            let bishops = self
                .piece_list(color)
                .as_slice()
                .iter()
                .filter(|&&sq| self.piece_at(sq).kind == PieceType::Bishop)
                .count();
            if bishops >= 2 {
                net += sign * tables::BISHOP_PAIR_BONUS;
            }
        }
        TaperedScore { mg: net, eg: net }
    }

    /// Full positional evaluation, from the side-to-move's perspective, in
    /// centipawns. Combines the incremental material+PST total with every
    /// term in [`crate::board::eval_terms`], tapered by `game_phase`.
    #[must_use]
    pub fn evaluate(&self) -> i32 {
        let attacks = AttackInfo::compute(self);

        let mut total = self.incremental_score();
        total += self.bishop_pair_bonus();
        total += centre_control(self);
        total += mobility(self);
        total += outposts(self);
        total += passed_pawns(self);
        total += pawn_structure(self);
        total += rook_files(self);
        total += king_safety(self, &attacks);
        total += queen_exposure(self, &attacks);

        let phase = self.game_phase();
        let tapered =
            (total.mg * phase + total.eg * (tables::PHASE_TOTAL - phase)) / tables::PHASE_TOTAL;

        let score = if self.side_to_move() == Color::White {
            tapered
        } else {
            -tapered
        };
        score + TEMPO_BONUS
    }

    /// Fast evaluation used inside quiescence search and pruning decisions:
    /// material + PST only, no positional terms, same tempo bonus and
    /// taper as [`Board::evaluate`].
    #[must_use]
    pub fn evaluate_simple(&self) -> i32 {
        let total = self.incremental_score();
        let phase = self.game_phase();
        let tapered =
            (total.mg * phase + total.eg * (tables::PHASE_TOTAL - phase)) / tables::PHASE_TOTAL;

        let score = if self.side_to_move() == Color::White {
            tapered
        } else {
            -tapered
        };
        score + TEMPO_BONUS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_is_roughly_balanced() {
        let board = Board::new();
        // Tempo bonus favours the side to move, so it's not exactly zero.
        assert!(board.evaluate().abs() <= TEMPO_BONUS);
    }

    #[test]
    fn extra_queen_is_winning() {
        let board = Board::from_fen_or_startpos("4k3/8/8/8/8/8/3Q4/4K3 w - - 0 1");
        assert!(board.evaluate() > 800);
    }

    #[test]
    fn bishop_pair_beats_bishop_and_knight() {
        let pair = Board::from_fen_or_startpos("4k3/8/8/8/8/2B2B2/8/4K3 w - - 0 1");
        let mixed = Board::from_fen_or_startpos("4k3/8/8/8/8/2B2N2/8/4K3 w - - 0 1");
        assert!(pair.evaluate() > mixed.evaluate());
    }

    #[test]
    fn evaluate_simple_agrees_on_sign_with_full_eval() {
        let board = Board::from_fen_or_startpos("4k3/8/8/8/8/8/3Q4/4K3 w - - 0 1");
        assert!(board.evaluate() > 0);
        assert!(board.evaluate_simple() > 0);
    }

    #[test]
    fn game_phase_is_maximal_at_the_start_and_falls_with_trades() {
        let start = Board::new();
        let endgame = Board::from_fen_or_startpos("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(start.game_phase(), tables::PHASE_TOTAL);
        assert_eq!(endgame.game_phase(), 0);
    }
}
