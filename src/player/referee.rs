use log::info;

use crate::board::{fen_like, Board, GameStatus};
use crate::error::InvalidPosition;
use crate::pieces::Color;

use super::{GameOptions, MoveChoice, Player};

/// How the game ended, mirroring the three strings spec.md §6.3 prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    ComputerWins,
    HumanWins,
    Stalemate,
    Resignation(Color),
}

/// Hands the Board back and forth between two `Player`s until the game
/// ends (spec.md §5: "the Board is exclusively owned by the active
/// Player while it computes a move; the referee hands ownership back and
/// forth"). Grounded on the teacher's thin `main.rs` demo loop, since no
/// example repo carries a dedicated referee type.
pub fn play_game(
    options: &GameOptions,
    white: &mut dyn Player,
    black: &mut dyn Player,
) -> Result<(Board, Outcome), InvalidPosition> {
    options.validate()?;
    let mut board = Board::setup(options.board_for_setup(), options.first_colour)?;

    loop {
        let (mover, other): (&mut dyn Player, &mut dyn Player) = match board.side_to_move() {
            Color::White => (white, black),
            Color::Black => (black, white),
        };

        let choice = mover.choose_move(&board);
        let from_to = match choice {
            MoveChoice::Resign => return Ok((board, Outcome::Resignation(mover.color()))),
            MoveChoice::Move { from, to } => (from, to),
        };

        if !board.apply(mover, from_to.0, from_to.1) {
            continue;
        }
        if board.leaves_own_king_in_check(mover.color()) {
            board.undo().expect("just applied");
            continue;
        }
        info!("{}", fen_like(&board));

        match board.record_status(other) {
            GameStatus::InProgress => continue,
            GameStatus::Stalemate => return Ok((board, Outcome::Stalemate)),
            GameStatus::Checkmate(winner) => {
                let human_color = if options.human_first {
                    options.first_colour
                } else {
                    options.first_colour.opposite()
                };
                let outcome = if winner == human_color {
                    Outcome::HumanWins
                } else {
                    Outcome::ComputerWins
                };
                return Ok((board, outcome));
            }
        }
    }
}
