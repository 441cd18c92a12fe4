use log::info;

use crate::board::{square, Board};
use crate::eval::Evaluator;
use crate::pieces::{Color, Piece};
use crate::search;

use super::{MoveChoice, Player};

/// Runs the §4.4 search to pick its move. Always promotes to Queen
/// during its own trial moves and at the root — the search never asks a
/// human for input mid-tree, and Queen dominates Knight in every
/// evaluator term this crate scores.
pub struct ComputerPlayer<'a> {
    color: Color,
    evaluator: &'a dyn Evaluator,
    depth: usize,
}

impl<'a> ComputerPlayer<'a> {
    pub fn new(color: Color, evaluator: &'a dyn Evaluator, depth: usize) -> Self {
        ComputerPlayer { color, evaluator, depth }
    }

    /// Runs the search against `board`, given the opposing player (needed
    /// for legal-move probes during terminal detection), and returns the
    /// chosen move along with its evaluation.
    pub fn search(&mut self, board: &mut Board, opponent: &mut dyn Player) -> search::RootResult {
        let evaluator = self.evaluator;
        let color = self.color;
        evaluator.prepare(board);
        let depth = self.depth + evaluator.depth_bonus();
        let result = search::choose_move(board, color, self, opponent, evaluator, depth);
        if let Some((from, to)) = result.mv {
            info!(
                "{}{}",
                square::algebraic(from),
                square::algebraic(to)
            );
        }
        result
    }
}

impl<'a> Player for ComputerPlayer<'a> {
    fn choose_move(&mut self, board: &Board) -> MoveChoice {
        let mut board = board.clone();
        let color = self.color;
        let evaluator = self.evaluator;
        evaluator.prepare(&board);
        let depth = self.depth + evaluator.depth_bonus();
        let mut dummy = Self::new(color.opposite(), evaluator, depth);
        let result = search::choose_move(&mut board, color, self, &mut dummy, evaluator, depth);
        match result.mv {
            Some((from, to)) => MoveChoice::Move { from, to },
            None => MoveChoice::Resign,
        }
    }

    fn color(&self) -> Color {
        self.color
    }

    fn choose_promotion(&mut self) -> Piece {
        Piece::Queen
    }
}
