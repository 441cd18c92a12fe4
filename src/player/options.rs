use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::InvalidPosition;
use crate::pieces::Color;

/// The value object handed over by the UI collaborator at game start
/// (spec.md §6.1). Grounded on the teacher's `smart_engine::config::
/// EngineConfig` shape, stripped of the database/lichess fields that
/// don't apply here, with a `derive_builder` builder since this one
/// carries defaulted fields (`simple_eval`, `depth`) the teacher's plain
/// struct didn't need.
#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
#[builder(setter(into))]
pub struct GameOptions {
    /// 8x8 grid, uppercase black / lowercase white / `'\0'` empty. A
    /// leading `'x'` marker in `[0][0]` signals "reject this board".
    pub board: [[char; 8]; 8],
    pub first_colour: Color,
    pub human_first: bool,
    #[builder(default = "false")]
    pub simple_eval: bool,
    #[builder(default = "6")]
    pub depth: u32,
}

const MIN_DEPTH: u32 = 2;
const MAX_DEPTH: u32 = 20;

impl GameOptions {
    /// Rejects the `'x'`-marked board sentinel and clamps `depth` into
    /// `[2, 20]` (spec.md §6.1).
    pub fn validate(&self) -> Result<(), InvalidPosition> {
        if self.board[0][0] == 'x' {
            return Err(InvalidPosition::Rejected);
        }
        Ok(())
    }

    pub fn clamped_depth(&self) -> u32 {
        self.depth.clamp(MIN_DEPTH, MAX_DEPTH)
    }

    /// Converts the `'\0'`-empty convention into the `'.'`-empty
    /// convention `Board::setup` takes.
    pub fn board_for_setup(&self) -> [[char; 8]; 8] {
        let mut grid = self.board;
        for row in grid.iter_mut() {
            for c in row.iter_mut() {
                if *c == '\0' {
                    *c = '.';
                }
            }
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_board() -> [[char; 8]; 8] {
        [['\0'; 8]; 8]
    }

    #[test]
    fn depth_clamps_to_spec_bounds() {
        let opts = GameOptionsBuilder::default()
            .board(blank_board())
            .first_colour(Color::White)
            .human_first(true)
            .depth(25u32)
            .build()
            .unwrap();
        assert_eq!(opts.clamped_depth(), MAX_DEPTH);

        let opts = GameOptionsBuilder::default()
            .board(blank_board())
            .first_colour(Color::White)
            .human_first(true)
            .depth(1u32)
            .build()
            .unwrap();
        assert_eq!(opts.clamped_depth(), MIN_DEPTH);
    }

    #[test]
    fn x_marker_rejects_board() {
        let mut board = blank_board();
        board[0][0] = 'x';
        let opts = GameOptionsBuilder::default()
            .board(board)
            .first_colour(Color::White)
            .human_first(true)
            .build()
            .unwrap();
        assert_eq!(opts.validate(), Err(InvalidPosition::Rejected));
    }
}
