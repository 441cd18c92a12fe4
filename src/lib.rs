pub mod board;
pub mod error;
pub mod eval;
pub mod movegen;
pub mod pieces;
pub mod player;
pub mod search;

pub mod prelude {
    pub use crate::board::{fen_like, Board, GameStatus};
    pub use crate::error::{IllegalUserMove, InternalInvariantViolation, InvalidPosition};
    pub use crate::eval::{Evaluator, FastEvaluator, FullEvaluator};
    pub use crate::pieces::{Color, Piece};
    pub use crate::player::{
        ComputerPlayer, GameOptions, HumanPlayer, MoveChoice, Outcome, Player,
    };
}
