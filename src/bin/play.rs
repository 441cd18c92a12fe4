//! CLI driver: builds `GameOptions`, sets up the `Board`, alternates two
//! `Player`s through `player::play_game`, and prints the transcript in
//! the spec's `FfRf-FtRt` / game-over-string format (spec.md §6.3).
//! Grounded on the teacher's thin demo `main.rs`.

use std::io;

use mailbox_chess_engine::player::{self, GameOptionsBuilder};
use mailbox_chess_engine::prelude::*;

fn initial_board() -> [[char; 8]; 8] {
    [
        ['R', 'N', 'B', 'Q', 'K', 'B', 'N', 'R'],
        ['P', 'P', 'P', 'P', 'P', 'P', 'P', 'P'],
        ['.', '.', '.', '.', '.', '.', '.', '.'],
        ['.', '.', '.', '.', '.', '.', '.', '.'],
        ['.', '.', '.', '.', '.', '.', '.', '.'],
        ['.', '.', '.', '.', '.', '.', '.', '.'],
        ['p', 'p', 'p', 'p', 'p', 'p', 'p', 'p'],
        ['r', 'n', 'b', 'q', 'k', 'b', 'n', 'r'],
    ]
}

fn main() {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
        .expect("logger installs once");

    let options = GameOptionsBuilder::default()
        .board(initial_board())
        .first_colour(Color::White)
        .human_first(true)
        .depth(6u32)
        .build()
        .expect("all required fields supplied above");

    let stdin = io::stdin();
    // spec.md §6.1: `simpleEval` picks between the two evaluators.
    let fast_evaluator = FastEvaluator::new();
    let full_evaluator = FullEvaluator::new();
    let evaluator: &dyn Evaluator = if options.simple_eval {
        &fast_evaluator
    } else {
        &full_evaluator
    };
    let depth = options.clamped_depth() as usize;

    let mut human = HumanPlayer::new(Color::White, stdin.lock());
    let mut computer = ComputerPlayer::new(Color::Black, evaluator, depth);

    let outcome = match player::play_game(&options, &mut human, &mut computer) {
        Ok((_, outcome)) => outcome,
        Err(err) => {
            eprintln!("invalid starting position: {err:?}");
            std::process::exit(1);
        }
    };

    let human_color = if options.human_first {
        options.first_colour
    } else {
        options.first_colour.opposite()
    };

    // spec.md §6.3's game-over strings are a closed set; a resignation
    // is reported as a win for whichever side didn't resign.
    match outcome {
        Outcome::ComputerWins => println!("Computer wins!"),
        Outcome::HumanWins => println!("Human wins!"),
        Outcome::Stalemate => println!("Stalemate"),
        Outcome::Resignation(color) if color == human_color => println!("Computer wins!"),
        Outcome::Resignation(_) => println!("Human wins!"),
    }
}
