use std::io::BufRead;

use log::warn;
use regex::Regex;

use crate::board::Board;
use crate::error::IllegalUserMove;
use crate::pieces::{Color, Piece};

use super::{MoveChoice, Player};

/// Parses algebraic-pair input from a line-oriented stream (spec.md §4.3,
/// §6.2): `[A-Ha-h][1-8]-[A-Ha-h][1-8]` with an optional trailing
/// promotion letter, case-insensitive on files. Grounded on the teacher's
/// `game_engine::move_parsing` (a `Result<_, ()>` parse step followed by
/// a legality filter), generalized to the spec's simpler pair grammar
/// instead of full SAN.
pub struct HumanPlayer<R: BufRead> {
    color: Color,
    input: R,
    move_pattern: Regex,
    /// Promotion letter typed inline with the move that is about to be
    /// applied, if any (spec.md §6.2). Consumed by the very next
    /// `choose_promotion` call instead of prompting again.
    pending_promotion: Option<Piece>,
}

impl<R: BufRead> HumanPlayer<R> {
    pub fn new(color: Color, input: R) -> Self {
        HumanPlayer {
            color,
            input,
            move_pattern: Regex::new(r"(?i)^([a-h][1-8])-([a-h][1-8])([qn])?$")
                .expect("static pattern"),
            pending_promotion: None,
        }
    }

    fn parse_line(&self, line: &str) -> Result<((u8, u8), (u8, u8), Option<Piece>), IllegalUserMove> {
        let trimmed = line.trim();
        let caps = self
            .move_pattern
            .captures(trimmed)
            .ok_or(IllegalUserMove::UnparseableInput)?;
        let from = parse_square(&caps[1]);
        let to = parse_square(&caps[2]);
        let promotion = caps.get(3).map(|m| {
            if m.as_str().eq_ignore_ascii_case("n") {
                Piece::Knight
            } else {
                Piece::Queen
            }
        });
        Ok((from, to, promotion))
    }
}

fn parse_square(pair: &str) -> (u8, u8) {
    let mut chars = pair.chars();
    let file = chars.next().unwrap().to_ascii_lowercase() as u8 - b'a';
    let rank = chars.next().unwrap() as u8 - b'1';
    (file, rank)
}

impl<R: BufRead> Player for HumanPlayer<R> {
    /// Reads lines until a geometrically/occupancy-legal move for this
    /// player's color parses, reprompting on each failure (spec.md §4.3).
    fn choose_move(&mut self, board: &Board) -> MoveChoice {
        loop {
            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) => return MoveChoice::Resign,
                Ok(_) => {}
                Err(_) => return MoveChoice::Resign,
            }
            if line.trim().eq_ignore_ascii_case("resign") {
                return MoveChoice::Resign;
            }
            let Ok(((ff, fr), (tf, tr), promotion)) = self.parse_line(&line) else {
                warn!("unparseable move input: {line:?}");
                continue;
            };
            let from = crate::board::square::pack(self.color, ff, fr);
            let to = crate::board::square::pack(self.color, tf, tr);
            if !board.validate_move(self.color, from, to) {
                warn!("illegal move rejected: {line:?}");
                continue;
            }
            self.pending_promotion = promotion;
            return MoveChoice::Move { from, to };
        }
    }

    fn color(&self) -> Color {
        self.color
    }

    fn choose_promotion(&mut self) -> Piece {
        if let Some(kind) = self.pending_promotion.take() {
            return kind;
        }
        loop {
            let mut line = String::new();
            if self.input.read_line(&mut line).unwrap_or(0) == 0 {
                return Piece::Queen;
            }
            match line.trim().to_ascii_uppercase().as_str() {
                "Q" => return Piece::Queen,
                "N" => return Piece::Knight,
                _ => warn!("expected Q or N for promotion, got {line:?}"),
            }
        }
    }
}
