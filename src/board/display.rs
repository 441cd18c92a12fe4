//! Terminal pretty-printer, grounded on the teacher's
//! `simple_engine::debug::print_board` (alternating square backgrounds via
//! ANSI codes, rank 8 printed first). Purely a `Display` impl for
//! diagnostics — not a persistence format.

use std::fmt;

use crate::pieces::Color;

use super::Board;

const WHITE_BG: &str = "\x1b[48;5;15m";
const BLACK_BG: &str = "\x1b[48;5;0m";
const RESET: &str = "\x1b[0m";

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} | ", rank + 1)?;
            for file in 0..8u8 {
                let bg = if (file + rank) % 2 == 0 { WHITE_BG } else { BLACK_BG };
                match self.occupant_at(file, rank) {
                    Some((color, kind)) => {
                        let c = if color == Color::White {
                            kind.as_char()
                        } else {
                            kind.as_char().to_ascii_lowercase()
                        };
                        write!(f, "{bg} {c} {RESET}")?;
                    }
                    None => write!(f, "{bg}   {RESET}")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "    ")?;
        for file in 0..8u8 {
            write!(f, " {} ", (b'a' + file) as char)?;
        }
        writeln!(f)
    }
}

/// Dump of every live piece as `<kind><algebraic>`, one line per side.
/// Debug-only; never parsed back by `setup` (that takes the 8x8 char grid
/// instead), so this carries no FEN-style guarantees.
pub fn fen_like(board: &Board) -> String {
    let mut white = Vec::new();
    let mut black = Vec::new();
    for rank in 0..8u8 {
        for file in 0..8u8 {
            if let Some((color, kind)) = board.occupant_at(file, rank) {
                let s = format!("{}{}{}", kind.as_char(), (b'a' + file) as char, rank + 1);
                if color == Color::White {
                    white.push(s);
                } else {
                    black.push(s);
                }
            }
        }
    }
    format!("w: {} | b: {}", white.join(" "), black.join(" "))
}
