use crate::board::Board;
use crate::pieces::Color;

use super::on_board;

fn direction(color: Color) -> i32 {
    match color {
        Color::White => 1,
        Color::Black => -1,
    }
}

fn start_rank(color: Color) -> u8 {
    match color {
        Color::White => 1,
        Color::Black => 6,
    }
}

/// Forward push(es) plus the two diagonal captures, including en passant
/// (spec.md §4.2). Bounded at 4 destinations: one push, one double push,
/// two captures (en passant substitutes for an ordinary capture on the
/// same square, it never adds a fifth).
pub fn pawn_destinations(board: &Board, color: Color, from: (u8, u8)) -> Vec<(u8, u8)> {
    let mut out = Vec::new();
    let dir = direction(color);
    let (file, rank) = (from.0 as i32, from.1 as i32);

    if let Some((f, r)) = on_board(file, rank + dir) {
        if board.occupant_at(f, r).is_none() {
            out.push((f, r));
            if from.1 == start_rank(color) {
                if let Some((f2, r2)) = on_board(file, rank + 2 * dir) {
                    if board.occupant_at(f2, r2).is_none() {
                        out.push((f2, r2));
                    }
                }
            }
        }
    }

    for df in [-1, 1] {
        let Some((f, r)) = on_board(file + df, rank + dir) else {
            continue;
        };
        match board.occupant_at(f, r) {
            Some((occ_color, _)) if occ_color != color => out.push((f, r)),
            None if board.en_passant_target() == Some((f, r)) => out.push((f, r)),
            _ => {}
        }
    }

    out
}
