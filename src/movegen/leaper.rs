use crate::board::Board;
use crate::pieces::Color;

use super::on_board;

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_OFFSETS: [(i32, i32); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Leaper algorithm (spec.md §4.2): test each fixed offset, emit it when
/// on-board and either empty or occupied by the opposite color.
fn leap(board: &Board, color: Color, from: (u8, u8), offsets: &[(i32, i32)]) -> Vec<(u8, u8)> {
    offsets
        .iter()
        .filter_map(|&(df, dr)| on_board(from.0 as i32 + df, from.1 as i32 + dr))
        .filter(|&(f, r)| match board.occupant_at(f, r) {
            None => true,
            Some((occ_color, _)) => occ_color != color,
        })
        .collect()
}

pub fn knight_leaps(board: &Board, color: Color, from: (u8, u8)) -> Vec<(u8, u8)> {
    leap(board, color, from, &KNIGHT_OFFSETS)
}

/// Plain king leaps, excluding castling — `Board` appends castle
/// destinations separately since they need castling rights and
/// attacked-square checks that have nothing to do with plain geometry.
pub fn king_leaps(board: &Board, color: Color, from: (u8, u8)) -> Vec<(u8, u8)> {
    leap(board, color, from, &KING_OFFSETS)
}
