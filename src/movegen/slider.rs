use crate::board::Board;
use crate::pieces::Color;

use super::on_board;

const ROOK_DIRS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Walks one ray: emit empty squares, emit-then-stop on the first opposing
/// piece, stop (without emitting) on the first own piece. Grounded on the
/// teacher's `ray_scanning` (same stop/capture/block rules, reworked from a
/// bitboard shift into a coordinate walk).
fn ray(board: &Board, color: Color, from: (u8, u8), dir: (i32, i32)) -> Vec<(u8, u8)> {
    let mut out = Vec::new();
    let mut file = from.0 as i32;
    let mut rank = from.1 as i32;
    loop {
        file += dir.0;
        rank += dir.1;
        let Some((f, r)) = on_board(file, rank) else {
            break;
        };
        match board.occupant_at(f, r) {
            None => out.push((f, r)),
            Some((occ_color, _)) if occ_color != color => {
                out.push((f, r));
                break;
            }
            Some(_) => break,
        }
    }
    out
}

fn rays(board: &Board, color: Color, from: (u8, u8), dirs: &[(i32, i32)]) -> Vec<(u8, u8)> {
    dirs.iter().flat_map(|&d| ray(board, color, from, d)).collect()
}

pub fn rook_rays(board: &Board, color: Color, from: (u8, u8)) -> Vec<(u8, u8)> {
    rays(board, color, from, &ROOK_DIRS)
}

pub fn bishop_rays(board: &Board, color: Color, from: (u8, u8)) -> Vec<(u8, u8)> {
    rays(board, color, from, &BISHOP_DIRS)
}

pub fn queen_rays(board: &Board, color: Color, from: (u8, u8)) -> Vec<(u8, u8)> {
    let mut moves = rook_rays(board, color, from);
    moves.extend(bishop_rays(board, color, from));
    moves
}
