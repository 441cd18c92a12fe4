use crate::board::Board;
use crate::pieces::{Color, Piece};

/// Opening / middle / endgame label, computed once per root search call
/// (spec.md §4.5, §9: the detector uses bitwise patterns that can
/// misclassify a user-specified position that never arose from the
/// initial setup — that behavior is kept deliberately, not corrected).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Opening,
    Middle,
    Endgame,
}

const BACK_RANK_PIECE_THRESHOLD: u32 = 6;
const HOME_PAWN_THRESHOLD: u32 = 9;
const ENDGAME_BLACK_PIECE_THRESHOLD: u32 = 7;

fn starting_kind(file: u8) -> Piece {
    match file {
        0 | 7 => Piece::Rook,
        1 | 6 => Piece::Knight,
        2 | 5 => Piece::Bishop,
        3 => Piece::Queen,
        4 => Piece::King,
        _ => unreachable!(),
    }
}

/// How many of the 16 non-pawn back-rank squares (8 per side) still hold
/// their starting piece kind and color.
fn back_rank_pieces_in_place(board: &Board) -> u32 {
    let mut count = 0;
    for (rank, color) in [(0u8, Color::White), (7u8, Color::Black)] {
        for file in 0..8u8 {
            if let Some((occ_color, occ_kind)) = board.occupant_at(file, rank) {
                if occ_color == color && occ_kind == starting_kind(file) {
                    count += 1;
                }
            }
        }
    }
    count
}

/// How many pawns, across both colors, still sit on their home rank.
fn pawns_on_home_rank(board: &Board) -> u32 {
    let mut count = 0;
    for (rank, color) in [(1u8, Color::White), (6u8, Color::Black)] {
        for file in 0..8u8 {
            if let Some((occ_color, Piece::Pawn)) = board.occupant_at(file, rank) {
                if occ_color == color {
                    count += 1;
                }
            }
        }
    }
    count
}

/// Literal proxy from spec.md §4.5/§9: "fewer than 7 live black-side
/// pieces total on the board", counted over the Black roster block
/// (slots 0..15) regardless of which color is actually ahead in
/// material — kept as written even though it only approximates overall
/// endgame-ness.
fn live_black_side_pieces(board: &Board) -> u32 {
    board.pieces_of(Color::Black).len() as u32
}

pub fn detect(board: &Board) -> Phase {
    if live_black_side_pieces(board) < ENDGAME_BLACK_PIECE_THRESHOLD {
        return Phase::Endgame;
    }
    if back_rank_pieces_in_place(board) > BACK_RANK_PIECE_THRESHOLD
        && pawns_on_home_rank(board) >= HOME_PAWN_THRESHOLD
    {
        return Phase::Opening;
    }
    Phase::Middle
}
