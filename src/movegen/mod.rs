//! Per-piece move geometry (spec.md §4.2).
//!
//! Each function here is pure geometry/occupancy over the board's grid: it
//! knows nothing about check, castling rights or en passant bookkeeping —
//! those live on `Board`, which combines this module's output with that
//! extra state. Grounded on the teacher's `pieces::moves` ray-scanning
//! idiom (`rooks_moves`/`bishops_moves`/`queen_moves` built from one
//! direction-iterating primitive), re-targeted at the grid instead of
//! bitboard shifts.

mod leaper;
mod pawn;
mod slider;

use crate::board::Board;
use crate::pieces::{Color, Piece};

pub use pawn::pawn_destinations;

/// Enumerates candidate destinations for the piece at `from`, ignoring
/// self-check and castling (castling is generated separately by `Board`
/// since it needs castling rights and attacked-square information).
pub fn generate(board: &Board, kind: Piece, color: Color, from: (u8, u8)) -> Vec<(u8, u8)> {
    match kind {
        Piece::Rook => slider::rook_rays(board, color, from),
        Piece::Bishop => slider::bishop_rays(board, color, from),
        Piece::Queen => slider::queen_rays(board, color, from),
        Piece::Knight => leaper::knight_leaps(board, color, from),
        Piece::King => leaper::king_leaps(board, color, from),
        Piece::Pawn => pawn::pawn_destinations(board, color, from),
    }
}

/// `to` is a legal destination for the piece at `from` iff it shows up in
/// `generate` (spec.md §4.2: "validate... as used by Board.validateMove").
pub fn validate(board: &Board, kind: Piece, color: Color, from: (u8, u8), to: (u8, u8)) -> bool {
    generate(board, kind, color, from).contains(&to)
}

pub(crate) fn on_board(file: i32, rank: i32) -> Option<(u8, u8)> {
    if (0..8).contains(&file) && (0..8).contains(&rank) {
        Some((file as u8, rank as u8))
    } else {
        None
    }
}
