use crate::pieces::{Color, Piece};

use super::castling::CastlingRights;

/// Everything needed to invert one `Board::apply` (spec.md §3.4). Pushed
/// onto a strict stack; `undo` pops exactly one and reverses it.
#[derive(Debug, Clone)]
pub struct UndoRecord {
    pub moved_slot: usize,
    pub moved_prior_square: u8,

    pub captured: Option<(usize, u8)>,

    /// The rook's slot and prior square, only set for a castling move.
    pub rook_hop: Option<(usize, u8)>,

    /// Slot and prior kind of a pawn that just promoted.
    pub promotion: Option<(usize, Piece)>,

    pub castling_rights_before: CastlingRights,
    pub en_passant_before: Option<(u8, u8)>,
    pub side_before: Color,
}
