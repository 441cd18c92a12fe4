/// A chess piece kind, independent of color.
///
/// Mirrors the `'K','Q','R','B','N','P'` kind-character roster described for
/// the board's piece slots: a pawn slot's kind can be overwritten in place on
/// promotion, so `Piece` has to be a plain value, not an identity.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Piece {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

pub const ALL_PIECES: [Piece; 6] = [
    Piece::Pawn,
    Piece::Knight,
    Piece::Bishop,
    Piece::Rook,
    Piece::Queen,
    Piece::King,
];

/// Kinds a pawn may become on promotion (spec.md §4.1: the mover is only
/// ever asked to choose between Queen and Knight).
pub const PROMOTE_PIECE: [Piece; 2] = [Piece::Queen, Piece::Knight];

impl Piece {
    /// Material weight used by the fast evaluator (spec.md §4.5).
    pub fn fast_weight(self) -> i32 {
        match self {
            Piece::King => 200,
            Piece::Queen => 9,
            Piece::Rook => 5,
            Piece::Bishop => 3,
            Piece::Knight => 3,
            Piece::Pawn => 1,
        }
    }

    /// Single-character kind tag as stored alongside a roster slot.
    pub fn as_char(self) -> char {
        match self {
            Piece::King => 'K',
            Piece::Queen => 'Q',
            Piece::Rook => 'R',
            Piece::Bishop => 'B',
            Piece::Knight => 'N',
            Piece::Pawn => 'P',
        }
    }

    pub fn from_char(c: char) -> Option<Piece> {
        match c.to_ascii_uppercase() {
            'K' => Some(Piece::King),
            'Q' => Some(Piece::Queen),
            'R' => Some(Piece::Rook),
            'B' => Some(Piece::Bishop),
            'N' => Some(Piece::Knight),
            'P' => Some(Piece::Pawn),
            _ => None,
        }
    }
}
