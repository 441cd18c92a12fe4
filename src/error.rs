//! Error kinds (spec.md §7). Plain `Result`-returning enums in the
//! teacher's own idiom (`CorrectMoveResults`/`IncorrectMoveResults`) — no
//! `Display`/`std::error::Error` ceremony, just `Debug` for diagnostics.
//! Predicates (`validate_move` and friends) never return these; they
//! return `bool`. Only constructors and the undo/apply stack surface them.

/// `Board::setup` rejected a position that would violate the §3.6
/// invariants. Fatal by spec.md §7 — callers are expected to abort rather
/// than try to repair the position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidPosition {
    WrongKingCount { color_is_black: bool, count: u32 },
    TooManyPieces { color_is_black: bool, count: u32 },
    TooManyOfKind { color_is_black: bool, kind: char },
    PawnOnBackRank { file: u8, rank: u8 },
    UnknownPieceChar(char),
    Rejected,
}

/// A human move that failed to parse or failed legality — recoverable,
/// the caller reprompts (spec.md §7).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IllegalUserMove {
    UnparseableInput,
    NoPieceAtSquare,
    NotYourPiece,
    IllegalForPiece,
    LeavesKingInCheck,
}

/// Roster/grid desync or an unbalanced apply/undo stack — indicates a bug
/// in the engine itself, not a bad move (spec.md §7).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalInvariantViolation {
    UndoStackEmpty,
    GridRosterMismatch,
}
