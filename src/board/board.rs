use log::debug;

use crate::error::InvalidPosition;
use crate::movegen;
use crate::pieces::{Color, Piece};

use super::castling::CastlingRights;
use super::slot::{self, Slot};
use super::square;
use super::undo::UndoRecord;

/// Owns the §3 position state and exposes `setup`/`validate_move`/`apply`/
/// `undo`/check-detection (spec.md §4.1). Grounded on the teacher's
/// `simple_engine::board::Board`, re-expressed over the spec's packed
/// square-byte roster instead of the teacher's per-square bitboards.
#[derive(Debug, Clone)]
pub struct Board {
    /// `grid[file][rank]` is a roster index, or `None` for an empty square.
    grid: [[Option<usize>; 8]; 8],
    roster: [Slot; 32],
    side_to_move: Color,
    castling_rights: CastlingRights,
    /// Coordinates of the square a pawn passed over on its last double
    /// step, valid for one half-move only (spec.md §3.4, §4.1).
    en_passant: Option<(u8, u8)>,
    undo_stack: Vec<UndoRecord>,
    status: GameStatus,
}

/// Outcome of a finished game (spec.md §4.4: "if alpha ∈ {WIN, LOSS,
/// STALE}, set a game-over status on the Board"). `record_status` is the
/// one place that sets it; every other accessor only reads it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Checkmate(Color),
    Stalemate,
}

const BACK_RANKS: [u8; 2] = [0, 7];

impl Board {
    /// Builds roster and grid from an 8x8 character grid, uppercase is
    /// black, lowercase is white, `.` is empty (spec.md §4.1). `pieces` is
    /// indexed `pieces[rank][file]` with `rank` 0 at the white back rank.
    pub fn setup(pieces: [[char; 8]; 8], side_to_move: Color) -> Result<Board, InvalidPosition> {
        let mut roster = [Slot {
            square: square::EMPTY,
            kind: Piece::Pawn,
        }; 32];
        let mut grid: [[Option<usize>; 8]; 8] = [[None; 8]; 8];
        let mut next_offset = [Vec::<usize>::new(), Vec::<usize>::new()];
        for color in [Color::Black, Color::White] {
            let base = slot::side_base(color);
            next_offset[color.bit() as usize] = vec![
                slot::KING_OFFSET,
                slot::QUEEN_OFFSET,
                slot::ROOK_OFFSETS[0],
                slot::ROOK_OFFSETS[1],
                slot::BISHOP_OFFSETS[0],
                slot::BISHOP_OFFSETS[1],
                slot::KNIGHT_OFFSETS[0],
                slot::KNIGHT_OFFSETS[1],
            ]
            .into_iter()
            .map(|o| base + o)
            .collect();
        }
        let mut pawn_cursor = [0usize; 2];
        let mut king_count = [0u32; 2];
        let mut piece_count = [0u32; 2];

        for rank in 0..8u8 {
            for file in 0..8u8 {
                let c = pieces[rank as usize][file as usize];
                if c == '.' {
                    continue;
                }
                let is_black = c.is_ascii_uppercase();
                let color = if is_black { Color::Black } else { Color::White };
                let kind = Piece::from_char(c.to_ascii_uppercase())
                    .ok_or(InvalidPosition::UnknownPieceChar(c))?;

                if kind == Piece::Pawn && BACK_RANKS.contains(&rank) {
                    return Err(InvalidPosition::PawnOnBackRank { file, rank });
                }

                let bit = color.bit() as usize;
                let slot_index = if kind == Piece::Pawn {
                    let base = slot::side_base(color);
                    let idx = slot::PAWN_OFFSETS
                        .get(pawn_cursor[bit])
                        .copied()
                        .ok_or(InvalidPosition::TooManyOfKind {
                            color_is_black: is_black,
                            kind: 'P',
                        })?;
                    pawn_cursor[bit] += 1;
                    base + idx
                } else if kind == Piece::King {
                    king_count[bit] += 1;
                    if king_count[bit] > 1 {
                        return Err(InvalidPosition::WrongKingCount {
                            color_is_black: is_black,
                            count: king_count[bit],
                        });
                    }
                    slot::side_base(color) + slot::KING_OFFSET
                } else {
                    let base = slot::side_base(color);
                    let queue = &mut next_offset[bit];
                    // Rooks are slotted by the file they're actually on so
                    // `castle_destinations`'s kingside/queenside offset
                    // lookup stays correct for any single-rook position,
                    // not just the symmetric starting one.
                    let pos = match kind {
                        Piece::Queen => queue.iter().position(|&s| s == base + slot::QUEEN_OFFSET),
                        Piece::Rook => {
                            let preferred = if file == 0 {
                                Some(base + slot::ROOK_OFFSETS[0])
                            } else if file == 7 {
                                Some(base + slot::ROOK_OFFSETS[1])
                            } else {
                                None
                            };
                            preferred
                                .and_then(|want| queue.iter().position(|&s| s == want))
                                .or_else(|| {
                                    queue.iter().position(|&s| {
                                        slot::ROOK_OFFSETS.iter().any(|&o| s == base + o)
                                    })
                                })
                        }
                        Piece::Bishop => queue.iter().position(|&s| {
                            slot::BISHOP_OFFSETS.iter().any(|&o| s == base + o)
                        }),
                        Piece::Knight => queue.iter().position(|&s| {
                            slot::KNIGHT_OFFSETS.iter().any(|&o| s == base + o)
                        }),
                        _ => unreachable!(),
                    };
                    let pos = pos.ok_or(InvalidPosition::TooManyOfKind {
                        color_is_black: is_black,
                        kind: c.to_ascii_uppercase(),
                    })?;
                    queue.remove(pos)
                };

                piece_count[bit] += 1;
                if piece_count[bit] > 16 {
                    return Err(InvalidPosition::TooManyPieces {
                        color_is_black: is_black,
                        count: piece_count[bit],
                    });
                }

                roster[slot_index] = Slot {
                    square: square::pack(color, file, rank),
                    kind,
                };
                grid[file as usize][rank as usize] = Some(slot_index);
            }
        }

        for bit in 0..2 {
            if king_count[bit] != 1 {
                return Err(InvalidPosition::WrongKingCount {
                    color_is_black: bit == Color::Black.bit() as usize,
                    count: king_count[bit],
                });
            }
        }

        let board = Board {
            grid,
            roster,
            side_to_move,
            castling_rights: CastlingRights::all(),
            en_passant: None,
            undo_stack: Vec::new(),
            status: GameStatus::InProgress,
        };
        debug!("board set up, side to move {:?}", side_to_move);
        Ok(board)
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Last status `record_status` computed; `InProgress` until then.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Classifies the side to move's position — checkmate, stalemate, or
    /// still in progress — and stores it (spec.md §4.4). `responder` is
    /// only used to drive `has_legal_move`'s trial moves; it is never
    /// left applied.
    pub fn record_status(&mut self, responder: &mut dyn crate::player::Player) -> GameStatus {
        let side = self.side_to_move;
        let status = if self.has_legal_move(side, responder) {
            GameStatus::InProgress
        } else if self.in_check(side) {
            GameStatus::Checkmate(side.opposite())
        } else {
            GameStatus::Stalemate
        };
        self.status = status;
        status
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    pub fn en_passant_target(&self) -> Option<(u8, u8)> {
        self.en_passant
    }

    /// `(color, kind)` of the live piece at `(file, rank)`, if any.
    pub fn occupant_at(&self, file: u8, rank: u8) -> Option<(Color, Piece)> {
        self.grid[file as usize][rank as usize].map(|s| {
            let slot = &self.roster[s];
            (slot.color(), slot.kind)
        })
    }

    fn slot_at(&self, file: u8, rank: u8) -> Option<usize> {
        self.grid[file as usize][rank as usize]
    }

    pub fn king_square(&self, color: Color) -> (u8, u8) {
        let slot = &self.roster[slot::side_base(color) + slot::KING_OFFSET];
        square::coords(slot.square)
    }

    /// True iff `(file, rank)` is attacked by any live piece of color
    /// `by` (spec.md §4.1: "via each piece's validateMove against the
    /// king square", generalized to any square for reuse by castling).
    pub fn attacked(&self, file: u8, rank: u8, by: Color) -> bool {
        for &s in &slot::slot_range(by).collect::<Vec<_>>() {
            let slot = &self.roster[s];
            if !slot.alive() {
                continue;
            }
            let from = square::coords(slot.square);
            if movegen::validate(self, slot.kind, by, from, (file, rank)) {
                return true;
            }
        }
        false
    }

    pub fn in_check(&self, color: Color) -> bool {
        let (file, rank) = self.king_square(color);
        self.attacked(file, rank, color.opposite())
    }

    /// Geometric/occupancy legality for `mover`'s piece at `from_square`
    /// moving to `to_square`, ignoring self-check (spec.md §4.1). Accepts
    /// and returns the spec's packed square bytes; converts to coordinate
    /// tuples internally for `movegen`.
    pub fn validate_move(&self, mover: Color, from_square: u8, to_square: u8) -> bool {
        let from = square::coords(from_square);
        let to = square::coords(to_square);
        let Some(slot_idx) = self.slot_at(from.0, from.1) else {
            return false;
        };
        let slot = &self.roster[slot_idx];
        if !slot.alive() || slot.color() != mover {
            return false;
        }
        if movegen::validate(self, slot.kind, mover, from, to) {
            return true;
        }
        if slot.kind == Piece::King {
            return self.castle_destinations(mover).contains(&to);
        }
        false
    }

    /// King-side/queen-side castle destinations currently available to
    /// `color`: rights still held, path empty, king not in check and does
    /// not transit or land on an attacked square (spec.md §4.1).
    pub(crate) fn castle_destinations(&self, color: Color) -> Vec<(u8, u8)> {
        let mut out = Vec::new();
        if self.in_check(color) {
            return out;
        }
        let rank = self.king_square(color).1;
        for king_side in [true, false] {
            if !self.castling_rights.can(color, king_side) {
                continue;
            }
            let rook_offset = if king_side {
                slot::ROOK_OFFSETS[1]
            } else {
                slot::ROOK_OFFSETS[0]
            };
            let rook_slot = &self.roster[slot::side_base(color) + rook_offset];
            if !rook_slot.alive() {
                continue;
            }
            let between: &[u8] = if king_side { &[5, 6] } else { &[1, 2, 3] };
            if between
                .iter()
                .any(|&f| self.occupant_at(f, rank).is_some())
            {
                continue;
            }
            let transit: [u8; 2] = if king_side { [5, 6] } else { [3, 2] };
            if transit
                .iter()
                .any(|&f| self.attacked(f, rank, color.opposite()))
            {
                continue;
            }
            let dest_file = if king_side { 6 } else { 2 };
            out.push((dest_file, rank));
        }
        out
    }

    /// Performs the move if `validate_move` passes; pushes an undo record;
    /// performs the rook hop for castling, sets/consumes the en-passant
    /// target, and asks `mover` to choose a promotion kind if the pawn
    /// reaches the last rank (spec.md §4.1). Returns `false` without side
    /// effects if the move is illegal.
    pub fn apply(
        &mut self,
        mover: &mut dyn crate::player::Player,
        from_square: u8,
        to_square: u8,
    ) -> bool {
        let color = mover.color();
        if !self.validate_move(color, from_square, to_square) {
            return false;
        }
        let from = square::coords(from_square);
        let to = square::coords(to_square);
        let moved_slot = self.slot_at(from.0, from.1).expect("validated above");
        let kind = self.roster[moved_slot].kind;

        let castling_rights_before = self.castling_rights;
        let en_passant_before = self.en_passant;
        let side_before = self.side_to_move;

        let is_castle = kind == Piece::King && (from.0 as i32 - to.0 as i32).abs() == 2;
        let is_en_passant = kind == Piece::Pawn
            && to.0 != from.0
            && self.occupant_at(to.0, to.1).is_none()
            && self.en_passant == Some(to);

        let captured = if is_en_passant {
            let captured_rank = from.1;
            self.slot_at(to.0, captured_rank)
                .map(|s| (s, self.roster[s].square))
        } else {
            self.slot_at(to.0, to.1).map(|s| (s, self.roster[s].square))
        };

        if let Some((cap_slot, _)) = captured {
            self.roster[cap_slot].square = square::killed(self.roster[cap_slot].square);
            let (cf, cr) = square::coords(self.roster[cap_slot].square);
            self.grid[cf as usize][cr as usize] = None;
        }

        self.grid[from.0 as usize][from.1 as usize] = None;
        self.roster[moved_slot].square = square::with_coords(self.roster[moved_slot].square, to.0, to.1);
        self.grid[to.0 as usize][to.1 as usize] = Some(moved_slot);

        let rook_hop = if is_castle {
            let rank = from.1;
            let king_side = to.0 == 6;
            let (rook_from_file, rook_to_file) = if king_side { (7, 5) } else { (0, 3) };
            let rook_slot = self
                .slot_at(rook_from_file, rank)
                .expect("castle validated rook presence");
            let prior = self.roster[rook_slot].square;
            self.grid[rook_from_file as usize][rank as usize] = None;
            self.roster[rook_slot].square =
                square::with_coords(self.roster[rook_slot].square, rook_to_file, rank);
            self.grid[rook_to_file as usize][rank as usize] = Some(rook_slot);
            Some((rook_slot, prior))
        } else {
            None
        };

        if kind == Piece::King {
            self.castling_rights.clear_side(color);
        } else if kind == Piece::Rook {
            if from == (0, if color == Color::White { 0 } else { 7 }) {
                self.castling_rights.clear(color, false);
            } else if from == (7, if color == Color::White { 0 } else { 7 }) {
                self.castling_rights.clear(color, true);
            }
        }
        if let Some((cap_slot, cap_square_before)) = captured {
            let cap_color = self.roster[cap_slot].color();
            if self.roster[cap_slot].kind == Piece::Rook {
                let cap_file = square::file_of(cap_square_before);
                if cap_file == 0 {
                    self.castling_rights.clear(cap_color, false);
                } else if cap_file == 7 {
                    self.castling_rights.clear(cap_color, true);
                }
            }
        }

        self.en_passant = if kind == Piece::Pawn && (to.1 as i32 - from.1 as i32).abs() == 2 {
            Some((from.0, (from.1 + to.1) / 2))
        } else {
            None
        };

        let last_rank = if color == Color::White { 7 } else { 0 };
        let promotion = if kind == Piece::Pawn && to.1 == last_rank {
            let chosen = mover.choose_promotion();
            self.roster[moved_slot].kind = chosen;
            Some((moved_slot, kind))
        } else {
            None
        };

        self.undo_stack.push(UndoRecord {
            moved_slot,
            moved_prior_square: square::with_coords(self.roster[moved_slot].square, from.0, from.1),
            captured,
            rook_hop,
            promotion,
            castling_rights_before,
            en_passant_before,
            side_before,
        });
        self.side_to_move = self.side_to_move.opposite();
        true
    }

    /// Pops the last undo record and exactly reverses it (spec.md §4.1).
    pub fn undo(&mut self) -> Result<(), crate::error::InternalInvariantViolation> {
        let record = self
            .undo_stack
            .pop()
            .ok_or(crate::error::InternalInvariantViolation::UndoStackEmpty)?;

        if let Some((slot_idx, prior_kind)) = record.promotion {
            self.roster[slot_idx].kind = prior_kind;
        }

        let (cur_file, cur_rank) = square::coords(self.roster[record.moved_slot].square);
        self.grid[cur_file as usize][cur_rank as usize] = None;
        self.roster[record.moved_slot].square = record.moved_prior_square;
        let (pf, pr) = square::coords(record.moved_prior_square);
        self.grid[pf as usize][pr as usize] = Some(record.moved_slot);

        if let Some((rook_slot, prior)) = record.rook_hop {
            let (rf, rr) = square::coords(self.roster[rook_slot].square);
            self.grid[rf as usize][rr as usize] = None;
            self.roster[rook_slot].square = prior;
            let (pf, pr) = square::coords(prior);
            self.grid[pf as usize][pr as usize] = Some(rook_slot);
        }

        if let Some((cap_slot, prior)) = record.captured {
            self.roster[cap_slot].square = square::revived(prior);
            let (cf, cr) = square::coords(prior);
            self.grid[cf as usize][cr as usize] = Some(cap_slot);
        }

        self.castling_rights = record.castling_rights_before;
        self.en_passant = record.en_passant_before;
        self.side_to_move = record.side_before;
        Ok(())
    }

    /// After `apply`, reports whether `mover`'s king is attacked (spec.md
    /// §4.1); callers undo if true.
    pub fn leaves_own_king_in_check(&self, mover: Color) -> bool {
        self.in_check(mover)
    }

    /// True iff `color` has at least one legal move that does not leave
    /// its own king in check. Used by the search's terminal detection and
    /// by `game_status` (spec.md §4.4).
    pub fn has_legal_move(&mut self, color: Color, mover: &mut dyn crate::player::Player) -> bool {
        for &s in &slot::slot_range(color).collect::<Vec<_>>() {
            if !self.roster[s].alive() {
                continue;
            }
            let kind = self.roster[s].kind;
            let from = square::coords(self.roster[s].square);
            let mut destinations = movegen::generate(self, kind, color, from);
            if kind == Piece::King {
                destinations.extend(self.castle_destinations(color));
            }
            for to in destinations {
                let from_sq = square::pack(color, from.0, from.1);
                let to_sq = square::pack(color, to.0, to.1);
                if self.apply(mover, from_sq, to_sq) {
                    let illegal = self.leaves_own_king_in_check(color);
                    let _ = self.undo();
                    if !illegal {
                        return true;
                    }
                }
            }
        }
        false
    }

    pub fn pieces_of(&self, color: Color) -> Vec<(usize, Piece, (u8, u8))> {
        slot::slot_range(color)
            .filter(|&s| self.roster[s].alive())
            .map(|s| (s, self.roster[s].kind, square::coords(self.roster[s].square)))
            .collect()
    }

    /// Every live piece on the board, for display/evaluation.
    pub fn occupied_squares(&self) -> Vec<(Color, Piece, u8, u8)> {
        let mut out = Vec::new();
        for rank in 0..8u8 {
            for file in 0..8u8 {
                if let Some((color, kind)) = self.occupant_at(file, rank) {
                    out.push((color, kind, file, rank));
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::MoveChoice;

    /// A scripted player used only to drive `apply` in tests: plays the
    /// single move queued into it and always promotes to Queen.
    struct Scripted {
        color: Color,
    }

    impl crate::player::Player for Scripted {
        fn choose_move(&mut self, _board: &Board) -> MoveChoice {
            unimplemented!("tests call Board::apply directly")
        }
        fn color(&self) -> Color {
            self.color
        }
        fn choose_promotion(&mut self) -> Piece {
            Piece::Queen
        }
    }

    fn empty_grid() -> [[char; 8]; 8] {
        [['.'; 8]; 8]
    }

    fn initial_grid() -> [[char; 8]; 8] {
        [
            ['R', 'N', 'B', 'Q', 'K', 'B', 'N', 'R'],
            ['P', 'P', 'P', 'P', 'P', 'P', 'P', 'P'],
            ['.', '.', '.', '.', '.', '.', '.', '.'],
            ['.', '.', '.', '.', '.', '.', '.', '.'],
            ['.', '.', '.', '.', '.', '.', '.', '.'],
            ['.', '.', '.', '.', '.', '.', '.', '.'],
            ['p', 'p', 'p', 'p', 'p', 'p', 'p', 'p'],
            ['r', 'n', 'b', 'q', 'k', 'b', 'n', 'r'],
        ]
    }

    #[test]
    fn setup_rejects_missing_king() {
        let mut grid = empty_grid();
        grid[0][4] = 'k';
        let err = Board::setup(grid, Color::White).unwrap_err();
        assert!(matches!(err, InvalidPosition::WrongKingCount { .. }));
    }

    #[test]
    fn setup_rejects_pawn_on_back_rank() {
        let mut grid = empty_grid();
        grid[0][4] = 'k';
        grid[7][4] = 'K';
        grid[0][0] = 'p';
        let err = Board::setup(grid, Color::White).unwrap_err();
        assert!(matches!(err, InvalidPosition::PawnOnBackRank { .. }));
    }

    #[test]
    fn apply_then_undo_restores_grid_and_roster() {
        let mut board = Board::setup(initial_grid(), Color::White).unwrap();
        let mut mover = Scripted { color: Color::White };
        let before = format!("{:?}", board.occupied_squares());

        let from = square::pack(Color::White, 4, 1);
        let to = square::pack(Color::White, 4, 3);
        assert!(board.apply(&mut mover, from, to));
        assert_ne!(format!("{:?}", board.occupied_squares()), before);

        board.undo().unwrap();
        assert_eq!(format!("{:?}", board.occupied_squares()), before);
        assert_eq!(board.side_to_move(), Color::White);
    }

    #[test]
    fn king_move_and_back_clears_then_restores_castling_rights() {
        let mut board = Board::setup(initial_grid(), Color::White).unwrap();
        let mut white = Scripted { color: Color::White };
        let mut black = Scripted { color: Color::Black };

        assert!(board.castling_rights().can(Color::White, true));
        assert!(board.castling_rights().can(Color::White, false));

        let from = square::pack(Color::White, 4, 0);
        let to = square::pack(Color::White, 4, 1);
        assert!(board.apply(&mut white, from, to));
        assert!(!board.castling_rights().can(Color::White, true));
        assert!(!board.castling_rights().can(Color::White, false));

        // Black makes a null-ish move elsewhere so undo has to reverse
        // exactly one ply at a time, matching the strict undo stack.
        let bf = square::pack(Color::Black, 0, 6);
        let bt = square::pack(Color::Black, 0, 5);
        assert!(board.apply(&mut black, bf, bt));

        board.undo().unwrap();
        board.undo().unwrap();
        assert!(board.castling_rights().can(Color::White, true));
        assert!(board.castling_rights().can(Color::White, false));
    }

    #[test]
    fn in_check_detects_rook_on_open_file() {
        let mut grid = empty_grid();
        grid[0][4] = 'k';
        grid[7][4] = 'K';
        grid[0][0] = 'r';
        let board = Board::setup(grid, Color::White).unwrap();
        assert!(board.in_check(Color::Black));
        assert!(!board.in_check(Color::White));
    }
}
