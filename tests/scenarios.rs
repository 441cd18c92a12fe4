//! End-to-end scenarios driving the public API the way a real game would
//! (spec.md §8): a full checkmate sequence, a classic stalemate position,
//! promotion, castling, en passant, and the options depth clamp.

use mailbox_chess_engine::board::square;
use mailbox_chess_engine::player::GameOptionsBuilder;
use mailbox_chess_engine::prelude::*;

/// A move producer whose `choose_move` is never called — these tests
/// drive `Board::apply` directly and only need a `Player` for its color
/// and promotion choice.
struct Scripted {
    color: Color,
    promote_to: Piece,
}

impl Scripted {
    fn new(color: Color) -> Self {
        Scripted {
            color,
            promote_to: Piece::Queen,
        }
    }
}

impl Player for Scripted {
    fn choose_move(&mut self, _board: &Board) -> MoveChoice {
        unimplemented!("scenarios drive Board::apply directly")
    }

    fn color(&self) -> Color {
        self.color
    }

    fn choose_promotion(&mut self) -> Piece {
        self.promote_to
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
fn scholars_mate_checkmates_black() {
    let mut board = Board::setup(initial_grid(), Color::White).unwrap();
    let mut white = Scripted::new(Color::White);
    let mut black = Scripted::new(Color::Black);

    let moves: [(Color, (u8, u8), (u8, u8)); 7] = [
        (Color::White, (4, 1), (4, 3)), // 1. e4
        (Color::Black, (4, 6), (4, 4)), // 1... e5
        (Color::White, (5, 0), (2, 3)), // 2. Bc4
        (Color::Black, (1, 7), (2, 5)), // 2... Nc6
        (Color::White, (3, 0), (7, 4)), // 3. Qh5
        (Color::Black, (6, 7), (5, 5)), // 3... Nf6??
        (Color::White, (7, 4), (5, 6)), // 4. Qxf7#
    ];

    for (color, from, to) in moves {
        let from_sq = square::pack(color, from.0, from.1);
        let to_sq = square::pack(color, to.0, to.1);
        let applied = match color {
            Color::White => board.apply(&mut white, from_sq, to_sq),
            Color::Black => board.apply(&mut black, from_sq, to_sq),
        };
        assert!(applied, "move {from:?}->{to:?} should be legal");
    }

    assert!(board.in_check(Color::Black));
    assert!(!board.has_legal_move(Color::Black, &mut black));
}

#[test]
fn classic_stalemate_position_has_no_legal_move_and_no_check() {
    // King f7 + Queen g6 vs lone king h8: the textbook stalemate.
    let mut grid = empty_grid();
    grid[7][7] = 'k'; // h8
    grid[6][5] = 'K'; // f7
    grid[5][6] = 'Q'; // g6
    let board = Board::setup(grid, Color::Black).unwrap();
    let mut black = Scripted::new(Color::Black);

    assert!(!board.in_check(Color::Black));
    let mut board = board;
    assert!(!board.has_legal_move(Color::Black, &mut black));
}

#[test]
fn pawn_reaching_last_rank_promotes_to_queen() {
    let mut grid = empty_grid();
    grid[0][4] = 'K'; // e1
    grid[7][4] = 'k'; // e8
    grid[6][0] = 'P'; // a7
    let mut board = Board::setup(grid, Color::White).unwrap();
    let mut white = Scripted::new(Color::White);

    let from = square::pack(Color::White, 0, 6);
    let to = square::pack(Color::White, 0, 7);
    assert!(board.apply(&mut white, from, to));
    assert_eq!(board.occupant_at(0, 7), Some((Color::White, Piece::Queen)));
}

#[test]
fn white_kingside_castle_moves_rook_and_clears_rights() {
    let mut grid = empty_grid();
    grid[0][4] = 'K'; // e1
    grid[0][7] = 'R'; // h1
    grid[7][4] = 'k'; // e8
    let mut board = Board::setup(grid, Color::White).unwrap();
    let mut white = Scripted::new(Color::White);

    let from = square::pack(Color::White, 4, 0);
    let to = square::pack(Color::White, 6, 0);
    assert!(board.apply(&mut white, from, to));
    assert_eq!(board.occupant_at(6, 0), Some((Color::White, Piece::King)));
    assert_eq!(board.occupant_at(5, 0), Some((Color::White, Piece::Rook)));
    assert!(!board.castling_rights().can(Color::White, true));
    assert!(!board.castling_rights().can(Color::White, false));

    board.undo().unwrap();
    assert_eq!(board.occupant_at(4, 0), Some((Color::White, Piece::King)));
    assert_eq!(board.occupant_at(7, 0), Some((Color::White, Piece::Rook)));
    assert!(board.castling_rights().can(Color::White, true));
}

#[test]
fn en_passant_capture_removes_the_passed_pawn() {
    let mut grid = empty_grid();
    grid[0][4] = 'K'; // e1
    grid[7][4] = 'k'; // e8
    grid[4][4] = 'P'; // e5
    grid[6][3] = 'p'; // d7
    let mut board = Board::setup(grid, Color::Black).unwrap();
    let mut white = Scripted::new(Color::White);
    let mut black = Scripted::new(Color::Black);

    let bf = square::pack(Color::Black, 3, 6);
    let bt = square::pack(Color::Black, 3, 4);
    assert!(board.apply(&mut black, bf, bt));
    assert_eq!(board.en_passant_target(), Some((3, 5)));

    let wf = square::pack(Color::White, 4, 4);
    let wt = square::pack(Color::White, 3, 5);
    assert!(board.apply(&mut white, wf, wt));
    assert_eq!(board.occupant_at(3, 4), None);
    assert_eq!(board.occupant_at(3, 5), Some((Color::White, Piece::Pawn)));
}

#[test]
fn game_options_depth_clamps_to_spec_bounds() {
    let low = GameOptionsBuilder::default()
        .board(empty_grid())
        .first_colour(Color::White)
        .human_first(true)
        .depth(0u32)
        .build()
        .unwrap();
    assert_eq!(low.clamped_depth(), 2);

    let high = GameOptionsBuilder::default()
        .board(empty_grid())
        .first_colour(Color::White)
        .human_first(true)
        .depth(99u32)
        .build()
        .unwrap();
    assert_eq!(high.clamped_depth(), 20);
}
