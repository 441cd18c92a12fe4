/// Side to move. `White` owns roster slots 16..31, `Black` slots 0..15
/// (spec.md §3.2).
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash, serde::Serialize, serde::Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// `1` for White, `-1` for Black — used to flip evaluator signs so a
    /// single evaluation routine can serve both sides (spec.md §4.4/§4.5,
    /// "side-aware indexing").
    pub fn sign(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// High bit of the square byte (spec.md §3.1): 1 = black, 0 = white.
    pub fn bit(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    pub fn from_bit(bit: u8) -> Color {
        if bit == 0 {
            Color::White
        } else {
            Color::Black
        }
    }
}
