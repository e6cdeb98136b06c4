use super::Square;

/******************************************\
|==========================================|
|                 Colours                  |
|==========================================|
\******************************************/

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Colour {
    White,
    Black,
}

impl Colour {
    pub const NUM: usize = 2;

    /// Direction this colour's pawns advance in
    pub const fn forward(&self) -> Direction {
        match self {
            Colour::White => Direction::N,
            Colour::Black => Direction::S,
        }
    }

    pub const fn double_forward(&self) -> Direction {
        match self {
            Colour::White => Direction::NN,
            Colour::Black => Direction::SS,
        }
    }
}

crate::enum_conversions!(Colour);

impl std::ops::Not for Colour {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        match self {
            Colour::White => Colour::Black,
            Colour::Black => Colour::White,
        }
    }
}

impl std::fmt::Display for Colour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Colour::White => write!(f, "w"),
            Colour::Black => write!(f, "b"),
        }
    }
}

/******************************************\
|==========================================|
|                Directions                |
|==========================================|
\******************************************/

/// # Direction
///
/// A step across the board. The discriminant is the change in square index
/// under the file-major layout, so north is `+1` and east is `+8`. Knight
/// jumps and the pawn double push have their own variants.
#[rustfmt::skip]
#[repr(i8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    N = 1, S = -1, W = -8, E = 8,
    NE = 9, NW = -7, SE = 7, SW = -9,
    NNE = 10, NNW = -6, NEE = 17, NWW = -15,
    SEE = 15, SWW = -17, SSE = 6, SSW = -10,
    NN = 2, SS = -2,
}

crate::enum_conversions!(Direction, i8);

impl Direction {
    /// `(file, rank)` change of one step
    pub const fn offsets(self) -> (i8, i8) {
        use Direction::*;
        match self {
            N => (0, 1),
            S => (0, -1),
            E => (1, 0),
            W => (-1, 0),
            NE => (1, 1),
            NW => (-1, 1),
            SE => (1, -1),
            SW => (-1, -1),
            NNE => (1, 2),
            NNW => (-1, 2),
            NEE => (2, 1),
            NWW => (-2, 1),
            SEE => (2, -1),
            SWW => (-2, -1),
            SSE => (1, -2),
            SSW => (-1, -2),
            NN => (0, 2),
            SS => (0, -2),
        }
    }
}

impl Square {
    /// The square one `dir` step away, or `None` past the edge of the board
    #[inline]
    pub const fn step(self, dir: Direction) -> Option<Self> {
        let (df, dr) = dir.offsets();
        let file = self.file() as i8 + df;
        let rank = self.rank() as i8 + dr;

        if file < 0 || file > 7 || rank < 0 || rank > 7 {
            return None;
        }

        Some(unsafe { Square::from_unchecked(((file as u8) << 3) | rank as u8) })
    }

    /// One `dir` step without an edge check
    ///
    /// ## Safety
    /// The step must stay on the board.
    #[inline]
    pub const unsafe fn step_unchecked(self, dir: Direction) -> Self {
        let index = self as i16 + dir as i16;
        debug_assert!(index >= 0 && index < 64, "step left the board");
        unsafe { Square::from_unchecked(index as u8) }
    }
}

/******************************************\
|==========================================|
|             Castling Rights              |
|==========================================|
\******************************************/

/// # Castling
///
/// The four castling rights as bit flags: `K`, `Q`, `k`, `q` from the low bit up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Castling(pub u8);

crate::bitwise_ops!(Castling);

impl Castling {
    pub const WK: Castling = Castling(1);
    pub const WQ: Castling = Castling(2);
    pub const BK: Castling = Castling(4);
    pub const BQ: Castling = Castling(8);

    pub const WHITE_CASTLING: Castling = Castling(3);
    pub const BLACK_CASTLING: Castling = Castling(12);

    pub const ALL: Castling = Castling(15);
    pub const NONE: Castling = Castling(0);

    /// Single rights in key order
    pub const RIGHTS: [Castling; 4] = [Castling::WK, Castling::WQ, Castling::BK, Castling::BQ];

    /// True when any of `right` is held
    #[inline]
    pub fn has(self, right: Castling) -> bool {
        self & right != Castling::NONE
    }

    #[inline]
    pub fn set(&mut self, right: Castling) {
        *self |= right;
    }

    #[inline]
    pub fn remove(&mut self, right: Castling) {
        *self &= !right;
    }

    #[inline]
    pub fn king_side(col: Colour) -> Self {
        match col {
            Colour::White => Castling::WK,
            Colour::Black => Castling::BK,
        }
    }

    #[inline]
    pub fn queen_side(col: Colour) -> Self {
        match col {
            Colour::White => Castling::WQ,
            Colour::Black => Castling::BQ,
        }
    }
}

impl Default for Castling {
    fn default() -> Self {
        Castling::NONE
    }
}

impl std::ops::Not for Castling {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        Castling(!self.0 & 0x0F)
    }
}

impl std::fmt::Display for Castling {
    /// FEN castling field, `-` when no right is held
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if *self == Castling::NONE {
            return write!(f, "-");
        }

        for (right, c) in Castling::RIGHTS.into_iter().zip(['K', 'Q', 'k', 'q']) {
            if self.has(right) {
                write!(f, "{c}")?;
            }
        }

        Ok(())
    }
}
