use std::fmt;

use super::{Colour, Direction, File, PieceType, Rank, Square};

/******************************************\
|==========================================|
|                 Bitboard                 |
|==========================================|
\******************************************/

/// # Bitboard
///
/// A set of squares, one bit per square index. Bit 0 is a1, bit 1 is a2 and
/// bit 8 is b1, so a file is one byte and a rank is every eighth bit.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Bitboard(pub u64);

crate::bitwise_ops!(Bitboard);
crate::shift_ops!(Bitboard, u8);

/******************************************\
|==========================================|
|           Bitboard Constants             |
|==========================================|
\******************************************/

/// Replicates a one-file byte pattern across all eight files
const fn every_file(byte: u8) -> u64 {
    0x0101010101010101u64 * byte as u64
}

/// Squares whose file and rank sum is even, starting with a1
const fn dark_squares() -> u64 {
    let mut bb = 0u64;
    let mut sq = 0u8;
    while sq < 64 {
        if ((sq >> 3) + (sq & 7)) % 2 == 0 {
            bb |= 1u64 << sq;
        }
        sq += 1;
    }
    bb
}

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);

    pub const FULL: Bitboard = Bitboard(!Self::EMPTY.0);

    pub const A1: Bitboard = Bitboard(1);

    pub const RANK_1: Bitboard = Bitboard(every_file(0b0000_0001));

    pub const RANK_8: Bitboard = Bitboard(every_file(0b1000_0000));

    pub const RANK_12: Bitboard = Bitboard(every_file(0b0000_0011));

    pub const RANK_78: Bitboard = Bitboard(every_file(0b1100_0000));

    pub const FILE_A: Bitboard = Bitboard(0xff);

    pub const FILE_H: Bitboard = Bitboard(0xff << 56);

    const FILE_AB: Bitboard = Bitboard(0xffff);

    const FILE_GH: Bitboard = Bitboard(0xffff << 48);

    /// Ranks 2 to 7.
    pub const INNER_RANKS: Bitboard = Bitboard(every_file(0b0111_1110));

    /// Files b to g.
    pub const INNER_FILES: Bitboard = Bitboard(!(Self::FILE_A.0 | Self::FILE_H.0));

    /// The 6x6 block that excludes every edge square.
    pub const INNER_36: Bitboard = Bitboard(Self::INNER_RANKS.0 & Self::INNER_FILES.0);

    /// Dark squares (a1, c1, b2, ...).
    pub const DARK_SQUARES: Bitboard = Bitboard(dark_squares());

    /// Light squares (b1, a2, ...).
    pub const LIGHT_SQUARES: Bitboard = Bitboard(!dark_squares());
}

// Castling geometry: the squares the king passes through, and the squares
// between king and rook including both.
impl Bitboard {
    pub const E1_F1_G1: Bitboard = Bitboard::from_squares(&[Square::E1, Square::F1, Square::G1]);
    pub const E1_D1_C1: Bitboard = Bitboard::from_squares(&[Square::E1, Square::D1, Square::C1]);
    pub const E8_F8_G8: Bitboard = Bitboard::from_squares(&[Square::E8, Square::F8, Square::G8]);
    pub const E8_D8_C8: Bitboard = Bitboard::from_squares(&[Square::E8, Square::D8, Square::C8]);

    pub const E1_H1: Bitboard = Bitboard::from_squares(&[Square::E1, Square::H1]);
    pub const E1_A1: Bitboard = Bitboard::from_squares(&[Square::E1, Square::A1]);
    pub const E8_H8: Bitboard = Bitboard::from_squares(&[Square::E8, Square::H8]);
    pub const E8_A8: Bitboard = Bitboard::from_squares(&[Square::E8, Square::A8]);

    pub const E1_THROUGH_H1: Bitboard = Bitboard(Self::E1_F1_G1.0 | Square::H1.bb().0);
    pub const E1_THROUGH_A1: Bitboard =
        Bitboard(Self::E1_D1_C1.0 | Square::B1.bb().0 | Square::A1.bb().0);
    pub const E8_THROUGH_H8: Bitboard = Bitboard(Self::E8_F8_G8.0 | Square::H8.bb().0);
    pub const E8_THROUGH_A8: Bitboard =
        Bitboard(Self::E8_D8_C8.0 | Square::B8.bb().0 | Square::A8.bb().0);
}

/******************************************\
|==========================================|
|                Conversions               |
|==========================================|
\******************************************/

impl Square {
    pub const fn bb(&self) -> Bitboard {
        Bitboard(Bitboard::A1.0 << *self as u8)
    }
}

impl Rank {
    pub const fn bb(&self) -> Bitboard {
        Bitboard(Bitboard::RANK_1.0 << *self as u8)
    }
}

impl File {
    pub const fn bb(&self) -> Bitboard {
        Bitboard(Bitboard::FILE_A.0 << (8 * *self as u8))
    }
}

impl Bitboard {
    /// Builds a bitboard from a list of squares in const context
    pub const fn from_squares(squares: &[Square]) -> Bitboard {
        let mut bb = 0u64;
        let mut i = 0;
        while i < squares.len() {
            bb |= 1u64 << squares[i] as u8;
            i += 1;
        }
        Bitboard(bb)
    }
}

impl<const N: usize> From<[Square; N]> for Bitboard {
    fn from(squares: [Square; N]) -> Bitboard {
        let mut bb = Bitboard::EMPTY;
        for square in squares {
            bb.set(square);
        }
        bb
    }
}

/******************************************\
|==========================================|
|        Bitboard Implementation         |
|==========================================|
\******************************************/

impl Bitboard {
    /// Lowest square in the set
    #[inline]
    pub const fn lsb(&self) -> Option<Square> {
        match self.0 {
            0 => None,
            bits => unsafe { Some(Square::from_unchecked(bits.trailing_zeros() as u8)) },
        }
    }

    /// Lowest square of a non-empty set
    const fn lsb_unchecked(&self) -> Square {
        debug_assert!(self.0 != 0, "Bitboard is empty");
        unsafe { Square::from_unchecked(self.0.trailing_zeros() as u8) }
    }

    /// Removes and returns the lowest square
    #[inline]
    pub const fn pop_lsb(&mut self) -> Option<Square> {
        match self.0 {
            0 => None,
            _ => {
                let lsb_square = self.lsb_unchecked();
                self.0 &= self.0 - 1;
                Some(lsb_square)
            }
        }
    }

    #[inline]
    const fn pop_lsb_unchecked(&mut self) -> Square {
        debug_assert!(self.0 != 0, "Bitboard is empty");
        let lsb_square = self.lsb_unchecked();
        self.0 &= self.0 - 1;
        lsb_square
    }

    #[inline]
    pub const fn count_bits(&self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_occupied(&self) -> bool {
        self.0 != 0
    }

    #[inline]
    pub const fn contains(&self, square: Square) -> bool {
        (self.0 & (1u64 << (square as u8 as u64))) != 0
    }

    #[inline]
    pub const fn set(&mut self, square: Square) {
        self.0 |= 1u64 << (square as u8 as u64);
    }

    #[inline]
    pub const fn clear(&mut self, square: Square) {
        self.0 &= !(1u64 << (square as u8 as u64));
    }

    /// Calls `f` on every square in the set, lowest first
    #[inline]
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(Square),
    {
        let mut bb = *self;
        while bb.0 != 0 {
            f(bb.pop_lsb_unchecked());
        }
    }

    #[inline]
    pub const fn is_singleton(&self) -> bool {
        !self.is_empty() && !self.more_than_one()
    }

    #[inline]
    pub const fn more_than_one(&self) -> bool {
        self.0 & (self.0.wrapping_sub(1)) != 0
    }

    /// Every rank strictly ahead of `sq` for `col`
    #[inline]
    pub const fn forward_ranks(col: Colour, sq: Square) -> Bitboard {
        let rank = sq.rank() as u32;
        let byte = match col {
            Colour::White => (0xffu32 << (rank + 1)) & 0xff,
            Colour::Black => (1u32 << rank) - 1,
        };
        Bitboard(every_file(byte as u8))
    }

    /// Squares ahead of `sq` on its own file
    #[inline]
    pub const fn forward_file(col: Colour, sq: Square) -> Bitboard {
        Bitboard(Self::forward_ranks(col, sq).0 & sq.file().bb().0)
    }

    /// The files either side of `sq`, not its own
    #[inline]
    pub const fn adjacent_files(sq: Square) -> Bitboard {
        let bb = sq.file().bb();
        Bitboard(bb.shift(Direction::E).0 | bb.shift(Direction::W).0)
    }

    /// Squares a pawn on `sq` could ever attack while advancing
    #[inline]
    pub const fn pawn_attack_span(col: Colour, sq: Square) -> Bitboard {
        Bitboard(Self::forward_ranks(col, sq).0 & Self::adjacent_files(sq).0)
    }

    /// A pawn on `sq` is passed when no enemy pawn stands in this span
    #[inline]
    pub const fn passed_pawn_span(col: Colour, sq: Square) -> Bitboard {
        Bitboard(Self::forward_file(col, sq).0 | Self::pawn_attack_span(col, sq).0)
    }

    /// Union of the capture squares of every `col` pawn in `bb`
    #[inline]
    pub const fn pawn_attacks(col: Colour, bb: Bitboard) -> Bitboard {
        match col {
            Colour::White => Bitboard(bb.shift(Direction::NE).0 | bb.shift(Direction::NW).0),
            Colour::Black => Bitboard(bb.shift(Direction::SE).0 | bb.shift(Direction::SW).0),
        }
    }

    /// Rotate by a signed amount, positive towards higher squares
    #[inline]
    const fn rotate_left(&self, shift: i16) -> Bitboard {
        let bb = if shift >= 0 {
            self.0.rotate_left(shift as u32)
        } else {
            self.0.rotate_right(-shift as u32)
        };
        Bitboard(bb)
    }

    /// Every square one `dir` step on. Squares leaving the board are dropped.
    #[inline]
    pub const fn shift(&self, dir: Direction) -> Bitboard {
        let bb = *self;

        Bitboard(bb.0 & Self::avoid_wrap(dir).0).rotate_left(dir as i16)
    }

    /// Squares that can take one `dir` step without leaving the board
    const fn avoid_wrap(dir: Direction) -> Bitboard {
        use Direction::*;
        let bb = match dir {
            SSE => Self::RANK_12.0 | Self::FILE_H.0,
            SEE => Self::RANK_1.0 | Self::FILE_GH.0,
            SWW => Self::RANK_1.0 | Self::FILE_AB.0,
            SSW => Self::RANK_12.0 | Self::FILE_A.0,
            NNW => Self::RANK_78.0 | Self::FILE_A.0,
            NNE => Self::RANK_78.0 | Self::FILE_H.0,
            NWW => Self::RANK_8.0 | Self::FILE_AB.0,
            NEE => Self::RANK_8.0 | Self::FILE_GH.0,

            N => Self::RANK_8.0,
            S => Self::RANK_1.0,
            E => Self::FILE_H.0,
            W => Self::FILE_A.0,

            NE => Self::RANK_8.0 | Self::FILE_H.0,
            NW => Self::RANK_8.0 | Self::FILE_A.0,
            SE => Self::RANK_1.0 | Self::FILE_H.0,
            SW => Self::RANK_1.0 | Self::FILE_A.0,

            NN => Self::RANK_78.0,
            SS => Self::RANK_12.0,
        };
        Bitboard(!bb)
    }

    /// Kogge-Stone fill of the set along `dir` through the `empty` squares
    const fn occluded_fill(self, mut empty: Bitboard, dir: Direction) -> Bitboard {
        let shift = dir as i16;
        empty.0 &= Self::avoid_wrap(dir).0;
        let mut bb = Bitboard(self.0 & Self::avoid_wrap(dir).0);
        bb.0 |= empty.0 & bb.rotate_left(shift).0;
        empty.0 &= empty.rotate_left(shift).0;
        bb.0 |= empty.0 & bb.rotate_left(2 * shift).0;
        empty.0 &= empty.rotate_left(2 * shift).0;
        bb.0 |= empty.0 & bb.rotate_left(4 * shift).0;
        bb
    }

    const fn sliding_attack(bb: Bitboard, occ: Bitboard, dir: Direction) -> Bitboard {
        bb.occluded_fill(Bitboard(!occ.0), dir).shift(dir)
    }

    /// Slider attacks from every square in `bb`, first blocker included.
    /// Builds the magic tables, so it only has to be correct, not fast.
    pub(crate) const fn attack_on_the_fly(pt: PieceType, bb: Bitboard, occ: Bitboard) -> Bitboard {
        let bb = match pt {
            PieceType::Queen => {
                Bitboard::attack_on_the_fly(PieceType::Bishop, bb, occ).0
                    | Bitboard::attack_on_the_fly(PieceType::Rook, bb, occ).0
            }
            PieceType::Bishop => {
                Bitboard::sliding_attack(bb, occ, Direction::NE).0
                    | Bitboard::sliding_attack(bb, occ, Direction::NW).0
                    | Bitboard::sliding_attack(bb, occ, Direction::SE).0
                    | Bitboard::sliding_attack(bb, occ, Direction::SW).0
            }
            PieceType::Rook => {
                Bitboard::sliding_attack(bb, occ, Direction::N).0
                    | Bitboard::sliding_attack(bb, occ, Direction::S).0
                    | Bitboard::sliding_attack(bb, occ, Direction::E).0
                    | Bitboard::sliding_attack(bb, occ, Direction::W).0
            }
            _ => unreachable!(),
        };
        Bitboard(bb)
    }

    /// Rank the pawns of `col` start on
    #[inline]
    pub const fn push_rank(col: Colour) -> Bitboard {
        match col {
            Colour::White => Rank::Rank2.bb(),
            Colour::Black => Rank::Rank7.bb(),
        }
    }
}

/******************************************\
|==========================================|
|                 Display                  |
|==========================================|
\******************************************/

impl fmt::Display for Bitboard {
    /// Eight rows of `X` and `.`, rank 8 first
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            write!(f, "{} ", rank.to_char())?;
            for file in File::iter() {
                let cell = if self.contains(Square::from_parts(file, rank)) { 'X' } else { '.' };
                write!(f, " {cell}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
