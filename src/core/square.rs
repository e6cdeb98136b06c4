use super::types::Colour;
use thiserror::Error;

/******************************************\
|==========================================|
|                 Squares                  |
|==========================================|
\******************************************/

/// # Square
///
/// Squares are numbered file-major, `index = 8 * file + rank`, so a1 is 0,
/// a8 is 7 and h8 is 63. One step north adds 1 and one step east adds 8.
#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Square {
    A1, A2, A3, A4, A5, A6, A7, A8,
    B1, B2, B3, B4, B5, B6, B7, B8,
    C1, C2, C3, C4, C5, C6, C7, C8,
    D1, D2, D3, D4, D5, D6, D7, D8,
    E1, E2, E3, E4, E5, E6, E7, E8,
    F1, F2, F3, F4, F5, F6, F7, F8,
    G1, G2, G3, G4, G5, G6, G7, G8,
    H1, H2, H3, H4, H5, H6, H7, H8,
}

impl Square {
    pub const NUM: usize = 64;
}

crate::enum_conversions!(Square);
crate::enum_iter!(Square);

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub enum Rank {
    Rank1, Rank2, Rank3, Rank4, Rank5, Rank6, Rank7, Rank8,
}

impl Rank {
    pub const NUM: usize = 8;
}

crate::enum_conversions!(Rank);
crate::enum_iter!(Rank);

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub enum File {
    FileA, FileB, FileC, FileD, FileE, FileF, FileG, FileH,
}

impl File {
    pub const NUM: usize = 8;
}

crate::enum_conversions!(File);
crate::enum_iter!(File);

/******************************************\
|==========================================|
|              Implementation              |
|==========================================|
\******************************************/

impl Square {
    #[inline]
    pub const fn rank(&self) -> Rank {
        unsafe { Rank::from_unchecked((*self as u8) & 0b111) }
    }

    #[inline]
    pub const fn file(&self) -> File {
        unsafe { File::from_unchecked((*self as u8) >> 3) }
    }

    #[inline]
    pub const fn from_parts(file: File, rank: Rank) -> Self {
        unsafe { Self::from_unchecked(((file as u8) << 3) | rank as u8) }
    }

    /// Mirror across the line between ranks 4 and 5
    #[inline]
    pub const fn flip_rank(&self) -> Self {
        unsafe { Self::from_unchecked((*self as u8) ^ 0b111) }
    }

    /// The square as seen from `col`'s side of the board: unchanged for white,
    /// rank-mirrored for black
    #[inline]
    pub const fn relative(&self, col: Colour) -> Self {
        match col {
            Colour::White => *self,
            Colour::Black => self.flip_rank(),
        }
    }
}

impl Rank {
    /// `'1'..='8'`
    pub const fn from_char(c: char) -> Option<Rank> {
        match c {
            '1'..='8' => Some(unsafe { Rank::from_unchecked(c as u8 - b'1') }),
            _ => None,
        }
    }

    #[inline]
    pub const fn relative(&self, col: Colour) -> Self {
        match col {
            Colour::White => *self,
            Colour::Black => unsafe { Self::from_unchecked(7 - *self as u8) },
        }
    }

    pub const fn to_char(&self) -> char {
        (b'1' + *self as u8) as char
    }
}

impl File {
    /// `'a'..='h'`
    pub const fn from_char(c: char) -> Option<File> {
        match c {
            'a'..='h' => Some(unsafe { File::from_unchecked(c as u8 - b'a') }),
            _ => None,
        }
    }

    pub const fn to_char(&self) -> char {
        (b'a' + *self as u8) as char
    }
}

/******************************************\
|==========================================|
|            Display and Parsing           |
|==========================================|
\******************************************/

impl std::fmt::Display for File {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl std::fmt::Display for Square {
    /// Algebraic name, `e4`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.file().to_char(), self.rank().to_char())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseSquareError {
    #[error("square '{0}' is not two characters long")]
    InvalidLength(String),
    #[error("'{0}' is not a file, expected 'a'-'h'")]
    InvalidFileChar(char),
    #[error("'{0}' is not a rank, expected '1'-'8'")]
    InvalidRankChar(char),
}

impl std::str::FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(f), Some(r), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ParseSquareError::InvalidLength(s.to_string()));
        };

        let file = File::from_char(f).ok_or(ParseSquareError::InvalidFileChar(f))?;
        let rank = Rank::from_char(r).ok_or(ParseSquareError::InvalidRankChar(r))?;

        Ok(Square::from_parts(file, rank))
    }
}
