use thiserror::Error;

use crate::core::Colour;

/******************************************\
|==========================================|
|                  Pieces                  |
|==========================================|
\******************************************/

/// # Piece
///
/// A coloured piece. The discriminant packs the colour into the low bit and the
/// piece type above it, so both halves come back out with a shift or a mask.
#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Piece {
    WhitePawn, BlackPawn, WhiteKnight, BlackKnight, WhiteBishop, BlackBishop,
    WhiteRook, BlackRook, WhiteQueen, BlackQueen, WhiteKing, BlackKing,
}

impl Piece {
    pub const NUM: usize = 12;
}

crate::enum_conversions!(Piece);
crate::enum_iter!(Piece);

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    Pawn, Knight, Bishop, Rook, Queen, King,
}

impl PieceType {
    pub const NUM: usize = 6;

    /// Types kept in per-colour bitboards. Kings are tracked by square.
    pub const NON_KING: [PieceType; 5] = [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
    ];

    /// Promotion choices in generation order
    pub const PROMOTIONS: [PieceType; 4] = [
        PieceType::Queen,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Knight,
    ];
}

crate::enum_conversions!(PieceType);
crate::enum_iter!(PieceType);

/// FEN letters indexed by `Piece` discriminant
const PIECE_CHARS: &[u8; Piece::NUM] = b"PpNnBbRrQqKk";

/******************************************\
|==========================================|
|              Implementation              |
|==========================================|
\******************************************/

impl Piece {
    #[inline]
    pub const fn pt(self) -> PieceType {
        unsafe { PieceType::from_unchecked(self as u8 >> 1) }
    }

    #[inline]
    pub const fn colour(self) -> Colour {
        unsafe { Colour::from_unchecked(self as u8 & 1) }
    }

    #[inline]
    pub const fn from_parts(col: Colour, pt: PieceType) -> Self {
        unsafe { Piece::from_unchecked(col as u8 | (pt as u8) << 1) }
    }

    /// FEN letter, upper case for white
    pub const fn to_char(self) -> char {
        PIECE_CHARS[self as usize] as char
    }

    pub fn from_char(c: char) -> Option<Piece> {
        PIECE_CHARS
            .iter()
            .position(|&b| b as char == c)
            .map(|i| unsafe { Piece::from_unchecked(i as u8) })
    }
}

impl PieceType {
    /// SAN letter. Pawns have none.
    pub const fn san_char(self) -> Option<char> {
        match self {
            PieceType::Pawn => None,
            PieceType::Knight => Some('N'),
            PieceType::Bishop => Some('B'),
            PieceType::Rook => Some('R'),
            PieceType::Queen => Some('Q'),
            PieceType::King => Some('K'),
        }
    }

    pub const fn from_san_char(c: char) -> Option<Self> {
        match c {
            'N' => Some(PieceType::Knight),
            'B' => Some(PieceType::Bishop),
            'R' => Some(PieceType::Rook),
            'Q' => Some(PieceType::Queen),
            'K' => Some(PieceType::King),
            _ => None,
        }
    }

    /// Promotion suffix in either case
    pub const fn from_promotion_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'q' => Some(PieceType::Queen),
            'r' => Some(PieceType::Rook),
            'b' => Some(PieceType::Bishop),
            'n' => Some(PieceType::Knight),
            _ => None,
        }
    }
}

/******************************************\
|==========================================|
|            Display and Parsing           |
|==========================================|
\******************************************/

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl std::fmt::Display for PieceType {
    /// Lower case letter, as in a promotion suffix
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let white = Piece::from_parts(Colour::White, *self);
        write!(f, "{}", white.to_char().to_ascii_lowercase())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsePieceError {
    #[error("'{0}' is not a piece, expected one of PNBRQK or pnbrqk")]
    InvalidPiece(String),
}

impl std::str::FromStr for Piece {
    type Err = ParsePieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Piece::from_char(c),
            _ => None,
        }
        .ok_or_else(|| ParsePieceError::InvalidPiece(s.to_string()))
    }
}
