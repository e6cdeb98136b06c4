use super::{File, PieceType, Square};

/******************************************\
|==========================================|
|                Move Flags                |
|==========================================|
\******************************************/

/// # Move flag
///
/// The low four bits of a packed move. Captures name the captured piece type,
/// promotions name the promoted piece type.
#[repr(u16)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MoveFlag {
    Normal = 0,

    PromoteQueen = 1,
    PromoteRook = 2,
    PromoteBishop = 3,
    PromoteKnight = 4,

    EnPassant = 5,

    DoublePush = 6,

    CaptureQueen = 7,
    CaptureRook = 8,
    CaptureBishop = 9,
    CaptureKnight = 10,
    CapturePawn = 11,
}

impl MoveFlag {
    /// Number of valid flag values
    pub const NUM: usize = 12;
}

crate::enum_conversions!(MoveFlag, u16);

impl MoveFlag {
    #[inline(always)]
    pub const fn is_promotion(self) -> bool {
        matches!(
            self,
            MoveFlag::PromoteQueen
                | MoveFlag::PromoteRook
                | MoveFlag::PromoteBishop
                | MoveFlag::PromoteKnight
        )
    }

    /// True for the five flags that name a captured piece
    #[inline(always)]
    pub const fn is_capture_flag(self) -> bool {
        self as u16 >= MoveFlag::CaptureQueen as u16
    }

    /// The piece a pawn promotes to, if this is a promotion flag
    #[inline(always)]
    pub const fn promotion_piece_type(self) -> Option<PieceType> {
        match self {
            MoveFlag::PromoteQueen => Some(PieceType::Queen),
            MoveFlag::PromoteRook => Some(PieceType::Rook),
            MoveFlag::PromoteBishop => Some(PieceType::Bishop),
            MoveFlag::PromoteKnight => Some(PieceType::Knight),
            _ => None,
        }
    }

    /// The piece removed by a capture flag
    #[inline(always)]
    pub const fn captured_piece_type(self) -> Option<PieceType> {
        match self {
            MoveFlag::CaptureQueen => Some(PieceType::Queen),
            MoveFlag::CaptureRook => Some(PieceType::Rook),
            MoveFlag::CaptureBishop => Some(PieceType::Bishop),
            MoveFlag::CaptureKnight => Some(PieceType::Knight),
            MoveFlag::CapturePawn => Some(PieceType::Pawn),
            _ => None,
        }
    }

    pub const fn promotion_flag(piece_type: PieceType) -> MoveFlag {
        match piece_type {
            PieceType::Queen => MoveFlag::PromoteQueen,
            PieceType::Rook => MoveFlag::PromoteRook,
            PieceType::Bishop => MoveFlag::PromoteBishop,
            PieceType::Knight => MoveFlag::PromoteKnight,
            _ => panic!("Invalid promotion piece type!"),
        }
    }

    /// Flag for a move landing on `victim`, `Normal` when the square is empty
    pub const fn capture_flag(victim: Option<PieceType>) -> MoveFlag {
        match victim {
            None => MoveFlag::Normal,
            Some(PieceType::Queen) => MoveFlag::CaptureQueen,
            Some(PieceType::Rook) => MoveFlag::CaptureRook,
            Some(PieceType::Bishop) => MoveFlag::CaptureBishop,
            Some(PieceType::Knight) => MoveFlag::CaptureKnight,
            Some(PieceType::Pawn) => MoveFlag::CapturePawn,
            Some(PieceType::King) => panic!("Kings cannot be captured!"),
        }
    }
}

/******************************************\
|==========================================|
|                   Move                   |
|==========================================|
\******************************************/

/// # Move representation
///
/// Packed into 16 bits: `start << 10 | end << 4 | flag`.
///
/// Castling is encoded as one of four sentinels whose start and end are both
/// the king's destination square, which no ordinary move can produce.
#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash)]
pub struct Move {
    data: u16,
}

impl Default for Move {
    fn default() -> Self {
        Self::NONE
    }
}

impl Move {
    const FROM_SHIFT: u16 = 10;

    const TO_SHIFT: u16 = 4;

    const SQUARE_MASK: u16 = 0x3F;

    const FLAG_MASK: u16 = 0xF;

    pub const NONE: Self = Self::new(Square::A1, Square::A1, MoveFlag::Normal);

    pub const WHITE_SHORT_CASTLE: Self = Self::new(Square::G1, Square::G1, MoveFlag::Normal);
    pub const WHITE_LONG_CASTLE: Self = Self::new(Square::C1, Square::C1, MoveFlag::Normal);
    pub const BLACK_SHORT_CASTLE: Self = Self::new(Square::G8, Square::G8, MoveFlag::Normal);
    pub const BLACK_LONG_CASTLE: Self = Self::new(Square::C8, Square::C8, MoveFlag::Normal);

    /// Builds a move from its raw encoding
    ///
    /// ## Safety
    /// - The low four bits must hold a valid `MoveFlag` discriminant
    #[inline]
    pub const unsafe fn new_raw(data: u16) -> Self {
        Self { data }
    }

    #[inline(always)]
    pub const fn new(from: Square, to: Square, flag: MoveFlag) -> Self {
        let data = ((from as u16) << Self::FROM_SHIFT)
            | ((to as u16) << Self::TO_SHIFT)
            | flag as u16;

        Self { data }
    }

    #[inline(always)]
    pub const fn new_promotion(from: Square, to: Square, piece_type: PieceType) -> Self {
        Self::new(from, to, MoveFlag::promotion_flag(piece_type))
    }

    #[inline(always)]
    pub const fn from(&self) -> Square {
        unsafe { Square::from_unchecked(((self.data >> Self::FROM_SHIFT) & Self::SQUARE_MASK) as u8) }
    }

    #[inline(always)]
    pub const fn to(&self) -> Square {
        unsafe { Square::from_unchecked(((self.data >> Self::TO_SHIFT) & Self::SQUARE_MASK) as u8) }
    }

    #[inline(always)]
    pub const fn flag(&self) -> MoveFlag {
        MoveFlag::from_unchecked(self.data & Self::FLAG_MASK)
    }

    #[inline(always)]
    pub const fn is_castle(&self) -> bool {
        self.data == Self::WHITE_SHORT_CASTLE.data
            || self.data == Self::WHITE_LONG_CASTLE.data
            || self.data == Self::BLACK_SHORT_CASTLE.data
            || self.data == Self::BLACK_LONG_CASTLE.data
    }

    #[inline(always)]
    pub const fn is_promotion(&self) -> bool {
        self.flag().is_promotion()
    }

    #[inline(always)]
    pub const fn promotion_pt(&self) -> Option<PieceType> {
        self.flag().promotion_piece_type()
    }

    /// The piece type named by a capture flag. Captures made by promotions and
    /// en passant are not covered.
    #[inline(always)]
    pub const fn captured_pt(&self) -> Option<PieceType> {
        self.flag().captured_piece_type()
    }

    #[inline(always)]
    pub const fn is_en_passant(&self) -> bool {
        self.flag() as u16 == MoveFlag::EnPassant as u16
    }

    #[inline(always)]
    pub const fn is_double_push(&self) -> bool {
        self.flag() as u16 == MoveFlag::DoublePush as u16
    }

    /// A promoting pawn only changes file when it captures
    #[inline(always)]
    pub const fn is_promotion_capture(&self) -> bool {
        self.is_promotion() && self.from().file() as u8 != self.to().file() as u8
    }

    #[inline(always)]
    pub const fn is_capture(&self) -> bool {
        self.flag().is_capture_flag() || self.is_en_passant() || self.is_promotion_capture()
    }

    #[inline(always)]
    pub const fn is_none(&self) -> bool {
        self.data == Self::NONE.data
    }

    #[inline(always)]
    pub const fn raw(&self) -> u16 {
        self.data
    }

    /// The king's start square of a castling sentinel, the real start otherwise
    #[inline]
    pub const fn king_origin(&self) -> Square {
        if self.is_castle() {
            Square::from_parts(File::FileE, self.to().rank())
        } else {
            self.from()
        }
    }
}

/******************************************\
|==========================================|
|                 Display                  |
|==========================================|
\******************************************/

impl std::fmt::Display for Move {
    /// Pure algebraic coordinates, castling written as the king's two-square step
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.king_origin(), self.to())?;
        if let Some(pt) = self.promotion_pt() {
            write!(f, "{}", pt)?;
        }
        Ok(())
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::square::Square::*;

    #[test]
    fn test_bit_layout() {
        let m = Move::new(E2, E4, MoveFlag::DoublePush);
        assert_eq!(m.raw(), (33 << 10) | (35 << 4) | 6);
        assert_eq!(Move::WHITE_SHORT_CASTLE.raw(), (48 << 10) | (48 << 4));
        assert_eq!(Move::WHITE_LONG_CASTLE.raw(), (16 << 10) | (16 << 4));
        assert_eq!(Move::BLACK_SHORT_CASTLE.raw(), (55 << 10) | (55 << 4));
        assert_eq!(Move::BLACK_LONG_CASTLE.raw(), (23 << 10) | (23 << 4));
    }

    #[test]
    fn test_encoding_decoding_basic() {
        let m = Move::new(G1, F3, MoveFlag::Normal);
        assert_eq!(m.from(), G1);
        assert_eq!(m.to(), F3);
        assert_eq!(m.flag(), MoveFlag::Normal);
        assert!(!m.is_capture());
        assert!(!m.is_promotion());
        assert!(!m.is_castle());
    }

    #[test]
    fn test_capture_flags() {
        let m = Move::new(D4, C5, MoveFlag::CaptureKnight);
        assert!(m.is_capture());
        assert_eq!(m.captured_pt(), Some(PieceType::Knight));
        assert!(!m.is_en_passant());

        let ep = Move::new(E5, D6, MoveFlag::EnPassant);
        assert!(ep.is_capture());
        assert!(ep.is_en_passant());
        assert_eq!(ep.captured_pt(), None);
    }

    #[test]
    fn test_promotion_capture_by_file_change() {
        let push = Move::new_promotion(B7, B8, PieceType::Queen);
        assert!(push.is_promotion());
        assert!(!push.is_capture());
        assert_eq!(push.promotion_pt(), Some(PieceType::Queen));

        let take = Move::new_promotion(B7, A8, PieceType::Knight);
        assert!(take.is_promotion_capture());
        assert!(take.is_capture());
        assert_eq!(take.promotion_pt(), Some(PieceType::Knight));
    }

    #[test]
    fn test_castle_sentinels() {
        for m in [
            Move::WHITE_SHORT_CASTLE,
            Move::WHITE_LONG_CASTLE,
            Move::BLACK_SHORT_CASTLE,
            Move::BLACK_LONG_CASTLE,
        ] {
            assert!(m.is_castle());
            assert_eq!(m.from(), m.to());
            assert!(!m.is_capture());
        }
        assert!(!Move::NONE.is_castle());
        assert!(!Move::new(E1, G1, MoveFlag::Normal).is_castle());
    }

    #[test]
    #[should_panic]
    fn test_invalid_promotion_panic_king() {
        let _ = Move::new_promotion(E7, E8, PieceType::King);
    }

    #[test]
    fn test_display() {
        assert_eq!(Move::new(E2, E4, MoveFlag::DoublePush).to_string(), "e2e4");
        assert_eq!(Move::new_promotion(A7, B8, PieceType::Rook).to_string(), "a7b8r");
        assert_eq!(Move::WHITE_SHORT_CASTLE.to_string(), "e1g1");
        assert_eq!(Move::BLACK_LONG_CASTLE.to_string(), "e8c8");
    }

    #[test]
    fn test_default_move() {
        assert!(Move::default().is_none());
    }
}
