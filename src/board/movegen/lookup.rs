//! # Module: `lookup`
//!
//! Accessors over the precomputed attack and blocker tables.
//!
//! - **Jump tables** (`PAWN_ATTACKS`, `KNIGHT_ATTACKS`, `KING_ATTACKS`) and the
//!   empty-board slider rays are `const` items built at compile time.
//! - **Slider attacks** go through the magic tables in `magic`.
//! - **Lines** (`rook_line`, `bishop_line`, `check_response`) go through the
//!   `[king][attacker]` tables in `blockers`.

use super::blockers::{BISHOP_LINES, CHECK_RESPONSES, ROOK_LINES};
use super::init::*;
use super::magic::{BISHOP_MAGICS, BISHOP_TABLE, ROOK_MAGICS, ROOK_TABLE};
use crate::core::{Bitboard, Colour, Direction, PieceType, Square};

/******************************************\
|==========================================|
|             Const Jump Tables            |
|==========================================|
\******************************************/

/// One bitboard per square
pub(super) type AttackTable = [Bitboard; Square::NUM];

/// `[king][attacker]` pairs
pub(super) type SquarePairTable = [[Bitboard; Square::NUM]; Square::NUM];

use Direction::*;

/// `[colour][square]`, white captures north
const PAWN_ATTACKS: [AttackTable; Colour::NUM] =
    [init_pseudo_attacks(&[NE, NW]), init_pseudo_attacks(&[SE, SW])];

const KNIGHT_ATTACKS: AttackTable = init_pseudo_attacks(&[NNE, NNW, NEE, NWW, SEE, SWW, SSE, SSW]);

const KING_ATTACKS: AttackTable = init_pseudo_attacks(&[N, NE, NW, E, W, SE, SW, S]);

#[allow(long_running_const_eval)]
const BISHOP_RAYS: AttackTable = init_empty_rays(PieceType::Bishop);

#[allow(long_running_const_eval)]
const ROOK_RAYS: AttackTable = init_empty_rays(PieceType::Rook);

/******************************************\
|==========================================|
|                 Attacks                  |
|==========================================|
\******************************************/

#[inline]
pub fn pawn_attack(col: Colour, sq: Square) -> Bitboard {
    unsafe {
        *PAWN_ATTACKS
            .get_unchecked(col.index())
            .get_unchecked(sq.index())
    }
}

#[inline]
pub fn knight_attack(sq: Square) -> Bitboard {
    unsafe { *KNIGHT_ATTACKS.get_unchecked(sq.index()) }
}

#[inline]
pub fn king_attack(sq: Square) -> Bitboard {
    unsafe { *KING_ATTACKS.get_unchecked(sq.index()) }
}

#[inline]
pub fn bishop_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    unsafe { *BISHOP_TABLE.get_unchecked(BISHOP_MAGICS[sq.index()].index(occ)) }
}

#[inline]
pub fn rook_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    unsafe { *ROOK_TABLE.get_unchecked(ROOK_MAGICS[sq.index()].index(occ)) }
}

#[inline]
pub fn queen_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    bishop_attacks(sq, occ) | rook_attacks(sq, occ)
}

/// Diagonal squares reachable from `sq` with nothing in the way
#[inline]
pub fn bishop_rays(sq: Square) -> Bitboard {
    unsafe { *BISHOP_RAYS.get_unchecked(sq.index()) }
}

/// Orthogonal squares reachable from `sq` with nothing in the way
#[inline]
pub fn rook_rays(sq: Square) -> Bitboard {
    unsafe { *ROOK_RAYS.get_unchecked(sq.index()) }
}

/// Squares a `pt` of colour `col` on `sq` attacks with `occ` as the blockers.
/// Pawns give their capture squares and are the only type that reads `col`.
/// Slider rays stop on, and include, the first blocker.
#[inline]
pub fn attacks(col: Colour, pt: PieceType, sq: Square, occ: Bitboard) -> Bitboard {
    match pt {
        PieceType::Pawn => pawn_attack(col, sq),
        PieceType::Knight => knight_attack(sq),
        PieceType::King => king_attack(sq),
        PieceType::Bishop => bishop_attacks(sq, occ),
        PieceType::Rook => rook_attacks(sq, occ),
        PieceType::Queen => queen_attacks(sq, occ),
    }
}

/******************************************\
|==========================================|
|              Line Lookups                |
|==========================================|
\******************************************/

/// Squares from `attacker` (inclusive) to `king` (exclusive) along a rank or
/// file. `Bitboard::FULL` when the two squares share neither.
#[inline]
pub fn rook_line(king: Square, attacker: Square) -> Bitboard {
    ROOK_LINES[king.index()][attacker.index()]
}

/// Squares from `attacker` (inclusive) to `king` (exclusive) along a diagonal.
/// `Bitboard::FULL` when the two squares share no diagonal.
#[inline]
pub fn bishop_line(king: Square, attacker: Square) -> Bitboard {
    BISHOP_LINES[king.index()][attacker.index()]
}

/// Destinations that resolve a single check on `king` given by `checker`:
/// capturing the checker, or interposing when it is a slider.
///
/// # Example
/// ```rust
/// use chess_core::core::{Bitboard, Square};
/// use chess_core::board::check_response;
///
/// assert_eq!(
///     check_response(Square::E1, Square::E4),
///     Bitboard::from([Square::E4, Square::E3, Square::E2])
/// );
/// assert_eq!(check_response(Square::E1, Square::F3), Square::F3.bb());
/// ```
#[inline]
pub fn check_response(king: Square, checker: Square) -> Bitboard {
    CHECK_RESPONSES[king.index()][checker.index()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::PRNG;

    #[test]
    fn test_pawn_attacks() {
        for sq in Square::iter() {
            let attack = pawn_attack(Colour::White, sq);
            let sq_bb = sq.bb();
            let naive_attack =
                Bitboard::shift(&sq_bb, Direction::NE) | Bitboard::shift(&sq_bb, Direction::NW);
            assert_eq!(
                attack, naive_attack,
                "White pawn attack mismatch for {:?}",
                sq
            );

            let attack = pawn_attack(Colour::Black, sq);
            let naive_attack =
                Bitboard::shift(&sq_bb, Direction::SE) | Bitboard::shift(&sq_bb, Direction::SW);
            assert_eq!(
                attack, naive_attack,
                "Black pawn attack mismatch for {:?}",
                sq
            );
        }

        assert_eq!(
            pawn_attack(Colour::White, Square::A2),
            Square::B3.bb()
        );
        assert_eq!(
            pawn_attack(Colour::Black, Square::H7),
            Square::G6.bb()
        );
    }

    #[test]
    fn test_knight_attacks() {
        assert_eq!(
            knight_attack(Square::A1),
            Bitboard::from([Square::B3, Square::C2])
        );
        assert_eq!(knight_attack(Square::E4).count_bits(), 8);
        assert_eq!(knight_attack(Square::H8).count_bits(), 2);
        assert_eq!(knight_attack(Square::G2).count_bits(), 4);
    }

    #[test]
    fn test_king_attacks() {
        assert_eq!(
            king_attack(Square::A1),
            Bitboard::from([Square::A2, Square::B1, Square::B2])
        );
        assert_eq!(king_attack(Square::E4).count_bits(), 8);
        assert_eq!(king_attack(Square::H5).count_bits(), 5);
        assert!(!king_attack(Square::H5).contains(Square::A6));
    }

    #[test]
    fn test_magic_lookups_match_ray_casting() {
        let mut rng = PRNG::default();

        for _ in 0..1000 {
            let occ = Bitboard(rng.random_u64());

            for sq in Square::iter() {
                let occ = occ & !sq.bb();
                assert_eq!(bishop_attacks(sq, occ), bishop_ray_attacks(sq, occ), "bishop on {sq}");
                assert_eq!(rook_attacks(sq, occ), rook_ray_attacks(sq, occ), "rook on {sq}");
            }
        }
    }

    #[test]
    fn test_queen_attacks() {
        let mut rng = PRNG::default();

        for _ in 0..200 {
            let occ = Bitboard(rng.random_sparse_u64());

            for sq in Square::iter() {
                assert_eq!(
                    queen_attacks(sq, occ),
                    Bitboard::attack_on_the_fly(PieceType::Queen, sq.bb(), occ)
                );
            }
        }
    }

    #[test]
    fn test_empty_rays() {
        for sq in Square::iter() {
            assert_eq!(rook_rays(sq), rook_attacks(sq, Bitboard::EMPTY));
            assert_eq!(bishop_rays(sq), bishop_attacks(sq, Bitboard::EMPTY));
            assert_eq!(rook_rays(sq).count_bits(), 14);
        }
    }

    #[test]
    fn test_check_response() {
        use Square::*;
        // Slider checks can be captured or blocked
        assert_eq!(check_response(A1, A8), Bitboard::from([A8, A7, A6, A5, A4, A3, A2]));
        assert_eq!(check_response(A1, H8), Bitboard::from([H8, G7, F6, E5, D4, C3, B2]));
        // Knights and adjacent pieces can only be captured
        assert_eq!(check_response(E4, F6), F6.bb());
        assert_eq!(check_response(E4, E5), E5.bb());

        for king in Square::iter() {
            for checker in Square::iter() {
                if king == checker {
                    continue;
                }
                let response = check_response(king, checker);
                assert!(response.contains(checker));
                assert!(!response.contains(king));
            }
        }
    }
}
