//! Linear evaluation features of a position.
//!
//! Each entry is white's count minus black's count, except the side to move
//! entry. Black's ranks and squares are mirrored so both sides share one table.

use super::Position;
use super::movegen::{attacks, king_attack, pawn_attack};
use crate::core::*;

pub const NUM_FEATURES: usize = 416;

const BISHOP_PAIR: usize = 0;
const PASSED_ON_RANK: usize = 1;
const PASSED_ON_FILE: usize = 9;
const PROTECTED_PASSED: usize = 17;
const WHITE_TO_MOVE: usize = 18;
const DOUBLED: usize = 19;
const ISOLATED: usize = 20;
const KING_SHIELD: usize = 21;
const KING_ZONE_ATTACKS: usize = 22;
const MOBILITY: usize = 27;
const KING_SQUARE: usize = 32;
const PIECE_SQUARE: usize = 96;

/// Piece order of the per-type feature groups
const FEATURE_PIECES: [PieceType; 5] = [
    PieceType::Queen,
    PieceType::Rook,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Pawn,
];

impl Position {
    pub fn features(&self) -> [i16; NUM_FEATURES] {
        let mut f = [0i16; NUM_FEATURES];

        self.add_side_features(&mut f, Colour::White, 1);
        self.add_side_features(&mut f, Colour::Black, -1);

        f[WHITE_TO_MOVE] = (self.stm == Colour::White) as i16;

        f
    }

    fn add_side_features(&self, f: &mut [i16; NUM_FEATURES], us: Colour, sign: i16) {
        let them = !us;
        let own = self.occupied_bb(us);
        let occ = self.all_occupied_bb();
        let pawns = self.piece_bb(us, PieceType::Pawn);
        let enemy_pawns = self.piece_bb(them, PieceType::Pawn);

        if self.piece_bb(us, PieceType::Bishop).more_than_one() {
            f[BISHOP_PAIR] += sign;
        }

        pawns.for_each(|sq| {
            let passed = (Bitboard::passed_pawn_span(us, sq) & enemy_pawns).is_empty();
            if passed {
                f[PASSED_ON_RANK + sq.relative(us).rank().index()] += sign;
                f[PASSED_ON_FILE + sq.file().index()] += sign;

                if (pawn_attack(them, sq) & pawns).is_occupied() {
                    f[PROTECTED_PASSED] += sign;
                }
            }

            if (sq.file().bb() & pawns).more_than_one() {
                f[DOUBLED] += sign;
            }
            if (Bitboard::adjacent_files(sq) & pawns).is_empty() {
                f[ISOLATED] += sign;
            }
        });

        let king = self.king_sq(us);
        f[KING_SHIELD] += sign * (shield_zone(us, king) & own).count_bits() as i16;

        let enemy_king = self.king_sq(them);
        let king_zone = king_attack(enemy_king) | enemy_king.bb();

        for (i, pt) in FEATURE_PIECES.into_iter().enumerate() {
            let mut zone_hits = 0;
            let mut mobility = 0;

            self.piece_bb(us, pt).for_each(|sq| {
                let attacked = attacks(us, pt, sq, occ);
                zone_hits += (attacked & king_zone).count_bits();
                mobility += (attacked & !own).count_bits();

                f[PIECE_SQUARE + 64 * i + sq.relative(us).index()] += sign;
            });

            f[KING_ZONE_ATTACKS + i] += sign * zone_hits as i16;
            f[MOBILITY + i] += sign * mobility as i16;
        }

        f[KING_SQUARE + king.relative(us).index()] += sign;
    }
}

/// The two ranks of three files directly in front of a king
fn shield_zone(col: Colour, king: Square) -> Bitboard {
    let near = king_attack(king) & Bitboard::forward_ranks(col, king);
    near | near.shift(col.forward())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Square::*;

    fn features(fen: &str) -> [i16; NUM_FEATURES] {
        Position::from_fen(fen).unwrap().features()
    }

    #[test]
    fn test_start_position_is_balanced() {
        let f = Position::start().features();

        for (i, &value) in f.iter().enumerate() {
            if i == WHITE_TO_MOVE {
                assert_eq!(value, 1);
            } else {
                assert_eq!(value, 0, "feature {i} is not symmetric");
            }
        }
    }

    #[test]
    fn test_side_to_move_feature() {
        let f = features("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1");
        assert_eq!(f[WHITE_TO_MOVE], 0);
    }

    #[test]
    fn test_passed_pawns() {
        // White pawn on d5 is passed, so are black's g6 and h6
        let f = features("4k3/8/6pp/3P4/8/8/8/4K3 w - - 0 1");

        assert_eq!(f[PASSED_ON_RANK + 4], 1);
        assert_eq!(f[PASSED_ON_FILE + File::FileD.index()], 1);
        // Rank 6 mirrors to relative rank index 2
        assert_eq!(f[PASSED_ON_RANK + 2], -2);
        assert_eq!(f[PASSED_ON_FILE + File::FileG.index()], -1);
        assert_eq!(f[PASSED_ON_FILE + File::FileH.index()], -1);
        assert_eq!(f[PROTECTED_PASSED], 0);

        let f = features("4k3/8/8/8/8/6P1/7P/4K3 w - - 0 1");
        assert_eq!(f[PROTECTED_PASSED], 1);
    }

    #[test]
    fn test_pawn_structure() {
        // Doubled and isolated a pawns against one healthy pair
        let f = features("4k3/5pp1/8/8/P7/P7/8/4K3 w - - 0 1");
        assert_eq!(f[DOUBLED], 2);
        assert_eq!(f[ISOLATED], 2);
    }

    #[test]
    fn test_bishop_pair_and_squares() {
        let f = features("4k3/8/8/8/8/8/8/2B1KB2 w - - 0 1");
        assert_eq!(f[BISHOP_PAIR], 1);
        // Both kings sit on e1 once black is mirrored
        assert_eq!(f[KING_SQUARE + E1.index()], 0);
        assert_eq!(f[PIECE_SQUARE + 64 * 2 + C1.index()], 1);
        assert_eq!(f[PIECE_SQUARE + 64 * 2 + F1.index()], 1);
    }

    #[test]
    fn test_mirrored_king_square() {
        let f = features("6k1/8/8/8/8/8/8/K7 w - - 0 1");
        assert_eq!(f[KING_SQUARE + A1.index()], 1);
        // g8 mirrors to g1
        assert_eq!(f[KING_SQUARE + G1.index()], -1);
    }

    #[test]
    fn test_king_shield_and_zone() {
        let f = features("4k3/8/8/8/8/8/5PPP/6K1 w - - 0 1");
        assert_eq!(f[KING_SHIELD], 3);

        let f = features("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
        let rook = KING_ZONE_ATTACKS + 1;
        assert_eq!(f[rook], 0);
        // Rook on e1 reaches e7 and e8 inside the zone
        let f = features("4k3/8/8/8/8/8/8/K3R3 w - - 0 1");
        assert_eq!(f[rook], 2);
        assert_eq!(f[MOBILITY + 1], 13);
    }
}
