//! # Module: `blockers`
//!
//! `[king][attacker]` tables for resolving checks and finding pins.
//!
//! An entry of `ROOK_LINES` or `BISHOP_LINES` is the set of squares from the
//! attacker (inclusive) up to the king (exclusive) when the attacker stands on
//! one of the king's lines, and `Bitboard::FULL` otherwise. `FULL` is the
//! identity for intersection, so `CHECK_RESPONSES` is simply `rook & bishop`,
//! falling back to the attacker's own square for knights, pawns and neighbours.

use std::sync::LazyLock;

use super::init::{bishop_line, init_line_table, rook_line};
use super::lookup::SquarePairTable;
use crate::core::*;

pub(super) static ROOK_LINES: LazyLock<Box<SquarePairTable>> = LazyLock::new(|| {
    log::debug!("building rook line table");
    init_line_table(rook_line)
});

pub(super) static BISHOP_LINES: LazyLock<Box<SquarePairTable>> = LazyLock::new(|| {
    log::debug!("building bishop line table");
    init_line_table(bishop_line)
});

pub(super) static CHECK_RESPONSES: LazyLock<Box<SquarePairTable>> = LazyLock::new(|| {
    log::debug!("building check response table");

    let mut table = Box::new([[Bitboard::EMPTY; Square::NUM]; Square::NUM]);

    for king in Square::iter() {
        for attacker in Square::iter() {
            let (k, a) = (king.index(), attacker.index());
            let response = ROOK_LINES[k][a] & BISHOP_LINES[k][a];

            table[k][a] = if response == Bitboard::FULL {
                attacker.bb()
            } else {
                response
            };
        }
    }

    table
});

pub(super) fn init_blocker_tables() {
    LazyLock::force(&ROOK_LINES);
    LazyLock::force(&BISHOP_LINES);
    LazyLock::force(&CHECK_RESPONSES);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Square::*;

    #[test]
    fn test_lines_are_full_when_unaligned() {
        assert_eq!(ROOK_LINES[E1.index()][F3.index()], Bitboard::FULL);
        assert_eq!(BISHOP_LINES[E1.index()][E5.index()], Bitboard::FULL);
        assert_eq!(CHECK_RESPONSES[E1.index()][F3.index()], F3.bb());
    }

    #[test]
    fn test_lines_are_symmetric_in_length() {
        for king in Square::iter() {
            for attacker in Square::iter() {
                let forward = ROOK_LINES[king.index()][attacker.index()];
                let backward = ROOK_LINES[attacker.index()][king.index()];
                assert_eq!(forward.count_bits(), backward.count_bits());

                let forward = BISHOP_LINES[king.index()][attacker.index()];
                let backward = BISHOP_LINES[attacker.index()][king.index()];
                assert_eq!(forward.count_bits(), backward.count_bits());
            }
        }
    }

    #[test]
    fn test_check_responses_never_mix_lines() {
        for king in Square::iter() {
            for attacker in Square::iter() {
                let (k, a) = (king.index(), attacker.index());
                let rook = ROOK_LINES[k][a];
                let bishop = BISHOP_LINES[k][a];
                assert!(rook == Bitboard::FULL || bishop == Bitboard::FULL);
            }
        }
    }
}
