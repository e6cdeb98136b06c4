//! # Module: `init`
//!
//! Compile-time and one-shot builders for the tables used by move generation.
//!
//! - **Jump tables**: pawn, knight and king attacks, clipped at the board edge by
//!   the wrap masks of [`Bitboard::shift`].
//! - **Ray casting**: naive rook and bishop attacks that stop at (and include) the
//!   first blocker. These are the ground truth the magic tables are built from.
//! - **Relevant blockers**: the squares whose occupancy can change a slider's
//!   attack set, i.e. the magic masks.
//! - **Lines**: the squares from an attacker (inclusive) up to a king (exclusive),
//!   used to build the check-response tables in `blockers`.

use super::lookup::{AttackTable, SquarePairTable};
use crate::core::*;

/******************************************\
|==========================================|
|               Jump Tables                |
|==========================================|
\******************************************/

/// Initializes pseudo-attack tables for non-sliding pieces (Pawn, Knight, King).
/// "Pseudo attacks" are potential moves ignoring blockers.
pub(super) const fn init_pseudo_attacks(dirs: &[Direction]) -> AttackTable {
    let mut attacks = [Bitboard::EMPTY; Square::NUM];

    let mut i = 0;
    while i < Square::NUM {
        let sq_bb = unsafe { Square::from_unchecked(i as u8).bb() };

        let mut j = 0;
        while j < dirs.len() {
            attacks[i].0 |= sq_bb.shift(dirs[j]).0;
            j += 1;
        }

        i += 1;
    }

    attacks
}

/// Empty-board slider rays for every square
pub(super) const fn init_empty_rays(pt: PieceType) -> AttackTable {
    let mut rays = [Bitboard::EMPTY; Square::NUM];

    let mut i = 0;
    while i < Square::NUM {
        let sq = unsafe { Square::from_unchecked(i as u8) };
        rays[i] = Bitboard::attack_on_the_fly(pt, sq.bb(), Bitboard::EMPTY);
        i += 1;
    }

    rays
}

/******************************************\
|==========================================|
|               Ray Casting                |
|==========================================|
\******************************************/

/// Rook attacks from `sq`, each ray stopping at the first square in `blockers`
#[inline]
pub(crate) const fn rook_ray_attacks(sq: Square, blockers: Bitboard) -> Bitboard {
    Bitboard::attack_on_the_fly(PieceType::Rook, sq.bb(), blockers)
}

/// Bishop attacks from `sq`, each ray stopping at the first square in `blockers`
#[inline]
pub(crate) const fn bishop_ray_attacks(sq: Square, blockers: Bitboard) -> Bitboard {
    Bitboard::attack_on_the_fly(PieceType::Bishop, sq.bb(), blockers)
}

/******************************************\
|==========================================|
|            Relevant Blockers             |
|==========================================|
\******************************************/

/// The squares on the rook's file and rank that can block it.
///
/// The last square of every ray is always attacked, whatever stands there, so
/// the board edges are dropped.
pub(crate) const fn rook_relevant_blockers(sq: Square) -> Bitboard {
    let file = sq.file().bb().0 & Bitboard::INNER_RANKS.0;
    let rank = sq.rank().bb().0 & Bitboard::INNER_FILES.0;

    Bitboard((file | rank) & !sq.bb().0)
}

/// The squares on the bishop's diagonals that can block it, edges excluded
pub(crate) const fn bishop_relevant_blockers(sq: Square) -> Bitboard {
    Bitboard(bishop_ray_attacks(sq, Bitboard::EMPTY).0 & Bitboard::INNER_36.0)
}

/******************************************\
|==========================================|
|                  Lines                   |
|==========================================|
\******************************************/

/// Walks from `attacker` towards `king`, collecting every square on the way.
/// `attacker` is included, `king` is not.
fn walk_line(king: Square, attacker: Square, dir: Direction) -> Bitboard {
    let mut line = Bitboard::EMPTY;
    let mut sq = attacker;

    while sq != king {
        line.set(sq);
        match sq.step(dir) {
            Some(next) => sq = next,
            None => break,
        }
    }

    line
}

/// Squares from `attacker` to `king` along a rank or file, or `FULL` when a rook
/// on `attacker` could never reach `king`
pub(super) fn rook_line(king: Square, attacker: Square) -> Bitboard {
    if !rook_ray_attacks(attacker, Bitboard::EMPTY).contains(king) {
        return Bitboard::FULL;
    }

    let dir = if king.rank() as u8 == attacker.rank() as u8 {
        if attacker > king { Direction::W } else { Direction::E }
    } else if attacker > king {
        Direction::S
    } else {
        Direction::N
    };

    walk_line(king, attacker, dir)
}

/// Squares from `attacker` to `king` along a diagonal, or `FULL` when a bishop
/// on `attacker` could never reach `king`
pub(super) fn bishop_line(king: Square, attacker: Square) -> Bitboard {
    if !bishop_ray_attacks(attacker, Bitboard::EMPTY).contains(king) {
        return Bitboard::FULL;
    }

    let east = (attacker.file() as u8) < (king.file() as u8);
    let north = (attacker.rank() as u8) < (king.rank() as u8);

    let dir = match (east, north) {
        (true, true) => Direction::NE,
        (true, false) => Direction::SE,
        (false, true) => Direction::NW,
        (false, false) => Direction::SW,
    };

    walk_line(king, attacker, dir)
}

/// Fills a `[king][attacker]` table from a line builder
pub(super) fn init_line_table(line: fn(Square, Square) -> Bitboard) -> Box<SquarePairTable> {
    let mut table = Box::new([[Bitboard::EMPTY; Square::NUM]; Square::NUM]);

    for king in Square::iter() {
        for attacker in Square::iter() {
            table[king.index()][attacker.index()] = line(king, attacker);
        }
    }

    table
}
