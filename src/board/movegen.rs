//! # Module: `movegen`
//!
//! Legal move generation and the attack tables it is built on.
//!
//! ## Overview
//!
//! - **Attack generation**: jump tables for pawns, knights and kings, magic
//!   bitboards for sliders.
//! - **Check and pin resolution**: `[king][attacker]` line tables giving the
//!   squares that block a check or hold a pinned piece.
//! - **Legal generation**: a single pass that only ever emits legal moves, so no
//!   make/unmake verification is needed.
//!
//! ## Submodules
//!
//! - `init`: compile-time jump tables, ray casting and relevant blocker masks.
//! - `magic`: magic numbers and the rook/bishop attack tables.
//! - `blockers`: rook-line, bishop-line and check-response tables.
//! - `lookup`: accessors over all of the above.
//! - `gen`: the legal move generator.
//! - `move_list`: the stack-allocated move container.
//!
//! The magic and blocker tables are built on first use. [`init_tables`] forces
//! them up front so the first generated position does not pay for it.

mod blockers;
mod r#gen;
mod init;
mod lookup;
mod magic;
mod move_list;

use std::ops::ControlFlow;

pub(crate) use r#gen::attacked_squares;
pub(crate) use init::{bishop_ray_attacks, rook_ray_attacks};
pub use lookup::{
    attacks, bishop_attacks, bishop_line, bishop_rays, check_response, king_attack, knight_attack,
    pawn_attack, queen_attacks, rook_attacks, rook_line, rook_rays,
};
pub use move_list::{MAX_MOVES, MoveList};

use super::Position;
use crate::core::Move;

/******************************************\
|==========================================|
|                Move Sinks                |
|==========================================|
\******************************************/

/// Receives moves from the generator.
///
/// Returning `ControlFlow::Break` stops generation immediately.
pub trait MoveSink {
    fn push(&mut self, move_: Move) -> ControlFlow<()>;
}

/// Sink that records whether any move exists and stops at the first one
#[derive(Debug, Default)]
pub struct AnyMove {
    found: bool,
}

impl AnyMove {
    #[inline]
    pub fn found(&self) -> bool {
        self.found
    }
}

impl MoveSink for AnyMove {
    #[inline]
    fn push(&mut self, _: Move) -> ControlFlow<()> {
        self.found = true;
        ControlFlow::Break(())
    }
}

/// Builds every lazily constructed table
pub fn init_tables() {
    magic::init_magic_tables();
    blockers::init_blocker_tables();
    log::debug!("move generation tables ready");
}

/******************************************\
|==========================================|
|           Position Entry Points          |
|==========================================|
\******************************************/

impl Position {
    /// Feeds every legal move to `sink`, in generation order
    #[inline]
    pub fn generate_moves<S: MoveSink>(&self, sink: &mut S) {
        let _ = r#gen::generate_legal(self, sink);
    }

    /// Appends every legal move to `move_list`
    #[inline]
    pub fn generate_legal(&self, move_list: &mut MoveList) {
        self.generate_moves(move_list);
    }

    /// Every legal move in the position
    #[inline]
    pub fn legal_moves(&self) -> MoveList {
        let mut move_list = MoveList::new();
        self.generate_moves(&mut move_list);
        move_list
    }

    /// True when the side to move has at least one legal move.
    ///
    /// Stops at the first move found without building a list.
    #[inline]
    pub fn has_legal_moves(&self) -> bool {
        let mut any = AnyMove::default();
        self.generate_moves(&mut any);
        any.found()
    }

    /// True when `move_` is one of the legal moves in the position
    pub fn is_legal(&self, move_: Move) -> bool {
        self.legal_moves().contains(move_)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MoveFlag, Square};

    #[test]
    fn test_any_move_stops_early() {
        let mut any = AnyMove::default();
        assert!(!any.found());
        assert!(any.push(Move::NONE).is_break());
        assert!(any.found());
    }

    #[test]
    fn test_start_position_moves() {
        let pos = Position::start();
        let moves = pos.legal_moves();

        assert_eq!(moves.len(), 20);
        assert!(pos.has_legal_moves());
        assert!(pos.is_legal(Move::new(Square::E2, Square::E4, MoveFlag::DoublePush)));
        assert!(pos.is_legal(Move::new(Square::G1, Square::F3, MoveFlag::Normal)));
        // Right squares, wrong flag
        assert!(!pos.is_legal(Move::new(Square::E2, Square::E4, MoveFlag::Normal)));
        assert!(!pos.is_legal(Move::new(Square::E2, Square::E5, MoveFlag::Normal)));
    }

    #[test]
    fn test_init_tables_is_idempotent() {
        init_tables();
        init_tables();
        assert_eq!(rook_attacks(Square::A1, crate::core::Bitboard::EMPTY).count_bits(), 14);
    }
}
