use std::mem::MaybeUninit;
use std::ops::ControlFlow;
use std::slice;

use super::MoveSink;
use crate::core::Move;

/// Upper bound on legal moves in any reachable position
pub const MAX_MOVES: usize = 256;

/// Fixed-capacity list of moves that lives on the stack
pub struct MoveList {
    moves: [MaybeUninit<Move>; MAX_MOVES],
    num_moves: usize,
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, index: usize) -> &Self::Output {
        assert!(index < self.num_moves, "MoveList index out of bounds");

        unsafe { self.moves[index].assume_init_ref() }
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl MoveList {
    #[inline]
    pub fn new() -> MoveList {
        MoveList {
            moves: [MaybeUninit::uninit(); MAX_MOVES],
            num_moves: 0,
        }
    }

    #[inline]
    pub(crate) fn add_move(&mut self, move_: Move) {
        assert!(self.num_moves < MAX_MOVES, "MoveList overflow");

        self.moves[self.num_moves].write(move_);

        self.num_moves += 1;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.num_moves
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_moves == 0
    }

    #[inline]
    pub fn clear(&mut self) {
        self.num_moves = 0;
    }

    #[inline]
    pub fn contains(&self, move_: Move) -> bool {
        self.iter().any(|&m| m == move_)
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        unsafe {
            let ptr = self.moves.as_ptr() as *const Move;
            slice::from_raw_parts(ptr, self.num_moves)
        }
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Move> {
        self.as_slice().iter()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl MoveSink for MoveList {
    #[inline]
    fn push(&mut self, move_: Move) -> ControlFlow<()> {
        self.add_move(move_);
        ControlFlow::Continue(())
    }
}
