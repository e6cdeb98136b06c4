//! # Chess Core
//!
//! Rules of standard chess on bitboards: position state, legal move
//! generation, move application with incremental Zobrist keys, FEN and
//! move notation, game termination, and evaluation features.
pub mod board;
pub mod core;
pub mod utils;

pub use crate::board::{CheckStatus, Key, MoveList, NUM_FEATURES, Position, START_FEN, init_tables};
pub use crate::core::*;
