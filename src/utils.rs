//! Helpers that sit beside the position: the const PRNG and perft.

mod perft;
mod prng;

pub use perft::{BENCH_LIST, perft, perft_bench, perft_divide};
pub use prng::PRNG;
