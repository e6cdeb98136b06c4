/// Xorshift generator usable in `const` context.
///
/// Seeds the Zobrist key table at compile time and drives the randomised
/// occupancy checks in the tests.
#[derive(Debug, Clone)]
pub struct PRNG {
    s: (u64, u64, u64, u64),
}

impl PRNG {
    pub const fn new(seed: u64) -> Self {
        let s0 = seed;
        let s1 = seed.wrapping_mul(2);
        let s2 = seed.wrapping_div(5);
        let s3 = seed.wrapping_add(seed.wrapping_div(2));

        PRNG {
            s: (s0, s1, s2, s3),
        }
    }

    #[inline]
    pub const fn random_u64(&mut self) -> u64 {
        let t = self.s.1 << 17;
        self.s.2 ^= self.s.0;
        self.s.3 ^= self.s.1;
        self.s.1 ^= self.s.2;
        self.s.0 ^= self.s.3;
        self.s.2 ^= t;
        self.s.3 = self.s.3.rotate_left(45);

        self.s.0
    }

    /// Roughly eight set bits on average
    #[inline]
    pub const fn random_sparse_u64(&mut self) -> u64 {
        self.random_u64() & self.random_u64() & self.random_u64()
    }
}

impl Default for PRNG {
    fn default() -> Self {
        PRNG::new(0x6B51FF299F6A3AEE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Bitboard, Square};

    #[test]
    fn test_prng_sequence() {
        let mut prng = PRNG::new(12345);
        let first: Vec<u64> = (0..5).map(|_| prng.random_u64()).collect();

        let mut prng = PRNG::new(12345);
        let second: Vec<u64> = (0..5).map(|_| prng.random_u64()).collect();

        assert_eq!(first, second);
        assert_ne!(first[0], first[1]);
    }

    #[test]
    fn test_const_evaluation() {
        const fn first(seed: u64) -> u64 {
            let mut rng = PRNG::new(seed);
            rng.random_u64()
        }
        const FIRST: u64 = first(7);

        assert_eq!(FIRST, PRNG::new(7).random_u64());
    }

    #[test]
    fn test_sparse_distribution() {
        let mut prng = PRNG::default();

        let mut regular_bits = 0;
        let mut sparse_bits = 0;

        for _ in 0..1000 {
            regular_bits += prng.random_u64().count_ones();
            sparse_bits += prng.random_sparse_u64().count_ones();
        }

        assert!(sparse_bits < regular_bits / 2);
    }

    #[test]
    fn test_bit_distribution() {
        let mut prng = PRNG::default();
        let mut acc = [0u32; Square::NUM];

        for _ in 0..100_000 {
            let bb = Bitboard(prng.random_u64());
            for sq in Square::iter() {
                if bb.contains(sq) {
                    acc[sq.index()] += 1;
                }
            }
        }

        let max = *acc.iter().max().unwrap();
        for (i, &count) in acc.iter().enumerate() {
            assert!(count * 100 / max > 97, "square {i} is underrepresented: {count}");
        }
    }
}
