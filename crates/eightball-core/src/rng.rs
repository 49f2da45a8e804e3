//! Seedable xorshift64 generator for the reward system. Deterministic,
//! so replays with the same seed hand out the same rewards.

#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// A value in `[0, upper_bound)`.
    pub fn next_int(&mut self, upper_bound: u32) -> u32 {
        (self.next_u64() % upper_bound as u64) as u32
    }

    /// A value in `[lo, hi)`.
    pub fn range(&mut self, lo: u32, hi: u32) -> u32 {
        debug_assert!(lo < hi);
        lo + self.next_int(hi - lo)
    }

    /// A value in `[-1.0, 1.0)`, used for AI aim jitter.
    pub fn signed_unit(&mut self) -> f32 {
        (self.next_int(20_000) as f32 / 10_000.0) - 1.0
    }
}
