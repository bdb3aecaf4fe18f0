// Randomness Port

use rand::RngCore;

/// Seeded randomness capability
pub trait RandomSource: Send {
    /// Next pseudo-random 64-bit value
    fn next_i64(&mut self) -> i64;
}

impl<R: RngCore + Send> RandomSource for R {
    fn next_i64(&mut self) -> i64 {
        self.next_u64() as i64
    }
}
