use rand::Rng;

/// Source of uniform integer draws for offer generation.
///
/// Any `rand::Rng` works, so a seeded `StdRng` gives reproducible results.
/// Tests may also implement this directly to script every draw.
pub trait RandomSource {
    /// Uniform integer in `low..=high`.
    fn uniform(&mut self, low: u32, high: u32) -> u32;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn uniform(&mut self, low: u32, high: u32) -> u32 {
        self.gen_range(low..=high)
    }
}
