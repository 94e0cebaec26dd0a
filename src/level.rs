use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Draws top-layer assignments for newly inserted nodes.
///
/// The only nondeterministic element of the index; seedable so tests and
/// the scenario suite can make insertion sequences reproducible.
pub(crate) struct LevelSampler {
    rng: SmallRng,
    ml: f32,
}

impl LevelSampler {
    pub(crate) fn new(ml: f32, seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            ml,
        }
    }

    /// `floor(-ln(u) * mL)` for `u` uniform in `(0, 1]`.
    ///
    /// Higher layers are exponentially rarer as `mL` shrinks the sampled
    /// value toward zero.
    pub(crate) fn sample(&mut self) -> usize {
        // gen_range excludes the upper bound, so shift to land in (0, 1].
        let u: f32 = 1.0 - self.rng.gen_range(0.0..1.0f32);
        (-u.ln() * self.ml).floor().max(0.0) as usize
    }
}
