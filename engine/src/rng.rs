use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use ventura_types::{roster_total_weight, CharacterKind, BPS, ROSTER};

/// Random number generator for game decisions.
///
/// Wraps a ChaCha stream so tests can pin a seed and replay a whole
/// session; the server seeds from OS entropy.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    /// RNG seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha8Rng::from_entropy(),
        }
    }

    /// Deterministic RNG for tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Draw a character, weight-proportionally over the roster.
    pub fn draw_character(&mut self) -> CharacterKind {
        let mut roll = self.inner.gen_range(0..roster_total_weight());
        for profile in ROSTER.iter() {
            if roll < profile.weight {
                return profile.kind;
            }
            roll -= profile.weight;
        }
        // Weights are static and non-zero; the loop always returns.
        ROSTER[ROSTER.len() - 1].kind
    }

    /// Weighted coin flip: true with probability `success_bps / 10_000`.
    pub fn success(&mut self, success_bps: u32) -> bool {
        self.inner.gen_range(0..BPS as u32) < success_bps
    }

    /// Uniform return percentage in `[min, max]`.
    pub fn return_pct(&mut self, min: u32, max: u32) -> u32 {
        self.inner.gen_range(min..=max)
    }
}
