//! Seeded random streams for resampling
//!
//! There is no shared generator. Every call resolves its [`SeedSpec`] to a
//! base seed once, then opens one [`RandomStream`] per unit of work (one per
//! bootstrap resample, one per permutation). A stream is keyed by
//! `(seed, stream_id)`, so results do not depend on execution order or on
//! how the work is split across threads.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Caller-supplied seeding choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeedSpec {
    /// Fully reproducible runs from this seed
    Fixed(u64),
    /// Draw a fresh seed from the calling thread's entropy-seeded generator
    Entropy,
}

impl SeedSpec {
    /// Resolve to a concrete base seed
    ///
    /// `Entropy` uses `rand::thread_rng`, which is thread-local, so
    /// concurrent callers never share generator state.
    pub fn resolve(self) -> u64 {
        match self {
            Self::Fixed(seed) => seed,
            Self::Entropy => rand::thread_rng().gen(),
        }
    }
}

impl From<u64> for SeedSpec {
    fn from(seed: u64) -> Self {
        Self::Fixed(seed)
    }
}

impl From<Option<u64>> for SeedSpec {
    fn from(seed: Option<u64>) -> Self {
        seed.map_or(Self::Entropy, Self::Fixed)
    }
}

/// A deterministic random stream
#[derive(Debug, Clone)]
pub struct RandomStream {
    rng: ChaCha8Rng,
}

impl RandomStream {
    /// Open stream `stream_id` of the generator keyed by `seed`
    pub fn new(seed: u64, stream_id: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(stream_id);
        Self { rng }
    }

    /// Uniform index in `[0, upper)`
    ///
    /// `upper` must be positive.
    pub fn index(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }

    /// Fill `buffer` with `n` indices drawn uniformly with replacement from `[0, n)`
    pub fn resample_indices(&mut self, n: usize, buffer: &mut Vec<usize>) {
        buffer.clear();
        buffer.extend((0..n).map(|_| self.index(n)));
    }

    /// Draw a resample of `sample` with replacement into `buffer`
    pub fn resample_into(&mut self, sample: &[f64], buffer: &mut Vec<f64>) {
        let n = sample.len();
        buffer.clear();
        buffer.extend((0..n).map(|_| sample[self.index(n)]));
    }

    /// Shuffle a slice in place (Fisher-Yates)
    pub fn shuffle<T>(&mut self, values: &mut [T]) {
        for i in (1..values.len()).rev() {
            let j = self.index(i + 1);
            values.swap(i, j);
        }
    }

    /// Uniform value in `[0, 1)`
    pub fn uniform(&mut self) -> f64 {
        self.rng.gen()
    }
}

impl RngCore for RandomStream {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}
