//! Random sources feeding the generator.
//!
//! The engine only needs a stream of uniform draws in `[0, 1)`. Any `FnMut() -> f64`
//! closure qualifies, so tests and callers can inject their own sequence.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};

/// A source of uniform values in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl<F> RandomSource for F
where
    F: FnMut() -> f64,
{
    fn next_unit(&mut self) -> f64 {
        self()
    }
}

/// Adapter exposing any `rand::Rng` as a [`RandomSource`].
#[derive(Debug)]
pub struct ThreadSource<R>(R);

impl<R: Rng> ThreadSource<R> {
    pub const fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl ThreadSource<SmallRng> {
    /// Fast non-cryptographic source seeded from the OS.
    pub fn fast() -> Self {
        Self(SmallRng::from_os_rng())
    }
}

impl ThreadSource<rand::rngs::ThreadRng> {
    /// Cryptographically strong source, periodically reseeded from the OS.
    pub fn crypto() -> Self {
        Self(rand::rng())
    }
}

impl<R: Rng> RandomSource for ThreadSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// Deterministic source: SHA-256 over `seed || counter`, first 53 bits as a fraction.
///
/// The same seed always yields the same sequence, which makes generated
/// identifiers reproducible.
#[derive(Debug, Clone)]
pub struct SeededRng {
    seed: Vec<u8>,
    counter: u64,
}

impl SeededRng {
    pub fn new(seed: impl AsRef<[u8]>) -> Self {
        Self {
            seed: seed.as_ref().to_vec(),
            counter: 0,
        }
    }
}

/// SHA-256 of the input, first 8 bytes as big-endian u64.
fn compute_hash(seed: &[u8], counter: u64) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(seed);
    hasher.update(counter.to_be_bytes());
    let digest = hasher.finalize();
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(head)
}

impl RandomSource for SeededRng {
    #[allow(clippy::cast_precision_loss, reason = "53-bit values are exact in f64")]
    fn next_unit(&mut self) -> f64 {
        let value = compute_hash(&self.seed, self.counter);
        self.counter = self.counter.wrapping_add(1);
        (value >> 11) as f64 / (1u64 << 53) as f64
    }
}
