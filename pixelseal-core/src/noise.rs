//! Deterministic noise injection ("poisoning").
//!
//! Every byte of the buffer receives a small additive perturbation drawn from
//! a seeded ChaCha8 stream. The generator is pinned so that the same seed and
//! input buffer produce byte-identical output on every run and on every
//! platform: one `next_u32` draw per byte, consumed in buffer order, reduced
//! modulo 256 and scaled by the noise coefficient.

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::buffer::PixelBuffer;
use crate::error::Result;

/// Default seed, kept stable so protected outputs are reproducible.
pub const DEFAULT_NOISE_SEED: u64 = 42;

/// Default scale applied to each noise draw. At 0.05 the perturbation is at
/// most ~12 intensity levels, enough to poison training pipelines without
/// shifting the perceptual hash.
pub const DEFAULT_NOISE_COEFFICIENT: f64 = 0.05;

/// Applies seeded, reproducible noise to pixel buffers.
#[derive(Debug, Clone)]
pub struct NoiseInjector {
    seed: u64,
    coefficient: f64,
}

impl Default for NoiseInjector {
    fn default() -> Self {
        Self::new(DEFAULT_NOISE_SEED, DEFAULT_NOISE_COEFFICIENT)
    }
}

impl NoiseInjector {
    pub fn new(seed: u64, coefficient: f64) -> Self {
        Self { seed, coefficient }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Produce a noised copy of `buffer` with identical dimensions.
    ///
    /// The additive term is non-negative, so values saturate at 255 and need
    /// no lower clamp. The input buffer is left untouched.
    pub fn poison(&self, buffer: &PixelBuffer) -> Result<PixelBuffer> {
        buffer.require_rgb("Noise injection")?;

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut data = Vec::with_capacity(buffer.data().len());
        for &byte in buffer.data() {
            let draw = rng.next_u32() % 256;
            let noised = byte as f64 + draw as f64 * self.coefficient;
            data.push(noised.min(255.0) as u8);
        }

        debug!(
            seed = self.seed,
            coefficient = self.coefficient,
            bytes = data.len(),
            "Injected deterministic noise"
        );

        PixelBuffer::new(buffer.width(), buffer.height(), buffer.channels(), data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_buffer() -> PixelBuffer {
        let mut data = Vec::with_capacity(16 * 16 * 3);
        for y in 0..16u32 {
            for x in 0..16u32 {
                data.push((x * 16) as u8);
                data.push((y * 16) as u8);
                data.push(((x + y) * 8) as u8);
            }
        }
        PixelBuffer::new(16, 16, 3, data).unwrap()
    }

    #[test]
    fn test_poison_is_deterministic() {
        let buffer = gradient_buffer();
        let injector = NoiseInjector::new(42, 0.05);

        let first = injector.poison(&buffer).unwrap();
        let second = injector.poison(&buffer).unwrap();
        assert_eq!(first.data(), second.data());
    }

    #[test]
    fn test_poison_differs_by_seed() {
        let buffer = gradient_buffer();
        let a = NoiseInjector::new(42, 0.05).poison(&buffer).unwrap();
        let b = NoiseInjector::new(43, 0.05).poison(&buffer).unwrap();
        assert_ne!(a.data(), b.data());
    }

    #[test]
    fn test_poison_preserves_dimensions() {
        let buffer = gradient_buffer();
        let noised = NoiseInjector::default().poison(&buffer).unwrap();
        assert_eq!(noised.width(), buffer.width());
        assert_eq!(noised.height(), buffer.height());
        assert_eq!(noised.channels(), buffer.channels());
    }

    #[test]
    fn test_poison_never_decreases_bytes() {
        let buffer = gradient_buffer();
        let noised = NoiseInjector::default().poison(&buffer).unwrap();
        for (&original, &poisoned) in buffer.data().iter().zip(noised.data()) {
            assert!(poisoned >= original);
        }
    }

    #[test]
    fn test_poison_saturates_at_255() {
        let buffer = PixelBuffer::new(2, 2, 3, vec![255; 12]).unwrap();
        let noised = NoiseInjector::new(7, 1.0).poison(&buffer).unwrap();
        assert!(noised.data().iter().all(|&b| b == 255));
    }

    #[test]
    fn test_poison_rejects_narrow_buffers() {
        let gray = PixelBuffer::new(4, 4, 1, vec![128; 16]).unwrap();
        assert!(NoiseInjector::default().poison(&gray).is_err());
    }

    #[test]
    fn test_poison_does_not_mutate_input() {
        let buffer = gradient_buffer();
        let snapshot = buffer.data().to_vec();
        let _ = NoiseInjector::default().poison(&buffer).unwrap();
        assert_eq!(buffer.data(), snapshot.as_slice());
    }
}
