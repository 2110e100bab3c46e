//! Policy knobs for the protection and verification pipelines.

use serde::{Deserialize, Serialize};

use crate::classify::DEFAULT_TAMPER_THRESHOLD;
use crate::codec::DEFAULT_JPEG_QUALITY;
use crate::noise::{DEFAULT_NOISE_COEFFICIENT, DEFAULT_NOISE_SEED};

/// All tunable parameters in one place. Defaults reproduce the reference
/// protection pipeline (seed 42, coefficient 0.05, JPEG quality 90,
/// tamper threshold 5 bits).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SealConfig {
    /// Seed for the deterministic noise stream.
    pub noise_seed: u64,
    /// Scale applied to each noise draw before adding it to a pixel byte.
    pub noise_coefficient: f64,
    /// Quality for the lossy protected-image encode.
    pub jpeg_quality: u8,
    /// Hamming distance at which an image stops being "authentic".
    pub tamper_threshold: u32,
}

impl Default for SealConfig {
    fn default() -> Self {
        Self {
            noise_seed: DEFAULT_NOISE_SEED,
            noise_coefficient: DEFAULT_NOISE_COEFFICIENT,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            tamper_threshold: DEFAULT_TAMPER_THRESHOLD,
        }
    }
}
