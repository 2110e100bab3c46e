//! Perceptual fingerprinting (64-bit average hash).
//!
//! The hash survives re-encoding and light noise while moving sharply under
//! content-level edits, which makes it the "approximate" half of the
//! provenance check: the ECDSA signature answers "are these the exact bytes",
//! the fingerprint answers "is this still the same picture".

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::error::{PixelSealError, Result};

/// Grid edge of the downsample; 8x8 cells give one bit each.
const GRID: u32 = 8;

/// Size of the encoded fingerprint in bytes.
pub const FINGERPRINT_SIZE: usize = 8;

/// A 64-bit average-hash fingerprint. Bit `y * 8 + x` corresponds to grid
/// cell (x, y) and is set when that cell's grayscale sample is at or above
/// the global mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint(u64);

impl Fingerprint {
    pub fn from_u64(bits: u64) -> Self {
        Self(bits)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Encode as the fixed 8-byte big-endian on-disk form.
    pub fn to_bytes(&self) -> [u8; FINGERPRINT_SIZE] {
        self.0.to_be_bytes()
    }

    /// Decode the fixed 8-byte big-endian on-disk form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let array: [u8; FINGERPRINT_SIZE] = bytes.try_into().map_err(|_| {
            PixelSealError::ContractViolation(format!(
                "Fingerprint must be exactly {} bytes, got {}",
                FINGERPRINT_SIZE,
                bytes.len()
            ))
        })?;
        Ok(Self(u64::from_be_bytes(array)))
    }

    /// Number of differing bits between two fingerprints.
    pub fn hamming_distance(&self, other: &Self) -> u32 {
        (self.0 ^ other.0).count_ones()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Computes average-hash fingerprints over pixel buffers.
///
/// The same hasher serves both the protection and verification paths, so the
/// two sides can never drift apart.
#[derive(Debug, Clone, Copy, Default)]
pub struct PerceptualHasher;

impl PerceptualHasher {
    /// Compute the 64-bit average hash of `buffer`.
    ///
    /// Nearest-neighbor downsample to an 8x8 grid, grayscale each sampled
    /// pixel as the unweighted mean of its first three channels, then
    /// threshold every sample against the mean of all 64. Pure: the buffer is
    /// never mutated and identical buffers always hash identically.
    ///
    /// Buffers with fewer than three channels are rejected up front rather
    /// than read past their bounds.
    pub fn fingerprint(&self, buffer: &PixelBuffer) -> Result<Fingerprint> {
        buffer.require_rgb("Fingerprinting")?;

        let mut samples = [0f64; (GRID * GRID) as usize];
        for y in 0..GRID {
            for x in 0..GRID {
                let column = x * buffer.width() / GRID;
                let row = y * buffer.height() / GRID;
                let offset = buffer.pixel_offset(column, row);
                let pixel = &buffer.data()[offset..offset + 3];
                let gray = (pixel[0] as f64 + pixel[1] as f64 + pixel[2] as f64) / 3.0;
                samples[(y * GRID + x) as usize] = gray;
            }
        }

        let mean: f64 = samples.iter().sum::<f64>() / samples.len() as f64;

        let mut bits = 0u64;
        for (i, &sample) in samples.iter().enumerate() {
            if sample >= mean {
                bits |= 1 << i;
            }
        }

        Ok(Fingerprint(bits))
    }
}
