//! Pixelseal Core - image provenance through noise, fingerprints, and signatures
//!
//! This crate provides the primitives for marking an image with deterministic
//! noise, recording a perceptual fingerprint of its original content, and
//! signing the protected pixel data so that a verifier can later separate
//! benign re-encoding from tampering.
//!
//! # Features
//!
//! - Seeded, bit-reproducible noise injection (ChaCha8 stream, one draw per byte)
//! - 64-bit average-hash perceptual fingerprinting over an 8x8 grid
//! - ECDSA P-256 / SHA-256 signing of exact pixel bytes, keys as PEM
//! - Hamming-distance classification: IDENTICAL / AUTHENTIC / TAMPERED
//! - Codec seam so tests run against a lossless PNG round-trip
//!
//! # Example
//!
//! ```no_run
//! use pixelseal_core::{
//!     generate_keypair, ImageCodec, JpegCodec, PixelBuffer, Protector, SealConfig, Verifier,
//! };
//!
//! # fn example() -> pixelseal_core::Result<()> {
//! let config = SealConfig::default();
//! let (signing_key, verifying_key) = generate_keypair();
//! let codec = JpegCodec::new(config.jpeg_quality);
//!
//! // Protect: fingerprint the original, poison it, re-encode, sign.
//! let buffer = PixelBuffer::new(16, 16, 3, vec![128; 16 * 16 * 3])?;
//! let sealed = Protector::new(&config).protect(&buffer, &signing_key, &codec)?;
//!
//! // Verify: both signals come back, independently.
//! let loaded = codec.decode(&sealed.image_bytes)?;
//! let report = Verifier::new(&config).verify(
//!     &loaded,
//!     &sealed.signature,
//!     &sealed.fingerprint,
//!     &verifying_key,
//! )?;
//! println!("{} (signature valid: {})", report.classification, report.signature_valid);
//! # Ok(())
//! # }
//! ```

pub mod buffer;
pub mod classify;
pub mod codec;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod noise;
pub mod protect;
pub mod signature;
pub mod verify;

// Re-export main types for convenience
pub use buffer::PixelBuffer;
pub use classify::{Classification, Classifier, DEFAULT_TAMPER_THRESHOLD};
pub use codec::{ImageCodec, JpegCodec, PngCodec, DEFAULT_JPEG_QUALITY};
pub use config::SealConfig;
pub use error::{PixelSealError, Result};
pub use fingerprint::{Fingerprint, PerceptualHasher, FINGERPRINT_SIZE};
pub use noise::{NoiseInjector, DEFAULT_NOISE_COEFFICIENT, DEFAULT_NOISE_SEED};
pub use protect::{Protector, SealedImage};
pub use signature::{
    generate_keypair, sign, signing_key_from_pem, signing_key_to_pem, verify,
    verifying_key_from_pem, verifying_key_to_pem,
};
pub use verify::{VerificationReport, Verifier};
