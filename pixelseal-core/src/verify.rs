//! Verification pipeline: check the signature, re-hash, classify.

use p256::ecdsa::VerifyingKey;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::buffer::PixelBuffer;
use crate::classify::{Classification, Classifier};
use crate::config::SealConfig;
use crate::error::Result;
use crate::fingerprint::{Fingerprint, PerceptualHasher};
use crate::signature;

/// Both provenance signals for one image. The exact-integrity and
/// perceptual results are independent; a caller may trust a re-encoded
/// image (signature invalid, classification authentic) or distrust a
/// byte-exact one signed by the wrong key.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Whether the stored signature validates the loaded pixel bytes.
    pub signature_valid: bool,
    /// Hamming distance between the sealed and current fingerprints.
    pub distance: u32,
    /// Policy verdict derived from `distance`.
    pub classification: Classification,
}

/// Orchestrates the verification pipeline.
#[derive(Debug, Clone)]
pub struct Verifier {
    hasher: PerceptualHasher,
    classifier: Classifier,
}

impl Verifier {
    pub fn new(config: &SealConfig) -> Self {
        Self {
            hasher: PerceptualHasher,
            classifier: Classifier::new(config.tamper_threshold),
        }
    }

    /// Check a loaded image against its persisted signature and fingerprint.
    ///
    /// A signature mismatch is recorded, not fatal: the perceptual
    /// comparison still runs so the caller gets both signals. Only contract
    /// violations (e.g. a grayscale buffer) abort.
    pub fn verify(
        &self,
        buffer: &PixelBuffer,
        stored_signature: &[u8],
        sealed_fingerprint: &Fingerprint,
        verifying_key: &VerifyingKey,
    ) -> Result<VerificationReport> {
        let signature_valid = signature::verify(buffer.data(), stored_signature, verifying_key);
        if !signature_valid {
            warn!("Signature does not validate the loaded pixel bytes");
        }

        let current = self.hasher.fingerprint(buffer)?;
        let distance = sealed_fingerprint.hamming_distance(&current);
        debug!(sealed = %sealed_fingerprint, current = %current, distance, "Compared fingerprints");

        let classification = self.classifier.classify_distance(distance);

        info!(signature_valid, distance, %classification, "Verification complete");

        Ok(VerificationReport {
            signature_valid,
            distance,
            classification,
        })
    }
}
