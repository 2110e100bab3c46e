//! Protection pipeline: fingerprint, poison, re-encode, sign.

use p256::ecdsa::SigningKey;
use tracing::{debug, info};

use crate::buffer::PixelBuffer;
use crate::codec::ImageCodec;
use crate::config::SealConfig;
use crate::error::Result;
use crate::fingerprint::{Fingerprint, PerceptualHasher};
use crate::noise::NoiseInjector;
use crate::signature;

/// The durable output of a successful protection run. Callers persist all
/// three pieces together; none of them is usable alone.
#[derive(Debug, Clone)]
pub struct SealedImage {
    /// Encoded protected image, ready to write to disk.
    pub image_bytes: Vec<u8>,
    /// Average hash of the image *before* noise injection.
    pub fingerprint: Fingerprint,
    /// DER signature over the re-decoded pixel bytes of `image_bytes`.
    pub signature: Vec<u8>,
}

/// Orchestrates the protection pipeline.
#[derive(Debug, Clone)]
pub struct Protector {
    hasher: PerceptualHasher,
    injector: NoiseInjector,
}

impl Protector {
    pub fn new(config: &SealConfig) -> Self {
        Self {
            hasher: PerceptualHasher,
            injector: NoiseInjector::new(config.noise_seed, config.noise_coefficient),
        }
    }

    /// Run the full pipeline over a decoded image.
    ///
    /// Stage order is load-bearing: the fingerprint is taken from the
    /// untouched buffer before any noise lands, and the signature covers the
    /// bytes that come back out of the codec round-trip, because lossy
    /// encoding changes pixels and the verifier reads the encoded file. Any
    /// stage failure aborts the run with nothing produced.
    pub fn protect(
        &self,
        buffer: &PixelBuffer,
        signing_key: &SigningKey,
        codec: &dyn ImageCodec,
    ) -> Result<SealedImage> {
        let fingerprint = self.hasher.fingerprint(buffer)?;
        debug!(fingerprint = %fingerprint, "Fingerprinted original pixels");

        let poisoned = self.injector.poison(buffer)?;

        let image_bytes = codec.encode(&poisoned)?;
        // Mandatory round-trip: sign what the verifier will decode, not what
        // we just held in memory.
        let reloaded = codec.decode(&image_bytes)?;
        let signature = signature::sign(reloaded.data(), signing_key);

        info!(
            width = buffer.width(),
            height = buffer.height(),
            channels = buffer.channels(),
            encoded_bytes = image_bytes.len(),
            "Protected image"
        );

        Ok(SealedImage {
            image_bytes,
            fingerprint,
            signature,
        })
    }
}
