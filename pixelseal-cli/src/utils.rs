//! Common helpers shared across CLI commands: artifact filenames, codec
//! selection, and file I/O with consistent error context.

use std::path::Path;

use anyhow::{Context, Result};
use pixelseal_core::{
    Fingerprint, ImageCodec, JpegCodec, PixelBuffer, PngCodec, FINGERPRINT_SIZE,
};
use tracing::{debug, info};

// Fixed filenames of the reference pipeline, used as argument defaults.
pub const DEFAULT_INPUT: &str = "input.jpg";
pub const DEFAULT_PROTECTED: &str = "protected.jpg";
pub const DEFAULT_PRIVATE_KEY: &str = "private.pem";
pub const DEFAULT_PUBLIC_KEY: &str = "public.pem";
pub const DEFAULT_SIGNATURE: &str = "signature.sig";
pub const DEFAULT_FINGERPRINT: &str = "fingerprint.bin";

/// Pick a codec from a file extension: `.png` gets lossless encoding,
/// everything else the lossy JPEG path.
pub fn codec_for(path: &Path, jpeg_quality: u8) -> Box<dyn ImageCodec> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("png") => Box::new(PngCodec),
        _ => Box::new(JpegCodec::new(jpeg_quality)),
    }
}

/// Read and decode an image file into a pixel buffer.
pub fn load_pixels(path: &Path, codec: &dyn ImageCodec) -> Result<PixelBuffer> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read image file: {}", path.display()))?;
    let buffer = codec
        .decode(&bytes)
        .with_context(|| format!("Failed to decode image: {}", path.display()))?;
    info!(
        path = %path.display(),
        width = buffer.width(),
        height = buffer.height(),
        channels = buffer.channels(),
        "Loaded image"
    );
    Ok(buffer)
}

/// Read a PEM key file as text.
pub fn load_key_pem(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read key file: {}", path.display()))
}

/// Read the fixed 8-byte fingerprint file.
pub fn load_fingerprint(path: &Path) -> Result<Fingerprint> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read fingerprint file: {}", path.display()))?;
    anyhow::ensure!(
        bytes.len() == FINGERPRINT_SIZE,
        "Fingerprint file {} has {} bytes, expected {}",
        path.display(),
        bytes.len(),
        FINGERPRINT_SIZE
    );
    let fingerprint = Fingerprint::from_bytes(&bytes)?;
    debug!(path = %path.display(), fingerprint = %fingerprint, "Loaded fingerprint");
    Ok(fingerprint)
}

/// Read the raw signature bytes.
pub fn load_signature(path: &Path) -> Result<Vec<u8>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read signature file: {}", path.display()))?;
    debug!(path = %path.display(), bytes = bytes.len(), "Loaded signature");
    Ok(bytes)
}

/// Write a file with consistent error context.
pub fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    debug!(path = %path.display(), bytes = bytes.len(), "Wrote file");
    Ok(())
}
