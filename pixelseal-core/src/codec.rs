//! Codec seam between the provenance core and the `image` crate.
//!
//! The protection pipeline signs the pixel bytes that come back out of the
//! codec, so encode and decode live behind one trait and the tests can swap
//! the lossy JPEG codec for lossless PNG.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, GenericImageView, ImageEncoder};
use tracing::debug;

use crate::buffer::PixelBuffer;
use crate::error::{PixelSealError, Result};

/// JPEG quality used for protected images.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Turns compressed image bytes into pixel buffers and back.
pub trait ImageCodec {
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer>;
    fn encode(&self, buffer: &PixelBuffer) -> Result<Vec<u8>>;
}

fn color_type(channels: u8) -> Result<ExtendedColorType> {
    match channels {
        1 => Ok(ExtendedColorType::L8),
        2 => Ok(ExtendedColorType::La8),
        3 => Ok(ExtendedColorType::Rgb8),
        4 => Ok(ExtendedColorType::Rgba8),
        other => Err(PixelSealError::Codec(format!(
            "Unsupported channel count: {}",
            other
        ))),
    }
}

fn decode_bytes(bytes: &[u8]) -> Result<PixelBuffer> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| PixelSealError::Codec(format!("Failed to decode image: {}", e)))?;
    let (width, height) = image.dimensions();

    // Preserve the native 8-bit layout; widen anything exotic to RGB.
    let (channels, data) = match image {
        DynamicImage::ImageLuma8(img) => (1, img.into_raw()),
        DynamicImage::ImageLumaA8(img) => (2, img.into_raw()),
        DynamicImage::ImageRgb8(img) => (3, img.into_raw()),
        DynamicImage::ImageRgba8(img) => (4, img.into_raw()),
        other => (3, other.into_rgb8().into_raw()),
    };

    debug!(width, height, channels, "Decoded image");
    PixelBuffer::new(width, height, channels, data)
}

/// Lossy production codec; the protected artifact is a JPEG.
#[derive(Debug, Clone, Copy)]
pub struct JpegCodec {
    quality: u8,
}

impl Default for JpegCodec {
    fn default() -> Self {
        Self::new(DEFAULT_JPEG_QUALITY)
    }
}

impl JpegCodec {
    pub fn new(quality: u8) -> Self {
        Self { quality }
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }
}

impl ImageCodec for JpegCodec {
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer> {
        decode_bytes(bytes)
    }

    fn encode(&self, buffer: &PixelBuffer) -> Result<Vec<u8>> {
        let color = color_type(buffer.channels())?;
        if !matches!(color, ExtendedColorType::L8 | ExtendedColorType::Rgb8) {
            return Err(PixelSealError::Codec(format!(
                "JPEG cannot encode {}-channel buffers",
                buffer.channels()
            )));
        }

        let mut out = Cursor::new(Vec::new());
        let encoder = JpegEncoder::new_with_quality(&mut out, self.quality);
        encoder
            .write_image(buffer.data(), buffer.width(), buffer.height(), color)
            .map_err(|e| PixelSealError::Codec(format!("Failed to encode JPEG: {}", e)))?;
        Ok(out.into_inner())
    }
}

/// Lossless codec. Round-trips pixel bytes exactly, which keeps the
/// end-to-end tests free of JPEG nondeterminism and supports archival
/// workflows where compression loss is unacceptable.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngCodec;

impl ImageCodec for PngCodec {
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer> {
        decode_bytes(bytes)
    }

    fn encode(&self, buffer: &PixelBuffer) -> Result<Vec<u8>> {
        let color = color_type(buffer.channels())?;
        let mut out = Cursor::new(Vec::new());
        PngEncoder::new(&mut out)
            .write_image(buffer.data(), buffer.width(), buffer.height(), color)
            .map_err(|e| PixelSealError::Codec(format!("Failed to encode PNG: {}", e)))?;
        Ok(out.into_inner())
    }
}
