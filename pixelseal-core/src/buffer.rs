//! Raw pixel buffers as handed over by the codec layer.

use crate::error::{PixelSealError, Result};

/// A decoded image: interleaved 8-bit samples, `channels` per pixel,
/// rows laid out top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer, validating that `data` matches the stated dimensions.
    pub fn new(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 || channels == 0 {
            return Err(PixelSealError::ContractViolation(format!(
                "Empty pixel buffer: {}x{}x{}",
                width, height, channels
            )));
        }
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(PixelSealError::ContractViolation(format!(
                "Pixel data length {} does not match {}x{}x{} (expected {})",
                data.len(),
                width,
                height,
                channels,
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// The interleaved sample bytes. These are the exact bytes the
    /// signature service signs and verifies.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Byte offset of the first channel of the pixel at (column, row).
    pub(crate) fn pixel_offset(&self, column: u32, row: u32) -> usize {
        (row as usize * self.width as usize + column as usize) * self.channels as usize
    }

    /// Ensure the buffer carries at least three color channels.
    ///
    /// Fingerprinting and noise injection treat the first three channels as
    /// RGB; anything narrower would read out of bounds.
    pub(crate) fn require_rgb(&self, operation: &str) -> Result<()> {
        if self.channels < 3 {
            return Err(PixelSealError::ContractViolation(format!(
                "{} requires at least 3 channels, got {}",
                operation, self.channels
            )));
        }
        Ok(())
    }
}
