//! RGBA raster buffers handed over by the image layer.
//!
//! Decoding and downsampling happen upstream; this type only guarantees
//! the buffer is dense, row-major, and sized `width * height * 4`.

use crate::color::Rgb;
use crate::error::{CoreError, Result};

/// Dense row-major 8-bit RGBA image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RasterImage {
    /// Wrap an RGBA buffer, checking its length.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = Self::byte_len(width, height)?;
        if data.len() != expected {
            return Err(CoreError::BufferSize {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// An image where every pixel has the same RGBA value.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self> {
        let len = Self::byte_len(width, height)?;
        let data = rgba.iter().copied().cycle().take(len).collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    fn byte_len(width: u32, height: u32) -> Result<usize> {
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or(CoreError::Dimensions { width, height })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.data.len() / 4
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw RGBA bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Iterate pixels as `[r, g, b, a]`.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.data
            .chunks_exact(4)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }

    /// Apply `f` to the color of every pixel, preserving alpha.
    pub fn map_rgb(&mut self, f: impl Fn(Rgb) -> Rgb) {
        for px in self.data.chunks_exact_mut(4) {
            let [r, g, b] = f(Rgb::from_rgb8(px[0], px[1], px[2])).to_rgb8();
            px[0] = r;
            px[1] = g;
            px[2] = b;
        }
    }
}
