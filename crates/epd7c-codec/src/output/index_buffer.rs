//! The per-pixel palette index buffer produced by quantization.

use image::RgbImage;

use crate::api::CodecError;
use crate::palette::{Palette, PALETTE_SIZE};

use super::packed::{pack, unpack, PackedBuffer, PackingPolicy};

/// One palette index per pixel, row-major.
///
/// Produced by [`Dither`](crate::Dither) strategies and immutable afterwards.
///
/// # Example
///
/// ```
/// use epd7c_codec::{IndexBuffer, PackingPolicy, Palette};
///
/// let buffer = IndexBuffer::new(vec![0, 1, 1, 0], 2, 2);
/// let packed = buffer.pack(PackingPolicy::RowPadded).unwrap();
/// assert_eq!(packed.bytes(), &[0x01, 0x10]);
///
/// let histogram = buffer.histogram();
/// assert_eq!(histogram[0], 2);
/// assert_eq!(histogram[1], 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexBuffer {
    indices: Vec<u8>,
    width: usize,
    height: usize,
}

impl IndexBuffer {
    /// Wrap quantized indices.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `indices.len() == width * height`.
    pub fn new(indices: Vec<u8>, width: usize, height: usize) -> Self {
        debug_assert_eq!(
            indices.len(),
            width * height,
            "indices length ({}) must match width * height ({}x{})",
            indices.len(),
            width,
            height,
        );
        Self {
            indices,
            width,
            height,
        }
    }

    /// Decode a packed buffer.
    pub fn from_packed(packed: &PackedBuffer) -> Result<Self, CodecError> {
        Ok(Self::new(packed.unpack()?, packed.width(), packed.height()))
    }

    /// Decode raw packed bytes.
    pub fn unpack(
        bytes: &[u8],
        width: usize,
        height: usize,
        policy: PackingPolicy,
    ) -> Result<Self, CodecError> {
        Ok(Self::new(unpack(bytes, width, height, policy)?, width, height))
    }

    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.indices[y * self.width + x]
    }

    /// Pack two indices per byte.
    pub fn pack(&self, policy: PackingPolicy) -> Result<PackedBuffer, CodecError> {
        let bytes = pack(&self.indices, self.width, self.height, policy)?;
        PackedBuffer::new(bytes, self.width, self.height, policy)
    }

    /// Pixel count per palette index.
    pub fn histogram(&self) -> [usize; PALETTE_SIZE] {
        let mut counts = [0usize; PALETTE_SIZE];
        for &idx in &self.indices {
            if let Some(count) = counts.get_mut(idx as usize) {
                *count += 1;
            }
        }
        counts
    }

    /// RGB bytes (`[R, G, B, R, G, B, ...]`) of the palette colors.
    pub fn to_rgb(&self, palette: &Palette) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.indices.len() * 3);
        for &idx in &self.indices {
            rgb.extend_from_slice(&palette.color(idx as usize).to_bytes());
        }
        rgb
    }

    /// Render the indices with their palette colors.
    pub fn to_rgb_image(&self, palette: &Palette) -> RgbImage {
        RgbImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            palette.color(self.get(x as usize, y as usize) as usize).into()
        })
    }
}
