//! The [`Canvas`] pixel buffer.

use image::RgbImage;

use crate::api::{CodecError, Stage};
use crate::color::Rgb;

/// A rectangular, row-major buffer of RGB pixels with non-zero dimensions.
///
/// Produced by the [`Compositor`](super::Compositor) and consumed by the
/// quantizers. A canvas always satisfies `pixels.len() == width * height`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    pixels: Vec<Rgb>,
    width: usize,
    height: usize,
}

impl Canvas {
    /// Wrap a row-major pixel buffer.
    ///
    /// # Errors
    ///
    /// - [`CodecError::InvalidDimension`] if `width` or `height` is zero
    /// - [`CodecError::Packing`] if `pixels.len() != width * height`
    pub fn new(pixels: Vec<Rgb>, width: usize, height: usize) -> Result<Self, CodecError> {
        if width == 0 || height == 0 {
            return Err(CodecError::invalid_dimension(
                Stage::Compositor,
                width,
                height,
            ));
        }
        if pixels.len() != width * height {
            return Err(CodecError::packing(
                Stage::Compositor,
                format!(
                    "pixel buffer has {} entries, expected {}x{}={}",
                    pixels.len(),
                    width,
                    height,
                    width * height
                ),
            ));
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// A canvas of one solid color.
    pub fn filled(width: usize, height: usize, color: Rgb) -> Result<Self, CodecError> {
        Self::new(vec![color; width * height], width, height)
    }

    /// Copy the pixels of an `image` RGB buffer.
    pub fn from_rgb_image(image: &RgbImage) -> Result<Self, CodecError> {
        let (width, height) = image.dimensions();
        let pixels = image.pixels().map(|&p| Rgb::from(p)).collect();
        Self::new(pixels, width as usize, height as usize)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixels in row-major order.
    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the canvas.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        assert!(x < self.width && y < self.height, "({x}, {y}) outside canvas");
        self.pixels[y * self.width + x]
    }

    #[inline]
    pub fn into_pixels(self) -> Vec<Rgb> {
        self.pixels
    }

    /// Convert back into an `image` RGB buffer.
    pub fn to_rgb_image(&self) -> RgbImage {
        let raw: Vec<u8> = self.pixels.iter().flat_map(|p| p.to_bytes()).collect();
        // Dimensions and length are validated at construction.
        RgbImage::from_raw(self.width as u32, self.height as u32, raw)
            .unwrap_or_else(|| RgbImage::new(self.width as u32, self.height as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert_eq!(
            Canvas::new(vec![], 0, 4).unwrap_err(),
            CodecError::InvalidDimension {
                stage: Stage::Compositor,
                width: 0,
                height: 4
            }
        );
        assert!(matches!(
            Canvas::new(vec![], 3, 0),
            Err(CodecError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_new_rejects_length_mismatch() {
        let err = Canvas::new(vec![Rgb::BLACK; 5], 2, 2).unwrap_err();
        assert!(matches!(err, CodecError::Packing { .. }));
    }

    #[test]
    fn test_rgb_image_round_trip() {
        let mut image = RgbImage::from_pixel(3, 2, image::Rgb([9, 9, 9]));
        image.put_pixel(2, 1, image::Rgb([255, 0, 0]));

        let canvas = Canvas::from_rgb_image(&image).unwrap();
        assert_eq!(canvas.width(), 3);
        assert_eq!(canvas.height(), 2);
        assert_eq!(canvas.get(2, 1), Rgb::new(255, 0, 0));
        assert_eq!(canvas.pixels()[5], Rgb::new(255, 0, 0));
        assert_eq!(canvas.to_rgb_image(), image);
    }

    #[test]
    fn test_filled() {
        let canvas = Canvas::filled(4, 3, Rgb::WHITE).unwrap();
        assert_eq!(canvas.pixels().len(), 12);
        assert!(canvas.pixels().iter().all(|&p| p == Rgb::WHITE));
    }
}
