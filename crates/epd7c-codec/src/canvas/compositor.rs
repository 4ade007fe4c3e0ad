//! Canvas compositing: place a source image of any size on a fixed-size
//! canvas.
//!
//! # Geometry
//!
//! For `fit` the scale is `min(w/sw, h/sh)`: the limiting dimension lands
//! exactly on the target and the other one is rounded (half up) with integer
//! arithmetic. For `crop` the centered source window with the target's aspect
//! ratio is cut out first and only that window is resampled.
//!
//! ```text
//!  fit (200x100 -> 100x100)      crop (200x100 -> 100x100)
//!  +----------+                  +--+----------+--+
//!  |  white   |                  |  |          |  |
//!  +----------+                  |  |  window  |  |
//!  |  image   | 100x50           |  |  100x100 |  |
//!  +----------+                  |  |          |  |
//!  |  white   |                  +--+----------+--+
//!  +----------+                      200x100 source
//! ```

use image::RgbImage;

use crate::api::{CodecError, Stage};
use crate::color::Rgb;
use crate::palette::Palette;

use super::canvas::Canvas;
use super::options::{CanvasOptions, LayoutMode};
use super::resize::resize;

/// Maps source images onto a canvas of fixed size.
///
/// The letterbox color for [`LayoutMode::Fit`] is the palette's WHITE entry.
///
/// # Example
///
/// ```
/// use epd7c_codec::{CanvasOptions, Compositor, LayoutMode, Palette, Rgb};
/// use image::RgbImage;
///
/// let palette = Palette::gxepd2();
/// let compositor = Compositor::new(&palette, CanvasOptions::new().mode(LayoutMode::Fit));
///
/// let source = RgbImage::from_pixel(40, 20, image::Rgb([0, 0, 0]));
/// let canvas = compositor.compose(&source, 20, 20).unwrap();
///
/// assert_eq!((canvas.width(), canvas.height()), (20, 20));
/// assert_eq!(canvas.get(0, 0), Rgb::WHITE); // letterbox
/// ```
pub struct Compositor<'a> {
    palette: &'a Palette,
    options: CanvasOptions,
}

impl<'a> Compositor<'a> {
    pub fn new(palette: &'a Palette, options: CanvasOptions) -> Self {
        Self { palette, options }
    }

    #[inline]
    pub fn options(&self) -> &CanvasOptions {
        &self.options
    }

    /// Composite `source` onto a `width`x`height` canvas.
    ///
    /// # Errors
    ///
    /// [`CodecError::InvalidDimension`] if the target or the source has a
    /// zero dimension.
    pub fn compose(&self, source: &RgbImage, width: u32, height: u32) -> Result<Canvas, CodecError> {
        if width == 0 || height == 0 {
            return Err(CodecError::invalid_dimension(
                Stage::Compositor,
                width as usize,
                height as usize,
            ));
        }
        let (src_w, src_h) = source.dimensions();
        if src_w == 0 || src_h == 0 {
            return Err(CodecError::invalid_dimension(
                Stage::Compositor,
                src_w as usize,
                src_h as usize,
            ));
        }

        let filter = self.options.filter;
        let composed = match self.options.mode {
            LayoutMode::Stretch => resize(source, width, height, filter),
            LayoutMode::Fit => {
                let (new_w, new_h) = fit_size(src_w, src_h, width, height);
                let scaled = resize(source, new_w, new_h, filter);
                let mut canvas = RgbImage::from_pixel(width, height, self.background().into());
                let offset_x = (width - new_w) / 2;
                let offset_y = (height - new_h) / 2;
                image::imageops::replace(&mut canvas, &scaled, offset_x as i64, offset_y as i64);
                canvas
            }
            LayoutMode::Crop => {
                let (x, y, crop_w, crop_h) = cover_window(src_w, src_h, width, height);
                let window = image::imageops::crop_imm(source, x, y, crop_w, crop_h).to_image();
                resize(&window, width, height, filter)
            }
        };

        Canvas::from_rgb_image(&composed)
    }

    /// Letterbox fill color.
    #[inline]
    pub fn background(&self) -> Rgb {
        self.palette.white()
    }
}

/// Size of the source scaled by `min(w/sw, h/sh)`.
pub fn fit_size(src_w: u32, src_h: u32, width: u32, height: u32) -> (u32, u32) {
    // w/sw <= h/sh  <=>  w*sh <= h*sw
    if (width as u64) * (src_h as u64) <= (height as u64) * (src_w as u64) {
        (width, scale_dim(src_h, width, src_w).min(height))
    } else {
        (scale_dim(src_w, height, src_h).min(width), height)
    }
}

/// Centered source rectangle `(x, y, w, h)` with the target's aspect ratio.
///
/// Scaling this window to `width`x`height` equals scaling the whole source by
/// `max(w/sw, h/sh)` and center-cropping, without materializing the
/// oversized intermediate.
pub fn cover_window(src_w: u32, src_h: u32, width: u32, height: u32) -> (u32, u32, u32, u32) {
    if (width as u64) * (src_h as u64) >= (height as u64) * (src_w as u64) {
        let crop_h = scale_dim(height, src_w, width).min(src_h);
        (0, (src_h - crop_h) / 2, src_w, crop_h)
    } else {
        let crop_w = scale_dim(width, src_h, height).min(src_w);
        ((src_w - crop_w) / 2, 0, crop_w, src_h)
    }
}

/// `round(other * target / limiting)`, half up, at least 1.
fn scale_dim(other: u32, target: u32, limiting: u32) -> u32 {
    let numerator = 2 * other as u64 * target as u64 + limiting as u64;
    let scaled = numerator / (2 * limiting as u64);
    scaled.clamp(1, u32::MAX as u64) as u32
}
