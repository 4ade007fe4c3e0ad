//! Floyd-Steinberg error diffusion dithering.
//!
//! The working buffer holds integer channels in `[0, 255]`. Every addition of
//! diffused error is floored and clamped immediately, so the result is exactly
//! reproducible across platforms:
//!
//! ```text
//! neighbor = clamp(floor(neighbor + error * weight / 16), 0, 255)
//! ```

use crate::canvas::Canvas;
use crate::color::Rgb;
use crate::palette::Palette;

use super::{Dither, Kernel, FLOYD_STEINBERG};

/// Floyd-Steinberg error diffusion.
///
/// Pixels are visited in row-major order without serpentine scanning. The
/// index chosen for a pixel is final; its quantization error is pushed to
/// the unvisited neighbors right, bottom-left, bottom and bottom-right.
/// Neighbors outside the canvas are skipped and their share is lost.
///
/// # Example
///
/// ```
/// use epd7c_codec::{Canvas, Dither, FloydSteinberg, Palette, Rgb};
///
/// let palette = Palette::gxepd2();
/// let canvas = Canvas::filled(4, 2, Rgb::new(128, 128, 128)).unwrap();
///
/// let indices = FloydSteinberg.dither(&canvas, &palette);
/// assert_eq!(indices, vec![6, 4, 6, 4, 4, 5, 3, 0]);
/// ```
pub struct FloydSteinberg;

impl Dither for FloydSteinberg {
    fn dither(&self, canvas: &Canvas, palette: &Palette) -> Vec<u8> {
        diffuse_with_kernel(canvas, palette, &FLOYD_STEINBERG)
    }
}

/// Error diffusion loop parameterized by kernel.
pub(crate) fn diffuse_with_kernel(canvas: &Canvas, palette: &Palette, kernel: &Kernel) -> Vec<u8> {
    let width = canvas.width();
    let height = canvas.height();
    let divisor = kernel.divisor as i32;

    let mut work: Vec<[i32; 3]> = canvas
        .pixels()
        .iter()
        .map(|p| [p.r as i32, p.g as i32, p.b as i32])
        .collect();
    let mut output = Vec::with_capacity(width * height);

    for y in 0..height {
        for x in 0..width {
            let current = Rgb::from_clamped(work[y * width + x]);
            let idx = palette.find_nearest(current);
            output.push(idx);

            let error = current.difference(palette.color(idx as usize));
            if error == [0, 0, 0] {
                continue;
            }

            for &(dx, dy, weight) in kernel.entries {
                let nx = x as i64 + dx as i64;
                let ny = y as i64 + dy as i64;
                if nx < 0 || nx >= width as i64 || ny >= height as i64 {
                    continue;
                }
                let neighbor = &mut work[ny as usize * width + nx as usize];
                for c in 0..3 {
                    let scaled = neighbor[c] * divisor + error[c] * weight as i32;
                    neighbor[c] = scaled.div_euclid(divisor).clamp(0, 255);
                }
            }
        }
    }

    output
}
