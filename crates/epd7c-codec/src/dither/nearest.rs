//! Direct palette mapping without error diffusion.

use crate::canvas::Canvas;
use crate::palette::Palette;

use super::Dither;

/// Maps every pixel independently to its nearest palette entry.
///
/// Pixels have no influence on each other, so the result for a pixel depends
/// only on its own color.
pub struct Nearest;

impl Dither for Nearest {
    fn dither(&self, canvas: &Canvas, palette: &Palette) -> Vec<u8> {
        canvas
            .pixels()
            .iter()
            .map(|&pixel| palette.find_nearest(pixel))
            .collect()
    }
}
