//! Palette quantization with optional error diffusion.
//!
//! Both strategies implement the [`Dither`] trait and produce one palette
//! index per canvas pixel in row-major order:
//!
//! - [`Nearest`]: direct nearest-color mapping
//! - [`FloydSteinberg`]: Floyd-Steinberg error diffusion
//!
//! [`DitherAlgorithm`] selects between them in the
//! [`Converter`](crate::Converter) builder.

mod floyd_steinberg;
mod kernel;
mod nearest;

pub use floyd_steinberg::FloydSteinberg;
pub use kernel::{Kernel, FLOYD_STEINBERG};
pub use nearest::Nearest;

use crate::canvas::Canvas;
use crate::palette::Palette;
use std::fmt;

/// Quantization strategy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DitherAlgorithm {
    /// Map each pixel to its nearest palette entry.
    #[default]
    None,
    /// Floyd-Steinberg error diffusion.
    FloydSteinberg,
}

impl DitherAlgorithm {
    pub fn name(self) -> &'static str {
        match self {
            DitherAlgorithm::None => "none",
            DitherAlgorithm::FloydSteinberg => "floyd-steinberg",
        }
    }

    pub fn is_enabled(self) -> bool {
        self != DitherAlgorithm::None
    }

    /// Run the selected strategy.
    pub fn apply(self, canvas: &Canvas, palette: &Palette) -> Vec<u8> {
        match self {
            DitherAlgorithm::None => Nearest.dither(canvas, palette),
            DitherAlgorithm::FloydSteinberg => FloydSteinberg.dither(canvas, palette),
        }
    }
}

impl From<bool> for DitherAlgorithm {
    fn from(enabled: bool) -> Self {
        if enabled {
            DitherAlgorithm::FloydSteinberg
        } else {
            DitherAlgorithm::None
        }
    }
}

impl fmt::Display for DitherAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reduces a canvas to palette indices.
pub trait Dither {
    /// Returns one index per pixel, row-major, each in `0..palette.len()`.
    fn dither(&self, canvas: &Canvas, palette: &Palette) -> Vec<u8>;
}
