#![allow(clippy::module_inception)]

//! epd7c-codec: image to packed-index conversion for 7-color e-paper panels
//!
//! The pipeline has four stages, each consuming the previous stage's full
//! output:
//!
//! ```text
//! RgbImage (any size)
//!     |
//!     v
//! Compositor        fit / crop / stretch onto a w x h canvas
//!     |
//!     v
//! Canvas            w x h RGB
//!     |
//!     v
//! Nearest |         palette index per pixel, optionally with
//! FloydSteinberg    error diffusion
//!     |
//!     v
//! IndexBuffer       w x h indices in 0..=6
//!     |
//!     v
//! pack()            two indices per byte, high nibble first
//!     |
//!     v
//! PackedBuffer
//! ```
//!
//! # Quick Start
//!
//! ```
//! use epd7c_codec::{Converter, LayoutMode, Palette, PackingPolicy};
//! use image::RgbImage;
//!
//! let converter = Converter::new(Palette::gxepd2())
//!     .size(6, 4)
//!     .mode(LayoutMode::Fit)
//!     .dither(true)
//!     .packing(PackingPolicy::RowPadded);
//!
//! let photo = RgbImage::from_fn(30, 20, |x, y| image::Rgb([x as u8 * 8, y as u8 * 12, 90]));
//! let result = converter.convert(&photo).unwrap();
//!
//! assert_eq!(result.packed().len(), 12);
//! ```
//!
//! # Palette Layouts
//!
//! Index values are a wire contract with the panel firmware. Two layouts are
//! available via [`PaletteLayout`]: the GxEPD2 order (default, WHITE = 0,
//! BLACK = 1) and the Waveshare order (BLACK = 0, WHITE = 1). The ORANGE
//! entry differs between the two and may be overridden for calibration.
//!
//! # Determinism
//!
//! Nearest-color matching uses squared Euclidean RGB distance with the lowest
//! index winning ties. Error diffusion runs on integers with flooring and
//! clamping at every step, so a given canvas always yields the same indices.

pub mod api;
pub mod canvas;
pub mod color;
pub mod dither;
pub mod output;
pub mod palette;


pub use api::{CodecError, Conversion, Converter, Stage, DEFAULT_HEIGHT, DEFAULT_WIDTH};
pub use canvas::{
    cover_window, fit_size, Canvas, CanvasOptions, Compositor, LayoutMode, ResampleFilter,
};
pub use color::Rgb;
pub use dither::{Dither, DitherAlgorithm, FloydSteinberg, Kernel, Nearest, FLOYD_STEINBERG};
pub use output::{pack, packed_len, row_stride, unpack, IndexBuffer, PackedBuffer, PackingPolicy};
pub use palette::{
    NamedColor, Palette, PaletteError, PaletteLayout, ParseColorError, PALETTE_SIZE,
};
