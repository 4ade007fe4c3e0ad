//! Converter builder: the primary entry point for the crate.
//!
//! [`Converter`] runs the full pipeline (compose, quantize, pack) with
//! fluent configuration.

use image::RgbImage;

use crate::canvas::{Canvas, CanvasOptions, Compositor, LayoutMode, ResampleFilter};
use crate::dither::DitherAlgorithm;
use crate::output::{IndexBuffer, PackedBuffer, PackingPolicy};
use crate::palette::Palette;

use super::CodecError;

/// Default canvas width (7.3" seven-color panel).
pub const DEFAULT_WIDTH: u32 = 800;
/// Default canvas height (7.3" seven-color panel).
pub const DEFAULT_HEIGHT: u32 = 480;

/// Image to packed-buffer converter.
///
/// - Constructor requires a [`Palette`]
/// - Configuration methods consume and return `self`
/// - [`convert()`](Self::convert) takes `&self`, so one converter can be
///   reused for many images; nothing carries over between calls
///
/// # Example
///
/// ```
/// use epd7c_codec::{Converter, LayoutMode, Palette};
/// use image::RgbImage;
///
/// let converter = Converter::new(Palette::gxepd2())
///     .size(4, 2)
///     .mode(LayoutMode::Stretch)
///     .dither(true);
///
/// let source = RgbImage::from_pixel(16, 16, image::Rgb([255, 0, 0]));
/// let result = converter.convert(&source).unwrap();
///
/// assert_eq!(result.packed().bytes(), &[0x22, 0x22, 0x22, 0x22]);
/// ```
#[derive(Debug, Clone)]
pub struct Converter {
    palette: Palette,
    width: u32,
    height: u32,
    canvas: CanvasOptions,
    algorithm: DitherAlgorithm,
    packing: PackingPolicy,
}

impl Converter {
    /// Create a converter for the default 800x480 canvas, fit layout,
    /// Lanczos resampling, no dithering and row-padded packing.
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            canvas: CanvasOptions::default(),
            algorithm: DitherAlgorithm::None,
            packing: PackingPolicy::default(),
        }
    }

    /// Set the target canvas size.
    #[inline]
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[inline]
    pub fn mode(mut self, mode: LayoutMode) -> Self {
        self.canvas = self.canvas.mode(mode);
        self
    }

    #[inline]
    pub fn filter(mut self, filter: ResampleFilter) -> Self {
        self.canvas = self.canvas.filter(filter);
        self
    }

    /// Enable or disable Floyd-Steinberg error diffusion.
    #[inline]
    pub fn dither(mut self, enabled: bool) -> Self {
        self.algorithm = DitherAlgorithm::from(enabled);
        self
    }

    #[inline]
    pub fn algorithm(mut self, algorithm: DitherAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    #[inline]
    pub fn packing(mut self, policy: PackingPolicy) -> Self {
        self.packing = policy;
        self
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Composite `source` onto the target canvas.
    pub fn compose(&self, source: &RgbImage) -> Result<Canvas, CodecError> {
        Compositor::new(&self.palette, self.canvas.clone()).compose(source, self.width, self.height)
    }

    /// Reduce a canvas to palette indices.
    pub fn quantize(&self, canvas: &Canvas) -> IndexBuffer {
        let indices = self.algorithm.apply(canvas, &self.palette);
        IndexBuffer::new(indices, canvas.width(), canvas.height())
    }

    /// Pack quantized indices with the configured policy.
    pub fn pack(&self, indices: IndexBuffer) -> Result<Conversion, CodecError> {
        let packed = indices.pack(self.packing)?;
        Ok(Conversion { indices, packed })
    }

    /// Run compose, quantize and pack.
    pub fn convert(&self, source: &RgbImage) -> Result<Conversion, CodecError> {
        let canvas = self.compose(source)?;
        self.pack(self.quantize(&canvas))
    }
}

/// Result of [`Converter::convert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    indices: IndexBuffer,
    packed: PackedBuffer,
}

impl Conversion {
    #[inline]
    pub fn indices(&self) -> &IndexBuffer {
        &self.indices
    }

    #[inline]
    pub fn packed(&self) -> &PackedBuffer {
        &self.packed
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.indices.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.indices.height()
    }

    pub fn into_parts(self) -> (IndexBuffer, PackedBuffer) {
        (self.indices, self.packed)
    }
}
