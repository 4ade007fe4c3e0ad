//! Compositing options and configuration.
//!
//! This module provides the [`CanvasOptions`] struct together with the
//! [`LayoutMode`] and [`ResampleFilter`] selectors.

use std::fmt;
use std::str::FromStr;

/// How a source image is placed on the target canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    /// Uniform scale to fit inside the canvas, centered on white.
    /// Letterbox bars may remain.
    #[default]
    Fit,
    /// Uniform scale to cover the canvas, center-cropped. No bars.
    Crop,
    /// Non-uniform scale straight to the canvas size.
    Stretch,
}

impl LayoutMode {
    pub fn name(self) -> &'static str {
        match self {
            LayoutMode::Fit => "fit",
            LayoutMode::Crop => "crop",
            LayoutMode::Stretch => "stretch",
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LayoutMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fit" | "letterbox" => Ok(LayoutMode::Fit),
            "crop" | "fill" => Ok(LayoutMode::Crop),
            "stretch" => Ok(LayoutMode::Stretch),
            other => Err(format!(
                "unknown layout mode '{other}' (expected fit, crop or stretch)"
            )),
        }
    }
}

/// Resampling filter used when scaling the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResampleFilter {
    Nearest,
    Bilinear,
    Bicubic,
    /// Lanczos with a window of 3, the highest quality option.
    #[default]
    Lanczos,
}

impl ResampleFilter {
    pub fn name(self) -> &'static str {
        match self {
            ResampleFilter::Nearest => "nearest",
            ResampleFilter::Bilinear => "bilinear",
            ResampleFilter::Bicubic => "bicubic",
            ResampleFilter::Lanczos => "lanczos",
        }
    }
}

impl From<ResampleFilter> for image::imageops::FilterType {
    fn from(filter: ResampleFilter) -> Self {
        use image::imageops::FilterType;
        match filter {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Bilinear => FilterType::Triangle,
            ResampleFilter::Bicubic => FilterType::CatmullRom,
            ResampleFilter::Lanczos => FilterType::Lanczos3,
        }
    }
}

impl fmt::Display for ResampleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResampleFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" => Ok(ResampleFilter::Nearest),
            "bilinear" | "triangle" => Ok(ResampleFilter::Bilinear),
            "bicubic" | "catmull-rom" => Ok(ResampleFilter::Bicubic),
            "lanczos" | "lanczos3" => Ok(ResampleFilter::Lanczos),
            other => Err(format!(
                "unknown resample filter '{other}' (expected nearest, bilinear, bicubic or lanczos)"
            )),
        }
    }
}

/// Configuration for the canvas compositor.
///
/// # Example
///
/// ```
/// use epd7c_codec::{CanvasOptions, LayoutMode, ResampleFilter};
///
/// let options = CanvasOptions::new()
///     .mode(LayoutMode::Crop)
///     .filter(ResampleFilter::Bicubic);
/// assert_eq!(options.mode, LayoutMode::Crop);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanvasOptions {
    /// Placement of the source on the canvas. Default: [`LayoutMode::Fit`].
    pub mode: LayoutMode,

    /// Scaling filter. Default: [`ResampleFilter::Lanczos`].
    pub filter: ResampleFilter,
}

impl CanvasOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn mode(mut self, mode: LayoutMode) -> Self {
        self.mode = mode;
        self
    }

    #[inline]
    pub fn filter(mut self, filter: ResampleFilter) -> Self {
        self.filter = filter;
        self
    }
}
