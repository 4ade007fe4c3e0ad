//! Unified error type for the epd7c-codec public API.
//!
//! [`CodecError`] names the pipeline [`Stage`] that detected the problem and
//! carries the offending values, so callers can report exactly what to fix.

use crate::palette::{PaletteError, ParseColorError};
use std::fmt;

/// Pipeline stage that raised an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Compositor,
    Packer,
    Unpacker,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::Compositor => "compositor",
            Stage::Packer => "packer",
            Stage::Unpacker => "unpacker",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unified error type for the epd7c-codec public API.
///
/// # Example
///
/// ```
/// use epd7c_codec::{pack, CodecError, PackingPolicy};
///
/// let err = pack(&[0, 1, 2], 0, 1, PackingPolicy::RowPadded).unwrap_err();
/// assert!(matches!(err, CodecError::Packing { .. }));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum CodecError {
    /// A width or height is zero, or a source image is empty.
    InvalidDimension {
        stage: Stage,
        width: u32,
        height: u32,
    },
    /// A buffer length or index value violates the packing contract.
    Packing { stage: Stage, reason: String },
    /// Palette validation error
    Palette(PaletteError),
}

impl CodecError {
    pub(crate) fn invalid_dimension(stage: Stage, width: usize, height: usize) -> Self {
        CodecError::InvalidDimension {
            stage,
            width: width.min(u32::MAX as usize) as u32,
            height: height.min(u32::MAX as usize) as u32,
        }
    }

    pub(crate) fn packing(stage: Stage, reason: impl Into<String>) -> Self {
        CodecError::Packing {
            stage,
            reason: reason.into(),
        }
    }

    /// The stage that raised the error, if any.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            CodecError::InvalidDimension { stage, .. } | CodecError::Packing { stage, .. } => {
                Some(*stage)
            }
            CodecError::Palette(_) => None,
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::InvalidDimension {
                stage,
                width,
                height,
            } => write!(
                f,
                "{}: invalid dimensions {}x{} (width and height must be > 0)",
                stage, width, height
            ),
            CodecError::Packing { stage, reason } => write!(f, "{}: {}", stage, reason),
            CodecError::Palette(err) => write!(f, "palette error: {}", err),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CodecError::Palette(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PaletteError> for CodecError {
    fn from(err: PaletteError) -> Self {
        CodecError::Palette(err)
    }
}

impl From<ParseColorError> for CodecError {
    fn from(err: ParseColorError) -> Self {
        CodecError::Palette(PaletteError::ParseColor(err))
    }
}
