//! Palette types and utilities
//!
//! This module provides the fixed 7-color [`Palette`], its two wire
//! [`PaletteLayout`]s, and error types for parsing and validation.

mod error;
mod palette;

pub use error::{PaletteError, ParseColorError};
pub use palette::{NamedColor, Palette, PaletteLayout, PALETTE_SIZE};
