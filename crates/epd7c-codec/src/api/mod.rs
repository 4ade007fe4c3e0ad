//! Public API for the epd7c-codec crate.
//!
//! This module provides the high-level API: the [`Converter`] builder and
//! the [`CodecError`] unified error type.

mod builder;
mod error;

pub use builder::{Conversion, Converter, DEFAULT_HEIGHT, DEFAULT_WIDTH};
pub use error::{CodecError, Stage};
