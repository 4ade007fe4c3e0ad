//! epd7c - images to packed headers for 7-color e-paper panels
//!
//! Decodes an image, maps it onto the panel canvas, quantizes it to the
//! 7-color palette and writes the packed 4-bit buffer as a C header.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
