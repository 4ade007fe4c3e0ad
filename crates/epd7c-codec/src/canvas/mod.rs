//! Canvas compositing.
//!
//! The [`Compositor`] turns a decoded source image of arbitrary size into a
//! [`Canvas`] of exactly the target size, using one of three
//! [`LayoutMode`]s:
//!
//! - **fit**: scale uniformly to fit, center on the palette's white entry
//! - **crop**: scale uniformly to cover, center-crop the overflow
//! - **stretch**: scale each axis independently
//!
//! Resampling uses the `image` crate; the filter is selected with
//! [`ResampleFilter`] and defaults to Lanczos.

mod canvas;
mod compositor;
mod options;
mod resize;

pub use canvas::Canvas;
pub use compositor::{cover_window, fit_size, Compositor};
pub use options::{CanvasOptions, LayoutMode, ResampleFilter};
pub use resize::resize;
