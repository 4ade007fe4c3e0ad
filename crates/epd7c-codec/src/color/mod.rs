//! Color types
//!
//! The whole pipeline works on 8-bit-per-channel RGB. There is no gamma
//! decoding and no perceptual color space: palette distances are squared
//! Euclidean distances on the raw channel values, which is what the panel
//! firmware tooling expects.
//!
//! # Example
//!
//! ```
//! use epd7c_codec::Rgb;
//!
//! let orange: Rgb = "#FF8000".parse().unwrap();
//! assert_eq!(orange, Rgb::new(255, 128, 0));
//! assert_eq!(orange.distance_squared(Rgb::new(255, 128, 0)), 0);
//! ```

mod rgb;

pub use rgb::Rgb;
