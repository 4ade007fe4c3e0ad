//! Test fixtures: images generated in-test and written to scratch dirs.

use image::{RgbImage, RgbaImage};
use std::path::{Path, PathBuf};

/// GxEPD2 palette colors in index order.
pub mod colors {
    pub const WHITE: [u8; 3] = [255, 255, 255];
    pub const BLACK: [u8; 3] = [0, 0, 0];
    pub const RED: [u8; 3] = [255, 0, 0];
    pub const GREEN: [u8; 3] = [0, 255, 0];
    pub const BLUE: [u8; 3] = [0, 0, 255];
    pub const YELLOW: [u8; 3] = [255, 255, 0];
    pub const ORANGE: [u8; 3] = [255, 128, 0];
}

pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, image::Rgb(rgb))
}

/// 2x2 cells alternating between two colors.
pub fn checkerboard(width: u32, height: u32, a: [u8; 3], b: [u8; 3]) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        if (x + y) % 2 == 0 {
            image::Rgb(a)
        } else {
            image::Rgb(b)
        }
    })
}

/// Horizontal grey ramp from black to white.
pub fn grey_ramp(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, _| {
        let v = (x * 255 / (width - 1).max(1)) as u8;
        image::Rgb([v, v, v])
    })
}

/// Opaque blue square on a fully transparent background.
pub fn transparent_with_square(size: u32) -> RgbaImage {
    let lo = size / 4;
    let hi = size - size / 4;
    RgbaImage::from_fn(size, size, |x, y| {
        if (lo..hi).contains(&x) && (lo..hi).contains(&y) {
            image::Rgba([0, 0, 255, 255])
        } else {
            image::Rgba([0, 0, 0, 0])
        }
    })
}

pub fn write_png(dir: &Path, name: &str, image: &RgbImage) -> PathBuf {
    let path = dir.join(name);
    image.save(&path).expect("Failed to write fixture PNG");
    path
}

pub fn write_rgba_png(dir: &Path, name: &str, image: &RgbaImage) -> PathBuf {
    let path = dir.join(name);
    image.save(&path).expect("Failed to write fixture PNG");
    path
}

pub fn write_jpeg(dir: &Path, name: &str, image: &RgbImage) -> PathBuf {
    let path = dir.join(name);
    image.save(&path).expect("Failed to write fixture JPEG");
    path
}

pub fn write_config(dir: &Path, yaml: &str) -> PathBuf {
    let path = dir.join("epd7c.yaml");
    std::fs::write(&path, yaml).expect("Failed to write config");
    path
}
