//! Image resizing.
//!
//! Thin wrapper over `image::imageops::resize` that skips the resample when
//! the dimensions already match, so pixel-exact sources stay pixel-exact.

use image::RgbImage;

use super::options::ResampleFilter;

/// Resize `image` to `width`x`height` with the given filter.
///
/// Returns an unchanged copy when the dimensions already match.
pub fn resize(image: &RgbImage, width: u32, height: u32, filter: ResampleFilter) -> RgbImage {
    if image.dimensions() == (width, height) {
        return image.clone();
    }

    image::imageops::resize(image, width, height, filter.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_image(width: u32, height: u32, rgb: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(width, height, image::Rgb(rgb))
    }

    #[test]
    fn test_resize_noop_same_dimensions() {
        let mut input = solid_image(10, 10, [128, 128, 128]);
        input.put_pixel(3, 4, image::Rgb([1, 2, 3]));
        let output = resize(&input, 10, 10, ResampleFilter::Lanczos);

        assert_eq!(output.dimensions(), (10, 10));
        assert_eq!(output, input, "Pixels should be unchanged for no-op resize");
    }

    #[test]
    fn test_resize_changes_dimensions() {
        let input = solid_image(40, 20, [10, 20, 30]);
        for filter in [
            ResampleFilter::Nearest,
            ResampleFilter::Bilinear,
            ResampleFilter::Bicubic,
            ResampleFilter::Lanczos,
        ] {
            let output = resize(&input, 7, 3, filter);
            assert_eq!(output.dimensions(), (7, 3), "{filter} changed size wrongly");
        }
    }

    #[test]
    fn test_nearest_keeps_exact_colors() {
        let input = solid_image(9, 9, [255, 0, 0]);
        let output = resize(&input, 4, 5, ResampleFilter::Nearest);
        assert!(output.pixels().all(|p| p.0 == [255, 0, 0]));
    }
}
