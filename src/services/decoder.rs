use std::path::Path;

use image::{DynamicImage, ImageDecoder, ImageReader, RgbImage, RgbaImage};

use crate::error::ConvertError;

/// Decode an image file to 8-bit RGB.
///
/// EXIF orientation is applied and transparent pixels are composited
/// against white.
pub fn decode_image(path: &Path) -> Result<RgbImage, ConvertError> {
    let decode_error = |message: String| ConvertError::ImageDecode {
        path: path.to_path_buf(),
        message,
    };

    // An unreadable source is a decode failure; IOError is for outputs
    let reader = ImageReader::open(path)
        .map_err(|e| decode_error(e.to_string()))?
        .with_guessed_format()
        .map_err(|e| decode_error(e.to_string()))?;
    let mut decoder = reader.into_decoder().map_err(|e| decode_error(e.to_string()))?;
    let orientation = decoder
        .orientation()
        .map_err(|e| decode_error(e.to_string()))?;
    let mut img = DynamicImage::from_decoder(decoder).map_err(|e| decode_error(e.to_string()))?;
    img.apply_orientation(orientation);

    if img.width() == 0 || img.height() == 0 {
        return Err(decode_error("image has no pixels".to_string()));
    }

    tracing::debug!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        color = ?img.color(),
        "Decoded image"
    );

    Ok(flatten_alpha(img))
}

/// Drop the alpha channel, compositing against white.
pub fn flatten_alpha(img: DynamicImage) -> RgbImage {
    if img.color().has_alpha() {
        composite_on_white(&img.into_rgba8())
    } else {
        img.into_rgb8()
    }
}

fn composite_on_white(rgba: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        match a {
            255 => image::Rgb([r, g, b]),
            0 => image::Rgb([255, 255, 255]),
            _ => {
                let af = a as u16;
                let blend = |c: u8| ((c as u16 * af + 255 * (255 - af)) / 255) as u8;
                image::Rgb([blend(r), blend(g), blend(b)])
            }
        }
    })
}
