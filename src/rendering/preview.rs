use std::io::Cursor;

use epd7c_codec::{pack, IndexBuffer, PackingPolicy, Palette};

use crate::error::ConvertError;

/// Encode quantized indices as a 4-bit indexed PNG using the palette colors.
///
/// PNG row data for 4-bit images is the same high-nibble-first, row-padded
/// layout the panel uses, so the packed stream is written as-is.
pub fn encode_preview_png(indices: &IndexBuffer, palette: &Palette) -> Result<Vec<u8>, ConvertError> {
    let packed = pack(
        indices.indices(),
        indices.width(),
        indices.height(),
        PackingPolicy::RowPadded,
    )?;
    let plte: Vec<u8> = palette
        .colors()
        .iter()
        .flat_map(|color| color.to_bytes())
        .collect();

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder =
            png::Encoder::new(&mut buf, indices.width() as u32, indices.height() as u32);
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(png::BitDepth::Four);
        encoder.set_compression(png::Compression::Fast);
        encoder.set_palette(plte);
        let mut writer = encoder
            .write_header()
            .map_err(|e| ConvertError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(&packed)
            .map_err(|e| ConvertError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}
