use std::fmt::Write;

use epd7c_codec::Palette;

/// Index table for firmware authors checking the wire order.
pub fn palette_table(palette: &Palette) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Palette layout: {}", palette.layout());
    let _ = writeln!(out, "Index  Name     RGB");
    for (idx, name, color) in palette.iter() {
        let _ = writeln!(
            out,
            "  {}    {:<7}  {}  ({}, {}, {})",
            idx,
            name.name(),
            color,
            color.r,
            color.g,
            color.b
        );
    }
    out
}
