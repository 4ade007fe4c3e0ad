//! C header emission for the packed buffer.
//!
//! ```text
//! // Auto-generated for a 7-color e-paper panel (4bpp packed: 2 pixels per byte)
//! // Source: photo.jpg
//! // Size: 800x480, 192000 bytes, row-padded packing, gxepd2 palette
//!
//! #pragma once
//! #include <Arduino.h>
//!
//! const uint16_t IMAGE_W = 800;
//! const uint16_t IMAGE_H = 480;
//!
//! const uint8_t image_data[] PROGMEM = {
//!   0x00, 0x11, ...,
//! };
//! ```

use std::fmt::{self, Write};
use std::str::FromStr;

use epd7c_codec::{PackingPolicy, PaletteLayout};
use serde::Deserialize;

/// Bytes per line of the array literal.
pub const BYTES_PER_LINE: usize = 16;

/// Largest width or height `IMAGE_W`/`IMAGE_H` can hold (`uint16_t`).
pub const MAX_HEADER_DIMENSION: u32 = u16::MAX as u32;

/// Toolchain the header is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderTarget {
    /// `#include <Arduino.h>`, array placed in flash with `PROGMEM`.
    #[default]
    Arduino,
    /// `#include <stdint.h>`, plain `const` array.
    Plain,
}

impl HeaderTarget {
    pub fn name(self) -> &'static str {
        match self {
            HeaderTarget::Arduino => "arduino",
            HeaderTarget::Plain => "plain",
        }
    }

    fn include(self) -> &'static str {
        match self {
            HeaderTarget::Arduino => "#include <Arduino.h>",
            HeaderTarget::Plain => "#include <stdint.h>",
        }
    }

    fn storage_attribute(self) -> &'static str {
        match self {
            HeaderTarget::Arduino => " PROGMEM",
            HeaderTarget::Plain => "",
        }
    }
}

impl fmt::Display for HeaderTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HeaderTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "arduino" => Ok(HeaderTarget::Arduino),
            "plain" | "c" => Ok(HeaderTarget::Plain),
            other => Err(format!(
                "unknown header target '{}' (expected arduino or plain)",
                other
            )),
        }
    }
}

/// Metadata written into the header comment and constants.
#[derive(Debug, Clone)]
pub struct HeaderInfo<'a> {
    pub source_name: &'a str,
    pub width: usize,
    pub height: usize,
    pub packing: PackingPolicy,
    pub layout: PaletteLayout,
}

/// Renders packed bytes as a C array literal.
#[derive(Debug, Clone)]
pub struct HeaderEmitter {
    target: HeaderTarget,
    array_name: String,
}

impl HeaderEmitter {
    pub fn new(target: HeaderTarget, array_name: impl Into<String>) -> Self {
        Self {
            target,
            array_name: array_name.into(),
        }
    }

    pub fn render(&self, info: &HeaderInfo<'_>, bytes: &[u8]) -> String {
        // Six characters per byte ("0xHH, ") plus indentation per line
        let mut out = String::with_capacity(bytes.len() * 6 + 1024);

        // Writing into a String cannot fail
        let _ = writeln!(
            out,
            "// Auto-generated for a 7-color e-paper panel (4bpp packed: 2 pixels per byte)"
        );
        let _ = writeln!(out, "// Source: {}", info.source_name);
        let _ = writeln!(
            out,
            "// Size: {}x{}, {} bytes, {} packing, {} palette",
            info.width,
            info.height,
            bytes.len(),
            info.packing,
            info.layout
        );
        out.push('\n');

        out.push_str("#pragma once\n");
        out.push_str(self.target.include());
        out.push_str("\n\n");

        let _ = writeln!(out, "const uint16_t IMAGE_W = {};", info.width);
        let _ = writeln!(out, "const uint16_t IMAGE_H = {};", info.height);
        out.push('\n');

        let _ = writeln!(
            out,
            "const uint8_t {}[]{} = {{",
            self.array_name,
            self.target.storage_attribute()
        );
        write_byte_lines(&mut out, bytes);
        out.push_str("};\n\n");

        match self.target {
            HeaderTarget::Arduino => {
                let _ = writeln!(
                    out,
                    "// Use with: display.drawNative({}, 0, 0, 0, IMAGE_W, IMAGE_H, false, false, true);",
                    self.array_name
                );
            }
            HeaderTarget::Plain => {
                out.push_str(
                    "// Layout: row-major, high nibble = even x, low nibble = odd x\n",
                );
            }
        }

        out
    }
}

/// Append `0xHH, ` entries, [`BYTES_PER_LINE`] per line, each line indented
/// by two spaces and ending with a trailing comma.
pub fn write_byte_lines(out: &mut String, bytes: &[u8]) {
    for chunk in bytes.chunks(BYTES_PER_LINE) {
        out.push_str("  ");
        for (i, byte) in chunk.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "0x{:02X}", byte);
        }
        out.push_str(",\n");
    }
}

/// Whether `name` can be used as a C identifier.
pub fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
