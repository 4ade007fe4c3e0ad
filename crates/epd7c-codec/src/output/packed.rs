//! 4-bit nibble packing of palette indices.
//!
//! Two pixels share one byte: the first pixel of a pair goes in the high
//! nibble, the second in the low nibble. Pairs never span rows.
//!
//! ```text
//! row-padded, width 3:   | p0 p1 | p2 0 |   per row: ceil(w / 2) bytes
//! strict, width 4:       | p0 p1 | p2 p3 |  odd widths are rejected
//! ```

use std::fmt;
use std::str::FromStr;

use crate::api::{CodecError, Stage};
use crate::palette::PALETTE_SIZE;

const MAX_INDEX: u8 = PALETTE_SIZE as u8 - 1;

/// Rule for rows with an odd number of pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackingPolicy {
    /// Each row starts on a byte boundary; an odd trailing pixel sits in the
    /// high nibble of its own byte with a zero low nibble.
    #[default]
    RowPadded,
    /// Only even widths are accepted.
    Strict,
}

impl PackingPolicy {
    pub fn name(self) -> &'static str {
        match self {
            PackingPolicy::RowPadded => "row-padded",
            PackingPolicy::Strict => "strict",
        }
    }

    fn check_width(self, stage: Stage, width: usize) -> Result<(), CodecError> {
        if self == PackingPolicy::Strict && width % 2 != 0 {
            return Err(CodecError::packing(
                stage,
                format!("strict packing requires an even width, got {}", width),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for PackingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PackingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "row-padded" | "row_padded" | "padded" => Ok(PackingPolicy::RowPadded),
            "strict" | "even" => Ok(PackingPolicy::Strict),
            other => Err(format!(
                "unknown packing policy '{}' (expected row-padded or strict)",
                other
            )),
        }
    }
}

/// Bytes per packed row.
#[inline]
pub fn row_stride(width: usize) -> usize {
    width.div_ceil(2)
}

/// Expected packed length for the given dimensions and policy.
///
/// # Errors
///
/// [`CodecError::Packing`] for a zero dimension, or an odd width under
/// [`PackingPolicy::Strict`].
pub fn packed_len(width: usize, height: usize, policy: PackingPolicy) -> Result<usize, CodecError> {
    check_dimensions(Stage::Packer, width, height)?;
    policy.check_width(Stage::Packer, width)?;
    Ok(row_stride(width) * height)
}

fn check_dimensions(stage: Stage, width: usize, height: usize) -> Result<(), CodecError> {
    if width == 0 || height == 0 {
        return Err(CodecError::packing(
            stage,
            format!("width and height must be > 0, got {}x{}", width, height),
        ));
    }
    Ok(())
}

/// Pack row-major palette indices two per byte.
///
/// # Errors
///
/// [`CodecError::Packing`] if a dimension is zero, the buffer length is not
/// `width * height`, an index exceeds 6, or the width is odd under
/// [`PackingPolicy::Strict`].
///
/// # Example
///
/// ```
/// use epd7c_codec::{pack, PackingPolicy};
///
/// let packed = pack(&[0, 1, 2], 3, 1, PackingPolicy::RowPadded).unwrap();
/// assert_eq!(packed, vec![0x01, 0x20]);
/// ```
pub fn pack(
    indices: &[u8],
    width: usize,
    height: usize,
    policy: PackingPolicy,
) -> Result<Vec<u8>, CodecError> {
    let len = packed_len(width, height, policy)?;
    if indices.len() != width * height {
        return Err(CodecError::packing(
            Stage::Packer,
            format!(
                "index buffer holds {} entries, expected {}x{} = {}",
                indices.len(),
                width,
                height,
                width * height
            ),
        ));
    }
    if let Some(pos) = indices.iter().position(|&i| i > MAX_INDEX) {
        return Err(CodecError::packing(
            Stage::Packer,
            format!(
                "index {} at pixel ({}, {}) is outside 0..={}",
                indices[pos],
                pos % width,
                pos / width,
                MAX_INDEX
            ),
        ));
    }

    let mut packed = Vec::with_capacity(len);
    for row in indices.chunks(width) {
        for pair in row.chunks(2) {
            let high = pair[0] << 4;
            let low = pair.get(1).copied().unwrap_or(0);
            packed.push(high | low);
        }
    }

    debug_assert_eq!(packed.len(), len);
    Ok(packed)
}

/// Inverse of [`pack`].
///
/// The low nibble padding an odd row is not read.
///
/// # Errors
///
/// [`CodecError::Packing`] if a dimension is zero, the byte length does not
/// match [`packed_len`], or a pixel nibble exceeds 6.
pub fn unpack(
    packed: &[u8],
    width: usize,
    height: usize,
    policy: PackingPolicy,
) -> Result<Vec<u8>, CodecError> {
    check_dimensions(Stage::Unpacker, width, height)?;
    policy.check_width(Stage::Unpacker, width)?;
    let stride = row_stride(width);
    let expected = stride * height;
    if packed.len() != expected {
        return Err(CodecError::packing(
            Stage::Unpacker,
            format!(
                "packed buffer holds {} bytes, expected {} for {}x{} ({})",
                packed.len(),
                expected,
                width,
                height,
                policy
            ),
        ));
    }

    let mut indices = Vec::with_capacity(width * height);
    for (y, row) in packed.chunks(stride).enumerate() {
        for x in 0..width {
            let byte = row[x / 2];
            let idx = if x % 2 == 0 { byte >> 4 } else { byte & 0x0F };
            if idx > MAX_INDEX {
                return Err(CodecError::packing(
                    Stage::Unpacker,
                    format!(
                        "nibble {} at pixel ({}, {}) is outside 0..={}",
                        idx, x, y, MAX_INDEX
                    ),
                ));
            }
            indices.push(idx);
        }
    }
    Ok(indices)
}

/// Packed output together with the geometry needed to interpret it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBuffer {
    bytes: Vec<u8>,
    width: usize,
    height: usize,
    policy: PackingPolicy,
}

impl PackedBuffer {
    /// Wrap already packed bytes after checking their length.
    pub fn new(
        bytes: Vec<u8>,
        width: usize,
        height: usize,
        policy: PackingPolicy,
    ) -> Result<Self, CodecError> {
        let expected = packed_len(width, height, policy)?;
        if bytes.len() != expected {
            return Err(CodecError::packing(
                Stage::Packer,
                format!(
                    "packed buffer holds {} bytes, expected {}",
                    bytes.len(),
                    expected
                ),
            ));
        }
        Ok(Self {
            bytes,
            width,
            height,
            policy,
        })
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn policy(&self) -> PackingPolicy {
        self.policy
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Decode back to one index per pixel.
    pub fn unpack(&self) -> Result<Vec<u8>, CodecError> {
        unpack(&self.bytes, self.width, self.height, self.policy)
    }
}
