//! Quantized output: index buffers and their packed form.

mod index_buffer;
mod packed;

pub use index_buffer::IndexBuffer;
pub use packed::{pack, packed_len, row_stride, unpack, PackedBuffer, PackingPolicy};
