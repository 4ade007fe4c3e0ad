pub mod header;
pub mod palette_table;
pub mod preview;

pub use header::{HeaderEmitter, HeaderInfo, HeaderTarget};
pub use palette_table::palette_table;
pub use preview::encode_preview_png;
