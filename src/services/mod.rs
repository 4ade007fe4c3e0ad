pub mod atomic_writer;
pub mod decoder;
pub mod pipeline;

pub use atomic_writer::{stage, StagedFile};
pub use decoder::{decode_image, flatten_alpha};
pub use pipeline::{ConversionPipeline, ConversionReport, ConvertRequest};
