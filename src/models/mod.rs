pub mod config;
pub mod display_spec;

pub use config::{
    ConfigOverrides, ConversionSettings, ConvertConfig, OversizePolicy, CONFIG_FILE_ENV,
};
pub use display_spec::DisplaySpec;
