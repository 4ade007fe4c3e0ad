use std::path::PathBuf;

use epd7c_codec::{CodecError, PaletteError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Invalid dimensions {width}x{height}: {reason}")]
    InvalidDimension {
        width: i64,
        height: i64,
        reason: String,
    },

    #[error("Failed to decode {}: {message}", path.display())]
    ImageDecode { path: PathBuf, message: String },

    #[error("Packing error: {0}")]
    Packing(String),

    #[error("Palette error: {0}")]
    Palette(#[from] PaletteError),

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),
}

impl ConvertError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }

    /// Short name of the error kind, used in the CLI failure report.
    pub fn kind(&self) -> &'static str {
        match self {
            ConvertError::InvalidDimension { .. } => "InvalidDimension",
            ConvertError::ImageDecode { .. } => "ImageDecodeError",
            ConvertError::Packing(_) => "PackingError",
            ConvertError::Palette(_) => "PaletteError",
            ConvertError::Io { .. } => "IOError",
            ConvertError::Config(_) => "ConfigError",
            ConvertError::PngEncode(_) => "PngEncodeError",
        }
    }
}

impl From<CodecError> for ConvertError {
    fn from(e: CodecError) -> Self {
        match e {
            CodecError::InvalidDimension {
                stage,
                width,
                height,
            } => ConvertError::InvalidDimension {
                width: width as i64,
                height: height as i64,
                reason: format!("{} requires width and height > 0", stage),
            },
            CodecError::Packing { .. } => ConvertError::Packing(e.to_string()),
            CodecError::Palette(p) => ConvertError::Palette(p),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use epd7c_codec::{pack, PackingPolicy, Stage};

    #[test]
    fn test_invalid_dimension_message() {
        let error = ConvertError::InvalidDimension {
            width: -5,
            height: 480,
            reason: "width and height must be > 0".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid dimensions -5x480: width and height must be > 0"
        );
        assert_eq!(error.kind(), "InvalidDimension");
    }

    #[test]
    fn test_image_decode_message() {
        let error = ConvertError::ImageDecode {
            path: PathBuf::from("photo.jpg"),
            message: "unexpected end of file".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to decode photo.jpg: unexpected end of file"
        );
        assert_eq!(error.kind(), "ImageDecodeError");
    }

    #[test]
    fn test_io_message() {
        let error = ConvertError::io(
            "out/image.h",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(error.to_string(), "IO error on out/image.h: denied");
        assert_eq!(error.kind(), "IOError");
    }

    #[test]
    fn test_config_message() {
        let error = ConvertError::Config("unknown layout mode 'zoom'".to_string());
        assert_eq!(
            error.to_string(),
            "Configuration error: unknown layout mode 'zoom'"
        );
    }

    #[test]
    fn test_from_codec_packing_error() {
        let codec = pack(&[0, 1, 2], 3, 1, PackingPolicy::Strict).unwrap_err();
        let error: ConvertError = codec.into();
        match &error {
            ConvertError::Packing(msg) => assert!(msg.starts_with("packer: ")),
            other => panic!("Expected Packing variant, got {other:?}"),
        }
        assert_eq!(error.kind(), "PackingError");
    }

    #[test]
    fn test_from_codec_invalid_dimension() {
        let codec = CodecError::InvalidDimension {
            stage: Stage::Compositor,
            width: 0,
            height: 10,
        };
        let error: ConvertError = codec.into();
        assert_eq!(
            error.to_string(),
            "Invalid dimensions 0x10: compositor requires width and height > 0"
        );
    }
}
