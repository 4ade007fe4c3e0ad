use std::fmt;
use std::path::{Path, PathBuf};

use epd7c_codec::{Conversion, NamedColor, PALETTE_SIZE};
use image::RgbImage;

use crate::error::ConvertError;
use crate::models::ConversionSettings;
use crate::rendering::{encode_preview_png, HeaderEmitter, HeaderInfo};
use crate::services::{decode_image, stage};

/// Output locations for one conversion.
#[derive(Debug, Clone)]
pub struct ConvertRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub preview: Option<PathBuf>,
}

/// Summary of a finished conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionReport {
    pub output: PathBuf,
    pub width: usize,
    pub height: usize,
    pub bytes: usize,
    /// Pixel count per palette entry, in index order
    pub histogram: Vec<(u8, NamedColor, usize)>,
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Wrote {} ({}x{}, {} bytes)",
            self.output.display(),
            self.width,
            self.height,
            self.bytes
        )?;
        let total = (self.width * self.height).max(1);
        for (idx, name, count) in &self.histogram {
            writeln!(
                f,
                "  {} {:<7} {:>8} px  {:>5.1}%",
                idx,
                name.name(),
                count,
                *count as f64 * 100.0 / total as f64
            )?;
        }
        Ok(())
    }
}

/// Decode, convert and write one image.
pub struct ConversionPipeline {
    settings: ConversionSettings,
}

impl ConversionPipeline {
    pub fn new(settings: ConversionSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ConversionSettings {
        &self.settings
    }

    /// Run the codec on an already decoded image.
    pub fn convert_image(&self, image: &RgbImage) -> Result<Conversion, ConvertError> {
        let settings = &self.settings;
        let converter = settings.converter();

        let canvas = converter.compose(image)?;
        tracing::info!(
            width = canvas.width(),
            height = canvas.height(),
            mode = %settings.mode,
            filter = %settings.filter,
            "Composited canvas"
        );

        let indices = converter.quantize(&canvas);
        tracing::info!(dither = settings.dither, "Quantized to palette");

        let conversion = converter.pack(indices)?;
        tracing::info!(
            bytes = conversion.packed().len(),
            packing = %settings.packing,
            "Packed indices"
        );
        Ok(conversion)
    }

    /// Render the header text for a conversion.
    pub fn render_header(&self, conversion: &Conversion, source_name: &str) -> String {
        let emitter = HeaderEmitter::new(self.settings.target, self.settings.array_name.clone());
        emitter.render(
            &HeaderInfo {
                source_name,
                width: conversion.width(),
                height: conversion.height(),
                packing: self.settings.packing,
                layout: self.settings.palette.layout(),
            },
            conversion.packed().bytes(),
        )
    }

    /// Full run: decode the input, convert, write the header and optional
    /// preview. Existing outputs are only replaced once every stage
    /// succeeded and both files are fully written.
    pub fn run(&self, request: &ConvertRequest) -> Result<ConversionReport, ConvertError> {
        let image = decode_image(&request.input)?;
        tracing::info!(
            path = %request.input.display(),
            width = image.width(),
            height = image.height(),
            "Decoded input"
        );

        let conversion = self.convert_image(&image)?;
        let header = self.render_header(&conversion, &source_name(&request.input));
        let preview = match &request.preview {
            Some(_) => Some(encode_preview_png(
                conversion.indices(),
                &self.settings.palette,
            )?),
            None => None,
        };

        // Both files are staged before either destination is replaced
        let staged_header = stage(&request.output, header.as_bytes())?;
        let staged_preview = match (&request.preview, preview) {
            (Some(path), Some(png)) => Some(stage(path, &png)?),
            _ => None,
        };

        if let Some(staged) = staged_preview {
            let path = staged.path().to_path_buf();
            staged.commit()?;
            tracing::info!(path = %path.display(), "Wrote preview");
        }
        staged_header.commit()?;
        tracing::info!(path = %request.output.display(), "Wrote header");

        Ok(self.report(&conversion, &request.output))
    }

    fn report(&self, conversion: &Conversion, output: &Path) -> ConversionReport {
        let counts = conversion.indices().histogram();
        let histogram = self
            .settings
            .palette
            .iter()
            .map(|(idx, name, _)| (idx, name, counts[idx as usize]))
            .collect::<Vec<_>>();
        debug_assert_eq!(histogram.len(), PALETTE_SIZE);

        ConversionReport {
            output: output.to_path_buf(),
            width: conversion.width(),
            height: conversion.height(),
            bytes: conversion.packed().len(),
            histogram,
        }
    }
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
