use std::path::{Path, PathBuf};
use std::str::FromStr;

use epd7c_codec::{
    Converter, LayoutMode, PackingPolicy, Palette, PaletteLayout, ResampleFilter, Rgb,
};
use serde::Deserialize;

use crate::error::ConvertError;
use crate::models::DisplaySpec;
use crate::rendering::header::{is_c_identifier, HeaderTarget, MAX_HEADER_DIMENSION};

/// Environment variable naming a YAML configuration file.
pub const CONFIG_FILE_ENV: &str = "CONFIG_FILE";

/// What to do when the requested size exceeds the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OversizePolicy {
    /// Fail with `InvalidDimension`
    #[default]
    Reject,
    /// Reduce to the maximum and log a warning
    Clamp,
}

impl OversizePolicy {
    pub fn name(self) -> &'static str {
        match self {
            OversizePolicy::Reject => "reject",
            OversizePolicy::Clamp => "clamp",
        }
    }
}

impl FromStr for OversizePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reject" => Ok(OversizePolicy::Reject),
            "clamp" => Ok(OversizePolicy::Clamp),
            other => Err(format!(
                "unknown oversize policy '{}' (expected reject or clamp)",
                other
            )),
        }
    }
}

/// Conversion configuration loaded from YAML.
///
/// Every key is optional:
///
/// ```yaml
/// width: 800
/// height: 480
/// mode: fit            # fit | crop | stretch
/// dither: true
/// resample: lanczos    # nearest | bilinear | bicubic | lanczos
/// palette: gxepd2      # gxepd2 | waveshare
/// orange: "#FF8000"
/// packing: row-padded  # row-padded | strict
/// target: arduino      # arduino | plain
/// array_name: image_data
/// panel: 7in3f         # 7in3f | 5in65f | 4in01f
/// oversize: reject     # reject | clamp
/// ```
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertConfig {
    pub width: i64,
    pub height: i64,
    pub mode: String,
    pub dither: bool,
    pub resample: String,
    pub palette: String,
    /// Calibrated ORANGE entry as hex
    pub orange: Option<String>,
    pub packing: String,
    pub target: HeaderTarget,
    pub array_name: String,
    /// Panel supplying the maximum dimensions
    pub panel: Option<String>,
    /// Explicit maximum, overriding the panel
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    pub oversize: OversizePolicy,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        let panel = DisplaySpec::default();
        Self {
            width: panel.width as i64,
            height: panel.height as i64,
            mode: LayoutMode::default().name().to_string(),
            dither: false,
            resample: ResampleFilter::default().name().to_string(),
            palette: PaletteLayout::default().name().to_string(),
            orange: None,
            packing: PackingPolicy::default().name().to_string(),
            target: HeaderTarget::default(),
            array_name: "image_data".to_string(),
            panel: None,
            max_width: None,
            max_height: None,
            oversize: OversizePolicy::default(),
        }
    }
}

/// Command-line values that replace configuration fields when present.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub mode: Option<String>,
    pub dither: Option<bool>,
    pub resample: Option<String>,
    pub palette: Option<String>,
    pub orange: Option<String>,
    pub packing: Option<String>,
    pub target: Option<HeaderTarget>,
    pub array_name: Option<String>,
    pub panel: Option<String>,
    pub oversize: Option<OversizePolicy>,
}

impl ConvertConfig {
    /// Parse a YAML document.
    pub fn from_yaml(content: &str) -> Result<Self, ConvertError> {
        serde_yaml::from_str(content).map_err(|e| ConvertError::Config(e.to_string()))
    }

    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConvertError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConvertError::io(path, e))?;
        let config = Self::from_yaml(&content).map_err(|e| match e {
            ConvertError::Config(msg) => {
                ConvertError::Config(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })?;
        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load from `explicit`, else from `$CONFIG_FILE`, else use defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConvertError> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_FILE_ENV).map(PathBuf::from));
        match path {
            Some(path) => Self::load(&path),
            None => {
                tracing::debug!("No configuration file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Replace fields with the values present in `overrides`.
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(width) = overrides.width {
            self.width = width;
        }
        if let Some(height) = overrides.height {
            self.height = height;
        }
        if let Some(mode) = overrides.mode {
            self.mode = mode;
        }
        if let Some(dither) = overrides.dither {
            self.dither = dither;
        }
        if let Some(resample) = overrides.resample {
            self.resample = resample;
        }
        if let Some(palette) = overrides.palette {
            self.palette = palette;
        }
        if overrides.orange.is_some() {
            self.orange = overrides.orange;
        }
        if let Some(packing) = overrides.packing {
            self.packing = packing;
        }
        if let Some(target) = overrides.target {
            self.target = target;
        }
        if let Some(array_name) = overrides.array_name {
            self.array_name = array_name;
        }
        if overrides.panel.is_some() {
            self.panel = overrides.panel;
        }
        if let Some(oversize) = overrides.oversize {
            self.oversize = oversize;
        }
    }

    /// Largest accepted canvas, from `panel` unless `max_width`/`max_height`
    /// override it. Maxima beyond what the header's `uint16_t` constants can
    /// hold are rejected.
    pub fn max_dimensions(&self) -> Result<DisplaySpec, ConvertError> {
        let panel = match &self.panel {
            Some(name) => DisplaySpec::from_name(name)?,
            None => DisplaySpec::default(),
        };
        let bound = DisplaySpec {
            width: self.max_width.unwrap_or(panel.width),
            height: self.max_height.unwrap_or(panel.height),
            ..panel
        };
        if bound.width > MAX_HEADER_DIMENSION || bound.height > MAX_HEADER_DIMENSION {
            return Err(ConvertError::Config(format!(
                "maximum {}x{} exceeds the header limit of {} per side",
                bound.width, bound.height, MAX_HEADER_DIMENSION
            )));
        }
        Ok(bound)
    }

    /// Build the palette for the configured layout and orange override.
    pub fn build_palette(&self) -> Result<Palette, ConvertError> {
        let layout: PaletteLayout = self.palette.parse()?;
        let palette = Palette::new(layout);
        match &self.orange {
            Some(hex) => {
                let orange: Rgb = hex
                    .parse()
                    .map_err(|e| ConvertError::Config(format!("orange '{}': {}", hex, e)))?;
                Ok(palette.with_orange(orange)?)
            }
            None => Ok(palette),
        }
    }

    /// Validate everything and produce the settings for one conversion.
    pub fn resolve(&self) -> Result<ConversionSettings, ConvertError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConvertError::InvalidDimension {
                width: self.width,
                height: self.height,
                reason: "width and height must be > 0".to_string(),
            });
        }

        let bound = self.max_dimensions()?;
        let requested = |v: i64| u32::try_from(v).unwrap_or(u32::MAX);
        let (mut width, mut height) = (requested(self.width), requested(self.height));
        if !bound.fits(width, height) {
            match self.oversize {
                OversizePolicy::Reject => {
                    return Err(ConvertError::InvalidDimension {
                        width: self.width,
                        height: self.height,
                        reason: format!("exceeds maximum {}x{}", bound.width, bound.height),
                    });
                }
                OversizePolicy::Clamp => {
                    tracing::warn!(
                        requested_width = self.width,
                        requested_height = self.height,
                        max_width = bound.width,
                        max_height = bound.height,
                        "Requested size exceeds maximum, clamping"
                    );
                    width = width.min(bound.width);
                    height = height.min(bound.height);
                }
            }
        }

        let mode: LayoutMode = self.mode.parse().map_err(ConvertError::Config)?;
        let filter: ResampleFilter = self.resample.parse().map_err(ConvertError::Config)?;
        let packing: PackingPolicy = self.packing.parse().map_err(ConvertError::Config)?;
        let palette = self.build_palette()?;

        if !is_c_identifier(&self.array_name) {
            return Err(ConvertError::Config(format!(
                "array name '{}' is not a valid C identifier",
                self.array_name
            )));
        }

        Ok(ConversionSettings {
            width,
            height,
            mode,
            dither: self.dither,
            filter,
            palette,
            packing,
            target: self.target,
            array_name: self.array_name.clone(),
        })
    }
}

/// Validated, immutable settings for one conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionSettings {
    pub width: u32,
    pub height: u32,
    pub mode: LayoutMode,
    pub dither: bool,
    pub filter: ResampleFilter,
    pub palette: Palette,
    pub packing: PackingPolicy,
    pub target: HeaderTarget,
    pub array_name: String,
}

impl ConversionSettings {
    /// Codec converter configured with these settings.
    pub fn converter(&self) -> Converter {
        Converter::new(self.palette.clone())
            .size(self.width, self.height)
            .mode(self.mode)
            .filter(self.filter)
            .dither(self.dither)
            .packing(self.packing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use epd7c_codec::NamedColor;

    #[test]
    fn test_default_config() {
        let config = ConvertConfig::default();
        assert_eq!((config.width, config.height), (800, 480));
        assert_eq!(config.mode, "fit");
        assert!(!config.dither);
        assert_eq!(config.resample, "lanczos");
        assert_eq!(config.palette, "gxepd2");
        assert_eq!(config.packing, "row-padded");
        assert_eq!(config.target, HeaderTarget::Arduino);
        assert_eq!(config.array_name, "image_data");
        assert_eq!(config.oversize, OversizePolicy::Reject);
    }

    #[test]
    fn test_default_resolves() {
        let settings = ConvertConfig::default().resolve().unwrap();
        assert_eq!((settings.width, settings.height), (800, 480));
        assert_eq!(settings.mode, LayoutMode::Fit);
        assert_eq!(settings.filter, ResampleFilter::Lanczos);
        assert_eq!(settings.packing, PackingPolicy::RowPadded);
        assert_eq!(settings.palette, Palette::gxepd2());
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r##"
width: 600
height: 448
mode: crop
dither: true
resample: bicubic
palette: waveshare
orange: "#FF9900"
packing: strict
target: plain
array_name: splash
panel: 5in65f
"##;
        let config = ConvertConfig::from_yaml(yaml).unwrap();
        let settings = config.resolve().unwrap();
        assert_eq!((settings.width, settings.height), (600, 448));
        assert_eq!(settings.mode, LayoutMode::Crop);
        assert!(settings.dither);
        assert_eq!(settings.filter, ResampleFilter::Bicubic);
        assert_eq!(settings.palette.layout(), PaletteLayout::Waveshare);
        assert_eq!(
            settings.palette.color(settings.palette.index_of(NamedColor::Orange) as usize),
            Rgb::new(255, 153, 0)
        );
        assert_eq!(settings.packing, PackingPolicy::Strict);
        assert_eq!(settings.target, HeaderTarget::Plain);
        assert_eq!(settings.array_name, "splash");
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let config = ConvertConfig::from_yaml("dither: true\n").unwrap();
        assert!(config.dither);
        assert_eq!(config.width, 800);
        assert_eq!(config.mode, "fit");
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = ConvertConfig::from_yaml("dithering: true\n").unwrap_err();
        assert!(matches!(err, ConvertError::Config(_)));
    }

    #[test]
    fn test_overrides_replace_fields() {
        let mut config = ConvertConfig::default();
        config.apply(ConfigOverrides {
            width: Some(400),
            mode: Some("stretch".to_string()),
            dither: Some(true),
            ..Default::default()
        });
        assert_eq!(config.width, 400);
        assert_eq!(config.height, 480);
        assert_eq!(config.mode, "stretch");
        assert!(config.dither);
    }

    #[test]
    fn test_non_positive_dimension_rejected() {
        for (width, height) in [(0, 480), (800, 0), (-1, 480)] {
            let config = ConvertConfig {
                width,
                height,
                ..Default::default()
            };
            match config.resolve().unwrap_err() {
                ConvertError::InvalidDimension {
                    width: w,
                    height: h,
                    ..
                } => assert_eq!((w, h), (width, height)),
                other => panic!("Expected InvalidDimension, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_oversize_rejected() {
        let config = ConvertConfig {
            width: 1024,
            ..Default::default()
        };
        let err = config.resolve().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid dimensions 1024x480: exceeds maximum 800x480"
        );
    }

    #[test]
    fn test_oversize_clamped() {
        let config = ConvertConfig {
            width: 1024,
            height: 1024,
            panel: Some("4in01f".to_string()),
            oversize: OversizePolicy::Clamp,
            ..Default::default()
        };
        let settings = config.resolve().unwrap();
        assert_eq!((settings.width, settings.height), (640, 400));
    }

    #[test]
    fn test_explicit_max_overrides_panel() {
        let config = ConvertConfig {
            width: 1200,
            height: 825,
            max_width: Some(1200),
            max_height: Some(825),
            ..Default::default()
        };
        assert!(config.resolve().is_ok());
    }

    #[test]
    fn test_max_beyond_header_limit_is_config_error() {
        let config = ConvertConfig {
            width: 70_000,
            height: 10,
            max_width: Some(70_000),
            max_height: Some(480),
            ..Default::default()
        };
        let err = config.resolve().unwrap_err();
        assert_eq!(err.kind(), "ConfigError");
        assert!(err.to_string().contains("65535"));
    }

    #[test]
    fn test_max_at_header_limit_is_accepted() {
        let config = ConvertConfig {
            width: 65_535,
            height: 1,
            max_width: Some(65_535),
            ..Default::default()
        };
        let settings = config.resolve().unwrap();
        assert_eq!((settings.width, settings.height), (65_535, 1));
    }

    #[test]
    fn test_max_dimensions_follow_panel() {
        let config = ConvertConfig {
            panel: Some("5in65f".to_string()),
            max_height: Some(300),
            ..Default::default()
        };
        let bound = config.max_dimensions().unwrap();
        assert_eq!((bound.width, bound.height), (600, 300));
    }

    #[test]
    fn test_invalid_mode_is_config_error() {
        let config = ConvertConfig {
            mode: "zoom".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.resolve(), Err(ConvertError::Config(_))));
    }

    #[test]
    fn test_unknown_palette_layout() {
        let config = ConvertConfig {
            palette: "inky".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.resolve(), Err(ConvertError::Palette(_))));
    }

    #[test]
    fn test_orange_duplicate_rejected() {
        let config = ConvertConfig {
            orange: Some("#FFFF00".to_string()),
            ..Default::default()
        };
        assert!(matches!(config.resolve(), Err(ConvertError::Palette(_))));
    }

    #[test]
    fn test_bad_orange_hex() {
        let config = ConvertConfig {
            orange: Some("orange".to_string()),
            ..Default::default()
        };
        assert!(matches!(config.resolve(), Err(ConvertError::Config(_))));
    }

    #[test]
    fn test_invalid_array_name() {
        let config = ConvertConfig {
            array_name: "my-image".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.resolve(), Err(ConvertError::Config(_))));
    }

    #[test]
    fn test_load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConvertConfig::load(&dir.path().join("missing.yaml")).unwrap_err();
        assert_eq!(err.kind(), "IOError");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("epd7c.yaml");
        std::fs::write(&path, "width: 320\nheight: 240\n").unwrap();
        let config = ConvertConfig::load(&path).unwrap();
        assert_eq!((config.width, config.height), (320, 240));
    }

    #[test]
    fn test_oversize_from_str() {
        assert_eq!("clamp".parse(), Ok(OversizePolicy::Clamp));
        assert_eq!("REJECT".parse(), Ok(OversizePolicy::Reject));
        assert!("shrink".parse::<OversizePolicy>().is_err());
    }

    #[test]
    fn test_converter_uses_settings() {
        let settings = ConvertConfig {
            width: 10,
            height: 6,
            ..Default::default()
        }
        .resolve()
        .unwrap();
        assert_eq!(settings.converter().dimensions(), (10, 6));
    }
}
