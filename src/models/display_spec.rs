use epd7c_codec::{packed_len, PackingPolicy};

use crate::error::ConvertError;

/// Seven-color panels with known resolutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplaySpec {
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
}

impl DisplaySpec {
    /// 7.3" ACeP: 800x480
    pub const EPD_7IN3F: Self = Self {
        name: "7in3f",
        width: 800,
        height: 480,
    };

    /// 5.65" ACeP: 600x448
    pub const EPD_5IN65F: Self = Self {
        name: "5in65f",
        width: 600,
        height: 448,
    };

    /// 4.01" ACeP: 640x400
    pub const EPD_4IN01F: Self = Self {
        name: "4in01f",
        width: 640,
        height: 400,
    };

    pub const ALL: [Self; 3] = [Self::EPD_7IN3F, Self::EPD_5IN65F, Self::EPD_4IN01F];

    /// Look up a panel by name (case-insensitive).
    pub fn from_name(name: &str) -> Result<Self, ConvertError> {
        Self::ALL
            .iter()
            .find(|spec| spec.name.eq_ignore_ascii_case(name))
            .copied()
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|s| s.name).collect();
                ConvertError::Config(format!(
                    "unknown panel '{}' (expected one of {})",
                    name,
                    known.join(", ")
                ))
            })
    }

    /// Size of a full-screen packed frame in bytes.
    pub fn frame_bytes(&self) -> usize {
        // Both panel widths are even, so the policy cannot fail here
        packed_len(self.width as usize, self.height as usize, PackingPolicy::RowPadded)
            .unwrap_or(0)
    }

    /// Check requested dimensions against the panel.
    pub fn fits(&self, width: u32, height: u32) -> bool {
        width <= self.width && height <= self.height
    }
}

impl Default for DisplaySpec {
    fn default() -> Self {
        Self::EPD_7IN3F
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(DisplaySpec::from_name("7in3f").unwrap(), DisplaySpec::EPD_7IN3F);
        assert_eq!(DisplaySpec::from_name("5IN65F").unwrap(), DisplaySpec::EPD_5IN65F);
        assert_eq!(DisplaySpec::from_name("4in01f").unwrap(), DisplaySpec::EPD_4IN01F);
    }

    #[test]
    fn test_from_name_unknown() {
        let err = DisplaySpec::from_name("13in3").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: unknown panel '13in3' (expected one of 7in3f, 5in65f, 4in01f)"
        );
    }

    #[test]
    fn test_frame_bytes() {
        assert_eq!(DisplaySpec::EPD_7IN3F.frame_bytes(), 192_000);
        assert_eq!(DisplaySpec::EPD_5IN65F.frame_bytes(), 134_400);
        assert_eq!(DisplaySpec::EPD_4IN01F.frame_bytes(), 128_000);
    }

    #[test]
    fn test_fits() {
        let spec = DisplaySpec::default();
        assert!(spec.fits(800, 480));
        assert!(spec.fits(1, 1));
        assert!(!spec.fits(801, 480));
        assert!(!spec.fits(800, 481));
    }
}
