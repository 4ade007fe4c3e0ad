//! The fixed 7-color palette and its nearest-color search.
//!
//! Palette order is part of the wire contract: the packed indices are read
//! by panel firmware that maps index values to panel color codes. Two
//! orders are in circulation, so the order is an explicit
//! [`PaletteLayout`] rather than an implicit constant.

use std::fmt;
use std::str::FromStr;

use super::error::PaletteError;
use crate::color::Rgb;

/// Number of entries in every palette.
pub const PALETTE_SIZE: usize = 7;

/// The seven colors a 7-color e-paper panel can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedColor {
    White,
    Black,
    Red,
    Green,
    Blue,
    Yellow,
    Orange,
}

impl NamedColor {
    /// Upper-case name, as used in generated comments.
    pub fn name(self) -> &'static str {
        match self {
            NamedColor::White => "WHITE",
            NamedColor::Black => "BLACK",
            NamedColor::Red => "RED",
            NamedColor::Green => "GREEN",
            NamedColor::Blue => "BLUE",
            NamedColor::Yellow => "YELLOW",
            NamedColor::Orange => "ORANGE",
        }
    }

    /// Nominal RGB value. Orange has no single nominal value and is
    /// resolved by the layout.
    fn nominal(self, orange: Rgb) -> Rgb {
        match self {
            NamedColor::White => Rgb::WHITE,
            NamedColor::Black => Rgb::BLACK,
            NamedColor::Red => Rgb::new(255, 0, 0),
            NamedColor::Green => Rgb::new(0, 255, 0),
            NamedColor::Blue => Rgb::new(0, 0, 255),
            NamedColor::Yellow => Rgb::new(255, 255, 0),
            NamedColor::Orange => orange,
        }
    }
}

impl fmt::Display for NamedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Index order of the palette as seen by the firmware.
///
/// | index | `GxEpd2` | `Waveshare` |
/// |-------|----------|-------------|
/// | 0     | WHITE    | BLACK       |
/// | 1     | BLACK    | WHITE       |
/// | 2     | RED      | GREEN       |
/// | 3     | GREEN    | BLUE        |
/// | 4     | BLUE     | RED         |
/// | 5     | YELLOW   | YELLOW      |
/// | 6     | ORANGE   | ORANGE      |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaletteLayout {
    /// GxEPD2 `drawNative` order, orange `(255, 128, 0)`.
    #[default]
    GxEpd2,
    /// Waveshare driver order, orange `(255, 165, 0)`.
    Waveshare,
}

impl PaletteLayout {
    /// Colors in index order.
    pub fn order(self) -> [NamedColor; PALETTE_SIZE] {
        use NamedColor::*;
        match self {
            PaletteLayout::GxEpd2 => [White, Black, Red, Green, Blue, Yellow, Orange],
            PaletteLayout::Waveshare => [Black, White, Green, Blue, Red, Yellow, Orange],
        }
    }

    /// The orange value this layout ships with.
    pub fn default_orange(self) -> Rgb {
        match self {
            PaletteLayout::GxEpd2 => Rgb::new(255, 128, 0),
            PaletteLayout::Waveshare => Rgb::new(255, 165, 0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PaletteLayout::GxEpd2 => "gxepd2",
            PaletteLayout::Waveshare => "waveshare",
        }
    }
}

impl fmt::Display for PaletteLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaletteLayout {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gxepd2" => Ok(PaletteLayout::GxEpd2),
            "waveshare" => Ok(PaletteLayout::Waveshare),
            _ => Err(PaletteError::UnknownLayout(s.to_string())),
        }
    }
}

/// The fixed 7-color palette.
///
/// Entries are stored in a fixed-size array in wire order, so iteration
/// order is stable and the nearest-color search is deterministic.
///
/// # Example
///
/// ```
/// use epd7c_codec::{NamedColor, Palette, Rgb};
///
/// let palette = Palette::gxepd2();
/// assert_eq!(palette.len(), 7);
/// assert_eq!(palette.index_of(NamedColor::White), 0);
/// assert_eq!(palette.find_nearest(Rgb::new(250, 10, 5)), 2); // RED
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    layout: PaletteLayout,
    names: [NamedColor; PALETTE_SIZE],
    colors: [Rgb; PALETTE_SIZE],
}

impl Palette {
    /// Create the palette for a layout with its stock orange.
    pub fn new(layout: PaletteLayout) -> Self {
        let names = layout.order();
        let orange = layout.default_orange();
        let colors = names.map(|name| name.nominal(orange));
        Self {
            layout,
            names,
            colors,
        }
    }

    #[inline]
    pub fn gxepd2() -> Self {
        Self::new(PaletteLayout::GxEpd2)
    }

    #[inline]
    pub fn waveshare() -> Self {
        Self::new(PaletteLayout::Waveshare)
    }

    /// Replace the RGB value used for one named color.
    ///
    /// Used for panel calibration, where the measured color differs from
    /// the nominal one. The index of the color does not change.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::DuplicateColor`] if `color` equals another
    /// entry, since that entry would always win the nearest-color search.
    pub fn with_color(mut self, name: NamedColor, color: Rgb) -> Result<Self, PaletteError> {
        let index = self.index_of(name) as usize;
        if let Some(existing) = self
            .colors
            .iter()
            .enumerate()
            .position(|(i, &c)| i != index && c == color)
        {
            return Err(PaletteError::DuplicateColor { index, existing });
        }
        self.colors[index] = color;
        Ok(self)
    }

    /// Replace the orange entry. See [`with_color()`](Self::with_color).
    #[inline]
    pub fn with_orange(self, color: Rgb) -> Result<Self, PaletteError> {
        self.with_color(NamedColor::Orange, color)
    }

    /// Returns the number of colors in the palette (always 7).
    #[inline]
    pub fn len(&self) -> usize {
        PALETTE_SIZE
    }

    /// Always `false`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[inline]
    pub fn layout(&self) -> PaletteLayout {
        self.layout
    }

    /// RGB value at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= 7`.
    #[inline]
    pub fn color(&self, idx: usize) -> Rgb {
        self.colors[idx]
    }

    #[inline]
    pub fn colors(&self) -> &[Rgb; PALETTE_SIZE] {
        &self.colors
    }

    /// Named color at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= 7`.
    #[inline]
    pub fn name(&self, idx: usize) -> NamedColor {
        self.names[idx]
    }

    /// Wire index of a named color.
    pub fn index_of(&self, name: NamedColor) -> u8 {
        // Every layout lists every color exactly once.
        self.names.iter().position(|&n| n == name).unwrap_or(0) as u8
    }

    /// The RGB value used for letterbox fill.
    #[inline]
    pub fn white(&self) -> Rgb {
        self.colors[self.index_of(NamedColor::White) as usize]
    }

    /// Find the index of the palette entry closest to `color`.
    ///
    /// Uses squared Euclidean RGB distance over the entries in index order.
    /// The comparison is strict, so when several entries are equidistant
    /// the lowest index wins.
    #[inline]
    pub fn find_nearest(&self, color: Rgb) -> u8 {
        let mut best_idx = 0;
        let mut best_dist = u32::MAX;

        for (i, &entry) in self.colors.iter().enumerate() {
            let dist = color.distance_squared(entry);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }

        best_idx as u8
    }

    /// Iterate `(index, name, color)` in wire order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, NamedColor, Rgb)> + '_ {
        self.names
            .iter()
            .zip(self.colors.iter())
            .enumerate()
            .map(|(i, (&name, &color))| (i as u8, name, color))
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::gxepd2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gxepd2_order() {
        let palette = Palette::gxepd2();
        let expected = [
            Rgb::new(255, 255, 255),
            Rgb::new(0, 0, 0),
            Rgb::new(255, 0, 0),
            Rgb::new(0, 255, 0),
            Rgb::new(0, 0, 255),
            Rgb::new(255, 255, 0),
            Rgb::new(255, 128, 0),
        ];
        assert_eq!(palette.colors(), &expected);
        assert_eq!(palette.layout(), PaletteLayout::GxEpd2);
    }

    #[test]
    fn test_waveshare_order() {
        let palette = Palette::waveshare();
        assert_eq!(palette.index_of(NamedColor::Black), 0);
        assert_eq!(palette.index_of(NamedColor::White), 1);
        assert_eq!(palette.index_of(NamedColor::Green), 2);
        assert_eq!(palette.index_of(NamedColor::Blue), 3);
        assert_eq!(palette.index_of(NamedColor::Red), 4);
        assert_eq!(palette.index_of(NamedColor::Yellow), 5);
        assert_eq!(palette.color(6), Rgb::new(255, 165, 0));
    }

    #[test]
    fn test_every_entry_maps_to_itself() {
        for palette in [Palette::gxepd2(), Palette::waveshare()] {
            for (idx, name, color) in palette.iter() {
                assert_eq!(
                    palette.find_nearest(color),
                    idx,
                    "{} should map to its own index in {}",
                    name,
                    palette.layout()
                );
            }
        }
    }

    #[test]
    fn test_strict_comparison_keeps_first_minimum() {
        // (200, 200, 0) is equidistant from red and green. Move yellow and
        // orange out of the way so that pair is the minimum, then check the
        // lower index wins in both layouts.
        let palette = Palette::waveshare()
            .with_color(NamedColor::Yellow, Rgb::new(0, 0, 128))
            .unwrap()
            .with_orange(Rgb::new(0, 128, 128))
            .unwrap();
        let tie = Rgb::new(200, 200, 0);
        let d_green = tie.distance_squared(palette.color(2));
        let d_red = tie.distance_squared(palette.color(4));
        assert_eq!(d_green, d_red);
        for (_, _, color) in palette.iter() {
            assert!(tie.distance_squared(color) >= d_green);
        }
        assert_eq!(palette.find_nearest(tie), 2);

        // Same tie on gxepd2 order (red=2 precedes green=3) resolves to red.
        let palette = Palette::gxepd2()
            .with_color(NamedColor::Yellow, Rgb::new(0, 0, 128))
            .unwrap()
            .with_orange(Rgb::new(0, 128, 128))
            .unwrap();
        assert_eq!(palette.find_nearest(tie), 2);
        assert_eq!(palette.name(2), NamedColor::Red);
    }

    #[test]
    fn test_mid_grey_maps_to_orange() {
        // Orange sits close to the grey axis: (128,128,128) is nearer to
        // (255,128,0) than to either white or black.
        let palette = Palette::gxepd2();
        assert_eq!(palette.find_nearest(Rgb::new(128, 128, 128)), 6);
        assert_eq!(palette.find_nearest(Rgb::new(40, 40, 40)), 1);
        assert_eq!(palette.find_nearest(Rgb::new(220, 220, 220)), 0);
    }

    #[test]
    fn test_find_nearest_in_range_and_deterministic() {
        let palette = Palette::gxepd2();
        for r in (0..=255u16).step_by(17) {
            for g in (0..=255u16).step_by(17) {
                for b in (0..=255u16).step_by(17) {
                    let color = Rgb::new(r as u8, g as u8, b as u8);
                    let first = palette.find_nearest(color);
                    assert!((first as usize) < PALETTE_SIZE);
                    assert_eq!(first, palette.find_nearest(color));
                }
            }
        }
    }

    #[test]
    fn test_with_orange_rejects_duplicate() {
        let err = Palette::gxepd2()
            .with_orange(Rgb::new(255, 255, 0))
            .unwrap_err();
        assert_eq!(
            err,
            PaletteError::DuplicateColor {
                index: 6,
                existing: 5
            }
        );
    }

    #[test]
    fn test_with_orange_keeps_index() {
        let palette = Palette::gxepd2()
            .with_orange(Rgb::new(255, 165, 0))
            .unwrap();
        assert_eq!(palette.color(6), Rgb::new(255, 165, 0));
        assert_eq!(palette.name(6), NamedColor::Orange);
        // Re-applying the same value is not a duplicate of itself
        assert!(palette.with_orange(Rgb::new(255, 165, 0)).is_ok());
    }

    #[test]
    fn test_white_lookup_follows_layout() {
        assert_eq!(Palette::gxepd2().white(), Rgb::WHITE);
        assert_eq!(Palette::waveshare().white(), Rgb::WHITE);
        assert_eq!(Palette::waveshare().index_of(NamedColor::White), 1);
    }

    #[test]
    fn test_layout_from_str() {
        assert_eq!(
            "GxEPD2".parse::<PaletteLayout>().unwrap(),
            PaletteLayout::GxEpd2
        );
        assert_eq!(
            "waveshare".parse::<PaletteLayout>().unwrap(),
            PaletteLayout::Waveshare
        );
        assert!(matches!(
            "acep".parse::<PaletteLayout>(),
            Err(PaletteError::UnknownLayout(_))
        ));
    }
}
