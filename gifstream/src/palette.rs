// palette.rs
//
// Copyright (c) 2026  Douglas Lau
//
//! Global color table
use pix::rgb::{Rgb, SRgb8};
use pix::Palette;

/// Number of channels per color
const CHANNELS: usize = 3;

/// 16-color VGA ramp
#[rustfmt::skip]
const VGA: [u8; 16 * CHANNELS] = [
    0x00, 0x00, 0x00,
    0xAA, 0x00, 0x00,
    0x00, 0xAA, 0x00,
    0xAA, 0x55, 0x00,
    0x00, 0x00, 0xAA,
    0xAA, 0x00, 0xAA,
    0x00, 0xAA, 0xAA,
    0xAA, 0xAA, 0xAA,
    0x55, 0x55, 0x55,
    0xFF, 0x55, 0x55,
    0x55, 0xFF, 0x55,
    0xFF, 0xFF, 0x55,
    0x55, 0x55, 0xFF,
    0xFF, 0x55, 0xFF,
    0x55, 0xFF, 0xFF,
    0xFF, 0xFF, 0xFF,
];

/// Color table of RGB triples
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorTable {
    /// RGB channel values
    colors: Vec<u8>,
}

impl ColorTable {
    /// Create a color table from RGB triples.
    ///
    /// A trailing partial triple is ignored.
    pub fn with_colors(colors: &[u8]) -> Self {
        let len = colors.len() / CHANNELS * CHANNELS;
        if len != colors.len() {
            warn!("color table has partial entry: {:?}", &colors[len..]);
        }
        ColorTable {
            colors: colors[..len].to_vec(),
        }
    }

    /// Create a color table from a palette
    pub fn from_palette(palette: &Palette) -> Self {
        let mut colors = vec![];
        let mut i = 0;
        while let Some(clr) = palette.entry(i) {
            colors.push(u8::from(Rgb::red(clr)));
            colors.push(u8::from(Rgb::green(clr)));
            colors.push(u8::from(Rgb::blue(clr)));
            i += 1;
        }
        ColorTable { colors }
    }

    /// Create the default color table for a color depth.
    ///
    /// Depths up to 4 use the start of the VGA ramp.  Deeper tables follow
    /// it with a 6x6x6 color cube, then (for depth 8) 24 gray levels.
    pub fn with_depth(depth: u8) -> Self {
        let n_colors = 1 << depth;
        let mut colors = Vec::with_capacity(n_colors * CHANNELS);
        colors.extend(VGA.iter().take(n_colors * CHANNELS));
        let cube = (0..6u8).flat_map(|r| {
            (0..6u8).flat_map(move |g| (0..6u8).map(move |b| [r, g, b]))
        });
        let grays = (1..=24u32).map(|i| {
            let v = (i * 0xFF / 25) as u8;
            [v, v, v]
        });
        let extra = n_colors.saturating_sub(VGA.len() / CHANNELS);
        let cube = cube.map(|rgb| rgb.map(|c| c * 51));
        for rgb in cube.chain(grays).take(extra) {
            colors.extend_from_slice(&rgb);
        }
        ColorTable { colors }
    }

    /// Get the number of colors
    pub fn len(&self) -> usize {
        self.colors.len() / CHANNELS
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Get the RGB channel values
    pub fn colors(&self) -> &[u8] {
        &self.colors
    }

    /// Get one color
    pub fn color(&self, i: usize) -> Option<SRgb8> {
        let c = self.colors.get(i * CHANNELS..(i + 1) * CHANNELS)?;
        Some(SRgb8::new(c[0], c[1], c[2]))
    }

    /// Pad or truncate to exactly `2^depth` colors
    pub(crate) fn fit_depth(mut self, depth: u8) -> Self {
        let len = CHANNELS << depth;
        if self.colors.len() != len {
            warn!(
                "color table has {} colors; depth {} needs {}",
                self.len(),
                depth,
                1 << depth
            );
            self.colors.resize(len, 0);
        }
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn small_depth() {
        let tbl = ColorTable::with_depth(2);
        assert_eq!(tbl.colors(), &VGA[..12]);
        assert_eq!(ColorTable::with_depth(4).colors(), &VGA[..]);
    }

    #[test]
    fn depth_5() {
        let tbl = ColorTable::with_depth(5);
        assert_eq!(tbl.len(), 32);
        assert_eq!(tbl.color(16), Some(SRgb8::new(0, 0, 0)));
        assert_eq!(tbl.color(17), Some(SRgb8::new(0, 0, 51)));
        assert_eq!(tbl.color(22), Some(SRgb8::new(0, 51, 0)));
        assert_eq!(tbl.color(31), Some(SRgb8::new(0, 102, 153)));
    }

    #[test]
    fn depth_8() {
        let tbl = ColorTable::with_depth(8);
        assert_eq!(tbl.len(), 256);
        assert_eq!(tbl.color(15), Some(SRgb8::new(0xFF, 0xFF, 0xFF)));
        assert_eq!(tbl.color(16 + 215), Some(SRgb8::new(255, 255, 255)));
        assert_eq!(tbl.color(232), Some(SRgb8::new(10, 10, 10)));
        assert_eq!(tbl.color(255), Some(SRgb8::new(244, 244, 244)));
        assert_eq!(tbl.color(256), None);
    }

    #[test]
    fn fit() {
        let tbl = ColorTable::with_colors(&[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(tbl.len(), 2);
        let tbl = tbl.fit_depth(2);
        assert_eq!(tbl.colors(), &[1, 2, 3, 4, 5, 6, 0, 0, 0, 0, 0, 0]);
        let tbl = ColorTable::with_depth(3).fit_depth(2);
        assert_eq!(tbl, ColorTable::with_depth(2));
    }

    #[test]
    fn palette() {
        let mut palette = Palette::new(4);
        palette.set_entry(SRgb8::new(0xFF, 0, 0));
        palette.set_entry(SRgb8::new(0, 0xFF, 0x80));
        let tbl = ColorTable::from_palette(&palette);
        assert_eq!(tbl.colors(), &[0xFF, 0, 0, 0, 0xFF, 0x80]);
    }
}
