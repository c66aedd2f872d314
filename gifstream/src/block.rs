// block.rs
//
// Copyright (c) 2019-2026  Douglas Lau
//
//! GIF container blocks written around the image data
use crate::delta::Region;
use crate::palette::ColorTable;
use std::io::{self, Write};

/// Frame disposal method
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DisposalMethod {
    /// Keep the frame in place
    Keep,
    /// Restore the frame region to the background
    Background,
}

impl From<DisposalMethod> for u8 {
    fn from(d: DisposalMethod) -> Self {
        match d {
            DisposalMethod::Keep => 1,
            DisposalMethod::Background => 2,
        }
    }
}

/// Block signatures
mod signature {
    /// (0x21) Extension introducer
    pub const EXTENSION: u8 = b'!';
    /// (0x2C) Image separator
    pub const IMAGE_DESC: u8 = b',';
    /// (0x3B) GIF trailer
    pub const TRAILER: u8 = b';';
    /// Graphic control extension label
    pub const GRAPHIC_CONTROL: u8 = 0xF9;
    /// Application extension label
    pub const APPLICATION: u8 = 0xFF;
}

/// Write a little-endian u16
fn write_u16<W: Write>(w: &mut W, v: u16) -> io::Result<()> {
    w.write_all(&v.to_le_bytes())
}

/// Header, logical screen descriptor and global color table
#[derive(Debug)]
pub(crate) struct Preamble<'a> {
    screen_width: u16,
    screen_height: u16,
    background_color_idx: u8,
    color_table: &'a ColorTable,
}

impl<'a> Preamble<'a> {
    const COLOR_TABLE_PRESENT: u8 = 0b1000_0000;
    const COLOR_RESOLUTION: u8 = 0b0111_0000;
    const COLOR_TABLE_SIZE: u8 = 0b0000_0111;

    /// Create a preamble
    pub fn new(width: u16, height: u16, color_table: &'a ColorTable) -> Self {
        Preamble {
            screen_width: width,
            screen_height: height,
            background_color_idx: 0,
            color_table,
        }
    }

    /// Adjust the background color index
    pub fn with_background_color_idx(mut self, idx: u8) -> Self {
        self.background_color_idx = idx;
        self
    }

    /// Get the logical screen descriptor flags
    fn flags(&self) -> u8 {
        // table size field is log2(colors) - 1
        let len = self.color_table.len().max(2);
        let bits = (len.trailing_zeros() - 1) as u8 & Self::COLOR_TABLE_SIZE;
        Self::COLOR_TABLE_PRESENT | Self::COLOR_RESOLUTION | bits
    }

    /// Format the preamble blocks
    pub fn format<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(b"GIF89a")?;
        write_u16(w, self.screen_width)?;
        write_u16(w, self.screen_height)?;
        w.write_all(&[self.flags(), self.background_color_idx, 0])?;
        w.write_all(self.color_table.colors())
    }
}

/// Application extension with looping count
#[derive(Debug)]
pub(crate) struct LoopCount(pub u16);

impl LoopCount {
    /// Format the extension block
    pub fn format<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&[signature::EXTENSION, signature::APPLICATION])?;
        w.write_all(b"\x0BNETSCAPE2.0")?;
        w.write_all(&[3, 1])?; // block size, sub-block ID
        write_u16(w, self.0)?; // zero means loop forever
        w.write_all(&[0]) // block size
    }
}

/// Graphic control extension
#[derive(Debug, Default)]
pub(crate) struct GraphicControl {
    flags: u8,
    delay_time_cs: u16,
    transparent_color_idx: u8,
}

impl GraphicControl {
    const DISPOSAL_METHOD: u8 = 0b0001_1100;
    const TRANSPARENT_COLOR: u8 = 0b0000_0001;

    /// Adjust the disposal method
    pub fn with_disposal_method(mut self, method: DisposalMethod) -> Self {
        let d: u8 = method.into();
        self.flags = (self.flags & !Self::DISPOSAL_METHOD) | (d << 2);
        self
    }

    /// Adjust the delay time (centiseconds)
    pub fn with_delay_time_cs(mut self, delay_time_cs: u16) -> Self {
        self.delay_time_cs = delay_time_cs;
        self
    }

    /// Adjust the transparent color
    pub fn with_transparent_color(mut self, clr: Option<u8>) -> Self {
        match clr {
            Some(t) => {
                self.flags |= Self::TRANSPARENT_COLOR;
                self.transparent_color_idx = t;
            }
            None => {
                self.flags &= !Self::TRANSPARENT_COLOR;
                self.transparent_color_idx = 0;
            }
        }
        self
    }

    /// Format the extension block
    pub fn format<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&[signature::EXTENSION, signature::GRAPHIC_CONTROL])?;
        w.write_all(&[4, self.flags])?; // block size
        write_u16(w, self.delay_time_cs)?;
        w.write_all(&[self.transparent_color_idx, 0]) // block size
    }
}

/// Image descriptor (no local color table, not interlaced)
#[derive(Debug)]
pub(crate) struct ImageDesc(pub Region);

impl ImageDesc {
    /// Format the image descriptor
    pub fn format<W: Write>(&self, w: &mut W) -> io::Result<()> {
        let region = &self.0;
        w.write_all(&[signature::IMAGE_DESC])?;
        write_u16(w, region.left)?;
        write_u16(w, region.top)?;
        write_u16(w, region.width)?;
        write_u16(w, region.height)?;
        w.write_all(&[0]) // flags
    }
}

/// Trailer marking the end of the file
#[derive(Debug, Default)]
pub(crate) struct Trailer {}

impl Trailer {
    /// Format the trailer
    pub fn format<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&[signature::TRAILER])
    }
}
