// private.rs
//
// Copyright (c) 2019-2026  Douglas Lau
//
//! Private module for top-level items
use crate::{encode, palette::ColorTable, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Smallest supported color depth
const DEPTH_MIN: u8 = 2;

/// Largest supported color depth
const DEPTH_MAX: u8 = 8;

/// Encoder settings
#[derive(Clone, Debug)]
pub(crate) struct Config {
    /// Requested color depth (bits per pixel)
    depth: u8,
    /// Custom global color table
    pub(crate) color_table: Option<ColorTable>,
    /// Transparent background color index
    pub(crate) background: Option<u8>,
    /// Animation loop count
    pub(crate) loop_count: Option<u16>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            depth: DEPTH_MAX,
            color_table: None,
            background: None,
            loop_count: None,
        }
    }
}

impl Config {
    /// Get the color depth, clamped to the supported range
    pub(crate) fn depth(&self) -> u8 {
        let depth = self.depth.clamp(DEPTH_MIN, DEPTH_MAX);
        if depth != self.depth {
            warn!("depth {} not supported; using {}", self.depth, depth);
        }
        depth
    }
}

/// Animated GIF encoder
///
/// Configure it, then convert it with [into_frame_enc] to write frames.
///
/// ## Encoding Example
/// ```
/// use gifstream::Encoder;
/// use std::error::Error;
/// use std::io::Write;
///
/// fn encode<W: Write>(mut w: W) -> Result<(), Box<dyn Error>> {
///     let mut enc = Encoder::new(&mut w)
///         .with_depth(2)
///         .with_loop_count(Some(0))
///         .into_frame_enc(4, 4)?;
///     for step in 0..4 {
///         let frame = enc.frame_mut();
///         frame.fill(0);
///         frame[step * 5] = 1;
///         enc.add_frame(10)?;
///     }
///     enc.finish()?;
///     Ok(())
/// }
/// # encode(Vec::new()).unwrap();
/// ```
///
/// [into_frame_enc]: struct.Encoder.html#method.into_frame_enc
pub struct Encoder<W: Write> {
    /// Writer for output data
    writer: W,
    /// Encoder settings
    config: Config,
}

impl Encoder<BufWriter<File>> {
    /// Create an encoder writing to a new file.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Encoder::new(BufWriter::new(file)))
    }
}

impl<W: Write> Encoder<W> {
    /// Create a new GIF encoder.
    pub fn new(writer: W) -> Self {
        Encoder {
            writer,
            config: Config::default(),
        }
    }

    /// Set the color depth (bits per pixel).
    ///
    /// Depths outside of 2 to 8 are clamped.  The default is 8.
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.config.depth = depth;
        self
    }

    /// Set a custom global color table.
    ///
    /// It is padded with black or truncated to match the color depth.
    pub fn with_color_table(mut self, color_table: ColorTable) -> Self {
        self.config.color_table = Some(color_table);
        self
    }

    /// Set a transparent background color index.
    ///
    /// With a background, each frame is cleared to it before the next one is
    /// drawn, and only pixels of other colors are encoded.  Without one,
    /// frames are drawn over the previous frame.
    pub fn with_background(mut self, clr: Option<u8>) -> Self {
        self.config.background = clr;
        self
    }

    /// Set the animation loop count (0 means loop forever).
    pub fn with_loop_count(mut self, count: Option<u16>) -> Self {
        self.config.loop_count = count;
        self
    }

    /// Convert into a frame encoder.
    ///
    /// The preamble blocks are written immediately.
    pub fn into_frame_enc(
        self,
        width: u16,
        height: u16,
    ) -> Result<encode::FrameEnc<W>> {
        encode::FrameEnc::new(self.writer, width, height, self.config)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn depth() {
        let mut config = Config::default();
        assert_eq!(config.depth(), 8);
        config.depth = 0;
        assert_eq!(config.depth(), 2);
        config.depth = 5;
        assert_eq!(config.depth(), 5);
        config.depth = 12;
        assert_eq!(config.depth(), 8);
    }

    #[test]
    fn create_missing_dir() {
        let path = std::env::temp_dir()
            .join("gifstream-missing-dir")
            .join("out.gif");
        let res = Encoder::create(&path);
        assert!(matches!(res, Err(crate::Error::Io(_))));
    }

    #[test]
    fn create() {
        let path = std::env::temp_dir().join("gifstream-create.gif");
        let mut enc = Encoder::create(&path)
            .unwrap()
            .with_depth(3)
            .into_frame_enc(2, 2)
            .unwrap();
        enc.add_frame(0).unwrap();
        let size = enc.finish().unwrap();
        let meta = std::fs::metadata(&path).unwrap();
        assert_eq!(meta.len(), size);
        std::fs::remove_file(&path).unwrap();
    }
}
