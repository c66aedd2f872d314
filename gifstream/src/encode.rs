// encode.rs
//
// Copyright (c) 2019-2026  Douglas Lau
//
//! Frame encoding session
use crate::block::{
    DisposalMethod, GraphicControl, ImageDesc, LoopCount, Preamble, Trailer,
};
use crate::delta::{self, Reference, Region};
use crate::error::{Error, Result};
use crate::lzw::Compressor;
use crate::pack::BitPacker;
use crate::palette::ColorTable;
use crate::private::Config;
use crate::sink::Sink;
use pix::gray::{Gray, Gray8};
use pix::Raster;
use std::io::Write;

/// What frames are drawn over
enum Backdrop {
    /// Each frame is kept; the next one only covers what changed
    Previous(Vec<u8>),
    /// Each frame is cleared to a transparent background color
    Background(u8),
}

impl Backdrop {
    /// Get the reference for changed-region detection
    fn reference(&self) -> Reference<'_> {
        match self {
            Backdrop::Previous(frame) => Reference::Frame(frame),
            Backdrop::Background(clr) => Reference::Background(*clr),
        }
    }

    /// Get the disposal method for frames
    fn disposal_method(&self) -> DisposalMethod {
        match self {
            Backdrop::Previous(_) => DisposalMethod::Keep,
            Backdrop::Background(_) => DisposalMethod::Background,
        }
    }

    /// Get the transparent color
    fn transparent_color(&self) -> Option<u8> {
        match self {
            Backdrop::Previous(_) => None,
            Backdrop::Background(clr) => Some(*clr),
        }
    }
}

/// Allocate a frame buffer
fn alloc_frame(len: usize) -> Result<Vec<u8>> {
    let mut frame = Vec::new();
    frame.try_reserve_exact(len)?;
    frame.resize(len, 0);
    Ok(frame)
}

/// Animated GIF frame encoder.
///
/// Draw into [frame_mut] (or use [set_frame] / [set_raster]), then call
/// [add_frame].  Only the region which changed since the previous frame is
/// encoded.  Call [finish] after the last frame to write the trailer.
///
/// Created with Encoder.[into_frame_enc].
///
/// [add_frame]: struct.FrameEnc.html#method.add_frame
/// [finish]: struct.FrameEnc.html#method.finish
/// [frame_mut]: struct.FrameEnc.html#method.frame_mut
/// [into_frame_enc]: ../struct.Encoder.html#method.into_frame_enc
/// [set_frame]: struct.FrameEnc.html#method.set_frame
/// [set_raster]: struct.FrameEnc.html#method.set_raster
pub struct FrameEnc<W: Write> {
    /// Output sink
    sink: Sink<W>,
    /// Canvas width
    width: u16,
    /// Canvas height
    height: u16,
    /// Color depth (bits per pixel)
    depth: u8,
    /// Global color table
    color_table: ColorTable,
    /// Frame being drawn
    frame: Vec<u8>,
    /// Previous frame or background color
    backdrop: Backdrop,
    /// Number of frames encoded
    n_frames: usize,
    /// Region of the most recent frame
    region: Option<Region>,
    /// A frame failed to encode
    aborted: bool,
}

impl<W: Write> FrameEnc<W> {
    /// Create a frame encoder, writing the preamble blocks
    pub(crate) fn new(
        writer: W,
        width: u16,
        height: u16,
        config: Config,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidFrameDimensions);
        }
        let depth = config.depth();
        let color_table = config
            .color_table
            .unwrap_or_else(|| ColorTable::with_depth(depth))
            .fit_depth(depth);
        let len = usize::from(width) * usize::from(height);
        let frame = alloc_frame(len)?;
        let backdrop = match config.background {
            Some(clr) => Backdrop::Background(clr),
            None => Backdrop::Previous(alloc_frame(len)?),
        };
        let mut sink = Sink::new(writer);
        Preamble::new(width, height, &color_table)
            .with_background_color_idx(config.background.unwrap_or(0))
            .format(&mut sink)?;
        if let Some(count) = config.loop_count {
            LoopCount(count).format(&mut sink)?;
        }
        debug!("canvas {}x{}, depth {}", width, height, depth);
        Ok(FrameEnc {
            sink,
            width,
            height,
            depth,
            color_table,
            frame,
            backdrop,
            n_frames: 0,
            region: None,
            aborted: false,
        })
    }

    /// Get the canvas width
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Get the canvas height
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Get the color depth (bits per pixel)
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Get the global color table, as written
    pub fn color_table(&self) -> &ColorTable {
        &self.color_table
    }

    /// Get the number of frames added
    pub fn frame_count(&self) -> usize {
        self.n_frames
    }

    /// Get the region encoded for the most recent frame
    pub fn region(&self) -> Option<Region> {
        self.region
    }

    /// Get the disposal method used for frames
    pub fn disposal_method(&self) -> DisposalMethod {
        self.backdrop.disposal_method()
    }

    /// Get the frame being drawn
    pub fn frame(&self) -> &[u8] {
        &self.frame
    }

    /// Get the frame being drawn, mutably.
    ///
    /// Without a background color, frame buffers are swapped after each
    /// frame: this then holds the frame *before* the previous one, and must
    /// be redrawn completely.
    pub fn frame_mut(&mut self) -> &mut [u8] {
        &mut self.frame
    }

    /// Get the most recently added frame (without a background color)
    pub fn previous_frame(&self) -> Option<&[u8]> {
        match &self.backdrop {
            Backdrop::Previous(frame) if self.n_frames > 0 => Some(frame),
            _ => None,
        }
    }

    /// Copy pixels into the frame
    pub fn set_frame(&mut self, pixels: &[u8]) -> Result<()> {
        if pixels.len() != self.frame.len() {
            return Err(Error::InvalidRasterDimensions);
        }
        self.frame.copy_from_slice(pixels);
        Ok(())
    }

    /// Copy an indexed raster into the frame
    pub fn set_raster(&mut self, raster: &Raster<Gray8>) -> Result<()> {
        if raster.width() != u32::from(self.width)
            || raster.height() != u32::from(self.height)
        {
            return Err(Error::InvalidRasterDimensions);
        }
        for (dst, src) in self.frame.iter_mut().zip(raster.pixels()) {
            *dst = u8::from(Gray::value(*src));
        }
        Ok(())
    }

    /// Encode the frame.
    ///
    /// * `delay_cs`: Delay before the next frame (centiseconds).
    ///
    /// Any error aborts the session; later calls return [Error::Aborted].
    ///
    /// [Error::Aborted]: ../enum.Error.html#variant.Aborted
    pub fn add_frame(&mut self, delay_cs: u16) -> Result<()> {
        if self.aborted {
            return Err(Error::Aborted);
        }
        match self.encode_frame(delay_cs) {
            Ok(region) => self.region = Some(region),
            Err(err) => {
                warn!("frame {} failed: {}", self.n_frames, err);
                self.aborted = true;
                return Err(err);
            }
        }
        self.n_frames += 1;
        if let Backdrop::Previous(previous) = &mut self.backdrop {
            std::mem::swap(&mut self.frame, previous);
        }
        Ok(())
    }

    /// Get the region of the frame to encode
    fn frame_region(&self) -> Result<Region> {
        if self.n_frames == 0 {
            return Ok(Region::full(self.width, self.height));
        }
        let reference = self.backdrop.reference();
        match delta::changed_region(&self.frame, reference, self.width)? {
            Some(region) => Ok(region),
            None => {
                // nothing changed, but the delay still needs a frame
                Ok(Region::unit())
            }
        }
    }

    /// Encode control, descriptor and image data blocks
    fn encode_frame(&mut self, delay_cs: u16) -> Result<Region> {
        let compressor = Compressor::new(self.depth)?;
        let region = self.frame_region()?;
        debug!("frame {}: {:?}", self.n_frames, region);
        let transparent = self.backdrop.transparent_color();
        if delay_cs > 0 || transparent.is_some() {
            GraphicControl::default()
                .with_disposal_method(self.backdrop.disposal_method())
                .with_delay_time_cs(delay_cs)
                .with_transparent_color(transparent)
                .format(&mut self.sink)?;
        }
        ImageDesc(region).format(&mut self.sink)?;
        self.sink.write_all(&[self.depth])?; // minimum code size
        let mut packer = BitPacker::new(&mut self.sink);
        let pixels = region.pixels(&self.frame, usize::from(self.width));
        compressor.compress(pixels, &mut packer)?;
        packer.finish()?;
        Ok(region)
    }

    /// Write the trailer and flush the sink.
    ///
    /// Returns the total number of bytes written.
    pub fn finish(mut self) -> Result<u64> {
        if self.aborted {
            return Err(Error::Aborted);
        }
        Trailer::default().format(&mut self.sink)?;
        self.sink.flush()?;
        let size = self.sink.position();
        debug!("{} frames, {} bytes", self.n_frames, size);
        Ok(size)
    }
}
