// delta.rs
//
// Copyright (c) 2026  Douglas Lau
//
//! Changed-region detection between frames
use crate::error::Result;

/// Rectangular region of the canvas
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Region {
    /// Left edge
    pub left: u16,
    /// Top edge
    pub top: u16,
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
}

/// What a frame is compared against
#[derive(Clone, Copy, Debug)]
pub(crate) enum Reference<'a> {
    /// Previously encoded frame
    Frame(&'a [u8]),
    /// Background color index everywhere
    Background(u8),
}

impl Region {
    /// Create a region covering the whole canvas
    pub fn full(width: u16, height: u16) -> Self {
        Region {
            left: 0,
            top: 0,
            width,
            height,
        }
    }

    /// Create a one pixel region at the origin
    pub fn unit() -> Self {
        Region::full(1, 1)
    }

    /// Iterate over the pixels in a frame within the region
    pub(crate) fn pixels<'a>(
        self,
        frame: &'a [u8],
        stride: usize,
    ) -> impl Iterator<Item = u8> + 'a {
        let left = usize::from(self.left);
        let right = left + usize::from(self.width);
        frame
            .chunks_exact(stride)
            .skip(usize::from(self.top))
            .take(usize::from(self.height))
            .flat_map(move |row| row[left..right].iter().copied())
    }
}

impl Reference<'_> {
    /// Check whether a pixel differs from the reference
    fn differs(&self, i: usize, pixel: u8) -> bool {
        match self {
            Reference::Frame(frame) => frame[i] != pixel,
            Reference::Background(clr) => *clr != pixel,
        }
    }
}

/// Find the bounding region of pixels which differ from the reference.
///
/// Returns `None` when the frame matches the reference everywhere.
pub(crate) fn changed_region(
    frame: &[u8],
    reference: Reference,
    width: u16,
) -> Result<Option<Region>> {
    let stride = usize::from(width);
    // (left, right, top, bottom), inclusive
    let mut bounds: Option<(usize, usize, usize, usize)> = None;
    for (y, row) in frame.chunks_exact(stride).enumerate() {
        let base = y * stride;
        let differs = |x: usize| reference.differs(base + x, row[x]);
        let first = match (0..stride).position(differs) {
            Some(x) => x,
            None => continue,
        };
        let last = (first..stride).rposition(differs).map_or(first, |x| first + x);
        bounds = Some(match bounds {
            None => (first, last, y, y),
            Some((left, right, top, _)) => {
                (left.min(first), right.max(last), top, y)
            }
        });
    }
    match bounds {
        Some((left, right, top, bottom)) => Ok(Some(Region {
            left: u16::try_from(left)?,
            top: u16::try_from(top)?,
            width: u16::try_from(right - left + 1)?,
            height: u16::try_from(bottom - top + 1)?,
        })),
        None => Ok(None),
    }
}
