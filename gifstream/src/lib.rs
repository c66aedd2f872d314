// lib.rs      gifstream crate.
//
// Copyright (c) 2019-2026  Douglas Lau
//
//! Streaming encoder for animated indexed-color GIF images.
//!
//! Frames are drawn into a buffer owned by the encoder.  Each one is
//! compared with the previous frame (or a transparent background color) and
//! only the changed region is LZW-compressed and written.
//!
//! ```
//! use gifstream::Encoder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut gif = Vec::new();
//! let mut enc = Encoder::new(&mut gif).with_depth(2).into_frame_enc(4, 4)?;
//! for i in 0..4u8 {
//!     for (j, p) in enc.frame_mut().iter_mut().enumerate() {
//!         *p = (i + j as u8) % 4;
//!     }
//!     enc.add_frame(10)?;
//! }
//! let size = enc.finish()?;
//! assert_eq!(size, gif.len() as u64);
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]

#[macro_use]
extern crate log;

mod block;
mod delta;
pub mod encode;
mod error;
mod lzw;
mod pack;
mod palette;
mod private;
mod sink;
#[cfg(test)]
mod testing;

pub use crate::block::DisposalMethod;
pub use crate::delta::Region;
pub use crate::error::{Error, Result};
pub use crate::palette::ColorTable;
pub use crate::private::Encoder;
