// pack.rs
//
// Copyright (c) 2026  Douglas Lau
//
//! Bit packing of LZW codes into image data sub-blocks
use std::io::{self, Write};

/// Maximum length of one data sub-block
const SUB_BLOCK_SZ: usize = 0xFF;

/// Sink for variable-width codes
pub(crate) trait Pack {
    /// Pack the low `n_bits` of a code
    fn pack(&mut self, code: u16, n_bits: u8) -> io::Result<()>;
}

/// Packs codes least-significant bit first into length-prefixed sub-blocks.
///
/// Full sub-blocks are written as soon as they fill up, so at most one
/// sub-block is ever staged.
pub(crate) struct BitPacker<W: Write> {
    /// Writer for sub-blocks
    writer: W,
    /// Pending bits not yet stored in a byte
    partial: u32,
    /// Number of pending bits
    n_bits: u8,
    /// Staged sub-block bytes
    buf: [u8; SUB_BLOCK_SZ],
    /// Number of staged bytes
    len: usize,
}

impl<W: Write> BitPacker<W> {
    /// Create a new bit packer
    pub fn new(writer: W) -> Self {
        BitPacker {
            writer,
            partial: 0,
            n_bits: 0,
            buf: [0; SUB_BLOCK_SZ],
            len: 0,
        }
    }

    /// Stage one byte, writing a full sub-block when needed
    fn push_byte(&mut self, byte: u8) -> io::Result<()> {
        self.buf[self.len] = byte;
        self.len += 1;
        if self.len == SUB_BLOCK_SZ {
            self.writer.write_all(&[SUB_BLOCK_SZ as u8])?;
            self.writer.write_all(&self.buf)?;
            self.len = 0;
        }
        Ok(())
    }

    /// Write remaining bits and the block terminator
    pub fn finish(mut self) -> io::Result<W> {
        if self.n_bits > 0 {
            self.push_byte(self.partial as u8)?;
            self.partial = 0;
            self.n_bits = 0;
        }
        if self.len > 0 {
            self.writer.write_all(&[self.len as u8])?;
            self.writer.write_all(&self.buf[..self.len])?;
        }
        self.writer.write_all(&[0])?; // block terminator
        Ok(self.writer)
    }
}

impl<W: Write> Pack for BitPacker<W> {
    fn pack(&mut self, code: u16, n_bits: u8) -> io::Result<()> {
        debug_assert!(n_bits <= 16 && u32::from(code) < 1 << n_bits);
        self.partial |= u32::from(code) << self.n_bits;
        self.n_bits += n_bits;
        while self.n_bits >= 8 {
            self.push_byte(self.partial as u8)?;
            self.partial >>= 8;
            self.n_bits -= 8;
        }
        Ok(())
    }
}
