// lzw.rs
//
// Copyright (c) 2020-2026  Douglas Lau
//
//! Lempel-Ziv-Welch compression for GIF image data
use crate::error::Result;
use crate::pack::Pack;
use std::ops::AddAssign;

/// Code Bits
#[derive(Clone, Copy, Debug, PartialEq)]
struct Bits(u8);

impl From<u8> for Bits {
    fn from(bits: u8) -> Self {
        Bits(bits.min(Self::MAX.0))
    }
}

impl From<Bits> for u8 {
    fn from(bits: Bits) -> Self {
        bits.0
    }
}

impl AddAssign<u8> for Bits {
    fn add_assign(&mut self, rhs: u8) {
        self.0 = (self.0 + rhs).min(Self::MAX.0)
    }
}

impl Bits {
    /// Maximum code bits allowed for GIF
    const MAX: Self = Bits(12);

    /// Get the number of entries
    fn entries(self) -> u16 {
        1 << (self.0 as u16)
    }
}

/// Code type
type Code = u16;

/// Code dictionary trie
///
/// Nodes live in an arena indexed by code; each node has one child link per
/// pixel value.  Single-pixel sequences are the children of an implicit root.
#[derive(Debug)]
struct Trie {
    /// Child links, one row of `2^min_code_bits` per code
    links: Vec<Option<Code>>,
    /// Minimum code bits
    min_code_bits: u8,
}

/// LZW Data Compressor
///
/// Compresses one image, then is dropped along with its dictionary.
pub(crate) struct Compressor {
    /// Code dictionary
    trie: Trie,
    /// Minimum code bits
    min_code_bits: u8,
    /// Current code bits
    code_bits: Bits,
}

impl Trie {
    /// Create a new code dictionary
    fn new(min_code_bits: u8) -> Result<Self> {
        let mut links = Vec::new();
        links.try_reserve_exact(
            usize::from(Bits::MAX.entries()) << min_code_bits,
        )?;
        let mut trie = Trie {
            links,
            min_code_bits,
        };
        trie.reset();
        Ok(trie)
    }

    /// Get the number of pixel values
    fn degree(&self) -> usize {
        1 << self.min_code_bits
    }

    /// Get the clear code
    fn clear_code(&self) -> Code {
        1 << self.min_code_bits
    }

    /// Get the end code
    fn end_code(&self) -> Code {
        self.clear_code() + 1
    }

    /// Get the next available code
    fn next_code(&self) -> Code {
        (self.links.len() >> self.min_code_bits) as Code
    }

    /// Reset the dictionary
    fn reset(&mut self) {
        self.links.clear();
        // single pixel codes, plus clear and end codes (never linked)
        let n_codes = self.degree() + 2;
        self.links.resize(n_codes * self.degree(), None);
    }

    /// Get the link index for a code and pixel
    fn link(&self, code: Code, pixel: u8) -> usize {
        (usize::from(code) << self.min_code_bits) + usize::from(pixel)
    }

    /// Lookup the child of a code
    fn lookup(&self, code: Code, pixel: u8) -> Option<Code> {
        debug_assert!(code < self.next_code());
        self.links[self.link(code, pixel)]
    }

    /// Insert a child node, returning its code
    fn insert(&mut self, code: Code, pixel: u8) -> Code {
        debug_assert!(code != self.clear_code() && code != self.end_code());
        let next_code = self.next_code();
        let link = self.link(code, pixel);
        debug_assert!(self.links[link].is_none());
        self.links[link] = Some(next_code);
        self.links.resize(self.links.len() + self.degree(), None);
        next_code
    }
}

impl Compressor {
    /// Create a new compressor
    pub fn new(min_code_bits: u8) -> Result<Self> {
        debug_assert!((2..=8).contains(&min_code_bits));
        let trie = Trie::new(min_code_bits)?;
        let code_bits = Bits::from(min_code_bits + 1);
        Ok(Compressor {
            trie,
            min_code_bits,
            code_bits,
        })
    }

    /// Get the pixel mask
    fn mask(&self) -> u8 {
        (self.trie.degree() - 1) as u8
    }

    /// Pack a code at the current code size
    fn pack<P: Pack>(&self, code: Code, packer: &mut P) -> Result<()> {
        packer.pack(code, self.code_bits.into())?;
        Ok(())
    }

    /// Compress pixels, including clear and end codes
    pub fn compress<I, P>(mut self, pixels: I, packer: &mut P) -> Result<()>
    where
        I: IntoIterator<Item = u8>,
        P: Pack,
    {
        let mask = self.mask();
        self.pack(self.trie.clear_code(), packer)?;
        let mut code = None;
        for pixel in pixels {
            let pixel = pixel & mask;
            code = match code {
                None => Some(Code::from(pixel)),
                Some(prefix) => match self.trie.lookup(prefix, pixel) {
                    Some(child) => Some(child),
                    None => {
                        self.pack(prefix, packer)?;
                        self.grow(prefix, pixel, packer)?;
                        Some(Code::from(pixel))
                    }
                },
            };
        }
        if let Some(code) = code {
            self.pack(code, packer)?;
        }
        self.pack(self.trie.end_code(), packer)
    }

    /// Add a dictionary entry, or start over when the dictionary is full
    fn grow<P: Pack>(
        &mut self,
        prefix: Code,
        pixel: u8,
        packer: &mut P,
    ) -> Result<()> {
        let next_code = self.trie.next_code();
        if next_code < Bits::MAX.entries() {
            if next_code == self.code_bits.entries() {
                self.code_bits += 1;
            }
            self.trie.insert(prefix, pixel);
        } else {
            self.pack(self.trie.clear_code(), packer)?;
            trace!("code dictionary full; clearing");
            self.trie.reset();
            self.code_bits = Bits::from(self.min_code_bits + 1);
        }
        Ok(())
    }
}
