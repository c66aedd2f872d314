// testing.rs
//
// Copyright (c) 2026  Douglas Lau
//
//! Reference GIF reader used to check encoder output
use crate::block::DisposalMethod;
use crate::delta::Region;
use crate::pack::{BitPacker, Pack};
use std::io;

/// Pack sink which records codes
#[derive(Default)]
pub(crate) struct Recorder {
    pub codes: Vec<(u16, u8)>,
}

impl Pack for Recorder {
    fn pack(&mut self, code: u16, n_bits: u8) -> io::Result<()> {
        self.codes.push((code, n_bits));
        Ok(())
    }
}

/// Make pseudo-random pixels (xorshift)
pub(crate) fn noise(len: usize, seed: u64) -> Vec<u8> {
    let mut state = seed | 1;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 24) as u8
        })
        .collect()
}

/// Pack codes and strip the sub-block framing
pub(crate) fn pack_codes(codes: &[(u16, u8)]) -> Vec<u8> {
    let mut packer = BitPacker::new(Vec::new());
    for (code, n_bits) in codes {
        packer.pack(*code, *n_bits).unwrap();
    }
    let framed = packer.finish().unwrap();
    let mut data = vec![];
    let mut pos = 0;
    while framed[pos] > 0 {
        let len = framed[pos] as usize;
        data.extend_from_slice(&framed[pos + 1..pos + 1 + len]);
        pos += len + 1;
    }
    data
}

/// Decompress LZW data the way a GIF decoder does
pub(crate) fn decompress(data: &[u8], min_code_bits: u8) -> Vec<u8> {
    let clear = 1u16 << min_code_bits;
    let end = clear + 1;
    let reset = |table: &mut Vec<(Option<u16>, u8)>| {
        table.clear();
        for byte in 0..clear + 2 {
            table.push((None, byte as u8));
        }
    };
    let mut table = vec![];
    reset(&mut table);
    let mut code_bits = min_code_bits + 1;
    let mut last: Option<u16> = None;
    let mut bytes = data.iter();
    let mut acc = 0u32;
    let mut n_bits = 0;
    let mut padding = 0;
    let mut out = vec![];
    loop {
        while n_bits < code_bits {
            // missing bits past the end read as zero padding
            let byte = bytes.next().copied().unwrap_or_else(|| {
                padding += 1;
                assert!(padding <= 2, "missing end code");
                0
            });
            acc |= u32::from(byte) << n_bits;
            n_bits += 8;
        }
        let code = (acc & ((1 << code_bits) - 1)) as u16;
        acc >>= code_bits;
        n_bits -= code_bits;
        if code == clear {
            reset(&mut table);
            code_bits = min_code_bits + 1;
            last = None;
            continue;
        }
        if code == end {
            return out;
        }
        let seq = |code: u16, table: &Vec<(Option<u16>, u8)>| {
            let mut seq = vec![];
            let mut node = Some(code);
            while let Some(c) = node {
                let (next, byte) = table[usize::from(c)];
                seq.push(byte);
                node = next;
            }
            seq.reverse();
            seq
        };
        let entry = if usize::from(code) < table.len() {
            seq(code, &table)
        } else {
            assert_eq!(usize::from(code), table.len(), "invalid code");
            let mut s = seq(last.expect("code before first"), &table);
            s.push(s[0]);
            s
        };
        if let Some(last) = last {
            if table.len() < 4096 {
                table.push((Some(last), entry[0]));
            }
        }
        out.extend_from_slice(&entry);
        last = Some(code);
        if table.len() == 1 << code_bits && code_bits < 12 {
            code_bits += 1;
        }
    }
}

/// Image read back from a GIF
pub(crate) struct Image {
    pub region: Region,
    pub delay_cs: u16,
    pub disposal: Option<DisposalMethod>,
    pub transparent: Option<u8>,
    pub min_code_bits: u8,
    pub sub_blocks: Vec<usize>,
    pub pixels: Vec<u8>,
}

/// GIF read back from encoder output
pub(crate) struct Gif {
    pub width: u16,
    pub height: u16,
    pub flags: u8,
    pub background: u8,
    pub color_table: Vec<u8>,
    pub loop_count: Option<u16>,
    pub images: Vec<Image>,
}

/// Get the (x, y) position of each pixel in a region
pub(crate) fn coords(region: Region) -> impl Iterator<Item = (usize, usize)> {
    let left = usize::from(region.left);
    let top = usize::from(region.top);
    let width = usize::from(region.width);
    let height = usize::from(region.height);
    (top..top + height).flat_map(move |y| (left..left + width).map(move |x| (x, y)))
}

fn u16_le(buf: &[u8]) -> u16 {
    u16::from(buf[0]) | u16::from(buf[1]) << 8
}

/// Parse encoder output (panics on anything malformed)
pub(crate) fn parse(bytes: &[u8]) -> Gif {
    assert_eq!(&bytes[..6], b"GIF89a");
    let width = u16_le(&bytes[6..]);
    let height = u16_le(&bytes[8..]);
    let flags = bytes[10];
    let background = bytes[11];
    assert_eq!(bytes[12], 0, "pixel aspect ratio");
    assert_ne!(flags & 0x80, 0, "no global color table");
    let table_len = 3 << ((flags & 0x07) + 1);
    let color_table = bytes[13..13 + table_len].to_vec();
    let mut pos = 13 + table_len;
    let mut gif = Gif {
        width,
        height,
        flags,
        background,
        color_table,
        loop_count: None,
        images: vec![],
    };
    let mut control = None;
    loop {
        match bytes[pos] {
            b'!' if bytes[pos + 1] == 0xF9 => {
                assert_eq!(bytes[pos + 2], 4);
                let flags = bytes[pos + 3];
                let delay = u16_le(&bytes[pos + 4..]);
                let transparent = if flags & 1 != 0 {
                    Some(bytes[pos + 6])
                } else {
                    None
                };
                assert_eq!(bytes[pos + 7], 0);
                let disposal = match (flags >> 2) & 0x07 {
                    1 => DisposalMethod::Keep,
                    2 => DisposalMethod::Background,
                    d => panic!("unexpected disposal method {}", d),
                };
                control = Some((delay, disposal, transparent));
                pos += 8;
            }
            b'!' if bytes[pos + 1] == 0xFF => {
                assert!(gif.images.is_empty());
                assert_eq!(&bytes[pos + 2..pos + 14], b"\x0BNETSCAPE2.0");
                assert_eq!(&bytes[pos + 14..pos + 16], [3, 1]);
                gif.loop_count = Some(u16_le(&bytes[pos + 16..]));
                assert_eq!(bytes[pos + 18], 0);
                pos += 19;
            }
            b',' => {
                let region = Region {
                    left: u16_le(&bytes[pos + 1..]),
                    top: u16_le(&bytes[pos + 3..]),
                    width: u16_le(&bytes[pos + 5..]),
                    height: u16_le(&bytes[pos + 7..]),
                };
                assert_eq!(bytes[pos + 9], 0, "image descriptor flags");
                let min_code_bits = bytes[pos + 10];
                pos += 11;
                let mut data = vec![];
                let mut sub_blocks = vec![];
                while bytes[pos] > 0 {
                    let len = bytes[pos] as usize;
                    sub_blocks.push(len);
                    data.extend_from_slice(&bytes[pos + 1..pos + 1 + len]);
                    pos += len + 1;
                }
                pos += 1;
                let pixels = decompress(&data, min_code_bits);
                assert_eq!(pixels.len(), coords(region).count());
                let (delay_cs, disposal, transparent) = match control.take() {
                    Some((d, m, t)) => (d, Some(m), t),
                    None => (0, None, None),
                };
                gif.images.push(Image {
                    region,
                    delay_cs,
                    disposal,
                    transparent,
                    min_code_bits,
                    sub_blocks,
                    pixels,
                });
            }
            b';' => {
                assert_eq!(pos + 1, bytes.len(), "data after trailer");
                return gif;
            }
            b => panic!("unexpected block {:#x} at {}", b, pos),
        }
    }
}

/// Composite each image onto the canvas, returning one canvas per image
pub(crate) fn render(gif: &Gif) -> Vec<Vec<u8>> {
    let stride = usize::from(gif.width);
    let mut canvas = vec![gif.background; stride * usize::from(gif.height)];
    let mut canvases = vec![];
    let mut dispose: Option<(Region, u8)> = None;
    for image in &gif.images {
        if let Some((region, clr)) = dispose.take() {
            for (x, y) in coords(region) {
                canvas[y * stride + x] = clr;
            }
        }
        for ((x, y), pixel) in coords(image.region).zip(&image.pixels) {
            if Some(*pixel) != image.transparent {
                canvas[y * stride + x] = *pixel;
            }
        }
        canvases.push(canvas.clone());
        if image.disposal == Some(DisposalMethod::Background) {
            let clr = image.transparent.unwrap_or(gif.background);
            dispose = Some((image.region, clr));
        }
    }
    canvases
}
