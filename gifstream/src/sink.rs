// sink.rs
//
// Copyright (c) 2026  Douglas Lau
//
use std::io::{self, Write};

/// Output sink which keeps track of its position
pub(crate) struct Sink<W: Write> {
    /// Wrapped writer
    writer: W,
    /// Number of bytes written
    position: u64,
}

impl<W: Write> Sink<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Sink {
            writer,
            position: 0,
        }
    }

    /// Get the number of bytes written so far
    pub fn position(&self) -> u64 {
        self.position
    }
}

impl<W: Write> Write for Sink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.writer.write(buf)?;
        self.position += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
