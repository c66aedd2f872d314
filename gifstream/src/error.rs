// error.rs
//
// Copyright (c) 2019-2026  Douglas Lau
//
use std::collections::TryReserveError;
use std::fmt;
use std::io;
use std::num::TryFromIntError;

/// Errors encountered while encoding
#[derive(Debug)]
pub enum Error {
    /// A wrapped I/O error from the output sink.
    Io(io::Error),
    /// Frame buffer or code dictionary could not be allocated.
    OutOfMemory(TryReserveError),
    /// Integer out of bounds.
    TryFromInt(TryFromIntError),
    /// Canvas width or height is zero.
    InvalidFrameDimensions,
    /// Frame or raster does not match the canvas size.
    InvalidRasterDimensions,
    /// A previous frame failed; the stream cannot be resumed.
    Aborted,
}

/// Gifstream result type
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => err.fmt(fmt),
            Error::OutOfMemory(err) => err.fmt(fmt),
            Error::TryFromInt(err) => err.fmt(fmt),
            _ => fmt::Debug::fmt(self, fmt),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Io(ref err) => Some(err),
            Error::OutOfMemory(ref err) => Some(err),
            Error::TryFromInt(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<TryReserveError> for Error {
    fn from(err: TryReserveError) -> Self {
        Error::OutOfMemory(err)
    }
}

impl From<TryFromIntError> for Error {
    fn from(err: TryFromIntError) -> Self {
        Error::TryFromInt(err)
    }
}
