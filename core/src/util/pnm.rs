//! PNM, also known as NetPBM, file format support.
//!
//! PNM is a venerable family of extremely simple image formats, each
//! consisting of a simple textual header followed by either text or
//! binary pixel data. Only writing the binary RGB sub-format, PPM P6,
//! is supported; it is enough to dump a rendered frame for inspection.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use crate::math::color::Color;
use crate::util::buf::Buf2;

/// Writes a `0xAA_RR_GG_BB` pixel buffer to a file in PPM format, P6
/// sub-format (binary 8-bits-per-channel RGB). Alpha is discarded.
///
/// Caution: This function overwrites the file if it already exists.
/// Use [`write_ppm`] for more control over file creation.
///
/// # Errors
/// Returns [`std::io::Error`] if an error occurs while writing.
pub fn save_ppm(path: impl AsRef<Path>, buf: &Buf2<u32>) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_ppm(&mut out, buf)?;
    out.flush()
}

/// Writes a `0xAA_RR_GG_BB` pixel buffer to `out` in PPM format, P6
/// sub-format (binary 8-bits-per-channel RGB). Alpha is discarded.
///
/// # Errors
/// Returns [`std::io::Error`] if an error occurs while writing.
pub fn write_ppm(mut out: impl Write, buf: &Buf2<u32>) -> io::Result<()> {
    writeln!(out, "P6 {} {} 255", buf.width(), buf.height())?;
    buf.data()
        .iter()
        .map(|&argb| Color::from_argb_u32(argb).0)
        .try_for_each(|rgb| out.write_all(&rgb))
}
