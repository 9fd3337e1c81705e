//! Binary PPM (P6) loading
//!
//! Header layout:
//!
//! ```text
//! P6
//! # zero or more comment lines
//! <width> <height>
//! <max value>
//! <raw interleaved RGB bytes>
//! ```
//!
//! Only whole-line comments directly after the magic are skipped. The pixel
//! payload is taken as-is: a size disagreement with the header is reported
//! as a [`Warning`], never as an error, so truncated files stay inspectable.

use log::{debug, warn};
use std::path::Path;

use crate::constants::report::CHANNELS;
use crate::error::{AnalysisError, Result, Warning};

/// Magic token of the binary RGB variant
pub const PPM_MAGIC: &str = "P6";

/// Decoded header plus raw pixel payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PpmImage {
    pub width: usize,
    pub height: usize,
    pub max_value: u32,
    pub pixels: Vec<u8>,
}

impl PpmImage {
    /// Pixel count declared by the header
    ///
    /// Saturates instead of overflowing; [`parse_ppm`] rejects such headers.
    pub fn declared_pixels(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Payload length declared by the header
    pub fn expected_len(&self) -> usize {
        self.declared_pixels().saturating_mul(CHANNELS)
    }

    pub fn actual_len(&self) -> usize {
        self.pixels.len()
    }

    /// Declared versus present byte count, if they differ
    pub fn size_mismatch(&self) -> Option<Warning> {
        let expected = self.expected_len();
        let actual = self.actual_len();
        (expected != actual).then_some(Warning::SizeMismatch { expected, actual })
    }
}

/// Read and parse a P6 file from disk
///
/// # Errors
///
/// - [`AnalysisError::NotFound`] / [`AnalysisError::Io`] if the file cannot be read
/// - [`AnalysisError::Format`] if the magic is not `P6`
/// - [`AnalysisError::Header`] if dimensions or max value are unreadable
pub fn load_ppm(path: &Path) -> Result<PpmImage> {
    let bytes = std::fs::read(path).map_err(|e| AnalysisError::io(path, e))?;
    parse_ppm(&bytes, path)
}

/// Parse an in-memory P6 file; `path` is only used in error messages
pub fn parse_ppm(bytes: &[u8], path: &Path) -> Result<PpmImage> {
    let mut lines = HeaderLines::new(bytes);

    let magic = lines.next_line();
    if magic != Some(PPM_MAGIC) {
        return Err(AnalysisError::Format {
            path: path.to_path_buf(),
            found: magic.unwrap_or_default().to_string(),
        });
    }

    let mut line = lines.next_line();
    while let Some(comment) = line.filter(|l| l.starts_with('#')) {
        debug!("{}: skipping comment {:?}", path.display(), comment);
        line = lines.next_line();
    }

    let dims = line.ok_or_else(|| AnalysisError::header(path, "missing dimensions line"))?;
    let (width, height) = parse_dimensions(dims)
        .ok_or_else(|| AnalysisError::header(path, format!("invalid dimensions {:?}", dims)))?;
    if declared_len(width, height).is_none() {
        return Err(AnalysisError::header(
            path,
            format!("dimensions overflow: {}x{}", width, height),
        ));
    }

    let max_line = lines
        .next_line()
        .ok_or_else(|| AnalysisError::header(path, "missing max value line"))?;
    let max_value = max_line
        .parse::<u32>()
        .map_err(|e| AnalysisError::header(path, format!("invalid max value {:?}: {}", max_line, e)))?;

    let image = PpmImage {
        width,
        height,
        max_value,
        pixels: lines.rest().to_vec(),
    };

    debug!(
        "{}: {}x{} max {} ({} of {} bytes)",
        path.display(),
        image.width,
        image.height,
        image.max_value,
        image.actual_len(),
        image.expected_len()
    );
    if let Some(mismatch) = image.size_mismatch() {
        warn!("{}: {}", path.display(), mismatch);
    }

    Ok(image)
}

/// `width * height * 3`, or `None` if it does not fit in `usize`
fn declared_len(width: usize, height: usize) -> Option<usize> {
    width.checked_mul(height)?.checked_mul(CHANNELS)
}

fn parse_dimensions(line: &str) -> Option<(usize, usize)> {
    let mut fields = line.split_whitespace();
    let width = fields.next()?.parse().ok()?;
    let height = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some((width, height))
}

/// Line reader over the ASCII header that leaves the binary tail untouched
struct HeaderLines<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> HeaderLines<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Next `\n`-terminated line, trimmed; `None` at end of input or on non-UTF-8
    fn next_line(&mut self) -> Option<&'a str> {
        if self.pos >= self.bytes.len() {
            return None;
        }
        let remaining = &self.bytes[self.pos..];
        let len = remaining
            .iter()
            .position(|&b| b == b'\n')
            .map_or(remaining.len(), |i| i + 1);
        self.pos += len;
        std::str::from_utf8(&remaining[..len]).ok().map(str::trim)
    }

    fn rest(&self) -> &'a [u8] {
        &self.bytes[self.pos.min(self.bytes.len())..]
    }
}
