//! 8-bit RGB pixel used as a histogram key

use serde::{Deserialize, Serialize};
use std::fmt;

/// An (R, G, B) triple of 8-bit channels
///
/// Ordering is lexicographic over (r, g, b); reports rely on it to break
/// ties deterministically. Serializes as `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a pixel from the first three bytes of `chunk`
    ///
    /// Returns `None` when fewer than three bytes are available.
    pub fn from_chunk(chunk: &[u8]) -> Option<Self> {
        match chunk {
            [r, g, b, ..] => Some(Self::new(*r, *g, *b)),
            _ => None,
        }
    }

    /// Sum of absolute per-channel differences
    pub fn manhattan_distance(&self, other: &Rgb) -> u32 {
        self.channels()
            .iter()
            .zip(other.channels().iter())
            .map(|(&a, &b)| u32::from(a.abs_diff(b)))
            .sum()
    }

    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(color: Rgb) -> Self {
        color.channels()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RGB({}, {}, {})", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan_distance() {
        assert_eq!(Rgb::new(10, 10, 10).manhattan_distance(&Rgb::BLACK), 30);
        assert_eq!(Rgb::BLACK.manhattan_distance(&Rgb::WHITE), 765);
        assert_eq!(Rgb::BLUE.manhattan_distance(&Rgb::BLUE), 0);
        assert_eq!(Rgb::new(0, 5, 250).manhattan_distance(&Rgb::BLUE), 10);
    }

    #[test]
    fn test_from_chunk_requires_three_bytes() {
        assert_eq!(Rgb::from_chunk(&[1, 2, 3]), Some(Rgb::new(1, 2, 3)));
        assert_eq!(Rgb::from_chunk(&[1, 2]), None);
        assert_eq!(Rgb::from_chunk(&[]), None);
    }

    #[test]
    fn test_ordering_is_channel_lexicographic() {
        let mut colors = vec![Rgb::new(0, 1, 0), Rgb::new(0, 0, 9), Rgb::new(1, 0, 0)];
        colors.sort();
        assert_eq!(
            colors,
            vec![Rgb::new(0, 0, 9), Rgb::new(0, 1, 0), Rgb::new(1, 0, 0)]
        );
    }

    #[test]
    fn test_display_and_serde() {
        assert_eq!(Rgb::BLUE.to_string(), "RGB(0, 0, 255)");

        let json = serde_json::to_string(&Rgb::RED).unwrap();
        assert_eq!(json, "[255,0,0]");
        let back: Rgb = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Rgb::RED);
    }
}
