//! Color frequency table over an interleaved RGB buffer

use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::constants::report::CHANNELS;

/// One histogram entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorCount {
    pub color: Rgb,
    pub count: u64,
}

/// Occurrence count per distinct color
///
/// Built once from a pixel buffer and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ColorHistogram {
    counts: HashMap<Rgb, u64>,
    pixel_count: u64,
    trailing_bytes: usize,
}

impl ColorHistogram {
    /// Count every whole (R, G, B) triple in `pixels`
    ///
    /// A partial pixel at the end of the buffer is dropped; its size is kept
    /// in [`ColorHistogram::trailing_bytes`].
    pub fn from_bytes(pixels: &[u8]) -> Self {
        let mut counts: HashMap<Rgb, u64> = HashMap::new();
        let chunks = pixels.chunks_exact(CHANNELS);
        let trailing_bytes = chunks.remainder().len();

        let mut pixel_count = 0;
        for color in chunks.filter_map(Rgb::from_chunk) {
            *counts.entry(color).or_default() += 1;
            pixel_count += 1;
        }

        debug!(
            "histogram: {} pixels, {} distinct colors, {} trailing bytes",
            pixel_count,
            counts.len(),
            trailing_bytes
        );

        Self {
            counts,
            pixel_count,
            trailing_bytes,
        }
    }

    /// Build directly from (color, count) pairs; repeated colors accumulate
    pub fn from_counts(entries: impl IntoIterator<Item = (Rgb, u64)>) -> Self {
        let mut histogram = Self::default();
        for (color, count) in entries {
            *histogram.counts.entry(color).or_default() += count;
            histogram.pixel_count += count;
        }
        histogram
    }

    /// Occurrences of `color`, zero when absent
    pub fn count(&self, color: &Rgb) -> u64 {
        self.counts.get(color).copied().unwrap_or(0)
    }

    pub fn contains(&self, color: &Rgb) -> bool {
        self.counts.contains_key(color)
    }

    /// Whole pixels counted
    pub fn pixel_count(&self) -> u64 {
        self.pixel_count
    }

    pub fn unique_colors(&self) -> usize {
        self.counts.len()
    }

    pub fn trailing_bytes(&self) -> usize {
        self.trailing_bytes
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// All entries, most frequent first, ties by ascending color
    pub fn sorted_by_count(&self) -> Vec<ColorCount> {
        let mut entries: Vec<ColorCount> = self
            .counts
            .iter()
            .map(|(&color, &count)| ColorCount { color, count })
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count).then(a.color.cmp(&b.color)));
        entries
    }

    /// The `k` most frequent colors
    pub fn top_colors(&self, k: usize) -> Vec<ColorCount> {
        let mut entries = self.sorted_by_count();
        entries.truncate(k);
        entries
    }

    /// Iterate entries in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = ColorCount> + '_ {
        self.counts
            .iter()
            .map(|(&color, &count)| ColorCount { color, count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_counts_pixels() {
        let bytes = [0, 0, 255, 0, 0, 255, 255, 0, 0];
        let histogram = ColorHistogram::from_bytes(&bytes);

        assert_eq!(histogram.pixel_count(), 3);
        assert_eq!(histogram.unique_colors(), 2);
        assert_eq!(histogram.count(&Rgb::BLUE), 2);
        assert_eq!(histogram.count(&Rgb::RED), 1);
        assert_eq!(histogram.count(&Rgb::GREEN), 0);
        assert_eq!(histogram.trailing_bytes(), 0);
    }

    #[test]
    fn test_partial_trailing_pixel_dropped() {
        let bytes = [1, 2, 3, 4, 5, 6, 7, 8];
        let histogram = ColorHistogram::from_bytes(&bytes);

        assert_eq!(histogram.pixel_count(), 2);
        assert_eq!(histogram.trailing_bytes(), 2);
        assert!(!histogram.contains(&Rgb::new(7, 8, 0)));
    }

    #[test]
    fn test_counts_sum_to_floor_of_len_over_three() {
        let bytes: Vec<u8> = (0..=100u8).collect();
        let histogram = ColorHistogram::from_bytes(&bytes);

        let total: u64 = histogram.iter().map(|entry| entry.count).sum();
        assert_eq!(histogram.pixel_count(), (bytes.len() / 3) as u64);
        assert_eq!(total, histogram.pixel_count());
    }

    #[test]
    fn test_empty_buffer() {
        let histogram = ColorHistogram::from_bytes(&[]);
        assert!(histogram.is_empty());
        assert_eq!(histogram.pixel_count(), 0);
        assert!(histogram.top_colors(5).is_empty());
    }

    #[test]
    fn test_top_colors_ties_break_by_ascending_color() {
        let histogram = ColorHistogram::from_counts([
            (Rgb::new(9, 9, 9), 4),
            (Rgb::new(0, 0, 1), 2),
            (Rgb::new(0, 0, 0), 2),
            (Rgb::new(5, 0, 0), 7),
        ]);

        let top = histogram.top_colors(3);
        let colors: Vec<Rgb> = top.iter().map(|entry| entry.color).collect();
        assert_eq!(
            colors,
            vec![Rgb::new(5, 0, 0), Rgb::new(9, 9, 9), Rgb::new(0, 0, 0)]
        );
        assert_eq!(top[0].count, 7);
    }

    #[test]
    fn test_from_counts_accumulates() {
        let histogram = ColorHistogram::from_counts([(Rgb::RED, 3), (Rgb::RED, 2)]);
        assert_eq!(histogram.count(&Rgb::RED), 5);
        assert_eq!(histogram.pixel_count(), 5);
    }
}
