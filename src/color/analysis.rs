//! Color frequency analysis against an expected solid color
//!
//! Summarizes a decoded image:
//! - Distinct color count and the first few pixels verbatim
//! - The most common colors with their share of the declared pixel total
//! - Whether the expected color is present, and if not, the closest colors
//!
//! Percentages are taken against `width * height` from the header rather
//! than the pixels actually present, so truncated files show up as shares
//! that do not add up to 100%.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::color::{ColorConverter, ColorHistogram, Rgb};
use crate::constants::report::{CHANNELS, NEAREST_MATCHES, SAMPLE_PIXELS, TOP_COLORS};
use crate::error::Warning;
use crate::ppm::PpmImage;

/// A color with its count and share of the declared pixel total
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorShare {
    pub color: Rgb,
    pub count: u64,
    pub percentage: f64,
}

/// Candidate returned by the nearest-color search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NearestColor {
    pub color: Rgb,
    /// Manhattan distance to the expected color
    pub distance: u32,
    /// CIE76 difference to the expected color
    pub delta_e: f32,
    pub count: u64,
    pub percentage: f64,
}

/// Outcome of looking for the expected color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExpectedMatch {
    Found {
        color: Rgb,
        count: u64,
        percentage: f64,
    },
    Missing {
        color: Rgb,
        closest: Vec<NearestColor>,
    },
}

/// Structured analysis of one image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorReport {
    pub width: usize,
    pub height: usize,
    pub max_value: u32,
    pub expected_bytes: usize,
    pub actual_bytes: usize,
    /// `width * height`, the denominator for every percentage
    pub declared_pixels: u64,
    /// Whole pixels present in the payload
    pub counted_pixels: u64,
    pub unique_colors: usize,
    pub sample: Vec<Rgb>,
    pub top_colors: Vec<ColorShare>,
    pub expected: Option<ExpectedMatch>,
    pub warnings: Vec<Warning>,
}

/// Share of `count` in `total` as a percentage; zero when `total` is zero
pub fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// Histogram-based color analyzer
#[derive(Debug, Clone)]
pub struct ColorAnalyzer {
    converter: ColorConverter,
    top_colors: usize,
    nearest_matches: usize,
    sample_pixels: usize,
}

impl Default for ColorAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorAnalyzer {
    /// Analyzer with the default report sizes (5 top colors, 3 nearest, 10 samples)
    pub fn new() -> Self {
        Self::with_params(TOP_COLORS, NEAREST_MATCHES, SAMPLE_PIXELS)
    }

    pub fn with_params(top_colors: usize, nearest_matches: usize, sample_pixels: usize) -> Self {
        Self {
            converter: ColorConverter::new(),
            top_colors,
            nearest_matches,
            sample_pixels,
        }
    }

    /// Analyze a decoded image, optionally against an expected color
    pub fn analyze(&self, image: &PpmImage, expected: Option<Rgb>) -> ColorReport {
        let histogram = ColorHistogram::from_bytes(&image.pixels);
        let declared = image.declared_pixels() as u64;

        let mut warnings = Vec::new();
        if let Some(mismatch) = image.size_mismatch() {
            warnings.push(mismatch);
        }
        if histogram.trailing_bytes() > 0 {
            warnings.push(Warning::PartialTrailingPixel {
                bytes: histogram.trailing_bytes(),
            });
        }

        let sample = image
            .pixels
            .chunks_exact(CHANNELS)
            .filter_map(Rgb::from_chunk)
            .take(self.sample_pixels)
            .collect();

        let top_colors = histogram
            .top_colors(self.top_colors)
            .into_iter()
            .map(|entry| ColorShare {
                color: entry.color,
                count: entry.count,
                percentage: percentage(entry.count, declared),
            })
            .collect();

        let expected = expected.map(|color| self.match_expected(&histogram, color, declared));

        ColorReport {
            width: image.width,
            height: image.height,
            max_value: image.max_value,
            expected_bytes: image.expected_len(),
            actual_bytes: image.actual_len(),
            declared_pixels: declared,
            counted_pixels: histogram.pixel_count(),
            unique_colors: histogram.unique_colors(),
            sample,
            top_colors,
            expected,
            warnings,
        }
    }

    /// Exact lookup, falling back to a nearest-color search
    pub fn match_expected(&self, histogram: &ColorHistogram, color: Rgb, total: u64) -> ExpectedMatch {
        if histogram.contains(&color) {
            let count = histogram.count(&color);
            ExpectedMatch::Found {
                color,
                count,
                percentage: percentage(count, total),
            }
        } else {
            let closest = self.nearest_colors(histogram, color, total);
            debug!("{} not present, {} candidates kept", color, closest.len());
            ExpectedMatch::Missing { color, closest }
        }
    }

    /// Observed colors closest to `target` by Manhattan distance
    ///
    /// Ties are broken by ascending color. An empty histogram yields an
    /// empty list.
    pub fn nearest_colors(&self, histogram: &ColorHistogram, target: Rgb, total: u64) -> Vec<NearestColor> {
        let mut candidates: Vec<(u32, Rgb, u64)> = histogram
            .iter()
            .map(|entry| (entry.color.manhattan_distance(&target), entry.color, entry.count))
            .collect();
        candidates.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));

        candidates
            .into_iter()
            .take(self.nearest_matches)
            .map(|(distance, color, count)| NearestColor {
                color,
                distance,
                delta_e: self.converter.rgb_delta_e(color, target),
                count,
                percentage: percentage(count, total),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_image(color: Rgb, width: usize, height: usize) -> PpmImage {
        PpmImage {
            width,
            height,
            max_value: 255,
            pixels: color.channels().repeat(width * height),
        }
    }

    #[test]
    fn test_color_analyzer_creation() {
        let analyzer = ColorAnalyzer::new();
        assert_eq!(analyzer.top_colors, TOP_COLORS);
        assert_eq!(analyzer.nearest_matches, NEAREST_MATCHES);
        assert_eq!(analyzer.sample_pixels, SAMPLE_PIXELS);
    }

    #[test]
    fn test_percentage_guards_zero_total() {
        assert_eq!(percentage(5, 0), 0.0);
        assert_eq!(percentage(0, 0), 0.0);
        assert!((percentage(1, 4) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_exact_match_full_coverage() {
        let analyzer = ColorAnalyzer::new();
        let image = solid_image(Rgb::BLUE, 10, 10);
        let report = analyzer.analyze(&image, Some(Rgb::BLUE));

        match report.expected {
            Some(ExpectedMatch::Found { color, count, percentage }) => {
                assert_eq!(color, Rgb::BLUE);
                assert_eq!(count, 100);
                assert!((percentage - 100.0).abs() < 1e-9);
            }
            other => panic!("Expected Found, got: {:?}", other),
        }
        assert!(report.warnings.is_empty());
        assert_eq!(report.unique_colors, 1);
        assert_eq!(report.sample.len(), SAMPLE_PIXELS);
    }

    #[test]
    fn test_nearest_single_candidate() {
        let analyzer = ColorAnalyzer::new();
        let histogram = ColorHistogram::from_counts([(Rgb::new(10, 10, 10), 4)]);

        let closest = analyzer.nearest_colors(&histogram, Rgb::BLACK, 4);
        assert_eq!(closest.len(), 1);
        assert_eq!(closest[0].color, Rgb::new(10, 10, 10));
        assert_eq!(closest[0].distance, 30);
        assert!((closest[0].percentage - 100.0).abs() < 1e-9);
        assert!(closest[0].delta_e > 0.0);
    }

    #[test]
    fn test_nearest_sorted_and_truncated() {
        let analyzer = ColorAnalyzer::new();
        let histogram = ColorHistogram::from_counts([
            (Rgb::new(0, 0, 200), 1),
            (Rgb::new(0, 0, 250), 1),
            (Rgb::new(5, 0, 255), 1),
            (Rgb::new(0, 5, 255), 1),
            (Rgb::new(255, 0, 0), 1),
        ]);

        let closest = analyzer.nearest_colors(&histogram, Rgb::BLUE, 5);
        let found: Vec<(u32, Rgb)> = closest.iter().map(|c| (c.distance, c.color)).collect();
        assert_eq!(
            found,
            vec![
                (5, Rgb::new(0, 0, 250)),
                (5, Rgb::new(0, 5, 255)),
                (5, Rgb::new(5, 0, 255)),
            ]
        );
    }

    #[test]
    fn test_missing_expected_color() {
        let analyzer = ColorAnalyzer::new();
        let image = solid_image(Rgb::new(0, 0, 254), 2, 2);
        let report = analyzer.analyze(&image, Some(Rgb::BLUE));

        match report.expected {
            Some(ExpectedMatch::Missing { color, closest }) => {
                assert_eq!(color, Rgb::BLUE);
                assert_eq!(closest.len(), 1);
                assert_eq!(closest[0].distance, 1);
                assert_eq!(closest[0].count, 4);
            }
            other => panic!("Expected Missing, got: {:?}", other),
        }
    }

    #[test]
    fn test_empty_image() {
        let analyzer = ColorAnalyzer::new();
        let image = PpmImage {
            width: 0,
            height: 0,
            max_value: 255,
            pixels: Vec::new(),
        };
        let report = analyzer.analyze(&image, Some(Rgb::RED));

        assert_eq!(report.counted_pixels, 0);
        assert_eq!(report.unique_colors, 0);
        assert!(report.top_colors.is_empty());
        assert!(report.sample.is_empty());
        assert_eq!(
            report.expected,
            Some(ExpectedMatch::Missing {
                color: Rgb::RED,
                closest: Vec::new()
            })
        );
    }

    #[test]
    fn test_truncated_image_reports_warnings_and_declared_share() {
        let analyzer = ColorAnalyzer::new();
        let mut image = solid_image(Rgb::GREEN, 2, 2);
        image.pixels.truncate(7);
        let report = analyzer.analyze(&image, Some(Rgb::GREEN));

        assert_eq!(report.counted_pixels, 2);
        assert_eq!(report.declared_pixels, 4);
        assert_eq!(
            report.warnings,
            vec![
                Warning::SizeMismatch {
                    expected: 12,
                    actual: 7
                },
                Warning::PartialTrailingPixel { bytes: 1 },
            ]
        );
        match report.expected {
            Some(ExpectedMatch::Found { percentage, .. }) => {
                assert!((percentage - 50.0).abs() < 1e-9)
            }
            other => panic!("Expected Found, got: {:?}", other),
        }
    }

    #[test]
    fn test_no_expected_color() {
        let analyzer = ColorAnalyzer::with_params(2, 3, 1);
        let image = PpmImage {
            width: 3,
            height: 1,
            max_value: 255,
            pixels: vec![1, 1, 1, 2, 2, 2, 1, 1, 1],
        };
        let report = analyzer.analyze(&image, None);

        assert!(report.expected.is_none());
        assert_eq!(report.sample, vec![Rgb::new(1, 1, 1)]);
        assert_eq!(report.top_colors.len(), 2);
        assert_eq!(report.top_colors[0].color, Rgb::new(1, 1, 1));
        assert_eq!(report.top_colors[0].count, 2);
    }
}
