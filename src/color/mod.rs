//! Color analysis and conversion module
//!
//! This module holds the pixel key type, the color histogram, the
//! histogram-based analyzer, the fixed-point YCbCr transform and the
//! Lab conversion used for perceptual distances.

pub mod analysis;
pub mod conversion;
pub mod histogram;
pub mod pixel;
pub mod ycbcr;

pub use analysis::{ColorAnalyzer, ColorReport, ColorShare, ExpectedMatch, NearestColor};
pub use conversion::ColorConverter;
pub use histogram::{ColorCount, ColorHistogram};
pub use pixel::Rgb;
pub use ycbcr::{rgb_to_ycbcr, Coefficients, RangeWarning, TransformCheck, YCbCr};
