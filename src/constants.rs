//! Reference constants for the fixed-point transform and the color report
//!
//! The multiplier tables are the authoritative contract of the reference
//! encoder. They are compile-time values and are never recomputed.

/// Fixed-point RGB to YCbCr parameters
///
/// Every multiplier is a real coefficient scaled by 2^16. Row order is
/// (R, G, B) for each output channel.
pub mod ycbcr {
    /// Scale applied to real coefficients
    pub const SCALE: i32 = 1 << FRACTION_BITS;

    /// Number of fractional bits in the multipliers
    pub const FRACTION_BITS: u32 = 16;

    /// Added before the shift so the result rounds to nearest
    pub const ROUNDING_BIAS: i32 = 1 << (FRACTION_BITS - 1);

    /// Subtracted after the shift to center samples on zero
    pub const CENTER_OFFSET: i32 = 128;

    /// Luma: 0.299, 0.587, 0.114
    pub const Y_MULTIPLIERS: [i32; 3] = [19595, 38469, 7472];

    /// Blue-difference chroma: -0.168, -0.331, 0.500
    pub const CB_MULTIPLIERS: [i32; 3] = [-11010, -21693, 32768];

    /// Red-difference chroma: 0.500, -0.418, -0.081
    pub const CR_MULTIPLIERS: [i32; 3] = [32768, -27395, -5308];

    /// Real-valued coefficients the multipliers approximate
    pub const REAL_COEFFICIENTS: [[f64; 3]; 3] = [
        [0.299, 0.587, 0.114],
        [-0.168, -0.331, 0.500],
        [0.500, -0.418, -0.081],
    ];
}

/// Valid range for a signed 8-bit sample
pub mod range {
    pub const SAMPLE_MIN: i32 = i8::MIN as i32;
    pub const SAMPLE_MAX: i32 = i8::MAX as i32;
}

/// Defaults for the color frequency report
pub mod report {
    /// Most common colors listed per image
    pub const TOP_COLORS: usize = 5;

    /// Closest candidates listed when the expected color is absent
    pub const NEAREST_MATCHES: usize = 3;

    /// Leading pixels kept verbatim for inspection
    pub const SAMPLE_PIXELS: usize = 10;

    /// Bytes per interleaved RGB pixel
    pub const CHANNELS: usize = 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_point_parameters() {
        assert_eq!(ycbcr::SCALE, 65536);
        assert_eq!(ycbcr::ROUNDING_BIAS, 32768);
    }

    #[test]
    fn test_luma_multipliers_sum_close_to_scale() {
        let sum: i32 = ycbcr::Y_MULTIPLIERS.iter().sum();
        assert!((sum - ycbcr::SCALE).abs() <= 2);
    }

    #[test]
    fn test_sample_range() {
        assert_eq!(range::SAMPLE_MIN, -128);
        assert_eq!(range::SAMPLE_MAX, 127);
    }
}
