//! Fixed-point RGB to YCbCr transform
//!
//! Reproduces the reference encoder's integer arithmetic bit for bit:
//!
//! ```text
//! out = ((r_mul * R + g_mul * G + b_mul * B + 32768) >> 16) - 128
//! ```
//!
//! The shift is arithmetic, so negative sums floor instead of truncating
//! toward zero. Results are never clamped; use [`YCbCr::validate`] to find
//! components outside the signed 8-bit range.

use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::color::Rgb;
use crate::constants::{range, ycbcr};

/// Multiplier triples for the three output channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coefficients {
    pub y: [i32; 3],
    pub cb: [i32; 3],
    pub cr: [i32; 3],
}

impl Coefficients {
    /// Table used by the reference encoder
    pub const REFERENCE: Coefficients = Coefficients {
        y: ycbcr::Y_MULTIPLIERS,
        cb: ycbcr::CB_MULTIPLIERS,
        cr: ycbcr::CR_MULTIPLIERS,
    };

    /// Derive a table by truncating `real * 65536` toward zero
    ///
    /// Handy for comparing other encoders' tables against
    /// [`Coefficients::REFERENCE`], which stays authoritative.
    pub fn from_real(real: [[f64; 3]; 3]) -> Self {
        let scale = |row: [f64; 3]| row.map(|c| (c * f64::from(ycbcr::SCALE)) as i32);
        Self {
            y: scale(real[0]),
            cb: scale(real[1]),
            cr: scale(real[2]),
        }
    }

    /// Convert with this table
    pub fn apply(&self, r: i32, g: i32, b: i32) -> YCbCr {
        YCbCr {
            y: fixed_point_channel(self.y, r, g, b),
            cb: fixed_point_channel(self.cb, r, g, b),
            cr: fixed_point_channel(self.cr, r, g, b),
        }
    }
}

impl Default for Coefficients {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// Sums in `i64` so inputs outside `0..=255` cannot overflow; the result
/// saturates at the `i32` bounds.
fn fixed_point_channel([r_mul, g_mul, b_mul]: [i32; 3], r: i32, g: i32, b: i32) -> i32 {
    let sum = i64::from(r_mul) * i64::from(r)
        + i64::from(g_mul) * i64::from(g)
        + i64::from(b_mul) * i64::from(b);
    let value = ((sum + i64::from(ycbcr::ROUNDING_BIAS)) >> ycbcr::FRACTION_BITS)
        - i64::from(ycbcr::CENTER_OFFSET);
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Convert one RGB triple with the reference table
///
/// Inputs are expected in `0..=255` but are not validated.
pub fn rgb_to_ycbcr(r: i32, g: i32, b: i32) -> YCbCr {
    Coefficients::REFERENCE.apply(r, g, b)
}

/// Output channel of the transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Channel {
    Y,
    Cb,
    Cr,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::Y => "Y",
            Channel::Cb => "Cb",
            Channel::Cr => "Cr",
        };
        f.write_str(name)
    }
}

/// Signed, zero-centered YCbCr sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YCbCr {
    pub y: i32,
    pub cb: i32,
    pub cr: i32,
}

impl YCbCr {
    pub fn components(&self) -> [(Channel, i32); 3] {
        [(Channel::Y, self.y), (Channel::Cb, self.cb), (Channel::Cr, self.cr)]
    }

    pub fn in_range(&self) -> bool {
        self.out_of_range_channels().is_empty()
    }

    /// Channels whose value falls outside `-128..=127`
    pub fn out_of_range_channels(&self) -> Vec<Channel> {
        self.components()
            .into_iter()
            .filter(|(_, value)| !(range::SAMPLE_MIN..=range::SAMPLE_MAX).contains(value))
            .map(|(channel, _)| channel)
            .collect()
    }

    /// Flag components that do not fit a signed 8-bit sample
    pub fn validate(&self) -> Option<RangeWarning> {
        let channels = self.out_of_range_channels();
        if channels.is_empty() {
            None
        } else {
            Some(RangeWarning {
                value: *self,
                channels,
            })
        }
    }
}

impl fmt::Display for YCbCr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "YCbCr({:4}, {:4}, {:4})", self.y, self.cb, self.cr)
    }
}

/// A transform output with at least one component outside `-128..=127`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeWarning {
    pub value: YCbCr,
    pub channels: Vec<Channel>,
}

impl fmt::Display for RangeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let channels: Vec<String> = self.channels.iter().map(Channel::to_string).collect();
        write!(
            f,
            "values out of i8 range ({}) in {}",
            channels.join(", "),
            self.value
        )
    }
}

/// Result of running one named color through the transform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformCheck {
    pub name: String,
    pub input: Rgb,
    pub output: YCbCr,
    pub warning: Option<RangeWarning>,
}

/// Colors exercised by the transform check
pub fn reference_colors() -> Vec<(&'static str, Rgb)> {
    vec![
        ("Blue", Rgb::BLUE),
        ("Red", Rgb::RED),
        ("Green", Rgb::GREEN),
        ("White", Rgb::WHITE),
        ("Black", Rgb::BLACK),
    ]
}

/// Transform and range-check each named color
pub fn check_colors<'a, I>(coefficients: &Coefficients, colors: I) -> Vec<TransformCheck>
where
    I: IntoIterator<Item = (&'a str, Rgb)>,
{
    colors
        .into_iter()
        .map(|(name, input)| {
            let output = coefficients.apply(i32::from(input.r), i32::from(input.g), i32::from(input.b));
            let warning = output.validate();
            if let Some(warning) = &warning {
                warn!("{} {}: {}", name, input, warning);
            }
            TransformCheck {
                name: name.to_string(),
                input,
                output,
                warning,
            }
        })
        .collect()
}
