//! # colorcheck
//!
//! Diagnostics used while developing an image codec.
//!
//! This library provides two independent checks:
//! - Color frequency analysis of binary PPM (P6) images against an expected
//!   solid color, with a nearest-color search when it is absent
//! - A bit-exact fixed-point RGB to YCbCr transform with signed 8-bit range
//!   validation, for comparing against a reference encoder
//!
//! Every operation returns structured results; rendering lives in [`report`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use colorcheck::{check_file, Rgb};
//! use std::path::Path;
//!
//! let report = check_file(Path::new("solid_blue.ppm"), Some(Rgb::BLUE))?;
//! println!("{} distinct colors", report.unique_colors);
//!
//! let ycc = colorcheck::rgb_to_ycbcr(0, 0, 255);
//! println!("{} in range: {}", ycc, ycc.in_range());
//! # Ok::<(), colorcheck::AnalysisError>(())
//! ```

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod ppm;
pub mod report;

pub use color::{
    rgb_to_ycbcr, Coefficients, ColorAnalyzer, ColorHistogram, ColorReport, ExpectedMatch, Rgb,
    TransformCheck, YCbCr,
};
pub use config::{CheckerConfig, FileSpec};
pub use error::{AnalysisError, Result, Warning};
pub use ppm::{load_ppm, PpmImage};

/// What happened to one file of a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub status: FileStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum FileStatus {
    Analyzed(ColorReport),
    Missing,
    Failed { reason: String },
}

/// Load one PPM file and analyze it with the default report sizes
///
/// # Errors
///
/// Returns `AnalysisError` if the file is missing, unreadable or not a P6 image.
pub fn check_file(path: &Path, expected: Option<Rgb>) -> Result<ColorReport> {
    let image = load_ppm(path)?;
    Ok(ColorAnalyzer::new().analyze(&image, expected))
}

/// Analyze every file in `config`, in order
///
/// A file that cannot be loaded becomes a [`FileStatus::Missing`] or
/// [`FileStatus::Failed`] outcome; the batch always runs to the end.
pub fn check_files(config: &CheckerConfig) -> Vec<FileOutcome> {
    let analyzer = config.analyzer();

    config
        .files
        .iter()
        .map(|spec| {
            let status = match load_ppm(&spec.path) {
                Ok(image) => {
                    info!("analyzing {}", spec.path.display());
                    FileStatus::Analyzed(analyzer.analyze(&image, spec.expected))
                }
                Err(AnalysisError::NotFound { .. }) => {
                    warn!("{} not found, skipping", spec.path.display());
                    FileStatus::Missing
                }
                Err(error) => {
                    warn!("{}", error);
                    FileStatus::Failed {
                        reason: error.to_string(),
                    }
                }
            };
            FileOutcome {
                path: spec.path.clone(),
                status,
            }
        })
        .collect()
}

/// Run the reference colors through the reference transform
pub fn check_reference_transform() -> Vec<TransformCheck> {
    color::ycbcr::check_colors(&Coefficients::REFERENCE, color::ycbcr::reference_colors())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_files_missing_is_not_fatal() {
        let config = CheckerConfig::with_files(vec![
            FileSpec::new("no_such_file_colorcheck_a.ppm", Some(Rgb::BLUE)),
            FileSpec::new("no_such_file_colorcheck_b.ppm", None),
        ]);
        let outcomes = check_files(&config);

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| o.status == FileStatus::Missing));
    }

    #[test]
    fn test_check_reference_transform() {
        let checks = check_reference_transform();
        assert_eq!(checks.len(), 5);
        assert_eq!(checks[4].output, YCbCr { y: -128, cb: -128, cr: -128 });
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = FileOutcome {
            path: PathBuf::from("x.ppm"),
            status: FileStatus::Failed {
                reason: "boom".into(),
            },
        };

        let json = serde_json::to_string(&outcome).unwrap();
        let deserialized: FileOutcome = serde_json::from_str(&json).unwrap();

        assert_eq!(outcome, deserialized);
    }
}
