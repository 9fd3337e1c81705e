//! Configuration for a color check run
//!
//! A run is a list of files, each with an optional expected solid color,
//! plus the sizes of the report sections. Configuration can be loaded from
//! JSON or built programmatically:
//!
//! ```no_run
//! use colorcheck::CheckerConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = CheckerConfig::from_json_file(Path::new("colors.json"))?;
//!
//! // Or use the solid-color fixtures
//! let config = CheckerConfig::default_solid_colors();
//! # Ok::<(), colorcheck::AnalysisError>(())
//! ```
//!
//! Colors are written as `[r, g, b]` arrays:
//!
//! ```json
//! { "files": [ { "path": "solid_blue.ppm", "expected": [0, 0, 255] } ] }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::color::{ColorAnalyzer, Rgb};
use crate::constants::report::{NEAREST_MATCHES, SAMPLE_PIXELS, TOP_COLORS};
use crate::error::{AnalysisError, Result};

/// Complete configuration for a batch of PPM files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckerConfig {
    /// Files to analyze, in order
    pub files: Vec<FileSpec>,

    /// Most common colors listed per file
    #[serde(default = "default_top_colors")]
    pub top_colors: usize,

    /// Closest candidates listed when the expected color is missing
    #[serde(default = "default_nearest_matches")]
    pub nearest_matches: usize,

    /// Leading pixels shown verbatim
    #[serde(default = "default_sample_pixels")]
    pub sample_pixels: usize,
}

/// One file and the solid color it should contain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSpec {
    pub path: PathBuf,

    #[serde(default)]
    pub expected: Option<Rgb>,
}

impl FileSpec {
    pub fn new(path: impl Into<PathBuf>, expected: Option<Rgb>) -> Self {
        Self {
            path: path.into(),
            expected,
        }
    }
}

fn default_top_colors() -> usize {
    TOP_COLORS
}

fn default_nearest_matches() -> usize {
    NEAREST_MATCHES
}

fn default_sample_pixels() -> usize {
    SAMPLE_PIXELS
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self::default_solid_colors()
    }
}

impl CheckerConfig {
    /// The solid blue, red and green fixtures produced by the encoder tests
    pub fn default_solid_colors() -> Self {
        Self::with_files(vec![
            FileSpec::new("solid_blue.ppm", Some(Rgb::BLUE)),
            FileSpec::new("solid_red.ppm", Some(Rgb::RED)),
            FileSpec::new("solid_green.ppm", Some(Rgb::GREEN)),
        ])
    }

    /// Default report sizes for the given files
    pub fn with_files(files: Vec<FileSpec>) -> Self {
        Self {
            files,
            top_colors: TOP_COLORS,
            nearest_matches: NEAREST_MATCHES,
            sample_pixels: SAMPLE_PIXELS,
        }
    }

    /// Analyzer sized according to this configuration
    pub fn analyzer(&self) -> ColorAnalyzer {
        ColorAnalyzer::with_params(self.top_colors, self.nearest_matches, self.sample_pixels)
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::config(format!("cannot read {}", path.display()), e)
        })?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| AnalysisError::config("invalid configuration JSON", e))
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AnalysisError::config("cannot serialize configuration", e))?;
        std::fs::write(path, json).map_err(|e| {
            AnalysisError::config(format!("cannot write {}", path.display()), e)
        })
    }
}
