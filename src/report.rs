//! Plain-text rendering of analysis results
//!
//! Kept apart from the analysis so the binaries can swap it for JSON.

use std::fmt;

use crate::color::{ColorReport, ExpectedMatch, TransformCheck};
use crate::{FileOutcome, FileStatus};

/// Render one file's outcome as a human-readable block
pub fn render_outcome(outcome: &FileOutcome) -> String {
    match &outcome.status {
        FileStatus::Analyzed(report) => render_color_report(&outcome.path.display().to_string(), report),
        FileStatus::Missing => format!("File {} not found\n", outcome.path.display()),
        FileStatus::Failed { reason } => format!("Error: {}\n", reason),
    }
}

/// Render a color report under `name`
pub fn render_color_report(name: &str, report: &ColorReport) -> String {
    NamedReport { name, report }.to_string()
}

/// Render transform checks as one aligned line per color
pub fn render_transform_checks(checks: &[TransformCheck]) -> String {
    checks.iter().map(ToString::to_string).collect()
}

/// A color report displayed under the name of its source file
pub struct NamedReport<'a> {
    pub name: &'a str,
    pub report: &'a ColorReport,
}

impl fmt::Display for NamedReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { name, report } = self;

        writeln!(f, "File: {}", name)?;
        writeln!(f, "  Dimensions: {}x{}", report.width, report.height)?;
        writeln!(f, "  Max value: {}", report.max_value)?;
        writeln!(f, "  Expected bytes: {}", report.expected_bytes)?;
        writeln!(f, "  Actual bytes: {}", report.actual_bytes)?;
        for warning in &report.warnings {
            writeln!(f, "  Warning: {}", warning)?;
        }

        writeln!(f)?;
        writeln!(f, "=== Color Analysis for {} ===", name)?;
        if let Some(expected) = &report.expected {
            let color = match expected {
                ExpectedMatch::Found { color, .. } | ExpectedMatch::Missing { color, .. } => color,
            };
            writeln!(f, "Expected color: {}", color)?;
        }
        writeln!(f, "Total unique colors: {}", report.unique_colors)?;
        let sample: Vec<String> = report.sample.iter().map(ToString::to_string).collect();
        writeln!(
            f,
            "First {} pixels: [{}]",
            report.sample.len(),
            sample.join(", ")
        )?;

        writeln!(f, "Most common colors:")?;
        for share in &report.top_colors {
            writeln!(
                f,
                "  {}: {} pixels ({:.1}%)",
                share.color, share.count, share.percentage
            )?;
        }

        match &report.expected {
            Some(ExpectedMatch::Found {
                color,
                count,
                percentage,
            }) => {
                writeln!(f)?;
                writeln!(
                    f,
                    "✅ Expected color {} found: {} pixels ({:.1}%)",
                    color, count, percentage
                )
            }
            Some(ExpectedMatch::Missing { color, closest }) => {
                writeln!(f)?;
                writeln!(f, "❌ Expected color {} NOT found!", color)?;
                writeln!(f, "Closest colors found:")?;
                for candidate in closest {
                    writeln!(
                        f,
                        "  {} (distance {}, ΔE {:.1}): {} pixels ({:.1}%)",
                        candidate.color,
                        candidate.distance,
                        candidate.delta_e,
                        candidate.count,
                        candidate.percentage
                    )?;
                }
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl fmt::Display for TransformCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>6} RGB({:3}, {:3}, {:3}) -> {}",
            self.name, self.input.r, self.input.g, self.input.b, self.output
        )?;
        if let Some(warning) = &self.warning {
            writeln!(f, "  WARNING: {}", warning)?;
        }
        Ok(())
    }
}
