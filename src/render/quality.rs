//! Render quality profiles
//!
//! Each quality maps to both a `manim` CLI flag and the resolution/frame-rate
//! folder Manim writes output under. The folder names are an external
//! contract with Manim's own output discovery; changing them here without a
//! matching renderer change produces false "video not found" failures.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rendering quality profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    /// 480p @ 15fps, fastest renders
    Low,
    /// 720p @ 30fps
    Medium,
    /// 1080p @ 60fps
    High,
    /// 2160p @ 60fps (4k)
    Ultra,
}

impl Quality {
    /// The `manim` command-line flag selecting this quality
    pub fn cli_flag(&self) -> &'static str {
        match self {
            Quality::Low => "-ql",
            Quality::Medium => "-qm",
            Quality::High => "-qh",
            Quality::Ultra => "-qk",
        }
    }

    /// The output folder name Manim uses for this quality
    pub fn folder(&self) -> &'static str {
        match self {
            Quality::Low => "480p15",
            Quality::Medium => "720p30",
            Quality::High => "1080p60",
            Quality::Ultra => "2160p60",
        }
    }

    /// All quality profiles, in ascending render cost
    pub fn all() -> [Quality; 4] {
        [Quality::Low, Quality::Medium, Quality::High, Quality::Ultra]
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Quality::Low => "low",
            Quality::Medium => "medium",
            Quality::High => "high",
            Quality::Ultra => "ultra",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Quality {
    type Err = String;

    /// Parses a quality name; unrecognized names are a hard error rather
    /// than a silent fallback, so configuration typos surface immediately.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Quality::Low),
            "medium" => Ok(Quality::Medium),
            "high" => Ok(Quality::High),
            "ultra" => Ok(Quality::Ultra),
            other => Err(format!(
                "Invalid quality: {}. Valid options: low, medium, high, ultra",
                other
            )),
        }
    }
}
