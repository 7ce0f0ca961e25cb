//! Output formatting for render results and health checks
//!
//! This module provides formatters for JSON (machine-readable) and
//! human-readable text output.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

use crate::pipeline::RenderReport;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// Human-readable formatted text
    Human,
}

/// Result of an environment health check
#[derive(Debug, Clone, Serialize)]
pub struct DoctorReport {
    /// Configured renderer executable
    pub renderer: PathBuf,
    /// Whether the renderer responded to a version probe
    pub renderer_available: bool,
    /// First line of the renderer's version output, if any
    pub renderer_version: Option<String>,
    /// Configured LLM provider
    pub provider: String,
    /// Configured model
    pub model: String,
    /// Configured render quality
    pub quality: String,
    /// Whether configuration validation passed
    pub config_valid: bool,
    /// Validation error, if configuration is invalid
    pub config_error: Option<String>,
}

impl DoctorReport {
    /// True when everything needed for a render is in place
    pub fn healthy(&self) -> bool {
        self.renderer_available && self.config_valid
    }
}

/// Output formatter for CLI results
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    /// Creates a new output formatter with the specified format
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a completed render report
    pub fn format_report(&self, report: &RenderReport, show_code: bool) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(report).context("Failed to serialize render report")
            }
            OutputFormat::Human => Ok(self.format_report_human(report, show_code)),
        }
    }

    /// Formats a doctor report
    pub fn format_doctor(&self, report: &DoctorReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(report).context("Failed to serialize doctor report")
            }
            OutputFormat::Human => Ok(self.format_doctor_human(report)),
        }
    }

    fn format_report_human(&self, report: &RenderReport, show_code: bool) -> String {
        let mut out = String::new();

        out.push_str(&format!("Animation: {}\n", report.prompt));
        out.push_str(&format!("Scene:     {}\n", report.scene_name));
        out.push_str(&format!("Video:     {}\n", report.video_path.display()));
        out.push_str(&format!(
            "Timing:    generated in {:.1}s, rendered in {:.1}s\n",
            report.generation_time.as_secs_f64(),
            report.render_time.as_secs_f64()
        ));

        if show_code {
            out.push_str("\nGenerated Manim code:\n");
            out.push_str(&report.generated_code);
            if !report.generated_code.ends_with('\n') {
                out.push('\n');
            }
        }

        out
    }

    fn format_doctor_human(&self, report: &DoctorReport) -> String {
        let mut out = String::new();

        let renderer_status = if report.renderer_available {
            match &report.renderer_version {
                Some(version) => format!("ok ({})", version),
                None => "ok".to_string(),
            }
        } else {
            "NOT FOUND".to_string()
        };
        out.push_str(&format!(
            "Renderer:  {} ... {}\n",
            report.renderer.display(),
            renderer_status
        ));

        out.push_str(&format!(
            "Provider:  {} (model: {})\n",
            report.provider, report.model
        ));
        out.push_str(&format!("Quality:   {}\n", report.quality));

        match &report.config_error {
            None => out.push_str("Config:    ok\n"),
            Some(error) => out.push_str(&format!("Config:    INVALID ({})\n", error)),
        }

        if !report.renderer_available {
            out.push_str(
                "\nManim was not found. Install it (https://www.manim.community/) or set \
                 SKETCHMOTION_RENDERER to the executable path.\n",
            );
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::time::Duration;
    use uuid::Uuid;

    fn sample_report() -> RenderReport {
        RenderReport {
            request_id: Uuid::nil(),
            prompt: "a circle".to_string(),
            scene_name: "SimpleCircle".to_string(),
            video_path: PathBuf::from("media/videos/tmp/480p15/SimpleCircle.mp4"),
            generated_code: "from manim import *\n".to_string(),
            generation_time: Duration::from_millis(1500),
            render_time: Duration::from_millis(8200),
            completed_at: Utc::now(),
        }
    }

    #[test]
    fn test_human_report_contains_key_fields() {
        let formatter = OutputFormatter::new(OutputFormat::Human);
        let output = formatter.format_report(&sample_report(), false).unwrap();

        assert!(output.contains("SimpleCircle"));
        assert!(output.contains("SimpleCircle.mp4"));
        assert!(!output.contains("from manim import"));
    }

    #[test]
    fn test_human_report_show_code() {
        let formatter = OutputFormatter::new(OutputFormat::Human);
        let output = formatter.format_report(&sample_report(), true).unwrap();
        assert!(output.contains("from manim import *"));
    }

    #[test]
    fn test_json_report_is_valid_json() {
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let output = formatter.format_report(&sample_report(), false).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["scene_name"], "SimpleCircle");
    }

    fn sample_doctor(available: bool) -> DoctorReport {
        DoctorReport {
            renderer: PathBuf::from("manim"),
            renderer_available: available,
            renderer_version: available.then(|| "Manim Community v0.18.1".to_string()),
            provider: "Gemini".to_string(),
            model: "gemini-2.0-flash-001".to_string(),
            quality: "low".to_string(),
            config_valid: true,
            config_error: None,
        }
    }

    #[test]
    fn test_doctor_healthy() {
        assert!(sample_doctor(true).healthy());
        assert!(!sample_doctor(false).healthy());
    }

    #[test]
    fn test_doctor_human_mentions_missing_renderer() {
        let formatter = OutputFormatter::new(OutputFormat::Human);
        let output = formatter.format_doctor(&sample_doctor(false)).unwrap();
        assert!(output.contains("NOT FOUND"));
        assert!(output.contains("SKETCHMOTION_RENDERER"));
    }

    #[test]
    fn test_doctor_json_round_trips() {
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let output = formatter.format_doctor(&sample_doctor(true)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["renderer_available"], true);
    }
}
