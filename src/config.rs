//! Configuration management for sketchmotion
//!
//! This module provides a configuration system that loads settings from
//! environment variables with sensible defaults. Configuration includes
//! provider selection, model name, render quality, renderer location, and
//! timeouts. The loaded struct is passed into component constructors
//! explicitly; there are no ambient mutable globals.
//!
//! # Environment Variables
//!
//! ## SketchMotion Configuration
//! - `SKETCHMOTION_PROVIDER`: Provider selection (ollama|openai|anthropic|gemini|xai|groq) - default: "gemini"
//! - `SKETCHMOTION_MODEL`: Model name - default is provider-specific
//! - `SKETCHMOTION_QUALITY`: Render quality (low|medium|high|ultra) - default: "low";
//!   unrecognized values are a hard error, not a silent fallback
//! - `SKETCHMOTION_RENDERER`: Renderer executable - default: "manim"
//! - `SKETCHMOTION_RENDER_DIR`: Working directory for renders - default: "."
//! - `SKETCHMOTION_RENDER_TIMEOUT`: Render timeout in seconds - default: "120"
//! - `SKETCHMOTION_REQUEST_TIMEOUT`: LLM request timeout in seconds - default: "60"
//! - `SKETCHMOTION_LOG_LEVEL`: Logging level - default: "info"
//!
//! ## Provider Configuration
//! These environment variables are read directly by the genai library:
//! - **Ollama**: `OLLAMA_HOST` (default: http://localhost:11434)
//! - **OpenAI**: `OPENAI_API_KEY` (required)
//! - **Anthropic**: `ANTHROPIC_API_KEY` (required)
//! - **Gemini**: `GOOGLE_API_KEY` (required)
//! - **xAI**: `XAI_API_KEY` (required)
//! - **Groq**: `GROQ_API_KEY` (required)

use crate::llm::{GenAIClient, LlmError};
use crate::render::{Quality, RenderConfig};
use genai::adapter::AdapterKind;
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Default values for configuration
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash-001";
const DEFAULT_OLLAMA_MODEL: &str = "qwen2.5-coder:7b";
const DEFAULT_RENDERER: &str = "manim";
const DEFAULT_QUALITY: Quality = Quality::Low;
const DEFAULT_RENDER_TIMEOUT_SECS: u64 = 120;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Default model for a provider when none is configured
pub fn default_model(provider: AdapterKind) -> String {
    match provider {
        AdapterKind::Gemini => DEFAULT_GEMINI_MODEL.to_string(),
        AdapterKind::Ollama => DEFAULT_OLLAMA_MODEL.to_string(),
        _ => "default-model".to_string(),
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid provider name
    #[error("Invalid provider: {0}. Valid options: ollama, openai, anthropic, gemini, xai, groq")]
    InvalidProvider(String),

    /// Invalid quality name
    #[error("{0}")]
    InvalidQuality(String),

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// LLM client initialization failed
    #[error("LLM client initialization failed: {0}")]
    ClientInitError(#[from] LlmError),
}

/// Main configuration structure for sketchmotion
///
/// Construct with [`SketchMotionConfig::from_env`], which reads
/// `SKETCHMOTION_*` environment variables and falls back to defaults for
/// any missing values. Provider credentials are read by genai from its
/// standard environment variables.
#[derive(Debug, Clone)]
pub struct SketchMotionConfig {
    /// LLM provider (from genai)
    pub provider: AdapterKind,

    /// Model name to use for code generation (provider-specific)
    pub model: String,

    /// Render quality for the whole process
    pub quality: Quality,

    /// Renderer executable (name on PATH or absolute path)
    pub renderer: PathBuf,

    /// Working directory for renders; media output lands beneath it
    pub render_dir: PathBuf,

    /// Render timeout in seconds
    pub render_timeout_secs: u64,

    /// LLM request timeout in seconds
    pub request_timeout_secs: u64,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl SketchMotionConfig {
    /// Loads configuration from environment variables with defaults
    ///
    /// Unrecognized provider or quality names are hard errors: a typo in
    /// `SKETCHMOTION_QUALITY` would otherwise silently change which output
    /// folder the runner looks in.
    pub fn from_env() -> Result<Self, ConfigError> {
        let provider = match env::var("SKETCHMOTION_PROVIDER") {
            Ok(s) => AdapterKind::from_lower_str(&s.to_lowercase())
                .ok_or_else(|| ConfigError::InvalidProvider(s.clone()))?,
            Err(_) => AdapterKind::Gemini,
        };

        let model = env::var("SKETCHMOTION_MODEL")
            .ok()
            .unwrap_or_else(|| default_model(provider));

        let quality = match env::var("SKETCHMOTION_QUALITY") {
            Ok(s) => s.parse::<Quality>().map_err(ConfigError::InvalidQuality)?,
            Err(_) => DEFAULT_QUALITY,
        };

        let renderer = env::var("SKETCHMOTION_RENDERER")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_RENDERER));

        let render_dir = env::var("SKETCHMOTION_RENDER_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        let render_timeout_secs = env::var("SKETCHMOTION_RENDER_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_RENDER_TIMEOUT_SECS);

        let request_timeout_secs = env::var("SKETCHMOTION_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        let log_level = env::var("SKETCHMOTION_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Ok(Self {
            provider,
            model,
            quality,
            renderer,
            render_dir,
            render_timeout_secs,
            request_timeout_secs,
            log_level,
        })
    }

    /// Validates the configuration
    ///
    /// Checks that numeric values are in valid ranges and the log level is
    /// valid. Provider-specific validation (API keys, endpoints) is handled
    /// by genai when the client is initialized.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.render_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "Render timeout must be at least 1 second".to_string(),
            ));
        }
        if self.render_timeout_secs > 3600 {
            return Err(ConfigError::ValidationFailed(
                "Render timeout cannot exceed 1 hour".to_string(),
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout must be at least 1 second".to_string(),
            ));
        }
        if self.request_timeout_secs > 600 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout cannot exceed 10 minutes".to_string(),
            ));
        }

        if self.renderer.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Renderer executable cannot be empty".to_string(),
            ));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    /// Creates an LLM client based on the configured provider
    pub fn create_client(&self) -> Result<Arc<GenAIClient>, ConfigError> {
        let timeout = Duration::from_secs(self.request_timeout_secs);
        let client = GenAIClient::new(self.provider, self.model.clone(), timeout)?;
        Ok(Arc::new(client))
    }

    /// Renderer invocation settings derived from this configuration
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            program: self.renderer.clone(),
            work_dir: self.render_dir.clone(),
            quality: self.quality,
            timeout: Duration::from_secs(self.render_timeout_secs),
        }
    }

    /// Converts configuration to a display map for output formatting
    pub fn to_display_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();

        map.insert("provider".to_string(), self.provider.as_str().to_string());
        map.insert("model".to_string(), self.model.clone());
        map.insert("quality".to_string(), self.quality.to_string());
        map.insert(
            "renderer".to_string(),
            self.renderer.display().to_string(),
        );
        map.insert(
            "render_dir".to_string(),
            self.render_dir.display().to_string(),
        );
        map.insert(
            "render_timeout_secs".to_string(),
            self.render_timeout_secs.to_string(),
        );
        map.insert(
            "request_timeout_secs".to_string(),
            self.request_timeout_secs.to_string(),
        );
        map.insert("log_level".to_string(), self.log_level.clone());

        map
    }
}

impl fmt::Display for SketchMotionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SketchMotion Configuration:")?;
        writeln!(f, "  Provider: {}", self.provider.as_str())?;
        writeln!(f, "  Model: {}", self.model)?;
        writeln!(f, "  Quality: {}", self.quality)?;
        writeln!(f, "  Renderer: {}", self.renderer.display())?;
        writeln!(f, "  Render Dir: {}", self.render_dir.display())?;
        writeln!(f, "  Render Timeout: {}s", self.render_timeout_secs)?;
        writeln!(f, "  Request Timeout: {}s", self.request_timeout_secs)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}
