//! sketchmotion - LLM-powered Manim animation generation
//!
//! This library turns a natural-language description of a short animation
//! into a rendered video. An LLM writes the Manim (Python) source, and the
//! `manim` executable renders it as an external child process; the library
//! itself is prompt templating, code inspection, subprocess orchestration,
//! and output-path bookkeeping.
//!
//! # Core Concepts
//!
//! - **LLM Clients**: Pluggable providers (via the genai crate) that turn a
//!   prompt into Manim source code
//! - **Scene extraction**: Locating the single `class X(Scene):` definition
//!   the generated code must contain
//! - **Render orchestration**: Running `manim` with a bounded wait and
//!   classifying the outcome (success, failure, timeout, missing artifact)
//!
//! # Example Usage
//!
//! ```no_run
//! use sketchmotion::config::SketchMotionConfig;
//! use sketchmotion::pipeline::AnimationPipeline;
//! use sketchmotion::render::SceneRunner;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SketchMotionConfig::from_env()?;
//! config.validate()?;
//!
//! let client = config.create_client()?;
//! let runner = SceneRunner::new(config.render_config());
//! let pipeline = AnimationPipeline::new(client, runner);
//!
//! let report = pipeline.animate("a circle transforming into a square").await?;
//! println!("Video: {}", report.video_path.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Project Structure
//!
//! - [`llm`]: LLM client abstraction and implementations
//! - [`codegen`]: Prompt templating and scene-name extraction
//! - [`render`]: Renderer invocation, quality profiles, output paths
//! - [`pipeline`]: End-to-end request orchestration
//! - [`cli`]: Command-line interface
//! - [`config`]: Environment-based configuration
//! - [`util`]: Logging setup

// Public modules
pub mod cli;
pub mod codegen;
pub mod config;
pub mod llm;
pub mod pipeline;
pub mod render;
pub mod util;

// Re-export key types for convenient access
pub use codegen::{extract_scene_name, strip_code_fences, ExtractError};
pub use config::{ConfigError, SketchMotionConfig};
pub use llm::{GenAIClient, LLMClient, LlmError, MockLLMClient, MockReply};
pub use pipeline::{AnimationPipeline, PipelineError, RenderReport};
pub use render::{Quality, RenderConfig, RenderError, RenderedVideo, SceneRunner};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
