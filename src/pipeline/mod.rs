//! Animation pipeline orchestration
//!
//! This module provides the high-level `AnimationPipeline` that turns a
//! natural-language prompt into a rendered video:
//!
//! 1. Builds the code-generation prompt
//! 2. Asks the LLM client for Manim source
//! 3. Strips markdown fences and extracts the scene name
//! 4. Hands the source to the renderer runner
//!
//! Every failure is terminal for the current request only; nothing here is
//! fatal to the hosting process, and nothing is retried automatically.
//! Per-request state lives in the returned [`RenderReport`], never in
//! shared mutable state, so concurrent requests cannot cross-contaminate.

use crate::codegen::{extract_scene_name, render_prompt, strip_code_fences, ExtractError};
use crate::llm::{GenerationRequest, LLMClient, LlmError};
use crate::render::{RenderError, SceneRunner};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

/// Errors that can occur during one animation request
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The generation call itself failed; no renderer process was spawned
    #[error("animation code generation failed: {0}")]
    Llm(#[from] LlmError),

    /// Generated text had no recognizable scene; no renderer process was spawned
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// The renderer ran and failed, or its output could not be located
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl PipelineError {
    /// Returns a user-friendly error message with troubleshooting hints
    pub fn help_message(&self) -> String {
        match self {
            PipelineError::Llm(llm_err) => match llm_err {
                LlmError::TimeoutError { seconds } => {
                    format!(
                        "Error: LLM request timed out after {} seconds\n\n\
                        Help: The generation call took too long. Try:\n\
                        - Increase the timeout: SKETCHMOTION_REQUEST_TIMEOUT\n\
                        - Check network connectivity\n\
                        - Try a smaller model",
                        seconds
                    )
                }
                LlmError::AuthenticationError { message } => {
                    format!(
                        "Error: Authentication failed\n\n\
                        Help: Invalid or missing credentials. Try:\n\
                        - Check the provider API key environment variable is set\n\
                        - Verify the key has not expired\n\n\
                        Details: {}",
                        message
                    )
                }
                other => {
                    format!(
                        "Error: Code generation failed\n\n\
                        Help: Try:\n\
                        - Check provider configuration: sketchmotion doctor\n\
                        - Retry the request\n\n\
                        Details: {}",
                        other
                    )
                }
            },
            PipelineError::Extract(e) => {
                format!(
                    "Error: {}\n\n\
                    Help: The model produced code without a recognizable scene.\n\
                    Rephrasing the request usually helps; keep it simple and\n\
                    mathematical (e.g. \"a circle transforming into a square\").",
                    e
                )
            }
            PipelineError::Render(render_err) => {
                let mut msg = format!("Error: {}", render_err);
                match render_err {
                    RenderError::RendererNotFound { .. } => {
                        msg.push_str(
                            "\n\nHelp: Install Manim (https://www.manim.community/) \
                             or point SKETCHMOTION_RENDERER at the executable.",
                        );
                    }
                    RenderError::Timeout { .. } => {
                        msg.push_str(
                            "\n\nHelp: The animation may be too complex or long.\n\
                             Simplify the request, or raise SKETCHMOTION_RENDER_TIMEOUT.",
                        );
                    }
                    RenderError::ArtifactMissing { siblings, .. } => {
                        if !siblings.is_empty() {
                            msg.push_str("\n\nOutput directory contents:\n");
                            for name in siblings {
                                msg.push_str(&format!("  {}\n", name));
                            }
                        }
                        msg.push_str(
                            "\nHelp: This usually means the installed Manim version \
                             writes output somewhere unexpected.",
                        );
                    }
                    _ => {}
                }
                if let Some((stdout, stderr)) = render_err.captured_output() {
                    if !stdout.trim().is_empty() {
                        msg.push_str(&format!("\n\nRenderer stdout:\n{}", stdout.trim_end()));
                    }
                    if !stderr.trim().is_empty() {
                        msg.push_str(&format!("\n\nRenderer stderr:\n{}", stderr.trim_end()));
                    }
                }
                msg
            }
        }
    }
}

/// Per-request record of one completed animation
///
/// This is the request context made explicit: everything the caller may
/// want to show (or a host UI may want to keep) about a single request
/// travels in this value rather than in session-held globals.
#[derive(Debug, Clone, Serialize)]
pub struct RenderReport {
    /// Unique id for this request
    pub request_id: Uuid,
    /// The user's original prompt
    pub prompt: String,
    /// Scene extracted from the generated code
    pub scene_name: String,
    /// Path to the rendered video artifact
    pub video_path: PathBuf,
    /// The generated Manim source that was rendered
    pub generated_code: String,
    /// Time spent in the LLM call
    pub generation_time: Duration,
    /// Time spent in the renderer
    pub render_time: Duration,
    /// When the request completed
    pub completed_at: DateTime<Utc>,
}

/// High-level pipeline from prompt to rendered video
///
/// The LLM client and the renderer runner are injected so tests can use a
/// mock client and a stub renderer executable.
pub struct AnimationPipeline {
    client: Arc<dyn LLMClient>,
    runner: SceneRunner,
}

impl std::fmt::Debug for AnimationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationPipeline")
            .field("client", &self.client.name())
            .field("runner", &self.runner)
            .finish()
    }
}

impl AnimationPipeline {
    pub fn new(client: Arc<dyn LLMClient>, runner: SceneRunner) -> Self {
        info!(client = client.name(), "animation pipeline initialized");
        Self { client, runner }
    }

    pub fn runner(&self) -> &SceneRunner {
        &self.runner
    }

    /// Runs one end-to-end animation request
    pub async fn animate(&self, user_prompt: &str) -> Result<RenderReport, PipelineError> {
        let request_id = Uuid::new_v4();
        info!(%request_id, prompt = user_prompt, "starting animation request");

        let request = GenerationRequest::from_prompt(render_prompt(user_prompt));
        let response = self.client.generate(request).await?;
        let generation_time = response.response_time;

        let code = strip_code_fences(&response.content);
        let scene_name = match extract_scene_name(&code) {
            Ok(name) => name,
            Err(e) => {
                warn!(%request_id, "generated code had no scene definition");
                return Err(e.into());
            }
        };

        info!(%request_id, scene = %scene_name, "rendering generated scene");
        let video = self.runner.render(&code, &scene_name).await?;

        info!(
            %request_id,
            video = %video.video_path.display(),
            "animation request complete"
        );

        Ok(RenderReport {
            request_id,
            prompt: user_prompt.to_string(),
            scene_name: video.scene_name,
            video_path: video.video_path,
            generated_code: code,
            generation_time,
            render_time: video.render_time,
            completed_at: Utc::now(),
        })
    }
}
