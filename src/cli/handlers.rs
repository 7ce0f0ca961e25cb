//! CLI command handlers
//!
//! Each handler resolves configuration (environment first, CLI flags
//! overriding), runs its command, and returns a process exit code:
//! 0 on success, 1 for a failed request, 2 for configuration errors.

use crate::cli::commands::{CleanArgs, DoctorArgs, RenderArgs};
use crate::cli::output::{DoctorReport, OutputFormatter};
use crate::config::{default_model, SketchMotionConfig};
use crate::pipeline::AnimationPipeline;
use crate::render::SceneRunner;
use indicatif::ProgressBar;
use std::process::Stdio;
use std::time::Duration;
use tracing::{debug, error};

/// Built-in example prompts, mirroring the classic starter animations
pub const EXAMPLE_PROMPTS: &[(&str, &str)] = &[
    (
        "simple-circle",
        "Show a circle appearing and then disappearing quickly.",
    ),
    (
        "basic-tree",
        "Animate a very simple tree: a root node, then two child nodes appear one by one.",
    ),
    ("square-to-circle", "A square transforms into a circle."),
    (
        "growing-line",
        "Animate a line growing from left to right from the center.",
    ),
];

/// Looks up a built-in example prompt by name
pub fn example_prompt(name: &str) -> Option<&'static str> {
    let wanted = name.to_lowercase();
    EXAMPLE_PROMPTS
        .iter()
        .find(|(key, _)| *key == wanted)
        .map(|(_, prompt)| *prompt)
}

/// Handles `sketchmotion render`
pub async fn handle_render(args: &RenderArgs, quiet: bool) -> i32 {
    let mut config = match SketchMotionConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            return 2;
        }
    };

    // CLI flags override the environment.
    if let Some(backend) = args.backend {
        config.provider = backend;
        if args.model.is_none() && std::env::var("SKETCHMOTION_MODEL").is_err() {
            config.model = default_model(backend);
        }
    }
    if let Some(ref model) = args.model {
        config.model = model.clone();
    }
    if let Some(quality) = args.quality {
        config.quality = quality.into();
    }
    if let Some(timeout) = args.timeout {
        config.render_timeout_secs = timeout;
    }
    if let Some(ref render_dir) = args.render_dir {
        config.render_dir = render_dir.clone();
    }

    if let Err(e) = config.validate() {
        error!("{}", e);
        eprintln!("Error: {}", e);
        return 2;
    }

    let prompt = match resolve_prompt(args) {
        Ok(prompt) => prompt,
        Err(message) => {
            eprintln!("{}", message);
            return 2;
        }
    };

    debug!("{}", config);

    let client = match config.create_client() {
        Ok(client) => client,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            return 2;
        }
    };

    let runner = SceneRunner::new(config.render_config());
    let pipeline = AnimationPipeline::new(client, runner);

    let spinner = make_spinner(quiet, "Crafting animation visuals...");
    let result = pipeline.animate(&prompt).await;
    spinner.finish_and_clear();

    match result {
        Ok(report) => {
            let formatter = OutputFormatter::new(args.format.into());
            match formatter.format_report(&report, args.show_code) {
                Ok(output) => {
                    println!("{}", output);
                    0
                }
                Err(e) => {
                    error!("failed to format output: {}", e);
                    eprintln!("Error: {}", e);
                    1
                }
            }
        }
        Err(e) => {
            error!("animation request failed: {}", e);
            eprintln!("{}", e.help_message());
            1
        }
    }
}

/// Handles `sketchmotion examples`
pub fn handle_examples() -> i32 {
    println!("Built-in example prompts (use with `sketchmotion render --example <NAME>`):\n");
    for (name, prompt) in EXAMPLE_PROMPTS {
        println!("  {:<18} {}", name, prompt);
    }
    0
}

/// Handles `sketchmotion doctor`
pub async fn handle_doctor(args: &DoctorArgs) -> i32 {
    let config = match SketchMotionConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 2;
        }
    };

    let config_error = config.validate().err().map(|e| e.to_string());
    let renderer_version = probe_renderer(&config).await;

    let report = DoctorReport {
        renderer: config.renderer.clone(),
        renderer_available: renderer_version.is_some(),
        renderer_version,
        provider: config.provider.as_str().to_string(),
        model: config.model.clone(),
        quality: config.quality.to_string(),
        config_valid: config_error.is_none(),
        config_error,
    };

    let formatter = OutputFormatter::new(args.format.into());
    match formatter.format_doctor(&report) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    }

    if report.healthy() {
        0
    } else {
        1
    }
}

/// Handles `sketchmotion clean`
pub fn handle_clean(args: &CleanArgs) -> i32 {
    let mut config = match SketchMotionConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 2;
        }
    };
    if let Some(ref render_dir) = args.render_dir {
        config.render_dir = render_dir.clone();
    }

    let media_root = config.render_config().media_root();
    if !media_root.exists() {
        println!("Nothing to clean: {} does not exist", media_root.display());
        return 0;
    }

    match std::fs::remove_dir_all(&media_root) {
        Ok(()) => {
            println!("Removed {}", media_root.display());
            0
        }
        Err(e) => {
            error!(dir = %media_root.display(), error = %e, "could not remove media directory");
            eprintln!("Error: could not remove {}: {}", media_root.display(), e);
            1
        }
    }
}

fn resolve_prompt(args: &RenderArgs) -> Result<String, String> {
    if let Some(ref name) = args.example {
        return example_prompt(name).map(str::to_string).ok_or_else(|| {
            let names: Vec<&str> = EXAMPLE_PROMPTS.iter().map(|(key, _)| *key).collect();
            format!(
                "Error: unknown example '{}'. Available examples: {}",
                name,
                names.join(", ")
            )
        });
    }

    // clap guarantees the prompt is present when --example is absent.
    let prompt = args.prompt.clone().unwrap_or_default();
    let prompt = prompt.trim().to_string();
    if prompt.is_empty() {
        return Err(
            "Error: empty prompt. Describe the animation, or pick one with --example".to_string(),
        );
    }
    Ok(prompt)
}

/// Terminal spinner shown while the LLM and renderer work
///
/// Hidden in quiet mode and when stderr is not a terminal, so logs and
/// redirected output stay clean.
fn make_spinner(quiet: bool, message: &str) -> ProgressBar {
    if quiet || !atty::is(atty::Stream::Stderr) {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

/// Probes the renderer with a version query; returns the first output line
async fn probe_renderer(config: &SketchMotionConfig) -> Option<String> {
    let mut cmd = tokio::process::Command::new(&config.renderer);
    cmd.arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null());

    let output = tokio::time::timeout(Duration::from_secs(10), cmd.output())
        .await
        .ok()?
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let first_line = stdout.lines().next().unwrap_or("").trim().to_string();
    Some(first_line)
}
