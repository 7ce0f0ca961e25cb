use crate::render::Quality;
use clap::{Parser, Subcommand, ValueEnum};
use genai::adapter::AdapterKind;
use std::path::PathBuf;

/// LLM-powered Manim animation generator
#[derive(Parser, Debug)]
#[command(
    name = "sketchmotion",
    about = "Generate and render short Manim animations from text prompts",
    version,
    author,
    long_about = "sketchmotion asks an LLM to write Manim code for a described animation, \
                  runs the manim renderer on the result, and reports the produced video. \
                  It supports multiple AI providers (Ollama, OpenAI, Anthropic, Gemini, \
                  xAI, Groq) and human or JSON output."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Verbose output (debug logging)")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Generate and render an animation from a prompt",
        long_about = "Asks the configured LLM for Manim code matching the prompt, renders \
                      it, and prints the path of the produced video.\n\n\
                      Examples:\n  \
                      sketchmotion render \"a circle transforming into a square\"\n  \
                      sketchmotion render --example square-to-circle\n  \
                      sketchmotion render \"a sine wave\" --quality medium --format json"
    )]
    Render(RenderArgs),

    #[command(about = "List the built-in example prompts")]
    Examples,

    #[command(
        about = "Check renderer and configuration health",
        long_about = "Verifies that the manim executable is reachable and the environment \
                      configuration is valid.\n\n\
                      Examples:\n  \
                      sketchmotion doctor\n  \
                      sketchmotion doctor --format json"
    )]
    Doctor(DoctorArgs),

    #[command(about = "Remove the generated media directory")]
    Clean(CleanArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct RenderArgs {
    #[arg(
        value_name = "PROMPT",
        required_unless_present = "example",
        conflicts_with = "example",
        help = "Natural-language description of the animation"
    )]
    pub prompt: Option<String>,

    #[arg(
        long,
        value_name = "NAME",
        help = "Use a built-in example prompt (see `sketchmotion examples`)"
    )]
    pub example: Option<String>,

    #[arg(
        long,
        value_enum,
        help = "Render quality (overrides SKETCHMOTION_QUALITY)"
    )]
    pub quality: Option<QualityArg>,

    #[arg(
        short = 'b',
        long,
        value_parser = parse_adapter_kind,
        help = "Force a specific AI provider (overrides SKETCHMOTION_PROVIDER)"
    )]
    pub backend: Option<AdapterKind>,

    #[arg(
        short = 'm',
        long,
        value_name = "MODEL",
        help = "Model name to use (provider-specific)"
    )]
    pub model: Option<String>,

    #[arg(
        long,
        value_name = "SECONDS",
        help = "Render timeout in seconds (overrides SKETCHMOTION_RENDER_TIMEOUT)"
    )]
    pub timeout: Option<u64>,

    #[arg(
        long,
        value_name = "DIR",
        help = "Working directory for the render (media output lands beneath it)"
    )]
    pub render_dir: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(long, help = "Print the generated Manim source alongside the result")]
    pub show_code: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DoctorArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct CleanArgs {
    #[arg(
        long,
        value_name = "DIR",
        help = "Working directory whose media output should be removed"
    )]
    pub render_dir: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityArg {
    Low,
    Medium,
    High,
    Ultra,
}

impl From<QualityArg> for Quality {
    fn from(arg: QualityArg) -> Self {
        match arg {
            QualityArg::Low => Quality::Low,
            QualityArg::Medium => Quality::Medium,
            QualityArg::High => Quality::High,
            QualityArg::Ultra => Quality::Ultra,
        }
    }
}

fn parse_adapter_kind(s: &str) -> Result<AdapterKind, String> {
    AdapterKind::from_lower_str(&s.to_lowercase()).ok_or_else(|| {
        format!(
            "Invalid provider: {}. Valid options: ollama, openai, anthropic, gemini, xai, groq",
            s
        )
    })
}
