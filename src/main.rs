use sketchmotion::cli::commands::{CliArgs, Commands};
use sketchmotion::cli::handlers::{handle_clean, handle_doctor, handle_examples, handle_render};
use sketchmotion::util::logging::{init_logging, parse_level, LoggingConfig};
use sketchmotion::VERSION;

use clap::Parser;
use std::env;
use tracing::{debug, Level};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("sketchmotion v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Render(render_args) => handle_render(render_args, args.quiet).await,
        Commands::Examples => handle_examples(),
        Commands::Doctor(doctor_args) => handle_doctor(doctor_args).await,
        Commands::Clean(clean_args) => handle_clean(clean_args),
    };

    std::process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    let level = if let Some(level_str) = &args.log_level {
        parse_level(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        let level_str =
            env::var("SKETCHMOTION_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        parse_level(&level_str)
    };

    init_logging(LoggingConfig::with_level(level));
}
