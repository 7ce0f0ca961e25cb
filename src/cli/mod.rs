pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, CleanArgs, Commands, DoctorArgs, RenderArgs};
pub use output::{DoctorReport, OutputFormat, OutputFormatter};
