pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, ListArgs, OutputFormatArg, ResolveArgs};
pub use output::OutputFormat;
