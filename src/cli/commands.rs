use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub const DEFAULT_TASK_FILE: &str = "dockwright.json";

/// Resolves declarative container build tasks into docker build command lines
#[derive(Parser, Debug)]
#[command(
    name = "dockwright",
    about = "Resolves declarative container build tasks into docker build command lines",
    version,
    long_about = "dockwright reads build task definitions from a task file, infers \
                  platform-specific defaults (dockerfile, context, tag) from the \
                  workspace, and prints the safely-quoted docker build command line. \
                  It never launches the build itself."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Increase verbosity")]
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
        about = "Resolve a task into a docker build command line",
        long_about = "Resolves one task from the task file against a workspace folder and \
                      prints the resulting command.\n\n\
                      Examples:\n  \
                      dockwright resolve build-api\n  \
                      dockwright resolve build-api --workspace ./services/api\n  \
                      dockwright resolve build-api --format json"
    )]
    Resolve(ResolveArgs),

    #[command(
        about = "List tasks declared in the task file",
        long_about = "Lists the task names and platforms declared in the task file.\n\n\
                      Examples:\n  \
                      dockwright list\n  \
                      dockwright list --file ./ci/tasks.json"
    )]
    List(ListArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct ResolveArgs {
    #[arg(value_name = "TASK", help = "Label of the task to resolve")]
    pub task: String,

    #[arg(
        short = 'f',
        long,
        value_name = "FILE",
        default_value = DEFAULT_TASK_FILE,
        help = "Task file to read definitions from"
    )]
    pub file: PathBuf,

    #[arg(
        short = 'w',
        long,
        value_name = "DIR",
        help = "Workspace folder to resolve against (defaults to current directory)"
    )]
    pub workspace: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "human", help = "Output format")]
    pub format: OutputFormatArg,

    #[arg(
        long,
        value_name = "PATH",
        help = "Build tool executable (overrides DOCKWRIGHT_DOCKER_PATH)"
    )]
    pub docker_path: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ListArgs {
    #[arg(
        short = 'f',
        long,
        value_name = "FILE",
        default_value = DEFAULT_TASK_FILE,
        help = "Task file to read definitions from"
    )]
    pub file: PathBuf,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Human,
    Json,
    Shell,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => super::output::OutputFormat::Human,
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Shell => super::output::OutputFormat::Shell,
        }
    }
}
