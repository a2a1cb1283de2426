//! dockwright - declarative container build tasks, resolved to command lines
//!
//! This library turns abstract build task definitions into concrete,
//! safely-quoted `docker build` command lines. It sits between a task file
//! (platform-agnostic build options plus platform-specific sub-options) and
//! whatever actually runs the command.
//!
//! # Core Concepts
//!
//! - **Task definition**: a declarative record naming a target platform and
//!   the build options the user chose to set
//! - **Platform helpers**: per-ecosystem collaborators (Node.js, .NET Core)
//!   that probe the workspace and fill in inferred defaults such as the
//!   dockerfile path, build context, and image tag
//! - **Command-line synthesis**: a token builder that emits flags and
//!   values in the fixed order the build tool expects, with per-token
//!   quoting policy so values survive the shell intact
//!
//! # Example Usage
//!
//! ```ignore
//! use dockwright::{ExecutionScope, TaskResolver, WorkspaceFolder};
//! use dockwright::Config;
//! use tokio_util::sync::CancellationToken;
//!
//! async fn resolve(task: &dockwright::TaskDefinition) -> anyhow::Result<()> {
//!     let resolver = TaskResolver::new(&Config::from_env());
//!     let scope = ExecutionScope::Folder(WorkspaceFolder::from_path("/work/api"));
//!
//!     let resolved = resolver
//!         .resolve(task, &scope, &CancellationToken::new())
//!         .await?;
//!
//!     println!("{}", resolved.command.to_shell_line());
//!     Ok(())
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`tasks`]: task model, platform helpers, and the resolver
//! - [`shell`]: shell tokens, quoting, and the command-line builder
//! - [`fs`]: filesystem abstraction used during workspace probing

// Public modules
pub mod cli;
pub mod config;
pub mod fs;
pub mod shell;
pub mod tasks;

// Re-export key types for convenient access
pub use config::Config;
pub use shell::{CommandLineBuilder, ShellToken};
pub use tasks::{
    BuildOptions, ExecutableTask, ExecutionScope, Executor, ResolveError, TaskDefinition,
    TaskFile, TaskHelperRegistry, TaskResolver, WorkspaceFolder,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
