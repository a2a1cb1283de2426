//! Build task resolution
//!
//! A task definition declares what to build (platform, generic build
//! options, platform-specific sub-options); resolution turns it into a
//! concrete, safely-quoted `docker build` invocation:
//!
//! 1. The [`TaskResolver`] validates the execution scope and clones the
//!    task's generic options.
//! 2. The platform helper selected by the task's discriminant (looked up in
//!    the [`TaskHelperRegistry`]) probes the workspace and fills in inferred
//!    defaults.
//! 3. The resolved options are fed through the command-line builder in the
//!    fixed order the build tool expects, and the result is packaged as an
//!    [`ExecutableTask`] for an external [`Executor`].

pub mod definition;
pub mod executor;
pub mod helper;
pub mod netcore;
pub mod node;
pub mod registry;
pub mod resolver;

pub use definition::{
    BuildOptions, ExecutableTask, ExecutionScope, ShellCommand, TaskDefinition, TaskFile,
    TaskIdentity, WorkspaceFolder,
};
pub use executor::Executor;
pub use helper::TaskHelper;
pub use netcore::{NetCoreTaskHelper, NetCoreTaskOptions};
pub use node::{NodeTaskHelper, NodeTaskOptions};
pub use registry::TaskHelperRegistry;
pub use resolver::{ResolveError, TaskResolver};
