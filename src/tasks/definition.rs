//! Task definition model
//!
//! The wire shape mirrors a declarative task file: each task names a target
//! platform, embeds the generic build options, and may carry one sub-record
//! of platform-specific options keyed by the platform tag. Only the
//! sub-record selected by `platform` is ever consulted.

use crate::shell::{render_command_line, ShellToken};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Platform-agnostic build options for a container image build
///
/// Absent fields never produce command-line tokens; only explicitly set,
/// non-empty values are emitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildOptions {
    /// Build arguments passed as repeated `--build-arg key=value`
    pub args: IndexMap<String, String>,
    /// Build context path, emitted as the trailing positional argument
    pub context: Option<String>,
    /// Dockerfile path, emitted as `-f <path>`
    pub dockerfile: Option<String>,
    /// Image labels passed as repeated `--label key=value`
    pub labels: IndexMap<String, String>,
    /// Image tag, emitted as `-t <tag>`
    pub tag: Option<String>,
    /// Named build stage, emitted as `--target <stage>`
    pub target: Option<String>,
    /// Always pull base images, emitted as `--pull`
    pub pull: Option<bool>,
}

/// A declarative build task as read from the task file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDefinition {
    /// Task name, used for lookup and error reporting
    pub label: String,
    /// Platform discriminant selecting the inference helper (e.g. "node",
    /// "netCore")
    pub platform: String,
    /// Generic build options; helpers fill in what the user left unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<BuildOptions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub problem_matchers: Vec<String>,
    /// Platform-specific sub-records, keyed by platform tag. Parsed lazily
    /// by the helper that owns the tag.
    #[serde(flatten)]
    pub platform_options: IndexMap<String, serde_json::Value>,
}

impl TaskDefinition {
    /// Returns the platform-specific sub-record for `platform`, or
    /// `Value::Null` when the task declares none.
    pub fn options_for(&self, platform: &str) -> serde_json::Value {
        self.platform_options
            .get(platform)
            .cloned()
            .unwrap_or(serde_json::Value::Null)
    }
}

/// A task file: a flat list of task definitions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub tasks: Vec<TaskDefinition>,
}

impl TaskFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read task file {:?}", path))?;
        serde_json::from_str(&content).context(format!("Failed to parse task file {:?}", path))
    }

    pub fn find_task(&self, label: &str) -> Option<&TaskDefinition> {
        self.tasks.iter().find(|t| t.label == label)
    }
}

/// A workspace folder a task executes against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceFolder {
    pub name: String,
    pub path: PathBuf,
}

impl WorkspaceFolder {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Builds a folder from a directory path, naming it after the final
    /// path component.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        Self { name, path }
    }
}

/// Where a task is scoped to execute
///
/// Only folder-scoped tasks can be resolved; the other scopes carry no
/// workspace to probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExecutionScope {
    Global,
    Workspace,
    Folder(WorkspaceFolder),
}

impl ExecutionScope {
    pub fn folder(&self) -> Option<&WorkspaceFolder> {
        match self {
            ExecutionScope::Folder(folder) => Some(folder),
            _ => None,
        }
    }
}

/// Identity of a resolved task, carried through to the executor
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskIdentity {
    pub name: String,
    pub scope: ExecutionScope,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub problem_matchers: Vec<String>,
}

/// The synthesized invocation: executable plus ordered argument tokens
#[derive(Debug, Clone, Serialize)]
pub struct ShellCommand {
    pub executable: String,
    pub args: Vec<ShellToken>,
}

impl ShellCommand {
    /// Splits a full token sequence into executable (index 0) and arguments.
    pub fn from_tokens(mut tokens: Vec<ShellToken>) -> Self {
        let executable = if tokens.is_empty() {
            String::new()
        } else {
            tokens.remove(0).text
        };
        Self {
            executable,
            args: tokens,
        }
    }

    /// Renders the full command as a single POSIX shell line.
    pub fn to_shell_line(&self) -> String {
        if self.args.is_empty() {
            return self.executable.clone();
        }
        format!(
            "{} {}",
            self.executable,
            render_command_line(&self.args)
        )
    }
}

/// A fully resolved task, ready to hand to an executor
#[derive(Debug, Clone, Serialize)]
pub struct ExecutableTask {
    pub identity: TaskIdentity,
    pub command: ShellCommand,
}
