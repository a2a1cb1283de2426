//! Subcommand handlers
//!
//! Each handler resolves to a process exit code; errors are printed to
//! stderr here so `main` stays a thin dispatcher.

use super::commands::{ListArgs, ResolveArgs};
use super::output::{self, OutputFormat};
use crate::config::Config;
use crate::tasks::{ExecutionScope, ResolveError, TaskFile, TaskResolver, WorkspaceFolder};
use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Exit code for an interrupted resolution, following the shell convention
/// for SIGINT.
const EXIT_CANCELLED: i32 = 130;

pub async fn handle_resolve(args: &ResolveArgs) -> i32 {
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_cancel.cancel();
        }
    });

    match resolve_task(args, &cancel).await {
        Ok(output) => {
            println!("{}", output);
            0
        }
        Err(e) => match e.downcast_ref::<ResolveError>() {
            Some(ResolveError::Cancelled) => {
                eprintln!("Cancelled.");
                EXIT_CANCELLED
            }
            _ => {
                eprintln!("Error: {:#}", e);
                1
            }
        },
    }
}

pub async fn handle_list(args: &ListArgs) -> i32 {
    match TaskFile::load(&args.file) {
        Ok(file) => {
            if file.tasks.is_empty() {
                println!("No tasks declared in {:?}", args.file);
            } else {
                println!("{}", output::format_task_list(&file));
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

async fn resolve_task(args: &ResolveArgs, cancel: &CancellationToken) -> Result<String> {
    let file = TaskFile::load(&args.file)?;
    let task = file.find_task(&args.task).with_context(|| {
        format!("No task labelled '{}' in {:?}", args.task, args.file)
    })?;

    let workspace = workspace_dir(args)?;
    let scope = ExecutionScope::Folder(WorkspaceFolder::from_path(workspace));

    let config = Config::from_env().with_docker_path_override(args.docker_path.clone());
    let resolver = TaskResolver::new(&config);

    debug!(task = %task.label, file = ?args.file, "Resolving task from file");

    let resolved = resolver.resolve(task, &scope, cancel).await?;
    output::format_task(&resolved, OutputFormat::from(args.format))
}

fn workspace_dir(args: &ResolveArgs) -> Result<PathBuf> {
    let dir = match &args.workspace {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("Failed to determine current directory")?,
    };

    if !dir.is_dir() {
        bail!("Workspace folder {:?} is not a directory", dir);
    }

    Ok(dir)
}
