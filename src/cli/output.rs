//! Output formatting for resolved tasks

use crate::tasks::{ExecutableTask, TaskFile};
use anyhow::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
    Shell,
}

/// Formats a resolved task for the selected output format.
pub fn format_task(task: &ExecutableTask, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Shell => Ok(task.command.to_shell_line()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(task)?),
        OutputFormat::Human => {
            let mut out = String::new();
            out.push_str(&format!("task     {}\n", task.identity.name));
            if !task.identity.problem_matchers.is_empty() {
                out.push_str(&format!(
                    "matchers {}\n",
                    task.identity.problem_matchers.join(", ")
                ));
            }
            out.push_str(&format!("command  {}", task.command.to_shell_line()));
            Ok(out)
        }
    }
}

/// One line per task: label and platform.
pub fn format_task_list(file: &TaskFile) -> String {
    let width = file
        .tasks
        .iter()
        .map(|t| t.label.len())
        .max()
        .unwrap_or(0);

    file.tasks
        .iter()
        .map(|t| format!("{:<width$}  {}", t.label, t.platform, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}
