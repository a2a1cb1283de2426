//! .NET Core platform helper
//!
//! Locates the application project file (`.csproj`/`.fsproj`) and derives
//! build options from it: the image tag from the project name, the
//! dockerfile beside the project, and the workspace root as build context
//! (the usual layout for .NET dockerfiles, which copy paths relative to the
//! solution root).

use super::definition::{BuildOptions, WorkspaceFolder};
use super::helper::{parse_helper_options, workspace_relative, TaskHelper};
use crate::fs::{FileSystem, RealFileSystem};
use anyhow::{bail, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Platform-specific options for .NET Core build tasks
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetCoreTaskOptions {
    /// Path to the application project file, relative to the workspace
    /// folder. When unset the helper searches the folder and its immediate
    /// subdirectories.
    pub app_project: Option<String>,
}

pub struct NetCoreTaskHelper {
    fs: Arc<dyn FileSystem>,
}

fn is_project_file(name: &str) -> bool {
    name.ends_with(".csproj") || name.ends_with(".fsproj")
}

impl NetCoreTaskHelper {
    pub fn new() -> Self {
        Self::with_fs(Arc::new(RealFileSystem::new()))
    }

    pub fn with_fs(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    fn locate_project_file(
        &self,
        folder: &WorkspaceFolder,
        options: &NetCoreTaskOptions,
    ) -> Result<PathBuf> {
        if let Some(app_project) = &options.app_project {
            let path = folder.path.join(app_project);
            if !self.fs.is_file(&path) {
                bail!("No project file found at {:?}", path);
            }
            return Ok(path);
        }

        let mut candidates = self.project_files_in(&folder.path)?;
        if candidates.is_empty() {
            // One level down covers the common src/<Project>/ layout
            for entry in self.fs.read_dir(&folder.path)? {
                if entry.is_dir() {
                    candidates.extend(self.project_files_in(&entry.path)?);
                }
            }
        }

        match candidates.len() {
            0 => bail!(
                "No .NET project file found under {:?}",
                folder.path
            ),
            1 => Ok(candidates.remove(0)),
            _ => bail!(
                "Multiple .NET project files found under {:?}; set netCore.appProject",
                folder.path
            ),
        }
    }

    fn project_files_in(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files: Vec<PathBuf> = self
            .fs
            .read_dir(dir)?
            .into_iter()
            .filter(|e| e.is_file() && is_project_file(e.file_name()))
            .map(|e| e.path)
            .collect();
        files.sort();
        Ok(files)
    }

    fn infer_tag(project_file: &Path) -> String {
        let stem = project_file
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "app".to_string());
        format!("{}:latest", stem.to_lowercase())
    }
}

impl Default for NetCoreTaskHelper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskHelper for NetCoreTaskHelper {
    fn platform(&self) -> &'static str {
        "netCore"
    }

    async fn resolve_build_options(
        &self,
        folder: &WorkspaceFolder,
        mut options: BuildOptions,
        helper_options: serde_json::Value,
        cancel: &CancellationToken,
    ) -> Result<BuildOptions> {
        let helper_options: NetCoreTaskOptions = parse_helper_options(helper_options)?;

        if cancel.is_cancelled() {
            bail!("Resolution cancelled");
        }

        let project_file = self.locate_project_file(folder, &helper_options)?;
        let project_dir = project_file
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| folder.path.clone());

        debug!(
            project_file = %project_file.display(),
            "Resolving netCore build options"
        );

        if cancel.is_cancelled() {
            bail!("Resolution cancelled");
        }

        if options.dockerfile.is_none() {
            options.dockerfile = Some(workspace_relative(folder, &project_dir.join("Dockerfile")));
        }

        if options.context.is_none() {
            options.context = Some(".".to_string());
        }

        if options.tag.is_none() {
            options.tag = Some(Self::infer_tag(&project_file));
        }

        let dockerfile = folder.path.join(options.dockerfile.as_deref().unwrap_or_default());
        if !self.fs.is_file(&dockerfile) {
            bail!("No Dockerfile found at {:?}", dockerfile);
        }

        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;

    fn folder() -> WorkspaceFolder {
        WorkspaceFolder::new("my-service", "/mock")
    }

    fn helper_with(files: &[(&str, &str)]) -> NetCoreTaskHelper {
        let fs = MockFileSystem::new();
        for (path, content) in files {
            fs.add_file(path, content);
        }
        NetCoreTaskHelper::with_fs(Arc::new(fs))
    }

    #[tokio::test]
    async fn test_infers_from_single_project_in_root() {
        let helper = helper_with(&[
            ("MyService.csproj", "<Project Sdk=\"Microsoft.NET.Sdk\" />"),
            ("Dockerfile", "FROM mcr.microsoft.com/dotnet/sdk:8.0"),
        ]);

        let resolved = helper
            .resolve_build_options(
                &folder(),
                BuildOptions::default(),
                serde_json::Value::Null,
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(resolved.tag.as_deref(), Some("myservice:latest"));
        assert_eq!(resolved.dockerfile.as_deref(), Some("Dockerfile"));
        assert_eq!(resolved.context.as_deref(), Some("."));
    }

    #[tokio::test]
    async fn test_finds_project_one_level_down() {
        let helper = helper_with(&[
            ("src/Api.fsproj", "<Project Sdk=\"Microsoft.NET.Sdk\" />"),
            ("src/Dockerfile", "FROM mcr.microsoft.com/dotnet/sdk:8.0"),
        ]);

        let resolved = helper
            .resolve_build_options(
                &folder(),
                BuildOptions::default(),
                serde_json::Value::Null,
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(resolved.tag.as_deref(), Some("api:latest"));
        assert_eq!(resolved.dockerfile.as_deref(), Some("src/Dockerfile"));
        assert_eq!(resolved.context.as_deref(), Some("."));
    }

    #[tokio::test]
    async fn test_explicit_app_project() {
        let helper = helper_with(&[
            ("web/Web.csproj", "<Project />"),
            ("worker/Worker.csproj", "<Project />"),
            ("web/Dockerfile", "FROM mcr.microsoft.com/dotnet/sdk:8.0"),
        ]);

        let resolved = helper
            .resolve_build_options(
                &folder(),
                BuildOptions::default(),
                serde_json::json!({ "appProject": "web/Web.csproj" }),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(resolved.tag.as_deref(), Some("web:latest"));
        assert_eq!(resolved.dockerfile.as_deref(), Some("web/Dockerfile"));
    }

    #[tokio::test]
    async fn test_ambiguous_projects_fail_without_app_project() {
        let helper = helper_with(&[
            ("web/Web.csproj", "<Project />"),
            ("worker/Worker.csproj", "<Project />"),
        ]);

        let result = helper
            .resolve_build_options(
                &folder(),
                BuildOptions::default(),
                serde_json::Value::Null,
                &CancellationToken::new(),
            )
            .await;

        let message = result.unwrap_err().to_string();
        assert!(message.contains("Multiple .NET project files"), "{}", message);
    }

    #[tokio::test]
    async fn test_no_project_file_fails() {
        let helper = helper_with(&[("README.md", "docs")]);

        let result = helper
            .resolve_build_options(
                &folder(),
                BuildOptions::default(),
                serde_json::Value::Null,
                &CancellationToken::new(),
            )
            .await;

        let message = result.unwrap_err().to_string();
        assert!(message.contains("No .NET project file"), "{}", message);
    }
}
