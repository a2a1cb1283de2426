//! Node.js platform helper
//!
//! Infers build options from the workspace `package.json`: the image tag
//! from the package name and version, the dockerfile beside the package
//! file, and the package directory as build context.

use super::definition::{BuildOptions, WorkspaceFolder};
use super::helper::{parse_helper_options, workspace_relative, TaskHelper};
use crate::fs::{FileSystem, RealFileSystem};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Platform-specific options for Node.js build tasks
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeTaskOptions {
    /// Path to `package.json`, or the directory containing it, relative to
    /// the workspace folder. Defaults to the folder root.
    pub package_path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PackageManifest {
    name: Option<String>,
    version: Option<String>,
}

pub struct NodeTaskHelper {
    fs: Arc<dyn FileSystem>,
}

impl NodeTaskHelper {
    pub fn new() -> Self {
        Self::with_fs(Arc::new(RealFileSystem::new()))
    }

    pub fn with_fs(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    fn locate_package_file(
        &self,
        folder: &WorkspaceFolder,
        options: &NodeTaskOptions,
    ) -> Result<PathBuf> {
        let base = match &options.package_path {
            Some(package_path) => folder.path.join(package_path),
            None => folder.path.clone(),
        };

        let package_file = if self.fs.is_dir(&base) {
            base.join("package.json")
        } else {
            base
        };

        if !self.fs.is_file(&package_file) {
            bail!("No package.json found at {:?}", package_file);
        }

        Ok(package_file)
    }

    fn infer_tag(manifest: &PackageManifest, folder: &WorkspaceFolder) -> String {
        let name = manifest
            .name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&folder.name);
        // npm scopes ("@org/pkg") are not valid image repository names
        let name = name
            .trim_start_matches('@')
            .replace('/', "-")
            .to_lowercase();
        let version = manifest.version.as_deref().unwrap_or("latest");
        format!("{}:{}", name, version)
    }
}

impl Default for NodeTaskHelper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskHelper for NodeTaskHelper {
    fn platform(&self) -> &'static str {
        "node"
    }

    async fn resolve_build_options(
        &self,
        folder: &WorkspaceFolder,
        mut options: BuildOptions,
        helper_options: serde_json::Value,
        cancel: &CancellationToken,
    ) -> Result<BuildOptions> {
        let helper_options: NodeTaskOptions = parse_helper_options(helper_options)?;

        if cancel.is_cancelled() {
            bail!("Resolution cancelled");
        }

        let package_file = self.locate_package_file(folder, &helper_options)?;
        let manifest: PackageManifest = serde_json::from_str(
            &self.fs.read_to_string(&package_file)?,
        )
        .context(format!("Failed to parse {:?}", package_file))?;

        let package_dir = package_file
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| folder.path.clone());

        debug!(
            package_file = %package_file.display(),
            "Resolving node build options"
        );

        if cancel.is_cancelled() {
            bail!("Resolution cancelled");
        }

        if options.dockerfile.is_none() {
            options.dockerfile = Some(workspace_relative(folder, &package_dir.join("Dockerfile")));
        }

        if options.context.is_none() {
            options.context = Some(workspace_relative(folder, &package_dir));
        }

        if options.tag.is_none() {
            options.tag = Some(Self::infer_tag(&manifest, folder));
        }

        let dockerfile = folder.path.join(options.dockerfile.as_deref().unwrap_or_default());
        if !self.fs.is_file(&dockerfile) {
            bail!("No Dockerfile found at {:?}", dockerfile);
        }

        Ok(options)
    }
}
