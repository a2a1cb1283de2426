//! Platform inference helper contract
//!
//! A helper owns one platform tag and completes a task's generic build
//! options by probing the workspace (locating the project manifest,
//! inferring dockerfile, context, and tag). Helpers only fill fields the
//! user left unset; explicitly declared options always win.

use super::definition::{BuildOptions, WorkspaceFolder};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

/// Completes generic build options with platform-derived defaults
///
/// Implementations must be cooperative about cancellation: check the token
/// at suspension points and return promptly once it is signalled. Helpers
/// perform no externally visible side effects, so an aborted resolution
/// never leaves partial state behind.
#[async_trait]
pub trait TaskHelper: Send + Sync {
    /// Platform tag this helper is registered under (the task definition's
    /// discriminant value).
    fn platform(&self) -> &'static str;

    /// Resolves the complete option set for a build in `folder`.
    ///
    /// `options` is the caller's already-cloned generic option set;
    /// `helper_options` is the raw platform sub-record from the task
    /// definition (`Value::Null` when the task declares none).
    async fn resolve_build_options(
        &self,
        folder: &WorkspaceFolder,
        options: BuildOptions,
        helper_options: serde_json::Value,
        cancel: &CancellationToken,
    ) -> Result<BuildOptions>;
}

/// Parses a platform sub-record into the helper's typed options, treating an
/// absent record as the default.
pub fn parse_helper_options<T>(value: serde_json::Value) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if value.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(value).context("Failed to parse platform options")
}

/// Renders `path` relative to the workspace folder where possible, so
/// inferred options stay readable in task output. The folder itself becomes
/// `"."`.
pub(crate) fn workspace_relative(folder: &WorkspaceFolder, path: &std::path::Path) -> String {
    match path.strip_prefix(&folder.path) {
        Ok(relative) if relative.as_os_str().is_empty() => ".".to_string(),
        Ok(relative) => relative.to_string_lossy().to_string(),
        Err(_) => path.to_string_lossy().to_string(),
    }
}
