//! Executor boundary
//!
//! Resolution stops at producing an [`ExecutableTask`]; launching the
//! process belongs to the host. This trait is that hand-off point.

use super::definition::ExecutableTask;
use anyhow::Result;
use async_trait::async_trait;

/// Runs a resolved task
///
/// Implementations own process spawning, output streaming, and exit-code
/// handling. The resolver never launches anything itself.
#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute(&self, task: &ExecutableTask) -> Result<i32>;
}
