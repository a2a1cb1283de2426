//! Task resolution orchestration
//!
//! `TaskResolver` turns a declarative task definition into an executable
//! command description: it validates the execution scope, dispatches to the
//! platform helper selected by the task's discriminant, and synthesizes the
//! final `docker build` command line from the resolved options.
//!
//! Resolution is a straight-line pipeline with two failure exits (scope,
//! platform) and one cancellation exit. Each call is independent: options
//! are cloned before any mutation, and nothing is cached between calls.

use super::definition::{
    BuildOptions, ExecutableTask, ExecutionScope, ShellCommand, TaskDefinition, TaskIdentity,
};
use super::registry::TaskHelperRegistry;
use crate::config::Config;
use crate::shell::{CommandLineBuilder, ShellToken};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Errors that can occur while resolving a build task
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The task is not scoped to a concrete workspace folder
    #[error("Unable to determine task scope to execute build task '{task}'")]
    ScopeResolution { task: String },

    /// The task names a platform no helper is registered for
    #[error("Unrecognized platform '{platform}'")]
    UnsupportedPlatform { platform: String },

    /// Cooperative cancellation was observed mid-resolution; not a failure
    #[error("Build task resolution was cancelled")]
    Cancelled,

    /// A platform helper failed; surfaced unchanged
    #[error(transparent)]
    Helper(#[from] anyhow::Error),
}

/// Resolves task definitions into executable build commands
pub struct TaskResolver {
    registry: TaskHelperRegistry,
    docker_path: String,
}

impl TaskResolver {
    /// Resolver with the built-in platform helpers and the configured build
    /// tool executable.
    pub fn new(config: &Config) -> Self {
        Self::with_registry(TaskHelperRegistry::with_defaults(), &config.docker_path)
    }

    pub fn with_registry(registry: TaskHelperRegistry, docker_path: impl Into<String>) -> Self {
        Self {
            registry,
            docker_path: docker_path.into(),
        }
    }

    pub fn registry(&self) -> &TaskHelperRegistry {
        &self.registry
    }

    /// Resolves `task` against `scope` into an [`ExecutableTask`].
    ///
    /// The embedded build options are cloned before the platform helper sees
    /// them, so nothing the helper fills in leaks back into the caller's
    /// definition. The helper call is the only suspension point; once
    /// `cancel` is signalled the resolution returns
    /// [`ResolveError::Cancelled`] instead of a helper result.
    pub async fn resolve(
        &self,
        task: &TaskDefinition,
        scope: &ExecutionScope,
        cancel: &CancellationToken,
    ) -> Result<ExecutableTask, ResolveError> {
        let folder = scope.folder().ok_or_else(|| ResolveError::ScopeResolution {
            task: task.label.clone(),
        })?;

        let options = task.build.clone().unwrap_or_default();

        let helper =
            self.registry
                .get(&task.platform)
                .ok_or_else(|| ResolveError::UnsupportedPlatform {
                    platform: task.platform.clone(),
                })?;

        let helper_options = task.options_for(&task.platform);

        debug!(
            task = %task.label,
            platform = %task.platform,
            folder = %folder.path.display(),
            "Dispatching platform inference"
        );

        let resolved = tokio::select! {
            _ = cancel.cancelled() => return Err(ResolveError::Cancelled),
            result = helper.resolve_build_options(folder, options, helper_options, cancel) => {
                if cancel.is_cancelled() {
                    return Err(ResolveError::Cancelled);
                }
                result?
            }
        };

        let command = ShellCommand::from_tokens(self.build_command_line(&resolved));

        info!(
            task = %task.label,
            command = %command.to_shell_line(),
            "Resolved build task"
        );

        Ok(ExecutableTask {
            identity: TaskIdentity {
                name: task.label.clone(),
                scope: scope.clone(),
                problem_matchers: task.problem_matchers.clone(),
            },
            command,
        })
    }

    /// Emission order is a contract with the build tool: base invocation,
    /// `--pull`, `-f`, repeated `--build-arg`, repeated `--label`, `-t`,
    /// `--target`, and the context last.
    fn build_command_line(&self, options: &BuildOptions) -> Vec<ShellToken> {
        CommandLineBuilder::new([self.docker_path.as_str(), "build", "--rm"])
            .with_flag_arg("--pull", options.pull.unwrap_or(false))
            .with_named_arg("-f", options.dockerfile.as_deref())
            .with_key_value_args("--build-arg", &options.args)
            .with_key_value_args("--label", &options.labels)
            .with_named_arg("-t", options.tag.as_deref())
            .with_named_arg("--target", options.target.as_deref())
            .with_quoted_arg(options.context.as_deref())
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::helper::TaskHelper;
    use crate::tasks::WorkspaceFolder;
    use async_trait::async_trait;
    use indexmap::IndexMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Helper that echoes the options back unchanged and counts invocations.
    struct StubHelper {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl TaskHelper for StubHelper {
        fn platform(&self) -> &'static str {
            "stub"
        }

        async fn resolve_build_options(
            &self,
            _folder: &WorkspaceFolder,
            options: BuildOptions,
            _helper_options: serde_json::Value,
            _cancel: &CancellationToken,
        ) -> anyhow::Result<BuildOptions> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(options)
        }
    }

    /// Helper that fills inferred defaults into its copy of the options.
    struct FillingHelper;

    #[async_trait]
    impl TaskHelper for FillingHelper {
        fn platform(&self) -> &'static str {
            "filling"
        }

        async fn resolve_build_options(
            &self,
            _folder: &WorkspaceFolder,
            mut options: BuildOptions,
            _helper_options: serde_json::Value,
            _cancel: &CancellationToken,
        ) -> anyhow::Result<BuildOptions> {
            if options.tag.is_none() {
                options.tag = Some("inferred:latest".to_string());
            }
            Ok(options)
        }
    }

    struct FailingHelper;

    #[async_trait]
    impl TaskHelper for FailingHelper {
        fn platform(&self) -> &'static str {
            "failing"
        }

        async fn resolve_build_options(
            &self,
            _folder: &WorkspaceFolder,
            _options: BuildOptions,
            _helper_options: serde_json::Value,
            _cancel: &CancellationToken,
        ) -> anyhow::Result<BuildOptions> {
            anyhow::bail!("No Dockerfile found at \"/work/Dockerfile\"")
        }
    }

    fn stub_resolver() -> (TaskResolver, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = TaskHelperRegistry::new();
        registry.register(Arc::new(StubHelper {
            calls: calls.clone(),
        }));
        registry.register(Arc::new(FillingHelper));
        registry.register(Arc::new(FailingHelper));
        (TaskResolver::with_registry(registry, "docker"), calls)
    }

    fn task(platform: &str, build: Option<BuildOptions>) -> TaskDefinition {
        TaskDefinition {
            label: "build".to_string(),
            platform: platform.to_string(),
            build,
            problem_matchers: vec![],
            platform_options: IndexMap::new(),
        }
    }

    fn folder_scope() -> ExecutionScope {
        ExecutionScope::Folder(WorkspaceFolder::new("work", "/work"))
    }

    fn token_texts(task: &ExecutableTask) -> Vec<String> {
        std::iter::once(task.command.executable.clone())
            .chain(task.command.args.iter().map(|t| t.text.clone()))
            .collect()
    }

    #[tokio::test]
    async fn test_resolve_minimal_options() {
        let (resolver, _) = stub_resolver();
        let options = BuildOptions {
            dockerfile: Some("Dockerfile".to_string()),
            tag: Some("app:latest".to_string()),
            context: Some(".".to_string()),
            ..Default::default()
        };

        let resolved = resolver
            .resolve(
                &task("stub", Some(options)),
                &folder_scope(),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(
            token_texts(&resolved),
            ["docker", "build", "--rm", "-f", "Dockerfile", "-t", "app:latest", "."]
        );
    }

    #[tokio::test]
    async fn test_resolve_full_option_set_emits_fixed_order() {
        let (resolver, _) = stub_resolver();
        let mut args = IndexMap::new();
        args.insert("VERSION".to_string(), "1.0".to_string());
        let options = BuildOptions {
            // set in a scrambled order relative to emission
            target: Some("final".to_string()),
            pull: Some(true),
            context: Some("./src".to_string()),
            args,
            labels: IndexMap::new(),
            ..Default::default()
        };

        let resolved = resolver
            .resolve(
                &task("stub", Some(options)),
                &folder_scope(),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        // empty labels contribute nothing; unset tag emits no -t pair
        assert_eq!(
            token_texts(&resolved),
            [
                "docker",
                "build",
                "--rm",
                "--pull",
                "--build-arg",
                "VERSION=1.0",
                "--target",
                "final",
                "./src"
            ]
        );
    }

    #[tokio::test]
    async fn test_value_with_space_stays_one_token() {
        let (resolver, _) = stub_resolver();
        let options = BuildOptions {
            context: Some("my folder".to_string()),
            tag: Some("app:latest".to_string()),
            ..Default::default()
        };

        let resolved = resolver
            .resolve(
                &task("stub", Some(options)),
                &folder_scope(),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        let context = resolved.command.args.last().unwrap();
        assert_eq!(context.text, "my folder");
        assert!(context.quoted);
        assert!(resolved.command.to_shell_line().ends_with("'my folder'"));
    }

    #[tokio::test]
    async fn test_unsupported_platform_does_not_invoke_helper() {
        let (resolver, calls) = stub_resolver();

        let result = resolver
            .resolve(
                &task("go", None),
                &folder_scope(),
                &CancellationToken::new(),
            )
            .await;

        match result {
            Err(ResolveError::UnsupportedPlatform { platform }) => {
                assert_eq!(platform, "go");
            }
            other => panic!("Expected UnsupportedPlatform, got {:?}", other.map(|_| ())),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unresolvable_scope_fails_before_dispatch() {
        let (resolver, calls) = stub_resolver();

        let result = resolver
            .resolve(
                &task("stub", None),
                &ExecutionScope::Global,
                &CancellationToken::new(),
            )
            .await;

        match result {
            Err(ResolveError::ScopeResolution { task }) => {
                assert_eq!(task, "build");
            }
            other => panic!("Expected ScopeResolution, got {:?}", other.map(|_| ())),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cancelled_token_surfaces_cancelled() {
        let (resolver, _) = stub_resolver();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = resolver
            .resolve(&task("stub", None), &folder_scope(), &cancel)
            .await;

        assert!(matches!(result, Err(ResolveError::Cancelled)));
    }

    #[tokio::test]
    async fn test_helper_error_propagates_unchanged() {
        let (resolver, _) = stub_resolver();

        let result = resolver
            .resolve(
                &task("failing", None),
                &folder_scope(),
                &CancellationToken::new(),
            )
            .await;

        match result {
            Err(ResolveError::Helper(e)) => {
                assert_eq!(e.to_string(), "No Dockerfile found at \"/work/Dockerfile\"");
            }
            other => panic!("Expected Helper error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_resolution_does_not_mutate_the_definition() {
        let (resolver, _) = stub_resolver();
        let definition = task("filling", Some(BuildOptions::default()));

        let resolved = resolver
            .resolve(&definition, &folder_scope(), &CancellationToken::new())
            .await
            .unwrap();

        // the helper filled a tag into its copy only
        assert!(token_texts(&resolved).contains(&"inferred:latest".to_string()));
        assert_eq!(definition.build, Some(BuildOptions::default()));
    }

    #[tokio::test]
    async fn test_identity_carries_name_scope_and_matchers() {
        let (resolver, _) = stub_resolver();
        let mut definition = task("stub", None);
        definition.problem_matchers = vec!["$tsc".to_string()];

        let resolved = resolver
            .resolve(&definition, &folder_scope(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(resolved.identity.name, "build");
        assert_eq!(resolved.identity.scope, folder_scope());
        assert_eq!(resolved.identity.problem_matchers, vec!["$tsc"]);
    }
}
