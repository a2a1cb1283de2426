//! Configuration for dockwright
//!
//! Settings load from environment variables with sensible defaults; CLI
//! flags override the environment.
//!
//! # Environment Variables
//!
//! - `DOCKWRIGHT_DOCKER_PATH`: build tool executable - default: "docker"
//!   (set to "podman" or an absolute path to use a different tool)
//! - `DOCKWRIGHT_LOG_LEVEL`: logging level - default: "info"

use std::env;

const DEFAULT_DOCKER_PATH: &str = "docker";

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Build tool executable used as the first command-line token
    pub docker_path: String,
}

impl Config {
    /// Loads configuration from the environment.
    pub fn from_env() -> Self {
        let docker_path = env::var("DOCKWRIGHT_DOCKER_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DOCKER_PATH.to_string());

        Self { docker_path }
    }

    /// Applies a CLI-level override on top of the environment.
    pub fn with_docker_path_override(mut self, docker_path: Option<String>) -> Self {
        if let Some(docker_path) = docker_path.filter(|p| !p.trim().is_empty()) {
            self.docker_path = docker_path;
        }
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
