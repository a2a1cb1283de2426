//! Platform helper registry
//!
//! Platform dispatch goes through a lookup keyed by the task's platform tag,
//! so adding a platform means registering one more helper rather than
//! growing a branch chain in the resolver.

use super::helper::TaskHelper;
use super::netcore::NetCoreTaskHelper;
use super::node::NodeTaskHelper;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of platform inference helpers
#[derive(Clone, Default)]
pub struct TaskHelperRegistry {
    helpers: HashMap<&'static str, Arc<dyn TaskHelper>>,
}

impl TaskHelperRegistry {
    pub fn new() -> Self {
        Self {
            helpers: HashMap::new(),
        }
    }

    /// Registry with the built-in platforms registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(NetCoreTaskHelper::new()));
        registry.register(Arc::new(NodeTaskHelper::new()));
        registry
    }

    /// Registers a helper under its own platform tag. A later registration
    /// for the same tag replaces the earlier one.
    pub fn register(&mut self, helper: Arc<dyn TaskHelper>) {
        self.helpers.insert(helper.platform(), helper);
    }

    /// Looks up the helper for a platform tag.
    pub fn get(&self, platform: &str) -> Option<&dyn TaskHelper> {
        self.helpers.get(platform).map(|h| h.as_ref())
    }

    /// Registered platform tags, sorted for stable output.
    pub fn platforms(&self) -> Vec<&'static str> {
        let mut platforms: Vec<&'static str> = self.helpers.keys().copied().collect();
        platforms.sort_unstable();
        platforms
    }
}

impl std::fmt::Debug for TaskHelperRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskHelperRegistry")
            .field("platforms", &self.platforms())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_with_defaults() {
        let registry = TaskHelperRegistry::with_defaults();
        assert_eq!(registry.platforms(), vec!["netCore", "node"]);
    }

    #[test]
    fn test_get_known_platform() {
        let registry = TaskHelperRegistry::with_defaults();
        assert!(registry.get("node").is_some());
        assert!(registry.get("netCore").is_some());
    }

    #[test]
    fn test_get_unknown_platform() {
        let registry = TaskHelperRegistry::with_defaults();
        assert!(registry.get("go").is_none());
        assert!(registry.get("").is_none());
    }

    #[test]
    fn test_platform_tags_are_case_sensitive() {
        let registry = TaskHelperRegistry::with_defaults();
        assert!(registry.get("netcore").is_none());
        assert!(registry.get("Node").is_none());
    }
}
