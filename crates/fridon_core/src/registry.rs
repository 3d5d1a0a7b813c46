//! Ordered plugin registry.

use crate::plugin::Plugin;
use indexmap::IndexMap;
use std::sync::Arc;

/// Holds plugins in registration order.
///
/// The pipeline runs plugins in the order they were registered, so the
/// registry preserves insertion order rather than hashing it away.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: IndexMap<&'static str, Arc<dyn Plugin>>,
}

impl core::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("plugins", &self.names())
            .finish()
    }
}

impl PluginRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            plugins: IndexMap::new(),
        }
    }

    /// Registers a plugin under its metadata name.
    ///
    /// # Panics
    ///
    /// Panics if a plugin with the same name is already registered.
    pub fn register(&mut self, plugin: Arc<dyn Plugin>) {
        let name = plugin.metadata().name;
        assert!(
            !self.plugins.contains_key(name),
            "plugin '{name}' is already registered"
        );
        self.plugins.insert(name, plugin);
    }

    /// Returns a plugin by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn Plugin>> {
        self.plugins.get(name).cloned()
    }

    /// Lists plugin names in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.plugins.keys().copied().collect()
    }

    /// Returns the plugins in registration order.
    #[must_use]
    pub fn plugins(&self) -> Vec<Arc<dyn Plugin>> {
        self.plugins.values().cloned().collect()
    }

    /// Number of registered plugins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::{PluginFuture, PluginMetadata};

    struct Named(&'static str);

    impl Plugin for Named {
        fn metadata(&self) -> PluginMetadata {
            PluginMetadata {
                name: self.0,
                description: "test plugin",
            }
        }

        fn process<'a>(&'a self, _message: &'a str) -> PluginFuture<'a> {
            Box::pin(async { Ok(None) })
        }
    }

    #[test]
    fn preserves_registration_order() {
        let mut registry = PluginRegistry::new();
        registry.register(Arc::new(Named("b")));
        registry.register(Arc::new(Named("a")));
        registry.register(Arc::new(Named("c")));

        assert_eq!(registry.names(), vec!["b", "a", "c"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn duplicate_registration_panics() {
        let mut registry = PluginRegistry::new();
        registry.register(Arc::new(Named("dup")));
        registry.register(Arc::new(Named("dup")));
    }

    #[test]
    fn get_returns_registered_plugin() {
        let mut registry = PluginRegistry::new();
        registry.register(Arc::new(Named("one")));

        assert!(registry.get("one").is_some());
        assert!(registry.get("two").is_none());
    }
}
