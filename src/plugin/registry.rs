//! Plugin registry.
//!
//! Holds every known plugin descriptor. Populated once at startup, then
//! shared read-only (typically behind an `Arc`).

use crate::plugin::descriptor::PluginDescriptor;
use std::collections::HashMap;

/// Plugin registry keyed by plugin id, listing in insertion order.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    /// Registered descriptors
    descriptors: HashMap<String, PluginDescriptor>,
    /// Ids in first-registration order
    order: Vec<String>,
}

impl PluginRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from descriptors; later duplicates replace earlier ones.
    pub fn from_descriptors(descriptors: impl IntoIterator<Item = PluginDescriptor>) -> Self {
        let mut registry = Self::new();
        for descriptor in descriptors {
            registry.register(descriptor);
        }
        registry
    }

    /// Register a plugin, replacing any descriptor with the same id.
    ///
    /// Dependencies are not validated here; they may be registered later.
    /// A replaced id keeps its original listing position. Returns the
    /// replaced descriptor, if any.
    pub fn register(&mut self, descriptor: PluginDescriptor) -> Option<PluginDescriptor> {
        let id = descriptor.id().to_string();
        let previous = self.descriptors.insert(id.clone(), descriptor);
        if previous.is_none() {
            self.order.push(id);
        }
        previous
    }

    /// Get plugin by ID.
    pub fn get(&self, plugin_id: &str) -> Option<&PluginDescriptor> {
        self.descriptors.get(plugin_id)
    }

    /// Check if a plugin is registered.
    pub fn contains(&self, plugin_id: &str) -> bool {
        self.descriptors.contains_key(plugin_id)
    }

    /// Snapshot of all descriptors in insertion order.
    pub fn all(&self) -> Vec<&PluginDescriptor> {
        self.order
            .iter()
            .filter_map(|id| self.descriptors.get(id))
            .collect()
    }

    /// Registered ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Registered plugins that list `plugin_id` as a hard dependency.
    pub fn dependents_of(&self, plugin_id: &str) -> Vec<&PluginDescriptor> {
        self.all()
            .into_iter()
            .filter(|d| d.depends_on(plugin_id))
            .collect()
    }

    /// Get plugin count.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Check if no plugins are registered.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::descriptor::PluginInfo;

    fn descriptor(id: &str, deps: &[&str]) -> PluginDescriptor {
        let info = deps
            .iter()
            .fold(PluginInfo::new(id, id, "1.0.0"), |info, dep| info.with_dependency(dep));
        PluginDescriptor::without_hooks(info)
    }

    #[test]
    fn test_registry_creation() {
        let registry = PluginRegistry::new();
        assert_eq!(registry.len(), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_plugin() {
        let mut registry = PluginRegistry::new();
        assert!(registry.register(descriptor("barcode-scanner", &[])).is_none());

        assert_eq!(registry.len(), 1);
        assert!(registry.contains("barcode-scanner"));
        assert_eq!(registry.get("barcode-scanner").unwrap().id(), "barcode-scanner");
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_register_with_unregistered_dependency() {
        let mut registry = PluginRegistry::new();
        registry.register(descriptor("loyalty-program", &["customer-management"]));

        assert!(registry.contains("loyalty-program"));
        assert!(!registry.contains("customer-management"));
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut registry = PluginRegistry::new();
        registry.register(descriptor("a", &[]));
        registry.register(descriptor("b", &[]));

        let replaced = registry.register(descriptor("a", &["b"]));
        assert!(replaced.is_some());
        assert!(replaced.unwrap().dependencies().is_empty());

        let ids: Vec<&str> = registry.ids().collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(registry.get("a").unwrap().dependencies(), ["b".to_string()]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_all_is_insertion_ordered() {
        let registry = PluginRegistry::from_descriptors(vec![
            descriptor("zeta", &[]),
            descriptor("alpha", &[]),
            descriptor("mid", &[]),
        ]);

        let ids: Vec<&str> = registry.all().iter().map(|d| d.id()).collect();
        assert_eq!(ids, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_dependents_of() {
        let registry = PluginRegistry::from_descriptors(vec![
            descriptor("customer-management", &[]),
            descriptor("loyalty-program", &["customer-management"]),
            descriptor("barcode-scanner", &[]),
            descriptor("open-tabs", &["customer-management"]),
        ]);

        let dependents: Vec<&str> = registry
            .dependents_of("customer-management")
            .iter()
            .map(|d| d.id())
            .collect();
        assert_eq!(dependents, vec!["loyalty-program", "open-tabs"]);
        assert!(registry.dependents_of("barcode-scanner").is_empty());
    }
}
