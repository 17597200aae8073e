//! Plugin descriptors.
//!
//! Static metadata plus the lifecycle hooks bound to it.

use crate::plugin::interface::{Activatable, HookContext, NoopHooks};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Plugin metadata, as declared in static configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PluginInfo {
    /// Plugin ID
    pub id: String,
    /// Plugin name
    pub name: String,
    /// Version
    pub version: String,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Hard dependencies, in declaration order
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Soft dependencies; never block activation or deactivation
    #[serde(default)]
    pub soft_dependencies: Vec<String>,
    /// Configuration defaults handed to lifecycle hooks
    #[serde(default)]
    pub defaults: HashMap<String, serde_json::Value>,
}

impl PluginInfo {
    /// Create new plugin info.
    pub fn new(id: &str, name: &str, version: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            version: version.to_string(),
            description: String::new(),
            dependencies: Vec::new(),
            soft_dependencies: Vec::new(),
            defaults: HashMap::new(),
        }
    }

    /// Set description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    /// Add hard dependency.
    pub fn with_dependency(mut self, dep: &str) -> Self {
        self.dependencies.push(dep.to_string());
        self
    }

    /// Add soft dependency.
    pub fn with_soft_dependency(mut self, dep: &str) -> Self {
        self.soft_dependencies.push(dep.to_string());
        self
    }

    /// Add a configuration default.
    pub fn with_default(mut self, key: &str, value: serde_json::Value) -> Self {
        self.defaults.insert(key.to_string(), value);
        self
    }
}

/// A registered plugin: metadata and hooks. Immutable once built.
#[derive(Clone)]
pub struct PluginDescriptor {
    info: PluginInfo,
    hooks: Arc<dyn Activatable>,
}

impl PluginDescriptor {
    /// Create a descriptor with the given hooks.
    pub fn new(info: PluginInfo, hooks: Arc<dyn Activatable>) -> Self {
        Self { info, hooks }
    }

    /// Create a descriptor whose hooks do nothing.
    pub fn without_hooks(info: PluginInfo) -> Self {
        Self::new(info, Arc::new(NoopHooks))
    }

    /// Plugin ID.
    pub fn id(&self) -> &str {
        &self.info.id
    }

    /// Plugin name.
    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Plugin version.
    pub fn version(&self) -> &str {
        &self.info.version
    }

    /// Hard dependency ids.
    pub fn dependencies(&self) -> &[String] {
        &self.info.dependencies
    }

    /// Soft dependency ids.
    pub fn soft_dependencies(&self) -> &[String] {
        &self.info.soft_dependencies
    }

    /// Full metadata.
    pub fn info(&self) -> &PluginInfo {
        &self.info
    }

    /// Lifecycle hooks.
    pub fn hooks(&self) -> &dyn Activatable {
        self.hooks.as_ref()
    }

    /// Check whether `id` is a hard dependency.
    pub fn depends_on(&self, id: &str) -> bool {
        self.info.dependencies.iter().any(|dep| dep == id)
    }

    /// Build the context passed to this plugin's hooks.
    pub fn context(&self) -> HookContext {
        HookContext::new(&self.info.id).with_config(self.info.defaults.clone())
    }
}

impl std::fmt::Debug for PluginDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginDescriptor")
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}
