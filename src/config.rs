//! Plugin system configuration.
//!
//! Static data supplying plugin manifests, presets, subscriptions and the
//! ambient settings the controller runs with.

use crate::core::{Error, Result};
use crate::monitoring::LogConfig;
use crate::plugin::{builtin, BuiltinPlugin, PluginController, PluginDescriptor, PluginInfo, PluginRegistry};
use crate::preset::{IndustryType, PresetDefinition, PresetResolver, SubscriptionProfile};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// A plugin declared in configuration.
pub type PluginManifest = PluginInfo;

/// Top-level configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginsConfig {
    /// Upper bound on one lifecycle hook; `None` waits indefinitely
    pub hook_timeout_ms: Option<u64>,
    /// Register the built-in plugins and presets before configured ones
    pub include_builtin: bool,
    /// Logging settings
    pub logging: LogConfig,
    /// Additional or overriding plugin manifests
    pub plugins: Vec<PluginManifest>,
    /// Additional or overriding presets
    pub presets: Vec<PresetDefinition>,
    /// Enabled subscriptions
    pub subscriptions: Vec<String>,
    /// Industry vertical
    pub industry: IndustryType,
}

impl Default for PluginsConfig {
    fn default() -> Self {
        Self {
            hook_timeout_ms: Some(30_000),
            include_builtin: true,
            logging: LogConfig::default(),
            plugins: Vec::new(),
            presets: Vec::new(),
            subscriptions: Vec::new(),
            industry: IndustryType::General,
        }
    }
}

impl PluginsConfig {
    /// Parse from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Check manifests and presets for obviously broken entries.
    pub fn validate(&self) -> Result<()> {
        if let Some(manifest) = self.plugins.iter().find(|m| m.id.trim().is_empty()) {
            return Err(Error::Config(format!(
                "plugin manifest with empty id (name: {:?})",
                manifest.name
            )));
        }
        if self.presets.iter().any(|p| p.name.trim().is_empty()) {
            return Err(Error::Config("preset with empty name".to_string()));
        }
        if self.hook_timeout_ms == Some(0) {
            return Err(Error::Config("hook_timeout_ms must be positive".to_string()));
        }
        Ok(())
    }

    /// Hook timeout as a duration.
    pub fn hook_timeout(&self) -> Option<Duration> {
        self.hook_timeout_ms.map(Duration::from_millis)
    }

    /// Build the plugin registry.
    ///
    /// A manifest whose id matches a built-in plugin keeps the built-in hooks.
    pub fn build_registry(&self) -> PluginRegistry {
        let mut registry = if self.include_builtin {
            builtin::registry()
        } else {
            PluginRegistry::new()
        };
        for manifest in &self.plugins {
            let descriptor = match BuiltinPlugin::from_id(&manifest.id) {
                Some(plugin) => PluginDescriptor::new(manifest.clone(), Arc::new(plugin)),
                None => PluginDescriptor::without_hooks(manifest.clone()),
            };
            registry.register(descriptor);
        }
        registry
    }

    /// Build a controller over a freshly built registry.
    pub fn build_controller(&self) -> PluginController {
        PluginController::new(Arc::new(self.build_registry())).with_hook_timeout(self.hook_timeout())
    }

    /// Build the preset resolver.
    pub fn build_resolver(&self) -> PresetResolver {
        let mut resolver = if self.include_builtin {
            PresetResolver::with_builtin()
        } else {
            PresetResolver::new()
        };
        for preset in &self.presets {
            resolver.register(preset.clone());
        }
        resolver
    }

    /// The configured subscriptions and industry.
    pub fn subscription_profile(&self) -> SubscriptionProfile {
        SubscriptionProfile::new(self.subscriptions.iter().cloned(), self.industry)
    }
}
