//! Plugin lifecycle interface.
//!
//! Defines the capability every plugin exposes to the activation controller.

use async_trait::async_trait;
use std::collections::HashMap;

/// Context passed to lifecycle hooks.
#[derive(Clone, Debug, Default)]
pub struct HookContext {
    /// Plugin being activated or deactivated
    pub plugin_id: String,
    /// Declared configuration defaults of the plugin
    pub config: HashMap<String, serde_json::Value>,
}

impl HookContext {
    /// Create a new context.
    pub fn new(plugin_id: &str) -> Self {
        Self {
            plugin_id: plugin_id.to_string(),
            config: HashMap::new(),
        }
    }

    /// Attach configuration values.
    pub fn with_config(mut self, config: HashMap<String, serde_json::Value>) -> Self {
        self.config = config;
        self
    }

    /// Get config value.
    pub fn get_config<T: for<'de> serde::Deserialize<'de>>(&self, key: &str) -> Option<T> {
        self.config.get(key).and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

/// Result type for hook invocations.
pub type HookResult<T> = std::result::Result<T, HookError>;

/// Error raised by a lifecycle hook.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HookError {
    /// Error message
    pub message: String,
}

impl HookError {
    /// Create a new error.
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for HookError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HookError: {}", self.message)
    }
}

impl std::error::Error for HookError {}

/// Lifecycle capability implemented per plugin.
///
/// Hooks may be asynchronous (e.g. warming a cache). The controller awaits
/// them before committing any state change.
#[async_trait]
pub trait Activatable: Send + Sync {
    /// Called before the plugin is marked active.
    async fn on_activate(&self, _ctx: &HookContext) -> HookResult<()> {
        Ok(())
    }

    /// Called before the plugin is removed from the active set.
    async fn on_deactivate(&self, _ctx: &HookContext) -> HookResult<()> {
        Ok(())
    }
}

/// Hooks that do nothing; used for plugins declared purely in configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHooks;

#[async_trait]
impl Activatable for NoopHooks {}
