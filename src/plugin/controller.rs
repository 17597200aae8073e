//! Activation controller.
//!
//! Applies dependency and dependent checks before mutating the active set.
//! Lifecycle hooks run before the set is changed, so a failed hook leaves
//! no trace: either the whole transition happens or none of it does.

use crate::core::{now, Error, Result, Timestamp};
use crate::plugin::descriptor::PluginDescriptor;
use crate::plugin::interface::{Activatable, HookContext, HookResult};
use crate::plugin::registry::PluginRegistry;
use crate::plugin::tracker::ActiveSet;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default upper bound on a single lifecycle hook.
pub const DEFAULT_HOOK_TIMEOUT: Duration = Duration::from_secs(30);

/// Whether a call changed the active set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateChange {
    /// The plugin was activated or deactivated
    Changed,
    /// Already in the requested state; no hook was invoked
    Unchanged,
}

impl StateChange {
    /// True if the active set was modified.
    pub fn is_changed(self) -> bool {
        matches!(self, StateChange::Changed)
    }
}

/// Kind of recorded transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationEventKind {
    /// Plugin became active
    Activated,
    /// Plugin became inactive
    Deactivated,
}

/// A committed transition.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActivationEvent {
    /// Plugin ID
    pub plugin_id: String,
    /// Transition kind
    pub kind: ActivationEventKind,
    /// Commit time
    pub timestamp: Timestamp,
}

/// Persisted shape of the activation state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationSnapshot {
    /// Active plugin ids in activation order
    pub active: Vec<String>,
    /// Selected preset name
    #[serde(default)]
    pub preset: Option<String>,
}

impl ActivationSnapshot {
    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Clone, Copy, Debug)]
enum HookPhase {
    Activate,
    Deactivate,
}

fn hook_call<'a>(
    hooks: &'a dyn Activatable,
    ctx: &'a HookContext,
    phase: HookPhase,
) -> BoxFuture<'a, HookResult<()>> {
    match phase {
        HookPhase::Activate => hooks.on_activate(ctx),
        HookPhase::Deactivate => hooks.on_deactivate(ctx),
    }
}

/// Owns the active set and mediates every change to it.
///
/// The registry is shared read-only; the controller itself is meant to be
/// driven from a single logical thread, which `&mut self` on the mutating
/// calls enforces.
pub struct PluginController {
    registry: Arc<PluginRegistry>,
    active: ActiveSet,
    hook_timeout: Option<Duration>,
    history: Vec<ActivationEvent>,
}

impl PluginController {
    /// Create a controller over a populated registry.
    pub fn new(registry: Arc<PluginRegistry>) -> Self {
        Self {
            registry,
            active: ActiveSet::new(),
            hook_timeout: Some(DEFAULT_HOOK_TIMEOUT),
            history: Vec::new(),
        }
    }

    /// Set the hook timeout; `None` waits indefinitely.
    pub fn with_hook_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.hook_timeout = timeout;
        self
    }

    /// The shared registry.
    pub fn registry(&self) -> &Arc<PluginRegistry> {
        &self.registry
    }

    /// The current active set.
    pub fn active_set(&self) -> &ActiveSet {
        &self.active
    }

    /// Active ids in activation order.
    pub fn active_ids(&self) -> Vec<String> {
        self.active.to_vec()
    }

    /// Descriptors of active plugins in activation order.
    pub fn active_plugins(&self) -> Vec<&PluginDescriptor> {
        self.active
            .iter()
            .filter_map(|id| self.registry.get(id))
            .collect()
    }

    /// Committed transitions, oldest first.
    pub fn history(&self) -> &[ActivationEvent] {
        &self.history
    }

    /// Check if a plugin is active.
    pub fn is_active(&self, plugin_id: &str) -> bool {
        self.active.contains(plugin_id)
    }

    /// Hard dependencies (transitively) that are unregistered or inactive.
    ///
    /// Pure query: explains why `activate` would fail without changing state.
    pub fn missing_dependencies(&self, plugin_id: &str) -> Result<Vec<String>> {
        let descriptor = self.descriptor(plugin_id)?;
        Ok(self.unsatisfied_dependencies(descriptor))
    }

    /// Soft dependencies that are not currently active.
    pub fn soft_dependencies_inactive(&self, plugin_id: &str) -> Result<Vec<String>> {
        let descriptor = self.descriptor(plugin_id)?;
        Ok(descriptor
            .soft_dependencies()
            .iter()
            .filter(|dep| !self.active.contains(dep))
            .cloned()
            .collect())
    }

    /// Active plugins listing `plugin_id` as a hard dependency.
    pub fn active_dependents(&self, plugin_id: &str) -> Vec<String> {
        self.active
            .iter()
            .filter(|id| {
                self.registry
                    .get(id)
                    .map(|d| d.depends_on(plugin_id))
                    .unwrap_or(false)
            })
            .map(str::to_string)
            .collect()
    }

    /// Activate a plugin.
    ///
    /// Every hard dependency must already be active; nothing is activated
    /// implicitly. Re-activating an active plugin is a successful no-op.
    pub async fn activate(&mut self, plugin_id: &str) -> Result<StateChange> {
        let registry = Arc::clone(&self.registry);
        let descriptor = registry
            .get(plugin_id)
            .ok_or_else(|| Error::PluginNotFound(plugin_id.to_string()))?;

        if self.active.contains(plugin_id) {
            debug!(plugin = plugin_id, "plugin already active");
            return Ok(StateChange::Unchanged);
        }

        let missing = self.unsatisfied_dependencies(descriptor);
        if !missing.is_empty() {
            warn!(plugin = plugin_id, missing = ?missing, "activation rejected");
            return Err(Error::DependencyMissing(missing));
        }

        if let Err(reason) = self.run_hook(descriptor, HookPhase::Activate).await {
            warn!(plugin = plugin_id, %reason, "activation hook failed");
            return Err(Error::ActivationHookFailed {
                id: plugin_id.to_string(),
                reason,
            });
        }

        self.active.insert(plugin_id.to_string());
        self.record(plugin_id, ActivationEventKind::Activated);
        info!(plugin = plugin_id, version = descriptor.version(), "plugin activated");
        Ok(StateChange::Changed)
    }

    /// Deactivate a plugin.
    ///
    /// Refused while any active plugin depends on it. Deactivating an
    /// inactive plugin is a successful no-op.
    pub async fn deactivate(&mut self, plugin_id: &str) -> Result<StateChange> {
        let registry = Arc::clone(&self.registry);
        let descriptor = registry
            .get(plugin_id)
            .ok_or_else(|| Error::PluginNotFound(plugin_id.to_string()))?;

        if !self.active.contains(plugin_id) {
            debug!(plugin = plugin_id, "plugin already inactive");
            return Ok(StateChange::Unchanged);
        }

        let dependents = self.active_dependents(plugin_id);
        if !dependents.is_empty() {
            warn!(plugin = plugin_id, dependents = ?dependents, "deactivation rejected");
            return Err(Error::DependentsActive(dependents));
        }

        if let Err(reason) = self.run_hook(descriptor, HookPhase::Deactivate).await {
            warn!(plugin = plugin_id, %reason, "deactivation hook failed");
            return Err(Error::DeactivationHookFailed {
                id: plugin_id.to_string(),
                reason,
            });
        }

        self.active.remove(plugin_id);
        self.record(plugin_id, ActivationEventKind::Deactivated);
        info!(plugin = plugin_id, "plugin deactivated");
        Ok(StateChange::Changed)
    }

    /// Capture the active set for persistence.
    pub fn snapshot(&self, preset: Option<&str>) -> ActivationSnapshot {
        ActivationSnapshot {
            active: self.active.to_vec(),
            preset: preset.map(str::to_string),
        }
    }

    /// Re-activate a persisted snapshot, in its recorded order.
    ///
    /// Each id goes through the normal checked path; the first failure is
    /// returned and leaves earlier activations in place.
    pub async fn restore(&mut self, snapshot: &ActivationSnapshot) -> Result<()> {
        for plugin_id in &snapshot.active {
            self.activate(plugin_id).await?;
        }
        Ok(())
    }

    fn descriptor(&self, plugin_id: &str) -> Result<&PluginDescriptor> {
        self.registry
            .get(plugin_id)
            .ok_or_else(|| Error::PluginNotFound(plugin_id.to_string()))
    }

    /// Depth-first walk of hard dependencies in declaration order.
    ///
    /// Active dependencies are not descended into: the active set is closed
    /// under hard dependencies, so their own closure is already satisfied.
    fn unsatisfied_dependencies(&self, descriptor: &PluginDescriptor) -> Vec<String> {
        let mut missing = Vec::new();
        let mut visited: HashSet<&str> = HashSet::new();
        let mut stack: Vec<&str> = descriptor
            .dependencies()
            .iter()
            .rev()
            .map(String::as_str)
            .collect();

        while let Some(dep) = stack.pop() {
            if !visited.insert(dep) || self.active.contains(dep) {
                continue;
            }
            missing.push(dep.to_string());
            if let Some(dep_descriptor) = self.registry.get(dep) {
                stack.extend(dep_descriptor.dependencies().iter().rev().map(String::as_str));
            }
        }

        missing
    }

    async fn run_hook(
        &self,
        descriptor: &PluginDescriptor,
        phase: HookPhase,
    ) -> std::result::Result<(), String> {
        let ctx = descriptor.context();
        let call = hook_call(descriptor.hooks(), &ctx, phase);
        match self.hook_timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result.map_err(|e| e.message),
                Err(_) => Err(format!("hook timed out after {} ms", limit.as_millis())),
            },
            None => call.await.map_err(|e| e.message),
        }
    }

    fn record(&mut self, plugin_id: &str, kind: ActivationEventKind) {
        self.history.push(ActivationEvent {
            plugin_id: plugin_id.to_string(),
            kind,
            timestamp: now(),
        });
    }
}

impl std::fmt::Debug for PluginController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginController")
            .field("registered", &self.registry.len())
            .field("active", &self.active)
            .field("hook_timeout", &self.hook_timeout)
            .finish()
    }
}
